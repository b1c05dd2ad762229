use dician::parse::{Closure, Position};
use dician::roll::DEFAULT_MAX_ROLLS;
use dician::*;

fn lit(x: Int) -> Operation {
    Operation::literal(x)
}

fn dice(count: Int, faces: Int) -> Operation {
    Operation::dice_roll(lit(count), Operation::die(lit(faces)))
}

fn total(s: &str) -> Number {
    parse(s).unwrap().total().unwrap()
}

#[test]
fn test_plain_arithmetic() {
    let cases: &[(&str, Number)] = &[
        ("1 + 2 * 3", Number::Int(7)),
        ("(1 + 2) * 3", Number::Int(9)),
        ("10 - 4 - 3", Number::Int(3)),
        ("2 * (3 + (4 - 1)) - 5", Number::Int(7)),
        ("7 / 2", Number::Float(3.5)),
        ("8 / 4 / 2", Number::Float(1.0)),
        ("1 + 6 / 4 * 2", Number::Float(4.0)),
        ("-3 * -(2 + 1)", Number::Int(9)),
    ];
    for (source, expected) in cases {
        assert_eq!(total(source), *expected, "{}", source);
    }
}

#[test]
fn test_two_d_six_plus_three() {
    let op = parse("2d6 + 3").unwrap();
    assert_eq!(op, Operation::sum(dice(2, 6), lit(3)));

    for _ in 0..10_000 {
        match op.total().unwrap() {
            Number::Int(x) => assert!((5..=15).contains(&x)),
            other => panic!("expected an integer, got {}", other),
        }
    }
}

#[test]
fn test_percentile_style() {
    let op = parse("10 * (1d10 - 1) + 1d10").unwrap();
    for _ in 0..1_000 {
        let x = op.total().unwrap();
        assert!(x.is_int());
        assert!((1..=100).contains(&x.as_int()));
    }
}

#[test]
fn test_unary_plus_and_true_division() {
    let op = parse("3 * +1 / 2d6").unwrap();
    for _ in 0..100 {
        let x = op.total().unwrap();
        assert!(!x.is_int());
        let x = x.as_float();
        assert!((0.25..=1.5).contains(&x));
    }
}

#[test]
fn test_bare_die() {
    let op = parse("d6").unwrap();
    let die = op.run().unwrap().as_die().unwrap();
    assert_eq!(die.faces().get(), 6);

    for _ in 0..100 {
        let x = roll("d6").unwrap().as_int();
        assert!((1..=6).contains(&x));
    }
}

#[test]
fn test_nested_dice() {
    let op = parse("(1d4)d(2d6)").unwrap();
    for _ in 0..500 {
        // 1..=4 dice of 2..=12 faces
        let x = op.total().unwrap().as_int();
        assert!((1..=48).contains(&x));
    }
}

#[test]
fn test_zero_and_negative_counts() {
    assert_eq!(total("0d6"), Number::Int(0));
    assert_eq!(total("(0 - 2)d6"), Number::Int(0));
    assert_eq!(total("(-2)d6 + 1"), Number::Int(1));
}

#[test]
fn test_parse_is_repeatable() {
    let source = "3 * +1 / 2d6 - 2 + 1d(d6) / -(2 + 1)d10 - 5 + +(d4)d8 * (d(d3))d(d12) + (d(4 + 2))d(6d6)";
    let first = parse(source).unwrap();
    let _ = parse("(((").unwrap_err();
    let second = parse(source).unwrap();
    assert_eq!(first, second);
    assert!(first.total().is_ok());
}

#[test]
fn test_division_by_zero() {
    let op = parse("1d6 / 0").unwrap();
    assert_eq!(op.run(), Err(OperationError::DivisionByZero));
    assert_eq!(
        roll("4 / (2 - 2)"),
        Err(Error::Operation(OperationError::DivisionByZero))
    );
}

#[test]
fn test_closure_errors() {
    let paren = Closure::PARENTHESES;

    let err = parse("(1+1").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::OrphanClosureBegin { closure: paren });
    assert_eq!(err.position, Position::new(1, 1));

    let err = parse("1+1)").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::OrphanClosureEnd { closure: paren });
    assert_eq!(err.position, Position::new(1, 4));

    let err = parse("(1+)").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::IncompleteEnclosedExpression { closure: paren }
    );
    assert_eq!((err.line(), err.column()), (1, 1));
}

#[test]
fn test_empty_input_is_rejected() {
    let err = parse("").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::EndOfInput);
    assert!(matches!(roll("   "), Err(Error::Parse(_))));
}

#[test]
fn test_error_messages() {
    let err = roll("2d6 +\n  (3 * ").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Ln 2, Col 3: orphan closure begin: '(' has no matching ')'"
    );
    let err = roll("2 ? 3").unwrap_err();
    assert_eq!(err.to_string(), "Ln 1, Col 3: unknown symbol '?'");
}

#[test]
fn test_bounded_context() {
    let mut ctx = RollContext::new_bounded(10, rand::thread_rng());
    assert!(roll_with("5d6 + 5d6", &mut ctx).is_ok());
    assert_eq!(ctx.rolls(), 10);
    assert_eq!(
        roll_with("1d6", &mut ctx),
        Err(Error::Operation(OperationError::TooManyRolls { max: 10 }))
    );
}

#[test]
fn test_deep_input_is_rejected() {
    for n in [2_000, 5_000] {
        let source = format!("{}1{}", "(".repeat(n), ")".repeat(n));
        let err = parse(&source).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::NestingTooDeep {
                max: Parser::MAX_NESTING
            }
        );
    }

    let source = vec!["2"; 20_000].join(" * ");
    assert!(matches!(
        roll(&source),
        Err(Error::Parse(ParseError {
            kind: ParseErrorKind::NestingTooDeep { .. },
            ..
        }))
    ));
}

#[test]
fn test_one_shot_roll_is_bounded() {
    assert_eq!(
        roll("(99999999999999999999)d6"),
        Err(Error::Operation(OperationError::TooManyRolls {
            max: DEFAULT_MAX_ROLLS
        }))
    );
    let source = format!("{}d6", DEFAULT_MAX_ROLLS);
    assert!(roll(&source).is_ok());
}
