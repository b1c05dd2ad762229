//! Parsing and rolling of dice expressions such as `2d6 + 3` or `(d4)d8 - 1`.

mod common;
mod error;
pub mod parse;
pub mod roll;

pub use common::{Float, Int, NonZeroUInt, UInt};
pub use error::Error;
pub use parse::{parse, ParseError, ParseErrorKind, Parser};
pub use roll::{Number, Operation, OperationError, RollContext, Roller, Run, Value};

/// Parses and evaluates `source` in one go.
///
/// A bare die such as `d6` is rolled once. At most
/// [`DEFAULT_MAX_ROLLS`](roll::DEFAULT_MAX_ROLLS) dice are rolled.
///
/// # Examples
/// ```
/// let total = dician::roll("2d6 + 3").unwrap().as_int();
/// assert!((5..=15).contains(&total));
/// ```
pub fn roll(source: &str) -> Result<Number, Error> {
    let mut ctx: RollContext = RollContext::default();
    roll_with(source, &mut ctx)
}

/// Like [`roll`], with explicit settings and random source.
pub fn roll_with<R: Roller>(source: &str, ctx: &mut RollContext<R>) -> Result<Number, Error> {
    let op = parse(source)?;
    Ok(op.total_with(ctx)?)
}
