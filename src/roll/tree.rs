use super::{ctx::RollContext, error::OperationError, num::Number, roller::Roller, OResult};
use crate::common::*;
use std::fmt;

/// A die with a fixed number of faces that has not been rolled yet.
///
/// This is what a [`Die`] node evaluates to. Every roll is an independent draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RollableDie {
    faces: NonZeroUInt,
}

impl RollableDie {
    pub fn new(faces: NonZeroUInt) -> Self {
        Self { faces }
    }

    fn from_faces(faces: Int) -> OResult<Self> {
        UInt::try_from(faces)
            .ok()
            .and_then(NonZeroUInt::new)
            .map(Self::new)
            .ok_or(OperationError::InvalidDie { faces })
    }

    pub fn faces(&self) -> NonZeroUInt {
        self.faces
    }

    /// Rolls once using the thread-local RNG.
    pub fn roll(&self) -> Int {
        rand::thread_rng().roll(self.faces) as Int
    }

    pub fn roll_with<R: Roller>(&self, ctx: &mut RollContext<R>) -> OResult<Int> {
        ctx.roll_one(self.faces).map(|x| x as Int)
    }
}

impl fmt::Display for RollableDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.faces)
    }
}

/// What running an [`Operation`] produces.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Value {
    Number(Number),
    Die(RollableDie),
}

impl Value {
    pub fn as_die(&self) -> Option<RollableDie> {
        match self {
            Self::Number(_) => None,
            Self::Die(d) => Some(*d),
        }
    }

    /// Numbers pass through; a die is rolled once.
    pub fn into_number<R: Roller>(self, ctx: &mut RollContext<R>) -> OResult<Number> {
        match self {
            Self::Number(x) => Ok(x),
            Self::Die(d) => d.roll_with(ctx).map(Number::Int),
        }
    }
}

impl From<Number> for Value {
    fn from(x: Number) -> Self {
        Self::Number(x)
    }
}

impl From<RollableDie> for Value {
    fn from(d: RollableDie) -> Self {
        Self::Die(d)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => fmt::Display::fmt(x, f),
            Self::Die(d) => fmt::Display::fmt(d, f),
        }
    }
}

#[enum_dispatch::enum_dispatch]
pub trait Run {
    /// Evaluates this node and its operands, drawing dice from `ctx`.
    fn run_with<R: Roller>(&self, _ctx: &mut RollContext<R>) -> OResult<Value> {
        Err(OperationError::NotImplemented)
    }
}

/// An executable roll expression tree. Every node owns its operands.
#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Run)]
pub enum Operation {
    LiteralValue(LiteralValue),
    Die(Die),
    DiceRoll(DiceRoll),
    Negate(Negate),
    Sum(Sum),
    Subtract(Subtract),
    Multiply(Multiply),
    Divide(Divide),
}

impl Operation {
    pub fn literal(value: impl Into<Number>) -> Self {
        LiteralValue::new(value.into()).into()
    }

    pub fn die(faces: Operation) -> Self {
        Die::new(faces).into()
    }

    pub fn dice_roll(count: Operation, die: Operation) -> Self {
        DiceRoll::new(count, die).into()
    }

    pub fn negate(operand: Operation) -> Self {
        Negate::new(operand).into()
    }

    pub fn sum(lhs: Operation, rhs: Operation) -> Self {
        Sum::new(lhs, rhs).into()
    }

    pub fn subtract(lhs: Operation, rhs: Operation) -> Self {
        Subtract::new(lhs, rhs).into()
    }

    pub fn multiply(lhs: Operation, rhs: Operation) -> Self {
        Multiply::new(lhs, rhs).into()
    }

    pub fn divide(lhs: Operation, rhs: Operation) -> Self {
        Divide::new(lhs, rhs).into()
    }

    /// Evaluates with the thread-local RNG and no roll budget.
    pub fn run(&self) -> OResult<Value> {
        self.run_with(&mut RollContext::new_unbounded(rand::thread_rng()))
    }

    /// Like [`run`](Self::run), but a resulting die is rolled once.
    pub fn total(&self) -> OResult<Number> {
        self.total_with(&mut RollContext::new_unbounded(rand::thread_rng()))
    }

    pub fn total_with<R: Roller>(&self, ctx: &mut RollContext<R>) -> OResult<Number> {
        self.run_with(ctx)?.into_number(ctx)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralValue {
    pub value: Number,
}

impl LiteralValue {
    pub fn new(value: Number) -> Self {
        Self { value }
    }
}

impl Run for LiteralValue {
    fn run_with<R: Roller>(&self, _ctx: &mut RollContext<R>) -> OResult<Value> {
        Ok(Value::Number(self.value))
    }
}

/// `d<faces>`. Evaluates to a [`RollableDie`] without drawing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Die {
    pub faces: Box<Operation>,
}

impl Die {
    pub fn new(faces: Operation) -> Self {
        Self {
            faces: Box::new(faces),
        }
    }
}

impl Run for Die {
    fn run_with<R: Roller>(&self, ctx: &mut RollContext<R>) -> OResult<Value> {
        let faces = self.faces.total_with(ctx)?.as_int();
        RollableDie::from_faces(faces).map(Value::Die)
    }
}

/// `<count><die>`: the sum of `count` rolls of one die. A count of zero or less rolls nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct DiceRoll {
    pub count: Box<Operation>,
    pub die: Box<Operation>,
}

impl DiceRoll {
    pub fn new(count: Operation, die: Operation) -> Self {
        Self {
            count: Box::new(count),
            die: Box::new(die),
        }
    }
}

impl Run for DiceRoll {
    fn run_with<R: Roller>(&self, ctx: &mut RollContext<R>) -> OResult<Value> {
        let count = self.count.total_with(ctx)?.as_int();
        let die = self
            .die
            .run_with(ctx)?
            .as_die()
            .ok_or(OperationError::ExpectedDie)?;

        let num = if count <= 0 {
            0
        } else {
            usize::try_from(count).unwrap_or(usize::MAX)
        };
        let total = ctx
            .roll(num, die.faces())?
            .fold(Number::ZERO, |acc, x| acc + Number::Int(x as Int));

        log::debug!("rolled {}{} = {}", num, die, total);
        Ok(Value::Number(total))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Negate {
    pub operand: Box<Operation>,
}

impl Negate {
    pub fn new(operand: Operation) -> Self {
        Self {
            operand: Box::new(operand),
        }
    }
}

impl Run for Negate {
    fn run_with<R: Roller>(&self, ctx: &mut RollContext<R>) -> OResult<Value> {
        Ok(Value::Number(-self.operand.total_with(ctx)?))
    }
}

// Both sides are evaluated left to right before `$body` runs.
macro_rules! binary_operation {
    ($(#[$meta:meta])* $Name:ident, |$lhs:ident, $rhs:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $Name {
            pub lhs: Box<Operation>,
            pub rhs: Box<Operation>,
        }

        impl $Name {
            pub fn new(lhs: Operation, rhs: Operation) -> Self {
                Self {
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                }
            }
        }

        impl Run for $Name {
            fn run_with<R: Roller>(&self, ctx: &mut RollContext<R>) -> OResult<Value> {
                let $lhs = self.lhs.total_with(ctx)?;
                let $rhs = self.rhs.total_with(ctx)?;
                let ret: OResult<Number> = $body;
                ret.map(Value::Number)
            }
        }
    };
}

binary_operation!(Sum, |lhs, rhs| Ok(lhs + rhs));
binary_operation!(Subtract, |lhs, rhs| Ok(lhs - rhs));
binary_operation!(Multiply, |lhs, rhs| Ok(lhs * rhs));
binary_operation!(
    /// True division; the quotient is always a float.
    Divide,
    |lhs, rhs| {
        if rhs.is_zero() {
            Err(OperationError::DivisionByZero)
        } else {
            Ok(lhs / rhs)
        }
    }
);
