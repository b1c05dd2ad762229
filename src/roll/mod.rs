mod ctx;
mod error;
mod num;
mod roller;
mod stringify;
mod tree;

pub(crate) type OResult<T> = Result<T, OperationError>;

pub use ctx::{DefaultRoller, RollContext, DEFAULT_MAX_ROLLS};
pub use error::OperationError;
pub use num::Number;
pub use roller::Roller;
pub use tree::{
    DiceRoll, Die, Divide, LiteralValue, Multiply, Negate, Operation, RollableDie, Run, Subtract,
    Sum, Value,
};
