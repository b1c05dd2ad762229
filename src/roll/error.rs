use crate::common::Int;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperationError {
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("operation has no evaluation")]
    NotImplemented,
    #[error("a die needs at least one face, got {faces}")]
    InvalidDie { faces: Int },
    #[error("expected a die to roll, found a number")]
    ExpectedDie,
    #[error("too many dice rolled (at most {max} allowed)")]
    TooManyRolls { max: usize },
}
