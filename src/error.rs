use crate::parse::ParseError;
use crate::roll::OperationError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Operation(#[from] OperationError),
}
