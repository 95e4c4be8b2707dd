use crate::engine::{RenderingError, TranslationError};
use thiserror::Error;

mod pest;
mod rendering;

pub use self::pest::{PestError, WrappedPestError};

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl<E> From<E> for Error
where
    ErrorKind: From<E>,
{
    fn from(value: E) -> Self {
        Error(Box::new(value.into()))
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The input could not be tokenized.
    #[error("Invalid syntax, failed to parse:\n{0}")]
    SyntaxError(#[from] WrappedPestError),
    /// The input was tokenized but is not a query we can translate.
    #[error(transparent)]
    TranslationError(#[from] RenderingError),
    #[error("IO error:\n{0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error:\n{0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    pub fn into_inner(self) -> ErrorKind {
        *self.0
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// The translation error behind this error, if that's what it is.
    pub fn translation_error(&self) -> Option<&TranslationError> {
        match self.kind() {
            ErrorKind::TranslationError(rendering_error) => Some(&rendering_error.error),
            _ => None,
        }
    }
}
