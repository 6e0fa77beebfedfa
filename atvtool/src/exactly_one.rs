use thiserror::Error as ThisError;

/// Like `Itertools::exactly_one`, minus handing back the consumed items.
pub trait ExactlyOneIter: Iterator {
    fn exactly_one(&mut self) -> Result<Self::Item, ExactlyOneError> {
        match (self.next(), self.next()) {
            (None, _) => Err(ExactlyOneError::Zero),
            (Some(item), None) => Ok(item),
            (Some(_), Some(_)) => Err(ExactlyOneError::Many),
        }
    }
}

impl<T> ExactlyOneIter for T where T: Iterator {}

#[derive(Clone, Copy, Debug, ThisError)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ExactlyOneError {
    #[error("no matching entry found")]
    Zero,
    #[error("more than one matching entry found")]
    Many,
}
