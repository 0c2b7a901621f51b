use thiserror::Error;

/// Errors raised by [`DynamicArray`](crate::DynamicArray) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    #[error("index {index} out of range for size {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("pop was called on an empty array")]
    EmptyContainer,

    #[error("iterator out of range")]
    IteratorOutOfRange,
}
