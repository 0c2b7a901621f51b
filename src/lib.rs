//! A contiguous growable array with position-based insert and erase.

mod array;
mod error;
pub mod growth;
pub mod iter;
mod raw;

pub use array::DynamicArray;
pub use error::ArrayError;
pub use iter::{IntoIter, Iter, IterMut, Position};

/// Builds a [`DynamicArray`] from a list of elements, sized to the list.
///
/// ```
/// let arr = dynamic_array::dynamic_array![1, 2, 3];
/// assert_eq!(arr.capacity(), 3);
/// ```
#[macro_export]
macro_rules! dynamic_array {
    () => {
        $crate::DynamicArray::new()
    };
    ($($elem:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($elem),+])
    };
}
