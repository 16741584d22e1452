//! Array construction macro.
//!
//! # Example
//!
//! ```
//! use contig_core::dyn_array;
//!
//! let empty: contig_core::DynArray<u8> = dyn_array![];
//! let zeros = dyn_array![0u8; 4];
//! let list = dyn_array![1, 2, 3];
//!
//! assert!(empty.is_empty());
//! assert_eq!(zeros, [0, 0, 0, 0]);
//! assert_eq!(list.len(), 3);
//! ```

/// Builds a [`DynArray`](crate::DynArray) with the global strategy.
///
/// | Pattern | Meaning |
/// |---------|---------|
/// | `dyn_array![]` | Empty array |
/// | `dyn_array![x; n]` | `n` clones of `x` |
/// | `dyn_array![a, b, c]` | The listed values, in order |
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynArray::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynArray::from([$($x),+])
    };
}
