//! Reportable failures of the container.
//!
//! Only two kinds of misuse are reported: checked access outside the live
//! range and capacity requests that cannot be represented. Everything else
//! (unchecked indexing, dereferencing a past-the-end cursor) is a caller
//! precondition and panics instead.

use thiserror::Error;

/// Errors returned by checked [`DynArray`](crate::DynArray) operations.
///
/// A failed operation leaves the array exactly as it was: length, capacity
/// and contents are untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrayError {
    /// Checked access at `index >= len`.
    #[error("index {index} is out of range for array of size {len}")]
    OutOfRange { index: usize, len: usize },

    /// The requested capacity exceeds what a single buffer can hold.
    #[error("requested capacity {requested} exceeds the maximum of {max} elements")]
    CapacityOverflow { requested: usize, max: usize },

    /// The allocation strategy could not provide the memory.
    #[error("failed to allocate {size} bytes with alignment {align}")]
    AllocFailed { size: usize, align: usize },
}
