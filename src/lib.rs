//! contig - a growable contiguous array with pluggable allocation
//! strategies, plus a small comment-stripping filter.
//!
//! # Overview
//!
//! The [`DynArray`] container lives in `contig-core` and works without
//! `std`. Memory comes from an [`AllocStrategy`]: the global allocator by
//! default, a `bumpalo` arena, or a [`Tracking`] wrapper that counts every
//! allocation and every constructed or destroyed element.
//!
//! # Quick Start
//!
//! ```
//! use bumpalo::Bump;
//! use contig::{DynArray, dyn_array};
//!
//! let mut arr = dyn_array![1, 2, 3];
//! arr.push_back(4);
//! let at = arr.insert_n(1, 2, 0);
//! assert_eq!(at.index(), 1);
//! assert_eq!(arr, [1, 0, 0, 2, 3, 4]);
//!
//! // The same container, backed by an arena.
//! let arena = Bump::new();
//! let mut scratch = DynArray::new_in(&arena);
//! scratch.extend([1, 2, 3]);
//! assert_eq!(scratch.iter().sum::<i32>(), 6);
//! ```
//!
//! Comment stripping is re-exported under [`strip`]:
//!
//! ```
//! let cleaned = contig::strip::strip_str("x = 1; // note\n").unwrap();
//! assert_eq!(cleaned, "x = 1; \n");
//! ```

pub use contig_core::{
    AllocStats, AllocStrategy, ArrayError, Cursor, DynArray, Global, IntoIter, Tracking, dyn_array,
};

/// Lower-level modules of the container.
pub mod container {
    pub use contig_core::{cursor, error, strategy};
}

/// Comment stripping.
pub mod strip {
    pub use contig_strip::*;
}
