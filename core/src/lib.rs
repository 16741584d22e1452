#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

//! A growable contiguous array with pluggable allocation strategies.
//!
//! [`DynArray`] keeps its elements in one buffer, grows it geometrically and
//! routes every allocation and every construction or destruction of an
//! element through an [`AllocStrategy`]. The default strategy is the global
//! allocator; a `&bumpalo::Bump` arena or a [`Tracking`] wrapper can be used
//! instead.
//!
//! Positions are expressed with [`Cursor`]s, which borrow the array and so
//! can never outlive a reallocation.

// This works on std and no_std and is harmless.
extern crate alloc;

mod array;
pub mod cursor;
pub mod error;
mod into_iter;
mod macros;
mod raw;
pub mod strategy;

pub use allocator_api2::alloc::Global;
pub use array::DynArray;
pub use cursor::Cursor;
pub use error::ArrayError;
pub use into_iter::IntoIter;
pub use strategy::{AllocStats, AllocStrategy, Tracking};
