//! Allocation strategies.
//!
//! A [`DynArray`](crate::DynArray) never touches memory or value lifetimes
//! directly. Every allocation, release, construction and destruction goes
//! through the [`AllocStrategy`] it was built with, so arenas or counting
//! allocators can be swapped in without changing the array's logic.
//!
//! ```
//! use bumpalo::Bump;
//! use contig_core::DynArray;
//!
//! let arena = Bump::new();
//! let mut arr = DynArray::new_in(&arena);
//! arr.push_back(1);
//! arr.push_back(2);
//! assert_eq!(arr, [1, 2]);
//! ```

use core::{
    alloc::Layout,
    cell::Cell,
    fmt,
    mem::{align_of, size_of},
    ptr::{self, NonNull},
};

use allocator_api2::alloc::{Allocator, Global};
use bumpalo::Bump;

use crate::error::ArrayError;

/// Something that can allocate, free, construct and destroy slots of `T`.
///
/// # Safety
///
/// `allocate::<T>(n)` must return memory valid for `n` values of `T`,
/// aligned for `T`, that stays valid until it is passed back to
/// `deallocate` with the same `n` on this strategy or on one that
/// [`is_equivalent`](Self::is_equivalent) to it.
pub unsafe trait AllocStrategy {
    /// Allocates uninitialized storage for `n > 0` values.
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, ArrayError>;

    /// Releases storage obtained from [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate::<T>(n)` with this exact `n`, and no
    /// live values may remain in it.
    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, n: usize);

    /// Moves `value` into an uninitialized slot.
    ///
    /// # Safety
    ///
    /// `slot` must be valid for writes and must not hold a live value.
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        unsafe { slot.write(value) }
    }

    /// Runs the destructor of the value in `slot`, leaving it uninitialized.
    ///
    /// # Safety
    ///
    /// `slot` must hold a live value that is not used afterwards.
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        unsafe { slot.drop_in_place() }
    }

    /// Whether memory obtained from `self` may be released through `other`.
    fn is_equivalent(&self, other: &Self) -> bool;
}

/// Largest number of `T` slots a single buffer can describe.
pub(crate) const fn max_slots<T>() -> usize {
    match size_of::<T>() {
        0 => usize::MAX,
        size => isize::MAX as usize / size,
    }
}

fn array_layout<T>(n: usize) -> Result<Layout, ArrayError> {
    Layout::array::<T>(n).map_err(|_| ArrayError::CapacityOverflow {
        requested: n,
        max: max_slots::<T>(),
    })
}

fn allocate_with<A: Allocator, T>(alloc: &A, n: usize) -> Result<NonNull<T>, ArrayError> {
    let layout = array_layout::<T>(n)?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }
    alloc
        .allocate(layout)
        .map(NonNull::cast)
        .map_err(|_| ArrayError::AllocFailed {
            size: layout.size(),
            align: layout.align(),
        })
}

unsafe fn deallocate_with<A: Allocator, T>(alloc: &A, ptr: NonNull<T>, n: usize) {
    let size = size_of::<T>() * n;
    if size == 0 {
        return;
    }
    // SAFETY: the same layout was validated by `array_layout` on allocation.
    unsafe {
        let layout = Layout::from_size_align_unchecked(size, align_of::<T>());
        alloc.deallocate(ptr.cast(), layout);
    }
}

// SAFETY: delegates to the global allocator, which hands out disjoint,
// correctly aligned blocks that live until deallocated.
unsafe impl AllocStrategy for Global {
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, ArrayError> {
        allocate_with(self, n)
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, n: usize) {
        unsafe { deallocate_with(self, ptr, n) }
    }

    fn is_equivalent(&self, _other: &Self) -> bool {
        true
    }
}

// SAFETY: bump allocations stay valid for the arena's lifetime `'a`, which
// outlives any array holding the `&'a Bump`.
unsafe impl AllocStrategy for &Bump {
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, ArrayError> {
        allocate_with(self, n)
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, n: usize) {
        unsafe { deallocate_with(self, ptr, n) }
    }

    fn is_equivalent(&self, other: &Self) -> bool {
        ptr::eq(*self, *other)
    }
}

/// Counters shared by every [`Tracking`] strategy that points at them.
///
/// Moving a value out of an array (`pop`, owned iteration) hands it to the
/// caller without a `destroy`, so `constructed - destroyed` counts values
/// that are live *or* were moved out.
#[derive(Default)]
pub struct AllocStats {
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    constructed: Cell<usize>,
    destroyed: Cell<usize>,
    live_bytes: Cell<usize>,
    peak_bytes: Cell<usize>,
}

impl AllocStats {
    pub const fn new() -> Self {
        Self {
            allocations: Cell::new(0),
            deallocations: Cell::new(0),
            constructed: Cell::new(0),
            destroyed: Cell::new(0),
            live_bytes: Cell::new(0),
            peak_bytes: Cell::new(0),
        }
    }

    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    pub fn deallocations(&self) -> usize {
        self.deallocations.get()
    }

    pub fn constructed(&self) -> usize {
        self.constructed.get()
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed.get()
    }

    /// Bytes currently held in outstanding allocations.
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }

    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes.get()
    }

    /// Every buffer was freed and every constructed value destroyed.
    pub fn is_balanced(&self) -> bool {
        self.allocations() == self.deallocations()
            && self.constructed() == self.destroyed()
            && self.live_bytes() == 0
    }

    fn record_allocation(&self, bytes: usize) {
        self.allocations.set(self.allocations.get() + 1);
        let live = self.live_bytes.get() + bytes;
        self.live_bytes.set(live);
        self.peak_bytes.set(self.peak_bytes.get().max(live));
    }

    fn record_deallocation(&self, bytes: usize) {
        self.deallocations.set(self.deallocations.get() + 1);
        self.live_bytes.set(self.live_bytes.get() - bytes);
    }
}

impl fmt::Debug for AllocStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllocStats")
            .field("allocations", &self.allocations())
            .field("deallocations", &self.deallocations())
            .field("constructed", &self.constructed())
            .field("destroyed", &self.destroyed())
            .field("live_bytes", &self.live_bytes())
            .field("peak_bytes", &self.peak_bytes())
            .finish()
    }
}

/// A strategy that forwards to `S` and records every call in [`AllocStats`].
///
/// ```
/// use allocator_api2::alloc::Global;
/// use contig_core::{AllocStats, DynArray, Tracking};
///
/// let stats = AllocStats::new();
/// {
///     let mut arr = DynArray::new_in(Tracking::new(Global, &stats));
///     arr.push_back(String::from("a"));
///     arr.push_back(String::from("b"));
/// }
/// assert!(stats.is_balanced());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tracking<'s, S> {
    inner: S,
    stats: &'s AllocStats,
}

impl<'s, S> Tracking<'s, S> {
    pub fn new(inner: S, stats: &'s AllocStats) -> Self {
        Self { inner, stats }
    }

    pub fn stats(&self) -> &'s AllocStats {
        self.stats
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

// SAFETY: every memory operation is forwarded unchanged to `S`.
unsafe impl<S: AllocStrategy> AllocStrategy for Tracking<'_, S> {
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, ArrayError> {
        let ptr = self.inner.allocate::<T>(n)?;
        self.stats.record_allocation(size_of::<T>() * n);
        Ok(ptr)
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, n: usize) {
        self.stats.record_deallocation(size_of::<T>() * n);
        unsafe { self.inner.deallocate(ptr, n) }
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        unsafe { self.inner.construct(slot, value) };
        self.stats.constructed.set(self.stats.constructed.get() + 1);
    }

    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        self.stats.destroyed.set(self.stats.destroyed.get() + 1);
        unsafe { self.inner.destroy(slot) }
    }

    fn is_equivalent(&self, other: &Self) -> bool {
        ptr::eq(self.stats, other.stats) && self.inner.is_equivalent(&other.inner)
    }
}
