//! DynArray: a growable contiguous array with a pluggable allocation strategy.
//!
//! The array owns one buffer of `capacity` slots, of which the first `len`
//! hold live values:
//!
//! ```text
//! buf ──▶ [ live | live | live | uninit | uninit ]
//!           └──── len ────┘
//!           └────────── capacity ────────┘
//! ```
//!
//! Growth happens in two flavors:
//!
//! - appends (`push_back`, `resize`, `reserve`) grow to `max(required, 1.5 × capacity)`
//! - inserts in the middle grow to `max(required, 2 × capacity)`
//!
//! In both cases a request that would overflow the maximum size falls back
//! to exactly what was asked for. Reallocation stages the new block first,
//! moves the elements over, and only then frees the old block.
//!
//! Values a caller supplies through `Clone` or a closure are always built
//! before any existing element is moved. If building panics, the length
//! and the elements are left exactly as they were.

use core::{
    borrow::{Borrow, BorrowMut},
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr::{self, NonNull},
    slice::{self, SliceIndex},
};

use alloc::alloc::{Layout, handle_alloc_error};
use allocator_api2::alloc::Global;

use crate::{
    cursor::Cursor,
    error::ArrayError,
    into_iter::IntoIter,
    raw::{RawBuffer, construct_batch},
    strategy::{AllocStrategy, max_slots},
};

/// A growable contiguous array whose memory and value lifetimes are
/// managed by an [`AllocStrategy`].
///
/// See the [module docs](self) for the growth policy and panic guarantees.
///
/// ```
/// use contig_core::{DynArray, dyn_array};
///
/// let mut arr = dyn_array![1, 2, 3];
/// let at = arr.insert_n(1, 2, 9);
/// assert_eq!(*at, 9);
/// assert_eq!(arr, [1, 9, 9, 2, 3]);
///
/// arr.erase_range(1, 3);
/// assert_eq!(arr, [1, 2, 3]);
/// ```
pub struct DynArray<T, A: AllocStrategy = Global> {
    buf: RawBuffer<T, A>,
    len: usize,
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
static_assertions::assert_eq_size!(DynArray<u64>, [usize; 3]);

/// Capacity for appends: `max(required, cap + cap / 2)`, or just
/// `required` when the 1.5x step would pass `max`.
fn amortized_capacity(cap: usize, required: usize, max: usize) -> usize {
    match cap.checked_add(cap / 2) {
        Some(grown) if grown <= max => grown.max(required),
        _ => required,
    }
}

/// Capacity for inserts: `max(required, 2 * cap)`, saturating like
/// [`amortized_capacity`].
fn doubled_capacity(cap: usize, required: usize, max: usize) -> usize {
    match cap.checked_mul(2) {
        Some(grown) if grown <= max => grown.max(required),
        _ => required,
    }
}

#[cold]
#[inline(never)]
fn growth_failed(err: ArrayError) -> ! {
    if let ArrayError::AllocFailed { size, align } = err {
        if let Ok(layout) = Layout::from_size_align(size, align) {
            handle_alloc_error(layout);
        }
    }
    panic!("{err}");
}

impl<T> DynArray<T> {
    /// An empty array. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// `n` default-constructed elements.
    pub fn with_len(n: usize) -> Self
    where
        T: Default,
    {
        Self::with_len_in(n, Global)
    }

    /// `n` clones of `value`.
    pub fn from_elem(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(n, value, Global)
    }

    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_slice_in(values, Global)
    }

    /// Copies the range `[first, last)` of another array.
    pub fn from_cursors(first: Cursor<'_, T>, last: Cursor<'_, T>) -> Self
    where
        T: Clone,
    {
        Self::from_cursors_in(first, last, Global)
    }
}

impl<T, A: AllocStrategy> DynArray<T, A> {
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buf: RawBuffer::new_in(alloc),
            len: 0,
        }
    }

    /// An empty array with room for exactly `capacity` elements.
    ///
    /// Panics if the capacity cannot be represented.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self::try_with_capacity_in(capacity, alloc).unwrap_or_else(|err| growth_failed(err))
    }

    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, ArrayError> {
        Ok(Self {
            buf: RawBuffer::with_capacity_in(capacity, alloc)?,
            len: 0,
        })
    }

    pub fn with_len_in(n: usize, alloc: A) -> Self
    where
        T: Default,
    {
        Self::from_fn_in(n, |_| T::default(), alloc)
    }

    pub fn from_elem_in(n: usize, value: T, alloc: A) -> Self
    where
        T: Clone,
    {
        Self::from_fn_in(n, |_| value.clone(), alloc)
    }

    pub fn from_slice_in(values: &[T], alloc: A) -> Self
    where
        T: Clone,
    {
        Self::from_fn_in(values.len(), |i| values[i].clone(), alloc)
    }

    pub fn from_cursors_in(first: Cursor<'_, T>, last: Cursor<'_, T>, alloc: A) -> Self
    where
        T: Clone,
    {
        Self::from_slice_in(first.slice_to(last), alloc)
    }

    /// Exactly `n` elements, the `i`-th built by `make(i)`.
    pub fn from_fn_in(n: usize, make: impl FnMut(usize) -> T, alloc: A) -> Self {
        let mut arr = Self::with_capacity_in(n, alloc);
        arr.fill_tail(n, make);
        arr
    }

    /// Moves the contents of `source` into a new array using `alloc`,
    /// leaving `source` empty and without a buffer.
    ///
    /// If `alloc` can free `source`'s memory the buffer is adopted as is.
    /// Otherwise the elements are relocated into memory from `alloc` and
    /// `source`'s buffer is released through its own strategy.
    pub fn move_in(source: &mut Self, alloc: A) -> Self {
        if source.buf.allocator().is_equivalent(&alloc) {
            let len = mem::replace(&mut source.len, 0);
            let (ptr, cap) = source.buf.steal();
            // SAFETY: `alloc` can release memory obtained by `source`'s strategy.
            let buf = unsafe { RawBuffer::from_raw_parts_in(ptr, cap, alloc) };
            return Self { buf, len };
        }

        tracing::debug!(
            len = source.len,
            "allocation strategies differ, relocating elements"
        );
        let mut arr = Self::with_capacity_in(source.len, alloc);
        // Source slots are moved out one by one, so they stop being live first.
        let len = mem::replace(&mut source.len, 0);
        for i in 0..len {
            // SAFETY: slot `i` of the source is live and read exactly once;
            // slot `i` of the new block is allocated and uninitialized.
            unsafe {
                let value = source.buf.slot(i).read();
                arr.buf.allocator().construct(arr.buf.slot(i), value);
            }
            arr.len += 1;
        }
        unsafe { source.buf.install(NonNull::dangling(), 0) };
        arr
    }

    /// Move-assignment: drops the current contents and takes over
    /// `source`'s buffer and strategy. `source` is left empty, without a
    /// buffer, holding this array's former strategy.
    pub fn take_from(&mut self, source: &mut Self) {
        self.clear();
        // SAFETY: no live values remain after `clear`.
        unsafe { self.buf.install(NonNull::dangling(), 0) };
        mem::swap(self, source);
    }

    /// Copies the contents into a new array that uses `alloc`.
    pub fn clone_in<B: AllocStrategy>(&self, alloc: B) -> DynArray<T, B>
    where
        T: Clone,
    {
        DynArray::from_slice_in(self.as_slice(), alloc)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Largest capacity a single buffer of `T` can have.
    pub fn max_size(&self) -> usize {
        max_slots::<T>()
    }

    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Pointer to the start of the buffer, dangling when there is none.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr().as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr().as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are live.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots [0, len) are live and uniquely borrowed.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Checked access.
    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// The past-the-end cursor.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), index)
    }

    /// Ensures `capacity() >= capacity`, growing by the append policy.
    ///
    /// Fails without touching the array if the request cannot be
    /// represented or allocated.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), ArrayError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.check_max(capacity)?;
        self.relocate(amortized_capacity(
            self.capacity(),
            capacity,
            self.max_size(),
        ))
    }

    /// Like [`reserve`](Self::reserve) but grows to exactly `capacity`.
    pub fn reserve_exact(&mut self, capacity: usize) -> Result<(), ArrayError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.check_max(capacity)?;
        self.relocate(capacity)
    }

    /// Reallocates so that `capacity() == len()`.
    pub fn shrink_to_fit(&mut self) {
        if self.len < self.capacity() {
            self.relocate(self.len)
                .unwrap_or_else(|err| growth_failed(err));
        }
    }

    /// Shrinks or grows to `len`, filling new slots with `T::default()`.
    pub fn resize(&mut self, len: usize)
    where
        T: Default,
    {
        self.resize_with(len, T::default)
    }

    /// Shrinks or grows to `len`, filling new slots with clones of `value`.
    pub fn resize_with_value(&mut self, len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(len, || value.clone())
    }

    pub fn resize_with(&mut self, len: usize, mut make: impl FnMut() -> T) {
        if len <= self.len {
            self.truncate(len);
            return;
        }
        let additional = len - self.len;
        self.grow_or_fail(additional);
        self.fill_tail(additional, |_| make());
    }

    /// Appends `value`. Amortized O(1).
    pub fn push_back(&mut self, value: T) {
        self.grow_or_fail(1);
        // SAFETY: just made room.
        unsafe { self.push_unchecked(value) }
    }

    /// Appends `value`, reporting growth failures instead of panicking.
    pub fn try_push_back(&mut self, value: T) -> Result<(), ArrayError> {
        self.grow_amortized(1)?;
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Appends the value returned by `make`, constructed directly in its
    /// slot, and returns a reference to it.
    pub fn emplace_back(&mut self, make: impl FnOnce() -> T) -> &mut T {
        let value = make();
        self.grow_or_fail(1);
        // SAFETY: slot `len` is allocated and uninitialized.
        unsafe {
            let slot = self.buf.slot(self.len);
            self.buf.allocator().construct(slot, value);
            self.len += 1;
            &mut *slot.as_ptr()
        }
    }

    /// Destroys the last element. Does nothing when empty.
    pub fn pop_back(&mut self) {
        if self.len == 0 {
            return;
        }
        self.len -= 1;
        unsafe { self.buf.allocator().destroy(self.buf.slot(self.len)) };
    }

    /// Moves the last element out.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now outside [0, len).
        Some(unsafe { self.buf.slot(self.len).read() })
    }

    /// Inserts `value` before `index`, shifting the rest right. Returns a
    /// cursor to the inserted element.
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Cursor<'_, T> {
        self.check_insert_index(index);
        if let Some(capacity) = self
            .insert_growth(1)
            .unwrap_or_else(|err| growth_failed(err))
        {
            self.relocate(capacity)
                .unwrap_or_else(|err| growth_failed(err));
        }
        // SAFETY: there is room for one more; [index, len) moves up by one
        // and the vacated slot is written before `len` covers it again.
        unsafe {
            let slot = self.buf.slot(index);
            ptr::copy(slot.as_ptr(), slot.as_ptr().add(1), self.len - index);
            self.buf.allocator().construct(slot, value);
        }
        self.len += 1;
        self.cursor_at(index)
    }

    /// Inserts `count` clones of `value` before `index`. Returns a cursor to
    /// the first inserted element.
    pub fn insert_n(&mut self, index: usize, count: usize, value: T) -> Cursor<'_, T>
    where
        T: Clone,
    {
        self.insert_with(index, count, |_| value.clone())
    }

    /// Inserts clones of `values` before `index`, keeping their order.
    pub fn insert_slice(&mut self, index: usize, values: &[T]) -> Cursor<'_, T>
    where
        T: Clone,
    {
        self.insert_with(index, values.len(), |i| values[i].clone())
    }

    /// Inserts clones of the range `[first, last)` of another array.
    pub fn insert_cursors(
        &mut self,
        index: usize,
        first: Cursor<'_, T>,
        last: Cursor<'_, T>,
    ) -> Cursor<'_, T>
    where
        T: Clone,
    {
        self.insert_slice(index, first.slice_to(last))
    }

    fn insert_with(
        &mut self,
        index: usize,
        count: usize,
        make: impl FnMut(usize) -> T,
    ) -> Cursor<'_, T> {
        self.check_insert_index(index);
        if count == 0 {
            return self.cursor_at(index);
        }
        match self
            .insert_growth(count)
            .unwrap_or_else(|err| growth_failed(err))
        {
            None => {
                // Build at the tail, then rotate into place.
                self.fill_tail(count, make);
                self.as_mut_slice()[index..].rotate_right(count);
            }
            Some(capacity) => {
                let staged = self
                    .buf
                    .stage(capacity)
                    .unwrap_or_else(|err| growth_failed(err));
                tracing::trace!(
                    len = self.len,
                    old_capacity = self.buf.capacity(),
                    new_capacity = capacity,
                    "relocating buffer for insert"
                );
                // SAFETY: the staged block has room for len + count values.
                // New values go to their final slots first; the old elements
                // are only moved once all of them have been built.
                unsafe {
                    construct_batch(staged.allocator(), staged.ptr().add(index), count, make);
                    let old = self.buf.ptr().as_ptr();
                    let new = staged.ptr().as_ptr();
                    ptr::copy_nonoverlapping(old, new, index);
                    ptr::copy_nonoverlapping(
                        old.add(index),
                        new.add(index + count),
                        self.len - index,
                    );
                }
                let (ptr, cap) = staged.release();
                unsafe { self.buf.install(ptr, cap) };
                self.len += count;
            }
        }
        self.cursor_at(index)
    }

    /// Removes the element at `index`, shifting the rest left. Returns a
    /// cursor to the element now at `index`.
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> Cursor<'_, T> {
        assert!(
            index < self.len,
            "erase index (is {index}) should be < len (is {})",
            self.len
        );
        self.erase_range(index, index + 1)
    }

    /// Removes `[first, last)`. Returns a cursor to the element now at
    /// `first`, which is [`end`](Self::end) if the tail was removed.
    pub fn erase_range(&mut self, first: usize, last: usize) -> Cursor<'_, T> {
        assert!(
            first <= last && last <= self.len,
            "erase range {first}..{last} out of bounds for length {}",
            self.len
        );
        let old_len = self.len;
        // If a destructor panics the tail leaks instead of being dropped twice.
        self.len = first;
        unsafe {
            for i in first..last {
                self.buf.allocator().destroy(self.buf.slot(i));
            }
            let base = self.buf.ptr().as_ptr();
            ptr::copy(base.add(last), base.add(first), old_len - last);
        }
        self.len = old_len - (last - first);
        self.cursor_at(first)
    }

    /// Destroys the elements from `len` on. Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let old_len = mem::replace(&mut self.len, len);
        for i in len..old_len {
            unsafe { self.buf.allocator().destroy(self.buf.slot(i)) };
        }
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Replaces the contents with `n` clones of `value`.
    pub fn assign_n(&mut self, n: usize, value: T)
    where
        T: Clone,
    {
        self.assign_with(n, |_| value.clone());
    }

    pub fn assign_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.assign_with(values.len(), |i| values[i].clone());
    }

    /// Replaces the contents with clones of `[first, last)` from another array.
    pub fn assign_cursors(&mut self, first: Cursor<'_, T>, last: Cursor<'_, T>)
    where
        T: Clone,
    {
        self.assign_slice(first.slice_to(last));
    }

    /// Exchanges buffers, lengths and strategies in O(1).
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    fn assign_with(&mut self, n: usize, make: impl FnMut(usize) -> T) {
        self.clear();
        self.reserve_exact(n)
            .unwrap_or_else(|err| growth_failed(err));
        self.fill_tail(n, make);
    }

    fn check_max(&self, capacity: usize) -> Result<(), ArrayError> {
        let max = self.max_size();
        if capacity > max {
            return Err(ArrayError::CapacityOverflow {
                requested: capacity,
                max,
            });
        }
        Ok(())
    }

    fn check_insert_index(&self, index: usize) {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
    }

    fn required_len(&self, additional: usize) -> Result<usize, ArrayError> {
        self.len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow {
                requested: usize::MAX,
                max: self.max_size(),
            })
    }

    fn grow_amortized(&mut self, additional: usize) -> Result<(), ArrayError> {
        let required = self.required_len(additional)?;
        if required <= self.capacity() {
            return Ok(());
        }
        self.check_max(required)?;
        self.relocate(amortized_capacity(
            self.capacity(),
            required,
            self.max_size(),
        ))
    }

    fn grow_or_fail(&mut self, additional: usize) {
        if let Err(err) = self.grow_amortized(additional) {
            growth_failed(err);
        }
    }

    /// The capacity an insert of `additional` elements has to grow to, or
    /// `None` if it already fits.
    fn insert_growth(&self, additional: usize) -> Result<Option<usize>, ArrayError> {
        let required = self.required_len(additional)?;
        if required <= self.capacity() {
            return Ok(None);
        }
        self.check_max(required)?;
        Ok(Some(doubled_capacity(
            self.capacity(),
            required,
            self.max_size(),
        )))
    }

    /// Moves the live elements into a new block of `capacity` slots.
    fn relocate(&mut self, capacity: usize) -> Result<(), ArrayError> {
        debug_assert!(capacity >= self.len);
        let staged = self.buf.stage(capacity)?;
        tracing::trace!(
            len = self.len,
            old_capacity = self.buf.capacity(),
            new_capacity = capacity,
            "relocating buffer"
        );
        // SAFETY: both blocks hold at least `len` slots and are distinct
        // allocations. The old slots are treated as moved-from afterwards.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.ptr().as_ptr(), staged.ptr().as_ptr(), self.len);
        }
        let (ptr, cap) = staged.release();
        unsafe { self.buf.install(ptr, cap) };
        Ok(())
    }

    /// Builds `count` elements after the live range; capacity must already
    /// be there. A panic in `make` leaves `len` untouched.
    fn fill_tail(&mut self, count: usize, make: impl FnMut(usize) -> T) {
        debug_assert!(count <= self.capacity() - self.len);
        unsafe { construct_batch(self.buf.allocator(), self.buf.slot(self.len), count, make) };
        self.len += count;
    }

    /// # Safety
    ///
    /// `len < capacity`.
    unsafe fn push_unchecked(&mut self, value: T) {
        unsafe { self.buf.allocator().construct(self.buf.slot(self.len), value) };
        self.len += 1;
    }
}

impl<T, A: AllocStrategy> Drop for DynArray<T, A> {
    fn drop(&mut self) {
        // The buffer itself is released by `RawBuffer`.
        self.clear();
    }
}

impl<T, A: AllocStrategy + Default> Default for DynArray<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: AllocStrategy + Clone> Clone for DynArray<T, A> {
    fn clone(&self) -> Self {
        self.clone_in(self.allocator().clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_slice(source.as_slice());
    }
}

impl<T: fmt::Debug, A: AllocStrategy> fmt::Debug for DynArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, A: AllocStrategy> Deref for DynArray<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: AllocStrategy> DerefMut for DynArray<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>, A: AllocStrategy> Index<I> for DynArray<T, A> {
    type Output = I::Output;

    fn index(&self, index: I) -> &I::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, A: AllocStrategy> IndexMut<I> for DynArray<T, A> {
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, A: AllocStrategy> AsRef<[T]> for DynArray<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: AllocStrategy> AsMut<[T]> for DynArray<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: AllocStrategy> Borrow<[T]> for DynArray<T, A> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: AllocStrategy> BorrowMut<[T]> for DynArray<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, U, A, B> PartialEq<DynArray<U, B>> for DynArray<T, A>
where
    T: PartialEq<U>,
    A: AllocStrategy,
    B: AllocStrategy,
{
    fn eq(&self, other: &DynArray<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, A: AllocStrategy> PartialEq<[U]> for DynArray<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: AllocStrategy> PartialEq<&[U]> for DynArray<T, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, A: AllocStrategy, const N: usize> PartialEq<[U; N]> for DynArray<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: AllocStrategy> Eq for DynArray<T, A> {}

/// Lexicographic: the first differing element decides, and a strict prefix
/// orders before the longer array.
impl<T: PartialOrd, A: AllocStrategy> PartialOrd for DynArray<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: AllocStrategy> Ord for DynArray<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, A: AllocStrategy> Hash for DynArray<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, A: AllocStrategy> Extend<T> for DynArray<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.grow_or_fail(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, A: AllocStrategy> Extend<&'a T> for DynArray<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(values: [T; N]) -> Self {
        let mut arr = Self::with_capacity(N);
        for value in values {
            // SAFETY: capacity is exactly N.
            unsafe { arr.push_unchecked(value) };
        }
        arr
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    fn from(values: &[T]) -> Self {
        Self::from_slice(values)
    }
}

impl<T, A: AllocStrategy> IntoIterator for DynArray<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        let me = ManuallyDrop::new(self);
        // SAFETY: `me` is never dropped, so the buffer is moved out once.
        let buf = unsafe { ptr::read(&me.buf) };
        IntoIter::new(buf, me.len)
    }
}

impl<'a, T, A: AllocStrategy> IntoIterator for &'a DynArray<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T, A: AllocStrategy> IntoIterator for &'a mut DynArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}

#[cfg(test)]
#[path = "array_test.rs"]
mod array_test;
