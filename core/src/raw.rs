//! Allocated-but-uninitialized slot storage.
//!
//! [`RawBuffer`] owns `capacity` slots and the strategy that produced them.
//! It never reads, writes or drops element values: tracking which slots
//! are live is the job of the owning array.

use core::{
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ptr::NonNull,
};

use crate::{error::ArrayError, strategy::AllocStrategy};

pub(crate) struct RawBuffer<T, A: AllocStrategy> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    marker: PhantomData<T>,
}

impl<T, A: AllocStrategy> RawBuffer<T, A> {
    /// A buffer with no allocation.
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            marker: PhantomData,
        }
    }

    pub(crate) fn with_capacity_in(cap: usize, alloc: A) -> Result<Self, ArrayError> {
        if cap == 0 {
            return Ok(Self::new_in(alloc));
        }
        let ptr = alloc.allocate::<T>(cap)?;
        Ok(Self {
            ptr,
            cap,
            alloc,
            marker: PhantomData,
        })
    }

    /// # Safety
    ///
    /// `ptr` must come from `allocate::<T>(cap)` on a strategy equivalent to
    /// `alloc`, or be dangling with `cap == 0`.
    pub(crate) unsafe fn from_raw_parts_in(ptr: NonNull<T>, cap: usize, alloc: A) -> Self {
        Self {
            ptr,
            cap,
            alloc,
            marker: PhantomData,
        }
    }

    #[inline(always)]
    pub(crate) fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index <= capacity`.
    #[inline(always)]
    pub(crate) unsafe fn slot(&self, index: usize) -> NonNull<T> {
        debug_assert!(index <= self.cap);
        unsafe { self.ptr.add(index) }
    }

    /// Allocates a replacement block from this buffer's strategy without
    /// committing it.
    pub(crate) fn stage(&self, cap: usize) -> Result<Staged<'_, T, A>, ArrayError> {
        let ptr = if cap == 0 {
            NonNull::dangling()
        } else {
            self.alloc.allocate::<T>(cap)?
        };
        Ok(Staged {
            ptr,
            cap,
            alloc: &self.alloc,
        })
    }

    /// Switches to a block released from [`stage`](Self::stage) and frees the
    /// old one.
    ///
    /// # Safety
    ///
    /// Every live value of the old block must already have been moved out
    /// or destroyed; `(ptr, cap)` must come from [`Staged::release`] on this
    /// buffer.
    pub(crate) unsafe fn install(&mut self, ptr: NonNull<T>, cap: usize) {
        let old_ptr = mem::replace(&mut self.ptr, ptr);
        let old_cap = mem::replace(&mut self.cap, cap);
        if old_cap != 0 {
            unsafe { self.alloc.deallocate(old_ptr, old_cap) };
        }
    }

    /// Hands the allocation to the caller, leaving this buffer empty.
    pub(crate) fn steal(&mut self) -> (NonNull<T>, usize) {
        let ptr = mem::replace(&mut self.ptr, NonNull::dangling());
        let cap = mem::replace(&mut self.cap, 0);
        (ptr, cap)
    }
}

impl<T, A: AllocStrategy> Drop for RawBuffer<T, A> {
    fn drop(&mut self) {
        if self.cap != 0 {
            unsafe { self.alloc.deallocate(self.ptr, self.cap) };
        }
    }
}

/// A freshly allocated block that is freed on drop unless released.
pub(crate) struct Staged<'b, T, A: AllocStrategy> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: &'b A,
}

impl<T, A: AllocStrategy> Staged<'_, T, A> {
    #[inline(always)]
    pub(crate) fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    pub(crate) fn allocator(&self) -> &A {
        self.alloc
    }

    pub(crate) fn release(self) -> (NonNull<T>, usize) {
        let me = ManuallyDrop::new(self);
        (me.ptr, me.cap)
    }
}

impl<T, A: AllocStrategy> Drop for Staged<'_, T, A> {
    fn drop(&mut self) {
        if self.cap != 0 {
            unsafe { self.alloc.deallocate(self.ptr, self.cap) };
        }
    }
}

/// Destroys the values written so far into `[base, base + written)` if
/// dropped, i.e. when a constructor panics halfway through a batch.
struct SlotGuard<'g, T, A: AllocStrategy> {
    alloc: &'g A,
    base: NonNull<T>,
    written: usize,
}

impl<T, A: AllocStrategy> Drop for SlotGuard<'_, T, A> {
    fn drop(&mut self) {
        for i in 0..self.written {
            unsafe { self.alloc.destroy(self.base.add(i)) };
        }
    }
}

/// Constructs `count` values in the slots starting at `base`, the `i`-th
/// from `make(i)`. If `make` panics, the values already built are destroyed
/// before the panic continues, so the slots end up uninitialized again.
///
/// # Safety
///
/// `[base, base + count)` must be allocated, uninitialized slots from `alloc`.
pub(crate) unsafe fn construct_batch<T, A: AllocStrategy>(
    alloc: &A,
    base: NonNull<T>,
    count: usize,
    mut make: impl FnMut(usize) -> T,
) {
    let mut guard = SlotGuard {
        alloc,
        base,
        written: 0,
    };
    while guard.written < count {
        let value = make(guard.written);
        unsafe { alloc.construct(base.add(guard.written), value) };
        guard.written += 1;
    }
    mem::forget(guard);
}
