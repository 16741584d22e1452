//! Random-access positions over an array's live elements.
//!
//! A [`Cursor`] is a position plus a shared borrow of the live range it
//! came from. The borrow is what keeps it honest: while any cursor is alive
//! the array cannot be mutated, so a cursor can never observe a reallocated
//! or shifted buffer. Mutating operations take element indices instead
//! (see [`Cursor::index`]) and hand back a fresh cursor.
//!
//! Offsetting is unchecked, like pointer arithmetic, but reading through an
//! out-of-range cursor panics rather than touching memory it doesn't own.
//!
//! ```
//! use contig_core::dyn_array;
//!
//! let arr = dyn_array![10, 20, 30, 40];
//! let mut it = arr.begin() + 1;
//! assert_eq!(*it, 20);
//! assert_eq!(it[2], 40);
//! it.inc();
//! assert_eq!(arr.end() - it, 2);
//! assert!(arr.begin() < it);
//! ```

use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Deref, Index, Sub, SubAssign},
};

/// A copyable, non-owning position into a [`DynArray`](crate::DynArray).
pub struct Cursor<'a, T> {
    live: &'a [T],
    pos: isize,
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
static_assertions::assert_eq_size!(Cursor<'static, u64>, [usize; 3]);

impl<'a, T> Cursor<'a, T> {
    /// A cursor at `pos` within `live`. `pos` may be anywhere, including
    /// past the end; only reads are checked.
    ///
    /// Panics if `pos` does not fit in an `isize`.
    pub fn new(live: &'a [T], pos: usize) -> Self {
        match isize::try_from(pos) {
            Ok(pos) => Self { live, pos },
            Err(_) => panic!("cursor position {pos} exceeds the largest buffer offset"),
        }
    }

    /// Signed offset from the start of the buffer.
    #[inline]
    pub fn offset(&self) -> isize {
        self.pos
    }

    /// Offset from the start of the buffer, for passing to mutating
    /// operations.
    ///
    /// Panics if the cursor was moved before the start.
    #[inline]
    pub fn index(&self) -> usize {
        assert!(
            self.pos >= 0,
            "cursor is {} elements before the start of the buffer",
            -self.pos
        );
        self.pos as usize
    }

    /// Whether the cursor refers to a range with no live elements.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether the cursor sits one past the last live element.
    pub fn is_end(&self) -> bool {
        self.pos == self.live.len() as isize
    }

    /// The element under the cursor, or `None` past either end.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        usize::try_from(self.pos)
            .ok()
            .and_then(|i| self.live.get(i))
    }

    /// The element `n` positions away from the cursor.
    pub fn get_at(&self, n: isize) -> Option<&'a T> {
        (*self + n).get()
    }

    /// The element `n` positions away from the cursor.
    ///
    /// Panics if that position is outside the live range.
    pub fn at(&self, n: isize) -> &'a T {
        match self.get_at(n) {
            Some(value) => value,
            None => panic!(
                "cursor offset {n} from {} is outside live range of length {}",
                self.pos,
                self.live.len()
            ),
        }
    }

    /// # Safety
    ///
    /// The cursor must be within the live range.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &'a T {
        unsafe { self.live.get_unchecked(self.pos as usize) }
    }

    /// Pre-increment.
    #[inline]
    pub fn inc(&mut self) -> &mut Self {
        self.pos += 1;
        self
    }

    /// Pre-decrement.
    #[inline]
    pub fn dec(&mut self) -> &mut Self {
        self.pos -= 1;
        self
    }

    /// Post-increment: advances and returns the previous position.
    #[inline]
    pub fn post_inc(&mut self) -> Self {
        let prev = *self;
        self.pos += 1;
        prev
    }

    /// Post-decrement: retreats and returns the previous position.
    #[inline]
    pub fn post_dec(&mut self) -> Self {
        let prev = *self;
        self.pos -= 1;
        prev
    }

    /// The elements in `[self, last)`.
    ///
    /// Panics if the cursors come from different arrays or don't describe a
    /// valid range.
    pub fn slice_to(self, last: Cursor<'a, T>) -> &'a [T] {
        assert!(
            self.same_buffer(&last),
            "cursors belong to different buffers"
        );
        &self.live[self.index()..last.index()]
    }

    fn same_buffer(&self, other: &Self) -> bool {
        core::ptr::eq(self.live.as_ptr(), other.live.as_ptr())
    }

    fn key(&self) -> (*const T, isize) {
        (self.live.as_ptr(), self.pos)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> Default for Cursor<'_, T> {
    fn default() -> Self {
        Self { live: &[], pos: 0 }
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("len", &self.live.len())
            .finish()
    }
}

impl<T> Deref for Cursor<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.get() {
            Some(value) => value,
            None => panic!(
                "dereferenced cursor at {} outside live range of length {}",
                self.pos,
                self.live.len()
            ),
        }
    }
}

impl<T> Index<isize> for Cursor<'_, T> {
    type Output = T;

    fn index(&self, n: isize) -> &T {
        self.at(n)
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, n: isize) {
        self.pos += n;
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, n: isize) {
        self.pos -= n;
    }
}

impl<T> Add<isize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<T> Sub<isize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

/// Signed element distance between two cursors over the same buffer.
impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, other: Cursor<'a, T>) -> isize {
        debug_assert!(self.same_buffer(&other), "cursors belong to different buffers");
        self.pos - other.pos
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Cursor<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl<T> Hash for Cursor<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_and_decrements() {
        let data = [1, 2, 3];
        let mut it = Cursor::new(&data, 0);
        assert_eq!(**it.inc(), 2);
        let prev = it.post_inc();
        assert_eq!(*prev, 2);
        assert_eq!(*it, 3);
        let prev = it.post_dec();
        assert_eq!(*prev, 3);
        it.dec();
        assert_eq!(*it, 1);
    }

    #[test]
    fn offsets_are_unchecked_until_read() {
        let data = [1, 2, 3];
        let it = Cursor::new(&data, 1);
        let before = it - 5;
        assert_eq!(before.offset(), -4);
        assert!(before.get().is_none());
        assert_eq!(*(before + 4), 1);
        assert!((it + 2).is_end());
        assert!((it + 2).get().is_none());
    }

    #[test]
    fn distance_is_signed() {
        let data = [0u8; 8];
        let a = Cursor::new(&data, 2);
        let b = Cursor::new(&data, 7);
        assert_eq!(b - a, 5);
        assert_eq!(a - b, -5);
    }

    #[test]
    fn ordering_follows_position() {
        let data = [1, 2, 3];
        let a = Cursor::new(&data, 0);
        let b = Cursor::new(&data, 2);
        assert!(a < b);
        assert!(b > a);
        assert!(a <= a);
        assert_eq!(a + 2, b);
        assert_ne!(a, b);
    }

    #[test]
    fn indexed_access_is_relative() {
        let data = [5, 6, 7, 8];
        let it = Cursor::new(&data, 1);
        assert_eq!(it[0], 6);
        assert_eq!(it[2], 8);
        assert_eq!(it[-1], 5);
        assert_eq!(*it.at(1), 7);
        assert_eq!(it.get_at(3), None);
    }

    #[test]
    #[should_panic(expected = "outside live range")]
    fn deref_past_end_panics() {
        let data = [1];
        let it = Cursor::new(&data, 1);
        let _value: i32 = *it;
    }

    #[test]
    fn default_cursor_is_empty() {
        let it = Cursor::<u32>::default();
        assert!(it.is_empty());
        assert!(it.is_end());
        assert_eq!(it.get(), None);
    }

    #[test]
    fn slice_between_cursors() {
        let data = [1, 2, 3, 4, 5];
        let first = Cursor::new(&data, 1);
        let last = Cursor::new(&data, 4);
        assert_eq!(first.slice_to(last), &[2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "cursor position 18446744073709551615 exceeds")]
    #[cfg(target_pointer_width = "64")]
    fn position_past_isize_max_panics() {
        let data = [1];
        let _ = Cursor::new(&data, usize::MAX);
    }

    #[test]
    #[should_panic(expected = "before the start")]
    fn index_before_start_panics() {
        let data = [1];
        let _ = (Cursor::new(&data, 0) - 1).index();
    }
}
