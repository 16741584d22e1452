use core::{fmt, iter::FusedIterator, slice};

use allocator_api2::alloc::Global;

use crate::{raw::RawBuffer, strategy::AllocStrategy};

/// Owning iterator returned by [`DynArray::into_iter`](crate::DynArray).
///
/// Elements not yet yielded are destroyed through the array's strategy
/// when the iterator is dropped.
pub struct IntoIter<T, A: AllocStrategy = Global> {
    buf: RawBuffer<T, A>,
    start: usize,
    end: usize,
}

impl<T, A: AllocStrategy> IntoIter<T, A> {
    pub(crate) fn new(buf: RawBuffer<T, A>, len: usize) -> Self {
        Self {
            buf,
            start: 0,
            end: len,
        }
    }

    /// The elements that have not been yielded yet.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [start, end) are still live.
        unsafe { slice::from_raw_parts(self.buf.slot(self.start).as_ptr(), self.end - self.start) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe {
            slice::from_raw_parts_mut(self.buf.slot(self.start).as_ptr(), self.end - self.start)
        }
    }
}

impl<T, A: AllocStrategy> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let value = unsafe { self.buf.slot(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T, A: AllocStrategy> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        Some(unsafe { self.buf.slot(self.end).read() })
    }
}

impl<T, A: AllocStrategy> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: AllocStrategy> FusedIterator for IntoIter<T, A> {}

impl<T, A: AllocStrategy> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let (start, end) = (self.start, self.end);
        self.start = end;
        for i in start..end {
            unsafe { self.buf.allocator().destroy(self.buf.slot(i)) };
        }
    }
}

impl<T: fmt::Debug, A: AllocStrategy> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{AllocStats, DynArray, Tracking};
    use allocator_api2::alloc::Global;
    use alloc::string::{String, ToString};

    fn strings(stats: &AllocStats) -> DynArray<String, Tracking<'_, Global>> {
        let mut arr = DynArray::new_in(Tracking::new(Global, stats));
        for word in ["a", "b", "c", "d"] {
            arr.push_back(word.to_string());
        }
        arr
    }

    #[test]
    fn yields_from_both_ends() {
        let stats = AllocStats::new();
        let mut iter = strings(&stats).into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next().as_deref(), Some("a"));
        assert_eq!(iter.next_back().as_deref(), Some("d"));
        assert_eq!(iter.as_slice(), ["b", "c"]);
        assert_eq!(iter.size_hint(), (2, Some(2)));
    }

    #[test]
    fn drop_destroys_the_remainder() {
        let stats = AllocStats::new();
        {
            let mut iter = strings(&stats).into_iter();
            let _first = iter.next();
        }
        // One value was moved out, three were destroyed in place.
        assert_eq!(stats.constructed(), 4);
        assert_eq!(stats.destroyed(), 3);
        assert_eq!(stats.deallocations(), stats.allocations());
        assert_eq!(stats.live_bytes(), 0);
    }

    #[test]
    fn exhausted_iterator_stays_exhausted() {
        let mut iter = crate::dyn_array![1].into_iter();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }
}
