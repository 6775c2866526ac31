use crate::cycle::{Cycle, SENTINEL};
use crate::deque::Deque;

/// A borrowing iterator over the deque from head to tail, or from tail
/// to head when reversed. It is constructed from the [`iter`] method
/// on `Deque`.
///
/// [`iter`]: struct.Deque.html#method.iter
pub struct Iter<'l, T> {
    target: &'l Cycle<T>,
    head: usize,
    tail: usize,
    remaining: usize,
}

impl<'l, T> Iter<'l, T> {
    pub(crate) fn new(target: &'l Cycle<T>) -> Self {
        Self {
            target,
            head: target.head_ix(),
            tail: target.tail_ix(),
            remaining: target.len(),
        }
    }
}

impl<'l, T> Iterator for Iter<'l, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        if 0 == self.remaining {
            return None;
        }

        let n = self.target.node(self.head);
        self.head = n.next();
        self.remaining -= 1;
        n.data()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'l, T> DoubleEndedIterator for Iter<'l, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if 0 == self.remaining {
            return None;
        }

        let n = self.target.node(self.tail);
        self.tail = n.prev();
        self.remaining -= 1;
        n.data()
    }
}

impl<'l, T> ExactSizeIterator for Iter<'l, T> {}

/// A draining iterator that removes values from the head of the deque.
/// It is constructed from the [`drain`] method on `Deque`. Values not
/// yet yielded when the iterator is dropped stay in the deque.
///
/// [`drain`]: struct.Deque.html#method.drain
pub struct Drain<'l, T> {
    target: &'l mut Cycle<T>,
}

impl<'l, T> Drain<'l, T> {
    pub(crate) fn new(target: &'l mut Cycle<T>) -> Self {
        Self { target }
    }
}

impl<'l, T> Iterator for Drain<'l, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.target.head_ix() {
            SENTINEL => None,
            head => Some(self.target.unlink(head)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.target.len(), Some(self.target.len()))
    }
}

/// An owning iterator over the values of a deque, head to tail. It is
/// constructed by `Deque::into_iter`.
pub struct IntoIter<T> {
    target: Deque<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(target: Deque<T>) -> Self {
        Self { target }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.target.remove_from_head().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.target.len(), Some(self.target.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.target.remove_from_tail().ok()
    }
}
