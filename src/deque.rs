use crate::cycle::{Cycle, SENTINEL};
use crate::error::DequeError;
use crate::handle::Handle;
use crate::iterators::{Drain, IntoIter, Iter};
use std::fmt;
use std::iter::FromIterator;
use tracing::debug;

/// A deque built as a circular doubly-linked list around a sentinel.
/// Values can be added and removed at either end, and any element can
/// be removed through the `Handle` returned when it was added or found.
///
/// Every operation delegates to the underlying `Cycle`: adding at the
/// head inserts after the sentinel, adding at the tail inserts after
/// the sentinel's predecessor.
pub struct Deque<T> {
    cycle: Cycle<T>,
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Deque<T>
where
    T: Clone,
{
    /// The clone has the same arena layout, so a handle into `self` also
    /// names the corresponding node of the clone.
    fn clone(&self) -> Self {
        Deque {
            cycle: self.cycle.clone(),
        }
    }
}

impl<T> fmt::Debug for Deque<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for Deque<T>
where
    T: PartialEq,
{
    /// Two deques are equal when they hold equal values in the same
    /// order, walking `next` from the sentinel and walking `prev` from
    /// it.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().eq(other.iter())
            && self.iter().rev().eq(other.iter().rev())
    }
}

impl<T> Eq for Deque<T> where T: Eq {}

impl<T> Deque<T> {
    /// Creates an empty `Deque` whose sentinel links to itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::Deque;
    ///
    /// let deque: Deque<u32> = Deque::new();
    /// assert_eq!(0, deque.size());
    /// ```
    pub fn new() -> Deque<T> {
        Deque {
            cycle: Cycle::new(),
        }
    }

    /// Creates an empty `Deque` with a freelist at least `capacity`
    /// elements deep.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::Deque;
    ///
    /// let deque: Deque<u32> = Deque::with_capacity(16);
    /// assert_eq!(16, deque.len_freelist());
    /// ```
    pub fn with_capacity(capacity: usize) -> Deque<T> {
        Deque {
            cycle: Cycle::with_capacity(capacity),
        }
    }

    /// Wraps an already populated cycle. Handles obtained while building
    /// the cycle stay valid for the deque.
    pub fn from_cycle(cycle: Cycle<T>) -> Deque<T> {
        debug_assert_eq!(Ok(()), cycle.check_links());
        Deque { cycle }
    }

    /// Gives back the underlying cycle.
    pub fn into_cycle(self) -> Cycle<T> {
        self.cycle
    }

    /// The node-level view of this deque.
    pub fn cycle(&self) -> &Cycle<T> {
        &self.cycle
    }

    /// Reserves space for at least `additional` more values. This only
    /// expands the backing `Vec`; nothing is added to the free list.
    pub fn reserve(&mut self, additional: usize) {
        self.cycle.reserve(additional)
    }

    pub fn capacity(&self) -> usize {
        self.cycle.capacity()
    }

    /// Counts the values by walking from the sentinel's successor back
    /// around to the sentinel. This is linear in the length; `len`
    /// returns the same number in constant time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::Deque;
    ///
    /// let mut d = Deque::new();
    /// d.add_at_head(1);
    /// d.add_at_tail(2);
    /// assert_eq!(2, d.size());
    ///
    /// d.remove_from_head().unwrap();
    /// assert_eq!(1, d.size());
    /// ```
    pub fn size(&self) -> usize {
        self.cycle.count()
    }

    pub fn len(&self) -> usize {
        self.cycle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycle.is_empty()
    }

    /// The number of arena slots waiting to be reused.
    pub fn len_freelist(&self) -> usize {
        self.cycle.len_freelist()
    }

    /// Insert `value` at the head of the deque, right after the
    /// sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::Deque;
    ///
    /// let mut d = Deque::new();
    /// d.add_at_head("b");
    /// let a = d.add_at_head("a");
    ///
    /// assert_eq!(Some(&"a"), d.get(&a));
    /// assert_eq!(Some(&"a"), d.head());
    /// ```
    pub fn add_at_head(&mut self, value: T) -> Handle {
        let head = self.cycle.head_ix();
        self.cycle.splice(SENTINEL, head, value)
    }

    /// Insert `value` at the tail of the deque, right after the
    /// sentinel's predecessor.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::Deque;
    ///
    /// let mut d = Deque::new();
    /// d.add_at_tail("a");
    /// d.add_at_tail("b");
    ///
    /// assert_eq!(Some(&"b"), d.tail());
    /// ```
    pub fn add_at_tail(&mut self, value: T) -> Handle {
        let tail = self.cycle.tail_ix();
        self.cycle.splice(tail, SENTINEL, value)
    }

    /// Remove the head of the deque and return its value.
    ///
    /// # Errors
    ///
    /// `DequeError::EmptyContainer` when the deque holds no values. The
    /// deque is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::{Deque, DequeError};
    ///
    /// let mut d = Deque::new();
    /// d.add_at_tail(10);
    /// d.add_at_tail(20);
    ///
    /// assert_eq!(Ok(10), d.remove_from_head());
    /// assert_eq!(Ok(20), d.remove_from_head());
    /// assert_eq!(Err(DequeError::EmptyContainer), d.remove_from_head());
    /// ```
    pub fn remove_from_head(&mut self) -> Result<T, DequeError> {
        match self.cycle.head_ix() {
            SENTINEL => {
                debug!("remove from head of an empty deque");
                Err(DequeError::EmptyContainer)
            }
            head => Ok(self.cycle.unlink(head)),
        }
    }

    /// Remove the tail of the deque and return its value.
    ///
    /// # Errors
    ///
    /// `DequeError::EmptyContainer` when the deque holds no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::{Deque, DequeError};
    ///
    /// let mut d = Deque::new();
    /// d.add_at_head(10);
    /// d.add_at_head(20);
    ///
    /// assert_eq!(Ok(10), d.remove_from_tail());
    /// assert_eq!(Ok(20), d.remove_from_tail());
    /// assert_eq!(Err(DequeError::EmptyContainer), d.remove_from_tail());
    /// ```
    pub fn remove_from_tail(&mut self) -> Result<T, DequeError> {
        match self.cycle.tail_ix() {
            SENTINEL => {
                debug!("remove from tail of an empty deque");
                Err(DequeError::EmptyContainer)
            }
            tail => Ok(self.cycle.unlink(tail)),
        }
    }

    /// The handle of the first value, head to tail, for which `pred`
    /// returns true. `None` when no value matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::Deque;
    ///
    /// let mut d = Deque::new();
    /// d.add_at_tail(1);
    /// let two = d.add_at_tail(2);
    /// d.add_at_tail(4);
    ///
    /// assert_eq!(Some(two), d.find(|v| v % 2 == 0));
    /// assert_eq!(None, d.find(|v| *v > 10));
    /// ```
    pub fn find<P>(&self, pred: P) -> Option<Handle>
    where
        P: FnMut(&T) -> bool,
    {
        let found = self.find_or_sentinel(pred);
        if self.is_sentinel(&found) {
            None
        } else {
            Some(found)
        }
    }

    /// Like `find`, but reports "not found" by returning the sentinel's
    /// handle. Test the result with `is_sentinel`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::Deque;
    ///
    /// let mut d = Deque::new();
    /// d.add_at_tail("WW");
    ///
    /// let h = d.find_or_sentinel(|v| *v == "notfound");
    /// assert!(d.is_sentinel(&h));
    /// assert_eq!(d.sentinel(), h);
    /// ```
    pub fn find_or_sentinel<P>(&self, pred: P) -> Handle
    where
        P: FnMut(&T) -> bool,
    {
        let ix = self.cycle.scan(self.cycle.head_ix(), pred);
        self.cycle.handle_of(ix)
    }

    /// The handle of this deque's sentinel.
    pub fn sentinel(&self) -> Handle {
        self.cycle.sentinel()
    }

    pub fn is_sentinel(&self, handle: &Handle) -> bool {
        self.cycle.is_sentinel(handle)
    }

    /// Remove the value `handle` names and return it. The handle, and
    /// any copy of it, is stale afterwards.
    ///
    /// # Errors
    ///
    /// `DequeError::Sentinel` when given the sentinel's handle, and
    /// `DequeError::StaleHandle` when the value was already removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::{Deque, DequeError};
    ///
    /// let mut d = Deque::new();
    /// let h = d.add_at_head(10);
    ///
    /// assert_eq!(Ok(10), d.remove_node(&h));
    /// assert_eq!(Err(DequeError::StaleHandle), d.remove_node(&h));
    /// assert_eq!(Err(DequeError::Sentinel), d.remove_node(&d.sentinel()));
    /// ```
    pub fn remove_node(&mut self, handle: &Handle) -> Result<T, DequeError> {
        self.cycle.remove(handle)
    }

    /// Insert `value` right after the node `handle` names. Given the
    /// sentinel this is `add_at_head`.
    pub fn insert_after(&mut self, handle: &Handle, value: T) -> Result<Handle, DequeError> {
        self.cycle.add_after(handle, value)
    }

    /// The value at the head, if any.
    pub fn head(&self) -> Option<&T> {
        self.cycle.node(self.cycle.head_ix()).data()
    }

    /// The value at the tail, if any.
    pub fn tail(&self) -> Option<&T> {
        self.cycle.node(self.cycle.tail_ix()).data()
    }

    /// The value `handle` names. `None` for the sentinel or a stale
    /// handle.
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        self.cycle.get(handle)
    }

    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        self.cycle.get_mut(handle)
    }

    /// The node after the one `handle` names, wrapping through the
    /// sentinel.
    pub fn next(&self, handle: &Handle) -> Option<Handle> {
        self.cycle.next(handle)
    }

    /// The node before the one `handle` names, wrapping through the
    /// sentinel.
    pub fn prev(&self, handle: &Handle) -> Option<Handle> {
        self.cycle.prev(handle)
    }

    /// See `Cycle::check_links`.
    pub fn check_links(&self) -> Result<(), DequeError> {
        self.cycle.check_links()
    }

    /// Create an iterator over the deque from head to tail.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::Deque;
    ///
    /// let d: Deque<u8> = vec![1, 2, 3].into_iter().collect();
    ///
    /// assert_eq!(vec![&1, &2, &3], d.iter().collect::<Vec<_>>());
    /// assert_eq!(vec![&3, &2, &1], d.iter().rev().collect::<Vec<_>>());
    /// ```
    pub fn iter(&self) -> Iter<T> {
        Iter::new(&self.cycle)
    }

    /// A draining iterator from the head. Drained slots are moved onto
    /// the free list.
    pub fn drain(&mut self) -> Drain<T> {
        Drain::new(&mut self.cycle)
    }

    /// Remove every value. All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.cycle.clear()
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut d = Self::new();
        d.extend(iter);
        d
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for i in iter {
            self.add_at_tail(i);
        }
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'l, T> IntoIterator for &'l Deque<T> {
    type Item = &'l T;
    type IntoIter = Iter<'l, T>;

    fn into_iter(self) -> Iter<'l, T> {
        self.iter()
    }
}
