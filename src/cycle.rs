use crate::error::DequeError;
use crate::handle::Handle;
use crate::node::{Links, Node, Slot, SENTINEL_GENERATION};
use tracing::{debug, trace};

/// Arena index of the sentinel. It is never freed.
pub(crate) const SENTINEL: usize = 0;

/// A circular doubly-linked list anchored on a single sentinel node.
///
/// Nodes live in a `Vec` and refer to their neighbours by index. The
/// sentinel occupies the first slot for the whole life of the cycle;
/// an empty cycle is the sentinel linked to itself in both directions.
/// Walking `next` from the sentinel visits every element once, head to
/// tail, and arrives back at the sentinel.
///
/// A `Cycle` is the node-level view of a deque. Build one by hand with
/// [`link`] and hand it to `Deque::from_cycle`, or get one back with
/// `Deque::into_cycle`.
///
/// [`link`]: struct.Cycle.html#method.link
#[derive(Clone)]
pub struct Cycle<T> {
    // Index of the first element on the free list. MAX when the
    // free-list is empty.
    free_list: usize,
    // The next generation number.
    next_generation: usize,
    // The number of slots currently used by element nodes.
    len_used: usize,
    // The number of slots currently on the free list.
    len_free: usize,
    pub(crate) slots: Vec<Slot<T>>,
}

impl<T> Default for Cycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cycle<T> {
    /// Creates the degenerate cycle: a sentinel whose `next` and `prev`
    /// are both itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::Cycle;
    ///
    /// let c: Cycle<u8> = Cycle::new();
    /// let s = c.sentinel();
    /// assert_eq!(Some(s), c.next(&s));
    /// assert_eq!(Some(s), c.prev(&s));
    /// ```
    pub fn new() -> Cycle<T> {
        Cycle {
            free_list: usize::MAX,
            next_generation: SENTINEL_GENERATION + 1,
            len_used: 0,
            len_free: 0,
            slots: vec![Slot::new_sentinel(SENTINEL)],
        }
    }

    /// Creates an empty cycle with a freelist `capacity` elements deep.
    pub fn with_capacity(capacity: usize) -> Cycle<T> {
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.push(Slot::new_sentinel(SENTINEL));

        let mut next = usize::MAX;
        for i in 1..=capacity {
            slots.push(Slot::new_free(next));
            next = i;
        }

        Cycle {
            free_list: next,
            next_generation: SENTINEL_GENERATION + 1,
            len_used: 0,
            len_free: capacity,
            slots,
        }
    }

    /// Expands the backing `Vec` by at least `additional` nodes. The
    /// reserved space is not put on the free list.
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional)
    }

    /// How many element nodes fit without growing the backing `Vec`.
    pub fn capacity(&self) -> usize {
        self.slots.capacity() - 1
    }

    /// The number of element nodes, kept as a running count.
    pub fn len(&self) -> usize {
        self.len_used
    }

    pub fn is_empty(&self) -> bool {
        0 == self.len_used
    }

    /// The number of arena slots waiting on the free list.
    pub fn len_freelist(&self) -> usize {
        self.len_free
    }

    /// The handle of this cycle's sentinel.
    pub fn sentinel(&self) -> Handle {
        Handle::new(SENTINEL, SENTINEL_GENERATION)
    }

    /// True when `handle` names the sentinel rather than an element.
    pub fn is_sentinel(&self, handle: &Handle) -> bool {
        handle.ix == SENTINEL && handle.generation == SENTINEL_GENERATION
    }

    /// The node after the one `handle` names, or `None` if the handle
    /// is stale. The successor of the tail is the sentinel.
    pub fn next(&self, handle: &Handle) -> Option<Handle> {
        let ix = self.resolve(handle).ok()?;
        Some(self.handle_of(self.node(ix).next()))
    }

    /// The node before the one `handle` names, or `None` if the handle
    /// is stale. The predecessor of the head is the sentinel.
    pub fn prev(&self, handle: &Handle) -> Option<Handle> {
        let ix = self.resolve(handle).ok()?;
        Some(self.handle_of(self.node(ix).prev()))
    }

    /// The data held by the node `handle` names. `None` for the
    /// sentinel and for stale handles.
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        let Handle { ix, generation } = handle;

        self.slots
            .get(*ix)
            .and_then(|s| s.get_used())
            .and_then(|n| n.as_generation(*generation))
            .and_then(|n| n.data())
    }

    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        let Handle { ix, generation } = handle;

        self.slots
            .get_mut(*ix)
            .and_then(|s| s.get_used_mut())
            .filter(|n| n.generation() == *generation)
            .and_then(|n| n.data_mut())
    }

    /// Inserts `data` immediately after the node `handle` names. This
    /// works the same on the sentinel, where it inserts a new head.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::Cycle;
    ///
    /// let mut c = Cycle::new();
    /// let s = c.sentinel();
    /// let b = c.add_after(&s, 'b').unwrap();
    /// let a = c.add_after(&s, 'a').unwrap();
    ///
    /// assert_eq!(Some(b), c.next(&a));
    /// assert_eq!(Some(s), c.next(&b));
    /// ```
    pub fn add_after(&mut self, handle: &Handle, data: T) -> Result<Handle, DequeError> {
        let prev = self.resolve(handle)?;
        let next = self.node(prev).next();
        Ok(self.splice(prev, next, data))
    }

    /// Creates an element node between `prev` and `next`, which must be
    /// adjacent live nodes of this cycle (`prev`'s successor is `next`).
    /// Anything else is rejected with `InvalidLink` before any link is
    /// touched, so a node can never be created with a missing neighbour.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::{Cycle, Deque};
    ///
    /// let mut c = Cycle::new();
    /// let s = c.sentinel();
    /// let a = c.link("a", &s, &s).unwrap();
    /// let b = c.link("b", &s, &a).unwrap();
    ///
    /// let d = Deque::from_cycle(c);
    /// assert_eq!(vec![&"a", &"b"], d.iter().collect::<Vec<_>>());
    /// assert_eq!(Some(b), d.next(&a));
    /// ```
    pub fn link(&mut self, data: T, next: &Handle, prev: &Handle) -> Result<Handle, DequeError> {
        let (next, prev) = match (self.resolve(next), self.resolve(prev)) {
            (Ok(next), Ok(prev)) => (next, prev),
            _ => {
                debug!("refusing to link a node to a missing neighbour");
                return Err(DequeError::InvalidLink);
            }
        };

        if self.node(prev).next() != next {
            debug!(prev, next, "refusing to link between non-adjacent nodes");
            return Err(DequeError::InvalidLink);
        }

        Ok(self.splice(prev, next, data))
    }

    /// Unlinks the node `handle` names and returns its data. The handle
    /// is stale afterwards.
    pub fn remove(&mut self, handle: &Handle) -> Result<T, DequeError> {
        let ix = self.resolve(handle)?;
        if SENTINEL == ix {
            debug!("refusing to remove the sentinel");
            return Err(DequeError::Sentinel);
        }
        Ok(self.unlink(ix))
    }

    /// Scans along `next` from the node `handle` names and returns the
    /// first element whose data satisfies `pred`. The scan stops at the
    /// sentinel, which is returned when nothing matches; starting on
    /// the sentinel returns it straight away.
    pub fn find_from<P>(&self, handle: &Handle, pred: P) -> Result<Handle, DequeError>
    where
        P: FnMut(&T) -> bool,
    {
        let ix = self.resolve(handle)?;
        Ok(self.handle_of(self.scan(ix, pred)))
    }

    /// Counts the element nodes from the one `handle` names up to, but
    /// not including, the sentinel.
    pub fn count_from(&self, handle: &Handle) -> Result<usize, DequeError> {
        let ix = self.resolve(handle)?;
        Ok(self.tally(ix))
    }

    /// Counts every element node by walking the cycle once. This always
    /// agrees with `len`.
    pub fn count(&self) -> usize {
        self.tally(self.head_ix())
    }

    /// Walks the whole cycle and verifies that each node's neighbours
    /// point back at it, that the walk returns to the sentinel without
    /// meeting a second one, and that it visits every element node.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_deque::Cycle;
    ///
    /// let mut c = Cycle::new();
    /// let s = c.sentinel();
    /// c.add_after(&s, 1).unwrap();
    /// assert!(c.check_links().is_ok());
    /// ```
    pub fn check_links(&self) -> Result<(), DequeError> {
        let mut ix = SENTINEL;
        let mut seen = 0;

        loop {
            let Links { next, prev } = self.node(ix).links();

            let next_node = self
                .slots
                .get(next)
                .and_then(|s| s.get_used())
                .ok_or(DequeError::InvalidLink)?;
            let prev_node = self
                .slots
                .get(prev)
                .and_then(|s| s.get_used())
                .ok_or(DequeError::InvalidLink)?;

            if next_node.prev() != ix || prev_node.next() != ix {
                debug!(ix, next, prev, "cycle links are inconsistent");
                return Err(DequeError::InvalidLink);
            }

            if SENTINEL == next {
                break;
            }
            if next_node.is_sentinel() || seen == self.len_used {
                debug!(ix, next, "cycle does not close on its sentinel");
                return Err(DequeError::InvalidLink);
            }

            seen += 1;
            ix = next;
        }

        if seen == self.len_used {
            Ok(())
        } else {
            Err(DequeError::InvalidLink)
        }
    }

    /// Removes every element node. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.slots.truncate(1);
        self.slots[SENTINEL] = Slot::new_sentinel(SENTINEL);
        self.free_list = usize::MAX;
        self.len_used = 0;
        self.len_free = 0;
    }

    pub(crate) fn head_ix(&self) -> usize {
        self.node(SENTINEL).next()
    }

    pub(crate) fn tail_ix(&self) -> usize {
        self.node(SENTINEL).prev()
    }

    pub(crate) fn node(&self, ix: usize) -> &Node<T> {
        self.slots[ix]
            .get_used()
            .expect("linked slot is expected to be used")
    }

    fn node_mut(&mut self, ix: usize) -> &mut Node<T> {
        self.slots[ix]
            .get_used_mut()
            .expect("linked slot is expected to be used")
    }

    pub(crate) fn handle_of(&self, ix: usize) -> Handle {
        Handle::new(ix, self.node(ix).generation())
    }

    pub(crate) fn resolve(&self, handle: &Handle) -> Result<usize, DequeError> {
        let Handle { ix, generation } = handle;

        self.slots
            .get(*ix)
            .and_then(|s| s.get_used())
            .and_then(|n| n.as_generation(*generation))
            .map(|_| *ix)
            .ok_or_else(|| {
                debug!(ix, generation, "handle is stale");
                DequeError::StaleHandle
            })
    }

    pub(crate) fn scan<P>(&self, mut ix: usize, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        loop {
            match self.node(ix) {
                Node::Sentinel(_) => return ix,
                Node::Element(_) => {
                    if self.node(ix).data().map_or(false, |d| pred(d)) {
                        return ix;
                    }
                    ix = self.node(ix).next();
                }
            }
        }
    }

    fn tally(&self, mut ix: usize) -> usize {
        let mut n = 0;
        while !self.node(ix).is_sentinel() {
            n += 1;
            ix = self.node(ix).next();
        }
        n
    }

    // Creates a node between two adjacent nodes and rewires both of
    // them to point at it.
    pub(crate) fn splice(&mut self, prev: usize, next: usize, data: T) -> Handle {
        debug_assert_eq!(next, self.node(prev).next());
        debug_assert_eq!(prev, self.node(next).prev());

        let (ix, generation) = self.allocate(Links::new(next, prev), data);
        self.node_mut(prev).set_next(ix);
        self.node_mut(next).set_prev(ix);

        trace!(ix, generation, prev, next, "linked node");
        Handle::new(ix, generation)
    }

    // Short-circuits the node at `ix` and returns its data. `ix` must
    // be a live element.
    pub(crate) fn unlink(&mut self, ix: usize) -> T {
        debug_assert_ne!(SENTINEL, ix);

        let (Links { next, prev }, data) = self
            .free(ix)
            .into_used()
            .and_then(Node::take)
            .expect("unlinked slot is expected to hold an element");

        self.node_mut(prev).set_next(next);
        self.node_mut(next).set_prev(prev);

        trace!(ix, prev, next, "unlinked node");
        data
    }

    fn allocate(&mut self, links: Links, data: T) -> (usize, usize) {
        // A checked add turns a wrapped generation, which could let a
        // very old handle name a new node, into a panic.
        let generation = self.next_generation;
        self.next_generation = self
            .next_generation
            .checked_add(1)
            .expect("generation counter overflowed");

        self.len_used += 1;

        let s = Slot::new_element(links, generation, data);

        let ix = if usize::MAX == self.free_list {
            self.slots.push(s);
            self.slots.len() - 1
        } else {
            let ix = self.free_list;
            self.free_list = self.slots[ix]
                .get_free()
                .expect("free list slot is expected to be free");
            self.slots[ix] = s;
            self.len_free -= 1;
            ix
        };

        (ix, generation)
    }

    fn free(&mut self, ix: usize) -> Slot<T> {
        debug_assert!(self.slots[ix].get_used().is_some());

        self.len_used -= 1;

        let mut v = Slot::new_free(self.free_list);
        std::mem::swap(&mut v, &mut self.slots[ix]);
        self.free_list = ix;
        self.len_free += 1;
        v
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_cycle_is_degenerate() {
        let c: Cycle<u8> = Cycle::new();
        let s = c.sentinel();

        assert!(c.is_sentinel(&s));
        assert_eq!(Some(s), c.next(&s));
        assert_eq!(Some(s), c.prev(&s));
        assert_eq!(0, c.count());
        assert_eq!(None, c.get(&s));
        assert_eq!(Ok(()), c.check_links());
    }

    #[test]
    fn add_after_rewires_four_links() {
        let mut c = Cycle::new();
        let s = c.sentinel();
        let a = c.add_after(&s, 1u8).unwrap();
        let b = c.add_after(&a, 2u8).unwrap();
        let m = c.add_after(&a, 3u8).unwrap();

        assert_eq!(Some(a), c.next(&s));
        assert_eq!(Some(m), c.next(&a));
        assert_eq!(Some(b), c.next(&m));
        assert_eq!(Some(s), c.next(&b));

        assert_eq!(Some(b), c.prev(&s));
        assert_eq!(Some(m), c.prev(&b));
        assert_eq!(Some(a), c.prev(&m));
        assert_eq!(Some(s), c.prev(&a));

        assert_eq!(Ok(()), c.check_links());
    }

    #[test]
    fn link_requires_adjacent_live_neighbours() {
        let mut c = Cycle::new();
        let s = c.sentinel();
        let a = c.link('a', &s, &s).unwrap();
        let b = c.link('b', &s, &a).unwrap();

        // `a` is followed by `b`, not by the sentinel.
        assert_eq!(Err(DequeError::InvalidLink), c.link('x', &s, &a));

        c.remove(&b).unwrap();
        assert_eq!(Err(DequeError::InvalidLink), c.link('x', &s, &b));
        assert_eq!(Err(DequeError::InvalidLink), c.link('x', &b, &a));

        assert_eq!(1, c.len());
        assert_eq!(Ok(()), c.check_links());
    }

    #[test]
    fn remove_refuses_the_sentinel() {
        let mut c: Cycle<u8> = Cycle::new();
        let s = c.sentinel();

        assert_eq!(Err(DequeError::Sentinel), c.remove(&s));
        assert_eq!(Ok(()), c.check_links());
    }

    #[test]
    fn remove_makes_handle_stale() {
        let mut c = Cycle::new();
        let s = c.sentinel();
        let a = c.add_after(&s, 10u8).unwrap();

        assert_eq!(Ok(10), c.remove(&a));
        assert_eq!(Err(DequeError::StaleHandle), c.remove(&a));
        assert_eq!(None, c.next(&a));
        assert_eq!(None, c.get(&a));

        // The slot is reused, but not by the old handle.
        let b = c.add_after(&s, 11u8).unwrap();
        assert_eq!(a.ix, b.ix);
        assert_eq!(None, c.get(&a));
        assert_eq!(Some(&11), c.get(&b));
    }

    #[test]
    fn find_from_stops_at_sentinel() {
        let mut c = Cycle::new();
        let s = c.sentinel();
        let a = c.link(1u8, &s, &s).unwrap();
        let b = c.link(2u8, &s, &a).unwrap();
        let d = c.link(3u8, &s, &b).unwrap();

        assert_eq!(Ok(b), c.find_from(&a, |v| *v == 2));
        assert_eq!(Ok(d), c.find_from(&a, |v| *v > 1 && *v % 3 == 0));
        // Nothing before the start node is visited.
        assert_eq!(Ok(s), c.find_from(&b, |v| *v == 1));
        // The sentinel is its own base case.
        assert_eq!(Ok(s), c.find_from(&s, |_| true));
    }

    #[test]
    fn count_from_counts_to_sentinel() {
        let mut c = Cycle::new();
        let s = c.sentinel();
        let a = c.link(1u8, &s, &s).unwrap();
        let b = c.link(2u8, &s, &a).unwrap();
        c.link(3u8, &s, &b).unwrap();

        assert_eq!(Ok(3), c.count_from(&a));
        assert_eq!(Ok(2), c.count_from(&b));
        assert_eq!(Ok(0), c.count_from(&s));
        assert_eq!(3, c.count());
    }

    #[test]
    fn check_links_detects_broken_back_link() {
        let mut c = Cycle::new();
        let s = c.sentinel();
        let a = c.add_after(&s, 1u8).unwrap();
        c.add_after(&a, 2u8).unwrap();

        c.node_mut(a.ix).set_prev(a.ix);
        assert_eq!(Err(DequeError::InvalidLink), c.check_links());
    }

    #[test]
    fn check_links_detects_escaped_element() {
        let mut c = Cycle::new();
        let s = c.sentinel();
        let a = c.add_after(&s, 1u8).unwrap();
        let b = c.add_after(&a, 2u8).unwrap();

        // Cut `b` out of the forward walk while the count still
        // includes it.
        c.node_mut(a.ix).set_next(SENTINEL);
        c.node_mut(SENTINEL).set_prev(a.ix);
        c.node_mut(b.ix).set_prev(b.ix);
        c.node_mut(b.ix).set_next(b.ix);
        assert_eq!(Err(DequeError::InvalidLink), c.check_links());
    }

    #[test]
    fn with_capacity_preallocates_free_list() {
        let mut c = Cycle::with_capacity(3);
        assert_eq!(3, c.len_freelist());
        assert!(c.capacity() >= 3);

        let s = c.sentinel();
        c.add_after(&s, ()).unwrap();
        assert_eq!(2, c.len_freelist());
        assert_eq!(1, c.len());
    }

    #[test]
    fn clear_resets_to_degenerate_and_stales_handles() {
        let mut c = Cycle::new();
        let s = c.sentinel();
        let a = c.add_after(&s, 1u8).unwrap();
        c.add_after(&a, 2u8).unwrap();

        c.clear();
        assert!(c.is_empty());
        assert_eq!(Some(s), c.next(&s));
        assert_eq!(Err(DequeError::StaleHandle), c.remove(&a));

        let b = c.add_after(&s, 3u8).unwrap();
        assert_eq!(a.ix, b.ix);
        assert_eq!(None, c.get(&a));
        assert_eq!(Ok(()), c.check_links());
    }
}
