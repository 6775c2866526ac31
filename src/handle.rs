/// A handle naming a node of a `Deque`. It is returned when a value is
/// added and by `find`, and can be passed back to `get`, `next`,
/// `prev`, `insert_after` or `remove_node`.
///
/// A handle does not own its node and does not keep it alive. It
/// carries a generation number: once the node is removed the handle
/// is stale, and every operation given it reports that instead of
/// touching whatever node has come to occupy the same slot.
///
/// Every deque has exactly one sentinel, and its handle compares equal
/// to the sentinel handle of any other deque. Use `Deque::is_sentinel`
/// rather than comparing handles from different deques.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) ix: usize,
    pub(crate) generation: usize,
}

impl Handle {
    pub(crate) fn new(ix: usize, generation: usize) -> Handle {
        Handle { ix, generation }
    }
}
