use std::fmt;

/// Errors that can occur when operating on a `Deque` or its `Cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DequeError {
    /// An element was requested from a deque with no element nodes.
    EmptyContainer,
    /// A node would have been linked to a neighbour that is absent, or
    /// the links of the cycle are not consistent.
    InvalidLink,
    /// The sentinel was given where an element node is required.
    Sentinel,
    /// The handle refers to a node that has already been removed.
    StaleHandle,
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DequeError::EmptyContainer => f.write_str("cannot remove from an empty list"),
            DequeError::InvalidLink => f.write_str("invalid link between nodes"),
            DequeError::Sentinel => f.write_str("cannot remove the sentinel"),
            DequeError::StaleHandle => f.write_str("handle no longer refers to a node"),
        }
    }
}

impl std::error::Error for DequeError {}
