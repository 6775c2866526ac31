//! A double-ended queue (deque) built as a circular doubly-linked
//! list around a single sentinel node.
//!
//! The sentinel holds no data and closes the cycle: an empty deque is
//! the sentinel linked to itself, and walking `next` from the sentinel
//! visits every value once before arriving back at it. Values can be
//! added and removed at either end in constant time, and any value can
//! be removed through the `Handle` returned when it was added or found.
//!
//! Internally, the nodes live in a `Vec` and refer to their neighbours
//! by index. Removed nodes go on a free list that is used before the
//! `Vec` is expanded. Handles carry a generation number, so a handle to
//! a removed node is reported as stale instead of reaching whatever
//! node later reuses its slot.

mod cycle;
mod deque;
mod error;
mod handle;
mod iterators;
mod node;

pub use crate::cycle::Cycle;
pub use crate::deque::Deque;
pub use crate::error::DequeError;
pub use crate::handle::Handle;
pub use crate::iterators::{Drain, IntoIter, Iter};
