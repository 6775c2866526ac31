/// The generation carried by every sentinel. Element generations start
/// above it, so a sentinel handle never matches an element.
pub(crate) const SENTINEL_GENERATION: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Links {
    // Index of the node after this one. The sentinel's own index when
    // this is the tail.
    pub(crate) next: usize,
    // Index of the node before this one. The sentinel's own index when
    // this is the head.
    pub(crate) prev: usize,
}

impl Links {
    pub(crate) fn new(next: usize, prev: usize) -> Links {
        Links { next, prev }
    }
}

#[derive(Clone)]
pub(crate) struct Element<T> {
    links: Links,
    // The generation ID for this node.
    generation: usize,
    // The contained data.
    data: T,
}

/// A node of the cycle. There are only ever two kinds: the data-less
/// sentinel that anchors the cycle, and elements that carry a value.
#[derive(Clone)]
pub(crate) enum Node<T> {
    Sentinel(Links),
    Element(Element<T>),
}

impl<T> Node<T> {
    pub(crate) fn links(&self) -> Links {
        match self {
            Node::Sentinel(links) => *links,
            Node::Element(e) => e.links,
        }
    }

    fn links_mut(&mut self) -> &mut Links {
        match self {
            Node::Sentinel(links) => links,
            Node::Element(e) => &mut e.links,
        }
    }

    pub(crate) fn next(&self) -> usize {
        self.links().next
    }

    pub(crate) fn set_next(&mut self, new_next: usize) {
        self.links_mut().next = new_next;
    }

    pub(crate) fn prev(&self) -> usize {
        self.links().prev
    }

    pub(crate) fn set_prev(&mut self, new_prev: usize) {
        self.links_mut().prev = new_prev;
    }

    pub(crate) fn generation(&self) -> usize {
        match self {
            Node::Sentinel(_) => SENTINEL_GENERATION,
            Node::Element(e) => e.generation,
        }
    }

    pub(crate) fn is_sentinel(&self) -> bool {
        matches!(self, Node::Sentinel(_))
    }

    pub(crate) fn as_generation(&self, g: usize) -> Option<&Node<T>> {
        if self.generation() == g {
            Some(self)
        } else {
            None
        }
    }

    pub(crate) fn data(&self) -> Option<&T> {
        match self {
            Node::Sentinel(_) => None,
            Node::Element(e) => Some(&e.data),
        }
    }

    pub(crate) fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Node::Sentinel(_) => None,
            Node::Element(e) => Some(&mut e.data),
        }
    }

    pub(crate) fn take(self) -> Option<(Links, T)> {
        match self {
            Node::Sentinel(_) => None,
            Node::Element(Element { links, data, .. }) => Some((links, data)),
        }
    }
}

/// One cell of the arena backing a cycle. Free cells form a singly
/// linked free list threaded through their indices.
#[derive(Clone)]
pub(crate) enum Slot<T> {
    Free(usize),
    Used(Node<T>),
}

impl<T> Slot<T> {
    pub(crate) fn new_free(next: usize) -> Slot<T> {
        Slot::Free(next)
    }

    pub(crate) fn new_sentinel(ix: usize) -> Slot<T> {
        Slot::Used(Node::Sentinel(Links::new(ix, ix)))
    }

    pub(crate) fn new_element(links: Links, generation: usize, data: T) -> Slot<T> {
        Slot::Used(Node::Element(Element {
            links,
            generation,
            data,
        }))
    }

    pub(crate) fn get_used(&self) -> Option<&Node<T>> {
        if let Slot::Used(node) = self {
            Some(node)
        } else {
            None
        }
    }

    pub(crate) fn get_used_mut(&mut self) -> Option<&mut Node<T>> {
        if let Slot::Used(node) = self {
            Some(node)
        } else {
            None
        }
    }

    pub(crate) fn get_free(&self) -> Option<usize> {
        if let Slot::Free(next) = self {
            Some(*next)
        } else {
            None
        }
    }

    pub(crate) fn into_used(self) -> Option<Node<T>> {
        if let Slot::Used(node) = self {
            Some(node)
        } else {
            None
        }
    }
}
