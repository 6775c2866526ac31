use sentinel_deque::{Cycle, Deque, DequeError, Handle};

// Builds a deque by linking each value in front of the sentinel, the
// way a cycle is assembled by hand before being handed to a deque.
fn linked(values: &[&'static str]) -> (Deque<&'static str>, Vec<Handle>) {
    let mut c = Cycle::new();
    let s = c.sentinel();
    let mut prev = s;
    let mut handles = Vec::new();

    for v in values {
        prev = c.link(*v, &s, &prev).unwrap();
        handles.push(prev);
    }

    (Deque::from_cycle(c), handles)
}

fn contents<T: Clone>(d: &Deque<T>) -> Vec<T> {
    d.iter().cloned().collect()
}

#[test]
fn hand_built_cycles_are_well_formed() {
    let (d, h) = linked(&["abc", "bcd", "cde", "def"]);
    let s = d.sentinel();

    assert_eq!(4, d.size());
    assert_eq!(Some(s), d.prev(&h[0]));
    assert_eq!(Some(h[3]), d.prev(&s));
    assert_eq!(Some(h[0]), d.next(&s));
    assert_eq!(Ok(()), d.check_links());
}

#[test]
fn sizes_of_example_deques() {
    assert_eq!(0, Deque::<&str>::new().size());
    assert_eq!(4, linked(&["abc", "bcd", "cde", "def"]).0.size());
    assert_eq!(5, linked(&["d", "a", "z", "e", "h"]).0.size());
}

#[test]
fn add_at_head_on_a_populated_deque() {
    let (mut d, _) = linked(&["abc", "bcd", "cde", "def"]);
    d.add_at_head("d");

    let (expected, _) = linked(&["d", "abc", "bcd", "cde", "def"]);
    assert_eq!(expected, d);
}

#[test]
fn add_then_remove_restores_the_empty_cycle() {
    let mut d = Deque::new();
    d.add_at_head("th");

    assert_eq!(linked(&["th"]).0, d);
    assert_eq!(1, d.size());

    assert_eq!(Ok("th"), d.remove_from_head());
    assert_eq!(0, d.size());

    let s = d.sentinel();
    assert_eq!(Some(s), d.next(&s));
    assert_eq!(Some(s), d.prev(&s));
    assert_eq!(Deque::from_cycle(Cycle::new()), d);
}

#[test]
fn single_value_is_both_head_and_tail() {
    let mut d = Deque::new();
    let s = d.sentinel();
    d.insert_after(&s, "hi").unwrap();

    assert_eq!(1, d.size());
    assert_eq!(d.next(&s), d.prev(&s));
}

#[test]
fn add_at_tail_appends() {
    let (mut d, _) = linked(&["d", "a", "z", "e", "h"]);
    d.add_at_tail("o");

    assert_eq!(vec!["d", "a", "z", "e", "h", "o"], contents(&d));
    assert_eq!(linked(&["d", "a", "z", "e", "h", "o"]).0, d);
}

#[test]
fn add_at_tail_on_empty_matches_add_at_head() {
    let mut tail = Deque::new();
    tail.add_at_tail("th");

    let mut head = Deque::new();
    head.add_at_head("th");

    assert_eq!(head, tail);
}

#[test]
fn remove_node_leaves_sentinel_pointing_at_itself() {
    let mut d = Deque::new();
    d.add_at_head("th");

    let head = d.next(&d.sentinel()).unwrap();
    assert_eq!(Ok("th"), d.remove_node(&head));
    assert_eq!(0, d.size());

    let s = d.sentinel();
    assert_eq!(Some(s), d.next(&s));
}

#[test]
fn remove_from_head_of_three() {
    let (mut d, _) = linked(&["AA", "BB", "CC"]);

    assert_eq!(Ok("AA"), d.remove_from_head());
    assert_eq!(vec!["BB", "CC"], contents(&d));
    assert_eq!(linked(&["BB", "CC"]).0, d);
}

#[test]
fn remove_from_tail_of_three() {
    let (mut d, _) = linked(&["WW", "XX", "YY"]);

    assert_eq!(Ok("YY"), d.remove_from_tail());
    assert_eq!(vec!["WW", "XX"], contents(&d));
    assert_eq!(linked(&["WW", "XX"]).0, d);
}

#[test]
fn removing_from_empty_reports_empty_container() {
    let mut d: Deque<&str> = Deque::new();

    let e = d.remove_from_head().unwrap_err();
    assert_eq!(DequeError::EmptyContainer, e);
    assert_eq!("cannot remove from an empty list", e.to_string());

    assert_eq!(Err(DequeError::EmptyContainer), d.remove_from_tail());
    assert_eq!(0, d.size());
}

#[test]
fn find_returns_head_or_sentinel() {
    let (d, h) = linked(&["WW", "XX", "YY"]);

    assert_eq!(Some(h[0]), d.find(|v| *v == "WW"));
    assert_eq!(h[0], d.find_or_sentinel(|v| *v == "WW"));

    let missing = d.find_or_sentinel(|v| *v == "notfound");
    assert!(d.is_sentinel(&missing));
    assert_eq!(None, d.find(|v| *v == "notfound"));
}

#[test]
fn find_then_remove_node() {
    let (mut d, _) = linked(&["WW", "XX", "YY"]);

    let xx = d.find(|v| *v == "XX").unwrap();
    assert_eq!(Ok("XX"), d.remove_node(&xx));
    assert_eq!(vec!["WW", "YY"], contents(&d));
    assert_eq!(None, d.find(|v| *v == "XX"));
    assert_eq!(Err(DequeError::StaleHandle), d.remove_node(&xx));
}

#[test]
fn sentinel_handles_compare_equal_across_deques() {
    let (a, _) = linked(&["WW"]);
    let b: Deque<&str> = Deque::new();

    let missing = a.find_or_sentinel(|v| *v == "notfound");
    assert!(a.is_sentinel(&missing));
    assert!(b.is_sentinel(&missing));
    assert_ne!(a, b);
}

#[test]
fn linking_to_a_removed_node_is_rejected() {
    let mut c = Cycle::new();
    let s = c.sentinel();
    let a = c.link("a", &s, &s).unwrap();
    assert_eq!(Ok("a"), c.remove(&a));

    assert_eq!(Err(DequeError::InvalidLink), c.link("b", &s, &a));
    assert_eq!(Err(DequeError::InvalidLink), c.link("b", &a, &s));
    assert_eq!(0, c.count());
    assert_eq!(Ok(()), c.check_links());
}
