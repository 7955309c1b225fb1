use chained_hashtable::{InvalidPosition, LinkedList, ValueNotFound};

#[test]
fn append_search_erase() {
    let mut l = LinkedList::new();
    for v in [3, 1, 4, 1, 5] {
        l.append(v);
    }
    assert_eq!(l.len(), 5);
    assert_eq!(l.front(), Some(&3));
    assert_eq!(l.back(), Some(&5));

    // search positions the iterator at the first match
    let tail: Vec<i32> = l.search(&1).copied().collect();
    assert_eq!(tail, vec![1, 4, 1, 5]);
    assert_eq!(l.search(&9).next(), None);

    // erasing the head works and only the first match goes
    assert_eq!(l.erase(&3), Ok(3));
    assert_eq!(l.erase(&1), Ok(1));
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![4, 1, 5]);
    assert_eq!(l.erase(&42), Err(ValueNotFound));
    assert_eq!(l.len(), 3);
}

#[test]
fn erase_tail_then_append() {
    let mut l: LinkedList<&str> = ["a", "b", "c"].into_iter().collect();
    assert_eq!(l.erase(&"c"), Ok("c"));
    assert_eq!(l.back(), Some(&"b"));
    l.push_back("d");
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "d"]);
}

#[test]
fn front_operations_and_insert_at() {
    let mut l = LinkedList::new();
    l.push_front(2);
    l.push_front(1);
    l.insert_at(9, 1);
    l.insert_at(7, 100);
    l.insert_at(0, 0);
    assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![0, 1, 9, 2, 7]);
    assert_eq!(l.pop_front(), Some(0));
    assert_eq!(l.len(), 4);
    assert!(l.contains(&9));
    assert!(!l.contains(&0));
}

#[test]
fn emptied_list_resets_ends() {
    let mut l: LinkedList<String> = LinkedList::new();
    l.append("x".to_string());
    assert_eq!(l.erase(&"x".to_string()), Ok("x".to_string()));
    assert!(l.is_empty());
    assert_eq!(l.front(), None);
    assert_eq!(l.back(), None);
    assert_eq!(l.pop_front(), None);
    l.append("y".to_string());
    assert_eq!(l.front(), l.back());
}

#[test]
fn iter_mut_and_owned_iteration_keep_order() {
    let mut l: LinkedList<u32> = (1..=6).collect();
    assert_eq!(l.erase(&3), Ok(3));
    l.append(7);
    for v in l.iter_mut() {
        *v *= 10;
    }
    assert_eq!(l.iter().len(), 6);
    assert_eq!(l.into_iter().collect::<Vec<_>>(), vec![10, 20, 40, 50, 60, 70]);
}

#[test]
fn equality_and_debug() {
    let a: LinkedList<u8> = [1, 2, 3].into_iter().collect();
    let mut b = a.clone();
    assert_eq!(a, b);
    b.push_front(0);
    assert_ne!(a, b);
    assert_eq!(format!("{:?}", a), "[1, 2, 3]");
}

#[test]
fn insert_before_search_position() {
    let mut l: LinkedList<char> = "abd".chars().collect();
    let at_d = l.search(&'d').cursor();
    l.insert_before('c', at_d).unwrap();
    l.insert_before('e', None).unwrap();
    assert_eq!(l.iter().collect::<String>(), "abcde");

    let at_a = l.search(&'a').cursor();
    assert_eq!(l.erase(&'a'), Ok('a'));
    assert_eq!(l.insert_before('z', at_a), Err(InvalidPosition));
    assert_eq!(l.len(), 4);
}

#[test]
fn cloned_list_matches_source_after_erase() {
    let mut l: LinkedList<u32> = (0..8).collect();
    l.erase(&0).unwrap();
    l.erase(&5).unwrap();
    let mut copy = l.clone();
    assert_eq!(copy, l);
    copy.append(99);
    assert_eq!(copy.len(), l.len() + 1);
    assert_eq!(copy.back(), Some(&99));
    assert_eq!(l.back(), Some(&7));
}
