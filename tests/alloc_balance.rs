// Every byte a table allocates is released when it drops, and empty buckets
// cost no allocation. Counting is per thread so the test harness allocating
// elsewhere does not interfere.

use chained_hashtable::{HashTable, LinkedList};
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

struct CountingAllocator;

thread_local! {
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

fn track(delta: isize) {
    let _ = LIVE_BYTES.try_with(|live| live.set(live.get() + delta));
}

fn count_allocation() {
    let _ = ALLOCATIONS.try_with(|n| n.set(n.get() + 1));
}

fn allocations() -> usize {
    ALLOCATIONS.with(Cell::get)
}

fn live_bytes() -> isize {
    LIVE_BYTES.with(Cell::get)
}

// SAFETY: every call delegates to `System`; the counter is a plain
// thread-local cell with a const initializer, so updating it never
// allocates.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            count_allocation();
            track(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        track(-(layout.size() as isize));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            track(new_size as isize - layout.size() as isize);
        }
        new_ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            count_allocation();
            track(layout.size() as isize);
        }
        ptr
    }
}

#[global_allocator]
static GLOBAL_ALLOC: CountingAllocator = CountingAllocator;

#[test]
fn tables_and_lists_release_everything_they_allocate() {
    let before = live_bytes();
    {
        let mut t: HashTable<String, Vec<u32>> = HashTable::with_capacity(100);
        for i in 0..1_000u32 {
            t.insert(format!("key{i}"), vec![i; 4]).unwrap();
        }
        assert!(live_bytes() > before, "population should allocate");

        for i in (0..1_000u32).step_by(3) {
            assert!(t.remove(format!("key{i}").as_str()).is_some());
        }
        *t.get_or_insert_default("fresh".to_string()) = vec![1, 2, 3];

        let mut l: LinkedList<String> = (0..200).map(|i| i.to_string()).collect();
        for i in 0..50 {
            assert!(l.erase(&(i * 2).to_string()).is_ok());
        }
        l.push_front("head".to_string());
    }
    assert_eq!(live_bytes(), before, "every allocation must be released on drop");
}

#[test]
fn empty_buckets_do_not_allocate() {
    let before = allocations();
    let mut t: HashTable<u64, u64> = HashTable::with_capacity(4_096);
    assert_eq!(allocations() - before, 1, "only the bucket array is allocated");

    let before = allocations();
    assert_eq!(t.iter_mut().count(), 0);
    assert_eq!(t.values_mut().count(), 0);
    t.clear();
    assert_eq!(allocations(), before, "walking empty buckets allocates nothing");

    t.insert(1, 1).unwrap();
    let before = allocations();
    for v in t.values_mut() {
        *v += 1;
    }
    assert_eq!(allocations() - before, 1, "one side table for the one non-empty bucket");
    assert_eq!(t.get(&1), Some(&2));
}
