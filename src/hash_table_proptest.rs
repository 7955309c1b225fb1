#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check the
// internal chain invariants after every operation.

use crate::error::{InsertError, KeyNotFound};
use crate::hash::{DefaultHash, KeyHash};
use crate::hash_table::{Handle, HashTable};
use hashbrown::HashMap;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::BTreeSet;

// Pool-indexed operations: indices shrink toward earlier keys, the pool
// shrinks, and the op list shrinks in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    GetOrDefault(usize, i32),
    Remove(usize),
    RemoveHandle(usize),
    Find(usize),
    At(String),
    Mutate(usize, i32),
    Iterate,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=10).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let probe = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::GetOrDefault(i, d)),
            2 => idx.clone().prop_map(Op::Remove),
            1 => idx.clone().prop_map(Op::RemoveHandle),
            2 => idx.clone().prop_map(Op::Find),
            1 => prop_oneof![probe, "[a-z]{0,4}"].prop_map(Op::At),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => Just(Op::Iterate),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn missing_handle() -> TestCaseError {
    TestCaseError::fail("live handle should resolve")
}

// State-machine equivalence against hashbrown::HashMap. After every op:
// - duplicate inserts fail exactly when the model has the key;
// - find/at/get agree with the model; tracked handles stay stable;
// - iteration yields each entry once and covers the model;
// - stale handles never resolve;
// - len/is_empty match and every chain is internally consistent.
fn run<H>(mut sut: HashTable<String, i32, H>, pool: &[String], ops: Vec<Op>) -> Result<(), TestCaseError>
where
    H: KeyHash<String> + KeyHash<str>,
{
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut live: HashMap<String, Handle> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                let already = model.contains_key(&k);
                match sut.insert(k.clone(), v) {
                    Ok(h) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        prop_assert_eq!(h.bucket(), sut.bucket_of(k.as_str()));
                        live.insert(k.clone(), h);
                        model.insert(k, v);
                    }
                    Err(InsertError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                        prop_assert_eq!(sut.get(k.as_str()), model.get(&k));
                    }
                }
            }
            Op::GetOrDefault(i, d) => {
                let k = pool[i].clone();
                let before = sut.len();
                let already = model.contains_key(&k);
                let v = sut.get_or_insert_default(k.clone());
                prop_assert_eq!(*v, model.get(&k).copied().unwrap_or_default());
                *v = v.wrapping_add(d);
                let mv = model.entry(k.clone()).or_default();
                *mv = mv.wrapping_add(d);
                prop_assert_eq!(sut.len(), before + usize::from(!already));
                let h = sut.find(k.as_str()).ok_or_else(missing_handle)?;
                if already {
                    prop_assert_eq!(Some(&h), live.get(&k));
                } else {
                    live.insert(k, h);
                }
            }
            Op::Remove(i) => {
                let k = &pool[i];
                let got = sut.remove(k.as_str());
                prop_assert_eq!(got, model.remove(k));
                if let Some(h) = live.remove(k) {
                    stale.push(h);
                }
            }
            Op::RemoveHandle(i) => {
                let k = &pool[i];
                match live.remove(k) {
                    Some(h) => {
                        let (kk, vv) = sut.remove_handle(h).ok_or_else(missing_handle)?;
                        prop_assert_eq!(&kk, k);
                        prop_assert_eq!(Some(vv), model.remove(k));
                        stale.push(h);
                    }
                    None => {
                        prop_assert!(sut.find(k.as_str()).is_none());
                    }
                }
            }
            Op::Find(i) => {
                let k = &pool[i];
                let found = sut.find(k.as_str());
                prop_assert_eq!(found.is_some(), model.contains_key(k));
                if let Some(h) = found {
                    prop_assert_eq!(Some(&h), live.get(k));
                    prop_assert_eq!(h.value(&sut), model.get(k));
                }
            }
            Op::At(s) => match sut.at(s.as_str()) {
                Ok(v) => {
                    prop_assert_eq!(Some(v), model.get(&s));
                }
                Err(KeyNotFound) => {
                    prop_assert!(!model.contains_key(&s));
                }
            },
            Op::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(&h) = live.get(k) {
                    let vr = h.value_mut(&mut sut).ok_or_else(missing_handle)?;
                    *vr = vr.wrapping_add(d);
                    if let Some(mv) = model.get_mut(k) {
                        *mv = mv.wrapping_add(d);
                    }
                }
            }
            Op::Iterate => {
                let it = sut.iter();
                prop_assert_eq!(it.len(), model.len());
                let mut seen = BTreeSet::new();
                for (k, v) in it {
                    prop_assert!(seen.insert(k.clone()), "entry visited twice");
                    prop_assert_eq!(Some(v), model.get(k));
                }
                prop_assert_eq!(seen.len(), model.len());
            }
            Op::Clear => {
                sut.clear();
                model.clear();
                stale.extend(live.drain().map(|(_, h)| h));
            }
        }

        for h in &stale {
            prop_assert!(h.value(&sut).is_none(), "stale handle resolved");
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        sut.assert_consistent();
    }
    Ok(())
}

// Puts every key in bucket 0 to stress chain handling.
#[derive(Clone, Copy, Debug, Default)]
struct ConstHash;

impl<K: ?Sized> KeyHash<K> for ConstHash {
    fn hash(&self, _key: &K) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(HashTable::new(), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run(HashTable::with_hasher(ConstHash), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_any_capacity((pool, ops) in arb_scenario(), cap in 0usize..300) {
        run(HashTable::with_capacity_and_hasher(cap, DefaultHash), &pool, ops)?;
    }
}
