#![cfg(test)]

// Property tests for ChainedMap kept inside the crate so they can inspect
// private slot state.

use crate::array_map::ArrayMap;
use crate::bucket::{Bucket, DefaultFactory};
use crate::chained_map::ChainedMap;
use crate::config::Config;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

type Key = Option<u8>;
type Map<S> = ChainedMap<Key, i32, ArrayMap<Key, i32>, DefaultFactory<ArrayMap<Key, i32>>, S>;

#[derive(Clone, Debug)]
enum Op {
    Put(Key, i32),
    Remove(Key),
    Get(Key),
    Contains(Key),
    Mutate(Key, i32),
    Clear,
    Iterate,
}

// `None` is the null key; small key space so puts overwrite often.
fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![1 => Just(None), 8 => (0u8..24).prop_map(Some)]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (arb_key(), any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
        3 => arb_key().prop_map(Op::Remove),
        2 => arb_key().prop_map(Op::Get),
        2 => arb_key().prop_map(Op::Contains),
        1 => (arb_key(), any::<i32>()).prop_map(|(k, d)| Op::Mutate(k, d)),
        1 => Just(Op::Iterate),
        1 => Just(Op::Clear),
    ]
}

fn arb_config() -> impl Strategy<Value = Config> {
    (
        prop_oneof![Just(0.25), Just(0.75), Just(1.0), Just(2.0)],
        1usize..6,
        1usize..4,
    )
        .prop_map(|(t, slots, cap)| Config::new(t, slots, cap))
}

fn build<S: BuildHasher>(config: Config, hasher: S) -> Map<S> {
    ChainedMap::builder()
        .config(config)
        .with_hasher(hasher)
        .build()
        .expect("generated configs are valid")
}

// Invariants exercised across random operation sequences:
// - `put`/`get`/`contains_key`/`remove` parity with the model, including
//   returned previous values.
// - `remove(&None)` is a no-op that returns `None`.
// - `iter` yields each live entry exactly once and agrees with `len`.
// - The null key, if stored, lives in slot 0.
// - Slot count never shrinks, stays `initial * 2^n`, and `clear` keeps it.
fn run_ops<S: BuildHasher>(
    mut sut: Map<S>,
    config: Config,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    let mut last_slots = sut.slot_count();

    for op in ops {
        match op {
            Op::Put(k, v) => {
                prop_assert_eq!(sut.put(k, v), model.insert(k, v));
            }
            Op::Remove(k) => {
                let got = sut.remove(&k);
                if k.is_none() {
                    prop_assert_eq!(got, None, "null key is never removed");
                } else {
                    prop_assert_eq!(got, model.remove(&k));
                }
            }
            Op::Get(k) => {
                prop_assert_eq!(sut.get(&k), model.get(&k));
            }
            Op::Contains(k) => {
                prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
            }
            Op::Mutate(k, d) => {
                if let Some(v) = sut.get_mut(&k) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(&k) {
                    *v = v.wrapping_add(d);
                }
            }
            Op::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.slot_count(), last_slots, "clear keeps the slot count");
            }
            Op::Iterate => {
                let mut seen: Vec<(Key, i32)> = sut.iter().map(|(k, v)| (*k, *v)).collect();
                let mut expected: Vec<(Key, i32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
                seen.sort();
                expected.sort();
                prop_assert_eq!(seen, expected);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.iter().count(), sut.len());
        let distinct: BTreeSet<Key> = sut.keys().copied().collect();
        prop_assert_eq!(distinct.len(), sut.len(), "keys are unique");

        let slots = sut.slot_count();
        prop_assert!(slots >= last_slots, "slot count never shrinks");
        prop_assert_eq!(slots % config.initial_slot_count, 0);
        prop_assert!((slots / config.initial_slot_count).is_power_of_two());
        last_slots = slots;

        if model.contains_key(&None) {
            prop_assert!(sut.slots_for_test()[0]
                .as_ref()
                .is_some_and(|b| b.contains_key(&None)));
        }
        prop_assert!(!sut.resizing_for_test());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(config in arb_config(), ops in proptest::collection::vec(arb_op(), 1..120)) {
        let sut = build(config, hashbrown::hash_map::DefaultHashBuilder::default());
        run_ops(sut, config, ops)?;
    }
}

// Collision variant using a constant hasher: every key shares one slot, so
// equality resolution inside the bucket carries the whole map.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions(config in arb_config(), ops in proptest::collection::vec(arb_op(), 1..120)) {
        let sut = build(config, ConstBuildHasher);
        run_ops(sut, config, ops)?;
    }
}

// Replaying into a grown table preserves contents exactly, whatever the
// insertion order and threshold.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_resize_preserves_entries(
        config in arb_config(),
        entries in proptest::collection::vec((0u8..200, any::<i32>()), 0..200),
    ) {
        let mut sut = build(config, hashbrown::hash_map::DefaultHashBuilder::default());
        let mut model: HashMap<Key, i32> = HashMap::new();
        for (k, v) in entries {
            sut.put(Some(k), v);
            model.insert(Some(k), v);
        }
        prop_assert_eq!(sut.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(sut.get(k), Some(v));
        }
        let owned: HashMap<Key, i32> = sut.into_iter().collect();
        prop_assert_eq!(owned, model);
    }
}
