// ChainedMap unit test suite (public API only).
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Size: len() equals the number of distinct keys and the number of
//   entries a full iteration yields.
// - Overwrite: put on an existing key replaces the value in place.
// - Resize: the load check runs before insertion; the grown table holds
//   every previous entry.
// - Null key: `None` keys live in their own reserved slot and are never
//   removed by `remove`.
// - Iteration: empty maps report no next entry; exhaustion is an error
//   from `try_next`.
use chained_hashmap::{
    ArrayMap, Bucket, ChainedMap, Config, ConfigError, DefaultFactory, Error, MapKey,
};
use std::borrow::Borrow;
use std::collections::vec_deque;
use std::collections::VecDeque;
use std::hash::{BuildHasher, Hasher};

// Hashes integers to themselves so slots are predictable.
#[derive(Clone, Copy, Default)]
struct IdentityBuildHasher;
struct IdentityHasher(u64);
impl BuildHasher for IdentityBuildHasher {
    type Hasher = IdentityHasher;
    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}
impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }
    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

// Every key hashes to the same slot.
#[derive(Clone, Copy, Default)]
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

type IdentityMap<V> =
    ChainedMap<u64, V, ArrayMap<u64, V>, DefaultFactory<ArrayMap<u64, V>>, IdentityBuildHasher>;

// Test: threshold 1.0, 2 slots, buckets of 2.
// Assumes: keys 0 and 2 share slot 0 under the identity hash.
// Verifies: the third put sees 2/2 >= 1.0, doubles to 4 slots first, and
// every key is retrievable afterwards.
#[test]
fn third_insert_resizes_to_four_slots() {
    let mut m: IdentityMap<&str> = ChainedMap::builder()
        .resize_threshold(1.0)
        .initial_slot_count(2)
        .bucket_initial_capacity(2)
        .with_hasher(IdentityBuildHasher)
        .build()
        .expect("valid config");

    m.put(0, "a");
    m.put(2, "b");
    assert_eq!(m.slot_count(), 2);
    assert_eq!(m.load_factor(), 1.0);

    m.put(1, "c");
    assert_eq!(m.slot_count(), 4);
    assert_eq!(m.len(), 3);
    assert_eq!(m.get(&0), Some(&"a"));
    assert_eq!(m.get(&2), Some(&"b"));
    assert_eq!(m.get(&1), Some(&"c"));
}

// Test: null key round trip.
// Verifies: put(None) / get(None) / contains_key(None) work like any key;
// remove(None) returns None and keeps the entry.
#[test]
fn null_key_round_trip() {
    let mut m: ChainedMap<Option<&str>, &str> = ChainedMap::new();
    assert_eq!(m.put(None, "x"), None);
    assert_eq!(m.get(&None), Some(&"x"));
    assert!(m.contains_key(&None));
    assert_eq!(m.put(None, "y"), Some("x"));
    assert_eq!(m.len(), 1);

    m.put(Some("k"), "v");
    assert_eq!(m.remove(&None), None);
    assert_eq!(m.len(), 2);
    assert_eq!(m.get(&None), Some(&"y"));
    assert_eq!(m.remove(&Some("k")), Some("v"));
    assert_eq!(m.len(), 1);
}

// Test: empty iteration.
// Verifies: has_next is false immediately; try_next reports Exhausted.
#[test]
fn empty_map_iterates_nothing() {
    let m: ChainedMap<u32, u32> = ChainedMap::new();
    let mut it = m.iter();
    assert!(!it.has_next());
    assert_eq!(it.len(), 0);
    assert_eq!(it.try_next(), Err(Error::Exhausted));
    assert_eq!(m.iter().count(), 0);
}

// Test: exhausting a populated iterator.
// Verifies: try_next walks every entry, then fails with Exhausted.
#[test]
fn try_next_exhausts_after_last_entry() {
    let m: ChainedMap<u32, u32> = (0..3).map(|k| (k, k * 2)).collect();
    let mut it = m.iter();
    let mut seen = Vec::new();
    while it.has_next() {
        let (k, v) = it.try_next().expect("has_next promised an entry");
        seen.push((*k, *v));
    }
    seen.sort();
    assert_eq!(seen, vec![(0, 0), (1, 2), (2, 4)]);
    assert_eq!(it.try_next(), Err(Error::Exhausted));
    assert_eq!(it.try_next(), Err(Error::Exhausted));
}

// Test: overwrite semantics.
// Verifies: the second put returns the first value; len is unchanged.
#[test]
fn overwrite_returns_previous_value() {
    let mut m: ChainedMap<String, i32> = ChainedMap::new();
    assert_eq!(m.put("k".to_string(), 1), None);
    assert_eq!(m.put("k".to_string(), 2), Some(1));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("k"), Some(&2));
}

// Test: absent removal.
// Verifies: remove of a missing key returns None and leaves len alone,
// both for a never-touched slot and for a populated one.
#[test]
fn remove_absent_key_is_noop() {
    let mut m: IdentityMap<i32> = ChainedMap::builder()
        .initial_slot_count(4)
        .with_hasher(IdentityBuildHasher)
        .build()
        .expect("valid config");
    m.put(1, 10);
    assert_eq!(m.remove(&2), None);
    assert_eq!(m.remove(&5), None, "same slot as 1, different key");
    assert_eq!(m.len(), 1);
    assert_eq!(m.remove(&1), Some(10));
    assert_eq!(m.remove(&1), None);
    assert!(m.is_empty());
}

// Test: clear.
// Verifies: len is 0, iteration is empty, and the map stays usable.
#[test]
fn clear_empties_map() {
    let mut m: ChainedMap<u32, u32> = ChainedMap::new();
    m.extend((0..50).map(|k| (k, k)));
    assert_eq!(m.len(), 50);
    let slots = m.slot_count();
    m.clear();
    assert_eq!(m.len(), 0);
    assert!(m.is_empty());
    assert_eq!(m.iter().count(), 0);
    assert_eq!(m.slot_count(), slots);
    m.put(7, 7);
    assert_eq!(m.get(&7), Some(&7));
}

// Test: growth under many insertions.
// Verifies: every key survives repeated resizes; the slot count is the
// initial 5 doubled (5 -> 1280 for 1000 keys at threshold 1.0).
#[test]
fn many_inserts_survive_resizes() {
    let mut m: ChainedMap<u64, u64> = ChainedMap::new();
    for k in 0..1_000u64 {
        m.put(k, k * k);
    }
    assert_eq!(m.len(), 1_000);
    assert_eq!(m.slot_count(), 1_280);
    for k in 0..1_000u64 {
        assert_eq!(m.get(&k), Some(&(k * k)));
    }
    assert_eq!(m.iter().count(), 1_000);
}

// Test: invalid configuration.
// Verifies: each non-positive parameter is rejected with its own variant.
#[test]
fn invalid_config_is_rejected() {
    let err = ChainedMap::<u8, u8>::with_config(Config::default().with_resize_threshold(-1.0));
    assert!(matches!(
        err,
        Err(Error::InvalidConfig(ConfigError::ResizeThreshold(_)))
    ));
    let err = ChainedMap::<u8, u8>::with_params(1.0, 0, 3);
    assert!(matches!(
        err,
        Err(Error::InvalidConfig(ConfigError::InitialSlotCount))
    ));
    let err = ChainedMap::<u8, u8>::builder().bucket_initial_capacity(0).build();
    assert!(matches!(
        err,
        Err(Error::InvalidConfig(ConfigError::BucketInitialCapacity))
    ));
}

// Test: standard traits.
// Verifies: FromIterator, Eq across different insertion histories, Keys
// and Values, and owned iteration.
#[test]
fn collection_traits() {
    let a: ChainedMap<u32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
    let mut b: ChainedMap<u32, char> = ChainedMap::with_params(0.5, 1, 1).expect("valid");
    b.put(3, 'c');
    b.put(1, 'z');
    b.put(2, 'b');
    assert_ne!(a, b);
    b.put(1, 'a');
    assert_eq!(a, b);

    let mut keys: Vec<u32> = a.keys().copied().collect();
    keys.sort();
    assert_eq!(keys, vec![1, 2, 3]);
    let mut values: Vec<char> = a.values().copied().collect();
    values.sort();
    assert_eq!(values, vec!['a', 'b', 'c']);

    let mut by_ref = 0;
    for (_k, _v) in &a {
        by_ref += 1;
    }
    assert_eq!(by_ref, 3);

    let mut owned: Vec<(u32, char)> = b.into_iter().collect();
    owned.sort();
    assert_eq!(owned, vec![(1, 'a'), (2, 'b'), (3, 'c')]);
}

// Custom key type opting into MapKey with the default (never null).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct UserId(u32);
impl MapKey for UserId {}

#[test]
fn custom_key_type() {
    let mut m: ChainedMap<UserId, &str> = ChainedMap::new();
    m.put(UserId(7), "seven");
    assert_eq!(m.get(&UserId(7)), Some(&"seven"));
    assert_eq!(m.remove(&UserId(7)), Some("seven"));
    assert!(m.is_empty());
}

// Bucket that keeps the newest entry first, to show iteration follows the
// bucket's own order.
struct FrontBucket<K, V>(VecDeque<(K, V)>);

struct FrontIter<'a, K, V>(vec_deque::Iter<'a, (K, V)>);

impl<'a, K, V> Iterator for FrontIter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k, v))
    }
}

impl<K, V> IntoIterator for FrontBucket<K, V> {
    type Item = (K, V);
    type IntoIter = vec_deque::IntoIter<(K, V)>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Eq, V> FrontBucket<K, V> {
    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.0.iter().position(|(k, _)| k.borrow() == key)
    }
}

impl<K: Eq, V> Bucket<K, V> for FrontBucket<K, V> {
    type Iter<'a>
        = FrontIter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn with_capacity(capacity: usize) -> Self {
        FrontBucket(VecDeque::with_capacity(capacity))
    }

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.position(key).map(|i| &self.0[i].1)
    }

    fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let i = self.position(key)?;
        Some(&mut self.0[i].1)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.0[i].1, value)),
            None => {
                self.0.push_front((key, value));
                None
            }
        }
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let i = self.position(key)?;
        self.0.remove(i).map(|(_, v)| v)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        FrontIter(self.0.iter())
    }
}

// Test: pluggable bucket via a factory closure.
// Assumes: the constant hasher puts every key into slot 0.
// Verifies: the factory's bucket type is used and iteration follows its
// order (newest first).
#[test]
fn custom_bucket_factory() {
    let mut m: ChainedMap<u32, &str, FrontBucket<u32, &str>, _, _> = ChainedMap::builder()
        .with_hasher(ConstBuildHasher)
        .with_bucket_factory(|cap: usize| FrontBucket(VecDeque::with_capacity(cap)))
        .build()
        .expect("valid config");
    m.put(1, "one");
    m.put(2, "two");
    m.put(3, "three");
    assert_eq!(m.slot_count(), 5);
    let keys: Vec<u32> = m.keys().copied().collect();
    assert_eq!(keys, vec![3, 2, 1]);
    assert_eq!(m.remove(&2), Some("two"));
    assert_eq!(m.len(), 2);
    assert_eq!(m.get(&1), Some(&"one"));
}

// Test: collecting into a map with a non-default hasher.
// Assumes: the identity hash places key k in slot k % slot_count.
// Verifies: FromIterator is available for any `S: BuildHasher + Default`
// and resizes like repeated puts.
#[test]
fn collect_into_custom_hasher_map() {
    let m: IdentityMap<char> = (0..6u64).zip("abcdef".chars()).collect();
    assert_eq!(m.len(), 6);
    assert_eq!(m.slot_count(), 10);
    assert_eq!(m.get(&5), Some(&'f'));
    let keys: Vec<u64> = m.keys().copied().collect();
    assert_eq!(keys, vec![0, 1, 2, 3, 4, 5]);
}
