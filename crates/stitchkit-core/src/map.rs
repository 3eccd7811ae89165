//! Value-keyed map.
//!
//! Stitches are plain value records without an identity field, so two
//! independently constructed stitches with identical fields must resolve to
//! the same entry. `ObjectedMap` hashes keys structurally into a power-of-two
//! bucket table and resolves collisions with an equality scan inside the
//! bucket. The table doubles once the load factor exceeds
//! [`MAX_LOAD_FACTOR`], rehashing every entry.
//!
//! Iteration walks buckets in index order. The order is stable for as long
//! as the map is not resized or mutated, but it is not insertion order.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use smallvec::SmallVec;
use tracing::trace;

/// Bucket count of an empty map.
pub const INITIAL_BUCKETS: usize = 16;

/// Entries per bucket above which the table doubles.
pub const MAX_LOAD_FACTOR: f64 = 0.75;

type Bucket<K, V> = SmallVec<[(K, V); 2]>;

/// A hash map keyed by structural equality with explicit bucket management.
#[derive(Clone)]
pub struct ObjectedMap<K, V, S = RandomState> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    hasher: S,
}

impl<K, V> ObjectedMap<K, V, RandomState> {
    /// Creates an empty map with [`INITIAL_BUCKETS`] buckets.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Creates an empty map sized to hold `capacity` entries without resizing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K: Hash + Eq, V: Default> ObjectedMap<K, V, RandomState> {
    /// Builds a map from `keys`, every value set to `V::default()`.
    ///
    /// Buckets are pre-sized for the whole key set so loading a large pattern
    /// never triggers intermediate resizes.
    pub fn with_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let keys = keys.into_iter();
        let (lower, upper) = keys.size_hint();
        let mut map = Self::with_capacity(upper.unwrap_or(lower));
        for key in keys {
            map.insert(key, V::default());
        }
        map
    }
}

impl<K, V, S> ObjectedMap<K, V, S> {
    /// Creates an empty map using `hasher` for structural hashing.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    /// Creates an empty map sized for `capacity` entries using `hasher`.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let buckets = buckets_for(capacity);
        Self {
            buckets: (0..buckets).map(|_| Bucket::new()).collect(),
            len: 0,
            hasher,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets (always a power of two).
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Removes every entry. The bucket table keeps its size.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Removes and returns every entry, leaving the map empty.
    pub fn extract(&mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.len);
        for bucket in &mut self.buckets {
            entries.extend(bucket.drain(..));
        }
        self.len = 0;
        entries
    }

    /// Iterates over `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: [].iter(),
            remaining: self.len,
        }
    }

    /// Iterates over `(key, value)` pairs with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> + '_ {
        self.buckets
            .iter_mut()
            .flat_map(|bucket| bucket.iter_mut().map(|(k, v)| (&*k, v)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.iter_mut().map(|(_, v)| v)
    }
}

impl<K, V, S> ObjectedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hasher.hash_one(key) as usize) & (self.buckets.len() - 1)
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        if let Some((_, existing)) = self.buckets[index].iter_mut().find(|(k, _)| *k == key) {
            return Some(mem::replace(existing, value));
        }

        self.buckets[index].push((key, value));
        self.len += 1;
        if self.load_factor() > MAX_LOAD_FACTOR {
            self.grow();
        }
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(k, v)| (k, v))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| (*k).borrow() == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).is_some()
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value if present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|(k, _)| k.borrow() == key)?;
        self.len -= 1;
        Some(bucket.swap_remove(position))
    }

    fn grow(&mut self) {
        let new_count = self.buckets.len() * 2;
        trace!(
            "Resizing objected map from {} to {} buckets ({} entries)",
            self.buckets.len(),
            new_count,
            self.len
        );

        let old = mem::replace(
            &mut self.buckets,
            (0..new_count).map(|_| Bucket::new()).collect(),
        );
        for (key, value) in old.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }
    }
}

fn buckets_for(capacity: usize) -> usize {
    let needed = (capacity as f64 / MAX_LOAD_FACTOR).ceil() as usize;
    needed.max(INITIAL_BUCKETS).next_power_of_two()
}

impl<K, V> Default for ObjectedMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ObjectedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for ObjectedMap<K, V, RandomState> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for ObjectedMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ObjectedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for ObjectedMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(mut self) -> Self::IntoIter {
        self.extract().into_iter()
    }
}

/// Borrowing iterator over the entries of an [`ObjectedMap`].
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Bucket<K, V>>,
    current: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.current.next() {
                self.remaining -= 1;
                return Some((k, v));
            }
            self.current = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
