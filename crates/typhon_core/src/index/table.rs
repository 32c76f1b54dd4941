//! # Open-Addressing Index Table
//!
//! A generic map from a fixed-size key to a single owned value slot, with
//! linear probing and tombstone deletion. The registry uses one of these to
//! index component pools by type id; the table itself knows nothing about
//! pools and works for any `Pod` key.
//!
//! ## Bucket states
//!
//! A bucket is in one of three states, tracked through its key bytes:
//!
//! - **empty**: the key bytes are all zero (the state every bucket starts in)
//! - **tombstone**: the key equals the caller-chosen tombstone sentinel
//! - **occupied**: anything else
//!
//! Consequently the all-zero key pattern and the tombstone are not valid
//! keys; callers pick a tombstone no real key can equal.
//!
//! ## Probing
//!
//! All operations probe linearly from `hash(key) % bucket_count`, wrapping
//! at the end, and give up after a full wrap. Lookups pass *through*
//! tombstones, advancing the index exactly as for a non-matching occupied
//! bucket; an empty bucket terminates the probe. Insertion claims the first
//! empty or tombstone bucket encountered before the key is matched.
//!
//! The table never grows on its own: insertion into a saturated table is an
//! error, and callers resize proactively (the registry layers a load-factor
//! policy on top).

use bytemuck::Pod;

use crate::error::EcsError;

/// Pluggable hash capability: full-width digest of a key.
pub type KeyHashFn<K> = fn(&K) -> u64;

/// Pluggable equality capability.
pub type KeyEqFn<K> = fn(&K, &K) -> bool;

/// One bucket: a key region plus an owned value slot.
struct Bucket<K, V> {
    key: K,
    value: Option<V>,
}

/// Checks for the all-zero byte pattern marking an empty bucket.
#[inline]
fn key_is_zero<K: Pod>(key: &K) -> bool {
    bytemuck::bytes_of(key).iter().all(|&byte| byte == 0)
}

/// Generic open-addressing map from a fixed-size key to one owned value.
///
/// Hash and equality are supplied at creation as plain function pointers,
/// so one table type serves keys that hash by content and keys (like
/// numeric ids) that hash by value.
///
/// # Example
///
/// ```rust,ignore
/// let mut table: IndexTable<[u8; 8], u32> =
///     IndexTable::new(hash_bytes, eq_bytes, 11, [0xff; 8])?;
/// table.insert(*b"position", 7)?;
/// assert_eq!(table.find(b"position"), Some(&7));
/// ```
pub struct IndexTable<K: Pod, V> {
    /// The bucket array, allocated once per (re)size.
    buckets: Box<[Bucket<K, V>]>,
    /// Number of occupied buckets.
    len: usize,
    /// Hash capability.
    hash_fn: KeyHashFn<K>,
    /// Equality capability.
    eq_fn: KeyEqFn<K>,
    /// Deleted-bucket sentinel; never a valid key.
    tombstone: K,
}

impl<K: Pod, V> IndexTable<K, V> {
    /// Creates a table with `bucket_count` empty buckets.
    ///
    /// # Errors
    ///
    /// [`EcsError::ZeroBuckets`] for an empty table,
    /// [`EcsError::InvalidTombstone`] if the tombstone's byte pattern is
    /// all zero (it would be indistinguishable from an empty bucket).
    pub fn new(
        hash_fn: KeyHashFn<K>,
        eq_fn: KeyEqFn<K>,
        bucket_count: usize,
        tombstone: K,
    ) -> Result<Self, EcsError> {
        if bucket_count == 0 {
            return Err(EcsError::ZeroBuckets);
        }
        if key_is_zero(&tombstone) {
            return Err(EcsError::InvalidTombstone);
        }
        Ok(Self {
            buckets: Self::make_buckets(bucket_count),
            len: 0,
            hash_fn,
            eq_fn,
            tombstone,
        })
    }

    /// Allocates a fresh all-empty bucket array.
    fn make_buckets(bucket_count: usize) -> Box<[Bucket<K, V>]> {
        (0..bucket_count)
            .map(|_| Bucket {
                key: K::zeroed(),
                value: None,
            })
            .collect::<Vec<_>>()
            .into_boxed_slice()
    }

    /// Number of occupied buckets.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks whether no bucket is occupied.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total bucket count.
    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Occupied fraction of the bucket array.
    #[inline]
    #[must_use]
    pub fn load_factor(&self) -> f32 {
        self.len as f32 / self.buckets.len() as f32
    }

    #[inline]
    fn is_tombstone(&self, key: &K) -> bool {
        (self.eq_fn)(key, &self.tombstone)
    }

    /// Probes for a reusable bucket, failing on a duplicate key or a full
    /// wrap. Claims the first empty or tombstone bucket on the chain.
    fn claim(&mut self, key: K) -> Result<usize, EcsError> {
        let count = self.buckets.len();
        let mut index = ((self.hash_fn)(&key) % count as u64) as usize;
        let origin = index;
        loop {
            tracing::trace!("claim probe @ {}", index);
            let occupant = self.buckets[index].key;
            if key_is_zero(&occupant) || self.is_tombstone(&occupant) {
                return Ok(index);
            }
            if (self.eq_fn)(&occupant, &key) {
                return Err(EcsError::DuplicateKey);
            }
            index = (index + 1) % count;
            if index == origin {
                return Err(EcsError::TableFull { buckets: count });
            }
        }
    }

    /// Probes to the occupied bucket holding `key`.
    ///
    /// Tombstones are passed through with the index advancing; an empty
    /// bucket or a full wrap ends the probe.
    fn locate(&self, key: &K) -> Option<usize> {
        let count = self.buckets.len();
        let mut index = ((self.hash_fn)(key) % count as u64) as usize;
        let origin = index;
        loop {
            let occupant = &self.buckets[index].key;
            if key_is_zero(occupant) {
                return None;
            }
            if !self.is_tombstone(occupant) && (self.eq_fn)(occupant, key) {
                return Some(index);
            }
            index = (index + 1) % count;
            if index == origin {
                return None;
            }
        }
    }

    /// Claims a bucket for `key` and returns its freshly defaulted value
    /// slot for caller initialization.
    ///
    /// # Errors
    ///
    /// [`EcsError::DuplicateKey`] if the key is already present (existing
    /// entries are never overwritten), [`EcsError::TableFull`] once the
    /// probe wraps without finding a reusable bucket.
    pub fn emplace(&mut self, key: K) -> Result<&mut V, EcsError>
    where
        V: Default,
    {
        let index = self.claim(key)?;
        let bucket = &mut self.buckets[index];
        bucket.key = key;
        self.len += 1;
        Ok(bucket.value.insert(V::default()))
    }

    /// Inserts `value` under `key`.
    ///
    /// # Errors
    ///
    /// Same failure contract as [`IndexTable::emplace`].
    pub fn insert(&mut self, key: K, value: V) -> Result<(), EcsError> {
        let index = self.claim(key)?;
        let bucket = &mut self.buckets[index];
        bucket.key = key;
        bucket.value = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn find(&self, key: &K) -> Option<&V> {
        let index = self.locate(key)?;
        self.buckets[index].value.as_ref()
    }

    /// Looks up the value stored under `key`, mutably.
    #[must_use]
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.locate(key)?;
        self.buckets[index].value.as_mut()
    }

    /// Checks for the presence of `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// Removes `key`, returning the value it held.
    ///
    /// The bucket's key is overwritten with the tombstone sentinel so probe
    /// chains for other keys keep passing through it. Returns `None` on a
    /// miss; nothing is modified in that case.
    pub fn erase(&mut self, key: &K) -> Option<V> {
        let index = self.locate(key)?;
        let bucket = &mut self.buckets[index];
        bucket.key = self.tombstone;
        self.len -= 1;
        bucket.value.take()
    }

    /// Rehashes into `new_bucket_count` buckets.
    ///
    /// No-op unless strictly larger than the current count. Every occupied
    /// entry is re-inserted; tombstones are dropped, so a resize also
    /// compacts probe chains.
    pub fn resize(&mut self, new_bucket_count: usize) {
        if new_bucket_count <= self.buckets.len() {
            return;
        }
        tracing::debug!(
            "rehash: {} -> {} buckets ({} occupied)",
            self.buckets.len(),
            new_bucket_count,
            self.len
        );
        let old = std::mem::replace(&mut self.buckets, Self::make_buckets(new_bucket_count));
        self.len = 0;
        let eq_fn = self.eq_fn;
        let tombstone = self.tombstone;
        for bucket in old.into_vec() {
            if key_is_zero(&bucket.key) || eq_fn(&bucket.key, &tombstone) {
                continue;
            }
            if let Some(value) = bucket.value {
                if self.insert(bucket.key, value).is_err() {
                    // The new table is strictly larger and the old one held
                    // no duplicates, so re-insertion cannot fail.
                    unreachable!("rehash re-insertion failed");
                }
            }
        }
    }

    /// Iterates over occupied buckets in storage order, skipping empty and
    /// tombstone buckets.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .filter_map(|bucket| bucket.value.as_ref().map(|value| (&bucket.key, value)))
    }
}
