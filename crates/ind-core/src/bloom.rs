//! Type-specialized Bloom filters over [`BitSet`].
//!
//! Two variants exist, matching the column type trichotomy: integer
//! columns get a single-hash filter that indexes by the value itself,
//! everything else gets a k-hash filter driven by an FNV-1a cascade.
//! Neither filter ever reports a false negative, which is what makes
//! [`BloomFilter::subset_of`] a sound pruning predicate: if column `a` is
//! contained in column `b`, every bit of `a`'s filter is set in `b`'s.

use crate::bitset::BitSet;
use crate::types::DataType;

/// Default filter width in bits.
pub const DEFAULT_BITS: usize = 1_000_000;

/// Default number of indexes drawn from the hash cascade for text filters.
pub const DEFAULT_HASHES: u32 = 4;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// One round of FNV-1a over `data`, continuing from `hash`.
fn fnv1a(mut hash: u64, data: &[u8]) -> u64 {
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// The `k` filter indexes for one value: a single FNV-1a accumulator
/// absorbs `bytes` once per index, never resetting, and each digest is
/// reduced modulo `m`. The cascade is part of the filter's identity; two
/// filters built from the same values are bit-identical.
fn cascade(bytes: &[u8], m: u64, k: u32) -> impl Iterator<Item = usize> + '_ {
    let mut hash = FNV_OFFSET_BASIS;
    (0..k).map(move |_| {
        hash = fnv1a(hash, bytes);
        (hash % m) as usize
    })
}

/// Membership sketch for integer columns.
///
/// The raw field is parsed as `i64` and reduced modulo the filter width;
/// a field that fails to parse maps to the `i64::MAX` sentinel, so all
/// unparseable values collide into one bit instead of being dropped.
#[derive(Debug, Clone)]
pub struct IntFilter {
    bits: BitSet,
}

impl IntFilter {
    /// Create a filter of `m` bits.
    pub fn new(m: usize) -> Self {
        Self { bits: BitSet::new(m) }
    }

    fn index(&self, value: &str) -> usize {
        let number = value.parse::<i64>().unwrap_or(i64::MAX);
        // Negative values wrap through the u64 cast and land on a stable bit.
        (number as u64 % self.bits.width() as u64) as usize
    }

    /// Record one raw field.
    pub fn record(&mut self, value: &str) {
        let index = self.index(value);
        self.bits.set(index);
    }

    /// Membership test; may report false positives, never false negatives.
    pub fn contains(&self, value: &str) -> bool {
        self.bits.test(self.index(value))
    }

    /// `true` if every bit set here is also set in `other`.
    pub fn subset_of(&self, other: &IntFilter) -> bool {
        self.bits.is_subset_of(&other.bits)
    }

    /// Number of set bits.
    pub fn bit_count(&self) -> usize {
        self.bits.count()
    }
}

/// Membership sketch for float and string columns, indexed by the
/// non-resetting FNV-1a [`cascade`].
#[derive(Debug, Clone)]
pub struct TextFilter {
    bits: BitSet,
    hashes: u32,
}

impl TextFilter {
    /// Create a filter of `m` bits drawing `k` indexes per value.
    pub fn new(m: usize, k: u32) -> Self {
        Self { bits: BitSet::new(m), hashes: k }
    }

    /// Record one raw field.
    pub fn record(&mut self, value: &str) {
        let m = self.bits.width() as u64;
        for index in cascade(value.as_bytes(), m, self.hashes) {
            self.bits.set(index);
        }
    }

    /// Membership test; may report false positives, never false negatives.
    pub fn contains(&self, value: &str) -> bool {
        let m = self.bits.width() as u64;
        cascade(value.as_bytes(), m, self.hashes).all(|index| self.bits.test(index))
    }

    /// `true` if every bit set here is also set in `other`.
    pub fn subset_of(&self, other: &TextFilter) -> bool {
        self.bits.is_subset_of(&other.bits)
    }

    /// Number of set bits.
    pub fn bit_count(&self) -> usize {
        self.bits.count()
    }
}

/// A column's Bloom filter, tagged by the variant its type selected.
#[derive(Debug, Clone)]
pub enum BloomFilter {
    /// Single-hash integer filter.
    Int(IntFilter),
    /// FNV-cascade filter for float and string columns.
    Text(TextFilter),
}

impl BloomFilter {
    /// Allocate the filter variant matching `data_type`, at the default
    /// width (and hash count, for the text variant).
    pub fn for_type(data_type: DataType) -> Self {
        match data_type {
            DataType::Int => BloomFilter::Int(IntFilter::new(DEFAULT_BITS)),
            DataType::Float | DataType::Text => {
                BloomFilter::Text(TextFilter::new(DEFAULT_BITS, DEFAULT_HASHES))
            }
        }
    }

    /// Record one raw field.
    pub fn record(&mut self, value: &str) {
        match self {
            BloomFilter::Int(filter) => filter.record(value),
            BloomFilter::Text(filter) => filter.record(value),
        }
    }

    /// Membership test for a single value.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            BloomFilter::Int(filter) => filter.contains(value),
            BloomFilter::Text(filter) => filter.contains(value),
        }
    }

    /// Membership test for every value in `values`.
    pub fn contains_all<I>(&self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        values.into_iter().all(|v| self.contains(v.as_ref()))
    }

    /// Bit-wise subsumption. Filters of different variants are never
    /// comparable; callers are expected to have matched the column types
    /// first, so a variant mismatch is simply `false`.
    pub fn subset_of(&self, other: &BloomFilter) -> bool {
        match (self, other) {
            (BloomFilter::Int(a), BloomFilter::Int(b)) => a.subset_of(b),
            (BloomFilter::Text(a), BloomFilter::Text(b)) => a.subset_of(b),
            _ => false,
        }
    }

    /// Number of set bits.
    pub fn bit_count(&self) -> usize {
        match self {
            BloomFilter::Int(filter) => filter.bit_count(),
            BloomFilter::Text(filter) => filter.bit_count(),
        }
    }
}
