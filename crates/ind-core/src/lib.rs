//! # ind-core
//!
//! Column-level primitives for unary inclusion-dependency discovery:
//! a fixed-width [`BitSet`], type-specialized Bloom filters, running
//! per-column [`Statistics`], and the [`DataType`] trichotomy that picks
//! between them.
//!
//! The sketches are built for one purpose: deciding cheaply whether the
//! value set of one column *could* be contained in another's. Both the
//! statistics predicate ([`Statistics::fits_within`]) and the filter
//! predicate ([`BloomFilter::subset_of`]) are necessary conditions for
//! containment, so pruning with them never loses a true inclusion.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitset;
pub mod bloom;
pub mod error;
pub mod stats;
pub mod types;

pub use bitset::BitSet;
pub use bloom::{BloomFilter, DEFAULT_BITS, DEFAULT_HASHES, IntFilter, TextFilter};
pub use error::{Error, Result};
pub use stats::{IntStatistics, Statistics, TextStatistics};
pub use types::DataType;
