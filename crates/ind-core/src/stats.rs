//! Running per-column statistics.
//!
//! Statistics are accumulated in a single pass during profiling and then
//! frozen with [`Statistics::finish`]. Their only downstream consumer is
//! [`Statistics::fits_within`], the cheap necessary condition used to
//! prune inclusion candidates: if every value of column `a` appears in
//! column `b`, then `a`'s extremes cannot lie outside `b`'s.

use std::fmt;

use crate::types::DataType;

/// Running statistics for an integer column.
///
/// Fields that fail to parse as `i64` are skipped entirely; the mean is
/// still taken over the full row count, matching the ingest contract.
#[derive(Debug, Clone)]
pub struct IntStatistics {
    /// Smallest value seen.
    pub minimum: i64,
    /// Largest value seen.
    pub maximum: i64,
    /// Sum of parsed values, accumulated during ingest.
    pub sum: f64,
    /// `sum / row_count`, set by `finish`.
    pub mean: f64,
}

impl IntStatistics {
    /// Fresh statistics with extremes at their identity values.
    pub fn new() -> Self {
        Self { minimum: i64::MAX, maximum: i64::MIN, sum: 0.0, mean: 0.0 }
    }

    /// Fold one raw field into the running state. Unparseable fields are
    /// silently skipped.
    pub fn record(&mut self, value: &str) {
        let Ok(value) = value.parse::<i64>() else {
            return;
        };
        if value < self.minimum {
            self.minimum = value;
        }
        if value > self.maximum {
            self.maximum = value;
        }
        self.sum += value as f64;
    }

    /// Freeze the mean over the table's row count.
    pub fn finish(&mut self, row_count: u64) {
        self.mean = self.sum / row_count as f64;
    }

    /// `true` if values described by `self` could all be contained in the
    /// column described by `other`.
    pub fn fits_within(&self, other: &IntStatistics) -> bool {
        self.minimum >= other.minimum && self.maximum <= other.maximum
    }
}

impl Default for IntStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IntStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min: {} | max: {} | avg: {}", self.minimum, self.maximum, self.mean)
    }
}

/// Running statistics for float and string columns, over the raw field
/// text.
///
/// The empty string doubles as the unset sentinel for all four extremes,
/// so an empty field never displaces a real extreme.
#[derive(Debug, Clone, Default)]
pub struct TextStatistics {
    /// Lexicographically smallest value seen.
    pub minimum: String,
    /// Lexicographically largest value seen.
    pub maximum: String,
    /// Shortest value seen (by byte length).
    pub shortest: String,
    /// Longest value seen (by byte length).
    pub longest: String,
    /// Sum of value lengths, accumulated during ingest.
    pub length_sum: f64,
    /// `length_sum / row_count`, set by `finish`.
    pub mean_length: f64,
}

impl TextStatistics {
    /// Fresh statistics with every extreme unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one raw field into the running state.
    pub fn record(&mut self, value: &str) {
        if self.minimum.is_empty() || value < self.minimum.as_str() {
            self.minimum = value.to_owned();
        }
        if self.maximum.is_empty() || value > self.maximum.as_str() {
            self.maximum = value.to_owned();
        }
        if self.shortest.is_empty() || value.len() < self.shortest.len() {
            self.shortest = value.to_owned();
        }
        if self.longest.is_empty() || value.len() > self.longest.len() {
            self.longest = value.to_owned();
        }
        self.length_sum += value.len() as f64;
    }

    /// Freeze the mean length over the table's row count.
    pub fn finish(&mut self, row_count: u64) {
        self.mean_length = self.length_sum / row_count as f64;
    }

    /// `true` if values described by `self` could all be contained in the
    /// column described by `other`: the lexicographic range and the length
    /// range must both nest.
    pub fn fits_within(&self, other: &TextStatistics) -> bool {
        self.minimum >= other.minimum
            && self.maximum <= other.maximum
            && self.shortest.len() >= other.shortest.len()
            && self.longest.len() <= other.longest.len()
    }
}

impl fmt::Display for TextStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min: {:?} | max: {:?} | shortest: {:?} | longest: {:?} | avg len: {}",
            self.minimum, self.maximum, self.shortest, self.longest, self.mean_length
        )
    }
}

/// A column's statistics, tagged by the variant its type selected.
#[derive(Debug, Clone)]
pub enum Statistics {
    /// Numeric statistics for integer columns.
    Int(IntStatistics),
    /// Textual statistics for float and string columns.
    Text(TextStatistics),
}

impl Statistics {
    /// Allocate the statistics variant matching `data_type`.
    pub fn for_type(data_type: DataType) -> Self {
        match data_type {
            DataType::Int => Statistics::Int(IntStatistics::new()),
            DataType::Float | DataType::Text => Statistics::Text(TextStatistics::new()),
        }
    }

    /// Fold one raw field into the running state.
    pub fn record(&mut self, value: &str) {
        match self {
            Statistics::Int(stats) => stats.record(value),
            Statistics::Text(stats) => stats.record(value),
        }
    }

    /// Freeze the per-row means after the table's last row.
    pub fn finish(&mut self, row_count: u64) {
        match self {
            Statistics::Int(stats) => stats.finish(row_count),
            Statistics::Text(stats) => stats.finish(row_count),
        }
    }

    /// Containment-possibility predicate. Variants never compare across
    /// the tag; callers guard with column-type equality, so a mismatch is
    /// simply `false`.
    pub fn fits_within(&self, other: &Statistics) -> bool {
        match (self, other) {
            (Statistics::Int(a), Statistics::Int(b)) => a.fits_within(b),
            (Statistics::Text(a), Statistics::Text(b)) => a.fits_within(b),
            _ => false,
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistics::Int(stats) => stats.fmt(f),
            Statistics::Text(stats) => stats.fmt(f),
        }
    }
}
