//! The primitive column type trichotomy.

use std::fmt;

/// Data type inferred for a column from its first observed field.
///
/// `Float` and `Text` columns share the textual statistics and filter
/// variants; only `Int` columns get the numeric ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Signed 64-bit integer.
    Int,
    /// 32-bit float (any value that parses as one but not as an integer).
    Float,
    /// Everything else.
    Text,
}

impl DataType {
    /// Infer the type of a column from a single raw field: `i64` wins,
    /// then `f32`, then text.
    pub fn infer(value: &str) -> DataType {
        if value.parse::<i64>().is_ok() {
            DataType::Int
        } else if value.parse::<f32>().is_ok() {
            DataType::Float
        } else {
            DataType::Text
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Text => "string",
        };
        f.write_str(name)
    }
}
