//! Error types for memokit

use std::fmt;

/// Result type alias for memokit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for memoizer construction and the reference workloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cache constructed with a capacity of zero
    ZeroCapacity,

    /// Array index past the end of the workload data
    IndexOutOfBounds {
        /// Offending index
        index: usize,
        /// Length of the array
        len: usize,
    },

    /// Range query whose left bound exceeds its right bound
    InvalidRange {
        /// Left (inclusive) bound
        left: usize,
        /// Right (inclusive) bound
        right: usize,
    },

    /// Range sum does not fit in a u64
    SumOverflow {
        /// Left (inclusive) bound
        left: usize,
        /// Right (inclusive) bound
        right: usize,
    },

    /// Fibonacci value does not fit in a u128
    Overflow {
        /// Index whose value overflowed
        n: u64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "Invalid capacity: must be greater than 0"),
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "Index out of bounds: {} (len {})", index, len)
            }
            Error::InvalidRange { left, right } => {
                write!(f, "Invalid range: left {} > right {}", left, right)
            }
            Error::SumOverflow { left, right } => {
                write!(f, "Overflow: sum of [{}, {}] exceeds u64", left, right)
            }
            Error::Overflow { n } => write!(f, "Overflow: fib({}) exceeds u128", n),
        }
    }
}

impl std::error::Error for Error {}
