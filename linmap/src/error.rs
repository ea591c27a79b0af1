//! Error types for map operations

use alloc::string::String;

/// Typed errors returned by [`HashMap`](crate::HashMap) operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// The probe walk reached an empty slot (or wrapped the table) without a match
    #[error("key not found")]
    KeyNotFound,
    /// A bulk-construction item could not be turned into a key-value pair
    #[error("malformed input at position {position}: {reason}")]
    MalformedInput {
        /// Zero-based index of the offending item in the input sequence
        position: usize,
        /// Conversion error reported by the item
        reason: String,
    },
    /// An insert walked all `capacity` slots without finding a vacant one
    #[error("probe walk exhausted all {capacity} slots without a vacant slot")]
    ProbeExhausted {
        /// Capacity of the table at the time of the walk
        capacity: usize,
    },
    /// The slot array for the requested number of entries cannot be
    /// represented or allocated
    #[error("capacity overflow")]
    CapacityOverflow,
    /// A resize policy was configured with a load factor outside `(0, 1)`
    #[error("load factor {0} is outside (0, 1)")]
    InvalidLoadFactor(f64),
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display() {
        assert_eq!(MapError::KeyNotFound.to_string(), "key not found");
        assert_eq!(
            MapError::MalformedInput {
                position: 3,
                reason: "expected 2 components, got 1".to_string(),
            }
            .to_string(),
            "malformed input at position 3: expected 2 components, got 1"
        );
        assert_eq!(
            MapError::ProbeExhausted { capacity: 8 }.to_string(),
            "probe walk exhausted all 8 slots without a vacant slot"
        );
        assert_eq!(MapError::CapacityOverflow.to_string(), "capacity overflow");
        assert_eq!(
            MapError::InvalidLoadFactor(1.5).to_string(),
            "load factor 1.5 is outside (0, 1)"
        );
    }
}
