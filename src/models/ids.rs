//! Strongly-typed ID wrappers for all entity types
//!
//! Identifiers are integers assigned by the store on creation. Using newtype
//! wrappers prevents accidentally mixing up IDs from different entity types
//! at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier value
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the raw identifier value
            pub const fn value(&self) -> u64 {
                self.0
            }

            /// The identifier that follows this one
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Accept "#12" as well as "12"
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(TransactionId, "#");
define_id!(CategoryId, "#");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(TransactionId::new(7).to_string(), "7");
    }

    #[test]
    fn test_id_next() {
        let id = TransactionId::new(1);
        assert_eq!(id.next(), TransactionId::new(2));
        assert!(id < id.next());
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("12".parse::<TransactionId>().unwrap(), TransactionId::new(12));
        assert_eq!("#12".parse::<TransactionId>().unwrap(), TransactionId::new(12));
        assert!("abc".parse::<TransactionId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = CategoryId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");
        let deserialized: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
