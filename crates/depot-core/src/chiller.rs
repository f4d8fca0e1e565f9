//! Validated chiller identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A validated chiller identifier (1-4).
///
/// Entry rows store the chiller as a raw string; [`ChillerId::classify`] is
/// the lenient form the accounting engine uses on stored rows, and
/// [`ChillerId::new`] / [`FromStr`] the strict form for caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ChillerId(u8);

impl ChillerId {
    /// All four chillers in order.
    pub const ALL: [Self; 4] = [Self(1), Self(2), Self(3), Self(4)];

    /// Creates a chiller ID after validation.
    pub fn new(number: u8) -> Result<Self, ValidationError> {
        if (1..=4).contains(&number) {
            Ok(Self(number))
        } else {
            Err(ValidationError::InvalidChiller {
                value: number.to_string(),
            })
        }
    }

    /// Classifies a raw chiller string, accepting numeric forms `"1"`-`"4"`.
    ///
    /// Total function: anything else yields `None` and the caller skips the
    /// chiller axis for that entry.
    #[must_use]
    pub fn classify(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self(1)),
            "2" => Some(Self(2)),
            "3" => Some(Self(3)),
            "4" => Some(Self(4)),
            _ => None,
        }
    }

    /// The chiller number (1-4).
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ChillerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChillerId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::classify(s).ok_or_else(|| ValidationError::InvalidChiller {
            value: s.to_string(),
        })
    }
}

impl TryFrom<u8> for ChillerId {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChillerId> for u8 {
    fn from(chiller: ChillerId) -> Self {
        chiller.0
    }
}
