//! Category enum as the single source of truth for category strings.
//!
//! Entries carry raw category strings; historical rows may use either the
//! short spelling (`Red`) or the suffixed one (`Red Kangaroos`). [`Category`]
//! validates input at the entry-creation boundary, while [`Species::classify`]
//! and [`is_goats`] are the lenient total classifiers the accounting engine
//! uses on stored rows.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Canonical inventory categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Red,
    EasternGrey,
    WesternGrey,
    Goats,
}

impl Category {
    /// The canonical spelling stored on entry rows.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::EasternGrey => "Eastern Grey",
            Self::WesternGrey => "Western Grey",
            Self::Goats => "Goats",
        }
    }

    /// The breakdown species this category contributes to, if any.
    #[must_use]
    pub const fn species(&self) -> Option<Species> {
        match self {
            Self::Red => Some(Species::Red),
            Self::EasternGrey => Some(Species::Eastern),
            Self::WesternGrey => Some(Species::Western),
            Self::Goats => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" | "red kangaroos" => Ok(Self::Red),
            "eastern grey" | "eastern grey kangaroos" => Ok(Self::EasternGrey),
            "western grey" | "western grey kangaroos" => Ok(Self::WesternGrey),
            "goats" | "goat" => Ok(Self::Goats),
            _ => Err(ValidationError::UnknownCategory {
                value: s.to_string(),
            }),
        }
    }
}

/// Kangaroo species axis of the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Red,
    Eastern,
    Western,
}

impl Species {
    pub const ALL: [Self; 3] = [Self::Red, Self::Eastern, Self::Western];

    /// Breakdown key for this species.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Eastern => "eastern",
            Self::Western => "western",
        }
    }

    /// Classifies a raw category string by lowercased substring match.
    ///
    /// Total function: unmatched categories yield `None` and the caller skips
    /// the breakdown axis for that entry.
    #[must_use]
    pub fn classify(category: &str) -> Option<Self> {
        let lowered = category.to_lowercase();
        if lowered.contains("red") {
            Some(Self::Red)
        } else if lowered.contains("eastern") {
            Some(Self::Eastern)
        } else if lowered.contains("western") {
            Some(Self::Western)
        } else {
            None
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a raw category string names the goat category.
#[must_use]
pub fn is_goats(category: &str) -> bool {
    category.trim().eq_ignore_ascii_case("goats")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_short_and_suffixed_spellings() {
        assert_eq!("Red".parse::<Category>().unwrap(), Category::Red);
        assert_eq!(
            "red kangaroos".parse::<Category>().unwrap(),
            Category::Red
        );
        assert_eq!(
            "Eastern Grey Kangaroos".parse::<Category>().unwrap(),
            Category::EasternGrey
        );
        assert_eq!(
            " western grey ".parse::<Category>().unwrap(),
            Category::WesternGrey
        );
        assert_eq!("GOATS".parse::<Category>().unwrap(), Category::Goats);
    }

    #[test]
    fn category_rejects_unknown() {
        let err = "emu".parse::<Category>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownCategory {
                value: "emu".to_string()
            }
        );
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        for category in [
            Category::Red,
            Category::EasternGrey,
            Category::WesternGrey,
            Category::Goats,
        ] {
            let parsed: Category = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn species_classifies_by_substring() {
        assert_eq!(Species::classify("Red"), Some(Species::Red));
        assert_eq!(Species::classify("Red Kangaroos"), Some(Species::Red));
        assert_eq!(Species::classify("Eastern Grey"), Some(Species::Eastern));
        assert_eq!(
            Species::classify("western grey kangaroos"),
            Some(Species::Western)
        );
        assert_eq!(Species::classify("Goats"), None);
        assert_eq!(Species::classify(""), None);
    }

    #[test]
    fn goats_matches_case_insensitively() {
        assert!(is_goats("Goats"));
        assert!(is_goats(" goats "));
        assert!(!is_goats("goat"));
        assert!(!is_goats("Red"));
    }
}
