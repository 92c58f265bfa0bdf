//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty references, positive page
//! sizes) so that once a value reaches the domain layer it can be treated as
//! trusted.
use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided page size was zero.
    #[error("page limit must be greater than zero")]
    NonPositiveLimit,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for trimmed, non-empty references.
macro_rules! ref_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new reference ensuring it is not blank.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Err(TypeConstraintError::EmptyString)
                } else {
                    Ok(Self(trimmed.to_string()))
                }
            }

            /// Borrow the reference as a `&str`.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the owned inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

ref_newtype!(PersonRef, "Back-office person reference (`ref_personne`).");
ref_newtype!(HistoryEntryId, "Unique identifier for an activity history entry.");

/// Number of items requested per page. Always greater than zero.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageLimit(NonZeroUsize);

impl PageLimit {
    /// Creates a new page limit ensuring it is greater than zero.
    pub fn new(value: usize) -> Result<Self, TypeConstraintError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(TypeConstraintError::NonPositiveLimit)
    }

    /// Returns the raw `usize` backing this limit.
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self(NonZeroUsize::new(crate::DEFAULT_PAGE_LIMIT).unwrap_or(NonZeroUsize::MIN))
    }
}

impl Display for PageLimit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageLimit {
    type Error = TypeConstraintError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageLimit> for usize {
    fn from(value: PageLimit) -> Self {
        value.get()
    }
}

/// Direction requested from the server for ordered lists.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Wire representation used in `sort_dir` query parameters.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SortDirection {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_ref_is_trimmed_and_rejects_blank() {
        assert_eq!(PersonRef::new("  C-001 ").unwrap().as_str(), "C-001");
        assert_eq!(PersonRef::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn page_limit_rejects_zero() {
        assert_eq!(PageLimit::new(0), Err(TypeConstraintError::NonPositiveLimit));
        assert_eq!(PageLimit::new(25).unwrap().get(), 25);
        assert_eq!(PageLimit::default().get(), crate::DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn sort_direction_parses_case_insensitively() {
        assert_eq!(SortDirection::try_from("ASC"), Ok(SortDirection::Asc));
        assert_eq!(SortDirection::try_from("desc"), Ok(SortDirection::Desc));
        assert!(SortDirection::try_from("up").is_err());
    }
}
