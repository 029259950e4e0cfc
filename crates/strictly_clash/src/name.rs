//! Validated record names.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier of a persisted game: non-empty, letters and digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

/// A name that is empty or contains something other than letters and digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Invalid name '{}'", name)]
pub struct NameError {
    /// The rejected input.
    pub name: String,
}

impl Name {
    /// Validates and wraps `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NameError`] if `name` is empty or has a character that is
    /// not alphanumeric.
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        if Self::is_valid(&name) {
            Ok(Self(name))
        } else {
            Err(NameError { name })
        }
    }

    /// Checks the naming rule without allocating.
    pub fn is_valid(name: &str) -> bool {
        !name.is_empty() && name.chars().all(char::is_alphanumeric)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for ok in ["game1", "G", "42", "Partida"] {
            assert_eq!(Name::new(ok).map(|n| n.to_string()), Ok(ok.to_string()));
        }
    }

    #[test]
    fn test_invalid_names() {
        for bad in ["", " ", "my game", "a-b", "x_y", "../etc"] {
            let err = Name::new(bad).expect_err("must be rejected");
            assert_eq!(err.name, bad);
        }
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<Name>("\"abc\"").is_ok());
        assert!(serde_json::from_str::<Name>("\"a b\"").is_err());
    }
}
