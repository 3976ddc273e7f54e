// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for version management

use crate::version::VersionComponent;
use std::fmt;
use thiserror::Error;

/// Kinds of stored entity, used in not-found / already-exists errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A product
    Product,
    /// A release of a product
    Release,
    /// A version range
    VersionRange,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Product => "Product",
            Self::Release => "Release",
            Self::VersionRange => "VersionRange",
        })
    }
}

/// Unified error type for version management operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was missing, blank or malformed
    #[error("{0}")]
    InvalidArgument(String),

    /// An entity required by the operation does not exist
    #[error("{entity} not found: {key}.")]
    NotFound {
        /// What kind of entity was looked up
        entity: EntityKind,
        /// How it was looked up ("'name'" or "Id 42")
        key: String,
    },

    /// Creating or renaming would duplicate a unique name
    #[error("{message}")]
    AlreadyExists {
        /// What kind of entity clashed
        entity: EntityKind,
        /// Human-readable description
        message: String,
    },

    /// The version range has no room left for another allocation
    #[error(
        "The next {component} number for range '{range}' would be {attempted}, \
         which exceeds the maximum value ({end}) for this version range."
    )]
    RangeExhausted {
        /// Range name
        range: String,
        /// Component being advanced
        component: VersionComponent,
        /// The value the component would have taken
        attempted: u64,
        /// The end bound of that component
        end: u32,
    },

    /// Data was in a state the operation cannot work with
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Convenience type alias for Results in version management
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Error for a required string argument that is empty or whitespace
    #[must_use]
    pub fn blank_argument(name: &str) -> Self {
        Error::InvalidArgument(format!(
            "Argument cannot be empty or composed entirely of whitespace: '{name}'."
        ))
    }

    /// Entity not found by its name
    pub fn not_found_by_name(entity: EntityKind, name: impl fmt::Display) -> Self {
        Error::NotFound {
            entity,
            key: format!("'{name}'"),
        }
    }

    /// Entity not found by its Id
    #[must_use]
    pub fn not_found_by_id(entity: EntityKind, id: i64) -> Self {
        Error::NotFound {
            entity,
            key: format!("Id {id}"),
        }
    }

    /// A product with this name already exists
    #[must_use]
    pub fn product_exists(name: &str) -> Self {
        Error::AlreadyExists {
            entity: EntityKind::Product,
            message: format!("A product named '{name}' already exists."),
        }
    }

    /// A release with this name already exists for the product
    #[must_use]
    pub fn release_exists(release_name: &str, product_name: &str) -> Self {
        Error::AlreadyExists {
            entity: EntityKind::Release,
            message: format!(
                "A release named '{release_name}' already exists for product '{product_name}'."
            ),
        }
    }

    /// Create an invalid-state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Error::InvalidState(msg.into())
    }
}

/// Reject empty or whitespace-only arguments
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::blank_argument(name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found_by_name(EntityKind::Product, "Unknown");
        assert_eq!(err.to_string(), "Product not found: 'Unknown'.");

        let err = Error::not_found_by_id(EntityKind::VersionRange, 7);
        assert_eq!(err.to_string(), "VersionRange not found: Id 7.");
    }

    #[test]
    fn test_release_exists_display() {
        let err = Error::release_exists("R1", "Product1");
        assert_eq!(
            err.to_string(),
            "A release named 'R1' already exists for product 'Product1'."
        );
    }

    #[test]
    fn test_range_exhausted_display() {
        let err = Error::RangeExhausted {
            range: "Product1".into(),
            component: VersionComponent::Build,
            attempted: 2,
            end: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("build"));
        assert!(msg.contains("'Product1'"));
        assert!(msg.contains("would be 2"));
    }

    #[test]
    fn test_require_rejects_whitespace() {
        assert!(require("commitId", "abc").is_ok());
        let err = require("commitId", "  \t").unwrap_err();
        assert!(err.to_string().contains("'commitId'"));
    }
}
