//! SQL identifier validation
//!
//! Values are always parameter-bound, but identifiers (table names, column
//! names, join key references, order-by fields) have to be spliced into the
//! query text. Everything spliced goes through [`ValidatedIdentifier`]
//! first.

use std::fmt;

/// Validation errors for database identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name contains invalid characters (only alphanumeric and underscore allowed)
    InvalidCharacters(String),
    /// Name exceeds the PostgreSQL identifier limit of 63 characters
    TooLong { name: String, length: usize },
    /// Name is empty
    Empty,
    /// Name starts with an invalid character (must start with letter or underscore)
    InvalidStartCharacter(String),
    /// Name is a reserved SQL keyword
    ReservedKeyword(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidCharacters(name) => {
                write!(
                    f,
                    "Invalid characters in identifier '{}': only alphanumeric characters and underscores are allowed",
                    name
                )
            }
            ValidationError::TooLong { name, length } => {
                write!(
                    f,
                    "Identifier '{}' is too long: {} characters (max {})",
                    name,
                    length,
                    ValidatedIdentifier::MAX_LENGTH
                )
            }
            ValidationError::Empty => {
                write!(f, "Identifier cannot be empty")
            }
            ValidationError::InvalidStartCharacter(name) => {
                write!(
                    f,
                    "Identifier '{}' must start with a letter or underscore",
                    name
                )
            }
            ValidationError::ReservedKeyword(name) => {
                write!(f, "Identifier '{}' is a reserved SQL keyword", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validated SQL identifier that is safe to splice into query text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedIdentifier(String);

impl ValidatedIdentifier {
    /// PostgreSQL identifier length limit
    pub const MAX_LENGTH: usize = 63;

    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::Empty);
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(ValidationError::TooLong {
                name: name.to_string(),
                length: name.len(),
            });
        }

        let first = name.chars().next().ok_or(ValidationError::Empty)?;
        if !first.is_ascii_alphabetic() && first != '_' {
            return Err(ValidationError::InvalidStartCharacter(name.to_string()));
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::InvalidCharacters(name.to_string()));
        }

        if Self::is_reserved_keyword(name) {
            return Err(ValidationError::ReservedKeyword(name.to_string()));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn is_reserved_keyword(name: &str) -> bool {
        const RESERVED_KEYWORDS: &[&str] = &[
            "SELECT", "INSERT", "UPDATE", "DELETE", "FROM", "WHERE", "JOIN", "INNER", "LEFT",
            "RIGHT", "FULL", "OUTER", "ON", "AS", "AND", "OR", "NOT", "NULL", "TRUE", "FALSE",
            "CASE", "WHEN", "THEN", "ELSE", "END", "EXISTS", "IN", "LIKE", "BETWEEN", "ORDER",
            "BY", "GROUP", "HAVING", "LIMIT", "OFFSET", "UNION", "ALL", "DISTINCT", "CREATE",
            "DROP", "ALTER", "TABLE", "INDEX", "VIEW", "PRIMARY", "KEY", "FOREIGN", "REFERENCES",
            "UNIQUE", "CHECK", "DEFAULT", "GRANT", "REVOKE", "RETURNING", "CAST", "USING",
        ];

        let upper = name.to_uppercase();
        RESERVED_KEYWORDS.contains(&upper.as_str())
    }
}

impl fmt::Display for ValidatedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
