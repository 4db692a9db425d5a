//! Type name rules for rulesets.
//!
//! Valid type names:
//! - ASCII alphanumeric characters, underscores (`_`), and hyphens (`-`)
//! - Must start with a letter or an underscore (internal types such as
//!   `_dateDigitization` conventionally start with `_`)

/// Validates a type name according to ruleset naming rules.
///
/// # Examples
/// ```
/// use ugh::prefs::names::validate_type_name;
///
/// assert!(validate_type_name("TitleDocMain").is_ok());
/// assert!(validate_type_name("_dateDigitization").is_ok());
/// assert!(validate_type_name("Periodical-Volume").is_ok());
///
/// assert!(validate_type_name("").is_err());
/// assert!(validate_type_name("9Title").is_err());
/// assert!(validate_type_name("Title Doc").is_err());
/// ```
pub fn validate_type_name(name: &str) -> Result<(), TypeNameError> {
    let mut chars = name.chars();
    let first_char = match chars.next() {
        Some(ch) => ch,
        None => return Err(TypeNameError::Empty),
    };

    if !(first_char.is_ascii_alphabetic() || first_char == '_') {
        return Err(TypeNameError::InvalidStart(first_char));
    }

    for ch in chars {
        if !is_valid_name_char(ch) {
            return Err(TypeNameError::InvalidCharacter(ch));
        }
    }

    Ok(())
}

fn is_valid_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// Error type for type name validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNameError {
    /// Type name is empty
    Empty,
    /// Type name starts with something other than a letter or underscore
    InvalidStart(char),
    /// Type name contains an invalid character
    InvalidCharacter(char),
}

impl std::fmt::Display for TypeNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeNameError::Empty => write!(f, "type name cannot be empty"),
            TypeNameError::InvalidStart(ch) => {
                write!(
                    f,
                    "type name must start with a letter or underscore, found '{}'",
                    ch
                )
            }
            TypeNameError::InvalidCharacter(ch) => {
                write!(
                    f,
                    "type name contains invalid character '{}' (only alphanumeric, underscore, and hyphen allowed)",
                    ch
                )
            }
        }
    }
}

impl std::error::Error for TypeNameError {}
