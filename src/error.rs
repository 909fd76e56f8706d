use std::fmt;

/// Errors that can occur while authoring audit configuration.
///
/// These surface exclusively from the mutation contract during profile
/// setup; resolution never fails (an unmatched type yields a
/// non-auditable entry, not an error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operation required a configuration that was never registered.
    ///
    /// Raised by `get_auditable`, `add_auditable_field`,
    /// `add_composite_key`, and `set_ignore_if_no_field_changed` when the
    /// target type has no configuration yet. This signals a bug in the
    /// profile being configured: register the type first.
    NotRegistered {
        /// Full name of the type that was never registered
        type_name: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotRegistered { type_name } => {
                write!(f, "Type '{}' is not registered as auditable", type_name)
            }
        }
    }
}

impl std::error::Error for Error {}
