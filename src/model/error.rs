use std::fmt;

use super::descriptor::TypeId;

/// Failure to read metadata for a single module or type.
///
/// None of these abort a run. The scanner and expander log them and treat the
/// affected module or type as contributing nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A type reference string does not follow the reference grammar
    InvalidTypeRef {
        /// The raw reference as written in the metadata
        type_ref: String,
        /// Parser diagnostic
        reason: String,
    },
    /// A module declares a reference to a module that could not be loaded
    MissingDependency {
        /// Module whose types cannot be enumerated
        module: String,
        /// The reference that failed to resolve
        dependency: String,
    },
    /// A module name that is not part of the loaded model
    UnknownModule(String),
    /// A type id that no loaded module declares
    UnknownType(TypeId),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidTypeRef { type_ref, reason } => {
                write!(f, "invalid type reference '{type_ref}': {reason}")
            }
            ModelError::MissingDependency { module, dependency } => {
                write!(
                    f,
                    "cannot enumerate types of module '{module}': dependency '{dependency}' is not loaded"
                )
            }
            ModelError::UnknownModule(module) => write!(f, "module '{module}' is not loaded"),
            ModelError::UnknownType(id) => write!(f, "type '{id}' is not declared in any loaded module"),
        }
    }
}

impl std::error::Error for ModelError {}
