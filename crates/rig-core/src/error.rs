//! Error types for the instantiation core
//!
//! Every failure is a distinct, typed error that propagates synchronously up
//! through the recursive walk; partial argument trees are never returned.

use rig_symbol::{ConstructError, ResolveError};

/// Main instantiation error type
#[derive(Debug, thiserror::Error)]
pub enum InstantiateError {
    /// Dotted path did not resolve to a type or callable
    #[error("resolution failed: {0}")]
    Resolution(#[from] ResolveError),

    /// Target directive missing or unusable
    #[error("target error: {0}")]
    Target(#[from] TargetError),

    /// Recursion flag or convert directive rejected
    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Constructor invocation failed
    #[error("construction of '{symbol}' failed: {source}")]
    Construction {
        /// Dotted path of the symbol being constructed
        symbol: String,
        /// The constructor's failure
        #[source]
        source: ConstructError,
    },
}

/// Target extraction errors
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// Neither the overlay nor the node supplies a target
    #[error("unable to determine target: no `_target_` in config or call-site overrides")]
    Missing,

    /// Target value of a shape the engine cannot use
    #[error("unsupported target type: expected a dotted path string, type, or callable, got {found}")]
    Unsupported {
        /// Kind of the offending value
        found: String,
    },

    /// Declared target inspected by the read-only peek is not a string
    #[error("`_target_` field must be a string, got {found}")]
    NotString {
        /// Kind of the offending value
        found: String,
    },
}

/// Policy extraction errors
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Recursion flag of the wrong type
    #[error("`_recursive_` flag must be a bool, got {found}")]
    RecursiveNotBool {
        /// Kind of the offending value
        found: String,
    },

    /// Convert directive string outside the recognized literals
    #[error("unsupported `_convert_` value: {value} (expected `none`, `partial`, or `all`)")]
    UnknownConvert {
        /// The offending string
        value: String,
    },

    /// Convert directive of the wrong type
    #[error("`_convert_` must be a string or a ConvertMode, got {found}")]
    ConvertType {
        /// Kind of the offending value
        found: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantiate_error_display() {
        let err = InstantiateError::from(TargetError::Missing);
        assert!(err.to_string().contains("unable to determine target"));
    }

    #[test]
    fn construction_error_carries_symbol() {
        let err = InstantiateError::Construction {
            symbol: "pkg.Foo".to_string(),
            source: ConstructError::missing_field("x"),
        };
        let text = err.to_string();
        assert!(text.contains("pkg.Foo"));
        assert!(text.contains("missing required field `x`"));
    }

    #[test]
    fn policy_error_display() {
        let err = PolicyError::UnknownConvert {
            value: "fast".to_string(),
        };
        assert!(err.to_string().contains("fast"));
    }
}
