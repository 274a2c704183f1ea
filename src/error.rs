//! Errors raised at the text and dynamic-field boundary.
//!
//! Typed store operations never fail; only name lookups, value parsing and
//! field/value type pairing can.

use thiserror::Error;

use crate::field::{Field, ValueKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown field '{0}' (expected backendUrl, timeSpanMinutes or showOrigins)")]
    UnknownField(String),

    #[error("field {field} holds a {expected} value, got a {found} value")]
    TypeMismatch {
        field: Field,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("cannot read '{input}' as {kind}")]
    InvalidValue { input: String, kind: ValueKind },

    #[error("unknown preset '{0}' (expected blank or hosted)")]
    UnknownPreset(String),

    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}
