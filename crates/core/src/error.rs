//! Error types for the confweave domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Every failure mode a
//! caller may want to branch on is a distinct variant; message text is for
//! humans only.

use thiserror::Error;

/// The top-level error returned by a load.
///
/// Schema errors (`UnboundReference`, `CircularDependency`) are detected
/// before any source is invoked; no partial record is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A tag references a field name that no tracked field declares.
    #[error("reference to undefined field `{reference}`")]
    UnboundReference { reference: String },

    /// The dependency graph contains a cycle; the two names are the edge
    /// at which the back-edge was found.
    #[error("circular dependency detected: `{field}` -> `{dependency}`")]
    CircularDependency { field: String, dependency: String },

    /// A source failed while populating a field.
    #[error("error loading field `{field}`: {source}")]
    Source {
        field: String,
        #[source]
        source: SourceError,
    },

    /// A full pass over the pending fields resolved nothing. Unreachable
    /// once the cycle check has passed; guards against scheduler bugs.
    #[error("unable to resolve all fields, still pending: {pending:?}")]
    Stalled { pending: Vec<String> },
}

/// Result type alias using [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors a source adapter can produce while populating a field.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backing store has no value for a required key.
    #[error("required value not set: {key}")]
    MissingRequired { key: String },

    /// The resolved directive is not in the shape this source accepts.
    #[error("invalid directive `{directive}`: {reason}")]
    InvalidDirective { directive: String, reason: String },

    /// A textual value could not be converted into the field's type.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// The backing store itself failed (network, auth, malformed payload).
    #[error("source backend error: {0}")]
    Backend(String),
}

/// Error converting a textual value into a field's concrete type.
///
/// Produced by the generic setter ([`Record::set`](crate::Record::set)).
#[derive(Debug, Error)]
#[error("invalid value for field `{field}`: {reason}")]
pub struct ConvertError {
    pub field: String,
    pub reason: String,
}
