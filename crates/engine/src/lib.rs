//! # confweave
//!
//! Declarative loading of a statically declared record from heterogeneous
//! sources (environment, secret stores, anything implementing
//! [`Source`]), with per-field annotations that may reference other
//! fields.
//!
//! Annotations form a dependency graph: the engine parses each field's
//! tag for `@` references, rejects cycles and unbound names up front,
//! then populates fields pass-by-pass so every reference resolves against
//! an already-loaded value. See [`tag`] for the tag grammar and [`Loader`]
//! for the entry point.

pub mod tag;

mod graph;
mod loader;

pub use loader::Loader;

// Re-export the core contracts so callers depend on one crate.
pub use confweave_core::{
    ConvertError, FieldSpec, FieldValue, Json, LoadError, Record, Result, Slot, Source,
    SourceError, record,
};
