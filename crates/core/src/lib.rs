//! # confweave core
//!
//! Domain types, traits, and error definitions for the confweave
//! configuration loader. This crate defines the contracts the engine and
//! the concrete sources implement against:
//!
//! - [`Record`] and the [`record!`] macro — the statically declared schema
//!   with by-name textual access.
//! - [`FieldValue`] — conversion between field types and their textual form.
//! - [`Source`] and [`Slot`] — the capability a value backend provides.
//! - [`LoadError`] / [`SourceError`] — the error taxonomy callers branch on.
//!
//! All other crates depend inward on core; core depends on nothing of
//! theirs.

pub mod error;
pub mod record;
pub mod source;
pub mod value;

// Re-export key types at crate root for ergonomics
pub use error::{ConvertError, LoadError, Result, SourceError};
pub use record::{FieldSpec, Record};
pub use source::{Slot, Source};
pub use value::{FieldValue, Json};
