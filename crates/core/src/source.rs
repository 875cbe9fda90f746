//! The source capability — the abstraction over value backends.
//!
//! A [`Source`] knows how to turn a fully resolved directive string into a
//! value for one record field. The engine never talks to a backend by
//! name; it hands the source a [`Slot`] (a settable destination) and the
//! directive, and the source owns everything backend-specific: optional
//! markers, defaults, structured-value extraction.
//!
//! Implementations live in `confweave-sources`.

use async_trait::async_trait;

use crate::error::{ConvertError, SourceError};

/// A mutable handle to one field of the record being loaded.
pub trait Slot: Send {
    /// The declared name of the destination field.
    fn name(&self) -> &str;

    /// Parse `value` into the field's concrete type and store it.
    fn set_text(&mut self, value: &str) -> Result<(), ConvertError>;
}

/// A backend capable of populating record fields.
///
/// Calls are strictly sequential; a source is never invoked for a field
/// until every field its tag references has been populated.
#[async_trait]
pub trait Source: Send + Sync {
    /// The annotation namespace this source claims (e.g. `env`).
    fn name(&self) -> &str;

    /// Populate `slot` according to `directive`.
    ///
    /// `directive` has already been through reference substitution; any
    /// remaining syntax (`?`, `=default`, `name:key`) belongs to the
    /// source. A source may decline to write (optional marker with no
    /// backend value) and still return `Ok`.
    async fn apply(&self, slot: &mut dyn Slot, directive: &str) -> Result<(), SourceError>;
}

#[async_trait]
impl<S: Source + ?Sized> Source for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn apply(&self, slot: &mut dyn Slot, directive: &str) -> Result<(), SourceError> {
        (**self).apply(slot, directive).await
    }
}

#[async_trait]
impl<S: Source + ?Sized> Source for std::sync::Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn apply(&self, slot: &mut dyn Slot, directive: &str) -> Result<(), SourceError> {
        (**self).apply(slot, directive).await
    }
}
