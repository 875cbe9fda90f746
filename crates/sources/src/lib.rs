//! Source implementations for confweave.
//!
//! All sources implement the `confweave_core::Source` trait; the engine
//! selects the source whose namespace matches a field's annotation.

pub mod env;
pub mod secrets;
pub mod with_namespace;

pub use env::EnvSource;
pub use secrets::{SecretsClient, SecretsSource};
pub use with_namespace::WithNamespace;
