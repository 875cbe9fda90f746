//! Environment variable source.
//!
//! Directive formats:
//!
//! ```text
//! VAR            required variable
//! VAR?           optional — unset leaves the field at its default
//! VAR=fallback   literal fallback when the variable is unset
//! ```
//!
//! The variable name is trimmed; a fallback is preserved verbatim,
//! including leading whitespace after `=`.

use std::collections::HashMap;

use async_trait::async_trait;

use confweave_core::{Slot, Source, SourceError};

/// Loads fields from a snapshot of environment variables.
///
/// The table is captured at construction, never read ambiently, so loads
/// are deterministic and tests can inject their own variables.
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self::with_vars(std::env::vars())
    }

    /// Use an explicit variable table.
    pub fn with_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            vars: vars.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Source for EnvSource {
    fn name(&self) -> &str {
        "env"
    }

    async fn apply(&self, slot: &mut dyn Slot, directive: &str) -> Result<(), SourceError> {
        let directive = directive.trim();

        // References and concatenation are substituted by the engine
        // before we are called; seeing them here is a wiring bug.
        if directive.starts_with('@') || directive.contains("||") {
            return Err(SourceError::InvalidDirective {
                directive: directive.to_owned(),
                reason: "unexpected unresolved tag".to_owned(),
            });
        }

        let mut optional = false;
        let mut fallback = "";
        let var = if let Some(stripped) = directive.strip_suffix('?') {
            optional = true;
            stripped
        } else if let Some(idx) = directive.find('=') {
            fallback = &directive[idx + 1..];
            directive[..idx].trim()
        } else {
            directive
        };

        match self.vars.get(var) {
            Some(value) => Ok(slot.set_text(value)?),
            None if optional => Ok(()),
            None if !fallback.is_empty() => {
                tracing::debug!(var, "variable not set, using fallback");
                Ok(slot.set_text(fallback)?)
            }
            None => Err(SourceError::MissingRequired {
                key: format!("environment variable {var}"),
            }),
        }
    }
}
