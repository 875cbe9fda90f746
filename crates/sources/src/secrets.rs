//! Secret store source.
//!
//! Directive formats:
//!
//! ```text
//! name           whole secret; JSON payloads are keyed by the field name
//! name:key       a specific key of a JSON secret
//! name?          optional secret
//! name:key?      optional key
//! ```
//!
//! The backend is injected as a [`SecretsClient`], so the source itself
//! holds no ambient client state and tests run against an in-memory map.

use async_trait::async_trait;
use serde_json::Value;

use confweave_core::{Slot, Source, SourceError};

/// Backend capability: fetch the raw payload of a named secret.
///
/// `Ok(None)` means the secret does not exist; transport and auth
/// failures are `Err`.
#[async_trait]
pub trait SecretsClient: Send + Sync {
    async fn get_secret(&self, name: &str) -> Result<Option<String>, SourceError>;
}

/// Loads fields from a secret store through an injected client.
pub struct SecretsSource<C> {
    client: C,
}

impl<C: SecretsClient> SecretsSource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: SecretsClient> Source for SecretsSource<C> {
    fn name(&self) -> &str {
        "secrets"
    }

    async fn apply(&self, slot: &mut dyn Slot, directive: &str) -> Result<(), SourceError> {
        if directive.starts_with('@') || directive.contains("||") {
            return Err(SourceError::InvalidDirective {
                directive: directive.to_owned(),
                reason: "unexpected unresolved tag".to_owned(),
            });
        }

        let (directive, optional) = match directive.strip_suffix('?') {
            Some(stripped) => (stripped, true),
            None => (directive, false),
        };

        let (secret_name, explicit_key) = match directive.split_once(':') {
            Some((name, key)) => (name.trim(), Some(key.trim())),
            None => (directive.trim(), None),
        };

        tracing::debug!(secret = secret_name, "fetching secret");
        let Some(payload) = self.client.get_secret(secret_name).await? else {
            if optional {
                return Ok(());
            }
            return Err(SourceError::MissingRequired {
                key: format!("secret {secret_name}"),
            });
        };

        // A JSON object payload is a map of keys; anything else is the
        // value itself.
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&payload) else {
            if let Some(key) = explicit_key {
                if key != slot.name() {
                    return Err(SourceError::InvalidDirective {
                        directive: format!("{secret_name}:{key}"),
                        reason: format!("cannot extract key from non-JSON secret {secret_name}"),
                    });
                }
            }
            return Ok(slot.set_text(&payload)?);
        };

        let key = explicit_key.unwrap_or(slot.name());
        let Some(value) = map.get(key) else {
            if optional {
                return Ok(());
            }
            return Err(SourceError::MissingRequired {
                key: format!("key {key} in secret {secret_name}"),
            });
        };

        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            other => serde_json::to_string(other)
                .map_err(|e| SourceError::Backend(format!("re-encoding secret value: {e}")))?,
        };

        Ok(slot.set_text(&text)?)
    }
}
