//! The record schema: a statically declared struct whose fields carry
//! source annotations.
//!
//! Runtime reflection is re-expressed as an explicit accessor table: the
//! [`record!`] macro generates a [`Record`] impl that maps field names to
//! typed getter/setter pairs, so the engine can read a field's current
//! textual form and write a parsed value by name.

use crate::error::ConvertError;

/// Static description of one declared field and its source annotations.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// The field's declared name.
    pub name: &'static str,
    /// `(namespace, tag)` annotation pairs in declaration order.
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldSpec {
    /// The tag declared under `namespace`, if present and non-empty.
    pub fn tag(&self, namespace: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(ns, tag)| *ns == namespace && !tag.trim().is_empty())
            .map(|(_, tag)| *tag)
    }
}

/// A loadable record: field specs plus by-name textual access.
///
/// Implement via the [`record!`] macro rather than by hand.
pub trait Record: Default {
    /// All declared fields, in declaration order.
    const FIELDS: &'static [FieldSpec];

    /// The current textual form of a field, or `None` for an unknown name.
    fn get(&self, field: &str) -> Option<String>;

    /// Parse `value` into the named field's concrete type and store it.
    fn set(&mut self, field: &str, value: &str) -> Result<(), ConvertError>;
}

/// Declare a record struct together with its [`Record`] impl.
///
/// Field annotations name a source namespace and the tag string that
/// source receives:
///
/// ```
/// confweave_core::record! {
///     #[derive(Debug, Default)]
///     pub struct DbConfig {
///         host: String => { env: "DB_HOST=localhost" },
///         port: u16 => { env: "DB_PORT=5432" },
///         url: String => { env: "@host||\":\"||@port" },
///         comment: String,
///     }
/// }
/// ```
///
/// Every field type must implement
/// [`FieldValue`](crate::FieldValue), and the struct must derive or
/// implement `Default`. A field without annotations is never populated by
/// a load but is still readable through `@` references.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty
                    $(=> { $($ns:ident : $tag:expr),+ $(,)? })?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        impl $crate::Record for $name {
            const FIELDS: &'static [$crate::FieldSpec] = &[
                $(
                    $crate::FieldSpec {
                        name: stringify!($field),
                        tags: &[$($((stringify!($ns), $tag)),+)?],
                    },
                )*
            ];

            fn get(&self, field: &str) -> Option<String> {
                match field {
                    $(
                        stringify!($field) => {
                            Some($crate::FieldValue::to_text(&self.$field))
                        }
                    )*
                    _ => None,
                }
            }

            fn set(
                &mut self,
                field: &str,
                value: &str,
            ) -> Result<(), $crate::ConvertError> {
                match field {
                    $(
                        stringify!($field) => {
                            self.$field = $crate::FieldValue::from_text(value)
                                .map_err(|reason| $crate::ConvertError {
                                    field: field.to_owned(),
                                    reason,
                                })?;
                            Ok(())
                        }
                    )*
                    _ => Err($crate::ConvertError {
                        field: field.to_owned(),
                        reason: "unknown field".to_owned(),
                    }),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::Record;

    crate::record! {
        #[derive(Debug, Default)]
        pub struct Sample {
            host: String => { env: "DB_HOST" },
            port: u16 => { env: "DB_PORT=5432", secrets: "db:port" },
            note: String,
        }
    }

    #[test]
    fn fields_are_declared_in_order() {
        let names: Vec<_> = Sample::FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, ["host", "port", "note"]);
    }

    #[test]
    fn tag_lookup_by_namespace() {
        let port = &Sample::FIELDS[1];
        assert_eq!(port.tag("env"), Some("DB_PORT=5432"));
        assert_eq!(port.tag("secrets"), Some("db:port"));
        assert_eq!(port.tag("vault"), None);
        assert_eq!(Sample::FIELDS[2].tag("env"), None);
    }

    #[test]
    fn empty_tag_is_treated_as_absent() {
        crate::record! {
            #[derive(Debug, Default)]
            struct Blank {
                value: String => { env: "" },
            }
        }
        assert_eq!(Blank::FIELDS[0].tag("env"), None);
    }

    #[test]
    fn get_returns_current_textual_form() {
        let mut sample = Sample::default();
        assert_eq!(sample.get("host").as_deref(), Some(""));
        assert_eq!(sample.get("port").as_deref(), Some("0"));
        assert_eq!(sample.get("missing"), None);

        sample.set("host", "localhost").unwrap();
        assert_eq!(sample.get("host").as_deref(), Some("localhost"));
    }

    #[test]
    fn set_parses_into_the_field_type() {
        let mut sample = Sample::default();
        sample.set("port", "8080").unwrap();
        assert_eq!(sample.port, 8080);

        let err = sample.set("port", "not-a-port").unwrap_err();
        assert_eq!(err.field, "port");
        assert!(err.reason.contains("unsigned integer"));
    }

    #[test]
    fn set_rejects_unknown_fields() {
        let mut sample = Sample::default();
        let err = sample.set("nope", "x").unwrap_err();
        assert_eq!(err.field, "nope");
    }
}
