//! Textual encode/decode for record field types.
//!
//! Every type usable as a record field implements [`FieldValue`]: sources
//! deliver plain text, the generic setter parses it into the field's
//! concrete type, and inter-field references read a field back out in its
//! textual form. Unsupported field types are rejected at compile time.

/// Conversion between a field's concrete type and its textual form.
pub trait FieldValue: Sized {
    /// Parse a textual value into this type. The error string becomes the
    /// `reason` of a conversion error.
    fn from_text(text: &str) -> Result<Self, String>;

    /// The current textual form of this value, as seen by `@` references.
    fn to_text(&self) -> String;
}

impl FieldValue for String {
    fn from_text(text: &str) -> Result<Self, String> {
        Ok(text.to_owned())
    }

    fn to_text(&self) -> String {
        self.clone()
    }
}

impl FieldValue for bool {
    fn from_text(text: &str) -> Result<Self, String> {
        match text.trim() {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            other => Err(format!("invalid boolean value: {other}")),
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}

macro_rules! parsed_field_value {
    ($($ty:ty => $what:literal),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn from_text(text: &str) -> Result<Self, String> {
                    text.trim()
                        .parse()
                        .map_err(|_| format!(concat!("invalid ", $what, " value: {}"), text))
                }

                fn to_text(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

parsed_field_value! {
    i8 => "integer",
    i16 => "integer",
    i32 => "integer",
    i64 => "integer",
    isize => "integer",
    u8 => "unsigned integer",
    u16 => "unsigned integer",
    u32 => "unsigned integer",
    u64 => "unsigned integer",
    usize => "unsigned integer",
    f32 => "float",
    f64 => "float",
}

/// `None` until a source writes a value; reads back as the inner value's
/// text, or the empty string while unset.
impl<T: FieldValue> FieldValue for Option<T> {
    fn from_text(text: &str) -> Result<Self, String> {
        T::from_text(text).map(Some)
    }

    fn to_text(&self) -> String {
        self.as_ref().map(T::to_text).unwrap_or_default()
    }
}

/// Wrapper that decodes a field's textual value as JSON.
///
/// The counterpart of handing a source a structured destination: the raw
/// text is deserialized with serde, so any `Deserialize` type can be a
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> FieldValue for Json<T>
where
    T: serde::de::DeserializeOwned + serde::Serialize,
{
    fn from_text(text: &str) -> Result<Self, String> {
        serde_json::from_str(text)
            .map(Json)
            .map_err(|e| format!("invalid JSON value: {e}"))
    }

    fn to_text(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn string_round_trips_verbatim() {
        let v = String::from_text("  spaced  ").unwrap();
        assert_eq!(v, "  spaced  ");
        assert_eq!(v.to_text(), "  spaced  ");
    }

    #[test]
    fn integers_trim_whitespace() {
        assert_eq!(i64::from_text(" 42 ").unwrap(), 42);
        assert_eq!(u16::from_text("5432").unwrap(), 5432);
        assert!(i32::from_text("abc").is_err());
        assert!(u8::from_text("-1").is_err());
    }

    #[test]
    fn booleans_accept_go_style_spellings() {
        assert!(bool::from_text("true").unwrap());
        assert!(bool::from_text("1").unwrap());
        assert!(bool::from_text("T").unwrap());
        assert!(!bool::from_text("false").unwrap());
        assert!(!bool::from_text("0").unwrap());
        assert!(bool::from_text("yes").is_err());
    }

    #[test]
    fn floats_parse() {
        assert_eq!(f64::from_text("1.5").unwrap(), 1.5);
        assert!(f32::from_text("one").is_err());
    }

    #[test]
    fn option_wraps_the_parsed_value() {
        let v = Option::<u32>::from_text("7").unwrap();
        assert_eq!(v, Some(7));
        assert_eq!(Option::<u32>::None.to_text(), "");
    }

    #[test]
    fn json_decodes_structured_values() {
        let v = Json::<HashMap<String, String>>::from_text(r#"{"key": "value"}"#).unwrap();
        assert_eq!(v.0.get("key").map(String::as_str), Some("value"));
        assert!(Json::<HashMap<String, String>>::from_text("not json").is_err());
    }
}
