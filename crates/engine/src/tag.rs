//! The annotation tag grammar: references, escapes, concatenation.
//!
//! A tag is a small string DSL, not a generic format:
//!
//! ```text
//! DB_HOST                  literal, passed to the source unchanged
//! @host                    reference to another field's current value
//! @host||":"||@port        concatenation, parts joined with no separator
//! "@"LITERAL               `"` escapes the next character
//! ```
//!
//! `@Identifier` (ASCII letters, digits, underscore) names another field;
//! `||` splits the tag into parts that resolve independently; everything
//! else — including source-specific suffixes like `?` and `=default` — is
//! literal text the source interprets after substitution.

use confweave_core::LoadError;

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Extract the field references a tag contains, in first-occurrence order.
///
/// Duplicates are kept; references inside escaped regions are ignored.
/// This pass only discovers dependencies — it never fails, and a trailing
/// `@` with no identifier after it is plain text.
pub fn references(tag: &str) -> Vec<String> {
    let mut refs = Vec::new();
    let mut in_escape = false;
    let mut chars = tag.chars().peekable();

    while let Some(c) = chars.next() {
        if in_escape {
            in_escape = false;
            continue;
        }
        if c == '"' {
            in_escape = true;
            continue;
        }
        if c == '@' && chars.peek().copied().is_some_and(is_ident_char) {
            let mut name = String::new();
            while let Some(&next) = chars.peek() {
                if !is_ident_char(next) {
                    break;
                }
                name.push(next);
                chars.next();
            }
            refs.push(name);
        }
    }

    refs
}

/// Resolve a tag against the current record state.
///
/// `lookup` returns the current textual form of a field, or `None` for an
/// unknown name. Concatenation splits the *raw* string on every `||`, so
/// an escaped `|` does not protect the operator; a literal `||` is not
/// representable in this grammar.
pub fn resolve<F>(tag: &str, lookup: F) -> Result<String, LoadError>
where
    F: Fn(&str) -> Option<String>,
{
    if tag.contains("||") {
        let mut out = String::new();
        for part in tag.split("||") {
            out.push_str(&resolve_part(part.trim(), &lookup)?);
        }
        return Ok(out);
    }

    resolve_part(tag, &lookup)
}

/// Resolve a single part: a whole-part `@field` reference, or a literal
/// scan honoring `"` escapes.
fn resolve_part<F>(part: &str, lookup: &F) -> Result<String, LoadError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = part.strip_prefix('@') {
        return lookup(name).ok_or_else(|| LoadError::UnboundReference {
            reference: name.to_owned(),
        });
    }

    let mut out = String::new();
    let mut in_escape = false;
    for c in part.chars() {
        if in_escape {
            out.push(c);
            in_escape = false;
            continue;
        }
        if c == '"' {
            in_escape = true;
            continue;
        }
        out.push(c);
    }

    Ok(out)
}
