//! String builders for TypeScript type expressions.
//!
//! The synthesizer composes its output exclusively through these helpers so
//! that punctuation is assembled in one place.

use serde_json::Value as JsonValue;

/// Union of type expressions: `(A) | (B)`.
///
/// A single member is returned as is; an empty union is `never`.
pub fn union_of<I, S>(types: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    join_wrapped(types, " | ").unwrap_or_else(|| "never".to_string())
}

/// Intersection of type expressions: `(A) & (B)`.
///
/// A single member is returned as is; an empty intersection is `unknown`.
pub fn intersection_of<I, S>(types: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    join_wrapped(types, " & ").unwrap_or_else(|| "unknown".to_string())
}

/// Array of a type expression: `(T)[]`.
pub fn array_of(ty: &str) -> String {
    format!("({ty})[]")
}

/// Partial wrapper: `Partial<T>`.
pub fn partial_of(ty: &str) -> String {
    format!("Partial<{ty}>")
}

/// Null-widened type expression: `(T) | null`.
pub fn nullable_of(ty: &str) -> String {
    format!("({ty}) | null")
}

/// Indexed access off a root identifier: `root["a"]["b"]`.
pub fn indexed_access_of<I, S>(root: &str, keys: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = root.to_string();
    for key in keys {
        out.push('[');
        out.push_str(&quote_key(key.as_ref()));
        out.push(']');
    }
    out
}

/// Double-quoted property key, escaped as a JSON string.
pub fn quote_key(key: &str) -> String {
    JsonValue::String(key.to_owned()).to_string()
}

/// Single-quoted string literal type.
pub fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Documentation comment block placed in front of a property.
pub fn comment(text: &str) -> String {
    let body = text.trim().replace("*/", "*\\/").replace('\n', "\n  * ");
    format!("/**\n  * {body}\n  */\n")
}

fn join_wrapped<I, S>(types: I, separator: &str) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let types: Vec<S> = types.into_iter().collect();
    match types.as_slice() {
        [] => None,
        [only] => Some(only.as_ref().to_string()),
        many => Some(
            many.iter()
                .map(|t| format!("({})", t.as_ref()))
                .collect::<Vec<_>>()
                .join(separator),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_of() {
        assert_eq!(union_of(["'a'", "'b'"]), "('a') | ('b')");
        assert_eq!(union_of(["string"]), "string");
        assert_eq!(union_of(Vec::<String>::new()), "never");
    }

    #[test]
    fn test_intersection_of() {
        assert_eq!(intersection_of(["A", "{ x: number }"]), "(A) & ({ x: number })");
        assert_eq!(intersection_of(["A"]), "A");
        assert_eq!(intersection_of(Vec::<&str>::new()), "unknown");
    }

    #[test]
    fn test_wrappers() {
        assert_eq!(array_of("string"), "(string)[]");
        assert_eq!(partial_of("A"), "Partial<A>");
        assert_eq!(nullable_of("string"), "(string) | null");
    }

    #[test]
    fn test_indexed_access_of() {
        assert_eq!(
            indexed_access_of("components", ["schemas", "Pet"]),
            r#"components["schemas"]["Pet"]"#
        );
        assert_eq!(indexed_access_of("definitions", Vec::<&str>::new()), "definitions");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote_key("id"), r#""id""#);
        assert_eq!(quote_key(r#"a"b"#), r#""a\"b""#);
        assert_eq!(string_literal("it's"), r"'it\'s'");
    }

    #[test]
    fn test_quote_key_escapes_control_characters() {
        assert_eq!(quote_key("line\nbreak"), r#""line\nbreak""#);
        assert_eq!(quote_key("tab\there"), r#""tab\there""#);
        assert_eq!(quote_key("back\\slash"), r#""back\\slash""#);
        assert_eq!(quote_key("bell\u{7}"), r#""bell\u0007""#);
    }

    #[test]
    fn test_comment() {
        assert_eq!(comment("  Pet id\n"), "/**\n  * Pet id\n  */\n");
        assert_eq!(comment("one\ntwo"), "/**\n  * one\n  * two\n  */\n");
        assert!(!comment("ends */ early").contains("ends */"));
    }
}
