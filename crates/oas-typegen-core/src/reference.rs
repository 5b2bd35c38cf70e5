//! `$ref` pointer resolution.
//!
//! Resolution is lexical: `#/components/schemas/Pet` becomes
//! `components["schemas"]["Pet"]` whether or not the target exists.

use crate::ts::indexed_access_of;

/// Turn a local JSON pointer into an indexed-access type expression.
pub fn resolve_ref(pointer: &str) -> String {
    let path = pointer.strip_prefix("#/").unwrap_or(pointer);
    let mut segments = path.split('/');
    let root = segments.next().unwrap_or_default();
    indexed_access_of(root, segments)
}
