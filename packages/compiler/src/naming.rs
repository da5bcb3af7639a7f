use crate::context::Flavor;
use crate::tags::TagDirectives;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use typeport_ast::{Field, TypeExpr};

static VALID_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*$").expect("valid identifier regex"));

/// Source identifiers a field declares.
///
/// Embedded fields contribute the name derived from their type, or nothing.
pub fn field_identifiers(field: &Field) -> Vec<&str> {
    if field.names.is_empty() {
        return anonymous_field_name(&field.ty).into_iter().collect();
    }
    field
        .names
        .iter()
        .map(String::as_str)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Name an embedded field is known by: `T`, `*T`, `pkg.T`, `*pkg.T`
pub fn anonymous_field_name(ty: &TypeExpr) -> Option<&str> {
    match ty {
        TypeExpr::Ident { name } => Some(name.as_str()),
        TypeExpr::Qualified { name, .. } => Some(name.as_str()),
        TypeExpr::Pointer { inner } => anonymous_field_name(inner),
        _ => None,
    }
}

/// Only identifiers starting with an upper-case letter are visible
pub fn is_exported(ident: &str) -> bool {
    ident.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

pub fn emitted_name(ident: &str, directives: &TagDirectives, flavor: Flavor) -> String {
    if let Some(rename) = &directives.rename {
        return rename.clone();
    }
    match flavor {
        Flavor::Yaml => ident.to_lowercase(),
        Flavor::Default => ident.to_string(),
    }
}

pub fn is_valid_identifier(name: &str) -> bool {
    VALID_IDENTIFIER.is_match(name)
}

/// Property key as written in an object type, quoted when needed
pub fn property_key(name: &str) -> Cow<'_, str> {
    if is_valid_identifier(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!(
            "'{}'",
            name.replace('\\', "\\\\").replace('\'', "\\'")
        ))
    }
}
