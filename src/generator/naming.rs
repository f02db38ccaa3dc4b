//! Identifier and module-path derivation.

use crate::spec::HttpMethod;

const KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try",
];

fn replace_non_word(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Contract identifier: upper-case method followed by the path with every
/// non-word character replaced by `_`.
///
/// ```rust
/// use abstractapi::generator::contract_identifier;
/// use abstractapi::spec::HttpMethod;
///
/// assert_eq!(contract_identifier(HttpMethod::Get, "/user/:id"), "GET_user__id");
/// ```
#[must_use]
pub fn contract_identifier(method: HttpMethod, path: &str) -> String {
    format!("{}{}", method.as_upper(), replace_non_word(path))
}

/// Rust field name for a wire key. Returns the name and whether it differs
/// from the key (and so needs `#[serde(rename)]`).
#[must_use]
pub fn field_name(key: &str) -> (String, bool) {
    let mut name = replace_non_word(key);
    if name.is_empty() {
        name.push('_');
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    let renamed = name != key;
    if matches!(name.as_str(), "self" | "Self" | "super" | "crate" | "_") {
        return (format!("{name}_"), true);
    }
    if KEYWORDS.contains(&name.as_str()) {
        return (format!("r#{name}"), renamed);
    }
    (name, renamed)
}

/// Module path components of an extension-less artifact path such as
/// `./model/table/user`.
#[must_use]
pub fn module_components(path: &str) -> Vec<String> {
    path.trim_start_matches("./")
        .split('/')
        .filter(|c| !c.is_empty() && *c != ".")
        .map(|c| {
            let (name, _) = field_name(c);
            name
        })
        .collect()
}

/// Rust path from the module at `from` to the module at `to`, both given as
/// extension-less artifact paths relative to the same output root.
///
/// One `super::` is emitted per level of `from` not shared with `to`.
#[must_use]
pub fn relative_module_path(from: &str, to: &str) -> String {
    let from = module_components(from);
    let to = module_components(to);
    let shared = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count()
        .min(to.len().saturating_sub(1));
    let ups = from.len() - shared;
    let mut parts: Vec<&str> = std::iter::repeat("super").take(ups).collect();
    parts.extend(to[shared..].iter().map(String::as_str));
    parts.join("::")
}
