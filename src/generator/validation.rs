//! Field-rule emission for contract sections.

use crate::validator::Section;

use super::resolver::CheckKind;

/// Sections in the order they are validated.
pub const SECTION_ORDER: [Section; 4] = [Section::Paths, Section::Headers, Section::Query, Section::Body];

/// `FieldRule` expression for one field.
///
/// ```rust
/// use abstractapi::generator::{rule_expr, CheckKind};
///
/// assert_eq!(
///     rule_expr("ids", &CheckKind::String, false, true),
///     "FieldRule::new(\"ids\", Check::String).optional().array()"
/// );
/// ```
#[must_use]
pub fn rule_expr(key: &str, check: &CheckKind, required: bool, array: bool) -> String {
    let mut rule = format!("FieldRule::new({key:?}, {})", check.expr());
    if !required {
        rule.push_str(".optional()");
    }
    if array {
        rule.push_str(".array()");
    }
    rule
}

/// Name of the `const` holding a section's rules.
#[must_use]
pub fn rules_const_name(section: Section) -> String {
    format!("{}_RULES", section.as_str().to_ascii_uppercase())
}

/// `Section` variant name as written in generated code.
#[must_use]
pub fn section_variant(section: Section) -> &'static str {
    match section {
        Section::Paths => "Paths",
        Section::Headers => "Headers",
        Section::Query => "Query",
        Section::Body => "Body",
    }
}
