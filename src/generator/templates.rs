use askama::Template;

/// Render a template as a source file: always newline-terminated.
///
/// # Errors
///
/// Returns the template's rendering error.
pub fn render_source(template: &impl Template) -> Result<String, askama::Error> {
    let mut source = template.render()?;
    if !source.ends_with('\n') {
        source.push('\n');
    }
    Ok(source)
}

/// One attribute of a section container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Rust field name (sanitized)
    pub name: String,
    /// Wire key as a Rust string literal
    pub wire_literal: String,
    /// Whether `name` differs from the wire key
    pub renamed: bool,
    pub optional: bool,
    /// Full field type, `Vec`/`Option` wrapping included
    pub ty: String,
    /// `FieldRule` expression
    pub rule: String,
}

/// One request section (paths, headers, query or body) of a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub struct_name: String,
    /// Field name in the request contract
    pub container: &'static str,
    /// `Section` variant name
    pub variant: &'static str,
    pub rules_const: String,
    pub fields: Vec<FieldView>,
}

/// Endpoint as seen by the aggregate server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointView {
    pub identifier: String,
    pub endpoint_literal: String,
}

#[derive(Template)]
#[template(path = "contract.rs.txt", escape = "none")]
pub struct ContractTemplate<'a> {
    pub runtime: &'a str,
    pub utility_path: String,
    pub identifier: &'a str,
    pub endpoint: &'a str,
    pub endpoint_literal: String,
    pub imports: Vec<String>,
    pub sections: Vec<SectionView>,
    pub response_type: String,
    pub minimal: bool,
}

#[derive(Template)]
#[template(path = "utility.rs.txt", escape = "none")]
pub struct UtilityTemplate<'a> {
    pub runtime: &'a str,
}

#[derive(Template)]
#[template(path = "server.rs.txt", escape = "none")]
pub struct ServerTemplate<'a> {
    pub runtime: &'a str,
    pub imports: Vec<String>,
    pub endpoints: Vec<EndpointView>,
}

#[derive(Template)]
#[template(path = "mod.rs.txt", escape = "none")]
pub struct ModRsTemplate {
    pub modules: Vec<String>,
}
