// Module declarations
mod common;
mod document;
mod template;

pub use document::{parse_document, Declaration, ROOT_ELEMENT};
pub use template::{check_kind, extract_placeholders, normalize};

use crate::core::{MapperError, Statement, StatementKind};

/// Parse one declared statement into its normalized form.
///
/// Line breaks become spaces, the leading keyword is checked against `kind`,
/// and every `#{Name}` is replaced by a `?` marker.
pub fn parse_statement(id: &str, kind: StatementKind, raw: &str) -> Result<Statement, MapperError> {
    let id = id.trim();
    let sql = normalize(raw);
    check_kind(id, &sql, kind)?;

    let (text, placeholders) = extract_placeholders(id, &sql)?;
    Ok(Statement::new(id.to_string(), kind, text, placeholders))
}
