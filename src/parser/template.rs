use crate::core::{MapperError, StatementKind};

const OPEN: &str = "#{";
const CLOSE: char = '}';

/// Number of leading characters inspected by the kind sniff.
const KIND_PREFIX_LEN: usize = 10;

/// Turn every line break into a single space and trim the ends.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Check that `sql` starts with the keyword of `kind` (case-insensitive).
///
/// Only the leading keyword is looked at; leading tabs are ignored.
pub fn check_kind(id: &str, sql: &str, kind: StatementKind) -> Result<(), MapperError> {
    let sql = sql.trim_start_matches('\t');
    let prefix: String = sql.chars().take(KIND_PREFIX_LEN).collect();

    if prefix.to_ascii_uppercase().starts_with(kind.keyword()) {
        Ok(())
    } else {
        Err(MapperError::StatementKindMismatch {
            id: id.to_string(),
            expected: kind,
            prefix,
        })
    }
}

/// Replace each `#{Name}` with `?` and collect the names in order.
///
/// Fails on an opening marker without a closing brace, a closing brace
/// without an opening marker, or an empty name.
pub fn extract_placeholders(id: &str, sql: &str) -> Result<(String, Vec<String>), MapperError> {
    let malformed = || MapperError::MalformedTemplate {
        id: id.to_string(),
        text: sql.to_string(),
    };

    let mut text = String::with_capacity(sql.len());
    let mut names = Vec::new();
    let mut rest = sql;

    loop {
        match (rest.find(OPEN), rest.find(CLOSE)) {
            (None, None) => {
                text.push_str(rest);
                return Ok((text, names));
            }
            (Some(open), Some(close)) if open < close => {
                let name = rest[open + OPEN.len()..close].trim();
                if name.is_empty() {
                    return Err(malformed());
                }
                text.push_str(&rest[..open]);
                text.push('?');
                names.push(name.to_string());
                rest = &rest[close + 1..];
            }
            _ => return Err(malformed()),
        }
    }
}
