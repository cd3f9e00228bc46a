use serde::Serialize;

use super::kind::StatementKind;

/// A parsed named statement.
///
/// `text` carries one `?` marker per entry of `placeholders`, in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    id: String,
    kind: StatementKind,
    text: String,
    placeholders: Vec<String>,
}

impl Statement {
    pub(crate) const fn new(
        id: String,
        kind: StatementKind,
        text: String,
        placeholders: Vec<String>,
    ) -> Self {
        Self {
            id,
            kind,
            text,
            placeholders,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Normalized SQL text with positional markers.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Placeholder names in order of first occurrence; duplicates kept.
    #[must_use]
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }
}
