use std::collections::HashMap;
use std::path::Path;

use crate::core::{MapperError, Statement};
use crate::parser::{parse_document, parse_statement, Declaration};

/// Table of parsed statements keyed by id.
///
/// Built once; there is no mutation path afterwards, so a registry can be
/// shared between threads behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    statements: HashMap<String, Statement>,
}

impl Registry {
    /// Parse every declaration, failing on the first bad one.
    ///
    /// A repeated id replaces the earlier statement.
    pub fn from_declarations<I>(declarations: I) -> Result<Self, MapperError>
    where
        I: IntoIterator<Item = Declaration>,
    {
        let mut statements = HashMap::new();

        for decl in declarations {
            let stmt = parse_statement(&decl.id, decl.kind, &decl.text)?;
            tracing::debug!(
                id = stmt.id(),
                kind = %stmt.kind(),
                placeholders = stmt.placeholders().len(),
                "loaded statement"
            );
            if let Some(previous) = statements.insert(stmt.id().to_string(), stmt) {
                tracing::debug!(id = previous.id(), "statement redeclared, keeping the last one");
            }
        }

        tracing::debug!(count = statements.len(), "statement registry built");
        Ok(Self { statements })
    }

    /// Build from the text of a `<sqlmap>` declaration document.
    pub fn from_document(document: &str) -> Result<Self, MapperError> {
        Self::from_declarations(parse_document(document)?)
    }

    /// Build from a `<sqlmap>` declaration document on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MapperError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading statement document");
        let document = std::fs::read_to_string(path)?;
        Self::from_document(&document)
    }

    pub fn get(&self, id: &str) -> Result<&Statement, MapperError> {
        self.statements
            .get(id)
            .ok_or_else(|| MapperError::StatementNotFound(id.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements ordered by id.
    #[must_use]
    pub fn statements(&self) -> Vec<&Statement> {
        let mut all: Vec<&Statement> = self.statements.values().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        all
    }
}
