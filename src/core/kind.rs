use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared kind of a named statement.
///
/// Ordinals follow the declaration document order. 0 and 5 are the BEGIN/END
/// sentinels and never name a real kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum StatementKind {
    Select = 1,
    Insert = 2,
    Update = 3,
    Delete = 4,
}

impl StatementKind {
    const BEGIN: u8 = 0;
    const END: u8 = 5;

    /// All kinds, in document load order.
    pub const ALL: [Self; 4] = [Self::Select, Self::Insert, Self::Update, Self::Delete];

    /// Leading SQL keyword a statement of this kind must start with.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    /// Kind for a declaration document element name. Element names are lowercase.
    #[must_use]
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "select" => Some(Self::Select),
            "insert" => Some(Self::Insert),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl TryFrom<u8> for StatementKind {
    type Error = u8;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        if ordinal <= Self::BEGIN || ordinal >= Self::END {
            return Err(ordinal);
        }
        Ok(Self::ALL[usize::from(ordinal - 1)])
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_range() {
        assert_eq!(StatementKind::try_from(1), Ok(StatementKind::Select));
        assert_eq!(StatementKind::try_from(4), Ok(StatementKind::Delete));
        assert_eq!(StatementKind::try_from(0), Err(0));
        assert_eq!(StatementKind::try_from(5), Err(5));
    }

    #[test]
    fn test_from_element() {
        assert_eq!(StatementKind::from_element("update"), Some(StatementKind::Update));
        assert_eq!(StatementKind::from_element("SELECT"), None);
        assert_eq!(StatementKind::from_element("procedure"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(StatementKind::Insert.to_string(), "INSERT");
    }
}
