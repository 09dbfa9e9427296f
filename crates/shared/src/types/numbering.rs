//! Document numbering convention.
//!
//! Journal entries and commercial documents carry sequential human-readable
//! numbers (`JE-000001`, `SO-000045`, `PO-000045`): a fixed prefix per
//! document kind and a 6-digit zero-padded, monotonically increasing sequence.
//! The sequence itself is allocated by the database layer from the
//! `document_sequences` counter table; this module only owns the format.

use serde::{Deserialize, Serialize};

/// Kinds of sequentially numbered documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Journal entry (`JE-`).
    JournalEntry,
    /// Sales order (`SO-`).
    SalesOrder,
    /// Purchase order (`PO-`).
    PurchaseOrder,
}

impl DocumentKind {
    /// Returns the number prefix for this document kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::JournalEntry => "JE",
            Self::SalesOrder => "SO",
            Self::PurchaseOrder => "PO",
        }
    }

    /// Returns the key under which this kind's counter is persisted.
    #[must_use]
    pub const fn sequence_key(self) -> &'static str {
        match self {
            Self::JournalEntry => "journal_entry",
            Self::SalesOrder => "sales_order",
            Self::PurchaseOrder => "purchase_order",
        }
    }
}

/// A formatted document number such as `JE-000123`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    /// Formats a sequence value as a document number.
    ///
    /// Sequences above 999999 widen past six digits rather than wrap.
    #[must_use]
    pub fn format(kind: DocumentKind, sequence: i64) -> Self {
        Self(format!("{}-{:06}", kind.prefix(), sequence))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DocumentNumber> for String {
    fn from(number: DocumentNumber) -> Self {
        number.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DocumentKind::JournalEntry, 1, "JE-000001")]
    #[case(DocumentKind::JournalEntry, 123, "JE-000123")]
    #[case(DocumentKind::SalesOrder, 45, "SO-000045")]
    #[case(DocumentKind::PurchaseOrder, 45, "PO-000045")]
    #[case(DocumentKind::SalesOrder, 999_999, "SO-999999")]
    #[case(DocumentKind::PurchaseOrder, 1_000_000, "PO-1000000")]
    fn test_format(#[case] kind: DocumentKind, #[case] seq: i64, #[case] expected: &str) {
        assert_eq!(DocumentNumber::format(kind, seq).as_str(), expected);
    }

    #[test]
    fn test_sequence_keys_are_distinct() {
        assert_ne!(
            DocumentKind::JournalEntry.sequence_key(),
            DocumentKind::SalesOrder.sequence_key()
        );
        assert_ne!(
            DocumentKind::SalesOrder.sequence_key(),
            DocumentKind::PurchaseOrder.sequence_key()
        );
    }
}
