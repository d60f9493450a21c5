//! Dynamic field values for projected rows.

use std::fmt;

/// A single field of a projected row.
///
/// Projections are caller-chosen column lists, so rows come back as
/// heterogeneous values rather than a fixed struct. The storage crate
/// converts SQLite's own dynamic values into this type so nothing above
/// it needs a database dependency.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// One projected row, in projection order.
pub type Row = Vec<FieldValue>;

impl FieldValue {
    /// Borrow the text payload, if this field is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// Render a row the way the CLI prints it: `(a, b, c)`.
#[must_use]
pub fn format_row(row: &[FieldValue]) -> String {
    let fields: Vec<String> = row.iter().map(ToString::to_string).collect();
    format!("({})", fields.join(", "))
}

#[cfg(test)]
mod tests {
    use super::{FieldValue, format_row};

    #[test]
    fn formats_mixed_row() {
        let row = vec![
            FieldValue::Integer(7),
            FieldValue::Text("Alice".to_owned()),
            FieldValue::Null,
        ];
        assert_eq!(format_row(&row), "(7, Alice, NULL)");
    }

    #[test]
    fn as_text_only_for_text() {
        assert_eq!(FieldValue::Text("x".to_owned()).as_text(), Some("x"));
        assert_eq!(FieldValue::Integer(1).as_text(), None);
    }
}
