//! Column type tags and their DDL fragments.

/// Semantic column types accepted by `create_table`.
///
/// Each tag maps to exactly one literal SQLite schema fragment. `Integer`
/// doubles as the auto-assigned row identity, so its fragment carries the
/// primary-key clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Null,
    Integer,
    Real,
    Text,
    Date,
    Blob,
}

impl ColumnType {
    /// DDL fragment for this type. Total over the enum.
    #[must_use]
    pub const fn sql_fragment(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Integer => "INTEGER PRIMARY KEY AUTOINCREMENT",
            Self::Real => "REAL",
            Self::Text => "TEXT",
            Self::Date => "DATE",
            Self::Blob => "BLOB",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnType;

    #[test]
    fn integer_carries_primary_key_clause() {
        assert_eq!(ColumnType::Integer.sql_fragment(), "INTEGER PRIMARY KEY AUTOINCREMENT");
    }

    #[test]
    fn fragments_are_distinct() {
        let all = [
            ColumnType::Null,
            ColumnType::Integer,
            ColumnType::Real,
            ColumnType::Text,
            ColumnType::Date,
            ColumnType::Blob,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.sql_fragment(), b.sql_fragment());
            }
        }
    }
}
