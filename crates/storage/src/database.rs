//! The storage gateway: one connection, schema and data operations.
//!
//! Trust boundary: table, index, and column names are structural SQL and
//! are interpolated into statement text after validation against a strict
//! identifier allow-list; they are caller-controlled, not end-user input.
//! Row values (including LIKE patterns) are always bound as parameters.
//! SQLite cannot bind identifiers, so widening the allow-list instead of
//! parameterizing is the supported extension point.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use findex_core::{ColumnType, FieldValue, NewUser, Row, age_on, parse_birthdate};
use regex::Regex;
use rusqlite::{Connection, params, types::Value};

use crate::error::{Result, StoreError};

/// Accepted database file extensions.
const ACCEPTED_EXTENSIONS: [&str; 2] = [".db", ".sqlite3"];

/// Projected column that holds the birthdate in age-augmented reads.
const BIRTHDATE_COLUMN: usize = 1;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern compiles")
});

/// Gateway over a single embedded SQLite file.
///
/// Holds exactly one connection for the process lifetime, shareable across
/// callers and threads. All operations are synchronous and run to
/// completion before returning.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

fn check_identifier(name: &str) -> std::result::Result<(), String> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(format!("malformed SQL identifier {name:?}"))
    }
}

fn from_sql_value(value: Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Null,
        Value::Integer(i) => FieldValue::Integer(i),
        Value::Real(r) => FieldValue::Real(r),
        Value::Text(s) => FieldValue::Text(s),
        Value::Blob(b) => FieldValue::Blob(b),
    }
}

impl Database {
    /// Open (creating if absent) the database file `filename` inside `dir`.
    ///
    /// The directory must already exist and the file name must carry one of
    /// the accepted extensions; both checks happen before SQLite sees the
    /// path. The connection is configured once here and reused for every
    /// subsequent operation.
    pub fn open(dir: &Path, filename: &str) -> Result<Self> {
        if !dir.is_dir() {
            return Err(StoreError::InvalidPath { path: PathBuf::from(dir) });
        }
        if !ACCEPTED_EXTENSIONS.iter().any(|ext| filename.ends_with(ext)) {
            return Err(StoreError::InvalidFilename { name: filename.to_owned() });
        }

        let path = dir.join(filename);
        let conn = Connection::open(&path)
            .map_err(|e| StoreError::schema(format!("open {}", path.display()), Some(e)))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .and_then(|()| conn.pragma_update(None, "synchronous", "NORMAL"))
            .and_then(|()| conn.pragma_update(None, "busy_timeout", 5000i32))
            .map_err(|e| StoreError::schema("apply connection pragmas", Some(e)))?;

        tracing::debug!(path = %path.display(), "database opened");
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    fn lock_conn(&self) -> std::result::Result<MutexGuard<'_, Connection>, String> {
        self.conn.lock().map_err(|e| format!("connection lock poisoned: {e}"))
    }

    /// Idempotent `CREATE TABLE IF NOT EXISTS`.
    ///
    /// `columns` is an ordered list of name/type pairs rendered through
    /// [`ColumnType::sql_fragment`]. A non-empty `unique` adds a table-level
    /// `UNIQUE(...)` constraint over those columns, which is what gives the
    /// conflict-ignoring inserts something to ignore.
    pub fn create_table(
        &self,
        table: &str,
        columns: &[(&str, ColumnType)],
        unique: &[&str],
    ) -> Result<()> {
        check_identifier(table).map_err(|c| StoreError::schema(c, None))?;
        for (name, _) in columns {
            check_identifier(name).map_err(|c| StoreError::schema(c, None))?;
        }
        for name in unique {
            check_identifier(name).map_err(|c| StoreError::schema(c, None))?;
        }

        let mut defs: Vec<String> = columns
            .iter()
            .map(|(name, ty)| format!("{name} {}", ty.sql_fragment()))
            .collect();
        if !unique.is_empty() {
            defs.push(format!("UNIQUE({})", unique.join(", ")));
        }
        let sql = format!("CREATE TABLE IF NOT EXISTS {table} ({})", defs.join(", "));

        let conn = self.lock_conn().map_err(|c| StoreError::schema(c, None))?;
        conn.execute_batch(&sql)
            .map_err(|e| StoreError::schema(format!("create table {table}"), Some(e)))?;
        tracing::info!(table, "table ensured");
        Ok(())
    }

    /// Idempotent `DROP TABLE IF EXISTS`.
    pub fn drop_table(&self, table: &str) -> Result<()> {
        check_identifier(table).map_err(|c| StoreError::schema(c, None))?;
        let conn = self.lock_conn().map_err(|c| StoreError::schema(c, None))?;
        conn.execute_batch(&format!("DROP TABLE IF EXISTS {table}"))
            .map_err(|e| StoreError::schema(format!("drop table {table}"), Some(e)))?;
        tracing::info!(table, "table dropped");
        Ok(())
    }

    /// Insert one record. The id slot is always the `NULL` placeholder;
    /// uniqueness conflicts are silently skipped.
    pub fn insert(&self, table: &str, user: &NewUser) -> Result<()> {
        check_identifier(table).map_err(|c| StoreError::write(c, None))?;
        let conn = self.lock_conn().map_err(|c| StoreError::write(c, None))?;
        conn.execute(
            &format!("INSERT OR IGNORE INTO {table} VALUES (NULL, ?1, ?2, ?3)"),
            params![user.name, user.birthdate, user.gender],
        )
        .map_err(|e| StoreError::write(format!("insert into {table}"), Some(e)))?;
        Ok(())
    }

    /// Batched insert with the same conflict-ignoring semantics as
    /// [`Database::insert`], one statement prepared for the whole batch and
    /// a single commit. Any failure aborts the transaction.
    pub fn insert_many(&self, table: &str, users: &[NewUser]) -> Result<()> {
        check_identifier(table).map_err(|c| StoreError::write(c, None))?;
        let mut conn = self.lock_conn().map_err(|c| StoreError::write(c, None))?;
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::write(format!("begin batch insert into {table}"), Some(e)))?;
        {
            let mut stmt = tx
                .prepare(&format!("INSERT OR IGNORE INTO {table} VALUES (NULL, ?1, ?2, ?3)"))
                .map_err(|e| StoreError::write(format!("prepare insert into {table}"), Some(e)))?;
            for user in users {
                stmt.execute(params![user.name, user.birthdate, user.gender])
                    .map_err(|e| StoreError::write(format!("insert into {table}"), Some(e)))?;
            }
        }
        tx.commit()
            .map_err(|e| StoreError::write(format!("commit batch insert into {table}"), Some(e)))?;
        tracing::info!(table, rows = users.len(), "batch insert committed");
        Ok(())
    }

    /// Every row projected to `columns`, sorted ascending by `order_by`,
    /// with the computed age appended. Uses the local wall-clock date.
    pub fn read_all(&self, table: &str, columns: &[&str], order_by: &str) -> Result<Vec<Row>> {
        self.read_all_as_of(table, columns, order_by, Local::now().date_naive())
    }

    /// [`Database::read_all`] with an explicit "today" for the age
    /// derivation, so results are deterministic under test.
    ///
    /// The second projected column must hold the ISO-8601 birthdate.
    pub fn read_all_as_of(
        &self,
        table: &str,
        columns: &[&str],
        order_by: &str,
        today: NaiveDate,
    ) -> Result<Vec<Row>> {
        check_projection(table, columns)?;
        check_identifier(order_by).map_err(|c| StoreError::query(c, None))?;

        let sql =
            format!("SELECT {} FROM {table} ORDER BY {order_by} ASC", columns.join(", "));
        let conn = self.lock_conn().map_err(|c| StoreError::query(c, None))?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::query(format!("read from {table}"), Some(e)))?;
        let mut rows = stmt
            .query([])
            .map_err(|e| StoreError::query(format!("read from {table}"), Some(e)))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| StoreError::query("read row", Some(e)))? {
            out.push(augment_with_age(row, columns.len(), today)?);
        }
        Ok(out)
    }

    /// Rows where `column` matches the LIKE `pattern`, projected to
    /// `columns` with the computed age appended. The pattern is bound as a
    /// value, never spliced into the statement.
    pub fn read_filtered(
        &self,
        table: &str,
        column: &str,
        pattern: &str,
        columns: &[&str],
    ) -> Result<Vec<Row>> {
        self.read_filtered_as_of(table, column, pattern, columns, Local::now().date_naive())
    }

    /// [`Database::read_filtered`] with an explicit "today".
    pub fn read_filtered_as_of(
        &self,
        table: &str,
        column: &str,
        pattern: &str,
        columns: &[&str],
        today: NaiveDate,
    ) -> Result<Vec<Row>> {
        check_projection(table, columns)?;
        check_identifier(column).map_err(|c| StoreError::query(c, None))?;

        let sql =
            format!("SELECT {} FROM {table} WHERE {column} LIKE ?1", columns.join(", "));
        let conn = self.lock_conn().map_err(|c| StoreError::query(c, None))?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::query(format!("read from {table}"), Some(e)))?;
        let mut rows = stmt
            .query(params![pattern])
            .map_err(|e| StoreError::query(format!("read from {table}"), Some(e)))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| StoreError::query("read row", Some(e)))? {
            out.push(augment_with_age(row, columns.len(), today)?);
        }
        Ok(out)
    }

    /// All columns of the rows whose name starts with `F` and whose gender
    /// code is `M`. The predicate is fixed; it is the one the partial index
    /// from [`Database::create_index`] covers. No age augmentation here.
    pub fn find_f_names(&self, table: &str) -> Result<Vec<Row>> {
        check_identifier(table).map_err(|c| StoreError::query(c, None))?;

        let sql = format!("SELECT * FROM {table} WHERE name LIKE 'F%' AND gender = 'M'");
        let conn = self.lock_conn().map_err(|c| StoreError::query(c, None))?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::query(format!("read from {table}"), Some(e)))?;
        let width = stmt.column_count();
        let mut rows = stmt
            .query([])
            .map_err(|e| StoreError::query(format!("read from {table}"), Some(e)))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| StoreError::query("read row", Some(e)))? {
            let mut fields = Vec::with_capacity(width);
            for i in 0..width {
                let value: Value =
                    row.get(i).map_err(|e| StoreError::query("read field", Some(e)))?;
                fields.push(from_sql_value(value));
            }
            out.push(fields);
        }
        Ok(out)
    }

    /// Idempotent partial index over `(name, gender)`, restricted to the
    /// fixed predicate served by [`Database::find_f_names`].
    pub fn create_index(&self, table: &str, index: &str) -> Result<()> {
        check_identifier(table).map_err(|c| StoreError::schema(c, None))?;
        check_identifier(index).map_err(|c| StoreError::schema(c, None))?;

        let sql = format!(
            "CREATE INDEX IF NOT EXISTS {index} ON {table} (name, gender) \
             WHERE name LIKE 'F%' AND gender = 'M'"
        );
        let conn = self.lock_conn().map_err(|c| StoreError::schema(c, None))?;
        conn.execute_batch(&sql)
            .map_err(|e| StoreError::schema(format!("create index {index}"), Some(e)))?;
        tracing::info!(table, index, "partial index ensured");
        Ok(())
    }

    /// Idempotent `DROP INDEX IF EXISTS`.
    pub fn drop_index(&self, index: &str) -> Result<()> {
        check_identifier(index).map_err(|c| StoreError::schema(c, None))?;
        let conn = self.lock_conn().map_err(|c| StoreError::schema(c, None))?;
        conn.execute_batch(&format!("DROP INDEX IF EXISTS {index}"))
            .map_err(|e| StoreError::schema(format!("drop index {index}"), Some(e)))?;
        tracing::info!(index, "index dropped");
        Ok(())
    }
}

fn check_projection(table: &str, columns: &[&str]) -> Result<()> {
    check_identifier(table).map_err(|c| StoreError::query(c, None))?;
    for name in columns {
        check_identifier(name).map_err(|c| StoreError::query(c, None))?;
    }
    if columns.len() <= BIRTHDATE_COLUMN {
        return Err(StoreError::query(
            "projection must include the birthdate as its second column",
            None,
        ));
    }
    Ok(())
}

fn augment_with_age(row: &rusqlite::Row<'_>, width: usize, today: NaiveDate) -> Result<Row> {
    let mut fields = Vec::with_capacity(width + 1);
    for i in 0..width {
        let value: Value = row.get(i).map_err(|e| StoreError::query("read field", Some(e)))?;
        fields.push(from_sql_value(value));
    }

    let stored = fields[BIRTHDATE_COLUMN]
        .as_text()
        .ok_or_else(|| StoreError::query("birthdate column is not text", None))?;
    let birth = parse_birthdate(stored).map_err(|e| StoreError::query(e.to_string(), None))?;
    fields.push(FieldValue::Integer(i64::from(age_on(birth, today))));
    Ok(fields)
}
