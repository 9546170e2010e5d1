use crate::{worker::FetchSender, Connection};

use rowbind_core::{async_trait, err, value::Value, Error, Result, Row, RowCursor};
use std::{marker::PhantomData, sync::Arc};
use tokio::sync::oneshot;

/// A row read from SQLite.
#[derive(Debug, Clone)]
pub struct SqliteRow {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl SqliteRow {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn position(&self, column: &str) -> Option<usize> {
        // SQLite resolves identifiers case-insensitively, so fall back to that
        // when there is no exact match.
        self.columns
            .iter()
            .position(|name| name == column)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|name| name.eq_ignore_ascii_case(column))
            })
    }
}

impl Row for SqliteRow {
    fn value(&self, column: &str) -> Result<&Value> {
        self.position(column)
            .map(|index| &self.values[index])
            .ok_or_else(|| Error::column_not_found(column))
    }

    fn value_at(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or_else(|| {
            err!(
                "column index {index} out of range; the result has {} columns",
                self.values.len()
            )
        })
    }
}

/// Forward-only cursor over a statement running on the connection's worker.
///
/// The statement is finalized when the cursor is dropped.
#[derive(Debug)]
pub struct Cursor<'c> {
    columns: Arc<[String]>,
    first: Option<Vec<Value>>,
    has_rows: bool,
    fetch: FetchSender,
    _connection: PhantomData<&'c mut Connection>,
}

impl Cursor<'_> {
    pub(crate) fn new(
        columns: Arc<[String]>,
        first: Option<Vec<Value>>,
        fetch: FetchSender,
    ) -> Self {
        Self {
            columns,
            has_rows: first.is_some(),
            first,
            fetch,
            _connection: PhantomData,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn row(&self, values: Vec<Value>) -> SqliteRow {
        SqliteRow {
            columns: self.columns.clone(),
            values,
        }
    }
}

#[async_trait]
impl RowCursor for Cursor<'_> {
    type Row = SqliteRow;

    fn has_rows(&self) -> bool {
        self.has_rows
    }

    async fn next_row(&mut self) -> Result<Option<SqliteRow>> {
        if let Some(values) = self.first.take() {
            return Ok(Some(self.row(values)));
        }

        let (tx, rx) = oneshot::channel();

        self.fetch
            .send(tx)
            .map_err(|_| err!("sqlite worker is no longer running"))?;

        let values = rx
            .await
            .map_err(|_| err!("sqlite worker dropped the fetch request"))??;

        Ok(values.map(|values| self.row(values)))
    }
}
