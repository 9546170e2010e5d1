//! Traits implemented by database drivers.

use crate::{async_trait, Command, Result, Row};

/// How the driver should execute a command that returns rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandBehavior {
    #[default]
    Default,

    /// Only the first row will be read. Drivers may stop stepping the
    /// statement after it.
    SingleRow,
}

/// A forward-only, single-pass cursor over a result set.
///
/// Dropping the cursor releases the underlying statement.
#[async_trait]
pub trait RowCursor: Send {
    type Row: Row + Send;

    /// Returns `true` if the result set contains at least one row.
    ///
    /// This does not advance the cursor.
    fn has_rows(&self) -> bool;

    /// Fetches the next row, or `None` once the result set is exhausted.
    async fn next_row(&mut self) -> Result<Option<Self::Row>>;
}

/// An open database connection.
///
/// A cursor mutably borrows its connection, so at most one result set can be
/// open on a connection at a time.
///
/// Drivers that can abort a running statement should watch
/// [`Command::cancellation`] while executing and return
/// [`Error::cancelled`](crate::Error::cancelled) only once the statement has
/// been abandoned without effect.
#[async_trait]
pub trait Connection: Send {
    type Cursor<'c>: RowCursor + 'c
    where
        Self: 'c;

    /// Executes a command and returns the number of affected rows.
    async fn exec(&mut self, command: &Command) -> Result<u64>;

    /// Executes a command and opens a cursor over its result set.
    async fn open_cursor<'c>(
        &'c mut self,
        command: &Command,
        behavior: CommandBehavior,
    ) -> Result<Self::Cursor<'c>>;
}
