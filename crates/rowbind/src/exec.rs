use crate::{
    reader::{Reader, RowStream},
    FromRow,
};

use async_trait::async_trait;
use rowbind_core::{Command, CommandBehavior, Connection, Error, FromValue, Result, Row};

/// Command execution and row mapping on any [`Connection`].
///
/// A cancellation token attached with [`Command::with_cancellation`] is
/// checked before the command is sent and applies to every row fetch. While
/// the command runs, the driver observes the token itself so it can abort the
/// statement before reporting the cancellation.
#[async_trait]
pub trait Execute: Connection {
    /// Executes `command`, returning the number of affected rows.
    async fn execute(&mut self, command: &Command) -> Result<u64>;

    /// Maps the first row of the result, or returns `None` if there is none.
    async fn query_single<T>(&mut self, command: &Command) -> Result<Option<T>>
    where
        T: FromRow + Send;

    async fn query_single_with<T, F>(&mut self, command: &Command, f: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&dyn Row) -> Result<T> + Send;

    /// Maps every row of the result as a lazy stream. The command is not
    /// executed until the stream is first polled.
    fn query_all<'a, T>(&'a mut self, command: &'a Command) -> RowStream<'a, T>
    where
        T: FromRow + Send + 'a;

    fn query_all_with<'a, T, F>(&'a mut self, command: &'a Command, f: F) -> RowStream<'a, T>
    where
        T: Send + 'a,
        F: FnMut(&dyn Row) -> Result<T> + Send + 'a;

    /// Returns the first column of the first row, or `None` if there are no rows.
    async fn query_scalar<T>(&mut self, command: &Command) -> Result<Option<T>>
    where
        T: FromValue + Send;
}

#[async_trait]
impl<C: Connection> Execute for C {
    async fn execute(&mut self, command: &Command) -> Result<u64> {
        log_command("execute", command);
        check_cancelled(command)?;
        self.exec(command).await
    }

    async fn query_single<T>(&mut self, command: &Command) -> Result<Option<T>>
    where
        T: FromRow + Send,
    {
        self.query_single_with(command, |row| T::from_row(row)).await
    }

    async fn query_single_with<T, F>(&mut self, command: &Command, f: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&dyn Row) -> Result<T> + Send,
    {
        log_command("query_single", command);
        check_cancelled(command)?;

        let cursor = self
            .open_cursor(command, CommandBehavior::SingleRow)
            .await?;

        reader_for(cursor, command).map_single_with(f).await
    }

    fn query_all<'a, T>(&'a mut self, command: &'a Command) -> RowStream<'a, T>
    where
        T: FromRow + Send + 'a,
    {
        self.query_all_with(command, |row| T::from_row(row))
    }

    fn query_all_with<'a, T, F>(&'a mut self, command: &'a Command, f: F) -> RowStream<'a, T>
    where
        T: Send + 'a,
        F: FnMut(&dyn Row) -> Result<T> + Send + 'a,
    {
        RowStream::new(async_stream::try_stream! {
            log_command("query_all", command);
            check_cancelled(command)?;

            let cursor = self
                .open_cursor(command, CommandBehavior::Default)
                .await?;

            let mut rows = reader_for(cursor, command).map_all_with(f);

            while let Some(item) = rows.next().await {
                let item = item?;
                yield item;
            }
        })
    }

    async fn query_scalar<T>(&mut self, command: &Command) -> Result<Option<T>>
    where
        T: FromValue + Send,
    {
        self.query_single_with(command, |row| row.value_at(0)?.to::<T>())
            .await
    }
}

fn reader_for<R: rowbind_core::RowCursor>(cursor: R, command: &Command) -> Reader<R> {
    let reader = Reader::new(cursor);

    match command.cancellation() {
        Some(token) => reader.with_cancellation(token.clone()),
        None => reader,
    }
}

fn check_cancelled(command: &Command) -> Result<()> {
    match command.cancellation() {
        Some(token) if token.is_cancelled() => Err(Error::cancelled()),
        _ => Ok(()),
    }
}

fn log_command(operation: &'static str, command: &Command) {
    tracing::debug!(
        operation,
        params = command.params().len(),
        "{}",
        command.text()
    );
}
