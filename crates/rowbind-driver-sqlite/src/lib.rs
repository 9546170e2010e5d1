mod cursor;
pub use cursor::{Cursor, SqliteRow};

mod value;
pub(crate) use value::Value;

mod worker;
use worker::{CursorInit, Request};

use rowbind_core::{async_trait, err, CancellationToken, Command, CommandBehavior, Error, Result};
use rusqlite::{Connection as RusqliteConnection, InterruptHandle};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    sync::mpsc,
};
use tokio::sync::oneshot;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite configuration from a connection URL such as
    /// `sqlite::memory:` or `sqlite:/path/to/app.db`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    pub async fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

/// A SQLite connection. Statements run on a worker thread that owns the
/// underlying rusqlite connection and stops when this handle is dropped.
///
/// When a command's cancellation token fires while its statement runs, the
/// statement is interrupted and the call returns a cancellation error only
/// after SQLite has rolled it back. A statement that finished first reports
/// its real result.
pub struct Connection {
    worker: mpsc::Sender<Request>,
    interrupt: InterruptHandle,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Self::spawn(connection)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Self::spawn(connection)
    }

    fn spawn(connection: RusqliteConnection) -> Result<Self> {
        let interrupt = connection.get_interrupt_handle();

        Ok(Self {
            worker: worker::spawn(connection)?,
            interrupt,
        })
    }

    async fn request<T>(
        &self,
        cancel: Option<&CancellationToken>,
        f: impl FnOnce(worker::Reply<T>) -> Request,
    ) -> Result<T> {
        let (tx, mut rx) = oneshot::channel();

        self.worker
            .send(f(tx))
            .map_err(|_| err!("sqlite worker is no longer running"))?;

        if let Some(token) = cancel {
            tokio::select! {
                res = &mut rx => return flatten(res),
                _ = token.cancelled() => {
                    tracing::debug!("cancellation requested; interrupting statement");
                    self.interrupt.interrupt();
                }
            }
        }

        // Wait for the worker even after an interrupt so the statement has
        // been rolled back (or has completed) before the caller sees a result.
        flatten(rx.await)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

fn flatten<T>(res: std::result::Result<Result<T>, oneshot::error::RecvError>) -> Result<T> {
    res.map_err(|_| err!("sqlite worker dropped the request"))?
}

#[async_trait]
impl rowbind_core::Connection for Connection {
    type Cursor<'c>
        = Cursor<'c>
    where
        Self: 'c;

    async fn exec(&mut self, command: &Command) -> Result<u64> {
        let sql = command.text().to_string();
        let params = command.params().to_vec();
        let cancel = command.cancellation();

        self.request(cancel, |reply| Request::Exec {
            sql,
            params,
            cancel: cancel.cloned(),
            reply,
        })
        .await
    }

    async fn open_cursor<'c>(
        &'c mut self,
        command: &Command,
        behavior: CommandBehavior,
    ) -> Result<Cursor<'c>> {
        let sql = command.text().to_string();
        let params = command.params().to_vec();

        let CursorInit {
            columns,
            first,
            fetch,
        } = self
            .request(command.cancellation(), |reply| Request::Query {
                sql,
                params,
                behavior,
                cancel: command.cancellation().cloned(),
                reply,
            })
            .await?;

        Ok(Cursor::new(columns, first, fetch))
    }
}
