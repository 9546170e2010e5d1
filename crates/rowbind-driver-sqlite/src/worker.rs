//! The thread that owns the SQLite connection.
//!
//! rusqlite connections are blocking and statements borrow their connection,
//! so every statement runs on a dedicated thread. The async side talks to it
//! over channels and a cursor holds a fetch channel into the statement that is
//! currently open.

use crate::Value;

use rowbind_core::{
    value::Value as CoreValue, CancellationToken, CommandBehavior, Error, Param, Result,
};
use rusqlite::Connection as RusqliteConnection;
use std::{
    sync::{mpsc, Arc},
    thread,
};
use tokio::sync::oneshot;

pub(crate) type Reply<T> = oneshot::Sender<Result<T>>;

/// Requests a single row from an open statement.
pub(crate) type FetchSender = mpsc::Sender<Reply<Option<Vec<CoreValue>>>>;

pub(crate) enum Request {
    Exec {
        sql: String,
        params: Vec<Param>,
        cancel: Option<CancellationToken>,
        reply: Reply<u64>,
    },
    Query {
        sql: String,
        params: Vec<Param>,
        behavior: CommandBehavior,
        cancel: Option<CancellationToken>,
        reply: Reply<CursorInit>,
    },
}

/// Sent back when a query starts. The statement stays open on the worker
/// until `fetch` is dropped.
pub(crate) struct CursorInit {
    pub(crate) columns: Arc<[String]>,
    pub(crate) first: Option<Vec<CoreValue>>,
    pub(crate) fetch: FetchSender,
}

pub(crate) fn spawn(connection: RusqliteConnection) -> Result<mpsc::Sender<Request>> {
    let (sender, receiver) = mpsc::channel();

    thread::Builder::new()
        .name("rowbind-sqlite".into())
        .spawn(move || run(connection, receiver))
        .map_err(Error::driver)?;

    Ok(sender)
}

fn run(connection: RusqliteConnection, receiver: mpsc::Receiver<Request>) {
    while let Ok(request) = receiver.recv() {
        match request {
            Request::Exec {
                sql,
                params,
                cancel,
                reply,
            } => {
                let res = if is_cancelled(&cancel) {
                    Err(Error::cancelled())
                } else {
                    exec(&connection, &sql, &params)
                };
                let _ = reply.send(res);
            }
            Request::Query {
                sql,
                params,
                behavior,
                cancel,
                reply,
            } => {
                if is_cancelled(&cancel) {
                    fail(reply, Error::cancelled());
                } else {
                    query(&connection, &sql, &params, behavior, reply);
                }
            }
        }
    }

    tracing::debug!("connection closed; stopping sqlite worker");
}

fn exec(connection: &RusqliteConnection, sql: &str, params: &[Param]) -> Result<u64> {
    let mut stmt = connection.prepare_cached(sql).map_err(driver_error)?;
    let params = bind(params);

    if stmt.column_count() == 0 {
        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(driver_error)?;
        return Ok(count as u64);
    }

    // Statements with a RETURNING clause or a result set still have to be
    // stepped to completion for their changes to apply.
    let mut rows = stmt
        .query(rusqlite::params_from_iter(params.iter()))
        .map_err(driver_error)?;

    while rows.next().map_err(driver_error)?.is_some() {}

    Ok(connection.changes() as u64)
}

/// Opens the statement and serves fetch requests until the cursor goes away.
fn query(
    connection: &RusqliteConnection,
    sql: &str,
    params: &[Param],
    behavior: CommandBehavior,
    reply: Reply<CursorInit>,
) {
    let mut stmt = match connection.prepare_cached(sql) {
        Ok(stmt) => stmt,
        Err(err) => return fail(reply, driver_error(err)),
    };

    let columns: Arc<[String]> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();
    let params = bind(params);

    let mut rows = match stmt.query(rusqlite::params_from_iter(params.iter())) {
        Ok(rows) => rows,
        Err(err) => return fail(reply, driver_error(err)),
    };

    let first = match step(&mut rows, width) {
        Ok(first) => first,
        Err(err) => return fail(reply, err),
    };

    let mut exhausted = first.is_none() || behavior == CommandBehavior::SingleRow;
    let (fetch, requests) = mpsc::channel();

    if reply
        .send(Ok(CursorInit {
            columns,
            first,
            fetch,
        }))
        .is_err()
    {
        // The caller stopped waiting. Dropping the init closed the fetch
        // channel, so there is nothing to serve.
        return;
    }

    while let Ok(reply) = requests.recv() {
        if exhausted {
            let _ = reply.send(Ok(None));
            continue;
        }

        let row = step(&mut rows, width);
        exhausted = !matches!(row, Ok(Some(_)));
        let _ = reply.send(row);
    }

    tracing::debug!("cursor dropped; releasing statement");
}

/// A request whose token fired while it was queued never starts.
fn is_cancelled(cancel: &Option<CancellationToken>) -> bool {
    cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
}

/// Interrupted statements surface as cancellations; SQLite has already rolled
/// them back by the time the error is returned.
fn driver_error(err: rusqlite::Error) -> Error {
    match err.sqlite_error_code() {
        Some(rusqlite::ErrorCode::OperationInterrupted) => Error::cancelled(),
        _ => Error::driver(err),
    }
}

fn fail<T>(reply: Reply<T>, err: Error) {
    tracing::debug!(%err, "query failed before the cursor opened");
    let _ = reply.send(Err(err));
}

fn step(rows: &mut rusqlite::Rows<'_>, width: usize) -> Result<Option<Vec<CoreValue>>> {
    let Some(row) = rows.next().map_err(driver_error)? else {
        return Ok(None);
    };

    (0..width)
        .map(|index| Value::from_sql(row, index).map_err(driver_error))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn bind(params: &[Param]) -> Vec<Value> {
    params
        .iter()
        .map(|param| Value::from(param.value.clone()))
        .collect()
}
