//! Mapping rows from an open cursor.

use crate::FromRow;

use rowbind_core::{CancellationToken, Error, Result, Row, RowCursor};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio_stream::{Stream, StreamExt};

/// Maps the rows of an open [`RowCursor`].
///
/// The reader owns the cursor. Every mapping method consumes the reader, and
/// the cursor is released when the method returns or, for streams, when the
/// stream is dropped.
pub struct Reader<C> {
    cursor: C,
    cancel: Option<CancellationToken>,
}

impl<C: RowCursor> Reader<C> {
    pub fn new(cursor: C) -> Reader<C> {
        Reader {
            cursor,
            cancel: None,
        }
    }

    /// Aborts pending fetches with a cancellation error once `token` fires.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Reader<C> {
        self.cancel = Some(token);
        self
    }

    pub fn has_rows(&self) -> bool {
        self.cursor.has_rows()
    }

    /// Maps the first row, if any. Remaining rows are ignored.
    pub async fn map_single<T: FromRow>(self) -> Result<Option<T>> {
        self.map_single_with(|row| T::from_row(row)).await
    }

    pub async fn map_single_with<T, F>(self, f: F) -> Result<Option<T>>
    where
        F: FnOnce(&dyn Row) -> Result<T>,
    {
        let Reader { mut cursor, cancel } = self;

        if !cursor.has_rows() {
            return Ok(None);
        }

        match fetch(&mut cursor, cancel.as_ref()).await? {
            Some(row) => f(&row).map(Some),
            None => Ok(None),
        }
    }

    /// Maps every row, lazily. Nothing is fetched until the stream is polled
    /// and each poll fetches at most one row. Once the cancellation token has
    /// fired, the next poll fails without fetching.
    pub fn map_all<'a, T>(self) -> RowStream<'a, T>
    where
        C: 'a,
        T: FromRow + Send + 'a,
    {
        self.map_all_with(|row| T::from_row(row))
    }

    pub fn map_all_with<'a, T, F>(self, mut f: F) -> RowStream<'a, T>
    where
        C: 'a,
        T: Send + 'a,
        F: FnMut(&dyn Row) -> Result<T> + Send + 'a,
    {
        let Reader { cursor, cancel } = self;

        RowStream::new(async_stream::try_stream! {
            // Owned by the stream body so it drops on every exit path.
            let mut cursor = cursor;

            if cursor.has_rows() {
                loop {
                    if cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                        Err::<(), Error>(Error::cancelled())?;
                    }

                    let Some(row) = fetch(&mut cursor, cancel.as_ref()).await? else {
                        break;
                    };

                    let item = f(&row)?;
                    yield item;
                }
            }
        })
    }
}

async fn fetch<C: RowCursor>(
    cursor: &mut C,
    cancel: Option<&CancellationToken>,
) -> Result<Option<C::Row>> {
    let row = cancellable(cancel, cursor.next_row()).await?;

    if row.is_some() {
        tracing::trace!("fetched row");
    }

    Ok(row)
}

/// Runs `future`, resolving to a cancellation error if `cancel` fires while
/// it is pending. A result that is already available wins.
async fn cancellable<T>(
    cancel: Option<&CancellationToken>,
    future: impl Future<Output = Result<T>>,
) -> Result<T> {
    let Some(token) = cancel else {
        return future.await;
    };

    tokio::select! {
        biased;
        res = future => res,
        _ = token.cancelled() => Err(Error::cancelled()),
    }
}

/// Collections a [`RowStream`] can be collected into.
pub trait FromRowStream<A>: Extend<A> + Default {}

impl<A, T: Extend<A> + Default> FromRowStream<A> for T {}

/// A lazy, single-pass stream of mapped rows.
///
/// Once the stream has ended it keeps returning `None`.
pub struct RowStream<'a, T> {
    inner: Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>,
    done: bool,
}

impl<'a, T> RowStream<'a, T> {
    pub(crate) fn new(stream: impl Stream<Item = Result<T>> + Send + 'a) -> RowStream<'a, T> {
        RowStream {
            inner: Box::pin(stream),
            done: false,
        }
    }

    /// Returns the next mapped row.
    pub async fn next(&mut self) -> Option<Result<T>> {
        StreamExt::next(self).await
    }

    /// Collects every remaining row.
    pub async fn collect<B>(mut self) -> Result<B>
    where
        B: FromRowStream<T>,
    {
        let mut ret = B::default();

        while let Some(res) = self.next().await {
            ret.extend(Some(res?));
        }

        Ok(ret)
    }
}

impl<T> Stream for RowStream<'_, T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.done {
            return Poll::Ready(None);
        }

        let item = self.inner.as_mut().poll_next(cx);

        if let Poll::Ready(None) = item {
            self.done = true;
        }

        item
    }
}

impl<T> std::fmt::Debug for RowStream<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowStream").field("done", &self.done).finish()
    }
}
