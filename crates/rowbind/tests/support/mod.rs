#![allow(dead_code)]

use rowbind::{
    async_trait, Command, CommandBehavior, Connection, Error, Result, Row, RowCursor, Value,
};
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

pub struct MockRow {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row for MockRow {
    fn value(&self, column: &str) -> Result<&Value> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|index| &self.values[index])
            .ok_or_else(|| Error::column_not_found(column))
    }

    fn value_at(&self, index: usize) -> Result<&Value> {
        self.values
            .get(index)
            .ok_or_else(|| rowbind::err!("column index {index} out of range"))
    }
}

/// Observes a cursor from the outside.
#[derive(Clone, Default)]
pub struct CursorTracker {
    fetches: Arc<AtomicUsize>,
    released: Arc<AtomicBool>,
}

impl CursorTracker {
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

pub struct MockCursor {
    columns: Arc<[String]>,
    rows: VecDeque<Vec<Value>>,
    has_rows: bool,
    pending: bool,
    tracker: CursorTracker,
}

impl MockCursor {
    pub fn new(columns: &[&str], rows: Vec<Vec<Value>>) -> (MockCursor, CursorTracker) {
        let tracker = CursorTracker::default();
        let cursor = MockCursor {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            has_rows: !rows.is_empty(),
            rows: rows.into(),
            pending: false,
            tracker: tracker.clone(),
        };
        (cursor, tracker)
    }

    /// Fetches never complete.
    pub fn pending(mut self) -> MockCursor {
        self.pending = true;
        self
    }
}

impl Drop for MockCursor {
    fn drop(&mut self) {
        self.tracker.released.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl RowCursor for MockCursor {
    type Row = MockRow;

    fn has_rows(&self) -> bool {
        self.has_rows
    }

    async fn next_row(&mut self) -> Result<Option<MockRow>> {
        self.tracker.fetches.fetch_add(1, Ordering::SeqCst);

        if self.pending {
            std::future::pending::<()>().await;
        }

        Ok(self.rows.pop_front().map(|values| MockRow {
            columns: self.columns.clone(),
            values,
        }))
    }
}

/// Serves the same result set for every query and records what ran.
pub struct MockConnection {
    columns: Vec<&'static str>,
    rows: Vec<Vec<Value>>,
    affected: u64,
    pub log: Arc<Mutex<Vec<(String, Option<CommandBehavior>)>>>,
    pub tracker: Arc<Mutex<Option<CursorTracker>>>,
}

impl MockConnection {
    pub fn new(columns: &[&'static str], rows: Vec<Vec<Value>>) -> MockConnection {
        MockConnection {
            columns: columns.to_vec(),
            rows,
            affected: 0,
            log: Arc::default(),
            tracker: Arc::default(),
        }
    }

    pub fn affected(mut self, affected: u64) -> MockConnection {
        self.affected = affected;
        self
    }

    pub fn log(&self) -> Vec<(String, Option<CommandBehavior>)> {
        self.log.lock().unwrap().clone()
    }

    pub fn last_tracker(&self) -> Option<CursorTracker> {
        self.tracker.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connection for MockConnection {
    type Cursor<'c>
        = MockCursor
    where
        Self: 'c;

    async fn exec(&mut self, command: &Command) -> Result<u64> {
        self.log.lock().unwrap().push((command.text().to_string(), None));
        Ok(self.affected)
    }

    async fn open_cursor<'c>(
        &'c mut self,
        command: &Command,
        behavior: CommandBehavior,
    ) -> Result<Self::Cursor<'c>> {
        self.log
            .lock()
            .unwrap()
            .push((command.text().to_string(), Some(behavior)));

        let (cursor, tracker) = MockCursor::new(&self.columns, self.rows.clone());
        *self.tracker.lock().unwrap() = Some(tracker);
        Ok(cursor)
    }
}

pub fn todo_rows() -> Vec<Vec<Value>> {
    vec![
        vec![
            Value::I64(1),
            Value::String("Do the groceries".into()),
            Value::String("Don't forget to buy milk!".into()),
            Value::I64(0),
        ],
        vec![
            Value::I64(2),
            Value::String("Give the dog a bath".into()),
            Value::Null,
            Value::I64(1),
        ],
        vec![
            Value::I64(3),
            Value::String("Wash the car".into()),
            Value::Null,
            Value::I64(0),
        ],
    ]
}

pub const TODO_COLUMNS: &[&str] = &["Id", "Title", "Note", "IsComplete"];
