//! Parameterized commands and the builder that assembles them from interleaved
//! literal text and values.

use crate::{CancellationToken, Param, ToParam};

use std::fmt::Write;

/// Placeholder syntax used when a value is appended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flavor {
    /// `?1`, `?2`, ...
    #[default]
    Sqlite,

    /// `$1`, `$2`, ...
    Postgresql,

    /// `?` for every parameter
    Mysql,
}

/// A command text plus the parameters its placeholders refer to.
///
/// Placeholder `N` (1-based) corresponds to `params()[N - 1]`.
#[derive(Debug, Clone, Default)]
pub struct Command {
    text: String,
    params: Vec<Param>,
    cancel: Option<CancellationToken>,
}

impl Command {
    /// Creates a command without parameters.
    pub fn new(text: impl Into<String>) -> Command {
        Command {
            text: text.into(),
            params: vec![],
            cancel: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Attaches a token that aborts execution and row fetches when cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Command {
        self.cancel = Some(token);
        self
    }

    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    pub fn into_parts(self) -> (String, Vec<Param>) {
        (self.text, self.params)
    }
}

impl From<&str> for Command {
    fn from(text: &str) -> Command {
        Command::new(text)
    }
}

impl From<String> for Command {
    fn from(text: String) -> Command {
        Command::new(text)
    }
}

/// Builds a [`Command`] by walking literal segments and values in order.
///
/// Literal text is copied unchanged. Each value is assigned the next 1-based
/// index, a placeholder for that index is appended to the text and the value
/// is recorded as a parameter. Values never appear in the text.
///
/// ```
/// use rowbind_core::CommandBuilder;
///
/// let x = 5;
/// let y = "O'Brien";
///
/// let mut builder = CommandBuilder::new();
/// builder.append_literal("INSERT INTO t(a,b) VALUES(");
/// builder.append_value(&x);
/// builder.append_literal(",");
/// builder.append_value(y);
/// builder.append_literal(") RETURNING *");
///
/// let command = builder.build();
/// assert_eq!(command.text(), "INSERT INTO t(a,b) VALUES(?1,?2) RETURNING *");
/// assert_eq!(command.params().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct CommandBuilder {
    flavor: Flavor,
    text: String,
    params: Vec<Param>,
}

impl CommandBuilder {
    pub fn new() -> CommandBuilder {
        CommandBuilder::default()
    }

    /// Pre-sizes the buffers for `literal_len` bytes of literal text and
    /// `value_count` values.
    pub fn with_capacity(literal_len: usize, value_count: usize) -> CommandBuilder {
        CommandBuilder {
            flavor: Flavor::default(),
            // Each placeholder takes at most a few bytes.
            text: String::with_capacity(literal_len + value_count * 4),
            params: Vec::with_capacity(value_count),
        }
    }

    pub fn with_flavor(mut self, flavor: Flavor) -> CommandBuilder {
        self.flavor = flavor;
        self
    }

    pub fn append_literal(&mut self, literal: &str) -> &mut CommandBuilder {
        self.text.push_str(literal);
        self
    }

    pub fn append_value<T: ToParam + ?Sized>(&mut self, value: &T) -> &mut CommandBuilder {
        self.params.push(value.to_param());
        let index = self.params.len();

        // Writing to a `String` cannot fail.
        let _ = match self.flavor {
            Flavor::Sqlite => write!(self.text, "?{index}"),
            Flavor::Postgresql => write!(self.text, "${index}"),
            Flavor::Mysql => write!(self.text, "?"),
        };

        self
    }

    pub fn build(self) -> Command {
        Command {
            text: self.text,
            params: self.params,
            cancel: None,
        }
    }
}
