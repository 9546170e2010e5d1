#[macro_use]
mod macros;

pub mod accessor;
pub use accessor::{Accessor, AccessorMap, SemanticType, TypeTag};

pub mod command;
pub use command::{Command, CommandBuilder, Flavor};

pub mod driver;
pub use driver::{CommandBehavior, Connection, RowCursor};

mod error;
pub use error::Error;

mod param;
pub use param::{Param, Scalar, ToParam};

mod row;
pub use row::Row;

pub mod value;
pub use value::{FromValue, Value};

/// A Result type alias that uses rowbind's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
pub use tokio_util::sync::CancellationToken;
