// Generated code refers to this crate as `rowbind`, including from within it.
extern crate self as rowbind;

mod dynamic;
pub use dynamic::DynamicMapper;

mod exec;
pub use exec::Execute;

mod mapper;
pub use mapper::FromRow;

pub mod reader;
pub use reader::{FromRowStream, Reader, RowStream};

pub use rowbind_core::{
    async_trait, bail, driver, err, value, Accessor, AccessorMap, CancellationToken, Command,
    CommandBehavior, CommandBuilder, Connection, Error, Flavor, FromValue, Param, Result, Row,
    RowCursor, SemanticType, ToParam, TypeTag, Value,
};

pub use rowbind_macros::{sql, FromRow};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::FromRow;
    pub use rowbind_core::{CommandBuilder, Result, Row};
}
