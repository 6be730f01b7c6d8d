//! Driver-agnostic database access
//!
//! Nothing here talks to a database directly. A driver implements
//! [`QueryExecutor`] (and usually [`DatabaseAccessor`]); callers build
//! [`DatabaseQuery`] values and read results through [`DataRecord`].

pub mod query;
pub mod record;
pub mod source;

pub use query::{
    CommandType, DatabaseAccessor, DatabaseQuery, Parameter, ParameterDirection, QueryExecutor, QueryOptions,
};
pub use record::{DataRecord, MemoryRecord};
pub use source::{DataSource, DataSourceReader, DataSourceWriter, NullDataSourceReader, NullDataSourceWriter};
