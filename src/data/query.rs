//! Query options, parameters and the query builder

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use super::record::DataRecord;
use crate::compare::truncate;
use crate::constants::data::DEFAULT_COMMAND_TIMEOUT_SECS;
use crate::convert::{global, Convertible, Value};

/// How the query text is interpreted by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandType {
    #[default]
    Text,
    StoredProcedure,
    TableDirect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterDirection {
    #[default]
    Input,
    Output,
    InputOutput,
    ReturnValue,
}

/// A named query parameter
///
/// `size` is the declared column width; 0 means unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
    pub size: usize,
    pub direction: ParameterDirection,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            size: 0,
            direction: ParameterDirection::Input,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_direction(mut self, direction: ParameterDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Cut a string value down to `size` characters
    fn truncate_to_size(&mut self) {
        if self.size == 0 {
            return;
        }
        let truncated = match &self.value {
            Value::String(text) if text.chars().count() > self.size => truncate(text, self.size),
            _ => return,
        };
        debug!(parameter = %self.name, size = self.size, "Truncating string parameter");
        self.value = Value::String(truncated);
    }
}

/// Everything a driver needs to run one command
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    pub command_timeout: Duration,
    pub query: String,
    pub command_type: CommandType,
    pub parameters: Vec<Parameter>,
    /// Cut string parameters to their declared size before executing
    pub truncate_strings: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
            query: String::new(),
            command_type: CommandType::Text,
            parameters: Vec::new(),
            truncate_strings: true,
        }
    }
}

/// Driver seam: runs a prepared command against a connection
pub trait QueryExecutor {
    type Record: DataRecord;

    /// Run without a result set; returns the number of affected rows
    fn execute(&mut self, options: &QueryOptions) -> Result<u64>;

    /// First column of the first row, or [`Value::Null`] for an empty result
    fn execute_scalar(&mut self, options: &QueryOptions) -> Result<Value>;

    fn execute_records(&mut self, options: &QueryOptions) -> Result<Vec<Self::Record>>;
}

/// A command bound to an executor
#[derive(Debug, Clone)]
pub struct DatabaseQuery<E> {
    executor: E,
    options: QueryOptions,
}

impl<E: QueryExecutor> DatabaseQuery<E> {
    pub fn new(executor: E, command_type: CommandType, query: impl Into<String>) -> Self {
        Self {
            executor,
            options: QueryOptions {
                query: query.into(),
                command_type,
                ..QueryOptions::default()
            },
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.command_timeout = timeout;
        self
    }

    /// Replace all parameters
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.options.parameters = parameters.into_iter().collect();
        self
    }

    pub fn add_parameter(mut self, parameter: Parameter) -> Self {
        self.options.parameters.push(parameter);
        self
    }

    pub fn with_truncate_strings(mut self, enabled: bool) -> Self {
        self.options.truncate_strings = enabled;
        self
    }

    /// Shorten string parameters longer than their size; no-op when disabled
    pub fn truncate_string_parameters(&mut self) {
        if !self.options.truncate_strings {
            return;
        }
        self.options
            .parameters
            .iter_mut()
            .for_each(Parameter::truncate_to_size);
    }

    pub fn execute(&mut self) -> Result<u64> {
        self.prepare();
        self.executor
            .execute(&self.options)
            .with_context(|| format!("Failed to execute {:?}", self.options.query))
    }

    pub fn execute_scalar(&mut self) -> Result<Value> {
        self.prepare();
        self.executor
            .execute_scalar(&self.options)
            .with_context(|| format!("Failed to execute scalar {:?}", self.options.query))
    }

    /// Scalar result converted to `T`, or `default` when it is null or does not convert
    pub fn execute_scalar_as<T: Convertible>(&mut self, default: T) -> Result<T> {
        let value = self.execute_scalar()?;
        Ok(global().change_type(value, default))
    }

    pub fn execute_records(&mut self) -> Result<Vec<E::Record>> {
        self.prepare();
        self.executor
            .execute_records(&self.options)
            .with_context(|| format!("Failed to read records for {:?}", self.options.query))
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut QueryOptions {
        &mut self.options
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn prepare(&mut self) {
        self.truncate_string_parameters();
        debug!(
            query = %self.options.query,
            command_type = ?self.options.command_type,
            parameters = self.options.parameters.len(),
            timeout_secs = self.options.command_timeout.as_secs(),
            "Executing query"
        );
    }
}

/// Entry point a driver exposes for building queries
pub trait DatabaseAccessor {
    type Executor: QueryExecutor;

    /// A fresh executor bound to this accessor's connection
    fn executor(&self) -> Self::Executor;

    fn sql_statement(&self, sql: &str) -> DatabaseQuery<Self::Executor> {
        DatabaseQuery::new(self.executor(), CommandType::Text, sql)
    }

    fn stored_procedure(&self, name: &str) -> DatabaseQuery<Self::Executor> {
        DatabaseQuery::new(self.executor(), CommandType::StoredProcedure, name)
    }

    fn table_direct(&self, table: &str) -> DatabaseQuery<Self::Executor> {
        DatabaseQuery::new(self.executor(), CommandType::TableDirect, table)
    }
}
