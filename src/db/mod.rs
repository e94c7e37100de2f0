//! Data access: the `Database` seam every handler talks through, plus the
//! SQL for each resource.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod matches;
pub mod mysql;
pub mod players;
pub mod search;

pub use mysql::MySqlDatabase;

/// One result row, keyed by column label.
pub type Row = Map<String, Value>;

/// A positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Param::Null)
    }
}

/// SQL text with `?` placeholders and the values bound to them, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Param>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }
}

/// Result of a statement that returns no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub last_insert_id: u64,
}

#[derive(Debug, Error)]
pub enum DbError {
    /// An error reported by the database server itself: constraint
    /// violations, `SIGNAL` from triggers and procedures.
    #[error("{message}")]
    Server {
        message: String,
        code: Option<String>,
    },
    #[error(transparent)]
    Driver(sqlx::Error),
    #[error("column `{column}` has unsupported type {type_name}")]
    UnsupportedColumn { column: String, type_name: String },
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::Server {
                message: db_err.message().to_string(),
                code: db_err.code().map(|c| c.into_owned()),
            },
            other => DbError::Driver(other),
        }
    }
}

/// The query executor shared by all handlers.
#[async_trait]
pub trait Database: Send + Sync {
    async fn fetch_all(&self, statement: Statement) -> Result<Vec<Row>, DbError>;

    async fn fetch_optional(&self, statement: Statement) -> Result<Option<Row>, DbError> {
        Ok(self.fetch_all(statement).await?.into_iter().next())
    }

    async fn execute(&self, statement: Statement) -> Result<Outcome, DbError>;
}
