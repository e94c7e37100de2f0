use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Number, Value};
use sqlx::mysql::{MySql, MySqlArguments, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, Row as _, TypeInfo};

use super::{Database, DbError, Outcome, Param, Row, Statement};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `Database` backed by a MySQL connection pool.
#[derive(Clone)]
pub struct MySqlDatabase {
    pool: MySqlPool,
}

impl MySqlDatabase {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(url)
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl Database for MySqlDatabase {
    async fn fetch_all(&self, statement: Statement) -> Result<Vec<Row>, DbError> {
        let rows = build_query(&statement).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_json).collect()
    }

    async fn execute(&self, statement: Statement) -> Result<Outcome, DbError> {
        let result = build_query(&statement).execute(&self.pool).await?;

        Ok(Outcome {
            last_insert_id: result.last_insert_id(),
        })
    }
}

fn build_query(statement: &Statement) -> Query<'_, MySql, MySqlArguments> {
    let mut query = sqlx::query(&statement.sql);
    for param in &statement.params {
        query = match param {
            Param::Null => query.bind(None::<i64>),
            Param::Int(v) => query.bind(*v),
            Param::Float(v) => query.bind(*v),
            Param::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

fn row_to_json(row: &MySqlRow) -> Result<Row, DbError> {
    let mut object = Row::new();

    for (idx, column) in row.columns().iter().enumerate() {
        let type_name = column.type_info().name();
        let value = decode_column(row, idx, type_name).ok_or_else(|| DbError::UnsupportedColumn {
            column: column.name().to_string(),
            type_name: type_name.to_string(),
        })??;

        object.insert(column.name().to_string(), value);
    }

    Ok(object)
}

/// Returns `None` when the column type has no JSON mapping.
fn decode_column(row: &MySqlRow, idx: usize, type_name: &str) -> Option<Result<Value, sqlx::Error>> {
    let value = match type_name {
        "NULL" => Ok(Value::Null),
        "BOOLEAN" => row
            .try_get_unchecked::<Option<bool>, _>(idx)
            .map(|v| v.map(Value::Bool).unwrap_or(Value::Null)),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => row
            .try_get_unchecked::<Option<i64>, _>(idx)
            .map(|v| v.map(Value::from).unwrap_or(Value::Null)),
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" | "BIT" => row
            .try_get_unchecked::<Option<u64>, _>(idx)
            .map(|v| v.map(Value::from).unwrap_or(Value::Null)),
        "FLOAT" => row
            .try_get_unchecked::<Option<f32>, _>(idx)
            .map(|v| v.map(|f| float_value(f64::from(f))).unwrap_or(Value::Null)),
        "DOUBLE" => row
            .try_get_unchecked::<Option<f64>, _>(idx)
            .map(|v| v.map(float_value).unwrap_or(Value::Null)),
        "DECIMAL" => row
            .try_get_unchecked::<Option<String>, _>(idx)
            .map(|v| v.map(|s| decimal_value(&s)).unwrap_or(Value::Null)),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(idx)
            .map(|v| v.map(date_value).unwrap_or(Value::Null)),
        "DATETIME" | "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(idx)
            .map(|v| v.map(datetime_value).unwrap_or(Value::Null)),
        "TIME" => row
            .try_get::<Option<NaiveTime>, _>(idx)
            .map(|v| v.map(|t| Value::String(t.to_string())).unwrap_or(Value::Null)),
        "CHAR" | "VARCHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" | "SET"
        | "JSON" => row
            .try_get_unchecked::<Option<String>, _>(idx)
            .map(|v| v.map(Value::String).unwrap_or(Value::Null)),
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => row
            .try_get_unchecked::<Option<Vec<u8>>, _>(idx)
            .map(|v| {
                v.map(|bytes| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
                    .unwrap_or(Value::Null)
            }),
        _ => return None,
    };

    Some(value)
}

pub fn date_value(date: NaiveDate) -> Value {
    Value::String(date.format(DATE_FORMAT).to_string())
}

pub fn datetime_value(datetime: NaiveDateTime) -> Value {
    Value::String(datetime.format(DATETIME_FORMAT).to_string())
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

/// DECIMAL arrives as text; keep integral values integral, fall back to the
/// raw text when it does not fit a JSON number.
pub fn decimal_value(text: &str) -> Value {
    if let Ok(int) = text.parse::<i64>() {
        return Value::from(int);
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(text.to_string()))
}
