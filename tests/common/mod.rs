#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use league_api::db::{Database, DbError, Outcome, Row, Statement};
use league_api::{app, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// Records every statement it is handed and answers from scripted queues.
/// An empty queue answers with no rows / a default outcome.
#[derive(Clone, Default)]
pub struct FakeDatabase {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    statements: Mutex<Vec<Statement>>,
    rows: Mutex<VecDeque<Result<Vec<Row>, DbError>>>,
    outcomes: Mutex<VecDeque<Result<Outcome, DbError>>>,
}

impl FakeDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rows(&self, rows: Vec<Value>) -> &Self {
        let rows = rows
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => map,
                other => panic!("row must be an object, got {other}"),
            })
            .collect();
        self.inner.rows.lock().unwrap().push_back(Ok(rows));
        self
    }

    pub fn push_query_error(&self, err: DbError) -> &Self {
        self.inner.rows.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn push_outcome(&self, outcome: Outcome) -> &Self {
        self.inner.outcomes.lock().unwrap().push_back(Ok(outcome));
        self
    }

    pub fn push_execute_error(&self, err: DbError) -> &Self {
        self.inner.outcomes.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.inner.statements.lock().unwrap().clone()
    }

    pub fn only_statement(&self) -> Statement {
        let statements = self.statements();
        assert_eq!(statements.len(), 1, "expected exactly one statement, got {statements:?}");
        statements.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Database for FakeDatabase {
    async fn fetch_all(&self, statement: Statement) -> Result<Vec<Row>, DbError> {
        self.inner.statements.lock().unwrap().push(statement);
        self.inner
            .rows
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn execute(&self, statement: Statement) -> Result<Outcome, DbError> {
        self.inner.statements.lock().unwrap().push(statement);
        self.inner
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Outcome::default()))
    }
}

pub fn server_error(message: &str) -> DbError {
    DbError::Server {
        message: message.to_string(),
        code: Some("45000".to_string()),
    }
}

pub fn driver_error() -> DbError {
    DbError::Driver(sqlx::Error::PoolTimedOut)
}

pub async fn send(db: &FakeDatabase, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let app = app(AppState::new(db.clone()));

    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}

pub async fn get(db: &FakeDatabase, uri: &str) -> (StatusCode, Value) {
    send(db, Method::GET, uri, None).await
}
