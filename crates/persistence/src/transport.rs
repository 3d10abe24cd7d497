//! Request model and transports for the hosted backend's REST API.
//!
//! A [`Request`] describes one table operation the way PostgREST sees it.
//! Transports execute it: [`HttpTransport`] over the network,
//! [`UnconfiguredTransport`] when credentials are missing and
//! [`crate::memory::MemoryTransport`] in-process.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::DataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Upsert,
    Delete,
}

impl Operation {
    pub fn is_write(&self) -> bool {
        !matches!(self, Operation::Select)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Select => "select",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Upsert => "upsert",
            Operation::Delete => "delete",
        }
    }

    fn http_method(&self) -> Method {
        match self {
            Operation::Select => Method::GET,
            Operation::Insert | Operation::Upsert => Method::POST,
            Operation::Update => Method::PATCH,
            Operation::Delete => Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// `is.null` / `is.true` / `is.false`
    Is,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Is => "is",
        }
    }
}

/// `column op value`, with the value kept as JSON so every transport can
/// compare it against stored rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    /// `op.value` as PostgREST expects it in a query string.
    pub fn to_param(&self) -> String {
        format!("{}.{}", self.op.as_str(), render_value(&self.value))
    }
}

/// Every condition must hold; an `Any` holds when one of its filters does.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Single(Filter),
    Any(Vec<Filter>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub column: String,
    pub ascending: bool,
}

/// One backend call.
#[derive(Debug, Clone)]
pub struct Request {
    pub table: String,
    pub operation: Operation,
    pub columns: Option<String>,
    pub conditions: Vec<Condition>,
    pub order: Vec<Ordering>,
    pub limit: Option<usize>,
    pub body: Option<Value>,
    /// Conflict target for upserts.
    pub on_conflict: Option<String>,
}

impl Request {
    pub fn new(table: impl Into<String>, operation: Operation) -> Self {
        Self {
            table: table.into(),
            operation,
            columns: None,
            conditions: Vec::new(),
            order: Vec::new(),
            limit: None,
            body: None,
            on_conflict: None,
        }
    }

    /// Query string pairs in the order PostgREST documents them.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if self.operation == Operation::Select {
            pairs.push((
                "select".to_string(),
                self.columns.clone().unwrap_or_else(|| "*".to_string()),
            ));
        }
        for condition in &self.conditions {
            match condition {
                Condition::Single(filter) => {
                    pairs.push((filter.column.clone(), filter.to_param()));
                }
                Condition::Any(filters) => {
                    let inner = filters
                        .iter()
                        .map(|f| format!("{}.{}", f.column, f.to_param()))
                        .collect::<Vec<_>>()
                        .join(",");
                    pairs.push(("or".to_string(), format!("({})", inner)));
                }
            }
        }
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|o| format!("{}.{}", o.column, if o.ascending { "asc" } else { "desc" }))
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("order".to_string(), order));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(on_conflict) = &self.on_conflict {
            pairs.push(("on_conflict".to_string(), on_conflict.clone()));
        }
        pairs
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Executes requests against one logical database.
///
/// Returns the rows the backend hands back: the selected rows for reads,
/// the written rows for writes.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn execute(&self, request: Request) -> Result<Vec<Value>, DataError>;

    fn is_configured(&self) -> bool {
        true
    }
}

/// Stands in for a database whose URL or key is missing.
///
/// Reads come back empty and writes touch nothing; callers that need a row
/// get [`DataError::NotConfigured`] from the client.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredTransport;

#[async_trait]
impl Transport for UnconfiguredTransport {
    async fn execute(&self, _request: Request) -> Result<Vec<Value>, DataError> {
        Ok(Vec::new())
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// PostgREST over HTTP.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    key: String,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Shape of a PostgREST error body.
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: &str, key: &str, timeout: Duration) -> Result<Self, DataError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn prefer_header(operation: Operation) -> Option<&'static str> {
        match operation {
            Operation::Select => None,
            Operation::Upsert => Some("resolution=merge-duplicates,return=representation"),
            _ => Some("return=representation"),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Vec<Value>, DataError> {
        let url = self.table_url(&request.table);
        debug!(
            table = %request.table,
            operation = ?request.operation,
            "Calling backend"
        );

        let mut builder = self
            .client
            .request(request.operation.http_method(), &url)
            .query(&request.query_pairs())
            .header("apikey", &self.key)
            .bearer_auth(&self.key);

        if let Some(prefer) = Self::prefer_header(request.operation) {
            builder = builder.header("Prefer", prefer);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<BackendErrorBody>(&text)
                .ok()
                .and_then(|body| body.message.or(body.details).or(body.hint))
                .unwrap_or_else(|| format!("HTTP {}: {}", status, text));
            return Err(DataError::backend(status.as_u16(), message));
        }

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&text)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            row => Ok(vec![row]),
        }
    }
}
