//! Typed query builder over a [`Transport`].
//!
//! ```ignore
//! let news: Vec<NewsEntity> = databases
//!     .main
//!     .from("news")
//!     .select("*")
//!     .eq("section_id", 3)
//!     .order("order_index", false)
//!     .fetch_all()
//!     .await?;
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::DataError;
use crate::metrics::QueryTimer;
use crate::transport::{Condition, Filter, FilterOp, Operation, Ordering, Request, Transport};

/// Handle to one logical database.
#[derive(Debug, Clone)]
pub struct DataClient {
    name: &'static str,
    transport: Arc<dyn Transport>,
}

impl DataClient {
    pub fn new(name: &'static str, transport: Arc<dyn Transport>) -> Self {
        Self { name, transport }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_configured()
    }

    /// Starts a query on `table`. Defaults to selecting every column.
    pub fn from(&self, table: &str) -> Query {
        Query {
            client: self.clone(),
            request: Request::new(table, Operation::Select),
            error: None,
        }
    }
}

/// The two databases the site is split across.
#[derive(Debug, Clone)]
pub struct Databases {
    /// Users, news, rules, sections and site info.
    pub main: DataClient,
    /// Store sections, packages and discounts.
    pub other: DataClient,
}

/// A request being built. Encoding failures are held until execution.
#[derive(Debug)]
#[must_use = "queries do nothing until executed"]
pub struct Query {
    client: DataClient,
    request: Request,
    error: Option<DataError>,
}

impl Query {
    pub fn select(mut self, columns: &str) -> Self {
        self.request.operation = Operation::Select;
        self.request.columns = Some(columns.to_string());
        self
    }

    pub fn insert<T: Serialize>(self, body: &T) -> Self {
        self.with_body(Operation::Insert, body)
    }

    pub fn update<T: Serialize>(self, patch: &T) -> Self {
        self.with_body(Operation::Update, patch)
    }

    /// Insert or merge on the primary key.
    pub fn upsert<T: Serialize>(mut self, body: &T) -> Self {
        self.request.on_conflict = Some("id".to_string());
        self.with_body(Operation::Upsert, body)
    }

    pub fn delete(mut self) -> Self {
        self.request.operation = Operation::Delete;
        self
    }

    pub fn eq<V: Serialize>(self, column: &str, value: V) -> Self {
        self.filter(column, FilterOp::Eq, value)
    }

    pub fn neq<V: Serialize>(self, column: &str, value: V) -> Self {
        self.filter(column, FilterOp::Neq, value)
    }

    pub fn gt<V: Serialize>(self, column: &str, value: V) -> Self {
        self.filter(column, FilterOp::Gt, value)
    }

    pub fn gte<V: Serialize>(self, column: &str, value: V) -> Self {
        self.filter(column, FilterOp::Gte, value)
    }

    pub fn lt<V: Serialize>(self, column: &str, value: V) -> Self {
        self.filter(column, FilterOp::Lt, value)
    }

    pub fn lte<V: Serialize>(self, column: &str, value: V) -> Self {
        self.filter(column, FilterOp::Lte, value)
    }

    pub fn is_null(mut self, column: &str) -> Self {
        self.request.conditions.push(Condition::Single(Filter {
            column: column.to_string(),
            op: FilterOp::Is,
            value: Value::Null,
        }));
        self
    }

    /// Matches when any of `filters` holds: `or=(a.is.null,b.gt.x)`.
    pub fn or_any(mut self, filters: Vec<Filter>) -> Self {
        self.request.conditions.push(Condition::Any(filters));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.request.order.push(Ordering {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.request.limit = Some(limit);
        self
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Every row the request yields.
    pub async fn fetch_all<T: DeserializeOwned>(self) -> Result<Vec<T>, DataError> {
        self.run()
            .await?
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(DataError::from))
            .collect()
    }

    /// Exactly one row; [`DataError::NotFound`] when there is none.
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<T, DataError> {
        self.fetch_optional().await?.ok_or(DataError::NotFound)
    }

    /// The first row, if any.
    pub async fn fetch_optional<T: DeserializeOwned>(self) -> Result<Option<T>, DataError> {
        if !self.client.is_configured() {
            return Err(DataError::NotConfigured);
        }
        match self.run().await?.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    /// Runs the request and returns how many rows it touched.
    pub async fn execute(self) -> Result<usize, DataError> {
        Ok(self.run().await?.len())
    }

    async fn run(self) -> Result<Vec<Value>, DataError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let timer = QueryTimer::new(self.client.name, &self.request);
        let result = self.client.transport.execute(self.request).await;
        timer.record(&result);
        result
    }

    fn filter<V: Serialize>(mut self, column: &str, op: FilterOp, value: V) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => self.request.conditions.push(Condition::Single(Filter {
                column: column.to_string(),
                op,
                value,
            })),
            Err(e) => self.fail(e),
        }
        self
    }

    fn with_body<T: Serialize>(mut self, operation: Operation, body: &T) -> Self {
        self.request.operation = operation;
        match serde_json::to_value(body) {
            Ok(body) => self.request.body = Some(body),
            Err(e) => self.fail(e),
        }
        self
    }

    fn fail(&mut self, err: serde_json::Error) {
        if self.error.is_none() {
            self.error = Some(DataError::decode(err));
        }
    }
}

/// Builds a filter for [`Query::or_any`].
pub fn filter<V: Serialize>(column: &str, op: FilterOp, value: V) -> Filter {
    Filter {
        column: column.to_string(),
        op,
        value: serde_json::to_value(value).unwrap_or(Value::Null),
    }
}
