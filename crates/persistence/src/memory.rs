//! In-process tables that answer the same [`Request`]s as the hosted backend.
//!
//! Used by the `memory` backend mode for local development and by tests. Every
//! executed request is counted so callers can check whether the backend was
//! reached at all.

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use serde_json::{Map, Value};

use crate::error::DataError;
use crate::transport::{Condition, Filter, FilterOp, Operation, Request, Transport};

#[derive(Debug, Default)]
pub struct MemoryTransport {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    failures: Mutex<Vec<InjectedFailure>>,
    requests: AtomicUsize,
}

#[derive(Debug, Clone)]
struct InjectedFailure {
    table: String,
    operation: Operation,
    message: String,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rows of `table`.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.insert(table.to_string(), rows);
        }
    }

    /// Current rows of `table`, in storage order.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .map(|tables| tables.get(table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Number of requests executed so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Makes every `operation` on `table` fail with a backend error.
    pub fn fail_on(&self, table: &str, operation: Operation, message: &str) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(InjectedFailure {
                table: table.to_string(),
                operation,
                message: message.to_string(),
            });
        }
    }

    fn injected_failure(&self, request: &Request) -> Option<String> {
        let failures = self.failures.lock().ok()?;
        failures
            .iter()
            .find(|f| f.table == request.table && f.operation == request.operation)
            .map(|f| f.message.clone())
    }

    fn apply(&self, request: Request) -> Result<Vec<Value>, DataError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| DataError::backend(500, "memory store poisoned"))?;
        let rows = tables.entry(request.table.clone()).or_default();

        match request.operation {
            Operation::Select => {
                let mut selected: Vec<Value> = rows
                    .iter()
                    .filter(|row| matches_all(row, &request.conditions))
                    .cloned()
                    .collect();
                for ordering in request.order.iter().rev() {
                    selected.sort_by(|a, b| {
                        let ord = compare(field(a, &ordering.column), field(b, &ordering.column))
                            .unwrap_or(CmpOrdering::Equal);
                        if ordering.ascending {
                            ord
                        } else {
                            ord.reverse()
                        }
                    });
                }
                if let Some(limit) = request.limit {
                    selected.truncate(limit);
                }
                Ok(project(selected, request.columns.as_deref()))
            }
            Operation::Insert => {
                let mut inserted = Vec::new();
                for body in body_rows(request.body)? {
                    let row = prepare_new_row(rows, body)?;
                    if let Some(id) = row.get("id") {
                        if rows.iter().any(|r| r.get("id") == Some(id)) {
                            return Err(DataError::backend(
                                409,
                                "duplicate key value violates unique constraint",
                            ));
                        }
                    }
                    rows.push(row.clone());
                    inserted.push(row);
                }
                Ok(inserted)
            }
            Operation::Upsert => {
                let mut written = Vec::new();
                for body in body_rows(request.body)? {
                    let existing = body
                        .get("id")
                        .and_then(|id| rows.iter().position(|r| r.get("id") == Some(id)));
                    match existing {
                        Some(pos) => {
                            merge(&mut rows[pos], &body);
                            written.push(rows[pos].clone());
                        }
                        None => {
                            let row = prepare_new_row(rows, body)?;
                            rows.push(row.clone());
                            written.push(row);
                        }
                    }
                }
                Ok(written)
            }
            Operation::Update => {
                let patch = request
                    .body
                    .ok_or_else(|| DataError::backend(400, "update without body"))?;
                let mut updated = Vec::new();
                for row in rows.iter_mut() {
                    if matches_all(row, &request.conditions) {
                        merge(row, &patch);
                        updated.push(row.clone());
                    }
                }
                Ok(updated)
            }
            Operation::Delete => {
                if request.conditions.is_empty() {
                    return Err(DataError::backend(400, "DELETE requires a WHERE clause"));
                }
                let (removed, kept): (Vec<Value>, Vec<Value>) = rows
                    .drain(..)
                    .partition(|row| matches_all(row, &request.conditions));
                *rows = kept;
                Ok(removed)
            }
        }
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn execute(&self, request: Request) -> Result<Vec<Value>, DataError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.injected_failure(&request) {
            return Err(DataError::backend(500, message));
        }
        self.apply(request)
    }
}

fn body_rows(body: Option<Value>) -> Result<Vec<Value>, DataError> {
    match body {
        Some(Value::Array(rows)) => Ok(rows),
        Some(row @ Value::Object(_)) => Ok(vec![row]),
        _ => Err(DataError::backend(400, "body must be an object or an array")),
    }
}

/// Fills in the columns the backend would default: `id` and `created_at`.
fn prepare_new_row(existing: &[Value], body: Value) -> Result<Value, DataError> {
    let Value::Object(mut object) = body else {
        return Err(DataError::backend(400, "row must be an object"));
    };
    if object.get("id").map_or(true, Value::is_null) {
        let next_id = existing
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0)
            + 1;
        object.insert("id".to_string(), Value::from(next_id));
    }
    object
        .entry("created_at")
        .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
    Ok(Value::Object(object))
}

fn merge(row: &mut Value, patch: &Value) {
    if let (Value::Object(row), Value::Object(patch)) = (row, patch) {
        for (key, value) in patch {
            row.insert(key.clone(), value.clone());
        }
    }
}

fn project(rows: Vec<Value>, columns: Option<&str>) -> Vec<Value> {
    let Some(columns) = columns.filter(|c| c.trim() != "*") else {
        return rows;
    };
    let wanted: Vec<&str> = columns.split(',').map(str::trim).collect();
    rows.into_iter()
        .map(|row| match row {
            Value::Object(object) => Value::Object(
                object
                    .into_iter()
                    .filter(|(k, _)| wanted.contains(&k.as_str()))
                    .collect::<Map<String, Value>>(),
            ),
            other => other,
        })
        .collect()
}

fn field<'a>(row: &'a Value, column: &str) -> &'a Value {
    row.get(column).unwrap_or(&Value::Null)
}

fn matches_all(row: &Value, conditions: &[Condition]) -> bool {
    conditions.iter().all(|condition| match condition {
        Condition::Single(filter) => matches(row, filter),
        Condition::Any(filters) => filters.iter().any(|f| matches(row, f)),
    })
}

fn matches(row: &Value, filter: &Filter) -> bool {
    let value = field(row, &filter.column);
    if filter.op == FilterOp::Is {
        return match &filter.value {
            Value::Null => value.is_null(),
            Value::Bool(b) => value.as_bool() == Some(*b),
            Value::String(s) if s == "null" => value.is_null(),
            _ => false,
        };
    }
    if value.is_null() {
        return false;
    }
    let Some(ord) = compare(value, &filter.value) else {
        return false;
    };
    match filter.op {
        FilterOp::Eq => ord == CmpOrdering::Equal,
        FilterOp::Neq => ord != CmpOrdering::Equal,
        FilterOp::Gt => ord == CmpOrdering::Greater,
        FilterOp::Gte => ord != CmpOrdering::Less,
        FilterOp::Lt => ord == CmpOrdering::Less,
        FilterOp::Lte => ord != CmpOrdering::Greater,
        FilterOp::Is => false,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

/// Orders two JSON values the way Postgres would compare the column.
/// Nulls sort last.
fn compare(a: &Value, b: &Value) -> Option<CmpOrdering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(CmpOrdering::Equal),
        (Value::Null, _) => Some(CmpOrdering::Greater),
        (_, Value::Null) => Some(CmpOrdering::Less),
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::Number(x), Value::String(y)) => x.as_f64()?.partial_cmp(&y.parse::<f64>().ok()?),
        (Value::String(x), Value::Number(y)) => x.parse::<f64>().ok()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => match (parse_timestamp(x), parse_timestamp(y)) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => Some(x.cmp(y)),
        },
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::String(y)) => y.parse::<bool>().ok().map(|y| x.cmp(&y)),
        _ => None,
    }
}
