//! [`GraphSource`] backed by the SurrealDB HTTP `/sql` endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use degreewalk_core::{GraphSource, NodeId, PersonRecord, RecordId};

use crate::config::SurrealConfig;
use crate::error::{Error, Result};

/// SurrealDB graph source.
///
/// Every call is a single SurrealQL statement. Only ids that parse as
/// [`RecordId`] are ever placed in query text.
#[derive(Debug, Clone)]
pub struct SurrealSource {
    config: SurrealConfig,
    client: reqwest::Client,
}

/// One entry of the `/sql` response array.
#[derive(Debug, Deserialize)]
struct StatementResult {
    status: String,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    detail: Option<String>,
}

impl SurrealSource {
    /// Creates a source after validating `config`.
    pub fn new(config: SurrealConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { config, client })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SurrealConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.url.trim_end_matches('/'), path);
        let mut req = self.client.request(method, &url);

        if let Some(ref username) = self.config.username {
            req = req.basic_auth(username, self.config.password.as_ref());
        }

        req.header("surreal-ns", &self.config.namespace)
            .header("surreal-db", &self.config.database)
            .header("Accept", "application/json")
    }

    /// Checks that the server answers on `/health`.
    pub async fn health(&self) -> Result<()> {
        info!("Checking SurrealDB at {}", self.config.url);
        let resp = self.request(reqwest::Method::GET, "/health").send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status { status, body });
        }
        Ok(())
    }

    /// Runs one statement and returns its result rows.
    pub async fn query(&self, sql: &str) -> Result<Vec<Value>> {
        debug!(sql, "running SurrealQL");
        let resp = self
            .request(reqwest::Method::POST, "/sql")
            .body(sql.to_string())
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let statements: Vec<StatementResult> = serde_json::from_str(&body)?;
        first_statement_rows(statements)
    }

    /// SurrealQL listing the neighbors of `id` under the configured policy.
    #[must_use]
    pub fn neighbor_query(&self, id: &RecordId) -> String {
        let table = &self.config.person_table;
        let direction = self.config.direction;
        let mut paths = Vec::new();
        if direction.includes_outgoing() {
            paths.extend(self.config.relations.iter().map(|r| format!("->{r}->{table}.id")));
        }
        if direction.includes_incoming() {
            paths.extend(self.config.relations.iter().map(|r| format!("<-{r}<-{table}.id")));
        }
        format!(
            "SELECT array::distinct(array::flatten([{}])) AS neighbors FROM {id};",
            paths.join(", ")
        )
    }

    /// SurrealQL fetching name and device for each of `ids`.
    #[must_use]
    pub fn attribute_query(&self, ids: &[RecordId]) -> String {
        let from = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        format!(
            "SELECT id, name, ->{}->{}.{} AS phone FROM {from};",
            self.config.device_relation, self.config.device_table, self.config.device_field
        )
    }

    /// Distinct neighbors of `id`, in the order the server lists them.
    pub async fn neighbors(&self, id: &NodeId) -> Result<Vec<NodeId>> {
        let record = RecordId::try_from(id).map_err(|e| Error::InvalidRecordId(e.to_string()))?;
        let rows = self.query(&self.neighbor_query(&record)).await?;

        let Some(row) = rows.into_iter().next() else {
            return Ok(Vec::new());
        };
        let raw = match row.get("neighbors") {
            Some(Value::Array(items)) => items.clone(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(Error::Query(format!("neighbors is not an array: {other}")));
            }
        };

        let neighbors: Vec<NodeId> = raw
            .iter()
            .filter_map(|value| parse_record_id(value, "neighbor"))
            .filter(|neighbor| neighbor != &record)
            .map(NodeId::from)
            .collect();
        debug!(node = %id, count = neighbors.len(), "fetched neighbors");
        Ok(neighbors)
    }

    /// Name and device of each of `ids`, keyed by id, in one query.
    pub async fn people(&self, ids: &[NodeId]) -> Result<HashMap<NodeId, PersonRecord>> {
        let records: Vec<RecordId> = ids
            .iter()
            .filter_map(|id| match RecordId::try_from(id) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(id = %id, error = %err, "skipping invalid record id");
                    None
                }
            })
            .collect();
        if records.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = self.query(&self.attribute_query(&records)).await?;
        let people: HashMap<NodeId, PersonRecord> = rows
            .iter()
            .filter_map(person_from_row)
            .map(|person| (person.id.clone(), person))
            .collect();
        debug!(requested = records.len(), found = people.len(), "fetched attributes");
        Ok(people)
    }
}

#[async_trait]
impl GraphSource for SurrealSource {
    fn source_type(&self) -> &'static str {
        "surrealdb"
    }

    async fn fetch_neighbors(&self, id: &NodeId) -> degreewalk_core::Result<Vec<NodeId>> {
        Ok(self.neighbors(id).await?)
    }

    async fn fetch_attributes(
        &self,
        ids: &[NodeId],
    ) -> degreewalk_core::Result<HashMap<NodeId, PersonRecord>> {
        Ok(self.people(ids).await?)
    }
}

fn first_statement_rows(statements: Vec<StatementResult>) -> Result<Vec<Value>> {
    let Some(statement) = statements.into_iter().next() else {
        return Ok(Vec::new());
    };
    if statement.status != "OK" {
        let detail = statement.detail.unwrap_or_else(|| statement.result.to_string());
        return Err(Error::Query(format!("{}: {detail}", statement.status)));
    }
    match statement.result {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::Query(format!("unexpected result shape: {other}"))),
    }
}

/// Accepts `"tb:id"` strings and `{tb, id}` objects.
fn record_id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            let table = map.get("tb")?.as_str()?;
            let key = match map.get("id")? {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some(format!("{table}:{key}"))
        }
        _ => None,
    }
}

fn parse_record_id(value: &Value, what: &str) -> Option<RecordId> {
    let parsed = record_id_string(value)
        .ok_or_else(|| format!("unsupported id shape {value}"))
        .and_then(|raw| RecordId::parse(&raw).map_err(|e| e.to_string()));
    match parsed {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(kind = what, error = %err, "skipping unusable record id");
            None
        }
    }
}

fn person_from_row(row: &Value) -> Option<PersonRecord> {
    let record = parse_record_id(row.get("id")?, "person")?;
    let mut person = PersonRecord::bare(record.to_node_id());
    person.name = row.get("name").and_then(Value::as_str).map(str::to_string);
    person.phone = match row.get("phone") {
        Some(Value::Array(items)) => items.first().and_then(Value::as_str).map(str::to_string),
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    };
    Some(person)
}
