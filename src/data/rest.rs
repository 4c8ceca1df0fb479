//! Supabase/PostgREST integration: fetch a table as flat records.

use std::collections::BTreeMap;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::data::RowSource;
use crate::domain::{FieldMap, Record};
use crate::error::AppError;

/// Blocking REST client for a PostgREST-style endpoint.
///
/// Credentials come from the environment (`.env` supported): `SUPABASE_URL`
/// is the project base URL, `SUPABASE_ANON_KEY` the read-only API key.
pub struct RestClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("SUPABASE_URL")
            .map_err(|_| AppError::config("Missing SUPABASE_URL in environment (.env)."))?;
        let api_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| AppError::config("Missing SUPABASE_ANON_KEY in environment (.env)."))?;
        Ok(Self::new(base_url, api_key))
    }

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Fetch every row of `table` (`select=*`) and map it through `fields`.
    pub fn fetch_table(&self, table: &str, fields: &FieldMap) -> Result<Vec<Record>, AppError> {
        let url = format!("{}/rest/v1/{table}", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("select", "*")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .map_err(|e| AppError::fetch(format!("Fetch failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::fetch(format!(
                "Fetch of table '{table}' failed with status {}.",
                resp.status()
            )));
        }

        let rows: Vec<serde_json::Map<String, Value>> = resp
            .json()
            .map_err(|e| AppError::fetch(format!("Failed to parse response: {e}")))?;

        Ok(rows.into_iter().map(|row| map_row(row, fields)).collect())
    }
}

/// A `RowSource` bound to one client, table, and field mapping.
pub struct RestSource {
    client: RestClient,
    table: String,
    fields: FieldMap,
}

impl RestSource {
    pub fn new(client: RestClient, table: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            client,
            table: table.into(),
            fields,
        }
    }
}

impl RowSource for RestSource {
    fn describe(&self) -> String {
        format!("supabase:{}", self.table)
    }

    fn fetch_rows(&self) -> Result<Vec<Record>, AppError> {
        self.client.fetch_table(&self.table, &self.fields)
    }
}

/// Split one JSON row into the three semantic fields + extras.
///
/// Type mismatches degrade to `None` (the pivoter treats them as absent)
/// rather than failing the whole fetch.
fn map_row(row: serde_json::Map<String, Value>, fields: &FieldMap) -> Record {
    let mut date = None;
    let mut category = None;
    let mut value = None;
    let mut extras = BTreeMap::new();

    for (key, val) in row {
        if key == fields.date {
            date = value_as_string(&val);
        } else if key == fields.category {
            category = value_as_string(&val);
        } else if key == fields.value {
            value = value_as_f64(&val);
        } else {
            extras.insert(key, val);
        }
    }

    Record {
        date,
        category,
        value,
        extras,
    }
}

fn value_as_string(val: &Value) -> Option<String> {
    match val {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { Some(s.to_string()) }
        }
        _ => None,
    }
}

fn value_as_f64(val: &Value) -> Option<f64> {
    let v = match val {
        Value::Number(n) => n.as_f64()?,
        // Numeric columns occasionally arrive as strings (e.g. Postgres
        // `numeric` serialized to preserve precision).
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if v.is_finite() { Some(v) } else { None }
}
