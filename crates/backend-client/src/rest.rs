//! REST client for the backend's auto-generated table endpoint
//!
//! Every operation is a structured call: filters, ordering and patches
//! are built as typed query parameters, never as SQL text. Failures are
//! wrapped into [`RestError`] carrying the HTTP status and response body.
//! There is no retry or backoff; a failed call surfaces to the caller.

use reqwest::{Client as ReqwestClient, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::BackendConfig;
use crate::error::{RestError, RestErrorBody};

/// Result type for REST operations
pub type Result<T> = std::result::Result<T, RestError>;

/// Sort direction for ordered selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

impl SortDirection {
    fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Escape user-controlled text embedded inside a composite filter
/// expression (or-lists, array literals), where commas, parentheses and
/// dots are syntax
fn escape_component(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Query filter builder for table selects, updates and deletes
///
/// # Examples
/// ```
/// use backend_client::{Filters, SortDirection};
///
/// let filters = Filters::new()
///     .eq("is_public", "true")
///     .order("updated_at", SortDirection::Desc)
///     .limit(20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Filters {
    params: Vec<(String, String)>,
    select: Option<String>,
    order: Option<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Filters {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the selected columns (defaults to `*`)
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = Some(columns.into());
        self
    }

    /// Column equals value
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((column.into(), format!("eq.{}", value.into())));
        self
    }

    /// Column matches the text case-insensitively (substring match)
    pub fn ilike(mut self, column: impl Into<String>, text: &str) -> Self {
        self.params
            .push((column.into(), format!("ilike.*{}*", escape_component(text))));
        self
    }

    /// Array column contains all of the given values
    pub fn contains(mut self, column: impl Into<String>, values: &[String]) -> Self {
        let list = values
            .iter()
            .map(|v| escape_component(v))
            .collect::<Vec<_>>()
            .join(",");
        self.params.push((column.into(), format!("cs.{{{list}}}")));
        self
    }

    /// Any of the given columns matches the text case-insensitively
    pub fn or_ilike(mut self, columns: &[&str], text: &str) -> Self {
        let escaped = escape_component(text);
        let clauses = columns
            .iter()
            .map(|c| format!("{c}.ilike.*{escaped}*"))
            .collect::<Vec<_>>()
            .join(",");
        self.params.push(("or".to_string(), format!("({clauses})")));
        self
    }

    /// Order results by a column
    pub fn order(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.order = Some(format!("{}.{}", column.into(), direction.as_str()));
        self
    }

    /// Limit the number of returned rows
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` rows
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Render the filter set as query parameters
    pub(crate) fn into_query(self, include_select: bool) -> Vec<(String, String)> {
        let mut query = Vec::new();

        if include_select {
            query.push(("select".to_string(), self.select.unwrap_or_else(|| "*".to_string())));
        }
        query.extend(self.params);

        if let Some(order) = self.order {
            query.push(("order".to_string(), order));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        query
    }
}

/// REST client for the backend's table endpoint
#[derive(Debug, Clone)]
pub struct RestClient {
    client: ReqwestClient,
    config: BackendConfig,
}

impl RestClient {
    /// Create a new REST client
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RestError::network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Base URL of the configured backend
    pub fn base_url(&self) -> &str {
        &self.config.url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.config.server_key();
        request
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
    }

    /// Insert rows into a table, returning the created rows
    pub async fn insert<T, R>(&self, table: &str, rows: &[T]) -> Result<Vec<R>>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let request = self
            .authorize(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(rows);

        let response = send(request).await?;
        decode_rows(response).await
    }

    /// Insert a single row, returning the created row
    pub async fn insert_one<T, R>(&self, table: &str, row: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let mut rows: Vec<R> = self.insert(table, std::slice::from_ref(row)).await?;
        rows.pop()
            .ok_or_else(|| RestError::decode(format!("insert into {table} returned no rows")))
    }

    /// Select rows from a table
    pub async fn select<T>(&self, table: &str, filters: Filters) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let request = self
            .authorize(self.client.get(self.table_url(table)))
            .query(&filters.into_query(true));

        let response = send(request).await?;
        decode_rows(response).await
    }

    /// Select rows along with the exact total count (ignoring limit/offset)
    pub async fn select_with_count<T>(&self, table: &str, filters: Filters) -> Result<(Vec<T>, u64)>
    where
        T: DeserializeOwned,
    {
        let request = self
            .authorize(self.client.get(self.table_url(table)))
            .header("Prefer", "count=exact")
            .query(&filters.into_query(true));

        let response = send(request).await?;
        let total = parse_content_range(
            response
                .headers()
                .get("content-range")
                .and_then(|v| v.to_str().ok()),
        );
        let rows = decode_rows(response).await?;
        Ok((rows, total))
    }

    /// Update rows matching the filters, returning the updated rows
    pub async fn update<P, T>(&self, table: &str, filters: Filters, patch: &P) -> Result<Vec<T>>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let request = self
            .authorize(self.client.patch(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(&filters.into_query(false))
            .json(patch);

        let response = send(request).await?;
        decode_rows(response).await
    }

    /// Delete rows matching the filters
    pub async fn delete(&self, table: &str, filters: Filters) -> Result<()> {
        let request = self
            .authorize(self.client.delete(self.table_url(table)))
            .query(&filters.into_query(false));

        send(request).await?;
        Ok(())
    }
}

/// Send a request and map transport failures and non-2xx responses to errors
async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| RestError::network(format!("Request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        // Prefer the backend's structured error shape when present
        if let Ok(parsed) = serde_json::from_str::<RestErrorBody>(&body) {
            return Err(RestError::new(
                status.as_u16(),
                parsed.code.unwrap_or_else(|| "Unknown".to_string()),
                parsed.message.unwrap_or(body),
            ));
        }
        return Err(RestError::new(status.as_u16(), "Unknown", body));
    }

    Ok(response)
}

async fn decode_rows<T>(response: Response) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let body = response
        .text()
        .await
        .map_err(|e| RestError::decode(format!("Failed to read response: {e}")))?;

    if body.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&body).map_err(|e| RestError::decode(format!("Failed to parse JSON: {e}")))
}

/// Parse the total from a `Content-Range` header value like `0-9/57`
fn parse_content_range(header: Option<&str>) -> u64 {
    header
        .and_then(|v| v.rsplit('/').next())
        .and_then(|total| total.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_eq_and_order() {
        let query = Filters::new()
            .eq("is_public", "true")
            .order("updated_at", SortDirection::Desc)
            .limit(20)
            .offset(40)
            .into_query(true);

        assert!(query.contains(&("select".to_string(), "*".to_string())));
        assert!(query.contains(&("is_public".to_string(), "eq.true".to_string())));
        assert!(query.contains(&("order".to_string(), "updated_at.desc".to_string())));
        assert!(query.contains(&("limit".to_string(), "20".to_string())));
        assert!(query.contains(&("offset".to_string(), "40".to_string())));
    }

    #[test]
    fn test_filters_or_ilike_escapes_user_text() {
        let query = Filters::new()
            .or_ilike(&["name", "description"], "a,b(c)")
            .into_query(false);

        let (key, value) = &query[0];
        assert_eq!(key, "or");
        // Reserved characters in the user text must not survive as syntax
        assert!(!value.contains("a,b(c)"));
        assert!(value.starts_with('('));
        assert!(value.contains("name.ilike."));
        assert!(value.contains("description.ilike."));
    }

    #[test]
    fn test_filters_contains() {
        let query = Filters::new()
            .contains("tags", &["dark".to_string(), "minimal".to_string()])
            .into_query(false);

        assert_eq!(query[0].0, "tags");
        assert_eq!(query[0].1, "cs.{dark,minimal}");
    }

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range(Some("0-9/57")), 57);
        assert_eq!(parse_content_range(Some("*/0")), 0);
        assert_eq!(parse_content_range(Some("garbage")), 0);
        assert_eq!(parse_content_range(None), 0);
    }

    #[test]
    fn test_no_select_param_for_mutations() {
        let query = Filters::new().eq("id", "abc").into_query(false);
        assert!(!query.iter().any(|(k, _)| k == "select"));
    }
}
