//! Legacy SQL-proxy endpoint
//!
//! Accepts exactly one statement shape, `INSERT INTO design_systems
//! (cols...) VALUES (...)`, parses it into structured values, and
//! executes the insert through the service. The raw SQL text is never
//! forwarded anywhere; anything outside the recognised shape is
//! rejected with 400.

use app_core::DesignSystemData;
use app_state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub(crate) struct SqlProxyBody {
    query: Option<String>,
}

/// `POST /api/supabase-mcp`
pub(crate) async fn sql_proxy(
    State(state): State<AppState>,
    Json(body): Json<SqlProxyBody>,
) -> ApiResult<impl IntoResponse> {
    let query = body
        .query
        .ok_or_else(|| ApiError::Validation("Query is required".to_string()))?;

    let insert = parse_insert(&query).ok_or_else(|| {
        ApiError::Validation("Unsupported query; only design_systems inserts are accepted".to_string())
    })?;

    let (user_id, data) = insert.into_design_system()?;
    let id = state.service.create(&user_id, data).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

// ====== Statement recogniser ======

/// A literal value extracted from the VALUES list
#[derive(Debug, Clone, PartialEq)]
enum SqlValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

/// A recognised `INSERT INTO design_systems` statement
#[derive(Debug, PartialEq)]
struct InsertStatement {
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl InsertStatement {
    fn value(&self, column: &str) -> Option<&SqlValue> {
        self.columns.iter().position(|c| c == column).map(|i| &self.values[i])
    }

    fn text(&self, column: &str) -> Option<String> {
        match self.value(column) {
            Some(SqlValue::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn bool(&self, column: &str) -> Option<bool> {
        match self.value(column) {
            Some(SqlValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Map recognised columns onto a design-system insert
    fn into_design_system(self) -> ApiResult<(String, DesignSystemData)> {
        let user_id = self.text("user_id").ok_or(ApiError::MissingUserId)?;
        let name = self
            .text("name")
            .ok_or_else(|| ApiError::Validation("name column is required".to_string()))?;

        let data = DesignSystemData {
            name,
            description: self.text("description"),
            category: self.text("category"),
            tags: self.text("tags").map(parse_array_literal).unwrap_or_default(),
            is_public: self.bool("is_public").unwrap_or(false),
            components: Vec::new(),
            themes: Vec::new(),
        };

        Ok((user_id, data))
    }
}

/// Parse a Postgres array literal like `{a,"b c"}` into its elements
fn parse_array_literal(text: String) -> Vec<String> {
    let inner = text.trim();
    let inner = inner.strip_prefix('{').and_then(|s| s.strip_suffix('}')).unwrap_or(inner);

    inner
        .split(',')
        .map(|item| item.trim().trim_matches('"').to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Recognise `INSERT INTO design_systems (cols...) VALUES (...)`
///
/// Returns `None` for anything else: other statements, other tables,
/// multiple rows, trailing clauses, or a column/value count mismatch.
fn parse_insert(sql: &str) -> Option<InsertStatement> {
    let rest = sql.trim().trim_end_matches(';').trim();
    let rest = strip_keyword(rest, "insert")?;
    let rest = strip_keyword(rest, "into")?;
    let rest = strip_keyword(rest, "design_systems")?;

    let (columns, rest) = parse_column_list(rest)?;
    let rest = strip_keyword(rest, "values")?;
    let (values, rest) = parse_value_list(rest)?;

    if !rest.trim().is_empty() || columns.len() != values.len() || columns.is_empty() {
        return None;
    }

    Some(InsertStatement { columns, values })
}

/// Strip a leading keyword, case-insensitive, ending at a word boundary
fn strip_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let input = input.trim_start();
    if input.len() < keyword.len() || !input[..keyword.len()].eq_ignore_ascii_case(keyword) {
        return None;
    }

    let rest = &input[keyword.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if !c.is_ascii_alphanumeric() && c != '_' => Some(rest),
        Some(_) => None,
    }
}

/// Parse a parenthesised identifier list
fn parse_column_list(input: &str) -> Option<(Vec<String>, &str)> {
    let input = input.trim_start();
    let inner_start = input.strip_prefix('(')?;
    let close = inner_start.find(')')?;
    let (inner, rest) = (&inner_start[..close], &inner_start[close + 1..]);

    let mut columns = Vec::new();
    for raw in inner.split(',') {
        let name = raw.trim().trim_matches('"');
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
        columns.push(name.to_string());
    }

    Some((columns, rest))
}

/// Parse a parenthesised literal list: quoted strings (with `''`
/// escapes), numbers, booleans, and NULL
fn parse_value_list(input: &str) -> Option<(Vec<SqlValue>, &str)> {
    let input = input.trim_start();
    let mut chars = input.strip_prefix('(')?.char_indices().peekable();
    let body = input.strip_prefix('(')?;

    let mut values = Vec::new();
    let mut expect_value = true;

    loop {
        // Skip whitespace
        while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
            chars.next();
        }

        let (pos, c) = *chars.peek()?;
        match c {
            ')' => {
                if expect_value && !values.is_empty() {
                    return None;
                }
                return Some((values, &body[pos + 1..]));
            }
            ',' => {
                if expect_value {
                    return None;
                }
                chars.next();
                expect_value = true;
            }
            '\'' => {
                if !expect_value {
                    return None;
                }
                chars.next();
                let mut text = String::new();
                loop {
                    let (_, c) = chars.next()?;
                    if c == '\'' {
                        // Doubled quote is an escaped quote
                        if matches!(chars.peek(), Some((_, '\''))) {
                            chars.next();
                            text.push('\'');
                        } else {
                            break;
                        }
                    } else {
                        text.push(c);
                    }
                }
                values.push(SqlValue::Text(text));
                expect_value = false;
            }
            _ => {
                if !expect_value {
                    return None;
                }
                let mut token = String::new();
                while matches!(chars.peek(), Some((_, c)) if !c.is_whitespace() && *c != ',' && *c != ')')
                {
                    token.push(chars.next()?.1);
                }

                let value = if token.eq_ignore_ascii_case("null") {
                    SqlValue::Null
                } else if token.eq_ignore_ascii_case("true") {
                    SqlValue::Bool(true)
                } else if token.eq_ignore_ascii_case("false") {
                    SqlValue::Bool(false)
                } else {
                    SqlValue::Number(token.parse().ok()?)
                };
                values.push(value);
                expect_value = false;
            }
        }
    }
}
