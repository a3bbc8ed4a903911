use std::collections::BTreeMap;
use std::fmt;

use reqwest::blocking::Client;
use serde_json::Value;

/// Documents per collection page, matching the server's paging granularity.
pub const PAGE_SIZE: u64 = 40;

#[derive(Debug, Clone)]
pub enum ApiError {
    Transport(String),
    Status { status: u16, text: String },
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(error) => write!(f, "request failed: {}", error),
            ApiError::Status { status, text } => {
                if text.trim().is_empty() {
                    write!(f, "server returned status {}", status)
                } else {
                    write!(f, "{}", text.trim())
                }
            }
            ApiError::Decode(error) => write!(f, "unexpected response: {}", error),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone)]
pub struct DocumentSummary {
    pub id: String,
    pub body: Value,
}

/// Pages are zero-based on the wire; navigable paths carry 1-based pages.
pub fn total_pages(count: u64) -> u64 {
    if count == 0 { 1 } else { count.div_ceil(PAGE_SIZE) }
}

/// Translate a 1-based page from a navigable path into the wire request
/// parameters: zero-based page index and total page count.
pub fn page_request(page: u64, count: u64) -> (u64, u64) {
    (page.saturating_sub(1), total_pages(count))
}

/// Client for the server's admin REST endpoints. Every request is a GET
/// against the configured base URL; when a credential is configured it is
/// attached as the `Authorization` header here, in one place, so individual
/// operations never deal with auth.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credential: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, credential: Option<String>) -> Self {
        let credential = credential.filter(|value| !value.trim().is_empty());
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            credential,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let mut request = self.http.get(format!("{}{}", self.base_url, path)).query(params);
        if let Some(credential) = &self.credential {
            request = request.header("Authorization", credential);
        }

        let response =
            request.send().map_err(|error| ApiError::Transport(error.to_string()))?;
        let status = response.status();
        let text = response.text().map_err(|error| ApiError::Transport(error.to_string()))?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(ApiError::Status { status: status.as_u16(), text })
        }
    }

    pub fn version(&self) -> Result<String, ApiError> {
        let text = self.get("/version", &[])?;
        Ok(text.trim().trim_matches('"').to_owned())
    }

    pub fn all_collections(&self) -> Result<Vec<String>, ApiError> {
        let text = self.get("/all", &[])?;
        serde_json::from_str(&text).map_err(|error| ApiError::Decode(error.to_string()))
    }

    pub fn approx_doc_count(&self, col: &str) -> Result<u64, ApiError> {
        let text = self.get("/approxdoccount", &[("col", col)])?;
        text.trim().parse().map_err(|_| ApiError::Decode(format!("not a count: {}", text.trim())))
    }

    pub fn query(&self, col: &str, query: &str) -> Result<Vec<DocumentSummary>, ApiError> {
        let text = self.get("/query", &[("col", col), ("q", query)])?;
        parse_document_map(&text)
    }

    pub fn get_page(
        &self,
        col: &str,
        page: u64,
        total: u64,
    ) -> Result<Vec<DocumentSummary>, ApiError> {
        let text = self.get(
            "/getpage",
            &[("col", col), ("page", &page.to_string()), ("total", &total.to_string())],
        )?;
        parse_document_map(&text)
    }

    pub fn get_document(&self, col: &str, id: &str) -> Result<Value, ApiError> {
        let text = self.get("/get", &[("col", col), ("id", id)])?;
        serde_json::from_str(&text).map_err(|error| ApiError::Decode(error.to_string()))
    }

    pub fn insert_document(&self, col: &str, doc: &Value) -> Result<String, ApiError> {
        let text = self.get("/insert", &[("col", col), ("doc", &doc.to_string())])?;
        Ok(parse_new_id(&text))
    }

    pub fn update_document(&self, col: &str, id: &str, doc: &Value) -> Result<(), ApiError> {
        self.get("/update", &[("col", col), ("id", id), ("doc", &doc.to_string())])?;
        Ok(())
    }

    pub fn delete_document(&self, col: &str, id: &str) -> Result<(), ApiError> {
        self.get("/delete", &[("col", col), ("id", id)])?;
        Ok(())
    }

    pub fn create_collection(&self, col: &str) -> Result<(), ApiError> {
        self.get("/create", &[("col", col)])?;
        Ok(())
    }

    pub fn rename_collection(&self, old: &str, new: &str) -> Result<(), ApiError> {
        self.get("/rename", &[("old", old), ("new", new)])?;
        Ok(())
    }

    pub fn drop_collection(&self, col: &str) -> Result<(), ApiError> {
        self.get("/drop", &[("col", col)])?;
        Ok(())
    }

    pub fn scrub_collection(&self, col: &str) -> Result<(), ApiError> {
        self.get("/scrub", &[("col", col)])?;
        Ok(())
    }

    pub fn indexes(&self, col: &str) -> Result<Vec<Vec<String>>, ApiError> {
        let text = self.get("/indexes", &[("col", col)])?;
        serde_json::from_str(&text).map_err(|error| ApiError::Decode(error.to_string()))
    }

    pub fn create_index(&self, col: &str, path: &str) -> Result<(), ApiError> {
        self.get("/index", &[("col", col), ("path", path)])?;
        Ok(())
    }

    pub fn remove_index(&self, col: &str, path: &str) -> Result<(), ApiError> {
        self.get("/unindex", &[("col", col), ("path", path)])?;
        Ok(())
    }
}

/// Query and page responses map document id to document body.
fn parse_document_map(text: &str) -> Result<Vec<DocumentSummary>, ApiError> {
    let map: BTreeMap<String, Value> =
        serde_json::from_str(text).map_err(|error| ApiError::Decode(error.to_string()))?;
    Ok(map.into_iter().map(|(id, body)| DocumentSummary { id, body }).collect())
}

/// The insert endpoint answers with the new document id, bare or quoted.
fn parse_new_id(text: &str) -> String {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::String(id)) => id,
        Ok(Value::Number(id)) => id.to_string(),
        _ => text.trim().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{PAGE_SIZE, page_request, parse_document_map, parse_new_id, total_pages};

    #[test]
    fn page_math_matches_server_granularity() {
        assert_eq!(PAGE_SIZE, 40);
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(40), 1);
        assert_eq!(total_pages(41), 2);
        assert_eq!(total_pages(85), 3);
    }

    #[test]
    fn second_page_of_85_documents_requests_zero_based_page_one_of_three() {
        assert_eq!(page_request(2, 85), (1, 3));
    }

    #[test]
    fn first_page_is_zero_based_zero() {
        assert_eq!(page_request(1, 12), (0, 1));
    }

    #[test]
    fn document_maps_become_id_body_pairs() {
        let parsed = parse_document_map(r#"{"7":{"a":1},"12":{"b":2}}"#).expect("valid map");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id, "12");
        assert_eq!(parsed[0].body["b"], 2);
        assert_eq!(parsed[1].id, "7");
    }

    #[test]
    fn new_ids_parse_bare_or_quoted() {
        assert_eq!(parse_new_id("12345"), "12345");
        assert_eq!(parse_new_id("\"12345\""), "12345");
        assert_eq!(parse_new_id(" 12345 \n"), "12345");
    }
}
