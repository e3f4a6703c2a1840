//! Request options and header merging

use reqwest::Method;
use serde::Serialize;

use crate::error::Error;

/// Header attached to mutating requests when a CSRF token is available
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Caller-supplied options for a single request
///
/// An unset method is sent as GET. Headers are kept as an ordered list so
/// merge precedence stays explicit; duplicate keys across layers resolve
/// last-write-wins in [`merge_headers`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method, GET when unset
    pub method: Option<Method>,
    /// Additional headers, applied over the client defaults
    pub headers: Vec<(String, String)>,
    /// Raw request body
    pub body: Option<String>,
}

impl RequestOptions {
    /// Create empty options (implicit GET, no headers, no body)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request method
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Set a JSON-serialized body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, Error> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }
}

/// Headers applied to every request unless overridden by the caller
pub(crate) fn default_headers() -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Cache-Control".to_string(), "no-cache".to_string()),
    ]
}

/// Merge header layers with last-write-wins precedence
///
/// Layers are applied in order; a key appearing in a later layer replaces
/// the earlier value but keeps the position of its first occurrence. Key
/// comparison is ASCII-case-insensitive.
pub fn merge_headers(layers: &[&[(String, String)]]) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = Vec::new();

    for layer in layers {
        for (key, value) in layer.iter() {
            match merged
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(key))
            {
                Some((_, existing_value)) => *existing_value = value.clone(),
                None => merged.push((key.clone(), value.clone())),
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_merge_disjoint_layers() {
        let defaults = layer(&[("Content-Type", "application/json")]);
        let caller = layer(&[("Authorization", "Bearer token123")]);

        let merged = merge_headers(&[&defaults, &caller]);

        assert_eq!(
            merged,
            layer(&[
                ("Content-Type", "application/json"),
                ("Authorization", "Bearer token123"),
            ])
        );
    }

    #[test]
    fn test_later_layer_wins() {
        let defaults = layer(&[("Content-Type", "application/json")]);
        let caller = layer(&[("Content-Type", "text/plain")]);

        let merged = merge_headers(&[&defaults, &caller]);

        assert_eq!(merged, layer(&[("Content-Type", "text/plain")]));
    }

    #[test]
    fn test_merge_is_case_insensitive() {
        let defaults = layer(&[("Content-Type", "application/json")]);
        let caller = layer(&[("content-type", "text/csv")]);

        let merged = merge_headers(&[&defaults, &caller]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].1, "text/csv");
    }

    #[test]
    fn test_three_layer_precedence() {
        let defaults = layer(&[("Content-Type", "application/json"), ("X-A", "1")]);
        let caller = layer(&[("X-A", "2"), ("X-B", "3")]);
        let csrf = layer(&[(CSRF_HEADER, "token"), ("X-B", "4")]);

        let merged = merge_headers(&[&defaults, &caller, &csrf]);

        assert_eq!(
            merged,
            layer(&[
                ("Content-Type", "application/json"),
                ("X-A", "2"),
                ("X-B", "4"),
                (CSRF_HEADER, "token"),
            ])
        );
    }

    #[test]
    fn test_duplicate_within_one_layer() {
        let caller = layer(&[("X-A", "1"), ("X-A", "2")]);

        let merged = merge_headers(&[&caller]);

        assert_eq!(merged, layer(&[("X-A", "2")]));
    }

    #[test]
    fn test_options_json_body() {
        let options = RequestOptions::new()
            .method(Method::POST)
            .json(&serde_json::json!({"name": "test"}))
            .expect("serializable value");

        assert_eq!(options.body.as_deref(), Some(r#"{"name":"test"}"#));
    }
}
