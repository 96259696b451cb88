//! Endpoint catalog loading and deduplication
//!
//! The catalog is a static JSON file holding the endpoints to probe, loaded
//! once at process start into an immutable table. Each record carries a
//! display name, an address (URL), and a category tag drawn from a small
//! closed set.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Category tag for a catalog endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// File download / FTP-style servers
    FileTransfer,
    /// Media and live-streaming servers
    MediaStreaming,
    /// Anything without a recognized tag
    Unclassified,
}

impl Category {
    /// Map a catalog tag onto the closed category set. Unrecognized tags
    /// become `Unclassified` rather than failing the load.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "ftp" | "file" | "file-transfer" => Category::FileTransfer,
            "media" | "streaming" | "media-streaming" => Category::MediaStreaming,
            _ => Category::Unclassified,
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Category::FileTransfer => "file-transfer",
            Category::MediaStreaming => "media-streaming",
            Category::Unclassified => "unclassified",
        }
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Category::from_tag(&tag))
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Unclassified
    }
}

/// One network destination to be tested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Display name
    pub name: String,
    /// Address (URL or bare host)
    #[serde(rename = "url")]
    pub address: String,
    /// Category tag
    #[serde(rename = "type", default)]
    pub category: Category,
}

impl Endpoint {
    /// Create an endpoint with an unclassified category
    pub fn new<N: Into<String>, A: Into<String>>(name: N, address: A) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            category: Category::Unclassified,
        }
    }

    /// Normalized identity key: scheme + host (+ explicit port), lowercased.
    /// Unparseable addresses fall back to the trimmed raw string so they
    /// still dedupe exactly.
    pub fn normalized_address(&self) -> String {
        normalize_address(&self.address)
    }

    /// Declared URL scheme, if the address parses
    pub fn scheme(&self) -> Option<String> {
        url::Url::parse(self.address.trim())
            .ok()
            .map(|u| u.scheme().to_string())
    }

    /// Declared or default port, if the address parses
    pub fn port(&self) -> Option<u16> {
        url::Url::parse(self.address.trim())
            .ok()
            .and_then(|u| u.port_or_known_default())
    }

    /// Hostname of the address, if the address parses
    pub fn host(&self) -> Option<String> {
        url::Url::parse(self.address.trim())
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
    }
}

/// Normalize an address string for identity comparison
pub fn normalize_address(address: &str) -> String {
    let trimmed = address.trim();
    match url::Url::parse(trimmed) {
        Ok(parsed) => {
            let host = match parsed.host_str() {
                Some(h) => h.to_ascii_lowercase(),
                None => return trimmed.to_string(),
            };
            match parsed.port() {
                Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
                None => format!("{}://{}", parsed.scheme(), host),
            }
        }
        Err(_) => trimmed.to_string(),
    }
}

/// Remove endpoints whose normalized address has already been seen,
/// preserving first-seen order. Idempotent; empty input yields empty output.
pub fn dedupe_endpoints(endpoints: &[Endpoint]) -> Vec<Endpoint> {
    let mut seen = HashSet::with_capacity(endpoints.len());
    let mut unique = Vec::with_capacity(endpoints.len());

    for endpoint in endpoints {
        if seen.insert(endpoint.normalized_address()) {
            unique.push(endpoint.clone());
        }
    }

    unique
}

/// Load the endpoint catalog from a JSON file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Endpoint>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AppError::catalog(format!(
            "Catalog file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| AppError::catalog(format!("Failed to read {}: {}", path.display(), e)))?;

    parse_catalog(&contents)
        .map_err(|e| AppError::catalog(format!("Invalid catalog {}: {}", path.display(), e)))
}

/// Parse catalog JSON into endpoint records
pub fn parse_catalog(contents: &str) -> Result<Vec<Endpoint>> {
    let endpoints: Vec<Endpoint> = serde_json::from_str(contents)?;

    for endpoint in &endpoints {
        if endpoint.address.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Endpoint '{}' has an empty address",
                endpoint.name
            )));
        }
    }

    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(name: &str, address: &str) -> Endpoint {
        Endpoint::new(name, address)
    }

    #[test]
    fn test_normalize_strips_path_and_query() {
        assert_eq!(
            normalize_address("http://Example.com/some/path?q=1"),
            "http://example.com"
        );
    }

    #[test]
    fn test_normalize_keeps_explicit_port() {
        assert_eq!(
            normalize_address("http://example.com:8080/media"),
            "http://example.com:8080"
        );
    }

    #[test]
    fn test_normalize_unparseable_falls_back_to_raw() {
        assert_eq!(normalize_address("  not a url  "), "not a url");
    }

    #[test]
    fn test_dedupe_preserves_first_occurrence() {
        let endpoints = vec![
            endpoint("A", "http://a.example"),
            endpoint("B", "http://a.example"),
            endpoint("C", "http://b.example"),
        ];

        let unique = dedupe_endpoints(&endpoints);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "A");
        assert_eq!(unique[1].name, "C");
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let endpoints = vec![
            endpoint("A", "http://a.example"),
            endpoint("B", "http://a.example/path"),
            endpoint("C", "http://b.example"),
        ];

        let once = dedupe_endpoints(&endpoints);
        let twice = dedupe_endpoints(&once);
        assert_eq!(once, twice);
        assert!(once.len() <= endpoints.len());
    }

    #[test]
    fn test_dedupe_empty_input() {
        assert!(dedupe_endpoints(&[]).is_empty());
    }

    #[test]
    fn test_category_tag_mapping() {
        assert_eq!(Category::from_tag("ftp"), Category::FileTransfer);
        assert_eq!(Category::from_tag("File"), Category::FileTransfer);
        assert_eq!(Category::from_tag("media"), Category::MediaStreaming);
        assert_eq!(Category::from_tag("streaming"), Category::MediaStreaming);
        assert_eq!(Category::from_tag("whatever"), Category::Unclassified);
        assert_eq!(Category::from_tag(""), Category::Unclassified);
    }

    #[test]
    fn test_parse_catalog_with_category_aliases() {
        let json = r#"[
            {"name": "FTP One", "url": "http://ftp1.example", "type": "ftp"},
            {"name": "Live TV", "url": "http://tv.example", "type": "media"},
            {"name": "Other", "url": "http://other.example", "type": "something-new"}
        ]"#;

        let endpoints = parse_catalog(json).unwrap();
        assert_eq!(endpoints.len(), 3);
        assert_eq!(endpoints[0].category, Category::FileTransfer);
        assert_eq!(endpoints[1].category, Category::MediaStreaming);
        assert_eq!(endpoints[2].category, Category::Unclassified);
    }

    #[test]
    fn test_parse_catalog_missing_category_defaults() {
        let json = r#"[{"name": "Bare", "url": "http://bare.example"}]"#;
        let endpoints = parse_catalog(json).unwrap();
        assert_eq!(endpoints[0].category, Category::Unclassified);
    }

    #[test]
    fn test_parse_catalog_rejects_empty_address() {
        let json = r#"[{"name": "Broken", "url": "   "}]"#;
        assert!(parse_catalog(json).is_err());
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let result = load_catalog("/nonexistent/endpoints.json");
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn test_endpoint_scheme_and_port() {
        let ep = endpoint("A", "https://a.example/path");
        assert_eq!(ep.scheme().as_deref(), Some("https"));
        assert_eq!(ep.port(), Some(443));
        assert_eq!(ep.host().as_deref(), Some("a.example"));

        let bad = endpoint("B", "not a url");
        assert_eq!(bad.scheme(), None);
        assert_eq!(bad.port(), None);
    }
}
