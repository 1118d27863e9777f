use std::collections::BTreeMap;

use serde::Serialize;

/// Descriptor returned by the API root.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApiRoot {
    pub name: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    /// Entry points keyed by resource name.
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Describes the service and its top-level resources.
pub fn api_root() -> ApiRoot {
    let endpoints = BTreeMap::from([
        ("articles", "/articles/"),
        ("tags", "/tags/"),
        ("comments", "/articles/{article_id}/comments/"),
    ]);

    ApiRoot {
        name: crate::SERVICE_NAME,
        message: "Welcome to the Blog API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_lists_resources() {
        let root = api_root();

        assert_eq!(root.message, "Welcome to the Blog API");
        assert_eq!(root.endpoints.get("articles"), Some(&"/articles/"));
        assert_eq!(root.endpoints.len(), 3);
    }
}
