//! Canonical request descriptors for list and auth endpoints.

use serde_json::Value;

use crate::query::{FilterSet, ListQuery};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Everything a transport needs to issue one request, relative to the backend base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub path: String,
    /// Query parameters in emission order.
    pub params: Vec<(String, String)>,
    /// JSON body for `POST` requests.
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            params: Vec::new(),
            body: Some(body),
        }
    }

    /// Value of the first parameter called `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// `path?name=value&...`, url-encoded.
    pub fn path_and_query(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        match serde_html_form::to_string(&self.params) {
            Ok(query) => format!("{}?{}", self.path, query),
            Err(err) => {
                log::error!("Failed to encode query for {}: {err}", self.path);
                self.path.clone()
            }
        }
    }
}

/// Turns a [`ListQuery`] into the request for one paginated endpoint.
#[derive(Clone, Copy, Debug)]
pub struct QueryBuilder {
    path: &'static str,
    fixed: &'static [(&'static str, &'static str)],
}

impl QueryBuilder {
    pub const fn new(path: &'static str) -> Self {
        Self { path, fixed: &[] }
    }

    /// Parameters sent on every request, right after `limit` and `offset`.
    pub const fn with_fixed(self, fixed: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            path: self.path,
            fixed,
        }
    }

    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Emits `limit`, `offset`, the fixed parameters, the sort when set and
    /// finally the non-blank filters. Sort values are passed through as given.
    pub fn build<F: FilterSet>(&self, query: &ListQuery<F>) -> RequestDescriptor {
        let mut params = vec![
            ("limit".to_string(), query.limit.get().to_string()),
            ("offset".to_string(), query.offset.to_string()),
        ];

        params.extend(
            self.fixed
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
        );

        if let Some(sort_by) = &query.sort_by {
            params.push(("sort_by".to_string(), sort_by.clone()));
        }
        if let Some(sort_dir) = query.sort_dir {
            params.push(("sort_dir".to_string(), sort_dir.as_str().to_string()));
        }

        params.extend(
            query
                .filters
                .query_pairs()
                .into_iter()
                .filter(|(_, v)| !v.trim().is_empty()),
        );

        RequestDescriptor {
            method: HttpMethod::Get,
            path: self.path.to_string(),
            params,
            body: None,
        }
    }
}
