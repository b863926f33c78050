//! Concrete URLs as seen by the navigator: path, query and hash.

use crate::error::{Result, RouterError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use url::form_urlencoded;
use url::Url;

/// A parsed concrete location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Path with the base prefix removed, always starting with `/`
    pub path: String,
    /// Decoded query parameters; the last occurrence of a key wins
    pub query: BTreeMap<String, String>,
    /// Fragment without the leading `#`
    pub hash: Option<String>,
}

impl Location {
    /// Parse a URL such as `/app/books/42?tab=threads#top`, removing `base`
    /// from the front of the path.
    ///
    /// Relative URLs are resolved against the site root, so `books` and
    /// `/books` are the same location. The path keeps its percent-encoding.
    ///
    /// # Errors
    /// Returns `InvalidUrl` if the URL cannot be parsed.
    pub fn parse(url: &str, base: &str) -> Result<Self> {
        static ORIGIN: OnceLock<Url> = OnceLock::new();
        let origin =
            ORIGIN.get_or_init(|| Url::parse("http://localhost/").expect("valid origin"));

        let parsed = origin.join(url).map_err(|e| RouterError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            path: strip_base(parsed.path(), base),
            query: parsed.query_pairs().into_owned().collect(),
            hash: parsed.fragment().map(str::to_string),
        })
    }

    /// Render the location back to a URL under `base`.
    #[must_use]
    pub fn to_url(&self, base: &str) -> String {
        let mut url = join_base(base, &self.path);

        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.query)
                .finish();
            url.push('?');
            url.push_str(&query);
        }

        if let Some(hash) = &self.hash {
            url.push('#');
            url.push_str(hash);
        }

        url
    }
}

/// Normalise a base prefix: no trailing slash, empty for the root base.
#[must_use]
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Remove `base` from the front of `path`.
///
/// Paths outside the base are returned unchanged. The result always starts
/// with `/`.
#[must_use]
pub fn strip_base(path: &str, base: &str) -> String {
    let base = normalize_base(base);
    let stripped = match path.strip_prefix(base.as_str()) {
        Some(rest) if base.is_empty() || rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };

    if stripped.starts_with('/') {
        stripped.to_string()
    } else {
        format!("/{stripped}")
    }
}

/// Prefix `path` with `base`.
#[must_use]
pub fn join_base(base: &str, path: &str) -> String {
    let base = normalize_base(base);
    if base.is_empty() {
        path.to_string()
    } else if path == "/" {
        format!("{base}/")
    } else {
        format!("{base}{path}")
    }
}
