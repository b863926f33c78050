//! Parameter bindings extracted from, or supplied for, path patterns.

use crate::error::{Result, RouterError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Mapping from path parameter name to its string value.
///
/// Ordered by name so snapshots and serialized forms are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamBindings(BTreeMap<String, String>);

impl ParamBindings {
    /// Create an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `name` to `value`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Raw value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value bound to `name` parsed as `T`.
    ///
    /// # Errors
    /// Returns `MissingParam` if nothing is bound and `InvalidParam` if the
    /// value does not parse.
    pub fn parse<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.get(name).ok_or_else(|| RouterError::MissingParam {
            route: String::new(),
            param: name.to_string(),
        })?;

        value.parse().map_err(|e: T::Err| RouterError::InvalidParam {
            param: name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Bound parameter names in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Keep only the bindings whose names satisfy `keep`.
    #[must_use]
    pub fn retain_names<F>(mut self, keep: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        self.0.retain(|k, _| keep(k));
        self
    }
}

impl<K, V> FromIterator<(K, V)> for ParamBindings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let params = ParamBindings::new().with("bookId", "42");
        assert_eq!(params.get("bookId"), Some("42"));
        assert!(params.contains("bookId"));
        assert!(!params.contains("threadId"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_typed_parse() {
        let params: ParamBindings = [("bookId", "42"), ("slug", "dune")].into_iter().collect();
        let id: u64 = params.parse("bookId").expect("parse bookId");
        assert_eq!(id, 42);

        let err = params.parse::<u64>("slug").unwrap_err();
        assert!(matches!(err, RouterError::InvalidParam { ref param, .. } if param == "slug"));

        let err = params.parse::<u64>("threadId").unwrap_err();
        assert!(matches!(err, RouterError::MissingParam { .. }));
    }

    #[test]
    fn test_retain_names() {
        let params: ParamBindings = [("bookId", "1"), ("extra", "x")].into_iter().collect();
        let kept = params.retain_names(|n| n == "bookId");
        assert_eq!(kept.names().collect::<Vec<_>>(), vec!["bookId"]);
    }

    #[test]
    fn test_serialize_as_map() {
        let params = ParamBindings::new().with("threadId", "7");
        let json = serde_json::to_string(&params).expect("serialize params");
        assert_eq!(json, r#"{"threadId":"7"}"#);
    }
}
