//! Query and body parameters
//!
//! [`Params`] is an ordered JSON object. Endpoint methods fill it with their
//! named arguments, callers may append extra options, and the dispatcher turns
//! it into a query string (GET, DELETE) or a JSON body (POST, PUT). Entries
//! whose value is `null` are never sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RestError, RestResult};

/// Ordered key/value parameters for a request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parameters from any serializable struct
    ///
    /// The value must serialize to a JSON object.
    pub fn from_serialize<T: Serialize>(value: &T) -> RestResult<Self> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(RestError::InvalidParameter(format!(
                "expected an object, got {}",
                other
            ))),
            Err(e) => Err(RestError::InvalidParameter(e.to_string())),
        }
    }

    /// Add a parameter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a parameter if it has a value
    pub fn with_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Insert a parameter, returning the previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a parameter
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append caller-supplied options
    ///
    /// New keys are added after the existing ones; a key that is already
    /// present keeps its position and takes the new value.
    pub fn merge(mut self, extra: Option<Params>) -> Self {
        if let Some(extra) = extra {
            self.0.extend(extra.0);
        }
        self
    }

    /// Drop entries whose value is `null`
    pub fn without_nulls(mut self) -> Self {
        self.0.retain(|_, value| !value.is_null());
        self
    }

    /// Encode as query string pairs
    ///
    /// Arrays become repeated keys, objects are sent as JSON text and nulls
    /// are skipped.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            match value {
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = query_text(item) {
                            pairs.push((key.clone(), text));
                        }
                    }
                }
                other => {
                    if let Some(text) = query_text(other) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
        }
        pairs
    }

    /// Unwrap into the underlying JSON map
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

fn query_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        Value::Object(params.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_opt_skips_none() {
        let params = Params::new()
            .with("product_id", "BTC-USD")
            .with_opt("limit", None::<u32>)
            .with_opt("cursor", Some("abc"));

        assert_eq!(params.len(), 2);
        assert!(params.get("limit").is_none());
        assert_eq!(params.get("cursor"), Some(&json!("abc")));
    }

    #[test]
    fn test_merge_keeps_order() {
        let params = Params::new()
            .with("limit", 2)
            .merge(Some(Params::new().with("test_kwarg", "test")));

        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("limit".to_string(), "2".to_string()),
                ("test_kwarg".to_string(), "test".to_string()),
            ]
        );
    }

    #[test]
    fn test_merge_overrides_existing_key() {
        let params = Params::new()
            .with("limit", 2)
            .with("cursor", "a")
            .merge(Some(Params::new().with("limit", 50)));

        let keys: Vec<_> = params.clone().into_inner().keys().cloned().collect();
        assert_eq!(keys, vec!["limit", "cursor"]);
        assert_eq!(params.get("limit"), Some(&json!(50)));
    }

    #[test]
    fn test_query_pairs_encoding() {
        let params = Params::new()
            .with("product_ids", vec!["BTC-USD", "ETH-USD"])
            .with("get_all_products", true)
            .with("skipped", Value::Null)
            .with("nested", json!({"a": 1}));

        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("product_ids".to_string(), "BTC-USD".to_string()),
                ("product_ids".to_string(), "ETH-USD".to_string()),
                ("get_all_products".to_string(), "true".to_string()),
                ("nested".to_string(), r#"{"a":1}"#.to_string()),
            ]
        );
    }

    #[test]
    fn test_without_nulls() {
        let params: Params = [("a", json!(1)), ("b", Value::Null)].into_iter().collect();
        let params = params.without_nulls();
        assert_eq!(params.len(), 1);
        assert_eq!(Value::from(params), json!({"a": 1}));
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct Query {
            limit: Option<u32>,
            product_id: &'static str,
        }

        let params = Params::from_serialize(&Query {
            limit: None,
            product_id: "BTC-USD",
        })
        .unwrap()
        .without_nulls();
        assert_eq!(Value::from(params), json!({"product_id": "BTC-USD"}));

        assert!(Params::from_serialize(&vec![1, 2]).is_err());
    }
}
