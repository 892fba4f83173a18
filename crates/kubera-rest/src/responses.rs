//! Kubera API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of GET /api/v3/data/portfolio.
///
/// The entry is kept exactly as the server sent it, so raw output and the
/// cache see every field in its original order. The accessors read the
/// well-known fields and treat a missing or `null` value as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioSummary(Value);

impl PortfolioSummary {
    pub fn id(&self) -> Option<&str> {
        self.text("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn currency(&self) -> Option<&str> {
        self.text("currency")
    }

    /// Any other field of the entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Value> for PortfolioSummary {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Body of POST /api/v3/data/item/{id}.
///
/// Only the fields that are set are sent; the server leaves the others alone.
/// Serialized field order is `name`, `description`, `value`, `cost`, which is
/// also the order the signature covers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateItemRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl UpdateItemRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.value.is_none()
            && self.cost.is_none()
    }
}
