//! Data context bound to a template at render time

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Flat mapping from field name to value supplied to the renderer
///
/// The renderer never fills in missing keys: any default must be inserted here
/// before rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    fields: BTreeMap<String, Value>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Builder-style variant of [`RenderContext::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// This context with `overrides` laid on top; borrows when there is nothing to merge
    pub fn overlay<'a>(&'a self, overrides: &BTreeMap<String, Value>) -> Cow<'a, RenderContext> {
        if overrides.is_empty() {
            return Cow::Borrowed(self);
        }
        let mut merged = self.clone();
        merged
            .fields
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        Cow::Owned(merged)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = RenderContext::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}
