use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::State;

/// A row from the remote table, kept exactly as the API returned it.
///
/// The view reads `first_name`, `last_name` and `email` through the
/// accessors, which fall back to `""` for absent, null or non-string values.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn first_name(&self) -> &str {
        self.text("first_name")
    }

    pub fn last_name(&self) -> &str {
        self.text("last_name")
    }

    pub fn email(&self) -> &str {
        self.text("email")
    }

    pub fn sys_id(&self) -> &str {
        self.text("sys_id")
    }

    /// A field as returned, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// `last, first`, as shown in the compact list.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name(), self.first_name())
    }

    fn text(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or_default()
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Record(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WidgetState {
    pub name: String,
    pub query: String,
    pub list: Vec<Record>,
    pub loading: bool,
}

/// Partial update for [`WidgetState`]; `None` fields are left alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WidgetPatch {
    pub name: Option<String>,
    pub query: Option<String>,
    pub list: Option<Vec<Record>>,
    pub loading: Option<bool>,
}

impl WidgetPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn loading(loading: bool) -> Self {
        Self {
            loading: Some(loading),
            ..Self::default()
        }
    }

    /// Replace the list and clear the loading flag.
    pub fn loaded(list: Vec<Record>) -> Self {
        Self {
            list: Some(list),
            loading: Some(false),
            ..Self::default()
        }
    }
}

impl State for WidgetState {
    type Patch = WidgetPatch;

    fn merge(&self, patch: WidgetPatch) -> Self {
        WidgetState {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            query: patch.query.unwrap_or_else(|| self.query.clone()),
            list: patch.list.unwrap_or_else(|| self.list.clone()),
            loading: patch.loading.unwrap_or(self.loading),
        }
    }
}
