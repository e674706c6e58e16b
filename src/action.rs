//! Named actions routed through the dispatcher.

use core::fmt;

use serde_json::{Map, Value};

/// Key-value payload carried by an [`Action`].
pub type Payload = Map<String, Value>;

/// Lifecycle milestones emitted by the runtime rather than by the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Fired once, after the initial render.
    Mounted,
    /// Fired when the widget is torn down. Ends the runtime loop.
    Unmounted,
}

/// The set of action types a handler can be registered under.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionType {
    Lifecycle(Lifecycle),
    SetName,
    SetQuery,
    FetchTable,
    FetchTableStarted,
    FetchTableSucceeded,
    FetchTableFailed,
    /// Host-defined action outside the widget's own vocabulary.
    Custom(String),
}

impl ActionType {
    pub const MOUNTED: ActionType = ActionType::Lifecycle(Lifecycle::Mounted);
    pub const UNMOUNTED: ActionType = ActionType::Lifecycle(Lifecycle::Unmounted);

    /// Stable wire name used in logs.
    pub fn name(&self) -> &str {
        match self {
            ActionType::Lifecycle(Lifecycle::Mounted) => "COMPONENT_MOUNTED",
            ActionType::Lifecycle(Lifecycle::Unmounted) => "COMPONENT_UNMOUNTED",
            ActionType::SetName => "SET_NAME",
            ActionType::SetQuery => "SET_QUERY",
            ActionType::FetchTable => "FETCH_TABLE",
            ActionType::FetchTableStarted => "FETCH_TABLE_STARTED",
            ActionType::FetchTableSucceeded => "FETCH_TABLE_SUCCEEDED",
            ActionType::FetchTableFailed => "FETCH_TABLE_FAILED",
            ActionType::Custom(name) => name,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named event with a payload, consumed exactly once by the dispatcher.
///
/// ```rust
/// use rest_table_mvu::{Action, ActionType};
///
/// let action = Action::new(ActionType::SetName).with("name", "Fred");
/// assert_eq!(action.str("name"), Some("Fred"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub kind: ActionType,
    pub payload: Payload,
}

impl Action {
    /// Create an action with an empty payload.
    pub fn new(kind: ActionType) -> Self {
        Self {
            kind,
            payload: Payload::new(),
        }
    }

    /// Create an action from a JSON value.
    ///
    /// Objects become the payload as-is. Any other value is stored under `value`.
    pub fn from_json(kind: ActionType, value: Value) -> Self {
        let payload = match value {
            Value::Object(map) => map,
            Value::Null => Payload::new(),
            other => {
                let mut map = Payload::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        Self { kind, payload }
    }

    /// Builder-style payload insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn lifecycle(event: Lifecycle) -> Self {
        Self::new(ActionType::Lifecycle(event))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Read a string field from the payload.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}
