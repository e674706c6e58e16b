//! Declarative UI tree produced by a component's view function.

use core::fmt;
use std::fmt::Write as _;

/// DOM-like input events a listener can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomEvent {
    Change,
    KeyUp,
    Click,
}

impl DomEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomEvent::Change => "change",
            DomEvent::KeyUp => "keyup",
            DomEvent::Click => "click",
        }
    }
}

/// Data delivered to a listener, e.g. the input's current text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventData {
    pub value: String,
}

impl EventData {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

pub type Listener = Box<dyn Fn(EventData) + Send + Sync + 'static>;

/// A node in the rendered tree.
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with attributes, listeners and children.
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub listeners: Vec<(DomEvent, Listener)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element(Element {
            tag: tag.into(),
            id: None,
            attrs: Vec::new(),
            listeners: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    // Builder methods below are no-ops on text nodes.

    pub fn id(mut self, id: impl Into<String>) -> Self {
        if let Node::Element(element) = &mut self {
            element.id = Some(id.into());
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Node::Element(element) = &mut self {
            element.attrs.push((name.into(), value.into()));
        }
        self
    }

    pub fn on<F>(mut self, event: DomEvent, listener: F) -> Self
    where
        F: Fn(EventData) + Send + Sync + 'static,
    {
        if let Node::Element(element) = &mut self {
            element.listeners.push((event, Box::new(listener)));
        }
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        if let Node::Element(element) = &mut self {
            element.children.push(child);
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        if let Node::Element(element) = &mut self {
            element.children.extend(children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element(element) => Some(&element.tag),
            Node::Text(_) => None,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(element) => element
                .attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            Node::Text(_) => None,
        }
    }

    pub fn child_nodes(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    /// Depth-first search for the element with the given id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        match self {
            Node::Element(element) if element.id.as_deref() == Some(id) => Some(self),
            Node::Element(element) => element.children.iter().find_map(|child| child.find(id)),
            Node::Text(_) => None,
        }
    }

    /// Invoke every listener bound to `event` on this node.
    ///
    /// Returns whether any listener ran.
    pub fn fire(&self, event: DomEvent, data: EventData) -> bool {
        let Node::Element(element) = self else {
            return false;
        };
        let mut fired = false;
        for (bound, listener) in &element.listeners {
            if *bound == event {
                listener(data.clone());
                fired = true;
            }
        }
        fired
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element
                .children
                .iter()
                .map(Node::text_content)
                .collect(),
        }
    }

    /// Indented HTML-like rendering, listeners shown as `on-<event>`.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out, 0);
        out
    }

    fn write_markup(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Node::Text(text) => {
                let _ = writeln!(out, "{indent}{}", escape(text));
            }
            Node::Element(element) => {
                let _ = write!(out, "{indent}<{}", element.tag);
                if let Some(id) = &element.id {
                    let _ = write!(out, " id=\"{}\"", escape(id));
                }
                for (name, value) in &element.attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape(value));
                }
                for (event, _) in &element.listeners {
                    let _ = write!(out, " on-{}", event.name());
                }
                if element.children.is_empty() {
                    let _ = writeln!(out, " />");
                    return;
                }
                let _ = writeln!(out, ">");
                for child in &element.children {
                    child.write_markup(out, depth + 1);
                }
                let _ = writeln!(out, "{indent}</{}>", element.tag);
            }
        }
    }
}

/// Escapes `&`, `<` and `"` so text and attribute values stay inside their slot.
fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}
