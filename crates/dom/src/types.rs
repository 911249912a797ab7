pub type NodeId = u32;

/// Stable node identity within one `Document`. Ids are allocated
/// monotonically and never reused, so an `Id` held across mutations either
/// still names the same node or names nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

#[derive(Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Document {
        doctype: Option<String>,
    },
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl NodeData {
    pub fn is_text(&self) -> bool {
        matches!(self, NodeData::Text { .. })
    }

    pub fn is_element(&self) -> bool {
        matches!(self, NodeData::Element { .. })
    }

    /// Lowercased element name, `None` for non-elements.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            NodeData::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Whether an attribute named `key` is present, valueless or not.
    pub fn has_attr(&self, key: &str) -> bool {
        match self {
            NodeData::Element { attributes, .. } => {
                attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(key))
            }
            _ => false,
        }
    }

    /// First attribute value matching `key` (ASCII case-insensitive).
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }
}
