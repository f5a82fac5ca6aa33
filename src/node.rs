use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier stamped on every record node by the id pass.
pub type NodeId = u64;

/// Head node: the first element of every subtree sequence.
///
/// `tag` selects rendering behavior for the siblings that follow it;
/// `label` is the human-readable section title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Head {
    pub tag: String,
    pub label: String,
    pub id: NodeId,
}

/// Leaf field with its dispatch decision already resolved.
///
/// `raw` keeps the original record for delegate payloads and for the
/// structural dump in fallback diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: NodeId,
    pub kind: FieldKind,
    pub raw: Value,
}

/// Resolved `(type, tag)` dispatch table for leaf fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// `type: "value"` — delegated to the summary-field renderer.
    Value,
    /// `type: "link", tag: "health"` — action control to the health endpoint.
    HealthLink { label: String },
    /// `type: "link", tag: "all-activities"` — delegated renderer.
    AllActivitiesLink,
    /// `type: "link"` with an unrecognized tag.
    UnsupportedLink,
    /// Unrecognized or missing `type`.
    UnsupportedType,
}

/// Generic section: a head followed by classified children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub head: Head,
    pub children: Vec<Node>,
}

/// `jupyter-activity` section: the rest of the sequence is an opaque
/// activity payload, never inspected by the generic dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JupyterSection {
    pub head: Head,
    pub payload: Vec<Value>,
}

/// A subtree found under a parent tagged `shrimp`: rendered by the
/// flattened shrimp-field layout instead of the generic section path.
/// `payload` is the whole raw subtree sequence; `id` is its head's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShrimpSection {
    pub id: NodeId,
    pub payload: Value,
}

/// A nested subtree, split by head tag at classification time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Subtree {
    Section(Section),
    Jupyter(JupyterSection),
}

impl Subtree {
    /// The head shared by both subtree forms.
    pub fn head(&self) -> &Head {
        match self {
            Subtree::Section(s) => &s.head,
            Subtree::Jupyter(j) => &j.head,
        }
    }
}

/// One classified element of a section's rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Subtree(Subtree),
    Shrimp(ShrimpSection),
    Field(Field),
}

/// A classified diary document.
///
/// `date_label` is element 0 of the raw sequence, kept verbatim but never
/// rendered; `entries` are the top-level subtrees from index 1 onward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub date_label: Value,
    pub entries: Vec<Subtree>,
}

/// Renderer input: either the not-yet-loaded sentinel or a classified
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiaryInput {
    Pending,
    Loaded(Document),
}

impl DiaryInput {
    pub fn is_pending(&self) -> bool {
        matches!(self, DiaryInput::Pending)
    }

    /// Returns the classified document if loaded.
    pub fn document(&self) -> Option<&Document> {
        match self {
            DiaryInput::Pending => None,
            DiaryInput::Loaded(doc) => Some(doc),
        }
    }
}
