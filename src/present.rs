use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::NodeId;

/// Opaque navigation context, passed through to the rendered document for
/// downstream link/navigation consumers. Never interpreted by this crate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NavContext(pub Value);

/// The result of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Presentation {
    /// Input was the not-yet-loaded sentinel: show the loading placeholder.
    Loading,
    Document(RenderedDocument),
}

impl Presentation {
    pub fn is_loading(&self) -> bool {
        matches!(self, Presentation::Loading)
    }

    /// Returns the rendered document, if input was loaded.
    pub fn document(&self) -> Option<&RenderedDocument> {
        match self {
            Presentation::Loading => None,
            Presentation::Document(doc) => Some(doc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub nav: NavContext,
    pub sections: Vec<SectionCard>,
}

/// One top-level presentation container: header text plus a flat body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCard {
    pub id: NodeId,
    pub title: String,
    pub body: Vec<PresentationElement>,
}

/// A flattened presentation element.
///
/// Nested sections do not nest here: a section contributes a `Heading`
/// followed by its children as siblings, with nesting tracked by the
/// heading's `level`. Delegate variants carry the payload shape their
/// external renderer accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PresentationElement {
    Heading {
        id: NodeId,
        level: u8,
        text: String,
    },
    /// Visual break emitted before each nested section.
    Separator,
    /// Summary-field delegate: the raw field record.
    Summary { id: NodeId, field: Value },
    /// Action control targeting the fixed health endpoint.
    HealthLink {
        id: NodeId,
        label: String,
        target: String,
    },
    /// All-activities delegate: the raw field record.
    AllActivities { id: NodeId, field: Value },
    /// Shrimp-field delegate: the whole raw subtree sequence.
    Shrimp { id: NodeId, payload: Value },
    /// Jupyter-activity delegate: the section's rest, untouched.
    JupyterActivity {
        id: NodeId,
        label: String,
        payload: Vec<Value>,
    },
    /// Inline diagnostic for an unrecognized node; siblings are unaffected.
    Unsupported { id: NodeId, message: String },
}
