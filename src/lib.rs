//! # Trainlog diary renderer
//!
//! Renders the nested, tagged diary tree served by the trainlog backend into
//! a hierarchical presentation tree.
//!
//! ## Pipeline
//! - Id pass: stamp a deterministic identifier on every record node
//! - Classification: resolve the untyped tree into an explicit node model
//!   (sections, shrimp/jupyter delegates, typed leaf fields)
//! - Render: infallible walk producing section cards, flattened headings
//!   with explicit depth, delegate payloads, and inline fallbacks
//!
//! ## Example
//! ```
//! use serde_json::json;
//! use trainlog_diary::{render, DiaryInput, NavContext, Presentation};
//!
//! let raw = json!([
//!     "2020-06-01",
//!     [
//!         { "tag": "diary", "value": "Diary" },
//!         { "type": "value", "value": "Rest day" }
//!     ]
//! ]);
//!
//! let doc = trainlog_diary::prepare(&raw).expect("well-formed diary tree");
//! let out = render(&DiaryInput::Loaded(doc), &NavContext::default());
//! assert!(matches!(out, Presentation::Document(_)));
//! ```

pub mod classify;
pub mod error;
pub mod ids;
pub mod node;
pub mod present;
pub mod render;

// --- Core types ---
pub use error::{DiaryError, DiaryResult};
pub use node::{
    DiaryInput, Document, Field, FieldKind, Head, JupyterSection, Node, NodeId, Section,
    ShrimpSection, Subtree,
};
pub use present::{
    NavContext, Presentation, PresentationElement, RenderedDocument, SectionCard,
};
pub use render::{render, HEALTH_ENDPOINT, TOP_LEVEL_DEPTH};

use serde_json::Value;

/// Run the id pass and classify the raw tree in one step.
pub fn prepare(raw: &Value) -> DiaryResult<Document> {
    classify::classify_document(&ids::assign_ids(raw))
}

/// Prepare and render a raw tree with one call.
pub fn render_raw(raw: &Value, nav: &NavContext) -> DiaryResult<Presentation> {
    Ok(render(&DiaryInput::Loaded(prepare(raw)?), nav))
}
