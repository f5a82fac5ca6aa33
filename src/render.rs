//! The render pass: a deterministic, order-preserving walk of the classified
//! tree. Infallible — every anomaly was either resolved at classification
//! time or degrades to an inline `Unsupported` element.

use crate::node::{DiaryInput, Document, Field, FieldKind, JupyterSection, Node, Section, Subtree};
use crate::present::{NavContext, Presentation, PresentationElement, RenderedDocument, SectionCard};

/// Heading level of a top-level section card; nested sections go one deeper
/// per level.
pub const TOP_LEVEL_DEPTH: u8 = 3;

/// Fixed target of the `health` link action.
pub const HEALTH_ENDPOINT: &str = "/jupyter/health";

/// Render a diary input into a presentation tree.
///
/// The not-yet-loaded sentinel short-circuits to the loading placeholder.
/// `nav` is attached to the output unexamined.
pub fn render(input: &DiaryInput, nav: &NavContext) -> Presentation {
    match input {
        DiaryInput::Pending => Presentation::Loading,
        DiaryInput::Loaded(doc) => Presentation::Document(render_document(doc, nav)),
    }
}

fn render_document(doc: &Document, nav: &NavContext) -> RenderedDocument {
    let sections = doc.entries.iter().map(render_card).collect();
    RenderedDocument {
        nav: nav.clone(),
        sections,
    }
}

/// One top-level entry becomes one card: header text from the head label,
/// body dispatched at the fixed top-level depth.
fn render_card(entry: &Subtree) -> SectionCard {
    match entry {
        Subtree::Section(section) => {
            let mut body = Vec::new();
            render_children(&section.children, TOP_LEVEL_DEPTH, &mut body);
            SectionCard {
                id: section.head.id,
                title: section.head.label.clone(),
                body,
            }
        }
        Subtree::Jupyter(jupyter) => SectionCard {
            id: jupyter.head.id,
            title: jupyter.head.label.clone(),
            body: vec![jupyter_element(jupyter)],
        },
    }
}

/// Order-preserving dispatch over a section's children.
///
/// Nested sections get a separator first; shrimp children go straight to
/// their delegate with neither separator nor heading.
fn render_children(children: &[Node], depth: u8, out: &mut Vec<PresentationElement>) {
    for child in children {
        match child {
            Node::Subtree(Subtree::Section(section)) => {
                out.push(PresentationElement::Separator);
                render_section(section, depth + 1, out);
            }
            Node::Subtree(Subtree::Jupyter(jupyter)) => {
                out.push(PresentationElement::Separator);
                out.push(jupyter_element(jupyter));
            }
            Node::Shrimp(shrimp) => out.push(PresentationElement::Shrimp {
                id: shrimp.id,
                payload: shrimp.payload.clone(),
            }),
            Node::Field(field) => out.push(render_field(field)),
        }
    }
}

/// Heading at the section's own depth, then its children as siblings.
/// Nesting lives in the `level` value, not in the output structure.
fn render_section(section: &Section, depth: u8, out: &mut Vec<PresentationElement>) {
    out.push(PresentationElement::Heading {
        id: section.head.id,
        level: depth,
        text: section.head.label.clone(),
    });
    render_children(&section.children, depth, out);
}

fn jupyter_element(jupyter: &JupyterSection) -> PresentationElement {
    PresentationElement::JupyterActivity {
        id: jupyter.head.id,
        label: jupyter.head.label.clone(),
        payload: jupyter.payload.clone(),
    }
}

/// Pure field dispatch; fallbacks degrade to an inline diagnostic carrying a
/// structural dump of the offending record.
fn render_field(field: &Field) -> PresentationElement {
    match &field.kind {
        FieldKind::Value => PresentationElement::Summary {
            id: field.id,
            field: field.raw.clone(),
        },
        FieldKind::HealthLink { label } => PresentationElement::HealthLink {
            id: field.id,
            label: label.clone(),
            target: HEALTH_ENDPOINT.to_string(),
        },
        FieldKind::AllActivitiesLink => PresentationElement::AllActivities {
            id: field.id,
            field: field.raw.clone(),
        },
        FieldKind::UnsupportedLink => unsupported(field, "Unsupported link"),
        FieldKind::UnsupportedType => unsupported(field, "Unsupported type"),
    }
}

fn unsupported(field: &Field, what: &str) -> PresentationElement {
    let message = format!("{}: {}", what, field.raw);
    log::debug!("rendering fallback for field {}: {}", field.id, message);
    PresentationElement::Unsupported {
        id: field.id,
        message,
    }
}
