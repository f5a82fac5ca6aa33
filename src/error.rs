use thiserror::Error;

pub type DiaryResult<T> = Result<T, DiaryError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiaryError {
    #[error("Document must be a sequence of sections, got {found}")]
    NotASequence { found: String },

    #[error("Empty document: expected at least the date label element")]
    EmptyDocument,

    #[error("Empty subtree: a section must begin with a head node")]
    EmptySubtree,

    #[error("Malformed head node: {reason}")]
    MalformedHead { reason: String },

    #[error("Node is missing its identifier; the id pass must run before classification")]
    MissingId,

    #[error("Unclassifiable element: expected a section sequence or a field record, got {found}")]
    UnexpectedShape { found: String },
}
