//! Form elements: the polymorphic pieces a form is assembled from.

use serde::{Deserialize, Serialize};

use crate::registry::ElementKind;

/// The kind of input a question renders as.
///
/// A closed vocabulary shared with the server; the wire spelling is the
/// snake_case variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Email,
    Integer,
    Decimal,
    Float,
    Boolean,
    Date,
    Datetime,
    Time,
    Url,
    Choice,
    MultipleChoice,
}

impl FieldType {
    /// Whether this field type carries a choice list.
    pub fn has_choices(self) -> bool {
        matches!(self, Self::Choice | Self::MultipleChoice)
    }
}

/// An opaque block of rich text placed between questions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HtmlComponent {
    /// Server-assigned id; absent until first persisted.
    pub id: Option<i64>,

    /// Id of the owning form.
    pub form: Option<i64>,

    /// Position among the form's elements. Unique, not contiguous.
    pub seq_no: Option<i64>,

    /// The rich-text payload, as produced by the editor widget.
    pub html: String,
}

/// A single question on a form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormQuestion {
    /// Server-assigned id; absent until first persisted.
    pub id: Option<i64>,

    /// Id of the owning form.
    pub form: Option<i64>,

    /// Position among the form's elements. Unique, not contiguous.
    pub seq_no: Option<i64>,

    pub field_type: FieldType,
    pub question: String,
    pub description: String,
    pub required: bool,

    /// Choice labels, in display order. Meaningful only for choice and
    /// multiple-choice field types; empty otherwise.
    pub choices: Vec<String>,

    /// Id of another question this one is conditioned on.
    pub related_question: Option<i64>,
}

/// One element of a form: either a rich-text block or a question.
///
/// Exhaustive matching at every boundary means adding a third variant is
/// a compile-time-checked change.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    HtmlComponent(HtmlComponent),
    FormQuestion(FormQuestion),
}

impl Element {
    /// The server-assigned id, if the element has been persisted.
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::HtmlComponent(c) => c.id,
            Self::FormQuestion(q) => q.id,
        }
    }

    /// The id of the owning form.
    pub fn form(&self) -> Option<i64> {
        match self {
            Self::HtmlComponent(c) => c.form,
            Self::FormQuestion(q) => q.form,
        }
    }

    /// The element's sequence number, if assigned.
    pub fn seq_no(&self) -> Option<i64> {
        match self {
            Self::HtmlComponent(c) => c.seq_no,
            Self::FormQuestion(q) => q.seq_no,
        }
    }

    /// Assigns the element's sequence number.
    pub fn set_seq_no(&mut self, seq_no: i64) {
        match self {
            Self::HtmlComponent(c) => c.seq_no = Some(seq_no),
            Self::FormQuestion(q) => q.seq_no = Some(seq_no),
        }
    }

    /// Which registry kind this element is.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::HtmlComponent(_) => ElementKind::HtmlComponent,
            Self::FormQuestion(_) => ElementKind::FormQuestion,
        }
    }
}
