//! Wire representation of the form-creator API and the adapters between
//! it and the internal model.
//!
//! The payload shapes here are a fixed contract with the server: field
//! names are byte-for-byte, the polymorphic element travels flattened as
//! `{element, element_type}`, choice lists are a single pipe-delimited
//! string, and dates are ISO text. Everything serde-facing in the crate
//! lives in this module.

mod convert;
mod payload;

pub use convert::{
    form_detail_from_wire, form_detail_to_wire, form_element_from_wire, form_element_to_wire,
    form_from_wire, form_question_from_wire, form_question_to_wire, form_to_wire,
    html_component_from_wire, html_component_to_wire,
};
pub use payload::{
    WireElementType, WireForm, WireFormElement, WireFormQuestion, WireHtmlComponent,
};

/// Errors raised while translating between wire and internal shapes.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The wire discriminator named a model this build cannot decode.
    #[error(transparent)]
    UnknownElementType(#[from] crate::registry::UnknownElementType),

    /// An element was encoded without the id of its owning form.
    #[error("form is required")]
    MissingFormId,

    /// A choice label contains the `|` delimiter and cannot survive the
    /// joined wire encoding.
    #[error("choice contains the '|' delimiter: {0:?}")]
    ChoiceDelimiter(String),

    /// The flattened element payload did not match its declared shape.
    #[error("malformed element payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, AdapterError>;
