//! Wire payload shapes, exactly as the API sends and expects them.
//!
//! Optional-with-skip fields implement the contract's inclusion rules:
//! creation payloads omit `id` and `seq_no` entirely rather than sending
//! null. Read-only fields the server adds on responses (`url`,
//! `created_dt`) are accepted on decode and never sent back.

use serde::{Deserialize, Serialize};

use crate::model::FieldType;

/// A form with its nested elements, as served by the form detail and
/// list endpoints and accepted by form create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default)]
    pub slug: String,

    /// Read-only on responses; never sent.
    #[serde(default, skip_serializing)]
    pub url: Option<String>,

    pub title: String,

    /// Nullable: an empty description travels as null.
    pub description: Option<String>,

    /// Read-only on responses; never sent.
    #[serde(default, skip_serializing)]
    pub created_dt: Option<String>,

    /// Required non-null; "no value" is the empty string.
    #[serde(default)]
    pub start_dt: String,

    /// Nullable: no end date travels as null.
    pub end_dt: Option<String>,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub form_elements: Vec<WireFormElement>,
}

/// The envelope around one polymorphic element.
///
/// `element` stays a raw JSON value until the discriminator has been
/// inspected; which concrete shape it holds is only knowable from
/// `element_type.model`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFormElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq_no: Option<i64>,

    pub element_type: WireElementType,

    pub element: serde_json::Value,
}

/// The wire discriminator: a dictionary rendering of a content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireElementType {
    /// Content type pk on responses; never sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub app_label: String,

    pub model: String,
}

/// Flattened payload for a rich-text block element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireHtmlComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub form: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq_no: Option<i64>,

    #[serde(default)]
    pub html: String,
}

/// Flattened payload for a question element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFormQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub form: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq_no: Option<i64>,

    pub field_type: FieldType,

    #[serde(default)]
    pub question: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Pipe-delimited labels, e.g. `"a|b|c"`. Nullable.
    #[serde(default)]
    pub choices: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_question: Option<i64>,
}
