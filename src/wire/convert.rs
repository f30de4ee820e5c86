//! Conversions between wire payloads and the internal model.
//!
//! Each entity has an inverse-intended pair: `*_from_wire` for data as it
//! arrives from the API, `*_to_wire` for data on its way out. Encoding an
//! element requires the id of its owning form and fails before any
//! request could be built if it is missing.

use crate::model::{
    DateValue, Element, Form, FormDetail, FormElement, FormQuestion, HtmlComponent,
};
use crate::registry::{ElementKind, ElementType};

use super::payload::{
    WireElementType, WireForm, WireFormElement, WireFormQuestion, WireHtmlComponent,
};
use super::{AdapterError, Result};

/// A zero id means not-yet-assigned on this API; normalize to absent.
fn nonzero(value: Option<i64>) -> Option<i64> {
    value.filter(|&v| v != 0)
}

/// Decode a date-like wire field. Null and the empty string both mean
/// "no value"; anything else is kept as text until the engine parses it.
fn date_from_wire(value: Option<String>) -> DateValue {
    match value {
        None => DateValue::Empty,
        Some(s) if s.is_empty() => DateValue::Empty,
        Some(s) => DateValue::Text(s),
    }
}

fn choices_from_wire(choices: Option<&str>) -> Vec<String> {
    match choices {
        None | Some("") => Vec::new(),
        Some(s) => s.split('|').map(str::to_string).collect(),
    }
}

fn choices_to_wire(choices: &[String]) -> Result<String> {
    for choice in choices {
        if choice.contains('|') {
            return Err(AdapterError::ChoiceDelimiter(choice.clone()));
        }
    }
    Ok(choices.join("|"))
}

fn element_type_to_wire(element_type: ElementType) -> WireElementType {
    WireElementType {
        id: None,
        app_label: element_type.app_label.to_string(),
        model: element_type.model.to_string(),
    }
}

// ── Form ──

/// Decode form metadata, leaving the nested elements to the caller.
pub fn form_from_wire(wire: &WireForm) -> Form {
    Form {
        id: nonzero(wire.id),
        slug: wire.slug.clone(),
        title: wire.title.clone(),
        description: wire.description.clone().unwrap_or_default(),
        start_dt: date_from_wire(Some(wire.start_dt.clone())),
        end_dt: date_from_wire(wire.end_dt.clone()),
        status: wire.status.clone(),
    }
}

/// Encode form metadata with empty elements.
///
/// `id` is included only once the server has assigned one, so creation
/// payloads omit the key entirely. An empty description or end date is
/// nulled (both are nullable); an empty start date is sent as the empty
/// string (the field itself is non-null).
pub fn form_to_wire(form: &Form) -> WireForm {
    WireForm {
        id: form.id,
        slug: form.slug.clone(),
        url: None,
        title: form.title.clone(),
        description: if form.description.is_empty() {
            None
        } else {
            Some(form.description.clone())
        },
        created_dt: None,
        start_dt: form.start_dt.to_wire_text().unwrap_or_default(),
        end_dt: form.end_dt.to_wire_text(),
        status: form.status.clone(),
        form_elements: Vec::new(),
    }
}

// ── Elements ──

pub fn html_component_from_wire(wire: WireHtmlComponent) -> HtmlComponent {
    HtmlComponent {
        id: nonzero(wire.id),
        form: Some(wire.form),
        seq_no: nonzero(wire.seq_no),
        html: wire.html,
    }
}

pub fn html_component_to_wire(component: &HtmlComponent) -> Result<WireHtmlComponent> {
    let form = component.form.ok_or(AdapterError::MissingFormId)?;
    Ok(WireHtmlComponent {
        id: component.id,
        form,
        seq_no: component.seq_no,
        html: component.html.clone(),
    })
}

pub fn form_question_from_wire(wire: WireFormQuestion) -> FormQuestion {
    FormQuestion {
        id: nonzero(wire.id),
        form: Some(wire.form),
        seq_no: nonzero(wire.seq_no),
        field_type: wire.field_type,
        question: wire.question,
        description: wire.description.unwrap_or_default(),
        required: wire.required,
        choices: choices_from_wire(wire.choices.as_deref()),
        related_question: wire.related_question,
    }
}

pub fn form_question_to_wire(question: &FormQuestion) -> Result<WireFormQuestion> {
    let form = question.form.ok_or(AdapterError::MissingFormId)?;
    Ok(WireFormQuestion {
        id: question.id,
        form,
        seq_no: question.seq_no,
        field_type: question.field_type,
        question: question.question.clone(),
        description: Some(question.description.clone()),
        required: question.required,
        choices: Some(choices_to_wire(&question.choices)?),
        related_question: question.related_question,
    })
}

// ── Envelope ──

/// Decode one element envelope.
///
/// The wire discriminator's `model` field decides which variant decoder
/// runs; an unrecognized model fails with an unknown-element-type error
/// naming it. The envelope's own `id`/`form`/`seq_no` duplicate the inner
/// element's and are not read.
pub fn form_element_from_wire(wire: WireFormElement) -> Result<FormElement> {
    let kind = ElementKind::resolve(&wire.element_type.model)?;

    let element = match kind {
        ElementKind::HtmlComponent => {
            let inner: WireHtmlComponent = serde_json::from_value(wire.element)?;
            Element::HtmlComponent(html_component_from_wire(inner))
        }
        ElementKind::FormQuestion => {
            let inner: WireFormQuestion = serde_json::from_value(wire.element)?;
            Element::FormQuestion(form_question_from_wire(inner))
        }
    };

    Ok(FormElement {
        element,
        element_type: kind.element_type(),
    })
}

/// Encode one element envelope, lifting `id`/`form`/`seq_no` from the
/// inner element onto the envelope as the API expects.
pub fn form_element_to_wire(envelope: &FormElement) -> Result<WireFormElement> {
    let (element, id, form, seq_no) = match &envelope.element {
        Element::HtmlComponent(component) => {
            let inner = html_component_to_wire(component)?;
            let (id, form, seq_no) = (inner.id, inner.form, inner.seq_no);
            (serde_json::to_value(inner)?, id, form, seq_no)
        }
        Element::FormQuestion(question) => {
            let inner = form_question_to_wire(question)?;
            let (id, form, seq_no) = (inner.id, inner.form, inner.seq_no);
            (serde_json::to_value(inner)?, id, form, seq_no)
        }
    };

    Ok(WireFormElement {
        id,
        form: Some(form),
        seq_no,
        element_type: element_type_to_wire(envelope.element_type),
        element,
    })
}

// ── Aggregate ──

pub fn form_detail_from_wire(wire: WireForm) -> Result<FormDetail> {
    let form = form_from_wire(&wire);
    let form_elements = wire
        .form_elements
        .into_iter()
        .map(form_element_from_wire)
        .collect::<Result<Vec<_>>>()?;
    Ok(FormDetail {
        form,
        form_elements,
    })
}

pub fn form_detail_to_wire(detail: &FormDetail) -> Result<WireForm> {
    let mut wire = form_to_wire(&detail.form);
    wire.form_elements = detail
        .form_elements
        .iter()
        .map(form_element_to_wire)
        .collect::<Result<Vec<_>>>()?;
    Ok(wire)
}
