//! The aggregate a session edits: one form plus its ordered elements.

use crate::registry::ElementType;

use super::element::Element;
use super::form::Form;

/// An element paired with its type discriminator.
///
/// The discriminator must always agree with the element variant; build
/// envelopes through [`FormElement::new`] so the pairing cannot drift.
#[derive(Debug, Clone, PartialEq)]
pub struct FormElement {
    pub element: Element,
    pub element_type: ElementType,
}

impl FormElement {
    /// Wraps an element with the discriminator derived from its variant.
    pub fn new(element: Element) -> Self {
        let element_type = element.kind().element_type();
        Self {
            element,
            element_type,
        }
    }
}

/// A form together with its elements, ordered by ascending sequence number.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormDetail {
    pub form: Form,
    pub form_elements: Vec<FormElement>,
}
