//! Element type registry: the closed set of element discriminators.
//!
//! The server identifies an element's concrete shape with an
//! `(app_label, model)` pair — a dictionary rendering of a content type.
//! This module owns the known pairs and the construction of blank
//! elements with type-correct defaults.

use crate::model::{Element, FormQuestion, HtmlComponent};

/// The namespace all form element types live under.
pub const APP_LABEL: &str = "form_creator";

/// An element type discriminator: the `(app_label, model)` pair.
///
/// Compared by value of both fields — two discriminators with equal
/// fields are the same type regardless of where they were constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementType {
    pub app_label: &'static str,
    pub model: &'static str,
}

/// Discriminator for a rich-text block.
pub const HTML_COMPONENT: ElementType = ElementType {
    app_label: APP_LABEL,
    model: "htmlcomponent",
};

/// Discriminator for a question.
pub const FORM_QUESTION: ElementType = ElementType {
    app_label: APP_LABEL,
    model: "formquestion",
};

/// A discriminator named a model the registry does not know.
///
/// This is a contract violation between client and server, not a user
/// error: the payload referenced a shape this build cannot decode.
#[derive(Debug, thiserror::Error)]
#[error("unknown element type: {0}")]
pub struct UnknownElementType(pub String);

/// The known element kinds, one per registered discriminator.
///
/// A `resolve` that succeeds yields a value every downstream match can
/// handle exhaustively; an unknown kind never travels past the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    HtmlComponent,
    FormQuestion,
}

impl ElementKind {
    /// Resolve a wire `model` name to a kind.
    ///
    /// Dispatch is on the model name alone; the `app_label` rides along
    /// in the discriminator but does not participate, matching the
    /// server's own routing.
    pub fn resolve(model: &str) -> Result<Self, UnknownElementType> {
        match model {
            "htmlcomponent" => Ok(Self::HtmlComponent),
            "formquestion" => Ok(Self::FormQuestion),
            other => Err(UnknownElementType(other.to_string())),
        }
    }

    /// The discriminator for this kind.
    pub const fn element_type(self) -> ElementType {
        match self {
            Self::HtmlComponent => HTML_COMPONENT,
            Self::FormQuestion => FORM_QUESTION,
        }
    }

    /// A new element of this kind with type-correct defaults, owned by
    /// the given form.
    ///
    /// No sequence number is assigned here; the engine allocates one when
    /// the element is added.
    pub fn blank(self, form: i64) -> Element {
        match self {
            Self::HtmlComponent => Element::HtmlComponent(HtmlComponent {
                form: Some(form),
                ..HtmlComponent::default()
            }),
            Self::FormQuestion => Element::FormQuestion(FormQuestion {
                form: Some(form),
                ..FormQuestion::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::FieldType;

    #[test]
    fn resolves_known_models() {
        assert_eq!(
            ElementKind::resolve("htmlcomponent").unwrap(),
            ElementKind::HtmlComponent
        );
        assert_eq!(
            ElementKind::resolve("formquestion").unwrap(),
            ElementKind::FormQuestion
        );
    }

    #[test]
    fn unknown_model_names_the_offender() {
        let err = ElementKind::resolve("surveypage").unwrap_err();
        assert_eq!(err.to_string(), "unknown element type: surveypage");
    }

    #[test]
    fn discriminators_compare_by_value() {
        let copy = ElementType {
            app_label: APP_LABEL,
            model: "htmlcomponent",
        };
        assert_eq!(copy, HTML_COMPONENT);
        assert_ne!(HTML_COMPONENT, FORM_QUESTION);
    }

    #[test]
    fn blank_html_component_defaults() {
        let Element::HtmlComponent(c) = ElementKind::HtmlComponent.blank(7) else {
            panic!("expected an HTML component");
        };
        assert_eq!(c.form, Some(7));
        assert_eq!(c.id, None);
        assert_eq!(c.seq_no, None);
        assert_eq!(c.html, "");
    }

    #[test]
    fn blank_question_defaults() {
        let Element::FormQuestion(q) = ElementKind::FormQuestion.blank(7) else {
            panic!("expected a form question");
        };
        assert_eq!(q.form, Some(7));
        assert_eq!(q.field_type, FieldType::Text);
        assert_eq!(q.question, "");
        assert_eq!(q.description, "");
        assert!(!q.required);
        assert!(q.choices.is_empty());
        assert_eq!(q.related_question, None);
    }
}
