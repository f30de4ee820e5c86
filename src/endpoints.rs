//! API endpoint construction.
//!
//! Endpoints that operate on a single object carry their pk in the
//! variant, so a detail URL cannot be requested without one.

use crate::registry::ElementKind;

/// A resolvable API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The API root itself.
    ApiRoot,

    /// Form collection: list and create.
    FormList,

    /// A single form.
    FormDetail { pk: i64 },

    /// Form element collection: list and create.
    FormElementList,

    /// A single form element envelope.
    FormElementDetail { pk: i64 },

    /// A single HTML component, addressed directly.
    HtmlComponent { pk: i64 },

    /// A single form question, addressed directly.
    FormQuestion { pk: i64 },
}

impl Endpoint {
    /// The detail endpoint for one element of the given kind.
    pub fn element_detail(kind: ElementKind, pk: i64) -> Self {
        match kind {
            ElementKind::HtmlComponent => Self::HtmlComponent { pk },
            ElementKind::FormQuestion => Self::FormQuestion { pk },
        }
    }

    /// The full URL under the given site root.
    pub fn url(&self, root: &str) -> String {
        let mut url = String::from(root);
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str("form-creator/api/");

        match self {
            Self::ApiRoot => {}
            Self::FormList => url.push_str("forms/"),
            Self::FormDetail { pk } => url.push_str(&format!("forms/{pk}/")),
            Self::FormElementList => url.push_str("form-elements/"),
            Self::FormElementDetail { pk } => url.push_str(&format!("form-elements/{pk}/")),
            Self::HtmlComponent { pk } => url.push_str(&format!("html-components/{pk}/")),
            Self::FormQuestion { pk } => url.push_str(&format!("form-questions/{pk}/")),
        }

        url
    }
}
