//! Form metadata: the fields a user fills in before adding elements.

use jiff::Timestamp;

/// A date-like field on a form.
///
/// Three states are distinguishable, and all three matter on the wire:
/// no value at all, text that has not (or could not) be parsed, and a
/// concrete timestamp. Text arrives from the API as an ISO string and is
/// parsed when a full form detail is loaded into the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DateValue {
    /// No value set.
    #[default]
    Empty,

    /// Unparsed text, as received or as typed.
    Text(String),

    /// A concrete point in time.
    Timestamp(Timestamp),
}

impl DateValue {
    /// Parse a text value into a concrete timestamp.
    ///
    /// Empty stays empty and an already-parsed value is returned as-is.
    /// Text that does not parse as an RFC 3339 timestamp is kept as text
    /// rather than discarded.
    pub fn parsed(self) -> Self {
        match self {
            Self::Text(s) => match s.parse::<Timestamp>() {
                Ok(ts) => Self::Timestamp(ts),
                Err(_) => Self::Text(s),
            },
            other => other,
        }
    }

    /// Whether no value is set.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The value as wire text: `None` when empty.
    pub fn to_wire_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(s) => Some(s.clone()),
            Self::Timestamp(ts) => Some(ts.to_string()),
        }
    }
}

/// The configuration for a form.
///
/// `id` is absent until the server has persisted the form; once assigned
/// it never changes for the rest of the session. `slug` is server-derived
/// and carried through untouched. `status` is owned by the server's
/// vocabulary (draft/active/inactive at the time of writing) and is
/// round-tripped as free text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Form {
    pub id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub start_dt: DateValue,
    pub end_dt: DateValue,
    pub status: String,
}

impl Form {
    /// Returns a copy of this form with the patch's set fields applied.
    ///
    /// A shallow merge: fields the patch leaves as `None` are untouched.
    pub fn updated(&self, patch: &FormPatch) -> Self {
        let mut form = self.clone();
        if let Some(title) = &patch.title {
            form.title = title.clone();
        }
        if let Some(slug) = &patch.slug {
            form.slug = slug.clone();
        }
        if let Some(description) = &patch.description {
            form.description = description.clone();
        }
        if let Some(start_dt) = &patch.start_dt {
            form.start_dt = start_dt.clone();
        }
        if let Some(end_dt) = &patch.end_dt {
            form.end_dt = end_dt.clone();
        }
        if let Some(status) = &patch.status {
            form.status = status.clone();
        }
        form
    }
}

/// A partial update to a form's fields.
///
/// Each set field replaces the corresponding form field wholesale;
/// unset fields leave the form untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub start_dt: Option<DateValue>,
    pub end_dt: Option<DateValue>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_applies_only_set_fields() {
        let form = Form {
            title: "Survey".into(),
            status: "draft".into(),
            ..Form::default()
        };

        let patch = FormPatch {
            title: Some("Renamed".into()),
            ..FormPatch::default()
        };

        let updated = form.updated(&patch);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.status, "draft");
    }

    #[test]
    fn parse_keeps_empty_empty() {
        assert_eq!(DateValue::Empty.parsed(), DateValue::Empty);
    }

    #[test]
    fn parse_converts_valid_text() {
        let parsed = DateValue::Text("2024-03-01T09:00:00Z".into()).parsed();
        assert!(matches!(parsed, DateValue::Timestamp(_)));
    }

    #[test]
    fn parse_keeps_invalid_text() {
        let parsed = DateValue::Text("not a date".into()).parsed();
        assert_eq!(parsed, DateValue::Text("not a date".into()));
    }
}
