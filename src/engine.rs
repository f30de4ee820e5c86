//! The form state engine: one state value, pure transitions.
//!
//! Every transition is `(state, action) -> state` with no observable side
//! effects — the input state is never mutated, and the surrounding
//! coordinator applies transitions one at a time. Responses from the API
//! re-enter the engine as ordinary actions (`ReplaceFormDetail` after a
//! load, `UpdateElement` after a save), so a late response simply
//! overwrites whatever it targets: last write wins, with no staleness
//! check.
//!
//! Lookups by an id that is not present are absorbed silently — the
//! original state is returned unchanged, with no error. A delete of an
//! already-deleted element therefore "succeeds" with no signal; callers
//! that care must check beforehand.

use crate::model::{FormDetail, FormElement, FormPatch, HttpMethod};
use crate::registry::ElementKind;

/// Gap between allocated sequence numbers.
///
/// Allocating in strides leaves room to slot an element between two
/// existing ones later without renumbering the rest.
pub const SEQ_NO_STRIDE: i64 = 10;

/// Which editor screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Editing the form's own fields: title, dates, status.
    #[default]
    FormDetails,

    /// Assembling the form's elements.
    FormElements,
}

/// Bookkeeping the engine tracks alongside the form data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Meta {
    /// The highest sequence number seen so far; new elements are
    /// allocated above it.
    pub max_seq_no: i64,
}

/// The complete editor state.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    pub screen: Screen,

    /// Verb for the next form-level submission: `Post` until the server
    /// has assigned the form an id, `Put` afterwards.
    pub http_method: HttpMethod,

    pub detail: FormDetail,

    pub meta: Meta,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            screen: Screen::default(),
            http_method: HttpMethod::Post,
            detail: FormDetail::default(),
            meta: Meta::default(),
        }
    }
}

/// One transition request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the verb used for the next form-level submission.
    UpdateHttpMethod(HttpMethod),

    /// Shallow-merge the patch into the form's fields.
    UpdateFormFields(FormPatch),

    /// Append an element, allocating a sequence number if it has none.
    AddElement(FormElement),

    /// Construct a blank element of the given kind and append it.
    AddBlankElement { kind: ElementKind, form: i64 },

    /// Replace the element with this id wholesale. No-op if absent.
    UpdateElement { id: i64, element: FormElement },

    /// Remove the element with this id. No-op if absent.
    DeleteElement { id: i64 },

    /// Wholesale replace of the form and its elements, used after a full
    /// load from the API.
    ReplaceFormDetail(FormDetail),

    /// Switch the active screen.
    SetScreen(Screen),
}

/// Apply one action to the state, returning the successor state.
pub fn reduce(state: &EngineState, action: Action) -> EngineState {
    match action {
        Action::UpdateHttpMethod(method) => update_http_method(state, method),
        Action::UpdateFormFields(patch) => update_form_fields(state, &patch),
        Action::AddElement(element) => add_element(state, element),
        Action::AddBlankElement { kind, form } => add_blank_element(state, kind, form),
        Action::UpdateElement { id, element } => update_element(state, id, element),
        Action::DeleteElement { id } => delete_element(state, id),
        Action::ReplaceFormDetail(detail) => replace_form_detail(state, detail),
        Action::SetScreen(screen) => set_screen(state, screen),
    }
}

fn update_http_method(state: &EngineState, method: HttpMethod) -> EngineState {
    EngineState {
        http_method: method,
        ..state.clone()
    }
}

fn update_form_fields(state: &EngineState, patch: &FormPatch) -> EngineState {
    let mut next = state.clone();
    next.detail.form = state.detail.form.updated(patch);
    next
}

/// Append an element to the list.
///
/// An element arriving without a sequence number is allocated the next
/// stride above the current maximum; one arriving with a number keeps it,
/// and the maximum is raised to cover it.
fn add_element(state: &EngineState, mut envelope: FormElement) -> EngineState {
    if envelope.element.seq_no().is_none() {
        envelope
            .element
            .set_seq_no(state.meta.max_seq_no + SEQ_NO_STRIDE);
    }

    let max_seq_no = state
        .meta
        .max_seq_no
        .max(envelope.element.seq_no().unwrap_or(0));

    let mut next = state.clone();
    next.detail.form_elements.push(envelope);
    next.meta.max_seq_no = max_seq_no;
    next
}

fn add_blank_element(state: &EngineState, kind: ElementKind, form: i64) -> EngineState {
    let mut element = kind.blank(form);
    element.set_seq_no(state.meta.max_seq_no + SEQ_NO_STRIDE);
    add_element(state, FormElement::new(element))
}

fn update_element(state: &EngineState, id: i64, envelope: FormElement) -> EngineState {
    let Some(index) = position_of(state, id) else {
        return state.clone();
    };

    let mut next = state.clone();
    next.detail.form_elements[index] = envelope;
    next
}

fn delete_element(state: &EngineState, id: i64) -> EngineState {
    let Some(index) = position_of(state, id) else {
        return state.clone();
    };

    let mut next = state.clone();
    next.detail.form_elements.remove(index);
    next
}

/// Hydrate the state from a freshly loaded form detail.
///
/// Date text on the form is parsed into concrete timestamps (empty stays
/// empty), elements are sorted by ascending sequence number — the one
/// place ordering is established; appends afterwards always land at the
/// top — and the maximum sequence number is recomputed so subsequent
/// allocations continue above the loaded elements.
fn replace_form_detail(state: &EngineState, detail: FormDetail) -> EngineState {
    let mut detail = detail;
    detail.form.start_dt = detail.form.start_dt.parsed();
    detail.form.end_dt = detail.form.end_dt.parsed();
    detail
        .form_elements
        .sort_by_key(|envelope| envelope.element.seq_no().unwrap_or(0));

    let max_seq_no = detail
        .form_elements
        .iter()
        .filter_map(|envelope| envelope.element.seq_no())
        .max()
        .unwrap_or(0);

    let mut next = state.clone();
    next.detail = detail;
    next.meta.max_seq_no = max_seq_no;
    next
}

fn set_screen(state: &EngineState, screen: Screen) -> EngineState {
    EngineState {
        screen,
        ..state.clone()
    }
}

fn position_of(state: &EngineState, id: i64) -> Option<usize> {
    state
        .detail
        .form_elements
        .iter()
        .position(|envelope| envelope.element.id() == Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{
        DateValue, Element, FieldType, Form, FormQuestion, HtmlComponent,
    };

    fn html_envelope(id: Option<i64>, seq_no: Option<i64>) -> FormElement {
        FormElement::new(Element::HtmlComponent(HtmlComponent {
            id,
            form: Some(1),
            seq_no,
            html: "<p>block</p>".into(),
        }))
    }

    fn question_envelope(id: Option<i64>, seq_no: Option<i64>) -> FormElement {
        FormElement::new(Element::FormQuestion(FormQuestion {
            id,
            form: Some(1),
            seq_no,
            question: "Why?".into(),
            ..FormQuestion::default()
        }))
    }

    /// State with one persisted HTML element and a raised max.
    fn state_with_one_element() -> EngineState {
        let mut state = EngineState::default();
        state.detail.form_elements.push(html_envelope(Some(1), Some(1)));
        state.meta.max_seq_no = 10;
        state
    }

    #[test]
    fn update_form_fields_merges_shallowly() {
        let mut state = EngineState::default();
        state.meta.max_seq_no = 10;

        let patch = FormPatch {
            title: Some("test".into()),
            start_dt: Some(DateValue::Text("2020-01-01".into())),
            end_dt: Some(DateValue::Text("2020-01-02".into())),
            status: Some("draft".into()),
            ..FormPatch::default()
        };

        let next = reduce(&state, Action::UpdateFormFields(patch));
        assert_eq!(next.detail.form.title, "test");
        assert_eq!(next.detail.form.start_dt, DateValue::Text("2020-01-01".into()));
        assert_eq!(next.detail.form.end_dt, DateValue::Text("2020-01-02".into()));
        assert_eq!(next.detail.form.status, "draft");
        // Untouched by the patch.
        assert_eq!(next.detail.form.description, "");
        assert_eq!(next.meta.max_seq_no, 10);
    }

    #[test]
    fn transitions_do_not_mutate_the_input() {
        let state = state_with_one_element();
        let snapshot = state.clone();

        let _ = reduce(&state, Action::UpdateFormFields(FormPatch {
            title: Some("changed".into()),
            ..FormPatch::default()
        }));
        let _ = reduce(&state, Action::AddElement(question_envelope(None, None)));
        let _ = reduce(&state, Action::DeleteElement { id: 1 });

        assert_eq!(state, snapshot);
    }

    #[test]
    fn add_element_allocates_next_stride() {
        let state = state_with_one_element();

        let next = reduce(&state, Action::AddElement(question_envelope(None, None)));
        assert_eq!(next.detail.form_elements.len(), 2);
        assert_eq!(next.detail.form_elements[1].element.seq_no(), Some(20));
        assert_eq!(next.meta.max_seq_no, 20);
    }

    #[test]
    fn add_element_keeps_an_existing_seq_no() {
        let state = state_with_one_element();

        let next = reduce(&state, Action::AddElement(question_envelope(None, Some(5))));
        assert_eq!(next.detail.form_elements[1].element.seq_no(), Some(5));
        // Max is unchanged: 5 does not exceed it.
        assert_eq!(next.meta.max_seq_no, 10);

        let next = reduce(&next, Action::AddElement(question_envelope(None, Some(50))));
        assert_eq!(next.meta.max_seq_no, 50);
    }

    #[test]
    fn blank_allocation_is_strictly_increasing() {
        let mut state = EngineState::default();
        state.meta.max_seq_no = 30;

        for round in 1..=4 {
            state = reduce(
                &state,
                Action::AddBlankElement {
                    kind: ElementKind::FormQuestion,
                    form: 1,
                },
            );
            assert_eq!(state.meta.max_seq_no, 30 + 10 * round);
        }

        let seq_nos: Vec<i64> = state
            .detail
            .form_elements
            .iter()
            .filter_map(|e| e.element.seq_no())
            .collect();
        assert_eq!(seq_nos, vec![40, 50, 60, 70]);
    }

    #[test]
    fn add_blank_element_uses_registry_defaults() {
        let state = EngineState::default();

        let next = reduce(
            &state,
            Action::AddBlankElement {
                kind: ElementKind::HtmlComponent,
                form: 7,
            },
        );

        let Element::HtmlComponent(c) = &next.detail.form_elements[0].element else {
            panic!("expected an HTML component");
        };
        assert_eq!(c.form, Some(7));
        assert_eq!(c.html, "");
        assert_eq!(c.seq_no, Some(10));
    }

    #[test]
    fn update_element_replaces_wholesale() {
        let mut state = state_with_one_element();
        state.detail.form_elements.push(question_envelope(Some(2), Some(20)));

        let replacement = question_envelope(Some(1), Some(1));
        let next = reduce(
            &state,
            Action::UpdateElement {
                id: 1,
                element: replacement.clone(),
            },
        );

        assert_eq!(next.detail.form_elements.len(), 2);
        assert_eq!(next.detail.form_elements[0], replacement);
        assert_eq!(next.detail.form_elements[1], state.detail.form_elements[1]);
    }

    #[test]
    fn update_of_missing_id_is_a_silent_no_op() {
        let state = state_with_one_element();
        let next = reduce(
            &state,
            Action::UpdateElement {
                id: 99,
                element: question_envelope(Some(99), None),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn delete_element_preserves_the_rest() {
        let mut state = state_with_one_element();
        state.detail.form_elements.push(question_envelope(Some(2), Some(20)));

        let next = reduce(&state, Action::DeleteElement { id: 1 });
        assert_eq!(next.detail.form_elements.len(), 1);
        assert_eq!(next.detail.form_elements[0].element.id(), Some(2));
    }

    #[test]
    fn delete_of_missing_id_is_a_silent_no_op() {
        let state = state_with_one_element();
        let next = reduce(&state, Action::DeleteElement { id: 99 });
        assert_eq!(next, state);
    }

    #[test]
    fn replace_form_detail_parses_dates_and_sorts() {
        let state = EngineState::default();

        let detail = FormDetail {
            form: Form {
                id: Some(1),
                title: "Loaded".into(),
                start_dt: DateValue::Text("2024-03-01T09:00:00Z".into()),
                end_dt: DateValue::Empty,
                ..Form::default()
            },
            form_elements: vec![
                question_envelope(Some(2), Some(30)),
                html_envelope(Some(1), Some(10)),
            ],
        };

        let next = reduce(&state, Action::ReplaceFormDetail(detail));

        assert!(matches!(next.detail.form.start_dt, DateValue::Timestamp(_)));
        assert_eq!(next.detail.form.end_dt, DateValue::Empty);

        let ids: Vec<Option<i64>> = next
            .detail
            .form_elements
            .iter()
            .map(|e| e.element.id())
            .collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
        assert_eq!(next.meta.max_seq_no, 30);
    }

    #[test]
    fn allocation_continues_above_loaded_elements() {
        let state = EngineState::default();
        let detail = FormDetail {
            form: Form::default(),
            form_elements: vec![html_envelope(Some(1), Some(40))],
        };

        let hydrated = reduce(&state, Action::ReplaceFormDetail(detail));
        let next = reduce(
            &hydrated,
            Action::AddBlankElement {
                kind: ElementKind::FormQuestion,
                form: 1,
            },
        );
        assert_eq!(next.detail.form_elements[1].element.seq_no(), Some(50));
    }

    #[test]
    fn screen_and_method_transitions_replace_only_their_field() {
        let state = state_with_one_element();

        let next = reduce(&state, Action::SetScreen(Screen::FormElements));
        assert_eq!(next.screen, Screen::FormElements);
        assert_eq!(next.detail, state.detail);

        let next = reduce(&next, Action::UpdateHttpMethod(HttpMethod::Put));
        assert_eq!(next.http_method, HttpMethod::Put);
        assert_eq!(next.screen, Screen::FormElements);
    }

    #[test]
    fn blank_question_defaults_flow_through() {
        let state = EngineState::default();
        let next = reduce(
            &state,
            Action::AddBlankElement {
                kind: ElementKind::FormQuestion,
                form: 3,
            },
        );

        let Element::FormQuestion(q) = &next.detail.form_elements[0].element else {
            panic!("expected a form question");
        };
        assert_eq!(q.field_type, FieldType::Text);
        assert!(!q.required);
        assert!(q.choices.is_empty());
    }
}
