//! Pure request construction for the form-creator API.
//!
//! Nothing here performs I/O. The engine stays free of network concerns;
//! this module turns its state into [`ApiRequest`] values that a caller
//! hands to whatever HTTP client it runs — and applies the response back
//! to the engine as an ordinary action.
//!
//! Environmental inputs (the site root, the browser-style cookie string
//! the CSRF token hides in) are injected through [`RequestContext`]
//! rather than read from any ambient source.

use crate::endpoints::Endpoint;
use crate::model::{FormDetail, FormElement, HttpMethod};
use crate::wire;

/// Name prefix of the cookie carrying the CSRF token.
const CSRF_COOKIE_PREFIX: &str = "csrftoken";

/// Header the server expects the CSRF token on.
const CSRF_HEADER: &str = "X-CSRFToken";

/// Errors raised while assembling a request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Adapter(#[from] wire::AdapterError),

    /// An update or delete was requested for an object the server has
    /// not assigned an id yet.
    #[error("no id to address the {0} with")]
    MissingId(&'static str),

    #[error("failed to encode request body: {0}")]
    Body(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, RequestError>;

/// One fully described HTTP request, ready for any client to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

/// Injected environment for request construction.
#[derive(Debug, Clone)]
pub struct RequestContext {
    root: String,
    cookies: String,
}

impl RequestContext {
    /// A context for the given site root and cookie string.
    ///
    /// The cookie string is the `"name=value; name2=value2"` form a
    /// browser exposes; pass an empty string when there are no cookies.
    pub fn new(root: impl Into<String>, cookies: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            cookies: cookies.into(),
        }
    }

    /// The CSRF token, if a `csrftoken`-prefixed cookie is present.
    pub fn csrf_token(&self) -> Option<&str> {
        self.cookies
            .split("; ")
            .find(|cookie| cookie.starts_with(CSRF_COOKIE_PREFIX))
            .and_then(|cookie| cookie.split_once('='))
            .map(|(_, value)| value)
    }

    /// Submit the whole form: POST to the collection to create, PUT to
    /// the form's detail endpoint to update.
    ///
    /// The verb is the engine's choice; a PUT needs the form to carry an
    /// id. Elements travel nested in the payload, though the server also
    /// accepts them through the per-element endpoints below.
    pub fn submit_form(&self, method: HttpMethod, detail: &FormDetail) -> Result<ApiRequest> {
        let endpoint = match method {
            HttpMethod::Put => {
                let pk = detail.form.id.ok_or(RequestError::MissingId("form"))?;
                Endpoint::FormDetail { pk }
            }
            _ => Endpoint::FormList,
        };

        let payload = wire::form_detail_to_wire(detail)?;

        Ok(ApiRequest {
            method,
            url: endpoint.url(&self.root),
            headers: self.mutation_headers(),
            body: Some(serde_json::to_string(&payload)?),
        })
    }

    /// Persist one element: POST the full envelope to the element
    /// collection when it has no id, PUT the bare element payload to its
    /// variant's detail endpoint when it does.
    pub fn save_element(&self, envelope: &FormElement) -> Result<ApiRequest> {
        match envelope.element.id() {
            None => {
                let payload = wire::form_element_to_wire(envelope)?;
                Ok(ApiRequest {
                    method: HttpMethod::Post,
                    url: Endpoint::FormElementList.url(&self.root),
                    headers: self.mutation_headers(),
                    body: Some(serde_json::to_string(&payload)?),
                })
            }
            Some(pk) => {
                let payload = wire::form_element_to_wire(envelope)?;
                Ok(ApiRequest {
                    method: HttpMethod::Put,
                    url: Endpoint::element_detail(envelope.element.kind(), pk).url(&self.root),
                    headers: self.mutation_headers(),
                    body: Some(serde_json::to_string(&payload.element)?),
                })
            }
        }
    }

    /// Remove one persisted element via its variant's detail endpoint.
    pub fn delete_element(&self, envelope: &FormElement) -> Result<ApiRequest> {
        let pk = envelope
            .element
            .id()
            .ok_or(RequestError::MissingId("element"))?;

        Ok(ApiRequest {
            method: HttpMethod::Delete,
            url: Endpoint::element_detail(envelope.element.kind(), pk).url(&self.root),
            headers: self.mutation_headers(),
            body: None,
        })
    }

    /// Headers sent on every mutating call.
    fn mutation_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", "application/json".to_string()),
            (
                CSRF_HEADER,
                self.csrf_token().unwrap_or_default().to_string(),
            ),
        ]
    }
}
