//! CLI interface for formbench.
//!
//! Non-interactive subcommands over wire payload files: arguments in,
//! structured output out. Payloads are the JSON the form-creator API
//! serves; nothing here talks to the network — `request` prints the
//! call that would be made and leaves the sending to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::engine::{self, Action, EngineState};
use crate::model::{Element, FormDetail, HttpMethod};
use crate::registry::ElementKind;
use crate::transport::{ApiRequest, RequestContext};
use crate::wire;

/// Formbench — assemble and inspect form-creator payloads.
#[derive(Debug, Parser)]
#[command(name = "formbench")]
pub struct Cli {
    /// Override the configured API root.
    #[arg(long, global = true)]
    api_root: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode a form detail payload and print a summary.
    Inspect {
        /// Path to a form detail JSON file.
        file: PathBuf,
    },

    /// Print a blank element payload, ready to fill in and create.
    Blank {
        /// Which element kind to construct.
        #[arg(value_enum)]
        kind: ElementKindArg,

        /// Id of the owning form.
        #[arg(long)]
        form: i64,

        /// Sequence number to assign; left for the editor to allocate
        /// when omitted.
        #[arg(long)]
        seq_no: Option<i64>,
    },

    /// Round-trip a payload through the internal model and print the
    /// re-encoded JSON. Fails if the payload violates the contract.
    Convert {
        /// Path to a form detail JSON file.
        file: PathBuf,
    },

    /// Print the HTTP request that would persist the payload, without
    /// sending it.
    Request {
        /// Path to a form detail JSON file.
        file: PathBuf,

        /// Browser-style cookie string to take the CSRF token from.
        #[arg(long, default_value = "")]
        cookie: String,

        /// Build the save request for one element instead of the form.
        #[arg(long)]
        element: Option<i64>,

        /// With --element: build the delete request instead.
        #[arg(long)]
        delete: bool,
    },
}

/// CLI-facing element kind, mapped to the registry's.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ElementKindArg {
    /// A rich-text block.
    Html,
    /// A question.
    Question,
}

impl ElementKindArg {
    fn to_domain(self) -> ElementKind {
        match self {
            Self::Html => ElementKind::HtmlComponent,
            Self::Question => ElementKind::FormQuestion,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();
    let api_root = cli.api_root.unwrap_or_else(|| config.api_root.clone());

    match cli.command {
        Command::Inspect { file } => cmd_inspect(&file),
        Command::Blank { kind, form, seq_no } => cmd_blank(kind.to_domain(), form, seq_no),
        Command::Convert { file } => cmd_convert(&file),
        Command::Request {
            file,
            cookie,
            element,
            delete,
        } => cmd_request(&api_root, &file, &cookie, element, delete),
    }
}

/// Load a wire payload file and hydrate an engine state from it.
///
/// Hydration sorts elements by sequence number and parses dates, so
/// every command sees the payload the way the editor would.
fn load_state(file: &Path) -> Result<EngineState, String> {
    let detail = load_detail(file)?;
    let verb = if detail.form.id.is_some() {
        HttpMethod::Put
    } else {
        HttpMethod::Post
    };

    let state = engine::reduce(&EngineState::default(), Action::ReplaceFormDetail(detail));
    Ok(engine::reduce(&state, Action::UpdateHttpMethod(verb)))
}

fn load_detail(file: &Path) -> Result<FormDetail, String> {
    let contents =
        fs::read_to_string(file).map_err(|e| format!("failed to read {}: {e}", file.display()))?;

    let payload: wire::WireForm = serde_json::from_str(&contents)
        .map_err(|e| format!("invalid payload in {}: {e}", file.display()))?;

    wire::form_detail_from_wire(payload)
        .map_err(|e| format!("payload in {} violates the contract: {e}", file.display()))
}

fn cmd_inspect(file: &Path) -> Result<(), String> {
    let state = load_state(file)?;
    let form = &state.detail.form;
    tracing::debug!(
        elements = state.detail.form_elements.len(),
        "loaded form detail"
    );

    match form.id {
        Some(id) => println!("{} (id {id}, {})", form.title, state.http_method.as_str()),
        None => println!("{} (unsaved, {})", form.title, state.http_method.as_str()),
    }
    if !form.status.is_empty() {
        println!("status: {}", form.status);
    }

    if state.detail.form_elements.is_empty() {
        println!("no elements");
        return Ok(());
    }

    for envelope in &state.detail.form_elements {
        let seq_no = envelope.element.seq_no().unwrap_or(0);
        let id = match envelope.element.id() {
            Some(id) => format!("id {id}"),
            None => "unsaved".to_string(),
        };
        match &envelope.element {
            Element::HtmlComponent(c) => {
                println!("{seq_no:>5}  html      [{id}]  {} chars", c.html.len());
            }
            Element::FormQuestion(q) => {
                let required = if q.required { "*" } else { "" };
                println!("{seq_no:>5}  question  [{id}]  {}{required}", q.question);
            }
        }
    }

    Ok(())
}

fn cmd_blank(kind: ElementKind, form: i64, seq_no: Option<i64>) -> Result<(), String> {
    let mut element = kind.blank(form);
    if let Some(seq_no) = seq_no {
        element.set_seq_no(seq_no);
    }

    let envelope = crate::model::FormElement::new(element);
    let payload = wire::form_element_to_wire(&envelope)
        .map_err(|e| format!("failed to encode blank element: {e}"))?;

    let json = serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("failed to serialize payload: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_convert(file: &Path) -> Result<(), String> {
    let detail = load_detail(file)?;
    let payload = wire::form_detail_to_wire(&detail)
        .map_err(|e| format!("payload in {} cannot be re-encoded: {e}", file.display()))?;

    let json = serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("failed to serialize payload: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_request(
    api_root: &str,
    file: &Path,
    cookie: &str,
    element: Option<i64>,
    delete: bool,
) -> Result<(), String> {
    let state = load_state(file)?;
    let context = RequestContext::new(api_root, cookie);

    let request = match element {
        None => context
            .submit_form(state.http_method, &state.detail)
            .map_err(|e| format!("cannot build form request: {e}"))?,
        Some(id) => {
            let envelope = state
                .detail
                .form_elements
                .iter()
                .find(|e| e.element.id() == Some(id))
                .ok_or_else(|| format!("no element with id {id}"))?;

            let built = if delete {
                context.delete_element(envelope)
            } else {
                context.save_element(envelope)
            };
            built.map_err(|e| format!("cannot build element request: {e}"))?
        }
    };

    print_request(&request);
    Ok(())
}

fn print_request(request: &ApiRequest) {
    println!("{} {}", request.method.as_str(), request.url);
    for (name, value) in &request.headers {
        println!("{name}: {value}");
    }

    if let Some(body) = &request.body {
        // The wire body is compact; re-indent for the terminal.
        let pretty = serde_json::from_str::<serde_json::Value>(body)
            .and_then(|v| serde_json::to_string_pretty(&v))
            .unwrap_or_else(|_| body.clone());
        println!();
        println!("{pretty}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    fn payload_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = r#"{
        "id": 1,
        "slug": "colour-survey",
        "title": "Colour survey",
        "description": null,
        "start_dt": "2024-03-01T09:00:00Z",
        "end_dt": null,
        "status": "draft",
        "form_elements": [
            {
                "id": 9,
                "form": 1,
                "seq_no": 20,
                "element_type": {"id": 31, "app_label": "form_creator", "model": "formquestion"},
                "element": {
                    "id": 4, "form": 1, "seq_no": 20,
                    "field_type": "choice", "question": "Favourite colour?",
                    "description": "", "required": true, "choices": "red|green",
                    "related_question": null
                }
            },
            {
                "id": 8,
                "form": 1,
                "seq_no": 10,
                "element_type": {"id": 30, "app_label": "form_creator", "model": "htmlcomponent"},
                "element": {"id": 3, "form": 1, "seq_no": 10, "html": "<h2>Welcome</h2>"}
            }
        ]
    }"#;

    #[test]
    fn loads_and_hydrates_a_payload_file() {
        let file = payload_file(SAMPLE);
        let state = load_state(file.path()).unwrap();

        assert_eq!(state.http_method, HttpMethod::Put);
        assert_eq!(state.meta.max_seq_no, 20);

        // Hydration ordered the elements by sequence number.
        let seq_nos: Vec<Option<i64>> = state
            .detail
            .form_elements
            .iter()
            .map(|e| e.element.seq_no())
            .collect();
        assert_eq!(seq_nos, vec![Some(10), Some(20)]);
    }

    #[test]
    fn unsaved_payload_selects_post() {
        let file = payload_file(
            r#"{"title": "New", "description": null, "start_dt": "", "end_dt": null}"#,
        );
        let state = load_state(file.path()).unwrap();
        assert_eq!(state.http_method, HttpMethod::Post);
    }

    #[test]
    fn malformed_payload_is_reported_with_the_path() {
        let file = payload_file("{not json");
        let err = load_state(file.path()).unwrap_err();
        assert!(err.contains("invalid payload"));
    }

    #[test]
    fn unknown_element_kind_is_a_contract_violation() {
        let file = payload_file(
            r#"{
                "title": "T", "description": null, "start_dt": "", "end_dt": null,
                "form_elements": [{
                    "element_type": {"app_label": "form_creator", "model": "surveypage"},
                    "element": {}
                }]
            }"#,
        );
        let err = load_state(file.path()).unwrap_err();
        assert!(err.contains("unknown element type: surveypage"));
    }
}
