use crate::common::error::DemoError;
use crate::pipelines::canned::CannedExample;
use crate::pipelines::splitting::SplitMode;
use crate::server::page::PageView;
use crate::server::AppState;
use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::PoisonError;
use uuid::Uuid;

/// # Input mode selected in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Canned,
    Text,
}

impl InputMode {
    pub fn value(&self) -> &'static str {
        match self {
            InputMode::Canned => "canned",
            InputMode::Text => "text",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputMode::Canned => "Canned Text",
            InputMode::Text => "Text Box",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub mode: InputMode,
}

/// # Submitted form
/// Canned submissions carry `canned_index`, text box submissions carry the other fields.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionForm {
    pub mode: InputMode,
    pub canned_index: Option<usize>,
    pub text: Option<String>,
    pub split_mode: Option<SplitMode>,
    #[serde(default)]
    pub do_translate: bool,
}

/// # Model inputs collected from a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub text: String,
    pub split_mode: SplitMode,
    pub do_translate: bool,
}

impl SubmissionForm {
    /// Collects the model inputs. Canned examples are always split by paragraph and translated
    /// according to their own flag. A text box submission must carry a `text` field, possibly
    /// empty.
    pub fn resolve(
        self,
        canned: &[CannedExample],
        default_split_mode: SplitMode,
    ) -> Result<Submission, DemoError> {
        match self.mode {
            InputMode::Canned => {
                let index = self.canned_index.ok_or_else(|| {
                    DemoError::InvalidInputError("no canned example selected".to_string())
                })?;
                let example = canned.get(index).ok_or_else(|| {
                    DemoError::InvalidInputError(format!(
                        "canned example {} does not exist ({} available)",
                        index,
                        canned.len()
                    ))
                })?;
                Ok(Submission {
                    text: example.full_text.clone(),
                    split_mode: SplitMode::Paragraph,
                    do_translate: example.do_translate,
                })
            }
            InputMode::Text => Ok(Submission {
                text: self.text.ok_or_else(|| {
                    DemoError::InvalidInputError("no text submitted".to_string())
                })?,
                split_mode: self.split_mode.unwrap_or(default_split_mode),
                do_translate: self.do_translate,
            }),
        }
    }
}

/// Renders the page with the input form of the requested mode.
pub async fn index(state: web::Data<AppState>, query: web::Query<PageQuery>) -> HttpResponse {
    let page = PageView::new(query.mode, &state.canned, state.default_split_mode).render();
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page)
}

/// Runs the model on a submitted form and renders the page with the input and the summaries.
pub async fn summarize(
    state: web::Data<AppState>,
    form: web::Form<SubmissionForm>,
) -> Result<HttpResponse, DemoError> {
    let request_id = Uuid::new_v4();
    let mode = form.mode;
    let submission = form
        .into_inner()
        .resolve(&state.canned, state.default_split_mode)?;
    log::info!(
        "[{}] summarizing {} characters ({} split, translate: {})",
        request_id,
        submission.text.chars().count(),
        submission.split_mode,
        submission.do_translate
    );

    let worker_state = state.clone();
    let text = submission.text.clone();
    let (split_mode, do_translate) = (submission.split_mode, submission.do_translate);
    // The model holds no state between runs, a lock poisoned by an earlier panic is still usable.
    let outputs = web::block(move || {
        let model = worker_state
            .model
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        model.run(&text, split_mode, do_translate)
    })
    .await
    .map_err(|error| DemoError::ModelUnavailableError(error.to_string()))?;
    log::info!("[{}] {} summaries produced", request_id, outputs.len());

    let page = PageView::new(mode, &state.canned, state.default_split_mode)
        .with_result(&submission, &outputs)
        .render();
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page))
}

#[cfg(test)]
mod test {
    use super::*;

    fn canned() -> Vec<CannedExample> {
        vec![CannedExample {
            label: "Arabic article".to_string(),
            full_text: "نص\n\nنص آخر".to_string(),
            do_translate: true,
        }]
    }

    #[test]
    fn canned_submission_uses_example_settings() -> anyhow::Result<()> {
        let form = SubmissionForm {
            mode: InputMode::Canned,
            canned_index: Some(0),
            text: Some("ignored".to_string()),
            split_mode: Some(SplitMode::Sentence),
            do_translate: false,
        };
        let submission = form.resolve(&canned(), SplitMode::Newline)?;
        assert_eq!(
            submission,
            Submission {
                text: "نص\n\nنص آخر".to_string(),
                split_mode: SplitMode::Paragraph,
                do_translate: true,
            }
        );
        Ok(())
    }

    #[test]
    fn unknown_canned_example_is_invalid_input() {
        let form = SubmissionForm {
            mode: InputMode::Canned,
            canned_index: Some(3),
            text: None,
            split_mode: None,
            do_translate: false,
        };
        assert!(matches!(
            form.resolve(&canned(), SplitMode::Paragraph),
            Err(DemoError::InvalidInputError(_))
        ));
    }

    #[test]
    fn text_submission_without_text_is_invalid_input() {
        let form = SubmissionForm {
            mode: InputMode::Text,
            canned_index: None,
            text: None,
            split_mode: Some(SplitMode::Sentence),
            do_translate: true,
        };
        assert!(matches!(
            form.resolve(&canned(), SplitMode::Paragraph),
            Err(DemoError::InvalidInputError(_))
        ));
    }

    #[test]
    fn text_submission_falls_back_to_defaults() -> anyhow::Result<()> {
        let form = SubmissionForm {
            mode: InputMode::Text,
            canned_index: None,
            text: Some(String::new()),
            split_mode: None,
            do_translate: false,
        };
        let submission = form.resolve(&canned(), SplitMode::Newline)?;
        assert_eq!(submission.text, "");
        assert_eq!(submission.split_mode, SplitMode::Newline);
        assert!(!submission.do_translate);
        Ok(())
    }
}
