use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use summatrans::pipelines::canned::{load_canned_examples, CannedExample};
use summatrans::pipelines::common::TextPipeline;
use summatrans::pipelines::demo::{DemoModel, UnitErrorPolicy};
use summatrans::pipelines::splitting::SplitMode;
use summatrans::server::{configure, AppState};
use summatrans::DemoError;

/// Stands in for the summarizer: keeps the first sentence of the unit
struct FirstSentence;

impl TextPipeline for FirstSentence {
    fn name(&self) -> &str {
        "first-sentence"
    }

    fn process(&self, text: &str) -> Result<String, DemoError> {
        Ok(text.split(". ").next().unwrap_or_default().to_string())
    }
}

/// Summarizer stand-in panicking on units mentioning "crash"
struct Fragile;

impl TextPipeline for Fragile {
    fn name(&self) -> &str {
        "fragile"
    }

    fn process(&self, text: &str) -> Result<String, DemoError> {
        if text.contains("crash") {
            panic!("index out of range");
        }
        Ok(text.to_string())
    }
}

/// Stands in for the translator
struct Tagged;

impl TextPipeline for Tagged {
    fn name(&self) -> &str {
        "tagged"
    }

    fn process(&self, text: &str) -> Result<String, DemoError> {
        Ok(format!("[en] {}", text))
    }
}

fn canned() -> Vec<CannedExample> {
    vec![
        CannedExample {
            label: "Translated example".to_string(),
            full_text: "First claim. Details.\n\nSecond claim. More details.".to_string(),
            do_translate: true,
        },
        CannedExample {
            label: "English example".to_string(),
            full_text: "Only claim. Nothing else.".to_string(),
            do_translate: false,
        },
    ]
}

fn state() -> web::Data<AppState> {
    let model = DemoModel::from_pipelines(
        Box::new(FirstSentence),
        Box::new(Tagged),
        UnitErrorPolicy::Drop,
    );
    web::Data::new(AppState::new(model, canned(), SplitMode::Paragraph))
}

async fn body_of(response: actix_web::dev::ServiceResponse) -> String {
    let body = test::read_body(response).await;
    String::from_utf8(body.to_vec()).unwrap()
}

#[actix_web::test]
async fn index_renders_canned_form_by_default() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_of(response).await;
    assert!(body.contains("Select a canned input"));
    assert!(body.contains("<option value=\"1\">English example</option>"));
    assert!(body.contains("About the Model"));
}

#[actix_web::test]
async fn index_renders_text_form() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let request = test::TestRequest::get().uri("/?mode=text").to_request();
    let body = body_of(test::call_service(&app, request).await).await;

    assert!(body.contains("Your Text"));
    assert!(body.contains("Split On"));
    assert!(body.contains("Arabic Text?"));
}

#[actix_web::test]
async fn canned_submission_is_summarized_and_translated() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let request = test::TestRequest::post()
        .uri("/summarize")
        .set_form([("mode", "canned"), ("canned_index", "0")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_of(response).await;
    assert!(body.contains("<p>[en] First claim</p><p>[en] Second claim</p>"));
}

#[actix_web::test]
async fn text_submission_uses_form_settings() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let request = test::TestRequest::post()
        .uri("/summarize")
        .set_form([
            ("mode", "text"),
            ("text", "One. Two\nThree. Four"),
            ("split_mode", "Newline"),
        ])
        .to_request();
    let body = body_of(test::call_service(&app, request).await).await;

    assert!(body.contains("<p>One</p><p>Three</p>"));
    assert!(!body.contains("[en]"));
}

#[actix_web::test]
async fn empty_text_submission_is_not_an_error() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let request = test::TestRequest::post()
        .uri("/summarize")
        .set_form([("mode", "text"), ("text", ""), ("do_translate", "true")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_of(response).await;
    assert!(body.contains("No summary was produced for this input."));
}

#[actix_web::test]
async fn unknown_canned_example_is_a_bad_request() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let request = test::TestRequest::post()
        .uri("/summarize")
        .set_form([("mode", "canned"), ("canned_index", "7")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_of(response).await;
    assert!(body.contains("canned example 7 does not exist (2 available)"));
}

#[actix_web::test]
async fn text_submission_without_text_is_a_bad_request() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let request = test::TestRequest::post()
        .uri("/summarize")
        .set_form([("mode", "text"), ("split_mode", "Newline")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_of(response).await;
    assert!(body.contains("Invalid input error: no text submitted"));
}

#[actix_web::test]
async fn malformed_form_renders_error_page() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    for form in [
        [("mode", "text"), ("text", "Some text"), ("split_mode", "Chapter")],
        [("mode", "canned"), ("canned_index", "abc"), ("text", "")],
    ] {
        let request = test::TestRequest::post()
            .uri("/summarize")
            .set_form(form)
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert!(body.contains("<p class=\"error\">Invalid input error: "));
        assert!(body.contains("Back to the demo"));
    }
}

#[actix_web::test]
async fn unknown_input_mode_renders_error_page() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let request = test::TestRequest::get().uri("/?mode=audio").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_of(response).await;
    assert!(body.contains("<p class=\"error\">Invalid input error: "));
}

#[actix_web::test]
async fn panicking_model_keeps_serving() {
    let model = DemoModel::from_pipelines(
        Box::new(Fragile),
        Box::new(Tagged),
        UnitErrorPolicy::Drop,
    );
    let data = web::Data::new(AppState::new(model, canned(), SplitMode::Paragraph));
    let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

    let request = test::TestRequest::post()
        .uri("/summarize")
        .set_form([("mode", "text"), ("text", "this will crash"), ("do_translate", "true")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_of(response)
        .await
        .contains("No summary was produced for this input."));
    assert!(!data.model.is_poisoned());

    let request = test::TestRequest::post()
        .uri("/summarize")
        .set_form([("mode", "text"), ("text", "this is fine"), ("do_translate", "true")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_of(response).await.contains("<p>[en] this is fine</p>"));
}

#[actix_web::test]
async fn poisoned_model_lock_keeps_serving() {
    let data = state();
    let poisoner = data.clone();
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.model.lock();
        panic!("worker died while holding the model");
    })
    .join();
    assert!(data.model.is_poisoned());

    let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;
    let request = test::TestRequest::post()
        .uri("/summarize")
        .set_form([("mode", "canned"), ("canned_index", "1")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_of(response).await.contains("<p>Only claim</p>"));
}

#[::core::prelude::v1::test]
fn bundled_canned_examples_are_valid() -> anyhow::Result<()> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/canned_text.json");
    let examples = load_canned_examples(path)?;

    assert!(!examples.is_empty());
    assert!(examples
        .iter()
        .all(|example| !example.label.is_empty() && !example.full_text.trim().is_empty()));
    assert!(examples.iter().any(|example| example.do_translate));
    Ok(())
}
