//! # Web demo
//!
//! Interactive form exposing the `DemoModel`, served with actix-web:
//! - `GET /?mode=canned|text` renders the page with the input form of the selected mode
//! - `POST /summarize` runs the model on the submitted form and renders the page with the input
//!   and the summaries
//!
//! The model is loaded once and shared by all the workers. Inference runs on the blocking thread
//! pool, one submission at a time. Invalid submissions, including malformed forms, are answered
//! with a 400 error page.
//!
//! ```no_run
//! use summatrans::server::{run_server, AppState};
//! use summatrans::AppConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load(None)?;
//!     let state = AppState::load(&config)?;
//!     actix_web::rt::System::new().block_on(run_server(state, &config.server))?;
//!     Ok(())
//! }
//! ```

pub mod page;
pub mod routes;

use crate::common::config::{AppConfig, ServerConfig};
use crate::common::error::DemoError;
use crate::pipelines::canned::{load_canned_examples, CannedExample};
use crate::pipelines::demo::{DemoModel, DemoModelConfig};
use crate::pipelines::splitting::SplitMode;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError};
use std::sync::Mutex;

/// # State shared by the request handlers
pub struct AppState {
    /// Model shared by all the sessions
    pub model: Mutex<DemoModel>,
    /// Canned examples, immutable for the lifetime of the server
    pub canned: Vec<CannedExample>,
    /// Split mode preselected in the text box form
    pub default_split_mode: SplitMode,
}

impl AppState {
    pub fn new(
        model: DemoModel,
        canned: Vec<CannedExample>,
        default_split_mode: SplitMode,
    ) -> AppState {
        AppState {
            model: Mutex::new(model),
            canned,
            default_split_mode,
        }
    }

    /// Loads the canned examples and both models as described by the configuration. This may
    /// download the model resources and must not run on an async runtime.
    pub fn load(config: &AppConfig) -> Result<AppState, DemoError> {
        let canned = load_canned_examples(&config.demo.canned_text_path)?;
        let model = DemoModel::new(&DemoModelConfig::from(config))?;
        Ok(AppState::new(
            model,
            canned,
            config.demo.default_split_mode,
        ))
    }
}

/// Registers the demo routes. Malformed queries and forms are answered with the error page.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|error, _| {
        DemoError::InvalidInputError(error.to_string()).into()
    }))
    .app_data(web::FormConfig::default().error_handler(|error, _| {
        DemoError::InvalidInputError(error.to_string()).into()
    }))
    .route("/", web::get().to(routes::index))
    .route("/summarize", web::post().to(routes::summarize));
}

/// Runs the web server until it is stopped.
///
/// # Arguments
///
/// * `state` - `AppState` with the loaded model and canned examples
/// * `settings` - `ServerConfig` with the address to bind to and the number of workers
pub async fn run_server(state: AppState, settings: &ServerConfig) -> std::io::Result<()> {
    let data = web::Data::new(state);
    log::info!(
        "serving demo on http://{}:{}/",
        settings.host,
        settings.port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .workers(settings.workers)
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}

impl ResponseError for DemoError {
    fn status_code(&self) -> StatusCode {
        match self {
            DemoError::InvalidInputError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(page::render_error(self))
    }
}
