//! Abstractive summarization of arbitrary-language text into English.
//!
//! This crate chains two pretrained sequence-to-sequence models run with
//! [rust-bert](https://github.com/guillaume-be/rust-bert):
//! - the multilingual mT5 summarizer fine-tuned on XLSum, summarizing text in 44 languages,
//! - the M2M100 translator, translating the summaries to English.
//!
//! The input text is split into units (sentences, lines or paragraphs), each unit is summarized
//! and the summaries are optionally translated. A web form (`server` module, served by the
//! `summatrans-server` binary) exposes the model interactively, with canned examples and free
//! text input.
//!
//! # Quick Start
//!
//! ```no_run
//! use summatrans::common::resources::ResourceLocation;
//! use summatrans::pipelines::demo::{DemoModel, DemoModelConfig};
//! use summatrans::pipelines::splitting::SplitMode;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut config = DemoModelConfig::default();
//!     config.summarizer.model_resource =
//!         Some(ResourceLocation::local("models/mt5-xlsum/rust_model.ot"));
//!     let model = DemoModel::new(&config)?;
//!     let summaries = model.run("...", SplitMode::Paragraph, true);
//!     for summary in summaries {
//!         println!("{}", summary);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Model resources
//!
//! Model files are downloaded on first use and cached by `rust-bert` in `~/.cache/.rustbert` (or
//! the directory given by the `RUSTBERT_CACHE` environment variable). The mT5 XLSum weights are only
//! published as PyTorch checkpoints: they must be converted to the `rust_model.ot` format and
//! configured as `summarizer.model_resource` (a `{"local_path": ...}` resource), or passed to the
//! server with `--summarizer-weights` / `XLSUM_MODEL_PATH`. Loading fails with an
//! `InvalidConfigurationError` when they are missing.
//!
//! # Configuration
//!
//! The application is configured with a JSON file, see `common::config::AppConfig`. Every field is
//! optional.

pub mod common;
pub mod pipelines;
pub mod server;

pub use common::config::{AppConfig, Config};
pub use common::error::DemoError;
