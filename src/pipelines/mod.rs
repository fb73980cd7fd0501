//! # Summarization and translation pipelines
//!
//! The demo chains two pretrained sequence-to-sequence models, each wrapped in an adapter
//! implementing `TextPipeline`:
//!
//! #### 1. Summarization
//! Abstractive summarization of a text unit in any of the 44 XLSum languages, using the mT5 model
//! fine-tuned on XLSum (`summarization` module). Inputs are whitespace-normalized before
//! generation.
//!
//! #### 2. Translation
//! Translation of a text unit from a configured source language to English using M2M100 418M
//! (`translation` module).
//!
//! #### 3. Orchestration
//! `DemoModel` (`demo` module) splits the input text into units (`splitting` module), summarizes
//! every unit and optionally translates the summaries. A failing unit does not abort the run.
//!
//! ```no_run
//! use summatrans::pipelines::demo::{DemoModel, DemoModelConfig};
//! use summatrans::pipelines::splitting::SplitMode;
//!
//! fn main() -> anyhow::Result<()> {
//!     let model = DemoModel::new(&DemoModelConfig::default())?;
//!     let input = "أعلنت وكالة الفضاء الأوروبية اليوم عن إطلاق قمر صناعي جديد لرصد المناخ.";
//!     let output = model.run(input, SplitMode::Paragraph, true);
//!     println!("{}", output.join("\n\n"));
//!     Ok(())
//! }
//! ```
//!
//! The canned examples offered by the web demo are loaded by the `canned` module.

pub mod canned;
pub mod common;
pub mod demo;
pub mod splitting;
pub mod summarization;
pub mod translation;
