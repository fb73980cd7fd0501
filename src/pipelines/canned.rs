//! # Canned examples
//!
//! Ready-made inputs offered by the demo, loaded once from a JSON file of the form:
//!
//! ```json
//! {
//!   "canned_text": [
//!     { "Label": "Arabic news article", "Full Text": "...", "do_translate": true }
//!   ]
//! }
//! ```

use crate::common::error::DemoError;
use crate::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// # Canned example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CannedExample {
    /// Label displayed in the selection list
    #[serde(rename = "Label")]
    pub label: String,
    /// Text submitted to the model
    #[serde(rename = "Full Text")]
    pub full_text: String,
    /// Whether the summary should be translated to English
    pub do_translate: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct CannedTextFile {
    canned_text: Vec<CannedExample>,
}

impl Config for CannedTextFile {}

/// Loads the canned examples from a JSON file.
pub fn load_canned_examples<P: AsRef<Path>>(path: P) -> Result<Vec<CannedExample>, DemoError> {
    let file = CannedTextFile::from_file(path)?;
    log::info!("loaded {} canned examples", file.canned_text.len());
    Ok(file.canned_text)
}
