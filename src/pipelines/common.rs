// Copyright 2022 The summatrans Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Common abstraction over the text-to-text pipelines
//! Both the summarizer and the translator wrap a pretrained generation model that maps one text
//! unit to one output text. The orchestrator only relies on this trait, so that the adapters can be
//! swapped (for example with lightweight stand-ins when testing).
use crate::common::error::DemoError;

/// # Text-to-text pipeline applied to a single text unit
pub trait TextPipeline: Send {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    /// Runs the pipeline on a single text unit.
    ///
    /// # Arguments
    ///
    /// * `text` - text unit to process
    ///
    /// # Returns
    ///
    /// * `String` generated text, or the error raised by the underlying model
    fn process(&self, text: &str) -> Result<String, DemoError>;
}

/// Returns the first generated sequence, or an `EmptyOutputError` naming the pipeline.
pub(crate) fn first_output(
    pipeline_name: &str,
    outputs: Vec<String>,
) -> Result<String, DemoError> {
    outputs
        .into_iter()
        .next()
        .ok_or_else(|| DemoError::EmptyOutputError(pipeline_name.to_string()))
}
