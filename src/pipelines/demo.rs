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

//! # Summarization and translation demo model
//!
//! Stacks the multilingual summarizer and the translator: the input text is split into units,
//! every unit is summarized, and the summaries are optionally translated to English.
//!
//! A failure on one unit never aborts the run, a panic raised by a model is caught and treated as
//! a failure of that unit. The failed unit is logged and, depending on the
//! `UnitErrorPolicy`, either dropped from the output or replaced by the error message. A failed
//! unit is never passed on to the translator.
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
//!     let output = model.run("...", SplitMode::Paragraph, true);
//!     for summary in output {
//!         println!("{}", summary);
//!     }
//!     Ok(())
//! }
//! ```

use crate::common::config::{AppConfig, DeviceSetting};
use crate::common::error::DemoError;
use crate::pipelines::common::TextPipeline;
use crate::pipelines::splitting::{split_text, SplitMode};
use crate::pipelines::summarization::{Summarizer, SummarizerConfig};
use crate::pipelines::translation::{Translator, TranslatorConfig};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tch::Device;

/// # Handling of the units whose inference failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitErrorPolicy {
    /// The unit is removed from the output
    #[default]
    Drop,
    /// The unit is replaced by the error message
    Explain,
}

/// Result of the pipeline stages for a single unit
pub type UnitOutcome = Result<String, DemoError>;

/// # Configuration for the demo model
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DemoModelConfig {
    pub summarizer: SummarizerConfig,
    pub translator: TranslatorConfig,
    pub device: DeviceSetting,
    pub unit_error_policy: UnitErrorPolicy,
}

impl From<&AppConfig> for DemoModelConfig {
    fn from(config: &AppConfig) -> Self {
        DemoModelConfig {
            summarizer: config.summarizer.clone(),
            translator: config.translator.clone(),
            device: config.device,
            unit_error_policy: config.demo.unit_error_policy,
        }
    }
}

/// # Stacked summarization and translation model
pub struct DemoModel {
    summarizer: Box<dyn TextPipeline>,
    translator: Box<dyn TextPipeline>,
    unit_error_policy: UnitErrorPolicy,
}

impl DemoModel {
    /// Build a new `DemoModel`, loading (and downloading if needed) both pretrained models.
    ///
    /// # Arguments
    ///
    /// * `config` - `DemoModelConfig` with the settings of both models
    pub fn new(config: &DemoModelConfig) -> Result<DemoModel, DemoError> {
        let device: Device = config.device.into();
        let summarizer = Summarizer::new(&config.summarizer, device)?;
        let translator = Translator::new(&config.translator, device)?;
        Ok(DemoModel::from_pipelines(
            Box::new(summarizer),
            Box::new(translator),
            config.unit_error_policy,
        ))
    }

    /// Build a `DemoModel` from existing pipelines.
    pub fn from_pipelines(
        summarizer: Box<dyn TextPipeline>,
        translator: Box<dyn TextPipeline>,
        unit_error_policy: UnitErrorPolicy,
    ) -> DemoModel {
        DemoModel {
            summarizer,
            translator,
            unit_error_policy,
        }
    }

    pub fn unit_error_policy(&self) -> UnitErrorPolicy {
        self.unit_error_policy
    }

    /// Splits a text into units, see `pipelines::splitting::split_text`.
    pub fn split_text(&self, text: &str, split_mode: SplitMode) -> Vec<String> {
        split_text(text, split_mode)
    }

    /// Runs a pipeline over every unit, capturing the failure of each unit instead of
    /// propagating it. Failures are logged.
    ///
    /// # Arguments
    ///
    /// * `units` - text units to process
    /// * `pipeline` - pipeline to run on each unit
    ///
    /// # Returns
    ///
    /// * `Vec<UnitOutcome>` one outcome per input unit, in input order
    pub fn marshall<S>(&self, units: &[S], pipeline: &dyn TextPipeline) -> Vec<UnitOutcome>
    where
        S: AsRef<str>,
    {
        units
            .iter()
            .enumerate()
            .map(|(position, unit)| self.process_unit(position, unit.as_ref(), pipeline))
            .collect()
    }

    fn process_unit(
        &self,
        position: usize,
        unit: &str,
        pipeline: &dyn TextPipeline,
    ) -> UnitOutcome {
        log::debug!("running {} on unit {}", pipeline.name(), position);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| pipeline.process(unit)))
            .unwrap_or_else(|payload| {
                Err(DemoError::ModelError(format!(
                    "{} panicked: {}",
                    pipeline.name(),
                    panic_message(&*payload)
                )))
            });
        if let Err(error) = &outcome {
            log::warn!("{} failed on unit {}: {}", pipeline.name(), position, error);
        }
        outcome
    }

    /// Summarizes every unit.
    ///
    /// # Returns
    ///
    /// * `Vec<String>` summaries, failed units being handled according to the `UnitErrorPolicy`
    pub fn summarize<S>(&self, units: &[S]) -> Vec<String>
    where
        S: AsRef<str>,
    {
        self.collect(self.marshall(units, &*self.summarizer))
    }

    /// Translates every unit to English.
    ///
    /// # Returns
    ///
    /// * `Vec<String>` translations, failed units being handled according to the `UnitErrorPolicy`
    pub fn translate<S>(&self, units: &[S]) -> Vec<String>
    where
        S: AsRef<str>,
    {
        self.collect(self.marshall(units, &*self.translator))
    }

    /// Summarizes (and optionally translates) already split units, keeping the outcome of every
    /// stage per unit. Blank units are skipped and do not appear in the outcomes.
    pub fn run_units<S>(&self, units: &[S], do_translate: bool) -> Vec<UnitOutcome>
    where
        S: AsRef<str>,
    {
        let units = units
            .iter()
            .map(|unit| unit.as_ref())
            .filter(|unit| !unit.trim().is_empty())
            .collect::<Vec<&str>>();

        let summaries = self.marshall(&units, &*self.summarizer);
        if !do_translate {
            return summaries;
        }
        summaries
            .into_iter()
            .enumerate()
            .map(|(position, summary)| self.process_unit(position, &summary?, &*self.translator))
            .collect()
    }

    /// Splits, summarizes and optionally translates a text.
    ///
    /// # Arguments
    ///
    /// * `text` - input text, in any language supported by the summarizer
    /// * `split_mode` - `SplitMode` used to divide the text into independently summarized units
    /// * `do_translate` - translate the summaries to English
    ///
    /// # Returns
    ///
    /// * `Vec<String>` one output per unit, failed units being handled according to the `UnitErrorPolicy`
    pub fn run(&self, text: &str, split_mode: SplitMode, do_translate: bool) -> Vec<String> {
        let units = self.split_text(text, split_mode);
        log::debug!("{} units after {} split", units.len(), split_mode);
        self.collect(self.run_units(&units, do_translate))
    }

    fn collect(&self, outcomes: Vec<UnitOutcome>) -> Vec<String> {
        outcomes
            .into_iter()
            .filter_map(|outcome| match (outcome, self.unit_error_policy) {
                (Ok(text), _) => Some(text),
                (Err(_), UnitErrorPolicy::Drop) => None,
                (Err(error), UnitErrorPolicy::Explain) => Some(error.to_string()),
            })
            .collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
