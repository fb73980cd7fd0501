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

//! # Multilingual summarization
//!
//! Abstractive summarization of a text unit with the mT5 model fine-tuned on XLSum by the
//! BUET CSE NLP group (`csebuetnlp/mT5_multilingual_XLSum`). The model summarizes news-like text
//! in any of the 44 XLSum languages and answers in the language of the input.
//!
//! The mT5 checkpoint is loaded through the `rust-bert` T5 architecture and generation runs on the
//! bare `T5Generator`: the inputs reach the model without the `summarize: ` task prefix the generic
//! summarization pipeline would add, as XLSum was fine-tuned on raw articles. The weights are not
//! published in the `rust_model.ot` format and must be converted and configured explicitly, the
//! config and vocabulary are fetched from the Hugging Face hub.
//!
//! ```no_run
//! use summatrans::common::resources::ResourceLocation;
//! use summatrans::pipelines::common::TextPipeline;
//! use summatrans::pipelines::summarization::{Summarizer, SummarizerConfig};
//! use tch::Device;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = SummarizerConfig {
//!         model_resource: Some(ResourceLocation::local("models/mt5-xlsum/rust_model.ot")),
//!         ..Default::default()
//!     };
//!     let summarizer = Summarizer::new(&config, Device::Cpu)?;
//!     let summary = summarizer.process("Some long news article...")?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```

use crate::common::error::DemoError;
use crate::common::resources::ResourceLocation;
use crate::pipelines::common::{first_output, TextPipeline};
use lazy_static::lazy_static;
use regex::Regex;
use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::generation_utils::{GenerateConfig, LanguageGenerator};
use rust_bert::t5::T5Generator;
use serde::{Deserialize, Serialize};
use tch::Device;

/// # mT5 XLSum pretrained model config
pub struct XLSumConfigResources;

/// # mT5 XLSum pretrained model vocab
pub struct XLSumVocabResources;

impl XLSumConfigResources {
    /// Shared under Creative Commons Attribution-NonCommercial-ShareAlike 4.0 by <https://github.com/csebuetnlp/xl-sum>.
    pub const MT5_MULTILINGUAL_XLSUM: (&'static str, &'static str) = (
        "mt5-multilingual-xlsum/config",
        "https://huggingface.co/csebuetnlp/mT5_multilingual_XLSum/resolve/main/config.json",
    );
}

impl XLSumVocabResources {
    /// Shared under Creative Commons Attribution-NonCommercial-ShareAlike 4.0 by <https://github.com/csebuetnlp/xl-sum>.
    pub const MT5_MULTILINGUAL_XLSUM: (&'static str, &'static str) = (
        "mt5-multilingual-xlsum/spiece",
        "https://huggingface.co/csebuetnlp/mT5_multilingual_XLSum/resolve/main/spiece.model",
    );
}

/// # Languages of the XLSum dataset
/// Language names with the number of training samples available for each of them.
pub struct XLSumLanguages;

impl XLSumLanguages {
    pub const TRAINING_SAMPLES: [(&'static str, u32); 44] = [
        ("English", 301444),
        ("Ukrainian", 57952),
        ("Russian", 52712),
        ("Hindi", 51715),
        ("Spanish", 44413),
        ("Indonesian", 44170),
        ("Urdu", 40714),
        ("Arabic", 40327),
        ("Chinese", 39810),
        ("Turkish", 29510),
        ("Persian", 25783),
        ("Portuguese", 23521),
        ("Vietnamese", 23468),
        ("Tamil", 17846),
        ("Pashto", 15274),
        ("Welsh", 11596),
        ("Telugu", 11308),
        ("Marathi", 11164),
        ("Swahili", 10005),
        ("Pidgin", 9715),
        ("Gujarati", 9665),
        ("French", 9100),
        ("Punjabi", 8678),
        ("Bengali", 8226),
        ("Japanese", 7585),
        ("Azerbaijani", 7332),
        ("Serbian (Cyrillic)", 7317),
        ("Serbian (Latin)", 7263),
        ("Thai", 6928),
        ("Yoruba", 6316),
        ("Hausa", 6313),
        ("Oromo", 5738),
        ("Somali", 5636),
        ("Kirundi", 5558),
        ("Amharic", 5461),
        ("Nepali", 5286),
        ("Burmese", 5002),
        ("Uzbek", 4944),
        ("Tigrinya", 4827),
        ("Igbo", 4559),
        ("Korean", 4281),
        ("Sinhala", 3414),
        ("Kyrgyz", 2315),
        ("Scottish (Gaelic)", 1101),
    ];
}

lazy_static! {
    static ref NEWLINES: Regex = Regex::new(r"\n+").unwrap();
    static ref WHITESPACES: Regex = Regex::new(r"\s+").unwrap();
}

/// Whitespace correction applied to the summarizer inputs, matching the preprocessing used when
/// fine-tuning the XLSum model: the text is trimmed, runs of newlines are replaced by a single
/// space and any remaining run of whitespace is collapsed into a single space.
///
/// ```
/// use summatrans::pipelines::summarization::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  A\n\nB \t C  "), "A B C");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    let text = NEWLINES.replace_all(text.trim(), " ");
    WHITESPACES.replace_all(&text, " ").into_owned()
}

/// # Configuration for the summarizer
/// Config and vocabulary default to the mT5 XLSum checkpoint, generation parameters to the values
/// recommended for this checkpoint. The converted weights have no default location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Converted model weights resource (required)
    pub model_resource: Option<ResourceLocation>,
    /// Config resource (default: mT5 XLSum)
    pub config_resource: ResourceLocation,
    /// Sentencepiece vocabulary resource (default: mT5 XLSum)
    pub vocab_resource: ResourceLocation,
    /// Minimum summary length (default: 0)
    pub min_length: i64,
    /// Maximum summary length (default: 84)
    pub max_length: i64,
    /// Number of beams for beam search (default: 4)
    pub num_beams: i64,
    /// Number of allowed repetitions of n-grams. Values higher than 0 turn on this feature (default: 2)
    pub no_repeat_ngram_size: i64,
    /// Early stopping flag indicating if the beam search should stop as soon as `num_beam` hypotheses have been generated (default: false)
    pub early_stopping: bool,
}

impl Default for SummarizerConfig {
    fn default() -> SummarizerConfig {
        SummarizerConfig {
            model_resource: None,
            config_resource: ResourceLocation::from_pretrained(
                XLSumConfigResources::MT5_MULTILINGUAL_XLSUM,
            ),
            vocab_resource: ResourceLocation::from_pretrained(
                XLSumVocabResources::MT5_MULTILINGUAL_XLSUM,
            ),
            min_length: 0,
            max_length: 84,
            num_beams: 4,
            no_repeat_ngram_size: 2,
            early_stopping: false,
        }
    }
}

impl SummarizerConfig {
    /// Generation settings for the T5 generator. Fails if no weights were configured.
    pub fn to_generate_config(&self, device: Device) -> Result<GenerateConfig, DemoError> {
        let model_resource = self.model_resource.as_ref().ok_or_else(|| {
            DemoError::InvalidConfigurationError(
                "summarizer.model_resource is not set, the mT5 XLSum weights must be converted to \
rust_model.ot and configured as a local path"
                    .to_string(),
            )
        })?;
        Ok(GenerateConfig {
            model_type: ModelType::T5,
            model_resource: ModelResource::Torch(model_resource.to_provider()),
            config_resource: self.config_resource.to_provider(),
            vocab_resource: self.vocab_resource.to_provider(),
            merges_resource: None,
            min_length: self.min_length,
            max_length: Some(self.max_length),
            do_sample: false,
            early_stopping: self.early_stopping,
            num_beams: self.num_beams,
            no_repeat_ngram_size: self.no_repeat_ngram_size,
            num_return_sequences: 1,
            device,
            ..Default::default()
        })
    }
}

/// # Sequence generation backing the summarizer
/// Receives the normalized units exactly as they are fed to the model.
pub trait SummaryGenerator: Send {
    fn generate_summaries(&self, inputs: &[&str]) -> Result<Vec<String>, DemoError>;
}

impl SummaryGenerator for T5Generator {
    fn generate_summaries(&self, inputs: &[&str]) -> Result<Vec<String>, DemoError> {
        let outputs = LanguageGenerator::generate(self, Some(inputs), None)?;
        Ok(outputs.into_iter().map(|output| output.text).collect())
    }
}

/// # Summarizer adapter
/// Normalizes the whitespace of one text unit at a time and summarizes it with the mT5 generator.
pub struct Summarizer {
    generator: Box<dyn SummaryGenerator>,
}

impl Summarizer {
    /// Build a new `Summarizer`, downloading the config and vocabulary if needed.
    ///
    /// # Arguments
    ///
    /// * `config` - `SummarizerConfig` object containing the resource references and generation options
    /// * `device` - `Device` to place the model on
    pub fn new(config: &SummarizerConfig, device: Device) -> Result<Summarizer, DemoError> {
        let generate_config = config.to_generate_config(device)?;
        if let Some(model_resource) = &config.model_resource {
            log::info!(
                "loading summarization model from {} on {:?}",
                model_resource,
                device
            );
        }
        let generator = T5Generator::new(generate_config)?;
        Ok(Summarizer::from_generator(Box::new(generator)))
    }

    /// Build a `Summarizer` on top of an existing generator.
    pub fn from_generator(generator: Box<dyn SummaryGenerator>) -> Summarizer {
        Summarizer { generator }
    }
}

impl TextPipeline for Summarizer {
    fn name(&self) -> &str {
        "summarizer"
    }

    fn process(&self, text: &str) -> Result<String, DemoError> {
        let text = normalize_whitespace(text);
        let outputs = self.generator.generate_summaries(&[text.as_str()])?;
        first_output(self.name(), outputs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn whitespace_normalization() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n\n "), "");
        assert_eq!(
            normalize_whitespace("First line\nsecond line\n\n\nthird   line\r\n"),
            "First line second line third line"
        );
        assert_eq!(
            normalize_whitespace("مرحبا\n\nبالعالم"),
            "مرحبا بالعالم"
        );
    }

    #[test]
    fn default_config_targets_xlsum_checkpoint() {
        let config = SummarizerConfig::default();
        assert_eq!(
            config.config_resource,
            ResourceLocation::from_pretrained(XLSumConfigResources::MT5_MULTILINGUAL_XLSUM)
        );
        assert_eq!(config.max_length, 84);
        assert_eq!(config.num_beams, 4);
        assert_eq!(config.no_repeat_ngram_size, 2);
    }

    #[test]
    fn missing_weights_are_a_configuration_error() {
        let config = SummarizerConfig::default();
        assert!(matches!(
            config.to_generate_config(Device::Cpu),
            Err(DemoError::InvalidConfigurationError(_))
        ));
        assert!(matches!(
            Summarizer::new(&config, Device::Cpu),
            Err(DemoError::InvalidConfigurationError(_))
        ));
    }

    #[test]
    fn configured_weights_build_generation_settings() -> anyhow::Result<()> {
        let config = SummarizerConfig {
            model_resource: Some(ResourceLocation::local("/models/mt5/rust_model.ot")),
            ..Default::default()
        };
        let generate_config = config.to_generate_config(Device::Cpu)?;
        assert_eq!(generate_config.max_length, Some(84));
        assert_eq!(generate_config.num_beams, 4);
        assert_eq!(generate_config.no_repeat_ngram_size, 2);
        assert!(!generate_config.do_sample);
        Ok(())
    }

    /// Returns its inputs unchanged
    struct Echo {
        inputs: Arc<Mutex<Vec<String>>>,
    }

    impl SummaryGenerator for Echo {
        fn generate_summaries(&self, inputs: &[&str]) -> Result<Vec<String>, DemoError> {
            let mut seen = self.inputs.lock().unwrap();
            seen.extend(inputs.iter().map(|input| input.to_string()));
            Ok(inputs.iter().map(|input| input.to_string()).collect())
        }
    }

    #[test]
    fn generator_receives_normalized_text_without_prefix() -> anyhow::Result<()> {
        let inputs = Arc::new(Mutex::new(Vec::new()));
        let summarizer = Summarizer::from_generator(Box::new(Echo {
            inputs: inputs.clone(),
        }));

        let output = summarizer.process("  الخبر\n\nالأول   هنا \n")?;

        assert_eq!(output, "الخبر الأول هنا");
        assert_eq!(*inputs.lock().unwrap(), vec!["الخبر الأول هنا".to_string()]);
        Ok(())
    }

    /// Produces no sequence
    struct Silent;

    impl SummaryGenerator for Silent {
        fn generate_summaries(&self, _inputs: &[&str]) -> Result<Vec<String>, DemoError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn missing_generation_is_an_error() {
        let summarizer = Summarizer::from_generator(Box::new(Silent));
        assert!(matches!(
            summarizer.process("text"),
            Err(DemoError::EmptyOutputError(_))
        ));
    }

    #[test]
    fn xlsum_language_table_is_sorted_by_sample_count() {
        let counts = XLSumLanguages::TRAINING_SAMPLES
            .iter()
            .map(|(_, count)| *count)
            .collect::<Vec<_>>();
        assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(XLSumLanguages::TRAINING_SAMPLES[0].0, "English");
    }

    #[test]
    #[ignore] // no need to run, compilation is enough to verify it is Send
    fn test() {
        let config = SummarizerConfig {
            model_resource: Some(ResourceLocation::local("rust_model.ot")),
            ..Default::default()
        };
        let summarizer = Summarizer::new(&config, Device::Cpu);
        let _: Box<dyn Send> = Box::new(summarizer);
    }
}
