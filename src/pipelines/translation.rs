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

//! # Translation to English
//!
//! Translates a text unit from a fixed source language to English with Facebook's M2M100 (418M)
//! many-to-many translation model. The source language is given as an ISO 639-1 code (for
//! example `"ar"`) or as a language name (`"Arabic"`) and must be one of the languages supported
//! by M2M100.
//!
//! ```no_run
//! use summatrans::pipelines::common::TextPipeline;
//! use summatrans::pipelines::translation::{Translator, TranslatorConfig};
//! use tch::Device;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = TranslatorConfig {
//!         source_language: "fr".to_string(),
//!         ..Default::default()
//!     };
//!     let translator = Translator::new(&config, Device::Cpu)?;
//!     println!("{}", translator.process("Le chien ne s'est pas réveillé.")?);
//!     Ok(())
//! }
//! ```

use crate::common::error::DemoError;
use crate::common::resources::ResourceLocation;
use crate::pipelines::common::{first_output, TextPipeline};
use rust_bert::m2m_100::{
    M2M100ConfigResources, M2M100MergesResources, M2M100ModelResources, M2M100SourceLanguages,
    M2M100VocabResources,
};
use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::translation::{Language, TranslationConfig, TranslationModel};
use serde::{Deserialize, Serialize};
use tch::Device;

/// Resolves a source language supported by M2M100 from its ISO 639-1 code or its name
/// (case-insensitive).
///
/// ```
/// use rust_bert::pipelines::translation::Language;
/// use summatrans::pipelines::translation::resolve_source_language;
///
/// assert_eq!(resolve_source_language("ar").unwrap(), Language::Arabic);
/// assert_eq!(resolve_source_language("Arabic").unwrap(), Language::Arabic);
/// assert!(resolve_source_language("tlh").is_err());
/// ```
pub fn resolve_source_language(code_or_name: &str) -> Result<Language, DemoError> {
    let query = code_or_name.trim();
    M2M100SourceLanguages::M2M100_418M
        .iter()
        .find(|language| {
            language
                .get_iso_639_1_code()
                .is_some_and(|code| code.eq_ignore_ascii_case(query))
                || language.to_string().eq_ignore_ascii_case(query)
        })
        .copied()
        .ok_or_else(|| {
            DemoError::UnsupportedLanguageError(format!(
                "{} is not a source language supported by M2M100",
                code_or_name
            ))
        })
}

/// # Configuration for the translator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Model weights resource (default: M2M100 418M)
    pub model_resource: ResourceLocation,
    /// Config resource (default: M2M100 418M)
    pub config_resource: ResourceLocation,
    /// Vocab resource (default: M2M100 418M)
    pub vocab_resource: ResourceLocation,
    /// Sentencepiece model resource (default: M2M100 418M)
    pub merges_resource: ResourceLocation,
    /// Language of the text to translate, ISO 639-1 code or name (default: ar)
    pub source_language: String,
    /// Maximum translation length (default: 200)
    pub max_length: i64,
    /// Number of beams for beam search (default: 5)
    pub num_beams: i64,
}

impl Default for TranslatorConfig {
    fn default() -> TranslatorConfig {
        TranslatorConfig {
            model_resource: ResourceLocation::from_pretrained(M2M100ModelResources::M2M100_418M),
            config_resource: ResourceLocation::from_pretrained(
                M2M100ConfigResources::M2M100_418M,
            ),
            vocab_resource: ResourceLocation::from_pretrained(M2M100VocabResources::M2M100_418M),
            merges_resource: ResourceLocation::from_pretrained(
                M2M100MergesResources::M2M100_418M,
            ),
            source_language: "ar".to_string(),
            max_length: 200,
            num_beams: 5,
        }
    }
}

/// # Translator adapter
/// Wraps a `rust-bert` M2M100 translation model translating from the configured source language
/// to English.
pub struct Translator {
    model: TranslationModel,
    source_language: Language,
}

impl Translator {
    /// Build a new `Translator`, downloading the model resources if needed. Fails early if the
    /// configured source language is not supported by the model.
    ///
    /// # Arguments
    ///
    /// * `config` - `TranslatorConfig` object containing the resource references, source language and generation options
    /// * `device` - `Device` to place the model on
    pub fn new(config: &TranslatorConfig, device: Device) -> Result<Translator, DemoError> {
        let source_language = resolve_source_language(&config.source_language)?;
        log::info!(
            "loading translation model ({} to {}) from {} on {:?}",
            source_language,
            Language::English,
            config.model_resource,
            device
        );

        let mut translation_config = TranslationConfig::new(
            ModelType::M2M100,
            ModelResource::Torch(config.model_resource.to_provider()),
            config.config_resource.to_provider(),
            config.vocab_resource.to_provider(),
            Some(config.merges_resource.to_provider()),
            [source_language],
            [Language::English],
            device,
        );
        translation_config.max_length = Some(config.max_length);
        translation_config.num_beams = config.num_beams;

        let model = TranslationModel::new(translation_config)?;
        Ok(Translator {
            model,
            source_language,
        })
    }

    pub fn source_language(&self) -> Language {
        self.source_language
    }
}

impl TextPipeline for Translator {
    fn name(&self) -> &str {
        "translator"
    }

    fn process(&self, text: &str) -> Result<String, DemoError> {
        let outputs = self
            .model
            .translate(&[text], self.source_language, Language::English)?;
        first_output(self.name(), outputs)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolves_codes_and_names() -> anyhow::Result<()> {
        assert_eq!(resolve_source_language("ar")?, Language::Arabic);
        assert_eq!(resolve_source_language("AR")?, Language::Arabic);
        assert_eq!(resolve_source_language(" fr ")?, Language::French);
        assert_eq!(resolve_source_language("spanish")?, Language::Spanish);
        Ok(())
    }

    #[test]
    fn rejects_unknown_languages() {
        assert!(matches!(
            resolve_source_language("xx"),
            Err(DemoError::UnsupportedLanguageError(_))
        ));
        assert!(resolve_source_language("").is_err());
    }

    #[test]
    fn default_config_translates_arabic_with_m2m100() {
        let config = TranslatorConfig::default();
        assert_eq!(config.source_language, "ar");
        assert_eq!(
            config.model_resource,
            ResourceLocation::from_pretrained(M2M100ModelResources::M2M100_418M)
        );
    }

    #[test]
    fn unsupported_language_fails_before_loading() {
        let config = TranslatorConfig {
            source_language: "klingon".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            Translator::new(&config, Device::Cpu),
            Err(DemoError::UnsupportedLanguageError(_))
        ));
    }
}
