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

//! # Text splitting
//!
//! Divides an input text into units that are summarized independently. The splitting policy is
//! given by a `SplitMode`:
//! - `None`: the whole text is a single unit
//! - `Sentence`: split on `". "`, every unit is terminated by a period
//! - `Newline`: split on `"\n"`
//! - `Paragraph`: split on `"\n\n"` (default)
//!
//! ```
//! use summatrans::pipelines::splitting::{split_text, SplitMode};
//!
//! let units = split_text("First point. Second point.", SplitMode::Sentence);
//! assert_eq!(units, vec!["First point.", "Second point."]);
//! ```

use crate::common::error::DemoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// # Policy used to divide a text into units
pub enum SplitMode {
    None,
    Sentence,
    Newline,
    #[default]
    Paragraph,
}

impl SplitMode {
    /// All split modes, in the order they are offered to the user
    pub const ALL: [SplitMode; 4] = [
        SplitMode::Sentence,
        SplitMode::Newline,
        SplitMode::Paragraph,
        SplitMode::None,
    ];

    /// Delimiter associated with the mode, `None` for the identity split
    pub fn delimiter(&self) -> Option<&'static str> {
        match self {
            SplitMode::None => None,
            SplitMode::Sentence => Some(". "),
            SplitMode::Newline => Some("\n"),
            SplitMode::Paragraph => Some("\n\n"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SplitMode::None => "None",
            SplitMode::Sentence => "Sentence",
            SplitMode::Newline => "Newline",
            SplitMode::Paragraph => "Paragraph",
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SplitMode {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SplitMode::ALL
            .iter()
            .find(|mode| mode.name() == s)
            .copied()
            .ok_or_else(|| {
                DemoError::InvalidInputError(format!(
                    "split mode must be one of {:?}, got {}",
                    SplitMode::ALL.iter().map(SplitMode::name).collect::<Vec<_>>(),
                    s
                ))
            })
    }
}

/// Splits a text into units according to the given mode.
///
/// Splitting is a plain delimiter split: a text containing `n` delimiters yields `n + 1` units,
/// including empty units for leading, trailing or repeated delimiters. In `Sentence` mode the
/// period consumed by the delimiter is restored on non-blank units, without doubling an existing
/// final period.
///
/// # Arguments
///
/// * `text` - text to split
/// * `split_mode` - `SplitMode` policy to apply
///
/// # Returns
///
/// * `Vec<String>` text units, in input order
pub fn split_text(text: &str, split_mode: SplitMode) -> Vec<String> {
    match split_mode.delimiter() {
        None => vec![text.to_string()],
        Some(delimiter) => {
            let units = text.split(delimiter);
            if split_mode == SplitMode::Sentence {
                units
                    .map(|unit| {
                        if unit.trim().is_empty() || unit.ends_with('.') {
                            unit.to_string()
                        } else {
                            format!("{}.", unit)
                        }
                    })
                    .collect()
            } else {
                units.map(str::to_string).collect()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn none_mode_keeps_text_whole() {
        let text = "One. Two.\n\nThree";
        assert_eq!(split_text(text, SplitMode::None), vec![text.to_string()]);
    }

    #[test]
    fn unit_count_follows_delimiter_count() {
        let text = "a. b. c\nd\n\ne";
        assert_eq!(split_text(text, SplitMode::Sentence).len(), 3);
        assert_eq!(split_text(text, SplitMode::Newline).len(), 4);
        assert_eq!(split_text(text, SplitMode::Paragraph).len(), 2);
        assert_eq!(split_text(text, SplitMode::None).len(), 1);
    }

    #[test]
    fn paragraph_split() {
        let units = split_text("first\nstill first\n\nsecond", SplitMode::Paragraph);
        assert_eq!(units, vec!["first\nstill first", "second"]);
    }

    #[test]
    fn sentence_split_restores_periods() {
        let units = split_text("The cat sat. The dog ran. Birds sang", SplitMode::Sentence);
        assert_eq!(units, vec!["The cat sat.", "The dog ran.", "Birds sang."]);
    }

    #[test]
    fn sentence_split_does_not_double_final_period() {
        let units = split_text("One. Two.", SplitMode::Sentence);
        assert_eq!(units, vec!["One.", "Two."]);
    }

    #[test]
    fn empty_text_yields_single_empty_unit() {
        assert_eq!(split_text("", SplitMode::Paragraph), vec![String::new()]);
        assert_eq!(split_text("", SplitMode::Sentence), vec![String::new()]);
        assert_eq!(split_text("", SplitMode::None), vec![String::new()]);
    }

    #[test]
    fn trailing_delimiter_yields_empty_unit() {
        let units = split_text("line one\nline two\n", SplitMode::Newline);
        assert_eq!(units, vec!["line one", "line two", ""]);
    }

    #[test]
    fn split_mode_round_trips_through_names() -> anyhow::Result<()> {
        for mode in SplitMode::ALL {
            assert_eq!(mode.to_string().parse::<SplitMode>()?, mode);
        }
        assert!("Chapter".parse::<SplitMode>().is_err());
        assert_eq!(SplitMode::default(), SplitMode::Paragraph);
        Ok(())
    }
}
