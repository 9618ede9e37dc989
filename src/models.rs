use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender the parents are choosing a name for.
///
/// The web form sends an empty string until a choice is made, so `""` is
/// accepted as [`Gender::Unspecified`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(alias = "")]
    Unspecified,
}

impl Gender {
    /// Lenient parse used by the terminal shell and CLI flags.
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "male" | "m" | "boy" | "prince" => Some(Gender::Male),
            "female" | "f" | "girl" | "princess" => Some(Gender::Female),
            "" | "unspecified" | "any" | "either" => Some(Gender::Unspecified),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub gender: Gender,
    pub starting_letter: String,
    pub mother_tongue: String,
    pub father_name: String,
    pub mother_name: String,
    pub desired_meaning: String,
}

impl Preferences {
    /// Keeps only the first non-whitespace character, mirroring the one
    /// character input box of the form.
    pub fn set_starting_letter(&mut self, input: &str) {
        self.starting_letter = input.trim().chars().next().map(String::from).unwrap_or_default();
    }
}

/// One name returned by the model. Only ever built by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSuggestion {
    pub name: String,
    pub meaning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub preferences: Preferences,
    // Only used to tell the model what not to repeat.
    #[serde(default)]
    pub previous_names: Vec<NameSuggestion>,
    #[serde(default)]
    pub feedback: String,
}
