//! The step-by-step name finding flow.
//!
//! A [`Session`] is an owned value: every transition consumes it and hands
//! back the next one, so a shell (web, terminal or a test) holds exactly one
//! copy and nothing else can change it behind its back.

use tracing::{debug, info, warn};

use crate::error::SuggestionError;
use crate::models::{Gender, NameSuggestion, Preferences, SuggestionRequest};
use crate::service::SuggestionService;

/// One of the six data collection stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Gender,
    StartingLetter,
    MotherTongue,
    FatherName,
    MotherName,
    DesiredMeaning,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Gender,
        Step::StartingLetter,
        Step::MotherTongue,
        Step::FatherName,
        Step::MotherName,
        Step::DesiredMeaning,
    ];

    pub const FIRST: Step = Step::Gender;
    pub const LAST: Step = Step::DesiredMeaning;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Step> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Question shown for this step.
    pub fn label(self) -> &'static str {
        match self {
            Step::Gender => "Is your little star a...",
            Step::StartingLetter => "Any special first letter in mind?",
            Step::MotherTongue => "Which language sings in your family?",
            Step::FatherName => "What's daddy's name?",
            Step::MotherName => "And mommy's name?",
            Step::DesiredMeaning => "Any special meaning you're looking for?",
        }
    }

    pub fn hint(self) -> Option<&'static str> {
        match self {
            Step::Gender => Some("Little Prince (male) or Little Princess (female)"),
            Step::StartingLetter => Some("Leave empty if you're open to any letter"),
            Step::MotherTongue => Some("E.g., Hindi, Tamil, Bengali, or any other language"),
            Step::DesiredMeaning => {
                Some("Optional, but might inspire some magical names! e.g., strength, love, wisdom")
            }
            Step::FatherName | Step::MotherName => None,
        }
    }

    /// Preference field this step edits, as named on the wire.
    pub fn field(self) -> &'static str {
        match self {
            Step::Gender => "gender",
            Step::StartingLetter => "startingLetter",
            Step::MotherTongue => "motherTongue",
            Step::FatherName => "fatherName",
            Step::MotherName => "motherName",
            Step::DesiredMeaning => "desiredMeaning",
        }
    }

    /// Store `input` in the field this step edits.
    ///
    /// Returns `false` only when a gender answer can't be understood.
    pub fn apply(self, preferences: &mut Preferences, input: &str) -> bool {
        let value = input.trim().to_string();
        match self {
            Step::Gender => match Gender::from_input(input) {
                Some(gender) => preferences.gender = gender,
                None => return false,
            },
            Step::StartingLetter => preferences.set_starting_letter(input),
            Step::MotherTongue => preferences.mother_tongue = value,
            Step::FatherName => preferences.father_name = value,
            Step::MotherName => preferences.mother_name = value,
            Step::DesiredMeaning => preferences.desired_meaning = value,
        }
        true
    }
}

/// Which kind of generation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    Initial,
    More,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collecting { step: Step },
    Generating { round: Round },
    Reviewing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    phase: Phase,
    preferences: Preferences,
    suggestions: Vec<NameSuggestion>,
    feedback: String,
}

/// Result of finishing a generation: the next session and, on failure, the
/// reason to show the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: Session,
    pub notice: Option<SuggestionError>,
}

impl Transition {
    fn quiet(session: Session) -> Self {
        Self {
            session,
            notice: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Collecting { step: Step::FIRST },
            preferences: Preferences::default(),
            suggestions: Vec::new(),
            feedback: String::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    pub fn suggestions(&self) -> &[NameSuggestion] {
        &self.suggestions
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn set_feedback(&mut self, feedback: impl Into<String>) {
        self.feedback = feedback.into();
    }

    /// Move forward one step; from the last step this starts the first
    /// generation. Ignored outside the collecting phase.
    pub fn next(mut self) -> Self {
        if let Phase::Collecting { step } = self.phase {
            self.phase = match step.next() {
                Some(next) => Phase::Collecting { step: next },
                None => Phase::Generating {
                    round: Round::Initial,
                },
            };
            debug!(phase = ?self.phase, "Session moved forward");
        }
        self
    }

    /// Move back one step. No-op on the first step and outside collection.
    pub fn back(mut self) -> Self {
        if let Phase::Collecting { step } = self.phase {
            if let Some(previous) = step.previous() {
                self.phase = Phase::Collecting { step: previous };
            }
        }
        self
    }

    /// Ask for another round. Only meaningful while reviewing.
    pub fn generate_more(mut self) -> Self {
        if self.phase == Phase::Reviewing {
            self.phase = Phase::Generating { round: Round::More };
        }
        self
    }

    /// Clear everything and go back to the first step, from any phase.
    pub fn start_over(self) -> Self {
        info!("Session started over");
        Self::new()
    }

    /// Request to send while generating, `None` otherwise.
    ///
    /// The first round never carries history or feedback.
    pub fn pending_request(&self) -> Option<SuggestionRequest> {
        match self.phase {
            Phase::Generating {
                round: Round::Initial,
            } => Some(SuggestionRequest {
                preferences: self.preferences.clone(),
                previous_names: Vec::new(),
                feedback: String::new(),
            }),
            Phase::Generating { round: Round::More } => Some(SuggestionRequest {
                preferences: self.preferences.clone(),
                previous_names: self.suggestions.clone(),
                feedback: self.feedback.clone(),
            }),
            _ => None,
        }
    }

    /// Apply the outcome of a generation.
    ///
    /// Nothing from a failed round is kept. An empty first round counts as
    /// [`SuggestionError::NoNamesGenerated`].
    pub fn complete(mut self, result: Result<Vec<NameSuggestion>, SuggestionError>) -> Transition {
        let round = match self.phase {
            Phase::Generating { round } => round,
            _ => return Transition::quiet(self),
        };

        let result = match (round, result) {
            (Round::Initial, Ok(names)) if names.is_empty() => {
                Err(SuggestionError::NoNamesGenerated)
            }
            (_, result) => result,
        };

        match (round, result) {
            (Round::Initial, Ok(names)) => {
                self.suggestions = names;
                self.feedback.clear();
                self.phase = Phase::Reviewing;
                Transition::quiet(self)
            }
            (Round::More, Ok(names)) => {
                self.suggestions.extend(names);
                self.feedback.clear();
                self.phase = Phase::Reviewing;
                Transition::quiet(self)
            }
            (Round::Initial, Err(e)) => {
                warn!(error = %e, "First round of names failed");
                self.phase = Phase::Collecting { step: Step::LAST };
                Transition {
                    session: self,
                    notice: Some(e),
                }
            }
            (Round::More, Err(e)) => {
                warn!(error = %e, "Generating more names failed");
                self.phase = Phase::Reviewing;
                Transition {
                    session: self,
                    notice: Some(e),
                }
            }
        }
    }

    /// Run the pending generation, if any, to completion and apply it.
    pub async fn run_generation(self, service: &SuggestionService) -> Transition {
        match self.pending_request() {
            Some(request) => {
                let result = service.suggest(&request).await;
                self.complete(result)
            }
            None => Transition::quiet(self),
        }
    }
}
