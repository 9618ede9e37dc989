use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use baby_name_finder::chat::run_chat;
use baby_name_finder::{
    Gender, Phase, Session, Step, SuggestionError, SuggestionService, TextGenerator,
};

// Hands out scripted replies in order; `None` entries fail the call.
struct ScriptedGenerator {
    replies: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Some(reply)) => Ok(reply),
            _ => Err(anyhow!("provider unavailable")),
        }
    }
}

fn scripted(replies: &[Option<&str>]) -> (SuggestionService, Arc<ScriptedGenerator>) {
    let generator = Arc::new(ScriptedGenerator {
        replies: Mutex::new(replies.iter().map(|r| r.map(str::to_string)).collect()),
        prompts: Mutex::new(Vec::new()),
    });
    (SuggestionService::new(generator.clone()), generator)
}

fn filled_session() -> Session {
    let mut session = Session::new();
    for (step, answer) in Step::ALL.iter().zip(["female", "M", "Marathi", "Sunil", "Asha", "light"]) {
        assert!(step.apply(session.preferences_mut(), answer));
        session = session.next();
    }
    session
}

#[test_log::test(tokio::test)]
async fn test_full_round_trip_appends_across_rounds() {
    let (service, generator) = scripted(&[
        Some("1. Mira - Ocean\n2. Meghna - River"),
        Some("1. Manasi - Of the mind\n2. Madhavi - Spring"),
    ]);

    let session = filled_session();
    assert_eq!(session.phase(), Phase::Generating { round: baby_name_finder::Round::Initial });

    let transition = session.run_generation(&service).await;
    assert!(transition.notice.is_none());
    let mut session = transition.session;
    assert_eq!(session.phase(), Phase::Reviewing);
    assert_eq!(session.suggestions().len(), 2);

    session.set_feedback("three syllables");
    let transition = session.generate_more().run_generation(&service).await;
    assert!(transition.notice.is_none());
    let session = transition.session;

    let names: Vec<&str> = session.suggestions().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Mira", "Meghna", "Manasi", "Madhavi"]);
    assert_eq!(session.feedback(), "");

    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("(do not repeat these): \n"));
    assert!(prompts[1].contains("(do not repeat these): Mira, Meghna\n"));
    assert!(prompts[1].contains("User feedback: three syllables"));
}

#[test_log::test(tokio::test)]
async fn test_failed_first_round_leaves_last_step() {
    let (service, _) = scripted(&[None]);

    let session = filled_session();
    let before = session.preferences().clone();

    let transition = session.run_generation(&service).await;
    assert_eq!(transition.notice, Some(SuggestionError::GenerationFailed));
    assert_eq!(transition.session.phase(), Phase::Collecting { step: Step::LAST });
    assert_eq!(transition.session.preferences(), &before);
    assert!(transition.session.suggestions().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_run_generation_outside_generating_does_not_call_out() {
    let (service, generator) = scripted(&[Some("1. X - Y")]);

    let transition = Session::new().run_generation(&service).await;
    assert_eq!(transition.session, Session::new());
    assert!(transition.notice.is_none());
    assert!(generator.prompts.lock().unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_chat_walks_steps_and_generates_more() {
    let (service, generator) = scripted(&[
        Some("1. Aarav - One who is peaceful\n2. Arjun - Bright"),
        None,
        Some("1. Advait - Unique"),
    ]);

    let input = [
        "robot",   // rejected gender
        "boy",
        "A",
        "/back",   // back to the letter step
        "Arnav",   // only the first letter is kept
        "Hindi",
        "Rahul",
        "Sita",
        "",        // no particular meaning
        "shorter", // feedback, this round fails
        "shorter", // feedback again
        "/quit",
    ]
    .join("\n");
    let mut output = Vec::new();

    let session = run_chat(&service, Cursor::new(input), &mut output).await.unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Please answer male, female, or leave it empty."));
    assert!(transcript.contains("couldn't generate names at this time"));
    assert!(transcript.contains("3. Advait - Unique"));

    assert_eq!(session.phase(), Phase::Reviewing);
    assert_eq!(session.preferences().gender, Gender::Male);
    assert_eq!(session.preferences().starting_letter, "A");
    assert_eq!(session.preferences().mother_tongue, "Hindi");
    assert_eq!(session.suggestions().len(), 3);

    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[2].contains("(do not repeat these): Aarav, Arjun"));
    assert!(prompts[2].contains("User feedback: shorter"));
}

#[test_log::test(tokio::test)]
async fn test_chat_restart_clears_everything() {
    let (service, generator) = scripted(&[Some("1. Ira - Earth")]);

    let input = ["female", "I", "", "", "", "", "/restart", "male"].join("\n");
    let mut output = Vec::new();

    // Input ends on the second step of a fresh session.
    let session = run_chat(&service, Cursor::new(input), &mut output).await.unwrap();

    assert_eq!(session.phase(), Phase::Collecting { step: Step::StartingLetter });
    assert_eq!(session.preferences().gender, Gender::Male);
    assert!(session.suggestions().is_empty());
    assert_eq!(generator.prompts.lock().unwrap().len(), 1);
}
