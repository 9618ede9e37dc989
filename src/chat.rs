// Terminal rendition of the name finder.
// Walks the same Session the web UI mirrors, one line of input per step.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::info;

use crate::service::SuggestionService;
use crate::session::{Phase, Session};

const BACK: &str = "/back";
const RESTART: &str = "/restart";
const QUIT: &str = "/quit";

/// Run the chat on stdin/stdout until the user quits or input ends.
pub async fn run_interactive_chat(service: &SuggestionService) -> Result<Session> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_chat(service, stdin.lock(), stdout.lock()).await
}

/// Drive a session from `input`, writing prompts and results to `output`.
///
/// Returns the session as it stood when the conversation ended.
pub async fn run_chat<R: BufRead, W: Write>(
    service: &SuggestionService,
    mut input: R,
    mut output: W,
) -> Result<Session> {
    info!("Starting name finder chat...");
    writeln!(
        output,
        "Let's find a name for your little one! ({BACK}, {RESTART} and {QUIT} work at any prompt)"
    )?;

    let mut session = Session::new();
    loop {
        match session.phase() {
            Phase::Collecting { step } => {
                writeln!(output, "\n{}", step.label())?;
                if let Some(hint) = step.hint() {
                    writeln!(output, "  ({hint})")?;
                }
                write!(output, "> ")?;
                output.flush()?;

                let Some(line) = read_line(&mut input)? else {
                    break;
                };
                match line.trim() {
                    QUIT => break,
                    RESTART => session = session.start_over(),
                    BACK => session = session.back(),
                    answer => {
                        if step.apply(session.preferences_mut(), answer) {
                            session = session.next();
                        } else {
                            writeln!(output, "Please answer male, female, or leave it empty.")?;
                        }
                    }
                }
            }
            Phase::Generating { .. } => {
                writeln!(output, "\nGenerating...")?;
                output.flush()?;
                let transition = session.run_generation(service).await;
                if let Some(notice) = transition.notice {
                    writeln!(output, "{}", notice.notice())?;
                }
                session = transition.session;
            }
            Phase::Reviewing => {
                writeln!(output)?;
                for (i, suggestion) in session.suggestions().iter().enumerate() {
                    writeln!(output, "{}. {} - {}", i + 1, suggestion.name, suggestion.meaning)?;
                }
                writeln!(
                    output,
                    "\nAny feedback on these names? Press Enter to generate more, or type {RESTART} / {QUIT}."
                )?;
                write!(output, "> ")?;
                output.flush()?;

                let Some(line) = read_line(&mut input)? else {
                    break;
                };
                match line.trim() {
                    QUIT => break,
                    RESTART => session = session.start_over(),
                    feedback => {
                        session.set_feedback(feedback);
                        session = session.generate_more();
                    }
                }
            }
        }
    }

    info!(
        suggestions = session.suggestions().len(),
        "Name finder chat finished."
    );
    Ok(session)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from input")?;
    Ok((read > 0).then_some(line))
}
