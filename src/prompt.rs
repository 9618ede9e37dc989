use crate::models::SuggestionRequest;

/// Number of names asked for in every round.
pub const NAMES_PER_ROUND: usize = 5;

/// Render the instruction sent to the model.
///
/// Never fails and never validates: empty preferences show up as empty values.
pub fn build_prompt(request: &SuggestionRequest) -> String {
    let prefs = &request.preferences;
    let previous_names = request
        .previous_names
        .iter()
        .map(|suggestion| suggestion.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Generate {count} unique Indian baby names based on the following preferences:
Gender: {gender}
Starting Letter (if any): {starting_letter}
Mother Tongue: {mother_tongue}
Father's Name: {father_name}
Mother's Name: {mother_name}
Desired Meaning (if any): {desired_meaning}

Previously generated names (do not repeat these): {previous_names}

User feedback: {feedback}

Please take into account the user's feedback when generating new names.

Please provide the names in the following format:
1. [Name] - [Meaning]
2. [Name] - [Meaning]
..."#,
        count = NAMES_PER_ROUND,
        gender = prefs.gender,
        starting_letter = prefs.starting_letter,
        mother_tongue = prefs.mother_tongue,
        father_name = prefs.father_name,
        mother_name = prefs.mother_name,
        desired_meaning = prefs.desired_meaning,
        previous_names = previous_names,
        feedback = request.feedback,
    )
}
