#[cfg(test)]
#[path = "fallback_test.rs"]
mod tests;

/// Canned Socratic questions served when the model backend is
/// unavailable. Total over any input.
pub fn fallback_question(subject: &str) -> &'static str {
    match subject.trim().to_lowercase().as_str() {
        "python" => {
            "What do you think this Python function should return? Walk me through your reasoning."
        }
        "physics" => "What forces do you think are acting in this situation?",
        "mathematics" => "What patterns do you notice in this equation?",
        "chemistry" => "What do you think is happening at the molecular level?",
        _ => "That's an interesting observation! What makes you think that's the case?",
    }
}
