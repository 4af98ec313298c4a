//! Prompt construction for technology classification

use harvester_domain::TechLabel;

/// System instruction sent with every classification request
pub const SYSTEM_PROMPT: &str = "You are a precise, conservative classifier. \
Given an incident description, answer with EXACTLY ONE WORD that is one of the allowed labels. \
Do not add any other text.";

const RULES: &str = "Rules:
- Reply with exactly one word from the allowed labels.
- No punctuation, no quotes, no explanations.
- If uncertain, pick the closest label.";

/// Build the user prompt for `text`
///
/// Lists every allowed label, then the rules, then the issue text.
pub fn build_prompt(text: &str) -> String {
    let labels: Vec<&str> = TechLabel::ALL.iter().map(|l| l.as_str()).collect();

    let mut prompt = String::new();
    prompt.push_str("Allowed labels: ");
    prompt.push_str(&labels.join(", "));
    prompt.push_str("\n\n");
    prompt.push_str(RULES);
    prompt.push_str("\n\nTEXT:\n");
    prompt.push_str(text);
    prompt
}

/// Cut `text` to at most `max_chars` characters on a char boundary
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
