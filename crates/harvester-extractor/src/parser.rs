//! Parse LLM replies into labels

use harvester_domain::traits::ClassifyError;
use harvester_domain::TechLabel;

/// Parse a raw LLM reply into a [`TechLabel`]
///
/// Only the first word counts. Quotes and backticks wrapping the whole reply
/// are ignored, and case does not matter. Any other punctuation stays part of
/// the word, so `storage.` is [`ClassifyError::OutOfSet`] like any other
/// unknown word; a reply is never mapped to a "closest" label.
///
/// # Examples
///
/// ```
/// use harvester_domain::TechLabel;
/// use harvester_extractor::parse_label;
///
/// assert_eq!(parse_label("  `Database`\n").unwrap(), TechLabel::Database);
/// assert!(parse_label("database.").is_err());
/// assert!(parse_label("maybe networking?").is_err());
/// ```
pub fn parse_label(reply: &str) -> Result<TechLabel, ClassifyError> {
    let word = reply
        .trim_matches(|c: char| c.is_whitespace() || c == '`' || c == '"' || c == '\'')
        .split_whitespace()
        .next()
        .unwrap_or("");

    TechLabel::parse(word).ok_or_else(|| ClassifyError::OutOfSet(reply.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_labels() {
        for label in TechLabel::ALL {
            assert_eq!(parse_label(label.as_str()).unwrap(), label);
        }
    }

    #[test]
    fn test_decorated_reply() {
        assert_eq!(parse_label("\"API\"").unwrap(), TechLabel::Api);
        assert_eq!(parse_label("'authentication'").unwrap(), TechLabel::Authentication);
        assert_eq!(parse_label(" `Networking` ").unwrap(), TechLabel::Networking);
        assert_eq!(parse_label("storage because the disk filled up").unwrap(), TechLabel::Storage);
    }

    #[test]
    fn test_punctuated_word_is_out_of_set() {
        assert_eq!(
            parse_label("storage. The disk filled up"),
            Err(ClassifyError::OutOfSet("storage. The disk filled up".to_string()))
        );
        assert!(matches!(parse_label("`database`."), Err(ClassifyError::OutOfSet(_))));
        assert!(matches!(parse_label("api,"), Err(ClassifyError::OutOfSet(_))));
    }

    #[test]
    fn test_out_of_set() {
        assert_eq!(
            parse_label("maybe networking?"),
            Err(ClassifyError::OutOfSet("maybe networking?".to_string()))
        );
        assert!(matches!(parse_label(""), Err(ClassifyError::OutOfSet(_))));
        assert!(matches!(parse_label("compute"), Err(ClassifyError::OutOfSet(_))));
    }
}
