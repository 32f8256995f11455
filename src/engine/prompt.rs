//! Prompt construction and post-processing for story expansion.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a leading chat-template artifact such as `<|assistant|>`.
static CHAT_ARTIFACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\|.*?\|>\n*").expect("valid chat artifact pattern"));

/// Build the story-expansion prompt for a caption.
pub fn story_prompt(caption: &str) -> String {
    format!(
        "Create a unique and creative short story, or a descriptive poem, \
         inspired by the following image caption:\n\nCaption: \"{caption}\"\n\nStory/Poem:"
    )
}

/// Clean a raw generation: drop an echoed prompt prefix, strip a
/// leading chat-template artifact, trim whitespace.
pub fn clean_generation(raw: &str, prompt: &str) -> String {
    let without_prompt = raw.replacen(prompt, "", 1);
    let trimmed = without_prompt.trim();
    let without_artifact = CHAT_ARTIFACT.replace(trimmed, "");

    without_artifact.trim().to_string()
}

/// True when a generation looks like it merely parroted the caption:
/// shorter than twice the caption while still containing the caption's
/// first word.
pub fn looks_like_parrot(story: &str, caption: &str) -> bool {
    let Some(first_word) = caption.split_whitespace().next() else {
        return false;
    };

    story.len() < caption.len() * 2 && story.contains(first_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_caption_in_quotes() {
        let prompt = story_prompt("a dog on a beach");

        assert!(prompt.contains("Caption: \"a dog on a beach\""));
        assert!(prompt.ends_with("Story/Poem:"));
    }

    #[test]
    fn test_clean_strips_echoed_prompt() {
        let prompt = story_prompt("a dog");
        let raw = format!("{prompt}\nThe dog chased the waves all afternoon.");

        let cleaned = clean_generation(&raw, &prompt);
        assert_eq!(cleaned, "The dog chased the waves all afternoon.");
    }

    #[test]
    fn test_clean_strips_leading_chat_artifact() {
        let cleaned = clean_generation("<|assistant|>\n\nA quiet morning.", "unused prompt");
        assert_eq!(cleaned, "A quiet morning.");
    }

    #[test]
    fn test_clean_keeps_interior_markers() {
        let cleaned = clean_generation("A story with <|odd|> markers inside.", "p");
        assert_eq!(cleaned, "A story with <|odd|> markers inside.");
    }

    #[test]
    fn test_clean_strips_prompt_then_artifact() {
        let prompt = story_prompt("a cat");
        let raw = format!("{prompt}<|assistant|>\nThe cat slept.");

        let cleaned = clean_generation(&raw, &prompt);
        assert_eq!(cleaned, "The cat slept.");
    }

    #[test]
    fn test_parrot_detected_for_short_echo() {
        let caption = "a dog on a beach";
        assert!(looks_like_parrot("a dog, just a dog", caption));
    }

    #[test]
    fn test_parrot_not_flagged_for_long_story() {
        let caption = "a dog on a beach";
        let story = "Long ago, a dog wandered down to the shore and watched \
                     the tide carry driftwood toward the dunes.";
        assert!(!looks_like_parrot(story, caption));
    }

    #[test]
    fn test_parrot_empty_caption() {
        assert!(!looks_like_parrot("anything", ""));
    }
}
