//! Video prompt derivation.

use amma_core::PromptConfig;

/// Prompt used when a script yields too little tagged text.
pub const FALLBACK_VIDEO_PROMPT: &str = "An animated medical education video explaining a health condition in simple, friendly terms with visual diagrams, encouraging tone, suitable for patient education.";

const PROMPT_TAGS: [&str; 2] = ["Narration:", "Visual:"];

/// Condense a narration script into a short video prompt.
///
/// Looks at the first `scan_lines` lines, keeps the text after the first
/// `:` of every `Narration:` or `Visual:` line (markdown emphasis
/// stripped), drops parts of `min_part_chars` characters or fewer, joins
/// the first `max_parts` with spaces, and cuts the result at `max_chars`.
/// Results shorter than `min_chars` are replaced by
/// [`FALLBACK_VIDEO_PROMPT`].
///
/// # Examples
///
/// ```
/// use amma_core::PromptConfig;
/// use amma_narrative::{FALLBACK_VIDEO_PROMPT, derive_video_prompt};
///
/// let script = "SCENE 1: Intro\nVisual: A friendly heart waving hello to the viewer\nNarration: Your heart works hard every single day";
/// let prompt = derive_video_prompt(script, &PromptConfig::default());
/// assert_eq!(
///     prompt,
///     "A friendly heart waving hello to the viewer Your heart works hard every single day"
/// );
///
/// assert_eq!(derive_video_prompt("", &PromptConfig::default()), FALLBACK_VIDEO_PROMPT);
/// ```
pub fn derive_video_prompt(script: &str, limits: &PromptConfig) -> String {
    let parts: Vec<&str> = script
        .lines()
        .take(limits.scan_lines)
        .filter(|line| PROMPT_TAGS.iter().any(|tag| line.contains(tag)))
        .filter_map(|line| line.split_once(':'))
        .map(|(_, text)| text.trim_matches(|c: char| c.is_whitespace() || c == '*'))
        .filter(|text| text.chars().count() > limits.min_part_chars)
        .take(limits.max_parts)
        .collect();

    let prompt = truncate_chars(&parts.join(" "), limits.max_chars);

    if prompt.chars().count() < limits.min_chars {
        truncate_chars(FALLBACK_VIDEO_PROMPT, limits.max_chars)
    } else {
        prompt
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
