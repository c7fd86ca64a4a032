/// Display cleanup for stored item descriptions.
///
/// Vision-model descriptions arrive with bolded field labels
/// (`**Type of Clothing**: Jacket - ...`) that read poorly as plain text.
/// `clean_description` strips that markup for full-text display;
/// `summarize_description` derives a compact "color type" line for cards and
/// list rows. Both are best-effort over free text the user may have edited.
use regex::Regex;

/// Strip emphasis markup from a description.
///
/// Drops `**Label**: ` field-label prefixes entirely, removes any remaining
/// bare `**` markers, collapses whitespace runs to single spaces, and trims
/// the ends. Idempotent: cleaning an already-clean string is a no-op.
pub fn clean_description(description: &str) -> String {
    let label_re = Regex::new(r"\*\*([^*]+)\*\*:\s*").expect("valid regex");
    let emphasis_re = Regex::new(r"\*\*").expect("valid regex");
    let whitespace_re = Regex::new(r"\s+").expect("valid regex");

    let without_labels = label_re.replace_all(description, "");
    let without_emphasis = emphasis_re.replace_all(&without_labels, "");
    whitespace_re
        .replace_all(&without_emphasis, " ")
        .trim()
        .to_string()
}

/// Derive a short display summary from a description.
///
/// Looks for the `Type of Clothing**:` and `Color**:` fields the vision
/// prompt asks for, each captured up to the next `-` delimiter. Both found
/// gives `"<color> <type lowercased>"`; one found gives that value alone.
/// When neither is present (hand-written descriptions), falls back to the
/// first sentence of the cleaned text; a non-empty input never summarizes
/// to an empty string while any cleaned text remains.
pub fn summarize_description(description: &str) -> String {
    let type_re = Regex::new(r"Type of Clothing\*\*:\s*([^-]+)").expect("valid regex");
    let color_re = Regex::new(r"Color\*\*:\s*([^-]+)").expect("valid regex");

    let clothing_type = type_re
        .captures(description)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty());
    let color = color_re
        .captures(description)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty());

    let summary = match (color, clothing_type) {
        (Some(color), Some(clothing_type)) => {
            format!("{color} {}", clothing_type.to_lowercase())
        }
        (Some(color), None) => color,
        (None, Some(clothing_type)) => clothing_type,
        (None, None) => String::new(),
    };
    if !summary.is_empty() {
        return summary;
    }

    let cleaned = clean_description(description);
    let first_sentence = cleaned.split('.').next().unwrap_or("").trim().to_string();
    if first_sentence.is_empty() {
        cleaned
    } else {
        first_sentence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELED: &str = "**Type of Clothing**: Jacket - waist length, zip front. \
**Color**: Navy - deep tone. **Fabric**: Cotton twill.";

    #[test]
    fn test_clean_strips_field_labels() {
        let cleaned = clean_description(LABELED);
        assert_eq!(
            cleaned,
            "Jacket - waist length, zip front. Navy - deep tone. Cotton twill."
        );
    }

    #[test]
    fn test_clean_strips_stray_emphasis_and_collapses_whitespace() {
        assert_eq!(
            clean_description("A **bold**   claim\nacross lines"),
            "A bold claim across lines"
        );
    }

    #[test]
    fn test_clean_is_idempotent() {
        for input in [
            LABELED,
            "plain text already",
            "  padded   text  ",
            "**dangling: markers** everywhere**",
            "",
        ] {
            let once = clean_description(input);
            assert_eq!(clean_description(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_summarize_combines_color_and_type() {
        assert_eq!(summarize_description(LABELED), "Navy jacket");
    }

    #[test]
    fn test_summarize_with_only_type() {
        let description = "**Type of Clothing**: Scarf - knitted.";
        assert_eq!(summarize_description(description), "Scarf");
    }

    #[test]
    fn test_summarize_with_only_color() {
        let description = "**Color**: Burgundy - rich shade.";
        assert_eq!(summarize_description(description), "Burgundy");
    }

    #[test]
    fn test_summarize_falls_back_to_first_sentence() {
        assert_eq!(
            summarize_description("A cool top for warm days. Pairs well with shorts."),
            "A cool top for warm days"
        );
    }

    #[test]
    fn test_summarize_never_empty_for_describable_input() {
        // Leading period would make the first sentence empty; the full
        // cleaned description is used instead.
        let summary = summarize_description(". trailing thought");
        assert!(!summary.is_empty());
        assert_eq!(summary, ". trailing thought");
    }
}
