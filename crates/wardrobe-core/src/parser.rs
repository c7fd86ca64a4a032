/// Parser for stylist search responses.
///
/// The stylist model is prompted to wrap its reply in a tagged envelope:
///
/// ```text
/// <response>
///   <suggestions> ...free text... </suggestions>
///   <recommended-items>
///     <recommended-item id="ITEM_ID"> ...usage text... </recommended-item>
///   </recommended-items>
///   <missing-items> ...free text... </missing-items>
/// </response>
/// ```
///
/// Only the three inner tag kinds are matched, anywhere in the text; the
/// wrapper tags are ignored. Matching is regex-based and non-greedy, which
/// holds up for template-generated input: an unterminated tag simply fails
/// to match and the section is treated as absent. Parsing never fails.
use std::collections::HashMap;

use regex::Regex;
use tracing::warn;

use crate::model::{ParsedSearchResponse, RecommendedItem, WardrobeItem};

/// Parse a raw stylist response against a wardrobe snapshot.
///
/// Section contents are passed through verbatim from inside the tag
/// boundaries, trimmed of surrounding whitespace only. If the text
/// abnormally contains more than one `<suggestions>` or `<missing-items>`
/// section, the first one wins. `<recommended-item>` references are
/// collected in document order; duplicate ids stay separate entries.
pub fn parse_search_response(
    response: &str,
    wardrobe: &[WardrobeItem],
) -> ParsedSearchResponse {
    let suggestions_re =
        Regex::new(r"(?s)<suggestions>(.*?)</suggestions>").expect("valid regex");
    let recommended_re =
        Regex::new(r#"(?s)<recommended-item id="([^"]+)">(.*?)</recommended-item>"#)
            .expect("valid regex");
    let missing_re =
        Regex::new(r"(?s)<missing-items>(.*?)</missing-items>").expect("valid regex");

    // Map once so repeated references cost O(1) against large wardrobes.
    let by_id: HashMap<&str, &WardrobeItem> = wardrobe
        .iter()
        .map(|item| (item.id.as_str(), item))
        .collect();

    let suggestions = suggestions_re
        .captures(response)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    let mut recommended_items: Vec<RecommendedItem> = Vec::new();
    for caps in recommended_re.captures_iter(response) {
        let id = caps[1].to_string();
        let usage = caps[2].trim().to_string();
        let item = by_id.get(id.as_str()).map(|&item| item.clone());
        if item.is_none() {
            warn!(id = %id, "recommended item not in wardrobe snapshot");
        }
        recommended_items.push(RecommendedItem { id, usage, item });
    }

    let missing_items = missing_re
        .captures(response)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    ParsedSearchResponse {
        suggestions,
        recommended_items,
        missing_items,
    }
}

/// Look up a referenced item in a wardrobe snapshot.
///
/// A plain keyed scan for one-off lookups; `parse_search_response` builds a
/// map instead when resolving many references in one pass. A missing id is
/// `None`, never an error — the rendering layer shows the raw id as a
/// fallback.
pub fn resolve_item<'a>(id: &str, wardrobe: &'a [WardrobeItem]) -> Option<&'a WardrobeItem> {
    wardrobe.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, description: &str) -> WardrobeItem {
        WardrobeItem {
            id: id.to_string(),
            description: description.to_string(),
            image_url: format!("https://cdn.example/{id}.jpg"),
        }
    }

    #[test]
    fn test_parse_full_envelope() {
        let response = r#"<response>
<suggestions>
Go for a layered look:
- start with the shirt
- add the jacket if it cools down
</suggestions>

<recommended-items>
<recommended-item id="shirt-1">Wear it tucked in.</recommended-item>
<recommended-item id="jacket-2">Throw it over your shoulders.</recommended-item>
</recommended-items>

<missing-items>
A pair of white sneakers would complete this.
</missing-items>
</response>"#;

        let wardrobe = vec![item("shirt-1", "Blue shirt"), item("jacket-2", "Navy jacket")];
        let parsed = parse_search_response(response, &wardrobe);

        assert!(parsed.suggestions.starts_with("Go for a layered look:"));
        assert!(parsed.suggestions.contains("- add the jacket"));
        assert_eq!(parsed.recommended_items.len(), 2);
        assert_eq!(parsed.recommended_items[0].id, "shirt-1");
        assert_eq!(parsed.recommended_items[0].usage, "Wear it tucked in.");
        assert_eq!(parsed.recommended_items[1].id, "jacket-2");
        assert_eq!(
            parsed.missing_items,
            "A pair of white sneakers would complete this."
        );
    }

    #[test]
    fn test_parse_empty_input() {
        let parsed = parse_search_response("", &[item("x", "Anything")]);
        assert_eq!(parsed.suggestions, "");
        assert!(parsed.recommended_items.is_empty());
        assert_eq!(parsed.missing_items, "");
    }

    #[test]
    fn test_missing_sections_leave_other_fields_intact() {
        let response = "<suggestions>Keep it simple.</suggestions>";
        let parsed = parse_search_response(response, &[]);
        assert_eq!(parsed.suggestions, "Keep it simple.");
        assert!(parsed.recommended_items.is_empty());
        assert_eq!(parsed.missing_items, "");
    }

    #[test]
    fn test_document_order_preserved_regardless_of_registry_order() {
        let response = concat!(
            r#"<recommended-item id="a">first</recommended-item>"#,
            r#"<recommended-item id="b">second</recommended-item>"#,
            r#"<recommended-item id="c">third</recommended-item>"#,
        );
        // Registry deliberately in reverse order.
        let wardrobe = vec![item("c", "C"), item("b", "B"), item("a", "A")];
        let parsed = parse_search_response(response, &wardrobe);

        let ids: Vec<&str> = parsed
            .recommended_items
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_ids_kept_as_separate_entries() {
        let response = concat!(
            r#"<recommended-item id="a">with jeans</recommended-item>"#,
            r#"<recommended-item id="a">with a skirt</recommended-item>"#,
        );
        let parsed = parse_search_response(response, &[item("a", "Top")]);
        assert_eq!(parsed.recommended_items.len(), 2);
        assert_eq!(parsed.recommended_items[0].usage, "with jeans");
        assert_eq!(parsed.recommended_items[1].usage, "with a skirt");
    }

    #[test]
    fn test_unresolved_reference_yields_absent_item() {
        let response = r#"<recommended-item id="ghost">wear it</recommended-item>"#;
        let parsed = parse_search_response(response, &[item("real", "Real item")]);
        assert_eq!(parsed.recommended_items.len(), 1);
        assert_eq!(parsed.recommended_items[0].id, "ghost");
        assert!(parsed.recommended_items[0].item.is_none());
    }

    #[test]
    fn test_resolved_item_fields_match_snapshot() {
        let wardrobe = vec![WardrobeItem {
            id: "x".to_string(),
            description: "D".to_string(),
            image_url: "U".to_string(),
        }];
        let response = r#"<recommended-item id="x">use it</recommended-item>"#;
        let parsed = parse_search_response(response, &wardrobe);

        let resolved = parsed.recommended_items[0].item.as_ref().unwrap();
        assert_eq!(resolved.id, "x");
        assert_eq!(resolved.description, "D");
        assert_eq!(resolved.image_url, "U");
    }

    #[test]
    fn test_first_section_wins_on_duplicates() {
        let response = concat!(
            "<suggestions>first</suggestions>",
            "<suggestions>second</suggestions>",
            "<missing-items>one</missing-items>",
            "<missing-items>two</missing-items>",
        );
        let parsed = parse_search_response(response, &[]);
        assert_eq!(parsed.suggestions, "first");
        assert_eq!(parsed.missing_items, "one");
    }

    #[test]
    fn test_unterminated_tag_treated_as_absent() {
        let response = "<suggestions>never closed";
        let parsed = parse_search_response(response, &[]);
        assert_eq!(parsed.suggestions, "");
    }

    #[test]
    fn test_content_passed_through_verbatim_inside_boundaries() {
        let response = "<suggestions>  Keep **this** markup\nand this line  </suggestions>";
        let parsed = parse_search_response(response, &[]);
        assert_eq!(parsed.suggestions, "Keep **this** markup\nand this line");
    }

    #[test]
    fn test_end_to_end_scenario() {
        let response = "<suggestions>Wear it casual</suggestions><recommended-item id=\"1\">pair with jeans</recommended-item>";
        let wardrobe = vec![WardrobeItem {
            id: "1".to_string(),
            description: "Blue shirt".to_string(),
            image_url: "u".to_string(),
        }];
        let parsed = parse_search_response(response, &wardrobe);

        assert_eq!(parsed.suggestions, "Wear it casual");
        assert_eq!(parsed.missing_items, "");
        assert_eq!(parsed.recommended_items.len(), 1);
        let rec = &parsed.recommended_items[0];
        assert_eq!(rec.id, "1");
        assert_eq!(rec.usage, "pair with jeans");
        let resolved = rec.item.as_ref().unwrap();
        assert_eq!(resolved.description, "Blue shirt");
        assert_eq!(resolved.image_url, "u");
    }

    #[test]
    fn test_serialized_shape_matches_api_contract() {
        let response = r#"<recommended-item id="missing">layer it</recommended-item>"#;
        let parsed = parse_search_response(response, &[]);
        let json = serde_json::to_value(&parsed).unwrap();

        assert_eq!(json["suggestions"], "");
        assert_eq!(json["missingItems"], "");
        assert_eq!(json["recommendedItems"][0]["id"], "missing");
        // An unresolved reference serializes without an `item` key at all.
        assert!(json["recommendedItems"][0].get("item").is_none());
    }

    #[test]
    fn test_resolve_item() {
        let wardrobe = vec![item("a", "A"), item("b", "B")];
        assert_eq!(resolve_item("b", &wardrobe).unwrap().description, "B");
        assert!(resolve_item("z", &wardrobe).is_none());
    }
}
