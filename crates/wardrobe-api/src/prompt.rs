/// Prompt construction for the two model calls.
///
/// The stylist prompt spells out the tagged envelope that
/// `wardrobe_core::parser` extracts; changing the format on one side means
/// changing the other.
use wardrobe_core::model::WardrobeItem;

/// Instruction for the vision model when describing an uploaded photo.
pub const DESCRIBE_PROMPT: &str = "Analyze this image and describe what clothing items you \
see in a natural, conversational way. Focus on the main clothing pieces, their colors, and \
any notable style details. Keep it concise and readable.";

/// Render the wardrobe snapshot as context lines for the stylist model.
///
/// One `<item id="...">description</item>` line per item; these ids are what
/// the model must echo back inside `<recommended-item>` tags.
pub fn wardrobe_context(items: &[WardrobeItem]) -> String {
    items
        .iter()
        .map(|item| format!("<item id=\"{}\">{}</item>", item.id, item.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the stylist prompt for a user query over a wardrobe snapshot.
pub fn search_prompt(query: &str, items: &[WardrobeItem]) -> String {
    let context = wardrobe_context(items);
    format!(
        "You are a personal stylist AI assistant. Here is the user's wardrobe:\n\
\n\
{context}\n\
\n\
User's request: \"{query}\"\n\
\n\
Based on the wardrobe items above, provide helpful suggestions. You can:\n\
1. Recommend specific items from the wardrobe that match the request\n\
2. Suggest outfit combinations using the existing items\n\
3. Point out what might be missing for the desired look\n\
4. Give styling tips for the existing pieces\n\
\n\
IMPORTANT: When referencing a specific item, use XML tags with the item ID like this: \
<recommended-item id=\"item-id-here\">description of how to use it</recommended-item>\n\
\n\
Format your response like this:\n\
<response>\n\
<suggestions>\n\
Your styling suggestions here...\n\
</suggestions>\n\
\n\
<recommended-items>\n\
<recommended-item id=\"item-id-1\">How to use this item...</recommended-item>\n\
<recommended-item id=\"item-id-2\">How to use this item...</recommended-item>\n\
</recommended-items>\n\
\n\
<missing-items>\n\
Items they might want to add to complete the look...\n\
</missing-items>\n\
</response>\n\
\n\
Keep your response concise but helpful."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, description: &str) -> WardrobeItem {
        WardrobeItem {
            id: id.to_string(),
            description: description.to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_wardrobe_context_one_line_per_item() {
        let context = wardrobe_context(&[item("a", "Blue shirt"), item("b", "Navy jacket")]);
        assert_eq!(
            context,
            "<item id=\"a\">Blue shirt</item>\n<item id=\"b\">Navy jacket</item>"
        );
    }

    #[test]
    fn test_search_prompt_carries_query_context_and_envelope() {
        let prompt = search_prompt("something for a rainy day", &[item("a", "Raincoat")]);
        assert!(prompt.contains("User's request: \"something for a rainy day\""));
        assert!(prompt.contains("<item id=\"a\">Raincoat</item>"));
        assert!(prompt.contains("<suggestions>"));
        assert!(prompt.contains("<recommended-item id="));
        assert!(prompt.contains("<missing-items>"));
    }
}
