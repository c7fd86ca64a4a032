use serde::{Deserialize, Serialize};

/// A wardrobe item as seen by the parsing core.
///
/// This is the caller-supplied snapshot view: the row store carries more
/// columns, but resolving a stylist reference only needs these three fields.
/// The core never mutates items; it reads the snapshot handed to it per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardrobeItem {
    /// Opaque stable identifier, unique within a user's collection
    pub id: String,
    /// Free text from the vision model, possibly hand-edited afterwards;
    /// may contain `**` emphasis markup
    pub description: String,
    /// Opaque reference to the stored photo; never interpreted here
    pub image_url: String,
}

/// One `<recommended-item>` reference extracted from a stylist response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedItem {
    /// Item id exactly as it appeared in the response text
    pub id: String,
    /// How the stylist suggests using the item
    pub usage: String,
    /// The matching wardrobe item, when the id resolved against the
    /// snapshot. `None` is not an error; the UI renders the raw id instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<WardrobeItem>,
}

/// Structured form of a stylist search response.
///
/// Absent sections come back as an empty string / empty vec, never as an
/// error. `recommended_items` keeps document order and preserves duplicate
/// ids, since each reference carries its own usage text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSearchResponse {
    pub suggestions: String,
    pub recommended_items: Vec<RecommendedItem>,
    pub missing_items: String,
}
