/// Client for the managed row store's `wardrobe_items` table.
///
/// Speaks the PostgREST dialect: filters as query parameters
/// (`user_id=eq.{id}`), `Prefer: return=representation` on writes that need
/// the stored row back. Every call forwards the caller's bearer token so the
/// backend's row-level security decides visibility; this client adds no
/// authorization of its own.
use serde::{Deserialize, Serialize};

use wardrobe_core::model::WardrobeItem;

use crate::error::{api_error, CommonError};

const TABLE: &str = "wardrobe_items";

/// A stored wardrobe item row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: Option<String>,
}

impl ItemRecord {
    /// The registry-snapshot view handed to the parsing core.
    pub fn snapshot(&self) -> WardrobeItem {
        WardrobeItem {
            id: self.id.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Fields for a new row; the store assigns id and created_at.
#[derive(Debug, Clone, Serialize)]
pub struct NewItemRecord {
    pub user_id: String,
    pub description: String,
    pub image_url: String,
}

/// Partial update of a stored row; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.is_favorite.is_none()
    }
}

#[derive(Clone)]
pub struct ItemStore {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl ItemStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("wardrobe-api")
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{TABLE}", self.base_url)
    }

    /// List a user's items, newest first.
    pub async fn list(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<Vec<ItemRecord>, CommonError> {
        let user_filter = format!("eq.{user_id}");
        let resp = self
            .http
            .get(self.table_url())
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        Ok(resp.json().await?)
    }

    /// Insert a new item and return the stored row.
    pub async fn insert(
        &self,
        access_token: &str,
        new_item: &NewItemRecord,
    ) -> Result<ItemRecord, CommonError> {
        let resp = self
            .http
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .header("Prefer", "return=representation")
            .json(&[new_item])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        let rows: Vec<ItemRecord> = resp.json().await?;
        rows.into_iter().next().ok_or(CommonError::MissingRow)
    }

    /// Apply a partial update and return the stored row.
    pub async fn update(
        &self,
        access_token: &str,
        id: &str,
        changes: &ItemChanges,
    ) -> Result<ItemRecord, CommonError> {
        let resp = self
            .http
            .patch(self.table_url())
            .query(&[("id", format!("eq.{id}"))])
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        // Row-level security filters rows the caller cannot touch, so an
        // update of someone else's item comes back as an empty set.
        let rows: Vec<ItemRecord> = resp.json().await?;
        rows.into_iter().next().ok_or(CommonError::MissingRow)
    }

    /// Delete an item.
    pub async fn delete(&self, access_token: &str, id: &str) -> Result<(), CommonError> {
        let resp = self
            .http
            .delete(self.table_url())
            .query(&[("id", format!("eq.{id}"))])
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        Ok(())
    }
}
