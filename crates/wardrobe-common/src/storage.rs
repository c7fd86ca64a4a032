/// Client for the managed object storage service.
///
/// Uploads go to `POST /storage/v1/object/{bucket}/{path}` with the caller's
/// bearer token so bucket policies apply. The returned value is the public
/// URL (`/storage/v1/object/public/{bucket}/{path}`), composed the same way
/// the hosted SDK derives it; nothing downstream interprets it.
use uuid::Uuid;

use crate::error::{api_error, CommonError};

#[derive(Clone)]
pub struct StorageClient {
    base_url: String,
    api_key: String,
    bucket: String,
    http: reqwest::Client,
}

impl StorageClient {
    pub fn new(base_url: &str, api_key: &str, bucket: &str) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("wardrobe-api")
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bucket: bucket.to_string(),
            http,
        })
    }

    /// Compose a collision-free object path scoped under the owner's id,
    /// keeping the original file extension.
    pub fn object_path(user_id: &str, file_name: &str) -> String {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .unwrap_or("jpg");
        format!("{user_id}/{}.{ext}", Uuid::new_v4())
    }

    /// Upload raw bytes and return the public URL of the stored object.
    pub async fn upload(
        &self,
        access_token: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, CommonError> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, path
        );
        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        Ok(self.public_url(path))
    }

    /// Public URL for an object in this bucket.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }
}
