/// Error types shared by the managed-backend clients (auth, storage, rows).
///
/// The inference client defines its own error enum next to the client code;
/// service-level errors wrap both via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned error: status={status} message={message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("write returned no stored row")]
    MissingRow,
}

const MAX_ERROR_BODY_BYTES: usize = 2048;

/// Convert a non-success backend response into an `Api` error, capturing a
/// bounded slice of the body for diagnostics.
pub(crate) async fn api_error(resp: reqwest::Response) -> CommonError {
    let status = resp.status();
    let message = match resp.bytes().await {
        Ok(mut body) => {
            if body.len() > MAX_ERROR_BODY_BYTES {
                body.truncate(MAX_ERROR_BODY_BYTES);
            }
            String::from_utf8_lossy(&body).to_string()
        }
        Err(e) => format!("<failed to read error body: {e}>"),
    };
    CommonError::Api { status, message }
}
