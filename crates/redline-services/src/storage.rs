use anyhow::Result;
use chrono::Utc;
use tracing::info;

/// Client for the object-storage service holding uploaded contracts.
/// Supabase-style REST surface: authenticated object writes under a
/// bucket, unauthenticated public-URL reads.
pub struct StorageClient {
    base_url: String,
    bucket: String,
    token: String,
    http: reqwest::Client,
}

impl StorageClient {
    pub fn new(base_url: &str, bucket: &str, token: &str, timeout_s: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            token: token.to_string(),
            http: crate::client(timeout_s),
        }
    }

    /// Upload one file and return its publicly addressable URL.
    /// Object keys are timestamp-prefixed so repeat uploads of the
    /// same filename never collide.
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let key = format!("{}-{}", Utc::now().timestamp_millis(), file_name);
        let encoded = urlencoding::encode(&key).into_owned();
        let size = bytes.len();

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .http
            .post(format!(
                "{}/object/{}/{}",
                self.base_url, self.bucket, encoded
            ))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("storage upload of {file_name} failed ({status}): {body}");
        }

        info!("uploaded {file_name} ({size} bytes) as {key}");
        Ok(format!(
            "{}/object/public/{}/{}",
            self.base_url, self.bucket, encoded
        ))
    }
}
