// src/services/generation.rs
use crate::errors::StylizerError;
use crate::models::GeneratedImage;
use crate::services::image_processor::{encode_data_url, ensure_data_url};
use bytes::Bytes;
use log::{info, warn};
use rand::Rng;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};
use std::time::Duration;

const PREDICT_ENDPOINT: &str = "run/predict";
const SEED_ENDPOINT: &str = "run/get_random_value";
const DEFAULT_MIME: &str = "image/png";

/// First output slot of a prediction response: either a fetchable resource
/// reference or an inline base64 string.
#[derive(Debug, PartialEq, Eq)]
enum PredictOutput {
    Reference(String),
    Inline(String),
}

/// Client for the hosted img2img space. One prediction attempt per request,
/// no retries; the shared HTTP client carries a request timeout so a stalled
/// upstream surfaces as a failure instead of hanging the handler.
pub struct GenerationClient {
    base_url: String,
    client: Client,
}

impl GenerationClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, StylizerError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            StylizerError::UpstreamUnavailable(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Submits the sketch and composed prompt, and normalizes whatever the
    /// service returns into a data URL.
    pub async fn generate(
        &self,
        image_data_url: &str,
        prompt: &str,
        iterations: i64,
        seed: i64,
        strength: f32,
    ) -> Result<GeneratedImage, StylizerError> {
        let url = format!("{}/{}", self.base_url, PREDICT_ENDPOINT);
        info!("Submitting generation request to {url}");

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "data": [
                    { "name": "sketch.png", "data": image_data_url },
                    prompt,
                    iterations,
                    seed,
                    strength,
                ]
            }))
            .send()
            .await
            .map_err(|e| {
                StylizerError::UpstreamUnavailable(format!("Generation request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StylizerError::UpstreamUnavailable(format!(
                "Generation service returned {status}: {body}"
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            StylizerError::UpstreamUnavailable(format!("Failed to parse generation response: {e}"))
        })?;

        match classify_output(&body["data"]) {
            Some(PredictOutput::Reference(resource_url)) => {
                self.fetch_reference(&resource_url).await
            }
            Some(PredictOutput::Inline(payload)) => Ok(GeneratedImage {
                data_url: ensure_data_url(&payload),
                remote_url: None,
            }),
            None => Err(StylizerError::UnexpectedResponse(
                "no image in prediction output".to_string(),
            )),
        }
    }

    /// Downloads a generated resource and re-encodes it as a data URL using
    /// the declared content type.
    async fn fetch_reference(&self, resource_url: &str) -> Result<GeneratedImage, StylizerError> {
        let response = self.client.get(resource_url).send().await.map_err(|e| {
            StylizerError::UpstreamUnavailable(format!("Failed to fetch generated image: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(StylizerError::UpstreamUnavailable(format!(
                "Generated image fetch returned {}",
                response.status()
            )));
        }

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_MIME)
            .to_string();

        let payload: Bytes = response.bytes().await.map_err(|e| {
            StylizerError::UpstreamUnavailable(format!("Failed to read generated image: {e}"))
        })?;

        Ok(GeneratedImage {
            data_url: encode_data_url(&mime, &payload),
            remote_url: Some(resource_url.to_string()),
        })
    }

    /// Asks the service for a random seed, falling back to a locally drawn
    /// one in [0, 1_000_000). Never fails.
    pub async fn get_random_seed(&self) -> i64 {
        match self.fetch_remote_seed().await {
            Ok(seed) => seed,
            Err(err) => {
                warn!("Seed fetch failed, falling back to local seed: {err}");
                rand::thread_rng().gen_range(0..1_000_000)
            }
        }
    }

    async fn fetch_remote_seed(&self) -> Result<i64, StylizerError> {
        let url = format!("{}/{}", self.base_url, SEED_ENDPOINT);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "data": [] }))
            .send()
            .await
            .map_err(|e| StylizerError::UpstreamUnavailable(format!("Seed request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(StylizerError::UpstreamUnavailable(format!(
                "Seed endpoint returned {}",
                response.status()
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            StylizerError::UpstreamUnavailable(format!("Failed to parse seed response: {e}"))
        })?;

        parse_seed(&body["data"]).ok_or_else(|| {
            StylizerError::UnexpectedResponse("no seed in response".to_string())
        })
    }
}

fn classify_output(data: &Value) -> Option<PredictOutput> {
    if let Some(url) = data
        .get(0)
        .and_then(|entry| entry.get("url"))
        .and_then(Value::as_str)
    {
        return Some(PredictOutput::Reference(url.to_string()));
    }

    if let Some(payload) = data.get(0).and_then(Value::as_str) {
        return Some(PredictOutput::Inline(payload.to_string()));
    }

    // Some deployments return the output bare instead of in a list.
    data.as_str()
        .map(|payload| PredictOutput::Inline(payload.to_string()))
}

fn parse_seed(data: &Value) -> Option<i64> {
    let value = data.get(0).unwrap_or(data);

    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if let Some(f) = value.as_f64() {
        return Some(f as i64);
    }
    value.as_str().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_outputs_are_classified_for_fetching() {
        let data = json!([{ "url": "https://space.example/file/out.png", "path": "out.png" }]);
        assert_eq!(
            classify_output(&data),
            Some(PredictOutput::Reference(
                "https://space.example/file/out.png".to_string()
            ))
        );
    }

    #[test]
    fn bare_strings_are_classified_inline() {
        let data = json!(["iVBORw0KGgo"]);
        assert_eq!(
            classify_output(&data),
            Some(PredictOutput::Inline("iVBORw0KGgo".to_string()))
        );

        let data = json!("iVBORw0KGgo");
        assert_eq!(
            classify_output(&data),
            Some(PredictOutput::Inline("iVBORw0KGgo".to_string()))
        );
    }

    #[test]
    fn inline_outputs_wrap_into_data_urls() {
        assert_eq!(
            ensure_data_url("iVBORw0KGgo"),
            "data:image/png;base64,iVBORw0KGgo"
        );
        assert_eq!(
            ensure_data_url("data:image/jpeg;base64,abc"),
            "data:image/jpeg;base64,abc"
        );
    }

    #[test]
    fn unrecognized_shapes_are_rejected() {
        assert_eq!(classify_output(&json!([42])), None);
        assert_eq!(classify_output(&json!(null)), None);
        assert_eq!(classify_output(&json!({ "image": "abc" })), None);
        assert_eq!(classify_output(&json!([])), None);
    }

    #[test]
    fn seeds_parse_from_numbers_and_strings() {
        assert_eq!(parse_seed(&json!([42])), Some(42));
        assert_eq!(parse_seed(&json!([42.0])), Some(42));
        assert_eq!(parse_seed(&json!(["123456"])), Some(123456));
        assert_eq!(parse_seed(&json!(7)), Some(7));
        assert_eq!(parse_seed(&json!([])), None);
        assert_eq!(parse_seed(&json!(["not a number"])), None);
    }

    #[tokio::test]
    async fn seed_fallback_absorbs_upstream_failures() {
        // Nothing listens on this address, so the remote fetch fails and the
        // local fallback takes over.
        let client = GenerationClient::new(
            "http://127.0.0.1:1".to_string(),
            Duration::from_millis(100),
        )
        .unwrap();

        let seed = client.get_random_seed().await;
        assert!((0..1_000_000).contains(&seed));
    }
}
