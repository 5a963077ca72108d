// src/services/image_processor.rs
use crate::errors::StylizerError;
use base64::{Engine as _, engine::general_purpose};
use image::GenericImageView;

const MAX_DIMENSION: u32 = 4096;
const DEFAULT_MIME: &str = "image/png";

pub struct ImageProcessor;

impl ImageProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Splits a `data:<mime>;base64,<payload>` string into its mime type and
    /// decoded bytes.
    pub fn decode_data_url(&self, data_url: &str) -> Result<(String, Vec<u8>), StylizerError> {
        let rest = data_url.strip_prefix("data:").ok_or_else(|| {
            StylizerError::BadRequest("Image data must be a base64 data URL".to_string())
        })?;

        let (mime, payload) = rest.split_once(";base64,").ok_or_else(|| {
            StylizerError::BadRequest("Image data must be a base64 data URL".to_string())
        })?;

        let bytes = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| StylizerError::BadRequest(format!("Invalid base64 image data: {e}")))?;

        let mime = if mime.is_empty() { DEFAULT_MIME } else { mime };
        Ok((mime.to_string(), bytes))
    }

    /// Checks that the decoded payload is a readable image within the size
    /// cap, returning its dimensions.
    pub fn validate_sketch(&self, data: &[u8]) -> Result<(u32, u32), StylizerError> {
        let img = image::load_from_memory(data)
            .map_err(|e| StylizerError::BadRequest(format!("Unreadable image data: {e}")))?;

        let (width, height) = img.dimensions();
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(StylizerError::BadRequest(format!(
                "Image dimensions exceed {MAX_DIMENSION}x{MAX_DIMENSION}"
            )));
        }

        Ok((width, height))
    }
}

pub fn encode_data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{mime};base64,{}", general_purpose::STANDARD.encode(data))
}

/// Wraps a bare base64 payload into a PNG data URL; strings that already
/// carry a data URL prefix pass through unchanged.
pub fn ensure_data_url(payload: &str) -> String {
    if payload.starts_with("data:") {
        payload.to_string()
    } else {
        format!("data:{DEFAULT_MIME};base64,{payload}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(4, 4));
        let mut out = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn decode_splits_mime_and_payload() {
        let processor = ImageProcessor::new();
        let (mime, bytes) = processor
            .decode_data_url("data:image/png;base64,aGVsbG8=")
            .unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn decode_rejects_non_data_urls() {
        let processor = ImageProcessor::new();
        assert!(processor.decode_data_url("hello world").is_err());
        assert!(processor.decode_data_url("data:image/png,plain").is_err());
        assert!(
            processor
                .decode_data_url("data:image/png;base64,!!!")
                .is_err()
        );
    }

    #[test]
    fn encode_and_decode_round_trip() {
        let processor = ImageProcessor::new();
        let url = encode_data_url("image/jpeg", b"hello");
        assert_eq!(url, "data:image/jpeg;base64,aGVsbG8=");

        let (mime, bytes) = processor.decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/jpeg");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn bare_payloads_are_wrapped_as_png() {
        assert_eq!(
            ensure_data_url("aGVsbG8="),
            "data:image/png;base64,aGVsbG8="
        );
    }

    #[test]
    fn existing_data_urls_pass_through_unchanged() {
        let url = "data:image/jpeg;base64,aGVsbG8=";
        assert_eq!(ensure_data_url(url), url);
    }

    #[test]
    fn valid_images_pass_validation() {
        let processor = ImageProcessor::new();
        let (width, height) = processor.validate_sketch(&tiny_png()).unwrap();
        assert_eq!((width, height), (4, 4));
    }

    #[test]
    fn garbage_bytes_fail_validation() {
        let processor = ImageProcessor::new();
        assert!(processor.validate_sketch(b"not an image").is_err());
    }
}
