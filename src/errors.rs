// src/errors.rs
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylizerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid style option: {0}")]
    UnknownStyle(String),

    #[error("Image analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Generation service error: {0}")]
    UpstreamUnavailable(String),

    #[error("Unexpected response from generation service: {0}")]
    UnexpectedResponse(String),
}

impl ResponseError for StylizerError {
    fn status_code(&self) -> StatusCode {
        match self {
            StylizerError::BadRequest(_) | StylizerError::UnknownStyle(_) => {
                StatusCode::BAD_REQUEST
            }
            StylizerError::AnalysisFailed(_)
            | StylizerError::UpstreamUnavailable(_)
            | StylizerError::UnexpectedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_400() {
        let err = StylizerError::BadRequest("Missing image or style".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = StylizerError::UnknownStyle("sketch".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_errors_map_to_500() {
        let err = StylizerError::UpstreamUnavailable("connection refused".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = StylizerError::UnexpectedResponse("no image in output".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_is_uniform() {
        let err = StylizerError::BadRequest("Missing image or style".to_string());
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing image or style");
    }
}
