// src/models.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainSubject {
    Tree,
    Person,
    Landscape,
    Object,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineWeight {
    Light,
    Medium,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingComplexity {
    Simple,
    Moderate,
    Complex,
}

/// Structured description of one sketch, consumed by the prompt composer.
/// Built fresh per request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub main_subject: MainSubject,
    pub has_tree: bool,
    pub has_person: bool,
    pub has_water: bool,
    pub has_background: bool,
    /// Proportion of apparent blank space, in [0, 1).
    pub emptiness: f32,
    pub line_weight: LineWeight,
    pub drawing_complexity: DrawingComplexity,
    /// 1-3 hex-like color strings, most dominant first.
    pub dominant_colors: Vec<String>,
}

/// Toggles for the prompt composition pipeline. All default to on; the HTTP
/// request only exposes `enhanceBackground` and `fillEmptySpaces`.
#[derive(Debug, Clone)]
pub struct EnhancementOptions {
    pub enhance_background: bool,
    pub fill_empty_spaces: bool,
    pub add_atmospheric_elements: bool,
    pub preserve_style: bool,
    pub enhance_colors: bool,
    pub enhance_details: bool,
}

impl Default for EnhancementOptions {
    fn default() -> Self {
        Self {
            enhance_background: true,
            fill_empty_spaces: true,
            add_atmospheric_elements: true,
            preserve_style: true,
            enhance_colors: true,
            enhance_details: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylizeRequest {
    pub image_data: Option<String>,
    pub style: Option<String>,
    pub iterations: Option<i64>,
    pub strength: Option<f32>,
    pub seed: Option<i64>,
    pub enhance_background: Option<bool>,
    pub fill_empty_spaces: Option<bool>,
}

/// Effective generation parameters echoed back to the caller. These are the
/// pre-clamp values; the upstream call receives the clamped ones.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub iterations: i64,
    pub strength: f32,
    pub seed: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StylizeResponse {
    pub success: bool,
    pub styled_image: String,
    pub original_prompt: String,
    pub parameters: GenerationParameters,
    pub analysis: ImageAnalysis,
}

/// Normalized output of a successful generation call: the image as a data
/// URL, plus the remote resource URL when the service returned one.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub data_url: String,
    pub remote_url: Option<String>,
}
