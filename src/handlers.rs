// src/handlers.rs
use crate::{AppState, errors::StylizerError, models::*, prompt, styles::StyleId};
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse, web};
use log::info;
use uuid::Uuid;

pub async fn stylize(
    payload: web::Json<StylizeRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, StylizerError> {
    let request = payload.into_inner();
    let request_id = Uuid::new_v4();

    let (Some(image_data), Some(style_name)) =
        (request.image_data.as_deref(), request.style.as_deref())
    else {
        return Err(StylizerError::BadRequest("Missing image or style".to_string()));
    };

    let style = StyleId::parse(style_name)
        .ok_or_else(|| StylizerError::UnknownStyle(style_name.to_string()))?;

    let (mime, sketch) = data.image_processor.decode_data_url(image_data)?;
    data.image_processor.validate_sketch(&sketch)?;

    info!(
        "[{request_id}] stylize request: style={style}, sketch={} bytes ({mime})",
        sketch.len()
    );

    let analysis = data.analyzer.analyze(&sketch).await?;

    let options = EnhancementOptions {
        enhance_background: request.enhance_background.unwrap_or(true),
        fill_empty_spaces: request.fill_empty_spaces.unwrap_or(true),
        ..EnhancementOptions::default()
    };
    let composed_prompt = prompt::compose_prompt(style, &analysis, &options);

    // Recommendations and the remote seed are consulted only when the caller
    // left the corresponding field out.
    let iterations = match request.iterations {
        Some(n) => n,
        None => prompt::recommend_iterations(&analysis),
    };
    let strength = match request.strength {
        Some(s) => s,
        None => prompt::recommend_strength(&analysis),
    };
    let seed = match request.seed {
        Some(s) => s,
        None => data.generation.get_random_seed().await,
    };

    // Clamped unconditionally, explicit caller values included. The response
    // echoes the pre-clamp values.
    let (safe_iterations, safe_strength) = clamp_generation_parameters(iterations, strength);

    let generated = data
        .generation
        .generate(image_data, &composed_prompt, safe_iterations, seed, safe_strength)
        .await?;

    info!("[{request_id}] stylization complete (seed={seed})");

    Ok(HttpResponse::Ok().json(StylizeResponse {
        success: true,
        styled_image: generated.data_url,
        original_prompt: composed_prompt,
        parameters: GenerationParameters {
            iterations,
            strength,
            seed,
        },
        analysis,
    }))
}

/// Acknowledges a cancellation request. No cancellation token reaches the
/// generation client, so any in-flight generation runs to completion.
pub async fn cancel_stylize() -> HttpResponse {
    info!("Received stylization cancellation request");

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Stylization cancellation requested"
    }))
}

fn clamp_generation_parameters(iterations: i64, strength: f32) -> (i64, f32) {
    (iterations.clamp(1, 5), strength.clamp(0.1, 1.0))
}

/// Keeps malformed-JSON rejections in the same body shape as every other
/// error response.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let response = HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": err.to_string()
    }));
    InternalError::from_response(err, response).into()
}
