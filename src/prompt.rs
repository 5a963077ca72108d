// src/prompt.rs
//
// Prompt composition for the stylization pipeline. The enhanced prompt is
// the style's base prompt followed by a fixed, ordered sequence of optional
// fragments: subject detail, background, empty-space fill, atmosphere,
// color guidance, style preservation. Fragment selection per style is
// table-driven; ordering is part of the contract.
use crate::models::{DrawingComplexity, EnhancementOptions, ImageAnalysis, LineWeight, MainSubject};
use crate::styles::{self, StyleId};

pub fn compose_prompt(
    style: StyleId,
    analysis: &ImageAnalysis,
    options: &EnhancementOptions,
) -> String {
    let mut enhancements: Vec<String> = Vec::new();

    if options.enhance_details {
        enhancements.push(subject_enhancement(style, analysis.main_subject));
    }

    if options.enhance_background {
        if analysis.emptiness > 0.6 {
            enhancements.push(background_enhancement(style, analysis));
        } else if !analysis.has_background && analysis.emptiness > 0.3 {
            enhancements.push(format!(
                "Enhance the existing elements with a complementary {style}-style background that creates a complete scene."
            ));
        }
    }

    if options.fill_empty_spaces && analysis.emptiness > 0.3 {
        enhancements.push(format!(
            "Fill all empty white spaces with contextually appropriate {style}-style elements that complement the drawing."
        ));

        if analysis.drawing_complexity == DrawingComplexity::Simple {
            enhancements.push(format!(
                "Add complementary {style}-style details and secondary elements to create a richer scene while preserving the original drawing's intent."
            ));
        }
    }

    if options.add_atmospheric_elements {
        enhancements.push(atmospheric_enhancement(style));
    }

    if options.enhance_colors && !analysis.dominant_colors.is_empty() {
        enhancements.push(color_enhancement(style, &analysis.dominant_colors));
    }

    if options.preserve_style {
        enhancements.push(format!(
            "Ensure the entire image maintains a consistent {style} visual style throughout all elements."
        ));
    }

    let mut prompt = styles::base_prompt(style).to_string();
    for enhancement in &enhancements {
        prompt.push(' ');
        prompt.push_str(enhancement);
    }
    prompt
}

fn subject_enhancement(style: StyleId, subject: MainSubject) -> String {
    match subject {
        MainSubject::Tree => format!(
            "Enhance the tree with detailed {style}-style foliage, textured bark, and natural proportions."
        ),
        MainSubject::Person => format!(
            "Create a detailed {style}-style character with appropriate clothing, facial features, and posture."
        ),
        MainSubject::Water => format!(
            "Render detailed {style}-style water with appropriate reflections, movement, and transparency effects."
        ),
        MainSubject::Landscape => format!(
            "Create a detailed {style}-style landscape with appropriate terrain features, vegetation, and perspective."
        ),
        MainSubject::Object => format!(
            "Enhance the main object with detailed {style}-style textures, lighting, and dimensionality."
        ),
    }
}

// Exactly one background sentence per call. Detected features are checked in
// priority order: tree, then person, then water, then the generic fallback.
fn background_enhancement(style: StyleId, analysis: &ImageAnalysis) -> String {
    if analysis.has_tree {
        let clause = match style {
            StyleId::Ghibli => {
                "with rolling hills, wildflowers, and a dreamy sky with distinctive clouds."
            }
            StyleId::Anime => {
                "with distinctive anime-style grass, stone path, and dramatic sky with clouds."
            }
            StyleId::Cyberpunk => {
                "contrasting the natural element with futuristic city elements, neon lights, and technological details."
            }
            _ => "with grass, path, other vegetation, and an appropriate sky.",
        };
        format!("Create a cohesive {style}-style natural environment around the tree - {clause}")
    } else if analysis.has_person {
        let clause = match style {
            StyleId::Cyberpunk => {
                "with neon city streets, technological elements, and atmospheric urban details."
            }
            StyleId::Anime | StyleId::Ghibli => {
                "with natural or urban elements that complement the character."
            }
            _ => "that establishes a clear setting and mood.",
        };
        format!(
            "Create a contextually appropriate {style}-style environment for the character - {clause}"
        )
    } else if analysis.has_water {
        format!(
            "Expand the water into a complete {style}-style aquatic scene with shore, sky, and complementary elements."
        )
    } else {
        format!(
            "Add a contextually appropriate {style}-style background that complements the existing elements."
        )
    }
}

fn atmospheric_enhancement(style: StyleId) -> String {
    match style {
        StyleId::Ghibli => {
            "Add Ghibli's characteristic atmospheric elements - magical particles, gentle wind effects, and soft lighting."
                .to_string()
        }
        StyleId::Anime => {
            "Include anime-style atmospheric effects like light rays, gentle wind patterns, and subtle environmental particles."
                .to_string()
        }
        StyleId::Cyberpunk => {
            "Add cyberpunk atmospheric elements like digital particles, scanning lines, fog, and multiple colored light sources."
                .to_string()
        }
        StyleId::VanGogh => {
            "Include Van Gogh's characteristic swirling sky patterns, dynamic brush movement, and emotional color contrasts."
                .to_string()
        }
        StyleId::Realistic => {
            "Add realistic atmospheric effects like depth haze, natural shadows, and authentic lighting conditions."
                .to_string()
        }
        _ => format!("Add appropriate {style}-style atmospheric elements and lighting effects."),
    }
}

fn color_enhancement(style: StyleId, dominant_colors: &[String]) -> String {
    let color_list = dominant_colors
        .iter()
        .map(|c| c.replace('#', ""))
        .collect::<Vec<_>>()
        .join(", ");

    match style {
        StyleId::VanGogh | StyleId::Oil => format!(
            "Use a harmonious color palette building from the drawing's existing colors ({color_list}) with rich, expressive color contrasts."
        ),
        StyleId::Cyberpunk => format!(
            "Use a neon-dominated color scheme with blues, purples, and hot pinks that complements the drawing's existing colors ({color_list})."
        ),
        _ => format!(
            "Use a harmonious color palette that builds from and complements the drawing's existing colors ({color_list})."
        ),
    }
}

/// Recommends the img2img transformation strength for a sketch, in
/// [0.3, 0.9]. Starts at 0.7; lighter lines, simpler drawings, and emptier
/// canvases all push toward more transformation, their opposites toward
/// less. Adjustments are additive and independent.
pub fn recommend_strength(analysis: &ImageAnalysis) -> f32 {
    let mut strength = 0.7_f32;

    match analysis.line_weight {
        LineWeight::Light => strength += 0.1,
        LineWeight::Heavy => strength -= 0.1,
        LineWeight::Medium => {}
    }

    match analysis.drawing_complexity {
        DrawingComplexity::Simple => strength += 0.1,
        DrawingComplexity::Complex => strength -= 0.1,
        DrawingComplexity::Moderate => {}
    }

    if analysis.emptiness > 0.7 {
        strength += 0.1;
    }

    strength.clamp(0.3, 0.9)
}

/// Recommends the generation iteration count: 2 by default, 3 for simple
/// drawings, plus one when the canvas is mostly empty. The caller clamps the
/// final value to [1, 5].
pub fn recommend_iterations(analysis: &ImageAnalysis) -> i64 {
    let mut iterations = match analysis.drawing_complexity {
        DrawingComplexity::Simple => 3,
        DrawingComplexity::Complex => 2,
        DrawingComplexity::Moderate => 2,
    };

    if analysis.emptiness > 0.7 {
        iterations += 1;
    }

    iterations
}
