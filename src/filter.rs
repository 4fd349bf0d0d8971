//! The filter capability and data-driven filter recipes.
//!
//! [`Filter`] is the seam the registry and engine work against;
//! [`FilterRecipe`] is the shipped implementation, a filter expressed
//! entirely as data so preset packs can live in configuration.

use crate::color::{self, BlendMode, ColorAdjustment, OverlayColor};
use crate::curve::{self, ToneCurve};
use crate::error::{EngineError, Result};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A named, localizable image transformation.
///
/// Implementations must be pure: `process` derives its output solely from
/// the input image, leaves the input untouched, and yields byte-identical
/// results for identical inputs. The `Send + Sync` bound lets registries
/// hand filters to parallel render workers.
pub trait Filter: Send + Sync {
    /// Stable identifier, unique within a registry.
    fn distinct_name(&self) -> &str;

    /// Human-readable name for `locale` (an IETF tag such as `"en"` or
    /// `"zh-Hans"`), if the filter carries one.
    fn localized_name(&self, locale: &str) -> Option<&str>;

    /// Run the filter over `image`.
    fn process(&self, image: &RgbaImage) -> Result<RgbaImage>;

    /// Name to show for `locale`, falling back to the distinct name when no
    /// localization exists. Never fails.
    fn display_name(&self, locale: &str) -> &str {
        self.localized_name(locale)
            .unwrap_or_else(|| self.distinct_name())
    }
}

/// Which earlier result a [`PipelineStep::Blend`] composites against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepInput {
    /// The working image produced by the previous step.
    Current,
    /// The untouched input handed to `process`.
    Original,
}

/// One stage of a [`FilterRecipe`] pipeline.
///
/// Each step transforms a working image that starts out as the `process`
/// input. `Blend` is the one step that reads a second source, and it names
/// that source explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    /// Saturation, brightness, and contrast on the working image.
    Adjust(ColorAdjustment),
    /// Rotate hue by `angle` radians.
    RotateHue { angle: f32 },
    /// Synthesize a flat tint at the working size and composite it over
    /// the working image.
    TintOverlay { color: OverlayColor, mode: BlendMode },
    /// Composite the working image (as foreground) over `base`.
    Blend { base: StepInput, mode: BlendMode },
    /// Remap intensities through a tone curve.
    Curve(ToneCurve),
}

/// A filter defined as data: a distinct name, localized display names, and
/// a fixed pipeline replayed step by step on every `process` call.
///
/// An empty pipeline is a passthrough (the input comes back as a copy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRecipe {
    distinct_name: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    localized_names: HashMap<String, String>,
    #[serde(default)]
    pipeline: Vec<PipelineStep>,
}

impl FilterRecipe {
    pub fn new(distinct_name: impl Into<String>, pipeline: Vec<PipelineStep>) -> Self {
        Self {
            distinct_name: distinct_name.into(),
            localized_names: HashMap::new(),
            pipeline,
        }
    }

    /// Attach one localized display name (builder style).
    pub fn with_localized_name(
        mut self,
        locale: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.localized_names.insert(locale.into(), name.into());
        self
    }

    pub fn pipeline(&self) -> &[PipelineStep] {
        &self.pipeline
    }

    /// Wrap into a registry-ready shared trait object.
    pub fn shared(self) -> Arc<dyn Filter> {
        Arc::new(self)
    }
}

impl Filter for FilterRecipe {
    fn distinct_name(&self) -> &str {
        &self.distinct_name
    }

    fn localized_name(&self, locale: &str) -> Option<&str> {
        self.localized_names.get(locale).map(String::as_str)
    }

    fn process(&self, image: &RgbaImage) -> Result<RgbaImage> {
        if image.width() == 0 || image.height() == 0 {
            return Err(EngineError::EmptyImage);
        }

        let mut working = image.clone();
        for step in &self.pipeline {
            working = match step {
                PipelineStep::Adjust(adjustment) => color::adjust_color(&working, adjustment)?,
                PipelineStep::RotateHue { angle } => color::rotate_hue(&working, *angle)?,
                PipelineStep::TintOverlay { color: tint, mode } => {
                    let overlay =
                        color::make_overlay(*tint, working.width(), working.height())?;
                    color::blend(&working, &overlay, *mode)?
                }
                PipelineStep::Blend { base, mode } => {
                    let base_image = match base {
                        StepInput::Current => &working,
                        StepInput::Original => image,
                    };
                    color::blend(base_image, &working, *mode)?
                }
                PipelineStep::Curve(curve) => curve::apply_tone_curve(&working, curve)?,
            };
        }
        Ok(working)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([
                (x * 9 % 256) as u8,
                (255 - y * 7 % 256) as u8,
                ((x * y) % 256) as u8,
                255,
            ])
        })
    }

    fn s_curve() -> ToneCurve {
        ToneCurve::from_pairs(&[(0.0, 0.0), (0.25, 0.18), (0.75, 0.85), (1.0, 1.0)]).unwrap()
    }

    // =========================================================================
    // display name tests
    // =========================================================================

    #[test]
    fn display_name_prefers_locale_match() {
        let recipe = FilterRecipe::new("vintage", vec![])
            .with_localized_name("en", "Vintage")
            .with_localized_name("fr", "Rétro");
        assert_eq!(recipe.display_name("fr"), "Rétro");
        assert_eq!(recipe.display_name("en"), "Vintage");
    }

    #[test]
    fn display_name_falls_back_to_distinct_name() {
        let localized = FilterRecipe::new("vintage", vec![]).with_localized_name("en", "Vintage");
        assert_eq!(localized.display_name("ja"), "vintage");

        let bare = FilterRecipe::new("punch", vec![]);
        assert_eq!(bare.display_name("en"), "punch");
    }

    // =========================================================================
    // pipeline tests
    // =========================================================================

    #[test]
    fn empty_pipeline_is_passthrough() {
        let recipe = FilterRecipe::new("original", vec![]);
        let img = gradient(20, 15);
        let out = recipe.process(&img).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn steps_run_in_declared_order() {
        let brighten = ColorAdjustment {
            brightness: 0.3,
            ..Default::default()
        };
        let img = gradient(16, 12);

        let recipe = FilterRecipe::new(
            "ordered",
            vec![
                PipelineStep::Adjust(brighten),
                PipelineStep::Curve(s_curve()),
            ],
        );
        let manual = curve::apply_tone_curve(
            &color::adjust_color(&img, &brighten).unwrap(),
            &s_curve(),
        )
        .unwrap();
        assert_eq!(recipe.process(&img).unwrap(), manual);

        // The reverse order is a different transformation.
        let reversed = FilterRecipe::new(
            "reversed",
            vec![
                PipelineStep::Curve(s_curve()),
                PipelineStep::Adjust(brighten),
            ],
        );
        assert_ne!(reversed.process(&img).unwrap(), manual);
    }

    #[test]
    fn tint_overlay_matches_manual_composite() {
        let pink = OverlayColor::new(243, 106, 188, 25);
        let recipe = FilterRecipe::new(
            "tinted",
            vec![PipelineStep::TintOverlay {
                color: pink,
                mode: BlendMode::Screen,
            }],
        );
        let img = gradient(10, 10);
        let overlay = color::make_overlay(pink, 10, 10).unwrap();
        let manual = color::blend(&img, &overlay, BlendMode::Screen).unwrap();
        assert_eq!(recipe.process(&img).unwrap(), manual);
    }

    #[test]
    fn blend_step_can_reach_back_to_the_original() {
        let darken = ColorAdjustment {
            brightness: -0.3,
            ..Default::default()
        };
        let recipe = FilterRecipe::new(
            "ghost",
            vec![
                PipelineStep::Adjust(darken),
                PipelineStep::Blend {
                    base: StepInput::Original,
                    mode: BlendMode::Screen,
                },
            ],
        );
        let img = gradient(12, 8);
        let darkened = color::adjust_color(&img, &darken).unwrap();
        let manual = color::blend(&img, &darkened, BlendMode::Screen).unwrap();
        assert_eq!(recipe.process(&img).unwrap(), manual);
    }

    #[test]
    fn process_is_pure_and_deterministic() {
        let recipe = FilterRecipe::new(
            "probe",
            vec![
                PipelineStep::Adjust(ColorAdjustment {
                    saturation: 1.3,
                    brightness: 0.1,
                    contrast: 1.05,
                }),
                PipelineStep::RotateHue { angle: 0.3 },
                PipelineStep::Curve(s_curve()),
            ],
        );
        let img = gradient(24, 18);
        let before = img.clone();

        let first = recipe.process(&img).unwrap();
        let second = recipe.process(&img).unwrap();

        assert_eq!(img, before, "input must not be mutated");
        assert_eq!(first, second, "identical inputs must give identical bytes");
    }

    #[test]
    fn process_rejects_empty_input() {
        let recipe = FilterRecipe::new("original", vec![]);
        let err = recipe.process(&RgbaImage::new(0, 0)).unwrap_err();
        assert!(matches!(err, EngineError::EmptyImage));
    }

    // =========================================================================
    // serde tests
    // =========================================================================

    #[test]
    fn recipe_parses_from_json() {
        let json = r#"{
            "distinct_name": "dusk",
            "localized_names": {"en": "Dusk", "de": "Dämmerung"},
            "pipeline": [
                {"adjust": {"saturation": 0.9, "brightness": -0.05}},
                {"rotate_hue": {"angle": -0.15}},
                {"tint_overlay": {"color": {"r": 40, "g": 40, "b": 120, "a": 30}, "mode": "screen"}},
                {"curve": [{"x": 0.0, "y": 0.05}, {"x": 0.5, "y": 0.5}, {"x": 1.0, "y": 0.97}]}
            ]
        }"#;

        let recipe: FilterRecipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.distinct_name(), "dusk");
        assert_eq!(recipe.display_name("de"), "Dämmerung");
        assert_eq!(recipe.pipeline().len(), 4);

        let out = recipe.process(&gradient(8, 8)).unwrap();
        assert_eq!(out.dimensions(), (8, 8));
    }

    #[test]
    fn recipe_json_with_invalid_curve_is_rejected() {
        let json = r#"{
            "distinct_name": "broken",
            "pipeline": [
                {"curve": [{"x": 0.0, "y": 0.0}, {"x": 0.9, "y": 0.5}, {"x": 0.4, "y": 1.0}]}
            ]
        }"#;
        assert!(serde_json::from_str::<FilterRecipe>(json).is_err());
    }

    #[test]
    fn recipe_round_trips_through_serde() {
        let recipe = FilterRecipe::new(
            "loop",
            vec![
                PipelineStep::Blend {
                    base: StepInput::Original,
                    mode: BlendMode::Multiply,
                },
                PipelineStep::Curve(s_curve()),
            ],
        )
        .with_localized_name("en", "Loop");

        let json = serde_json::to_string(&recipe).unwrap();
        let back: FilterRecipe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recipe);
    }
}
