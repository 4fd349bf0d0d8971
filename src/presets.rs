//! Built-in filter recipes.
//!
//! Every preset is plain [`FilterRecipe`] data and sticks to one stage
//! order: color adjustment, then hue rotation, then tint overlay, then tone
//! curve (each stage optional). `defaults()` returns them in selection-strip
//! order, passthrough first.

use crate::color::{BlendMode, ColorAdjustment, OverlayColor};
use crate::curve::ToneCurve;
use crate::filter::{Filter, FilterRecipe, PipelineStep};
use std::sync::Arc;

/// Passthrough; the selection strip's unfiltered first entry.
pub fn original() -> FilterRecipe {
    FilterRecipe::new("original", vec![])
        .with_localized_name("en", "Original")
        .with_localized_name("fr", "Originale")
        .with_localized_name("de", "Original")
        .with_localized_name("zh-Hans", "原图")
}

/// Warm seventies look: boosted saturation, a slight hue swing, a pink
/// screen tint at 10% strength, and a shadow-lifting S-curve.
pub fn vintage() -> FilterRecipe {
    FilterRecipe::new(
        "vintage",
        vec![
            PipelineStep::Adjust(ColorAdjustment {
                saturation: 1.3,
                brightness: 0.1,
                contrast: 1.05,
            }),
            PipelineStep::RotateHue { angle: 0.3 },
            PipelineStep::TintOverlay {
                color: OverlayColor::new(243, 106, 188, 25),
                mode: BlendMode::Screen,
            },
            PipelineStep::Curve(ToneCurve::from_static(&[
                (0.0, 0.0),
                (0.25, 0.20),
                (0.5, 0.5),
                (0.75, 0.80),
                (1.0, 1.0),
            ])),
        ],
    )
    .with_localized_name("en", "Vintage")
    .with_localized_name("fr", "Rétro")
    .with_localized_name("de", "Retro")
    .with_localized_name("zh-Hans", "复古")
}

/// Late-afternoon warmth: amber screen tint over a gently saturated base.
pub fn golden() -> FilterRecipe {
    FilterRecipe::new(
        "golden",
        vec![
            PipelineStep::Adjust(ColorAdjustment {
                saturation: 1.15,
                brightness: 0.05,
                ..Default::default()
            }),
            PipelineStep::TintOverlay {
                color: OverlayColor::new(255, 170, 60, 28),
                mode: BlendMode::Screen,
            },
            PipelineStep::Curve(ToneCurve::from_static(&[
                (0.0, 0.02),
                (0.5, 0.54),
                (1.0, 0.98),
            ])),
        ],
    )
    .with_localized_name("en", "Golden")
    .with_localized_name("fr", "Doré")
}

/// Washed-out film look: muted colors, lifted blacks, softened whites.
pub fn fade() -> FilterRecipe {
    FilterRecipe::new(
        "fade",
        vec![
            PipelineStep::Adjust(ColorAdjustment {
                saturation: 0.8,
                brightness: 0.06,
                contrast: 0.9,
            }),
            PipelineStep::TintOverlay {
                color: OverlayColor::new(250, 250, 245, 20),
                mode: BlendMode::Normal,
            },
            PipelineStep::Curve(ToneCurve::from_static(&[
                (0.0, 0.08),
                (0.5, 0.5),
                (1.0, 0.95),
            ])),
        ],
    )
    .with_localized_name("en", "Fade")
    .with_localized_name("zh-Hans", "褪色")
}

/// Contrasty black and white.
pub fn mono() -> FilterRecipe {
    FilterRecipe::new(
        "mono",
        vec![
            PipelineStep::Adjust(ColorAdjustment {
                saturation: 0.0,
                contrast: 1.1,
                ..Default::default()
            }),
            PipelineStep::Curve(ToneCurve::from_static(&[
                (0.0, 0.0),
                (0.25, 0.21),
                (0.75, 0.82),
                (1.0, 1.0),
            ])),
        ],
    )
    .with_localized_name("en", "Mono")
    .with_localized_name("de", "Schwarzweiß")
}

/// Cool cast: hue nudged toward cyan with a pale blue screen tint.
pub fn arctic() -> FilterRecipe {
    FilterRecipe::new(
        "arctic",
        vec![
            PipelineStep::Adjust(ColorAdjustment {
                saturation: 0.9,
                brightness: 0.02,
                ..Default::default()
            }),
            PipelineStep::RotateHue { angle: -0.12 },
            PipelineStep::TintOverlay {
                color: OverlayColor::new(70, 120, 255, 22),
                mode: BlendMode::Screen,
            },
        ],
    )
    .with_localized_name("en", "Arctic")
}

/// Saturation and contrast pushed hard; no localized names on purpose.
pub fn punch() -> FilterRecipe {
    FilterRecipe::new(
        "punch",
        vec![
            PipelineStep::Adjust(ColorAdjustment {
                saturation: 1.4,
                contrast: 1.15,
                ..Default::default()
            }),
            PipelineStep::Curve(ToneCurve::from_static(&[
                (0.0, 0.0),
                (0.3, 0.24),
                (0.7, 0.78),
                (1.0, 1.0),
            ])),
        ],
    )
}

/// All built-ins in selection-strip order.
pub fn defaults() -> Vec<Arc<dyn Filter>> {
    vec![
        original().shared(),
        vintage().shared(),
        golden().shared(),
        fade().shared(),
        mono().shared(),
        arctic().shared(),
        punch().shared(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(32, 24, |x, y| {
            Rgba([(x * 8) as u8, (y * 10) as u8, ((x + y) * 4) as u8, 255])
        })
    }

    #[test]
    fn defaults_have_unique_nonempty_names() {
        let defaults = defaults();
        assert_eq!(defaults.len(), 7);

        let mut names: Vec<&str> = defaults.iter().map(|f| f.distinct_name()).collect();
        assert!(names.iter().all(|n| !n.is_empty()));
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), defaults.len());
    }

    #[test]
    fn passthrough_comes_first() {
        let defaults = defaults();
        assert_eq!(defaults[0].distinct_name(), "original");
        let img = gradient();
        assert_eq!(defaults[0].process(&img).unwrap(), img);
    }

    #[test]
    fn every_default_processes_a_gradient() {
        let img = gradient();
        for filter in defaults() {
            let out = filter.process(&img).unwrap();
            assert_eq!(
                out.dimensions(),
                img.dimensions(),
                "{}",
                filter.distinct_name()
            );
        }
    }

    #[test]
    fn vintage_carries_the_documented_recipe() {
        let recipe = vintage();
        let steps = recipe.pipeline();
        assert_eq!(steps.len(), 4);

        let PipelineStep::Adjust(adjustment) = &steps[0] else {
            panic!("expected adjust first");
        };
        assert_eq!(
            *adjustment,
            ColorAdjustment {
                saturation: 1.3,
                brightness: 0.1,
                contrast: 1.05,
            }
        );

        let PipelineStep::RotateHue { angle } = &steps[1] else {
            panic!("expected hue rotation second");
        };
        assert_eq!(*angle, 0.3);

        let PipelineStep::TintOverlay { color, mode } = &steps[2] else {
            panic!("expected tint overlay third");
        };
        assert_eq!(*color, OverlayColor::new(243, 106, 188, 25));
        assert_eq!(*mode, BlendMode::Screen);

        assert!(matches!(steps[3], PipelineStep::Curve(_)));
    }

    #[test]
    fn built_in_curves_are_monotonic() {
        for recipe in [vintage(), golden(), fade(), mono(), punch()] {
            for step in recipe.pipeline() {
                if let PipelineStep::Curve(curve) = step {
                    let lut = curve.lookup_table();
                    assert!(
                        lut.windows(2).all(|w| w[1] >= w[0]),
                        "{}",
                        recipe.distinct_name()
                    );
                }
            }
        }
    }

    #[test]
    fn locale_tables_are_optional() {
        assert_eq!(vintage().display_name("fr"), "Rétro");
        assert_eq!(vintage().display_name("pt"), "vintage");
        // punch ships no table at all
        assert_eq!(punch().display_name("en"), "punch");
    }
}
