//! # Tonedeck
//!
//! A photo filter engine: named, localizable filters built from composable
//! color pipelines, plus the sizing flow an editing screen needs to preview
//! them. Tonedeck is a pure in-process library: decoding, encoding, and UI
//! stay on the host's side of the API. The pixel surface is the `image`
//! crate's [`RgbaImage`] (RGBA, 8 bits per channel), re-exported at the
//! crate root.
//!
//! # Architecture: Prepare, Preview, Commit
//!
//! An editing session runs through three steps, each a pure function:
//!
//! ```text
//! 1. Prepare   photo     →  renditions     (aspect-fit full + thumbnail)
//! 2. Preview   thumbnail →  strip          (every filter, in parallel)
//! 3. Commit    full      →  final image    (the one filter picked)
//! ```
//!
//! Nothing is cached and nothing is mutated in place: every operation
//! borrows its inputs and returns a fresh surface. That is what makes step
//! 2 embarrassingly parallel, since the same borrowed thumbnail fans out across
//! the rayon pool with no locks.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`filter`] | The [`Filter`] capability and [`FilterRecipe`], a filter expressed as data |
//! | [`presets`] | Built-in recipes (`original`, `vintage`, `golden`, ...) |
//! | [`registry`] | [`FilterRegistry`], an ordered, name-unique filter collection |
//! | [`engine`] | [`FilterEngine`] facade: preview sizing and strip rendering |
//! | [`color`] | Per-pixel operations: adjust, hue-rotate, overlay, blend |
//! | [`curve`] | Validated tone curves applied through a 256-entry LUT |
//! | [`resize`] | Aspect-fit dimension math and Lanczos3 resampling |
//! | [`error`] | [`EngineError`] and the crate [`Result`] alias |
//!
//! # Design Decisions
//!
//! ## Filters As Data
//!
//! The shipped filters are [`FilterRecipe`] values: a distinct name, a
//! locale table, and a step list. Recipes serialize with serde, so a preset
//! pack is configuration, not code, and a malformed pack fails at parse
//! time (tone curve validation runs inside deserialization). Hosts that
//! need bespoke behavior implement [`Filter`] directly and register the
//! trait object alongside the recipes.
//!
//! ## Explicit State, No Singleton
//!
//! The registry is a plain owned value. Reads borrow `&self`, mutation
//! takes `&mut self`, and entries are `Arc`s, so the compiler enforces the
//! single-writer/many-reader rule, and sharing across threads is the
//! host's explicit choice of lock, not a hidden global.
//!
//! ## Integer-Exact Where It Counts
//!
//! Channel math runs in f32 and rounds (never truncates) back to u8, so
//! the identity adjustment and the identity tone curve reproduce their
//! input bit for bit, and renders are deterministic across runs and
//! thread schedules.

pub mod color;
pub mod curve;
pub mod engine;
pub mod error;
pub mod filter;
pub mod presets;
pub mod registry;
pub mod resize;

pub use color::{
    BlendMode, ColorAdjustment, OverlayColor, adjust_color, blend, make_overlay, rotate_hue,
};
pub use curve::{ToneCurve, ToneCurvePoint, apply_tone_curve};
pub use engine::{FilterEngine, PREVIEW_MARGIN, PreviewRenditions};
pub use error::{EngineError, Result};
pub use filter::{Filter, FilterRecipe, PipelineStep, StepInput};
pub use registry::FilterRegistry;
pub use resize::{aspect_fit_dimensions, resize_aspect_fit};

pub use image::{Rgba, RgbaImage};
