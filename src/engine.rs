//! Preview facade: the sizing and rendering flow of an editing screen.
//!
//! A host hands over a decoded image once, gets back the two working
//! renditions (preview-sized full image, strip-sized thumbnail base), then
//! renders filters over them on demand. The engine keeps no image state
//! and no caches.

use crate::error::Result;
use crate::filter::Filter;
use crate::registry::FilterRegistry;
use crate::resize::resize_aspect_fit;
use image::RgbaImage;
use rayon::prelude::*;

/// Default inset between the preview box and the rendition inside it.
pub const PREVIEW_MARGIN: u32 = 10;

/// Stateless front door over resizing, filters, and the registry.
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine {
    preview_margin: u32,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self {
            preview_margin: PREVIEW_MARGIN,
        }
    }
}

/// The two working copies an editing session starts from.
#[derive(Debug, Clone)]
pub struct PreviewRenditions {
    /// Sized for the preview area.
    pub full: RgbaImage,
    /// Base image for the filter selection strip.
    pub thumbnail: RgbaImage,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with a custom box inset instead of [`PREVIEW_MARGIN`].
    pub fn with_margin(preview_margin: u32) -> Self {
        Self { preview_margin }
    }

    pub fn preview_margin(&self) -> u32 {
        self.preview_margin
    }

    /// Fit `image` into a square preview box of `box_side` pixels.
    ///
    /// The usable bound is `box_side` minus the margin, applied to both
    /// dimensions; each rendition is an independent aspect-fit resize of
    /// the input. A margin that consumes the whole box leaves a zero bound,
    /// which surfaces as [`InvalidTargetSize`].
    ///
    /// [`InvalidTargetSize`]: crate::EngineError::InvalidTargetSize
    pub fn prepare_preview(&self, image: &RgbaImage, box_side: u32) -> Result<PreviewRenditions> {
        let bound = box_side.saturating_sub(self.preview_margin);
        let full = resize_aspect_fit(image, bound, bound)?;
        let thumbnail = resize_aspect_fit(image, bound, bound)?;
        Ok(PreviewRenditions { full, thumbnail })
    }

    /// Apply `filter` to the thumbnail rendition: one selection-strip entry.
    pub fn render_thumbnail(&self, filter: &dyn Filter, thumbnail: &RgbaImage) -> Result<RgbaImage> {
        filter.process(thumbnail)
    }

    /// Apply `filter` to the full-size rendition (the user picked it).
    pub fn render_full(&self, filter: &dyn Filter, full: &RgbaImage) -> Result<RgbaImage> {
        filter.process(full)
    }

    /// Render the whole selection strip: every registered filter over
    /// `thumbnail`, fanned out across the rayon pool. Output order matches
    /// registry order; any filter error aborts the batch.
    pub fn render_thumbnails(
        &self,
        registry: &FilterRegistry,
        thumbnail: &RgbaImage,
    ) -> Result<Vec<RgbaImage>> {
        registry
            .all()
            .par_iter()
            .map(|filter| filter.process(thumbnail))
            .collect()
    }
}
