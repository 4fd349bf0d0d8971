//! Ordered, name-unique filter collection.
//!
//! The registry is plain owned state: reads borrow `&self`, the two
//! mutating operations take `&mut self`, so exclusive writes and shared
//! reads are enforced at compile time. Hosts that share one registry across
//! threads wrap it in their own lock; entries are `Arc`s, so handing
//! filters to render workers is a cheap clone.

use crate::error::{EngineError, Result};
use crate::filter::Filter;
use crate::presets;
use std::collections::HashSet;
use std::sync::Arc;

/// Registration order is display order; distinct names are unique.
#[derive(Default)]
pub struct FilterRegistry {
    filters: Vec<Arc<dyn Filter>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-seeded with the built-in presets.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    /// Seed the built-in presets, in their canonical order.
    ///
    /// Idempotent, and a no-op on any non-empty registry so that a host
    /// which registered its own filters first keeps exactly those.
    pub fn register_defaults(&mut self) {
        if self.filters.is_empty() {
            self.filters = presets::defaults();
        }
    }

    /// Append `filters` in iteration order.
    ///
    /// The whole batch is validated first; on a name collision (against
    /// existing entries or within the batch) nothing is added and the
    /// offending name is reported via [`EngineError::DuplicateFilterName`].
    pub fn add(&mut self, filters: impl IntoIterator<Item = Arc<dyn Filter>>) -> Result<()> {
        let incoming: Vec<Arc<dyn Filter>> = filters.into_iter().collect();

        let mut seen: HashSet<&str> = self.filters.iter().map(|f| f.distinct_name()).collect();
        for filter in &incoming {
            if !seen.insert(filter.distinct_name()) {
                return Err(EngineError::DuplicateFilterName(
                    filter.distinct_name().to_string(),
                ));
            }
        }

        self.filters.extend(incoming);
        Ok(())
    }

    /// The filter at `index`, counting from 0 in registration order.
    pub fn filter_at(&self, index: usize) -> Result<&Arc<dyn Filter>> {
        self.filters.get(index).ok_or(EngineError::IndexOutOfRange {
            index,
            count: self.filters.len(),
        })
    }

    /// Look a filter up by its distinct name.
    pub fn by_name(&self, name: &str) -> Option<&Arc<dyn Filter>> {
        self.filters.iter().find(|f| f.distinct_name() == name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// All filters, in registration order.
    pub fn all(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}
