//! Application-owned map from host handles to UI roots.
//!
//! A host that shows several UIs (one per window, or one per in-world
//! screen) keeps them here under a handle of its choosing.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tracing::info;
use trellis_render::{OutputTarget, Renderer};

use crate::config::TuiConfig;
use crate::error::{UiError, UiResult};
use crate::input::InputState;
use crate::style::Style;
use crate::tui::Tui;

/// UI roots keyed by a caller-supplied handle.
pub struct UiRegistry<H> {
    instances: HashMap<H, Tui>,
}

impl<H: Eq + Hash> UiRegistry<H> {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Creates a UI for `handle`.
    ///
    /// `target` receives the output size, which is the virtual size scaled
    /// by [`TuiConfig::resolution`].
    ///
    /// # Errors
    ///
    /// Returns [`UiError::DuplicateHandle`] if `handle` already has a UI.
    pub fn create(
        &mut self,
        handle: H,
        config: TuiConfig,
        renderer: Renderer,
        style: Arc<Style>,
        target: impl FnOnce(u32, u32) -> Box<dyn OutputTarget>,
    ) -> UiResult<&mut Tui> {
        if self.instances.contains_key(&handle) {
            return Err(UiError::DuplicateHandle);
        }
        let (width, height) = config.output_size();
        let tui = Tui::new(config, renderer, target(width, height), style);
        info!("Created {}x{} UI instance", width, height);
        Ok(self.instances.entry(handle).or_insert(tui))
    }

    /// Drops the UI of `handle`, returning it.
    pub fn destroy(&mut self, handle: &H) -> Option<Tui> {
        let removed = self.instances.remove(handle);
        if removed.is_some() {
            info!("Destroyed UI instance, {} left", self.instances.len());
        }
        removed
    }

    /// The UI of `handle`.
    #[must_use]
    pub fn get(&self, handle: &H) -> Option<&Tui> {
        self.instances.get(handle)
    }

    /// The UI of `handle`.
    pub fn get_mut(&mut self, handle: &H) -> Option<&mut Tui> {
        self.instances.get_mut(handle)
    }

    /// Updates every UI with the same input.
    pub fn update_all(&mut self, input: &InputState, dt: f32) {
        for tui in self.instances.values_mut() {
            tui.update(input, dt);
        }
    }

    /// Renders every UI.
    ///
    /// # Errors
    ///
    /// Stops at the first UI whose output target cannot be bound.
    pub fn render_all(&mut self) -> UiResult<()> {
        for tui in self.instances.values_mut() {
            tui.render()?;
        }
        Ok(())
    }

    /// Number of live UIs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// True if no UI is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<H: Eq + Hash> Default for UiRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
