//! Long-lived desktop runtime container.
//!
//! [`DesktopRuntime`] owns the desktop and interaction state, dispatches [`DesktopAction`] values
//! through [`reduce_desktop`], and queues the resulting [`RuntimeEffect`] values until the
//! presentation layer drains them.

use std::collections::VecDeque;
use std::path::Path;

use crate::{
    catalog::{builtin_apps, CatalogError, DesktopConfig},
    dock::{self, DockLayout, DockMenuEntry},
    model::{
        AppId, Application, DesktopSnapshot, DesktopState, InteractionState, Size, WindowId,
        WindowRect,
    },
    reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect},
};

#[derive(Debug, Clone)]
pub struct DesktopRuntime {
    state: DesktopState,
    interaction: InteractionState,
    effects: VecDeque<RuntimeEffect>,
}

impl DesktopRuntime {
    /// Boots a runtime with the built-in catalog followed by the apps declared in `config`.
    pub fn new(config: DesktopConfig) -> Result<Self, CatalogError> {
        let builtin = builtin_apps()?;
        Ok(Self::with_catalog(config, builtin))
    }

    /// Boots a runtime from a TOML config file.
    pub fn from_config_path(path: &Path) -> Result<Self, CatalogError> {
        Self::new(DesktopConfig::load(path)?)
    }

    pub fn with_catalog(config: DesktopConfig, catalog: Vec<Application>) -> Self {
        let state = DesktopState::with_catalog(config, catalog);
        tracing::info!(
            apps = state.registry.apps().len(),
            "desktop runtime initialized"
        );
        Self {
            state,
            interaction: InteractionState::default(),
            effects: VecDeque::new(),
        }
    }

    /// Applies `action`. State is committed only when the reducer accepts the action.
    pub fn dispatch(&mut self, action: DesktopAction) -> Result<(), ReducerError> {
        let mut desktop = self.state.clone();
        let mut ui = self.interaction.clone();
        tracing::trace!(?action, "dispatch");

        match reduce_desktop(&mut desktop, &mut ui, action) {
            Ok(new_effects) => {
                self.state = desktop;
                self.interaction = ui;
                self.effects.extend(new_effects);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("desktop reducer error: {err}");
                Err(err)
            }
        }
    }

    /// Takes every queued effect in emission order.
    pub fn drain_effects(&mut self) -> Vec<RuntimeEffect> {
        self.effects.drain(..).collect()
    }

    pub fn pending_effects(&self) -> usize {
        self.effects.len()
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        self.state.snapshot()
    }

    pub fn dock_layout(&self) -> DockLayout {
        dock::dock_layout(&self.state)
    }

    pub fn dock_menu(&self, app_id: &AppId) -> Vec<DockMenuEntry> {
        dock::dock_menu(&self.state, app_id)
    }

    /// Geometry to paint for `window_id`: the live gesture preview when one targets it,
    /// otherwise the committed on-screen rectangle.
    pub fn window_frame(&self, window_id: WindowId, viewport: Size) -> Option<WindowRect> {
        let window = self.state.windows.window(window_id)?;
        if let Some(session) = self
            .interaction
            .gesture
            .as_ref()
            .filter(|session| session.window_id == window_id)
        {
            return Some(session.preview());
        }
        Some(window.screen_rect(self.state.workspace(viewport)))
    }
}
