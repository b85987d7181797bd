//! Dock view models and the launcher-side checks applied before store commands are issued.

use serde::{Deserialize, Serialize};

use crate::model::{AppId, DesktopState, DockZone, WindowId};
use crate::reducer::ReducerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockItem {
    pub app_id: AppId,
    pub name: String,
    pub icon: String,
    pub is_running: bool,
    pub is_pinned: bool,
    /// Index of the entry in the full application catalog, used for reorder commands.
    pub catalog_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimizedWindowItem {
    pub window_id: WindowId,
    pub app_id: AppId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockLayout {
    pub apps: Vec<DockItem>,
    pub system: Vec<DockItem>,
    pub minimized: Vec<MinimizedWindowItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DockMenuEntry {
    Open,
    Hide,
    Quit { app_name: String },
}

pub fn dock_layout(state: &DesktopState) -> DockLayout {
    let zone_items = |zone: DockZone| -> Vec<DockItem> {
        state
            .registry
            .dock_apps(zone)
            .into_iter()
            .filter_map(|app| {
                Some(DockItem {
                    app_id: app.id.clone(),
                    name: app.name.clone(),
                    icon: app.icon.clone(),
                    is_running: state.registry.is_running(&app.id),
                    is_pinned: app.is_pinned,
                    catalog_index: state.registry.position(&app.id)?,
                })
            })
            .collect()
    };

    DockLayout {
        apps: zone_items(DockZone::Apps),
        system: zone_items(DockZone::System),
        minimized: state
            .windows
            .minimized_windows()
            .into_iter()
            .map(|w| MinimizedWindowItem {
                window_id: w.id,
                app_id: w.app_id.clone(),
                title: w.title.clone(),
            })
            .collect(),
    }
}

/// Context-menu entries for a dock icon. Unknown apps get no menu.
pub fn dock_menu(state: &DesktopState, app_id: &AppId) -> Vec<DockMenuEntry> {
    let Some(app) = state.registry.app(app_id) else {
        return Vec::new();
    };
    if !state.registry.is_running(app_id) {
        return vec![DockMenuEntry::Open];
    }

    let mut entries = Vec::new();
    if has_restorable_window(state, app_id) {
        entries.push(DockMenuEntry::Open);
    }
    if has_visible_window(state, app_id) {
        entries.push(DockMenuEntry::Hide);
    }
    entries.push(DockMenuEntry::Quit {
        app_name: app.name.clone(),
    });
    entries
}

pub fn has_visible_window(state: &DesktopState, app_id: &AppId) -> bool {
    state.windows.windows_for_app(app_id).any(|w| w.is_visible())
}

pub fn has_restorable_window(state: &DesktopState, app_id: &AppId) -> bool {
    state.windows.windows_for_app(app_id).any(|w| !w.is_visible())
}

/// Validates a drag-reorder between two catalog indices.
///
/// Both entries must exist, share a dock zone, and be unpinned.
pub fn check_reorder(state: &DesktopState, from: usize, to: usize) -> Result<(), ReducerError> {
    let apps = state.registry.apps();
    let (Some(source), Some(target)) = (apps.get(from), apps.get(to)) else {
        return Err(ReducerError::ReorderOutOfRange { from, to });
    };
    if source.is_pinned {
        return Err(ReducerError::PinnedApp(source.id.clone()));
    }
    if target.is_pinned {
        return Err(ReducerError::PinnedApp(target.id.clone()));
    }
    if source.dock_zone != target.dock_zone {
        return Err(ReducerError::CrossZoneReorder {
            app_id: source.id.clone(),
        });
    }
    Ok(())
}
