//! Application catalog plus the running, active, and dock-hidden bookkeeping around it.

use std::collections::BTreeSet;

use crate::model::{AppId, Application, ApplicationView, DockZone};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationRegistry {
    apps: Vec<Application>,
    running: Vec<AppId>,
    active_app: Option<AppId>,
    hidden_from_dock: BTreeSet<AppId>,
}

impl ApplicationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the catalog entry for `app.id`.
    ///
    /// A replaced entry moves to the end of the catalog; dock order follows catalog order.
    pub fn register(&mut self, app: Application) {
        self.apps.retain(|existing| existing.id != app.id);
        self.apps.push(app);
    }

    /// Marks `app_id` running and active. Unknown ids are ignored.
    pub fn launch(&mut self, app_id: &AppId) -> bool {
        if self.app(app_id).is_none() {
            return false;
        }
        if !self.running.contains(app_id) {
            self.running.push(app_id.clone());
        }
        self.active_app = Some(app_id.clone());
        true
    }

    /// Quits `app_id`, clearing the active pointer when it referenced this app.
    pub fn close(&mut self, app_id: &AppId) -> bool {
        let before = self.running.len();
        self.running.retain(|id| id != app_id);
        if self.active_app.as_ref() == Some(app_id) {
            self.active_app = None;
        }
        self.running.len() != before
    }

    pub fn set_active(&mut self, app_id: Option<AppId>) -> bool {
        if let Some(id) = app_id.as_ref() {
            if self.app(id).is_none() {
                return false;
            }
        }
        self.active_app = app_id;
        true
    }

    /// Moves the catalog entry at `from` to `to`.
    ///
    /// Zone and pinned constraints are the caller's responsibility; out-of-range indices are
    /// ignored.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.apps.len() || to >= self.apps.len() {
            return false;
        }
        if from == to {
            return true;
        }
        let app = self.apps.remove(from);
        self.apps.insert(to, app);
        true
    }

    pub fn hide_from_dock(&mut self, app_id: &AppId) -> bool {
        if self.app(app_id).is_none() {
            return false;
        }
        self.hidden_from_dock.insert(app_id.clone())
    }

    pub fn show_in_dock(&mut self, app_id: &AppId) -> bool {
        self.hidden_from_dock.remove(app_id)
    }

    pub fn apps(&self) -> &[Application] {
        &self.apps
    }

    pub fn app(&self, app_id: &AppId) -> Option<&Application> {
        self.apps.iter().find(|app| app.id == *app_id)
    }

    pub fn position(&self, app_id: &AppId) -> Option<usize> {
        self.apps.iter().position(|app| app.id == *app_id)
    }

    /// Running app ids in launch order.
    pub fn running(&self) -> &[AppId] {
        &self.running
    }

    pub fn is_running(&self, app_id: &AppId) -> bool {
        self.running.contains(app_id)
    }

    pub fn active_app(&self) -> Option<&AppId> {
        self.active_app.as_ref()
    }

    pub fn is_hidden_from_dock(&self, app_id: &AppId) -> bool {
        self.hidden_from_dock.contains(app_id)
    }

    /// Catalog entries that belong in `zone` of the dock, in catalog order.
    pub fn dock_apps(&self, zone: DockZone) -> Vec<&Application> {
        self.apps
            .iter()
            .filter(|app| app.dock_zone == zone)
            .filter(|app| app.show_in_dock && !self.is_hidden_from_dock(&app.id))
            .collect()
    }

    pub fn views(&self) -> Vec<ApplicationView> {
        self.apps
            .iter()
            .map(|app| ApplicationView {
                app: app.clone(),
                is_running: self.is_running(&app.id),
                is_hidden_from_dock: self.is_hidden_from_dock(&app.id),
                is_active: self.active_app.as_ref() == Some(&app.id),
            })
            .collect()
    }
}
