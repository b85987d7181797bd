//! Window lifecycle engine: geometry, stacking order, focus, and visibility flags.
//!
//! Every mutator is a silent no-op for an unknown [`WindowId`] and reports whether state changed.
//! Callers (the desktop reducer) are responsible for application-level policy such as disabled
//! title-bar buttons; the engine accepts any command for a known window.

use serde::{Deserialize, Serialize};

use crate::model::{AppId, OpenWindowRequest, Point, Size, WindowId, WindowRecord, WindowRect};

/// Geometry and stacking defaults applied to newly created windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDefaults {
    /// Position of the first window when the caller supplies none.
    pub cascade_origin: Point,
    /// Diagonal offset applied once per already-open window.
    pub cascade_step: i32,
    pub default_size: Size,
    pub first_z_index: u32,
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            cascade_origin: Point::new(100, 100),
            cascade_step: 30,
            default_size: Size::default(),
            first_z_index: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    next_window_id: u64,
    next_z_index: u32,
    active_window: Option<WindowId>,
    defaults: WindowDefaults,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(WindowDefaults::default())
    }
}

impl WindowManager {
    pub fn new(defaults: WindowDefaults) -> Self {
        Self {
            windows: Vec::new(),
            next_window_id: 1,
            next_z_index: defaults.first_z_index,
            active_window: None,
            defaults,
        }
    }

    /// All windows in creation order, including minimized and hidden ones.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.active_window
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows.iter().find(|w| w.is_focused).map(|w| w.id)
    }

    pub fn next_z_index(&self) -> u32 {
        self.next_z_index
    }

    pub fn defaults(&self) -> WindowDefaults {
        self.defaults
    }

    pub fn windows_for_app<'a>(
        &'a self,
        app_id: &'a AppId,
    ) -> impl Iterator<Item = &'a WindowRecord> + 'a {
        self.windows.iter().filter(move |w| w.app_id == *app_id)
    }

    /// Picks the window a launcher click should bring forward for `app_id`.
    ///
    /// Prefers the focused visible window, then the frontmost visible one, then the frontmost of
    /// any state.
    pub fn preferred_window_for_app(&self, app_id: &AppId) -> Option<WindowId> {
        self.frontmost_for_app(app_id, |w| w.is_visible() && w.is_focused)
            .or_else(|| self.frontmost_for_app(app_id, WindowRecord::is_visible))
            .or_else(|| self.frontmost_for_app(app_id, |_| true))
    }

    fn frontmost_for_app(
        &self,
        app_id: &AppId,
        filter: impl Fn(&WindowRecord) -> bool,
    ) -> Option<WindowId> {
        self.windows_for_app(app_id)
            .filter(|w| filter(w))
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    /// Visible windows back-to-front.
    pub fn stacking_order(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| w.is_visible()).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    /// Minimized windows in the order they should appear in the dock strip.
    pub fn minimized_windows(&self) -> Vec<&WindowRecord> {
        let mut minimized: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| w.is_minimized).collect();
        minimized.sort_by_key(|w| w.z_index);
        minimized
    }

    /// Opens a new focused window on top of the stack and returns its id.
    pub fn create(&mut self, req: OpenWindowRequest) -> WindowId {
        let window_id = WindowId(self.next_window_id);
        self.next_window_id = self.next_window_id.saturating_add(1);

        let open = i32::try_from(self.windows.len()).unwrap_or(i32::MAX);
        let stagger = self.defaults.cascade_step.saturating_mul(open);
        let position = req
            .position
            .unwrap_or_else(|| self.defaults.cascade_origin.offset(stagger, stagger));
        let z_index = self.take_z_index();

        for window in &mut self.windows {
            window.is_focused = false;
        }
        self.windows.push(WindowRecord {
            id: window_id,
            app_id: req.app_id,
            title: req.title,
            position,
            size: req.size.unwrap_or(self.defaults.default_size),
            z_index,
            is_focused: true,
            is_minimized: false,
            is_hidden: false,
            is_maximized: false,
        });
        self.active_window = Some(window_id);
        window_id
    }

    /// Focuses and raises `window_id`, restoring it if it was minimized or hidden.
    pub fn focus(&mut self, window_id: WindowId) -> bool {
        let Some(index) = self.index_of(window_id) else {
            return false;
        };
        let z_index = self.take_z_index();
        for window in &mut self.windows {
            window.is_focused = false;
        }
        let window = &mut self.windows[index];
        window.is_focused = true;
        window.is_minimized = false;
        window.is_hidden = false;
        window.z_index = z_index;
        self.active_window = Some(window_id);
        true
    }

    /// Toggles the minimized flag. Un-minimizing focuses and raises the window.
    pub fn minimize(&mut self, window_id: WindowId) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        if window.is_minimized {
            return self.focus(window_id);
        }
        window.is_minimized = true;
        window.is_focused = false;
        self.release_active(window_id);
        true
    }

    /// Soft close: the record stays so the window can be reopened in place.
    pub fn hide(&mut self, window_id: WindowId) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        window.is_hidden = true;
        window.is_focused = false;
        self.release_active(window_id);
        true
    }

    /// Removes the window and points the active window at the highest remaining z-index.
    ///
    /// That survivor is focused and raised only when it is visible; a minimized or hidden one
    /// becomes active without taking focus. Returns the removed record so the caller can
    /// terminate its application.
    pub fn hard_close(&mut self, window_id: WindowId) -> Option<WindowRecord> {
        let index = self.index_of(window_id)?;
        let removed = self.windows.remove(index);

        if self.focused_window_id().is_none() {
            let top = self
                .windows
                .iter()
                .max_by_key(|w| w.z_index)
                .map(|w| (w.id, w.is_visible()));
            match top {
                Some((top, true)) => {
                    self.focus(top);
                }
                Some((top, false)) => self.active_window = Some(top),
                None => self.active_window = None,
            }
        } else if self.active_window == Some(window_id) {
            self.active_window = self.focused_window_id();
        }
        Some(removed)
    }

    /// Toggles the maximized flag. Stored geometry is kept for the restored state.
    pub fn maximize(&mut self, window_id: WindowId) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        window.is_maximized = !window.is_maximized;
        true
    }

    /// Leaves the maximized state adopting `screen` as the explicit geometry.
    ///
    /// Used when a resize starts on a maximized window so the gesture continues from what is on
    /// screen instead of jumping back to the pre-maximize rectangle.
    pub fn restore_from_maximized(&mut self, window_id: WindowId, screen: WindowRect) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        if !window.is_maximized {
            return false;
        }
        window.is_maximized = false;
        window.position = screen.position();
        window.size = screen.size();
        true
    }

    pub fn set_position(&mut self, window_id: WindowId, position: Point) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        window.position = position;
        true
    }

    pub fn set_size(&mut self, window_id: WindowId, size: Size) -> bool {
        let Some(window) = self.window_mut(window_id) else {
            return false;
        };
        window.size = size;
        true
    }

    fn take_z_index(&mut self) -> u32 {
        let z_index = self.next_z_index;
        self.next_z_index = self.next_z_index.saturating_add(1);
        z_index
    }

    fn release_active(&mut self, window_id: WindowId) {
        if self.active_window == Some(window_id) {
            self.active_window = None;
        }
    }

    fn index_of(&self, window_id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == window_id)
    }

    fn window_mut(&mut self, window_id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == window_id)
    }
}
