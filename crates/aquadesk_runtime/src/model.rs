use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::DesktopConfig, gesture::GestureSession, placement::DesktopPlacementStore,
    registry::ApplicationRegistry, window_manager::WindowManager,
};

pub const DEFAULT_WINDOW_WIDTH: i32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 600;
pub const MENU_BAR_HEIGHT: i32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DesktopIconId(pub u64);

/// Catalog key of a registered application.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AppId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn clamped(self, min: Size, max: Size) -> Self {
        Self {
            width: self.width.clamp(min.width, max.width.max(min.width)),
            height: self.height.clamp(min.height, max.height.max(min.height)),
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn from_parts(position: Point, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            w: size.width,
            h: size.height,
        }
    }

    pub fn position(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Area left for windows once the menu bar strip is removed from a viewport.
    pub fn workspace(viewport: Size, menu_bar_height: i32) -> Self {
        Self {
            x: 0,
            y: menu_bar_height,
            w: viewport.width,
            h: viewport.height.saturating_sub(menu_bar_height).max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockZone {
    Apps,
    System,
}

impl Default for DockZone {
    fn default() -> Self {
        Self::Apps
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowButton {
    Minimize,
    Maximize,
}

/// Catalog entry for a launchable application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: AppId,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub default_size: Option<Size>,
    #[serde(default)]
    pub default_position: Option<Point>,
    /// Fixed position, not draggable, not resizable.
    #[serde(default)]
    pub is_modal: bool,
    #[serde(default)]
    pub disabled_buttons: Vec<WindowButton>,
    #[serde(default)]
    pub dock_zone: DockZone,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default = "default_true")]
    pub show_in_dock: bool,
}

fn default_true() -> bool {
    true
}

impl Application {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: AppId::new(id),
            name: name.into(),
            icon: "Square".to_string(),
            default_size: None,
            default_position: None,
            is_modal: false,
            disabled_buttons: Vec::new(),
            dock_zone: DockZone::Apps,
            is_pinned: false,
            show_in_dock: true,
        }
    }

    pub fn button_enabled(&self, button: WindowButton) -> bool {
        !self.disabled_buttons.contains(&button)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub position: Point,
    pub size: Size,
    pub z_index: u32,
    pub is_focused: bool,
    pub is_minimized: bool,
    pub is_hidden: bool,
    pub is_maximized: bool,
}

impl WindowRecord {
    /// Whether the presentation layer should paint this window at all.
    pub fn is_visible(&self) -> bool {
        !self.is_minimized && !self.is_hidden
    }

    pub fn rect(&self) -> WindowRect {
        WindowRect::from_parts(self.position, self.size)
    }

    /// On-screen geometry: the whole workspace while maximized, the stored geometry otherwise.
    pub fn screen_rect(&self, workspace: WindowRect) -> WindowRect {
        if self.is_maximized {
            workspace
        } else {
            self.rect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopIcon {
    pub id: DesktopIconId,
    pub app_id: AppId,
    pub position: Point,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub app_id: AppId,
    pub title: String,
    pub position: Option<Point>,
    pub size: Option<Size>,
}

impl OpenWindowRequest {
    pub fn new(app_id: impl Into<AppId>, title: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            title: title.into(),
            position: None,
            size: None,
        }
    }

    /// Builds the launch request for a catalog entry using its default geometry.
    pub fn for_app(app: &Application) -> Self {
        Self {
            app_id: app.id.clone(),
            title: app.name.clone(),
            position: app.default_position,
            size: app.default_size,
        }
    }
}

/// Catalog entry joined with its running and dock-visibility flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationView {
    pub app: Application,
    pub is_running: bool,
    pub is_hidden_from_dock: bool,
    pub is_active: bool,
}

/// Everything the presentation layer reads to paint one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopSnapshot {
    pub applications: Vec<ApplicationView>,
    pub windows: Vec<WindowRecord>,
    /// Visible windows back-to-front; minimized and hidden windows are not painted.
    pub stacking: Vec<WindowId>,
    pub desktop_icons: Vec<DesktopIcon>,
    pub active_window: Option<WindowId>,
    pub active_app: Option<AppId>,
}

impl DesktopSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    Move,
    Resize,
}

/// Process-lifetime desktop state: the three stores plus the layout they were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopState {
    pub config: DesktopConfig,
    pub registry: ApplicationRegistry,
    pub windows: WindowManager,
    pub placements: DesktopPlacementStore,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl DesktopState {
    pub fn new(config: DesktopConfig) -> Self {
        Self {
            registry: ApplicationRegistry::new(),
            windows: WindowManager::new(config.window_defaults()),
            placements: DesktopPlacementStore::new(),
            config,
        }
    }

    /// Builds state with the built-in catalog and any inline apps from `config` registered.
    pub fn with_catalog(config: DesktopConfig, builtin: Vec<Application>) -> Self {
        let mut state = Self::new(config);
        for app in builtin {
            state.registry.register(app);
        }
        for app in state.config.apps.clone() {
            state.registry.register(app);
        }
        state
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows.focused_window_id()
    }

    pub fn workspace(&self, viewport: Size) -> WindowRect {
        WindowRect::workspace(viewport, self.config.menu_bar_height)
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            applications: self.registry.views(),
            windows: self.windows.windows().to_vec(),
            stacking: self
                .windows
                .stacking_order()
                .into_iter()
                .map(|w| w.id)
                .collect(),
            desktop_icons: self.placements.icons().to_vec(),
            active_window: self.windows.active_window(),
            active_app: self.registry.active_app().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub gesture: Option<GestureSession>,
}
