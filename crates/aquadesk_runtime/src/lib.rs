//! Window and application lifecycle core for a simulated desktop environment.
//!
//! The crate keeps three stores inside [`DesktopState`]: the application registry, the window
//! lifecycle engine, and the desktop placement store. [`reduce_desktop`] is the only entry point
//! that applies cross-store policy; [`DesktopRuntime`] wraps it with an effect queue for a
//! presentation layer.

pub mod catalog;
pub mod dock;
pub mod gesture;
pub mod model;
pub mod placement;
pub mod reducer;
pub mod registry;
pub mod runtime_context;
pub mod window_manager;

pub use catalog::{builtin_apps, CatalogError, DesktopConfig};
pub use dock::{dock_layout, dock_menu, DockItem, DockLayout, DockMenuEntry};
pub use gesture::{GestureCommit, GestureSession, SizeLimits};
pub use model::*;
pub use placement::DesktopPlacementStore;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use registry::ApplicationRegistry;
pub use runtime_context::DesktopRuntime;
pub use window_manager::{WindowDefaults, WindowManager};
