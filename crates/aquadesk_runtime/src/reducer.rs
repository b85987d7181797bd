//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use thiserror::Error;

use crate::dock;
use crate::gesture::{GestureCommit, GestureSession};
use crate::model::{
    AppId, Application, DesktopIconId, DesktopState, GestureKind, InteractionState,
    OpenWindowRequest, Point, PointerPosition, Size, WindowButton, WindowId,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Insert or replace a catalog entry.
    RegisterApp(Application),
    /// Mark an application running and active without touching its windows.
    LaunchApp {
        /// Application to mark running.
        app_id: AppId,
    },
    /// Remove an application from the running set without touching its windows.
    CloseApp {
        /// Application to drop from the running set.
        app_id: AppId,
    },
    /// Point the menu bar at an application, or clear it.
    SetActiveApp {
        /// New active application.
        app_id: Option<AppId>,
    },
    /// Dock click or desktop double-click: focus the app's window or open its first one.
    OpenApp {
        /// Application to open.
        app_id: AppId,
    },
    /// Soft-close every visible window of an application.
    HideApp {
        /// Application whose windows should be hidden.
        app_id: AppId,
    },
    /// Hard-close every window of an application and terminate it.
    QuitApp {
        /// Application to quit.
        app_id: AppId,
    },
    /// Move a dock entry between two catalog indices in the same zone.
    ReorderDock {
        /// Catalog index being dragged.
        from: usize,
        /// Catalog index it is dropped on.
        to: usize,
    },
    /// Hide an application's dock icon.
    HideFromDock {
        /// Application to hide.
        app_id: AppId,
    },
    /// Show a previously hidden dock icon.
    ShowInDock {
        /// Application to show.
        app_id: AppId,
    },
    /// Open a window directly from a request.
    CreateWindow(OpenWindowRequest),
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Toggle the minimized state of a window.
    MinimizeWindow {
        /// Window to minimize or restore.
        window_id: WindowId,
    },
    /// Toggle the maximized state of a window.
    MaximizeWindow {
        /// Window to maximize or restore.
        window_id: WindowId,
    },
    /// Soft close: hide the window and keep its application running.
    CloseWindow {
        /// Window to hide.
        window_id: WindowId,
    },
    /// Remove the window and quit its application.
    HardCloseWindow {
        /// Window to remove.
        window_id: WindowId,
    },
    /// Commit a window position.
    SetWindowPosition {
        /// Window to move.
        window_id: WindowId,
        /// New top-left corner.
        position: Point,
    },
    /// Commit a window size.
    SetWindowSize {
        /// Window to resize.
        window_id: WindowId,
        /// New outer size.
        size: Size,
    },
    /// Place an application icon on the desktop and remove it from the dock.
    PlaceOnDesktop {
        /// Application to place.
        app_id: AppId,
        /// Icon position on the desktop surface.
        position: Point,
    },
    /// Remove a desktop icon, returning the application to the dock once no icon remains.
    RemoveDesktopIcon {
        /// Icon to remove.
        icon_id: DesktopIconId,
    },
    /// Commit a desktop icon position.
    MoveDesktopIcon {
        /// Icon to move.
        icon_id: DesktopIconId,
        /// New icon position.
        position: Point,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Begin resizing a window from its south-east handle.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Pointer position at resize start.
        pointer: PointerPosition,
        /// Browser viewport, used to resolve the on-screen size of a maximized window.
        viewport: Size,
    },
    /// Update the in-progress gesture buffer.
    UpdateGesture {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Pointer released: commit the gesture buffer once and release it.
    EndGesture,
    /// Abandon the gesture buffer without committing.
    CancelGesture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the presentation layer.
pub enum RuntimeEffect {
    /// Move keyboard focus into the newly focused window.
    FocusWindowInput(WindowId),
    /// An application entered the running set.
    AppLaunched(AppId),
    /// An application left the running set.
    AppTerminated(AppId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Caller-side constraint violations. State is left untouched when one is returned.
pub enum ReducerError {
    /// Pinned dock entries cannot be reordered.
    #[error("application `{0}` is pinned to the dock")]
    PinnedApp(AppId),
    /// Dock entries only move within their own zone.
    #[error("application `{app_id}` cannot move across dock zones")]
    CrossZoneReorder {
        /// Entry being dragged.
        app_id: AppId,
    },
    /// A reorder index does not address a catalog entry.
    #[error("dock reorder {from} -> {to} is out of range")]
    ReorderOutOfRange {
        /// Source index.
        from: usize,
        /// Target index.
        to: usize,
    },
    /// The application disabled this title-bar button.
    #[error("{button:?} button is disabled for `{app_id}`")]
    ButtonDisabled {
        /// Owning application.
        app_id: AppId,
        /// Disabled button.
        button: WindowButton,
    },
    /// Modal windows have a fixed position and size.
    #[error("window of modal application `{app_id}` cannot be moved or resized")]
    ModalWindow {
        /// Owning application.
        app_id: AppId,
    },
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// Actions that reference an unknown window, icon, or application are silent no-ops and return
/// an empty effect list.
///
/// # Errors
///
/// Returns a [`ReducerError`] when the action breaks a dock or window-control constraint. No
/// state is mutated in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::RegisterApp(app) => {
            state.registry.register(app);
        }
        DesktopAction::LaunchApp { app_id } => {
            launch_app(state, &app_id, &mut effects);
        }
        DesktopAction::CloseApp { app_id } => {
            terminate_app(state, &app_id, &mut effects);
        }
        DesktopAction::SetActiveApp { app_id } => {
            state.registry.set_active(app_id);
        }
        DesktopAction::OpenApp { app_id } => {
            let Some(app) = state.registry.app(&app_id) else {
                tracing::debug!(%app_id, "open ignored: unknown application");
                return Ok(effects);
            };
            let request = OpenWindowRequest::for_app(app);
            launch_app(state, &app_id, &mut effects);
            let window_id = match state.windows.preferred_window_for_app(&app_id) {
                Some(window_id) => {
                    state.windows.focus(window_id);
                    window_id
                }
                None => state.windows.create(request),
            };
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::HideApp { app_id } => {
            let visible: Vec<WindowId> = state
                .windows
                .windows_for_app(&app_id)
                .filter(|w| w.is_visible())
                .map(|w| w.id)
                .collect();
            for window_id in visible {
                state.windows.hide(window_id);
            }
        }
        DesktopAction::QuitApp { app_id } => {
            let owned: Vec<WindowId> = state
                .windows
                .windows_for_app(&app_id)
                .map(|w| w.id)
                .collect();
            for window_id in owned {
                state.windows.hard_close(window_id);
            }
            terminate_app(state, &app_id, &mut effects);
            sync_active_app(state, &mut effects);
        }
        DesktopAction::ReorderDock { from, to } => {
            dock::check_reorder(state, from, to)?;
            state.registry.reorder(from, to);
        }
        DesktopAction::HideFromDock { app_id } => {
            state.registry.hide_from_dock(&app_id);
        }
        DesktopAction::ShowInDock { app_id } => {
            state.registry.show_in_dock(&app_id);
        }
        DesktopAction::CreateWindow(request) => {
            let app_id = request.app_id.clone();
            launch_app(state, &app_id, &mut effects);
            let window_id = state.windows.create(request);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::FocusWindow { window_id } => {
            if state.windows.focus(window_id) {
                sync_active_app(state, &mut effects);
            } else {
                tracing::debug!(window_id = window_id.0, "focus ignored: unknown window");
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            ensure_button_enabled(state, window_id, WindowButton::Minimize)?;
            state.windows.minimize(window_id);
            if state.windows.focused_window_id() == Some(window_id) {
                sync_active_app(state, &mut effects);
            }
        }
        DesktopAction::MaximizeWindow { window_id } => {
            ensure_button_enabled(state, window_id, WindowButton::Maximize)?;
            state.windows.maximize(window_id);
        }
        DesktopAction::CloseWindow { window_id } => {
            state.windows.hide(window_id);
        }
        DesktopAction::HardCloseWindow { window_id } => {
            let Some(removed) = state.windows.hard_close(window_id) else {
                tracing::debug!(window_id = window_id.0, "hard close ignored: unknown window");
                return Ok(effects);
            };
            terminate_app(state, &removed.app_id, &mut effects);
            sync_active_app(state, &mut effects);
        }
        DesktopAction::SetWindowPosition {
            window_id,
            position,
        } => {
            state.windows.set_position(window_id, position);
        }
        DesktopAction::SetWindowSize { window_id, size } => {
            state.windows.set_size(window_id, size);
        }
        DesktopAction::PlaceOnDesktop { app_id, position } => {
            if state.registry.app(&app_id).is_none() {
                tracing::debug!(%app_id, "desktop placement ignored: unknown application");
                return Ok(effects);
            }
            state.registry.hide_from_dock(&app_id);
            let icon_id = state.placements.add(app_id.clone(), position);
            tracing::trace!(%app_id, icon_id = icon_id.0, "placed on desktop");
        }
        DesktopAction::RemoveDesktopIcon { icon_id } => {
            if let Some(icon) = state.placements.remove(icon_id) {
                if !state.placements.has_app(&icon.app_id) {
                    state.registry.show_in_dock(&icon.app_id);
                }
            }
        }
        DesktopAction::MoveDesktopIcon { icon_id, position } => {
            state.placements.move_icon(icon_id, position);
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let Some(window) = state.windows.window(window_id) else {
                return Ok(effects);
            };
            ensure_not_modal(state, &window.app_id)?;
            if window.is_maximized {
                return Ok(effects);
            }
            let rect_start = window.rect();
            state.windows.focus(window_id);
            sync_active_app(state, &mut effects);
            interaction.gesture = Some(GestureSession::begin(
                window_id,
                GestureKind::Move,
                pointer,
                rect_start,
            ));
        }
        DesktopAction::BeginResize {
            window_id,
            pointer,
            viewport,
        } => {
            let Some(window) = state.windows.window(window_id) else {
                return Ok(effects);
            };
            ensure_not_modal(state, &window.app_id)?;
            if window.is_maximized {
                let screen = state.workspace(viewport);
                state.windows.restore_from_maximized(window_id, screen);
            }
            let Some(rect_start) = state.windows.window(window_id).map(|w| w.rect()) else {
                return Ok(effects);
            };
            state.windows.focus(window_id);
            sync_active_app(state, &mut effects);
            interaction.gesture = Some(GestureSession::begin(
                window_id,
                GestureKind::Resize,
                pointer,
                rect_start,
            ));
        }
        DesktopAction::UpdateGesture { pointer } => {
            if let Some(session) = interaction.gesture.as_mut() {
                session.update(pointer, state.config.size_limits());
            }
        }
        DesktopAction::EndGesture => {
            if let Some(session) = interaction.gesture.take() {
                match session.finish() {
                    GestureCommit::Position {
                        window_id,
                        position,
                    } => {
                        state.windows.set_position(window_id, position);
                    }
                    GestureCommit::Size { window_id, size } => {
                        state.windows.set_size(window_id, size);
                    }
                }
            }
        }
        DesktopAction::CancelGesture => {
            interaction.gesture = None;
        }
    }

    Ok(effects)
}

fn launch_app(state: &mut DesktopState, app_id: &AppId, effects: &mut Vec<RuntimeEffect>) {
    let was_running = state.registry.is_running(app_id);
    if state.registry.launch(app_id) && !was_running {
        tracing::debug!(%app_id, "application launched");
        effects.push(RuntimeEffect::AppLaunched(app_id.clone()));
    }
}

fn terminate_app(state: &mut DesktopState, app_id: &AppId, effects: &mut Vec<RuntimeEffect>) {
    if state.registry.close(app_id) {
        tracing::debug!(%app_id, "application terminated");
        effects.push(RuntimeEffect::AppTerminated(app_id.clone()));
    }
}

/// Points the active application at the focused window's owner and requests input focus.
fn sync_active_app(state: &mut DesktopState, effects: &mut Vec<RuntimeEffect>) {
    let Some(focused) = state
        .windows
        .focused_window_id()
        .and_then(|id| state.windows.window(id))
    else {
        return;
    };
    let (window_id, app_id) = (focused.id, focused.app_id.clone());
    if state.registry.is_running(&app_id) {
        state.registry.set_active(Some(app_id));
    }
    effects.push(RuntimeEffect::FocusWindowInput(window_id));
}

fn ensure_button_enabled(
    state: &DesktopState,
    window_id: WindowId,
    button: WindowButton,
) -> Result<(), ReducerError> {
    let Some(app) = state
        .windows
        .window(window_id)
        .and_then(|w| state.registry.app(&w.app_id))
    else {
        return Ok(());
    };
    if app.button_enabled(button) {
        Ok(())
    } else {
        Err(ReducerError::ButtonDisabled {
            app_id: app.id.clone(),
            button,
        })
    }
}

fn ensure_not_modal(state: &DesktopState, app_id: &AppId) -> Result<(), ReducerError> {
    match state.registry.app(app_id) {
        Some(app) if app.is_modal => Err(ReducerError::ModalWindow {
            app_id: app_id.clone(),
        }),
        _ => Ok(()),
    }
}
