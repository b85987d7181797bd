use aquadesk_runtime::{
    AppId, DesktopAction, DesktopConfig, DesktopRuntime, DockMenuEntry, OpenWindowRequest, Point,
    RuntimeEffect, WindowId, WindowRecord,
};
use pretty_assertions::assert_eq;

fn runtime() -> DesktopRuntime {
    DesktopRuntime::new(DesktopConfig::default()).expect("builtin catalog")
}

fn create(runtime: &mut DesktopRuntime, app_id: &str) -> WindowId {
    runtime
        .dispatch(DesktopAction::CreateWindow(OpenWindowRequest::new(
            app_id, app_id,
        )))
        .expect("create window");
    runtime.state().focused_window_id().expect("new window focused")
}

fn window(runtime: &DesktopRuntime, window_id: WindowId) -> WindowRecord {
    runtime
        .state()
        .windows
        .window(window_id)
        .cloned()
        .expect("window exists")
}

#[test]
fn focusing_an_older_window_raises_it_above_newer_ones() {
    let mut runtime = runtime();
    let a = create(&mut runtime, "finder");
    let b = create(&mut runtime, "notes");

    runtime
        .dispatch(DesktopAction::FocusWindow { window_id: a })
        .expect("focus");

    let (a, b) = (window(&runtime, a), window(&runtime, b));
    assert!(a.is_focused);
    assert!(!b.is_focused);
    assert!(a.z_index > b.z_index);
    assert_eq!(runtime.state().registry.active_app(), Some(&AppId::from("finder")));
}

#[test]
fn minimizing_twice_restores_focus() {
    let mut runtime = runtime();
    let a = create(&mut runtime, "finder");

    runtime
        .dispatch(DesktopAction::MinimizeWindow { window_id: a })
        .expect("minimize");
    assert!(window(&runtime, a).is_minimized);
    assert!(!window(&runtime, a).is_focused);
    assert_eq!(runtime.dock_layout().minimized.len(), 1);

    runtime
        .dispatch(DesktopAction::MinimizeWindow { window_id: a })
        .expect("restore");
    assert!(!window(&runtime, a).is_minimized);
    assert!(window(&runtime, a).is_focused);
    assert!(runtime.dock_layout().minimized.is_empty());
}

#[test]
fn hard_close_terminates_app_and_activates_remaining_window() {
    let mut runtime = runtime();
    let a = create(&mut runtime, "finder");
    let b = create(&mut runtime, "notes");
    runtime.drain_effects();

    runtime
        .dispatch(DesktopAction::HardCloseWindow { window_id: a })
        .expect("hard close");

    let state = runtime.state();
    assert!(!state.registry.is_running(&AppId::from("finder")));
    assert_eq!(state.windows.active_window(), Some(b));
    assert_eq!(
        runtime.drain_effects(),
        vec![
            RuntimeEffect::AppTerminated(AppId::from("finder")),
            RuntimeEffect::FocusWindowInput(b),
        ]
    );
}

#[test]
fn soft_close_keeps_app_running_and_offers_reopen() {
    let mut runtime = runtime();
    let a = create(&mut runtime, "notes");

    runtime
        .dispatch(DesktopAction::CloseWindow { window_id: a })
        .expect("soft close");

    assert!(runtime.state().registry.is_running(&AppId::from("notes")));
    assert!(window(&runtime, a).is_hidden);
    assert_eq!(
        runtime.dock_menu(&AppId::from("notes")),
        vec![
            DockMenuEntry::Open,
            DockMenuEntry::Quit {
                app_name: "Notes".to_string()
            }
        ]
    );
}

#[test]
fn placing_on_desktop_hides_dock_icon_without_touching_catalog() {
    let mut runtime = runtime();
    let catalog_before = runtime.state().registry.apps().to_vec();

    runtime
        .dispatch(DesktopAction::PlaceOnDesktop {
            app_id: AppId::from("notes"),
            position: Point::new(10, 10),
        })
        .expect("place");

    let state = runtime.state();
    assert!(state.registry.is_hidden_from_dock(&AppId::from("notes")));
    assert_eq!(state.registry.apps(), catalog_before.as_slice());
    assert_eq!(state.placements.icons().len(), 1);
    assert_eq!(state.placements.icons()[0].position, Point::new(10, 10));
    assert!(runtime
        .dock_layout()
        .apps
        .iter()
        .all(|item| item.app_id.as_str() != "notes"));
}

#[test]
fn set_position_round_trips_while_maximized() {
    let mut runtime = runtime();
    let a = create(&mut runtime, "browser");
    runtime
        .dispatch(DesktopAction::MaximizeWindow { window_id: a })
        .expect("maximize");

    runtime
        .dispatch(DesktopAction::SetWindowPosition {
            window_id: a,
            position: Point::new(-40, 300),
        })
        .expect("set position");

    let record = window(&runtime, a);
    assert!(record.is_maximized);
    assert_eq!(record.position, Point::new(-40, 300));
}

#[test]
fn quitting_from_the_dock_removes_every_window() {
    let mut runtime = runtime();
    create(&mut runtime, "notes");
    create(&mut runtime, "notes");

    runtime
        .dispatch(DesktopAction::QuitApp {
            app_id: AppId::from("notes"),
        })
        .expect("quit");

    assert!(runtime.state().windows.windows().is_empty());
    assert_eq!(runtime.state().registry.active_app(), None);
    assert_eq!(
        runtime.dock_menu(&AppId::from("notes")),
        vec![DockMenuEntry::Open]
    );
}

#[test]
fn snapshot_serializes_for_the_presentation_layer() {
    let mut runtime = runtime();
    create(&mut runtime, "finder");

    let json = runtime.snapshot().to_json().expect("snapshot json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["windows"][0]["app_id"], "finder");
    assert_eq!(value["windows"][0]["z_index"], 100);
    assert_eq!(value["active_app"], "finder");
}

#[test]
fn snapshot_stacking_lists_visible_windows_back_to_front() {
    let mut runtime = runtime();
    let a = create(&mut runtime, "finder");
    let b = create(&mut runtime, "notes");
    let c = create(&mut runtime, "browser");
    runtime
        .dispatch(DesktopAction::FocusWindow { window_id: a })
        .expect("focus");
    runtime
        .dispatch(DesktopAction::MinimizeWindow { window_id: c })
        .expect("minimize");

    let snapshot = runtime.snapshot();

    assert_eq!(snapshot.stacking, vec![b, a]);
    assert_eq!(snapshot.windows.len(), 3);
}

#[test]
fn hard_close_hands_active_window_to_minimized_survivor() {
    let mut runtime = runtime();
    let a = create(&mut runtime, "finder");
    let b = create(&mut runtime, "notes");
    runtime
        .dispatch(DesktopAction::FocusWindow { window_id: a })
        .expect("focus");
    runtime
        .dispatch(DesktopAction::MinimizeWindow { window_id: b })
        .expect("minimize");

    runtime
        .dispatch(DesktopAction::HardCloseWindow { window_id: a })
        .expect("hard close");

    let snapshot = runtime.snapshot();
    assert_eq!(snapshot.active_window, Some(b));
    assert!(snapshot.stacking.is_empty());
    assert_eq!(runtime.state().focused_window_id(), None);
}
