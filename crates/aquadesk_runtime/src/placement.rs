//! Icons placed directly on the desktop surface.

use crate::model::{AppId, DesktopIcon, DesktopIconId, Point};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopPlacementStore {
    icons: Vec<DesktopIcon>,
    next_icon_id: u64,
}

impl Default for DesktopPlacementStore {
    fn default() -> Self {
        Self {
            icons: Vec::new(),
            next_icon_id: 1,
        }
    }
}

impl DesktopPlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `app_id` at `position`. The same app may be placed more than once.
    pub fn add(&mut self, app_id: AppId, position: Point) -> DesktopIconId {
        let id = DesktopIconId(self.next_icon_id);
        self.next_icon_id = self.next_icon_id.saturating_add(1);
        self.icons.push(DesktopIcon {
            id,
            app_id,
            position,
        });
        id
    }

    pub fn remove(&mut self, icon_id: DesktopIconId) -> Option<DesktopIcon> {
        let index = self.icons.iter().position(|icon| icon.id == icon_id)?;
        Some(self.icons.remove(index))
    }

    pub fn move_icon(&mut self, icon_id: DesktopIconId, position: Point) -> bool {
        let Some(icon) = self.icons.iter_mut().find(|icon| icon.id == icon_id) else {
            return false;
        };
        icon.position = position;
        true
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn icon(&self, icon_id: DesktopIconId) -> Option<&DesktopIcon> {
        self.icons.iter().find(|icon| icon.id == icon_id)
    }

    pub fn has_app(&self, app_id: &AppId) -> bool {
        self.icons.iter().any(|icon| icon.app_id == *app_id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn add_generates_unique_ids_and_permits_duplicate_apps() {
        let mut store = DesktopPlacementStore::new();

        let first = store.add(AppId::from("notes"), Point::new(10, 10));
        let second = store.add(AppId::from("notes"), Point::new(40, 10));

        assert_ne!(first, second);
        assert_eq!(store.icons().len(), 2);
        assert!(store.has_app(&AppId::from("notes")));
    }

    #[test]
    fn move_updates_position_only() {
        let mut store = DesktopPlacementStore::new();
        let id = store.add(AppId::from("notes"), Point::new(10, 10));

        assert!(store.move_icon(id, Point::new(-5, 300)));

        let icon = store.icon(id).expect("icon");
        assert_eq!(icon.position, Point::new(-5, 300));
        assert_eq!(icon.app_id, AppId::from("notes"));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = DesktopPlacementStore::new();
        store.add(AppId::from("notes"), Point::new(10, 10));
        let before = store.clone();

        assert!(store.remove(DesktopIconId(42)).is_none());
        assert!(!store.move_icon(DesktopIconId(42), Point::new(0, 0)));
        assert_eq!(store, before);
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut store = DesktopPlacementStore::new();
        let first = store.add(AppId::from("notes"), Point::new(0, 0));
        store.remove(first).expect("removed");

        let second = store.add(AppId::from("notes"), Point::new(0, 0));

        assert_ne!(first, second);
        assert!(!store.has_app(&AppId::from("finder")));
    }
}
