//! Desktop configuration: layout settings and the application catalog.
//!
//! Built-in applications come from `apps/*.manifest.toml`, validated and embedded as JSON by the
//! build script. Layout settings and extra applications are read from a TOML document whose
//! fields all have defaults, so an empty file is a valid configuration.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gesture::SizeLimits;
use crate::model::{Application, Point, Size, MENU_BAR_HEIGHT};
use crate::window_manager::WindowDefaults;

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse desktop config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to decode built-in app catalog: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("application id must not be empty")]
    EmptyAppId,
    #[error("application `{0}` is declared more than once")]
    DuplicateApp(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub menu_bar_height: i32,
    pub cascade_origin: Point,
    pub cascade_step: i32,
    pub default_window_size: Size,
    pub first_z_index: u32,
    pub min_window_size: Size,
    pub max_window_size: Size,
    /// Registered after the built-in catalog; an id that matches a built-in replaces it.
    pub apps: Vec<Application>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        let defaults = WindowDefaults::default();
        let limits = SizeLimits::default();
        Self {
            menu_bar_height: MENU_BAR_HEIGHT,
            cascade_origin: defaults.cascade_origin,
            cascade_step: defaults.cascade_step,
            default_window_size: defaults.default_size,
            first_z_index: defaults.first_z_index,
            min_window_size: limits.min,
            max_window_size: limits.max,
            apps: Vec::new(),
        }
    }
}

impl DesktopConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let config: Self = toml::from_str(raw)?;
        validate_apps(&config.apps)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn window_defaults(&self) -> WindowDefaults {
        WindowDefaults {
            cascade_origin: self.cascade_origin,
            cascade_step: self.cascade_step,
            default_size: self.default_window_size,
            first_z_index: self.first_z_index,
        }
    }

    pub fn size_limits(&self) -> SizeLimits {
        SizeLimits {
            min: self.min_window_size,
            max: self.max_window_size,
        }
    }
}

/// Decodes the built-in application catalog in dock order.
pub fn builtin_apps() -> Result<Vec<Application>, CatalogError> {
    let apps: Vec<Application> = serde_json::from_str(APP_MANIFEST_CATALOG_JSON)?;
    validate_apps(&apps)?;
    Ok(apps)
}

fn validate_apps(apps: &[Application]) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for app in apps {
        if app.id.as_str().trim().is_empty() {
            return Err(CatalogError::EmptyAppId);
        }
        if !seen.insert(app.id.as_str()) {
            return Err(CatalogError::DuplicateApp(app.id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AppId, DockZone, WindowButton};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn builtin_catalog_decodes_in_dock_order() {
        let apps = builtin_apps().expect("builtin catalog");
        let ids: Vec<&str> = apps.iter().map(|app| app.id.as_str()).collect();

        assert_eq!(
            ids,
            vec!["finder", "about", "browser", "itunes", "notes", "trash"]
        );
        let finder = &apps[0];
        assert!(finder.is_pinned);
        let about = &apps[1];
        assert!(about.is_modal);
        assert!(!about.button_enabled(WindowButton::Minimize));
        assert!(!about.button_enabled(WindowButton::Maximize));
        let trash = apps.last().expect("trash");
        assert_eq!(trash.dock_zone, DockZone::System);
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = DesktopConfig::from_toml_str("").expect("empty config");

        assert_eq!(config, DesktopConfig::default());
        assert_eq!(config.window_defaults(), WindowDefaults::default());
        assert_eq!(config.size_limits(), SizeLimits::default());
    }

    #[test]
    fn parses_layout_overrides_and_inline_apps() {
        let raw = r#"
menu_bar_height = 24
cascade_step = 20
first_z_index = 1
default_window_size = { width = 640, height = 480 }

[[apps]]
id = "calculator"
name = "Calculator"
icon = "Calculator"
disabled_buttons = ["maximize"]
default_size = { width = 240, height = 320 }

[[apps]]
id = "console"
name = "Console"
icon = "Terminal"
dock_zone = "system"
show_in_dock = false
"#;

        let config = DesktopConfig::from_toml_str(raw).expect("config");

        assert_eq!(config.menu_bar_height, 24);
        assert_eq!(config.cascade_step, 20);
        assert_eq!(config.cascade_origin, Point::new(100, 100));
        assert_eq!(config.default_window_size, Size::new(640, 480));
        assert_eq!(config.apps.len(), 2);
        assert_eq!(config.apps[0].id, AppId::from("calculator"));
        assert_eq!(config.apps[0].default_size, Some(Size::new(240, 320)));
        assert!(!config.apps[0].button_enabled(WindowButton::Maximize));
        assert!(config.apps[0].show_in_dock);
        assert_eq!(config.apps[1].dock_zone, DockZone::System);
        assert!(!config.apps[1].show_in_dock);
    }

    #[test]
    fn rejects_duplicate_and_empty_app_ids() {
        let duplicate = r#"
[[apps]]
id = "notes"
name = "Notes"
icon = "StickyNote"

[[apps]]
id = "notes"
name = "Notes again"
icon = "StickyNote"
"#;
        let err = DesktopConfig::from_toml_str(duplicate).expect_err("duplicate");
        assert!(matches!(err, CatalogError::DuplicateApp(ref id) if id == "notes"));

        let empty = "[[apps]]\nid = \" \"\nname = \"Blank\"\nicon = \"Square\"\n";
        let err = DesktopConfig::from_toml_str(empty).expect_err("empty id");
        assert!(matches!(err, CatalogError::EmptyAppId));
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let path = std::env::temp_dir().join(format!(
            "aquadesk-missing-{}.toml",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ));

        let err = DesktopConfig::load(&path).expect_err("missing config should fail");

        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("aquadesk-missing-"));
    }

    #[test]
    fn load_reads_config_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "aquadesk-config-{}.toml",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ));
        fs::write(&path, "cascade_step = 12\n").expect("write config");

        let config = DesktopConfig::load(&path).expect("load config");
        assert_eq!(config.cascade_step, 12);

        let _ = fs::remove_file(path);
    }
}
