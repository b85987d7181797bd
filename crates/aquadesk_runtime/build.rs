use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowSize {
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowPosition {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppManifest {
    #[serde(skip_serializing)]
    schema_version: u32,
    id: String,
    name: String,
    icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_size: Option<WindowSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_position: Option<WindowPosition>,
    #[serde(default)]
    is_modal: bool,
    #[serde(default)]
    disabled_buttons: Vec<String>,
    #[serde(default = "default_zone")]
    dock_zone: String,
    #[serde(default)]
    is_pinned: bool,
    #[serde(default = "default_true")]
    show_in_dock: bool,
}

fn default_zone() -> String {
    "apps".to_string()
}

fn default_true() -> bool {
    true
}

/// Built-in applications in dock order.
fn app_manifest_paths(root: &Path) -> Vec<PathBuf> {
    ["finder", "about", "browser", "itunes", "notes", "trash"]
        .iter()
        .map(|name| root.join("apps").join(format!("{name}.manifest.toml")))
        .collect()
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let mut manifests = Vec::<AppManifest>::new();

    for path in app_manifest_paths(&crate_root) {
        println!("cargo:rerun-if-changed={}", path.display());
        let raw = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
        let manifest: AppManifest = toml::from_str(&raw)
            .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
        if manifest.schema_version != MANIFEST_SCHEMA_VERSION {
            panic!(
                "manifest schema mismatch in {}: expected {MANIFEST_SCHEMA_VERSION} found {}",
                path.display(),
                manifest.schema_version
            );
        }
        if !matches!(manifest.dock_zone.as_str(), "apps" | "system") {
            panic!(
                "unknown dock zone `{}` in {}",
                manifest.dock_zone,
                path.display()
            );
        }
        manifests.push(manifest);
    }

    let json = serde_json::to_string_pretty(&manifests).expect("serialize app manifest catalog");
    let generated = format!(
        "/// Build-time generated app manifest catalog JSON.\n\
const APP_MANIFEST_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
