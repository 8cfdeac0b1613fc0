use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
struct DefaultPage {
    title: String,
    url: String,
    icon: String,
    is_public: bool,
    is_admin: bool,
    order: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RedirectConfig {
    landing_file: String,
    authentication_file: String,
    not_found_file: String,
    games_section: String,
    games_landing_file: String,
    target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NavbarConfig {
    schema_version: u32,
    app_id: String,
    privileged_account: String,
    collection_path: String,
    load_timeout_ms: u32,
    hint_visible_ms: u32,
    scroll_settle_ms: u32,
    redirect: RedirectConfig,
    default_pages: Vec<DefaultPage>,
}

fn validate(config: &NavbarConfig, path: &str) {
    if config.schema_version != 1 {
        panic!(
            "navbar config schema mismatch in {path}: expected 1 found {}",
            config.schema_version
        );
    }
    if config.app_id.trim().is_empty() {
        panic!("navbar config in {path} must set a non-empty app_id");
    }
    if config.privileged_account.trim().is_empty() {
        panic!("navbar config in {path} must set a non-empty privileged_account");
    }
    if config.default_pages.is_empty() {
        panic!("navbar config in {path} must declare at least one default page");
    }
    let mut titles = HashSet::new();
    for page in &config.default_pages {
        if !titles.insert(page.title.as_str()) {
            panic!("duplicate default page title `{}` in {path}", page.title);
        }
    }
    if !config
        .default_pages
        .iter()
        .any(|page| page.url == config.redirect.landing_file)
    {
        panic!(
            "navbar config in {path} has no default page for landing file `{}`",
            config.redirect.landing_file
        );
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("navbar.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let config: NavbarConfig = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&config, &path.display().to_string());

    let json = serde_json::to_string_pretty(&config).expect("serialize navbar config");
    let generated = format!(
        "/// Build-time generated navbar configuration JSON.\n\
pub const NAVBAR_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("navbar_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
