//! Tests for configuration loading

use std::fs;

use tempfile::TempDir;

use nblint::config::{CellRenderingMode, Settings};

#[test]
fn explicit_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nblint.toml");
    fs::write(
        &path,
        "max_cells_in_notebook = 10\nmin_md_code_ratio = 0.5\ncell_rendering_mode = \"full\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).unwrap();
    assert_eq!(settings.max_cells_in_notebook, 10);
    assert!((settings.min_md_code_ratio - 0.5).abs() < f64::EPSILON);
    assert_eq!(settings.cell_rendering_mode, CellRenderingMode::Full);
    // untouched fields keep their defaults
    assert_eq!(settings.initial_cells, 3);
}

#[test]
fn filters_load_as_sets() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nblint.toml");
    fs::write(&path, "exclude = [\"untitled-notebook\", \"empty-cells\"]\n").unwrap();

    let settings = Settings::load(Some(&path)).unwrap();
    let exclude = settings.exclude.unwrap();
    assert!(exclude.contains("untitled-notebook"));
    assert!(exclude.contains("empty-cells"));
}

#[test]
fn conflicting_filters_fail_at_load_time() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nblint.toml");
    fs::write(&path, "include = [\"a\"]\nexclude = [\"b\"]\n").unwrap();

    assert!(Settings::load(Some(&path)).is_err());
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nblint.toml");
    fs::write(&path, "max_cellz = 10\n").unwrap();

    assert!(Settings::load(Some(&path)).is_err());
}

#[test]
fn invalid_toml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nblint.toml");
    fs::write(&path, "max_cells_in_notebook = [[").unwrap();

    assert!(Settings::load(Some(&path)).is_err());
}

#[test]
fn missing_explicit_file_is_an_error() {
    assert!(Settings::load(Some(std::path::Path::new("/nonexistent/nblint.toml"))).is_err());
}
