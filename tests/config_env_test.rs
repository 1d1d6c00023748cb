//! HERITAGE_* environment overrides.
//!
//! Kept in its own test binary: it mutates the process environment.

use std::env;
use std::fs;

use tempfile::TempDir;

use heritage::config::Settings;

#[test]
fn given_env_vars_when_load_then_override_config_files() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".heritage.toml"),
        r#"
max_depth = 40

[prices]
property = 1000000
land_extension_m2 = 300
"#,
    )
    .unwrap();
    env::set_var("HERITAGE_PRICES__PROPERTY", "2000000");
    env::set_var("HERITAGE_MAX_DEPTH", "20");

    // Act
    let result = Settings::load(Some(dir.path()));
    env::remove_var("HERITAGE_PRICES__PROPERTY");
    env::remove_var("HERITAGE_MAX_DEPTH");
    let settings = result.expect("load settings");

    // Assert
    assert_eq!(settings.prices.property, 2_000_000);
    assert_eq!(settings.max_depth, 20);
    assert_eq!(settings.prices.land_extension_m2, 300);
}
