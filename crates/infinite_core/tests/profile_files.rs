//! Profile persistence through real files.

use std::path::PathBuf;

use infinite_core::{Category, ConfigError, Feature, FeatureRegistry, Profile, Setting, SettingValue};

fn registry() -> FeatureRegistry {
    let mut registry = FeatureRegistry::new();
    registry
        .register(
            Feature::new("Reach", Category::Fighting, "Longer reach")
                .with_setting(Setting::float("ReachDistance", "Reach in blocks", 4.5, 3.0, 7.0)),
        )
        .unwrap();
    registry
        .register(
            Feature::new("Step", Category::Movement, "Taller steps")
                .with_setting(Setting::boolean("AutoJumpAllowed", "Keep auto-jump", true)),
        )
        .unwrap();
    registry
}

/// Temporary profile path, removed when dropped.
struct Scratch(PathBuf);

impl Scratch {
    fn new(name: &str) -> Self {
        Self(std::env::temp_dir().join(format!("infinite-{}-{name}.toml", std::process::id())))
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn test_write_then_load_restores_state() {
    let mut original = registry();
    original.enable("Reach").unwrap();
    original
        .set_setting("Reach", "ReachDistance", SettingValue::Float(6.0))
        .unwrap();

    let scratch = Scratch::new("roundtrip");
    Profile::from_snapshot(&original.snapshot()).write_to(&scratch.0).unwrap();
    let loaded = Profile::from_path(&scratch.0).unwrap();

    let mut restored = registry();
    let report = restored.apply_profile(&loaded);
    assert!(report.is_clean());
    assert_eq!(restored.snapshot(), original.snapshot());
}

#[test]
fn test_missing_file_is_io_error() {
    let scratch = Scratch::new("missing");
    let err = Profile::from_path(&scratch.0).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_scratch_file_is_removed_on_drop() {
    let path = {
        let scratch = Scratch::new("cleanup");
        Profile::from_snapshot(&registry().snapshot()).write_to(&scratch.0).unwrap();
        assert!(scratch.0.exists());
        scratch.0.clone()
    };
    assert!(!path.exists());
}
