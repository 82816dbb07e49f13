use std::fs;

use tempfile::tempdir;
use tribudget_config::{ConfigError, ConfigManager, Settings};
use tribudget_domain::{DenominationFormat, MAX_DECIMAL_PLACES};

#[test]
fn default_settings_use_dollars_without_suffixes() {
    let settings = Settings::default();

    assert_eq!(settings.currency, "USD");
    assert_eq!(settings.currency_symbol(), "$");
    assert_eq!(settings.denomination, DenominationFormat::None);
    assert_eq!(settings.denomination_options().decimal_places, 1);
}

#[test]
fn manager_persists_and_loads_settings() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut settings = Settings::default();
    settings.currency = "INR".into();
    settings.denomination = DenominationFormat::Indian;

    manager.save(&settings).expect("save settings");
    let loaded = manager.load().expect("load settings");

    assert_eq!(loaded, settings);
    assert_eq!(loaded.denomination_options().currency_symbol, "₹");
    assert!(!manager.settings_path().with_extension("json.tmp").exists());
}

#[test]
fn lenient_fields_fall_back() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"currency":" eur ","denomination":"roman"}"#).unwrap();
    let manager = ConfigManager::new(path, dir.path().join("backups"));

    let loaded = manager.load().expect("load settings");
    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.locale, "en-US");
    assert_eq!(loaded.denomination, DenominationFormat::None);
}

#[test]
fn corrupt_file_errors_but_load_or_default_recovers() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    fs::write(&path, "not json").unwrap();
    let manager = ConfigManager::new(path, dir.path().join("backups"));

    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
    assert_eq!(manager.load_or_default(), Settings::default());
}

#[test]
fn backups_restore_and_list() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut settings = Settings::default();
    settings.denomination = DenominationFormat::Compact;
    let name = manager.backup(&settings, Some("Compact view")).expect("backup");
    assert!(name.ends_with("_compact-view.json"));

    manager.save(&Settings::default()).expect("save settings");
    let restored = manager.restore(&name).expect("restore");
    assert_eq!(restored.denomination, DenominationFormat::Compact);
    assert_eq!(manager.load().unwrap().denomination, DenominationFormat::Compact);

    assert_eq!(manager.list_backups().unwrap(), vec![name]);
    assert!(matches!(
        manager.restore("settings_missing.json"),
        Err(ConfigError::BackupNotFound(_))
    ));
}

#[test]
fn locale_and_decimal_places_reach_the_formatter_options() {
    let settings = Settings {
        locale: "de-DE".into(),
        currency: "EUR".into(),
        denomination: DenominationFormat::Compact,
        decimal_places: 40,
        ..Settings::default()
    };

    let options = settings.denomination_options();
    assert_eq!(options.locale, "de-DE");
    assert_eq!(options.currency_symbol, "€");
    assert_eq!(options.decimal_places, MAX_DECIMAL_PLACES);
}
