use chrono::NaiveDate;
use tempfile::TempDir;
use tribudget::{
    config::{ConfigManager, Settings},
    engine::FixedClock,
    storage::JsonFileStore,
    BudgetApp,
};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

/// Creates an app whose settings point its book into a fresh temporary directory.
/// The returned guard must outlive the app.
pub fn setup_app() -> (TempDir, BudgetApp<JsonFileStore>) {
    let temp = TempDir::new().expect("create temp dir");
    let app = open_app(&temp);
    (temp, app)
}

pub fn open_app(temp: &TempDir) -> BudgetApp<JsonFileStore> {
    let config = ConfigManager::with_base_dir(temp.path().to_path_buf())
        .expect("create config manager for temp dir");
    if !config.settings_path().exists() {
        let settings = Settings {
            data_dir: Some(temp.path().join("data")),
            ..Settings::default()
        };
        config.save(&settings).expect("save settings");
    }
    BudgetApp::open(config)
        .expect("open app")
        .with_clock(FixedClock::on(today()))
}
