use super::{load_settings_with, Settings};

use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(tag: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("smart_city_settings_{tag}_{suffix}.toml"));
    fs::write(&path, contents).expect("write settings");
    path
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn missing_file_yields_defaults() {
    let path = env::temp_dir().join("smart_city_settings_does_not_exist.toml");
    let settings = load_settings_with(&path, env_from(&[]));

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.step_interval(), Duration::from_secs(2));
    assert_eq!(settings.day_night_period(), Duration::from_secs(30));
    assert_eq!(settings.ambient_cars, 5);
}

#[test]
fn file_values_fill_in_over_defaults() {
    let path = temp_settings_file("file_values", "step_interval_ms = 250\n");
    let settings = load_settings_with(&path, env_from(&[]));

    assert_eq!(settings.step_interval_ms, 250);
    assert_eq!(settings.day_night_period_secs, 30);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn env_overrides_win_over_file() {
    let path = temp_settings_file("env_overrides", "step_interval_ms = 250\nambient_cars = 2\n");
    let settings = load_settings_with(
        &path,
        env_from(&[
            ("SMART_CITY_STEP_INTERVAL_MS", "100"),
            ("SMART_CITY_CARS", "9"),
        ]),
    );

    assert_eq!(settings.step_interval_ms, 100);
    assert_eq!(settings.ambient_cars, 9);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn unparsable_env_override_is_ignored() {
    let path = env::temp_dir().join("smart_city_settings_does_not_exist.toml");
    let settings = load_settings_with(
        &path,
        env_from(&[("SMART_CITY_DAY_NIGHT_SECS", "dusk")]),
    );

    assert_eq!(settings.day_night_period_secs, 30);
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let path = temp_settings_file("malformed", "step_interval_ms = \"fast\"");
    let settings = load_settings_with(&path, env_from(&[]));

    assert_eq!(settings, Settings::default());

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn zero_step_interval_is_replaced_with_default() {
    let path = env::temp_dir().join("smart_city_settings_does_not_exist.toml");
    let settings = load_settings_with(
        &path,
        env_from(&[("SMART_CITY_STEP_INTERVAL_MS", "0")]),
    );

    assert_eq!(settings.step_interval_ms, 2000);
}
