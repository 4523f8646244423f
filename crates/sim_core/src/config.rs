use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "smart_city.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub step_interval_ms: u64,
    pub day_night_period_secs: u64,
    pub ambient_cars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            step_interval_ms: 2000,
            day_night_period_secs: 30,
            ambient_cars: 5,
        }
    }
}

impl Settings {
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn day_night_period(&self) -> Duration {
        Duration::from_secs(self.day_night_period_secs)
    }
}

/// Defaults, then `smart_city.toml` (or `path`), then `SMART_CITY_*` env vars.
pub fn load_settings(path: Option<&Path>) -> Settings {
    load_settings_with(
        path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH)),
        |name| std::env::var(name).ok(),
    )
}

pub fn load_settings_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<Settings>(&raw) {
            Ok(file_cfg) => file_cfg,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring malformed settings file");
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };

    if let Some(v) = parse_env(&env, "SMART_CITY_STEP_INTERVAL_MS") {
        settings.step_interval_ms = v;
    }
    if let Some(v) = parse_env(&env, "SMART_CITY_DAY_NIGHT_SECS") {
        settings.day_night_period_secs = v;
    }
    if let Some(v) = parse_env(&env, "SMART_CITY_CARS") {
        settings.ambient_cars = v;
    }

    sanitize(settings)
}

fn parse_env<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = env(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

fn sanitize(mut settings: Settings) -> Settings {
    let defaults = Settings::default();
    if settings.step_interval_ms == 0 {
        tracing::warn!("step interval must be positive; using default");
        settings.step_interval_ms = defaults.step_interval_ms;
    }
    if settings.day_night_period_secs == 0 {
        tracing::warn!("day/night period must be positive; using default");
        settings.day_night_period_secs = defaults.day_night_period_secs;
    }
    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
