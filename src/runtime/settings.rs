use crate::config;

/// Settings plus the reason they fell back to defaults, if they did.
///
/// The problem is reported once logging is up, since the log file location
/// itself comes from the settings.
pub struct LoadedSettings {
    pub settings: config::Settings,
    pub problem: Option<String>,
}

pub fn load_settings() -> LoadedSettings {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => LoadedSettings {
                settings: s,
                problem: None,
            },
            Err(msg) => LoadedSettings {
                settings: config::Settings::default(),
                problem: Some(format!("invalid config, using defaults: {msg}")),
            },
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => LoadedSettings {
            settings: config::Settings::default(),
            problem: Some(format!("failed to load config, using defaults: {e}")),
        },
    }
}
