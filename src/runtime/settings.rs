use crate::config::Settings;

/// Load settings, falling back to defaults on any load or validation
/// failure. Config is optional; a broken file should never keep the page
/// from starting.
pub fn load_settings() -> Settings {
    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("keepsake: failed to load config, using defaults: {e}");
            return Settings::default();
        }
    };

    if let Err(msg) = settings.validate() {
        eprintln!("keepsake: invalid config, using defaults: {msg}");
        return Settings::default();
    }

    settings
}
