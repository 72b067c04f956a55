//! RON tuning file loading shared by every plugin that has a config.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::error::ConfigError;

/// A tuning struct that can reject values it cannot run with.
pub trait TuningData: DeserializeOwned + Default {
    /// Path relative to the working directory, e.g. `assets/data/parry.ron`.
    const PATH: &'static str;

    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Parse a RON string into a tuning struct.
pub fn parse_ron<T: TuningData>(path: &str, contents: &str) -> Result<T, ConfigError> {
    let data: T = ron::from_str(contents).map_err(|e| ConfigError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })?;
    data.validate()?;
    Ok(data)
}

/// Read and validate a RON file.
pub fn load_ron<T: TuningData>(path: &str) -> Result<T, ConfigError> {
    if !Path::new(path).exists() {
        return Err(ConfigError::FileNotFound(path.to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        details: e.to_string(),
    })?;

    parse_ron(path, &contents)
}

/// Load `T` from its file, falling back to defaults when anything goes wrong.
pub fn load_or_default<T: TuningData>() -> T {
    match load_ron::<T>(T::PATH) {
        Ok(data) => {
            info!("Loaded tuning data from {}", T::PATH);
            data
        }
        Err(ConfigError::FileNotFound(path)) => {
            warn!("Tuning file '{}' not found, using defaults", path);
            T::default()
        }
        Err(e) => {
            error!("{}. Using defaults.", e);
            T::default()
        }
    }
}

/// Insert `T` from disk unless the app already carries one.
pub fn init_tuning<T: TuningData + Resource>(app: &mut App) {
    if app.world().contains_resource::<T>() {
        return;
    }
    app.insert_resource(load_or_default::<T>());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Default, Debug, PartialEq)]
    struct Knobs {
        speed: f32,
    }

    impl TuningData for Knobs {
        const PATH: &'static str = "assets/data/does_not_exist.ron";

        fn validate(&self) -> Result<(), ConfigError> {
            if self.speed < 0.0 {
                return Err(ConfigError::Invalid {
                    field: "speed",
                    details: format!("{} is negative", self.speed),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn parses_valid_ron() {
        let knobs: Knobs = parse_ron("inline", "(speed: 2.5)").unwrap();
        assert_eq!(knobs, Knobs { speed: 2.5 });
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let err = parse_ron::<Knobs>("inline.ron", "(speed: fast)").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { ref path, .. } if path == "inline.ron"));
    }

    #[test]
    fn validation_failures_surface() {
        let err = parse_ron::<Knobs>("inline", "(speed: -1.0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "speed", .. }));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        assert!(matches!(
            load_ron::<Knobs>(Knobs::PATH),
            Err(ConfigError::FileNotFound(_))
        ));
        assert_eq!(load_or_default::<Knobs>(), Knobs::default());
    }
}
