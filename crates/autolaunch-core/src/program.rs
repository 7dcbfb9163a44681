use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Name used in reports when a descriptor has none.
pub const UNKNOWN_PROGRAM: &str = "Unknown Program";

/// Default program list file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Sample program list written by `autolaunch init`.
pub const SAMPLE_CONFIG: &str = r#"{
  "Programs": [
    {
      "Name": "Notepad",
      "Path": "%WINDIR%\\System32\\notepad.exe",
      "Delay": 5,
      "Enabled": true
    },
    {
      "Name": "Calculator",
      "Path": "%WINDIR%\\System32\\calc.exe",
      "Delay": 2,
      "Enabled": false
    }
  ]
}
"#;

/// On-disk shape of the program list: `{ "Programs": [ ... ] }`.
///
/// A missing `Programs` key deserializes to an empty list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProgramsFile {
    pub programs: Vec<ProgramDescriptor>,
}

/// One configured program.
///
/// Every field except `Path` has a default, applied here at
/// deserialization time rather than at each use site.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProgramDescriptor {
    /// Display label. Defaults to `"Unknown Program"`.
    #[serde(default = "default_name")]
    pub name: String,
    /// Executable path, possibly containing environment variables.
    #[serde(default)]
    pub path: Option<String>,
    /// Seconds to wait before spawning this program. Defaults to `0`.
    #[serde(default)]
    pub delay: f64,
    /// Whether this program takes part in the run. Defaults to `true`.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_name() -> String {
    UNKNOWN_PROGRAM.into()
}

fn default_enabled() -> bool {
    true
}

impl Default for ProgramDescriptor {
    fn default() -> Self {
        Self {
            name: default_name(),
            path: None,
            delay: 0.0,
            enabled: default_enabled(),
        }
    }
}

impl ProgramDescriptor {
    /// Clamps `delay` to a finite, non-negative number of seconds.
    pub fn validate(&mut self) {
        if !self.delay.is_finite() || self.delay < 0.0 {
            self.delay = 0.0;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the path with environment variables expanded.
    ///
    /// `None` when the path is missing or blank.
    pub fn resolve_path(&self) -> Option<String> {
        let raw = self.path.as_deref()?;
        if raw.trim().is_empty() {
            return None;
        }
        let expanded = crate::env::expand(raw);
        if expanded.trim().is_empty() {
            return None;
        }
        Some(expanded)
    }

    /// The delay as a [`Duration`], saturating at [`Duration::MAX`].
    pub fn delay(&self) -> Duration {
        if self.delay.is_nan() || self.delay <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(self.delay).unwrap_or(Duration::MAX)
    }
}

/// Parses a program list from JSON text.
pub fn parse_programs(content: &str) -> Result<Vec<ProgramDescriptor>, serde_json::Error> {
    let file: ProgramsFile = serde_json::from_str(content)?;
    let mut programs = file.programs;
    for program in &mut programs {
        program.validate();
    }
    Ok(programs)
}

/// Reads and parses the program list at `source`.
pub fn read_config(source: &Path) -> Result<Vec<ProgramDescriptor>, ConfigError> {
    let content = std::fs::read_to_string(source).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound {
            path: source.to_path_buf(),
        },
        _ => ConfigError::Unexpected {
            path: source.to_path_buf(),
            source: e,
        },
    })?;
    parse_programs(content.trim_start_matches('\u{feff}')).map_err(|e| ConfigError::Malformed {
        path: source.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        // Arrange
        let json = r#"{"Programs": [{"Path": "C:\\a.exe"}]}"#;

        // Act
        let programs = parse_programs(json).unwrap();

        // Assert
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].name, UNKNOWN_PROGRAM);
        assert_eq!(programs[0].delay, 0.0);
        assert!(programs[0].is_enabled());
    }

    #[test]
    fn sample_config_parses() {
        let programs = parse_programs(SAMPLE_CONFIG).unwrap();

        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].path.as_deref(), Some(r"%WINDIR%\System32\notepad.exe"));
        assert!(!programs[1].is_enabled());
    }

    #[test]
    fn missing_programs_key_is_an_empty_list() {
        let programs = parse_programs("{}").unwrap();

        assert!(programs.is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let json = r#"{"Programs": [{"Name": "A"}, {"Name": "B"}, {"Name": "C"}]}"#;

        let names: Vec<String> = parse_programs(json)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn negative_delay_is_clamped_to_zero() {
        let json = r#"{"Programs": [{"Name": "A", "Delay": -3}]}"#;

        let programs = parse_programs(json).unwrap();

        assert_eq!(programs[0].delay, 0.0);
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let json = r#"{"Programs": [{"Name": "A", "Enabled": "yes"}]}"#;

        assert!(parse_programs(json).is_err());
    }

    #[test]
    fn missing_or_blank_path_does_not_resolve() {
        let none = ProgramDescriptor::default();
        let blank = ProgramDescriptor {
            path: Some("   ".into()),
            ..Default::default()
        };

        assert_eq!(none.resolve_path(), None);
        assert_eq!(blank.resolve_path(), None);
    }

    #[test]
    fn fractional_delay_converts_to_duration() {
        let program = ProgramDescriptor {
            delay: 1.5,
            ..Default::default()
        };

        assert_eq!(program.delay(), Duration::from_millis(1500));
    }

    #[test]
    fn huge_delay_saturates_instead_of_vanishing() {
        let json = r#"{"Programs": [{"Name": "A", "Path": "a.exe", "Delay": 1e20}]}"#;

        let programs = parse_programs(json).unwrap();

        assert_eq!(programs[0].delay(), Duration::MAX);
    }

    #[test]
    fn read_config_reports_missing_file() {
        let path = std::env::temp_dir().join("autolaunch-definitely-missing.json");

        let err = read_config(&path).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn read_config_reports_invalid_json() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("autolaunch-program-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        // Act
        let err = read_config(&path).unwrap_err();

        // Assert
        assert!(matches!(err, ConfigError::Malformed { .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_config_reports_unreadable_file_as_unexpected() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("autolaunch-latin1-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, [b'{', 0xff, 0xfe, b'}']).unwrap();

        // Act
        let err = read_config(&path).unwrap_err();

        // Assert
        assert!(matches!(err, ConfigError::Unexpected { .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_config_accepts_utf8_bom() {
        let dir = std::env::temp_dir().join(format!("autolaunch-bom-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "\u{feff}{\"Programs\": [{\"Name\": \"A\"}]}").unwrap();

        let programs = read_config(&path).unwrap();

        assert_eq!(programs[0].name, "A");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
