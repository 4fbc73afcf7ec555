//! Generator configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working setup that runs the in-tree description script and wraps at 70
//! columns.
//!
//! # Example YAML
//!
//! ```yaml
//! generator:
//!   program: python3
//!   args:
//!     - src/script/gen_static_command_descriptions.py
//!   timeout_secs: 120
//! render:
//!   wrap_width: 70
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocgenError, Result};
use crate::output::{DEFAULT_WRAP_WIDTH, RenderOptions};

/// Environment variable naming a config file when none is given explicitly.
pub const CONFIG_ENV: &str = "COMMAND_API_DOCS_CONFIG";

/// How to invoke the external command-description generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Executable to run.
    pub program: String,
    /// Arguments passed to `program`.
    pub args: Vec<String>,
    /// Seconds to wait before killing the generator.
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec!["src/script/gen_static_command_descriptions.py".to_string()],
            timeout_secs: 120,
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Column at which help text is wrapped.
    pub wrap_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            wrap_width: config.wrap_width,
        }
    }
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use command_api_docgen::config::DocgenConfig;
///
/// let config: DocgenConfig = serde_yaml::from_str("render:\n  wrap_width: 60\n").unwrap();
/// assert_eq!(config.render.wrap_width, 60);
/// assert_eq!(config.generator.program, "python3");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocgenConfig {
    /// External generator invocation.
    pub generator: GeneratorConfig,
    /// Rendering settings.
    pub render: RenderConfig,
}

impl DocgenConfig {
    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](DocgenError::IoError) if the file cannot be read,
    /// [`YamlError`](DocgenError::YamlError) if parsing fails, and
    /// [`InvalidConfig`](DocgenError::InvalidConfig) for out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configured values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](DocgenError::InvalidConfig) for an empty
    /// generator program, a zero timeout or a zero wrap width.
    pub fn validate(&self) -> Result<()> {
        if self.generator.program.trim().is_empty() {
            return Err(DocgenError::InvalidConfig(
                "generator.program cannot be empty".to_string(),
            ));
        }
        if self.generator.timeout_secs == 0 {
            return Err(DocgenError::InvalidConfig(
                "generator.timeout_secs must be positive".to_string(),
            ));
        }
        if self.render.wrap_width == 0 {
            return Err(DocgenError::InvalidConfig(
                "render.wrap_width must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Renderer options derived from this configuration.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::from(&self.render)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = DocgenConfig::default();
        assert_eq!(config.generator.program, "python3");
        assert_eq!(
            config.generator.args,
            vec!["src/script/gen_static_command_descriptions.py"]
        );
        assert_eq!(config.generator.timeout_secs, 120);
        assert_eq!(config.render.wrap_width, 70);
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "generator:\n  program: /usr/bin/env\n  args: [cat, m.json]").unwrap();

        let config = DocgenConfig::load(file.path()).unwrap();
        assert_eq!(config.generator.program, "/usr/bin/env");
        assert_eq!(config.generator.args, vec!["cat", "m.json"]);
        assert_eq!(config.generator.timeout_secs, 120);
        assert_eq!(config.render.wrap_width, 70);
    }

    #[test]
    fn test_load_rejects_zero_width() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "render:\n  wrap_width: 0").unwrap();

        let err = DocgenConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, DocgenError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DocgenConfig::load("/nonexistent/docgen.yaml").unwrap_err();
        assert!(matches!(err, DocgenError::IoError(_)));
    }

    #[test]
    fn test_validate_empty_program() {
        let mut config = DocgenConfig::default();
        config.generator.program = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
