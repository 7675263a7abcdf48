use crate::config::{LogFormat, DEFAULT_BASE_DIR};
use crate::core::ConfigProvider;
use crate::domain::model::{DEFAULT_REFERENCE_YEAR, HOURS_PER_YEAR};
use crate::domain::ports::ValidationPolicy;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub measure: MeasureConfig,
    pub input: InputConfig,
    pub timeline: TimelineConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub base_dir: Option<String>,
    pub strict_row_count: Option<bool>,
    pub expected_rows: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub reference_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub policy: Option<ValidationPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ImportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PROFILE_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ImportError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("input.base_dir", self.base_dir())?;
        validation::validate_positive_number("input.expected_rows", self.expected_rows(), 1)?;
        validation::validate_range(
            "timeline.reference_year",
            self.reference_year(),
            1900,
            2100,
        )?;

        if let Some(level) = &self.logging.level {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.as_str()) {
                return Err(ImportError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.format.unwrap_or_default()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

impl ConfigProvider for TomlConfig {
    fn file_name(&self) -> &str {
        self.measure.file_name.as_deref().unwrap_or_default()
    }

    fn base_dir(&self) -> &str {
        self.input.base_dir.as_deref().unwrap_or(DEFAULT_BASE_DIR)
    }

    fn strict_row_count(&self) -> bool {
        self.input.strict_row_count.unwrap_or(false)
    }

    fn expected_rows(&self) -> usize {
        self.input.expected_rows.unwrap_or(HOURS_PER_YEAR)
    }

    fn reference_year(&self) -> i32 {
        self.timeline.reference_year.unwrap_or(DEFAULT_REFERENCE_YEAR)
    }

    fn validation_policy(&self) -> ValidationPolicy {
        self.validation.policy.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
