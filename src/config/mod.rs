pub mod toml_config;

use crate::domain::model::{DEFAULT_REFERENCE_YEAR, HOURS_PER_YEAR};
use crate::domain::ports::ValidationPolicy;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_BASE_DIR: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "plant-load-import")]
#[command(about = "Import 8760 chilled water and hot water demand profiles as hourly schedules")]
pub struct CliConfig {
    /// Name of the CSV file containing the schedules to be loaded
    #[arg(long)]
    pub file_name: Option<String>,

    /// Directory the file name is resolved against
    #[arg(long)]
    pub base_dir: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Fail when the row count differs from --expected-rows
    #[arg(long)]
    pub strict_row_count: bool,

    #[arg(long)]
    pub expected_rows: Option<usize>,

    /// Year of the January 1st start instant
    #[arg(long)]
    pub reference_year: Option<i32>,

    #[arg(long, value_enum)]
    pub validation: Option<ValidationPolicy>,

    #[arg(long, value_enum, default_value = "text")]
    pub report: ReportFormat,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Parse and convert the file without registering schedules
    #[arg(long)]
    pub dry_run: bool,

    /// Print the measure name, descriptions and arguments, then exit
    #[arg(long)]
    pub describe: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or_default()
    }

    fn base_dir(&self) -> &str {
        self.base_dir.as_deref().unwrap_or(DEFAULT_BASE_DIR)
    }

    fn strict_row_count(&self) -> bool {
        self.strict_row_count
    }

    fn expected_rows(&self) -> usize {
        self.expected_rows.unwrap_or(HOURS_PER_YEAR)
    }

    fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or(DEFAULT_REFERENCE_YEAR)
    }

    fn validation_policy(&self) -> ValidationPolicy {
        self.validation.unwrap_or_default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    // 空的 file_name 不在這裡檢查，交給匯入流程回報
    fn validate(&self) -> Result<()> {
        validation::validate_path("base_dir", self.base_dir())?;
        validation::validate_positive_number("expected_rows", self.expected_rows(), 1)?;
        validation::validate_range("reference_year", self.reference_year(), 1900, 2100)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆蓋 TOML 設定
    pub fn apply_overrides(&self, config: &mut toml_config::TomlConfig) {
        if let Some(file_name) = &self.file_name {
            config.measure.file_name = Some(file_name.clone());
        }
        if let Some(base_dir) = &self.base_dir {
            config.input.base_dir = Some(base_dir.clone());
        }
        if self.strict_row_count {
            config.input.strict_row_count = Some(true);
        }
        if let Some(expected_rows) = self.expected_rows {
            config.input.expected_rows = Some(expected_rows);
        }
        if let Some(year) = self.reference_year {
            config.timeline.reference_year = Some(year);
        }
        if let Some(policy) = self.validation {
            config.validation.policy = Some(policy);
        }
        if let Some(format) = self.log_format {
            config.logging.format = Some(format);
        }
    }
}
