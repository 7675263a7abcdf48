use crate::domain::model::{InputRow, ProfileSeries, RunReport, ScheduleId, TimeSeries};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// 給日誌與錯誤訊息用的完整路徑
    fn resolve(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn file_name(&self) -> &str;
    fn base_dir(&self) -> &str;
    fn strict_row_count(&self) -> bool;
    fn expected_rows(&self) -> usize;
    fn reference_year(&self) -> i32;
    fn validation_policy(&self) -> ValidationPolicy;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    #[default]
    Permissive,
    Bounded,
}

/// Host side of the import: turns series into fixed-interval schedules.
pub trait ScheduleRegistry: Send + Sync {
    /// `None` when the series cannot be converted.
    fn create_schedule(&self, series: &TimeSeries) -> Option<ScheduleId>;
    fn set_name(&self, id: ScheduleId, name: &str);
    fn schedule_count(&self) -> usize;
}

impl<R: ScheduleRegistry + ?Sized> ScheduleRegistry for Arc<R> {
    fn create_schedule(&self, series: &TimeSeries) -> Option<ScheduleId> {
        (**self).create_schedule(series)
    }

    fn set_name(&self, id: ScheduleId, name: &str) {
        (**self).set_name(id, name)
    }

    fn schedule_count(&self) -> usize {
        (**self).schedule_count()
    }
}

/// Per-row check run before conversion. `row` is the 0-based hour index.
pub trait RowValidator: Send + Sync {
    fn validate_row(&self, row: usize, input: &InputRow) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn validate(&self) -> Result<()>;
    async fn extract(&self) -> Result<Vec<InputRow>>;
    async fn transform(&self, rows: Vec<InputRow>) -> Result<Vec<ProfileSeries>>;
    async fn load(&self, series: Vec<ProfileSeries>) -> Result<RunReport>;
}
