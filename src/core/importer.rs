use crate::core::convert::ConvertedColumns;
use crate::core::measure::{validate_user_arguments, FILE_NAME_ARGUMENT};
use crate::core::policy::{check_row_count, row_validator, validate_rows};
use crate::core::reader::parse_table;
use crate::core::registrar::register_all;
use crate::core::series::build_profile_series;
use crate::domain::model::{InputRow, ProfileSeries, RunReport, Timeline};
use crate::domain::ports::{ConfigProvider, Pipeline, RowValidator, ScheduleRegistry, Storage};
use crate::utils::error::{ImportError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// CSV → six hourly schedules, registered into `registry`.
pub struct PlantLoadPipeline<S: Storage, C: ConfigProvider, R: ScheduleRegistry> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) registry: Arc<R>,
    pub(crate) validator: Box<dyn RowValidator>,
}

impl<S: Storage, C: ConfigProvider, R: ScheduleRegistry> PlantLoadPipeline<S, C, R> {
    pub fn new(storage: S, config: C, registry: Arc<R>) -> Self {
        let validator = row_validator(config.validation_policy());
        Self {
            storage,
            config,
            registry,
            validator,
        }
    }

    /// Replaces the row check chosen by the configured policy.
    pub fn with_row_validator(mut self, validator: Box<dyn RowValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    fn timeline(&self) -> Result<Timeline> {
        let year = self.config.reference_year();
        Timeline::hourly(year).ok_or_else(|| ImportError::InvalidConfigValueError {
            field: "timeline.reference_year".to_string(),
            value: year.to_string(),
            reason: "Year cannot be represented".to_string(),
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: ScheduleRegistry> Pipeline for PlantLoadPipeline<S, C, R> {
    fn validate(&self) -> Result<()> {
        let user_arguments = HashMap::from([(
            FILE_NAME_ARGUMENT.to_string(),
            self.config.file_name().to_string(),
        )]);
        validate_user_arguments(&user_arguments)?;
        self.timeline()?;
        Ok(())
    }

    async fn extract(&self) -> Result<Vec<InputRow>> {
        let file_name = self.config.file_name();
        let path = self.storage.resolve(file_name);
        tracing::info!("📥 Reading load profile from: {}", path);

        // 檔案不存在或無法讀取都歸為 CSV 讀取錯誤
        let bytes = self
            .storage
            .read_file(file_name)
            .await
            .map_err(|e| match e {
                ImportError::Io(io) => ImportError::CsvRead {
                    path: path.clone(),
                    source: csv::Error::from(io),
                },
                other => other,
            })?;

        parse_table(bytes.as_slice(), &path)
    }

    async fn transform(&self, rows: Vec<InputRow>) -> Result<Vec<ProfileSeries>> {
        check_row_count(
            rows.len(),
            self.config.expected_rows(),
            self.config.strict_row_count(),
        )?;
        validate_rows(self.validator.as_ref(), &rows)?;

        let timeline = self.timeline()?;
        let columns = ConvertedColumns::from_rows(&rows);
        tracing::debug!(
            "Converted {} rows, series start at {} with {} step",
            columns.len(),
            timeline.start(),
            timeline.interval()
        );

        Ok(build_profile_series(columns, timeline))
    }

    async fn load(&self, series: Vec<ProfileSeries>) -> Result<RunReport> {
        let rows = series.first().map(|s| s.series.len()).unwrap_or(0);
        let schedules_before = self.registry.schedule_count();

        let registration = register_all(self.registry.as_ref(), series);

        let schedules_after = self.registry.schedule_count();
        tracing::info!(
            "Registry started with {} fixed-interval schedules and ended with {}",
            schedules_before,
            schedules_after
        );

        Ok(RunReport {
            file: self.storage.resolve(self.config.file_name()),
            rows,
            attempted: registration.attempted,
            created: registration.created.into_iter().map(|s| s.name).collect(),
            skipped: registration.skipped,
            schedules_before,
            schedules_after,
        })
    }
}

pub struct ImportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ImportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs every stage in order. Only fatal errors are returned.
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("🚀 Starting load profile import");

        self.pipeline.validate()?;

        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", rows.len());

        let series = self.pipeline.transform(rows).await?;
        tracing::info!("Built {} time series", series.len());

        let report = self.pipeline.load(series).await?;
        tracing::info!(
            "Created {} of {} schedules",
            report.created.len(),
            report.attempted.len()
        );

        Ok(report)
    }

    /// Boolean outcome of a run; fatal errors are logged here.
    pub async fn run_to_success(&self) -> bool {
        match self.run().await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("❌ Import failed: {}", e);
                false
            }
        }
    }
}
