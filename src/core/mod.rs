pub mod convert;
pub mod importer;
pub mod measure;
pub mod policy;
pub mod reader;
pub mod registrar;
pub mod series;

pub use crate::domain::model::{InputRow, ProfileSeries, RunReport, Schedule, TimeSeries};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ScheduleRegistry, Storage};
pub use crate::utils::error::Result;
