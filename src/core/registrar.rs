use crate::domain::model::{ProfileSeries, Schedule, TimeSeries};
use crate::domain::ports::ScheduleRegistry;
use crate::utils::error::ImportError;

/// 將時間序列轉成排程並命名；失敗時記錄並回傳 None，不中止流程
pub fn make_schedule<R: ScheduleRegistry + ?Sized>(
    registry: &R,
    series: TimeSeries,
    name: &str,
) -> Option<Schedule> {
    let Some(id) = registry.create_schedule(&series) else {
        let err = ImportError::ScheduleCreation {
            name: name.to_string(),
        };
        tracing::warn!("⚠️ {}. Skipping", err);
        return None;
    };

    registry.set_name(id, name);
    tracing::debug!("Created schedule '{}' ({} points, {})", name, series.len(), series.unit());

    Some(Schedule {
        id,
        name: name.to_string(),
        series,
    })
}

/// Outcome of registering every profile series.
#[derive(Debug, Default)]
pub struct Registration {
    pub attempted: Vec<String>,
    pub created: Vec<Schedule>,
    pub skipped: Vec<String>,
}

/// Attempts each series in order. A failure never stops the next attempt.
pub fn register_all<R: ScheduleRegistry + ?Sized>(
    registry: &R,
    series: Vec<ProfileSeries>,
) -> Registration {
    let mut registration = Registration::default();

    for ProfileSeries { column, series } in series {
        let name = column.schedule_name();
        registration.attempted.push(name.to_string());

        match make_schedule(registry, series, name) {
            Some(schedule) => registration.created.push(schedule),
            None => registration.skipped.push(name.to_string()),
        }
    }

    registration
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::registry::InMemoryRegistry;
    use crate::core::series::build_series;
    use crate::domain::model::{ProfileColumn, ScheduleId, Timeline, Unit};

    /// Rejects the n-th creation request (0-based).
    struct RejectNth {
        inner: InMemoryRegistry,
        reject: usize,
        calls: std::sync::atomic::AtomicUsize,
    }

    impl ScheduleRegistry for RejectNth {
        fn create_schedule(&self, series: &TimeSeries) -> Option<ScheduleId> {
            let call = self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if call == self.reject {
                return None;
            }
            self.inner.create_schedule(series)
        }

        fn set_name(&self, id: ScheduleId, name: &str) {
            self.inner.set_name(id, name)
        }

        fn schedule_count(&self) -> usize {
            self.inner.schedule_count()
        }
    }

    fn profile(values: Vec<f64>) -> Vec<ProfileSeries> {
        ProfileColumn::ALL
            .iter()
            .map(|&column| ProfileSeries {
                column,
                series: build_series(values.clone(), column.unit(), Timeline::default()),
            })
            .collect()
    }

    #[test]
    fn test_make_schedule_names_the_schedule() {
        let registry = InMemoryRegistry::new();
        let series = build_series(vec![7.0; 4], Unit::Celsius, Timeline::default());

        let schedule = make_schedule(&registry, series, "ChW Supply Outlet Temp Schedule").unwrap();

        assert_eq!(schedule.name, "ChW Supply Outlet Temp Schedule");
        assert_eq!(
            registry.schedule(schedule.id).unwrap().name,
            "ChW Supply Outlet Temp Schedule"
        );
    }

    #[test]
    fn test_make_schedule_returns_none_on_rejection() {
        let registry = InMemoryRegistry::new();
        let series = build_series(Vec::new(), Unit::Watts, Timeline::default());

        assert!(make_schedule(&registry, series, "HW Load Profile - Load Schedule (Watts)").is_none());
        assert_eq!(registry.schedule_count(), 0);
    }

    #[test]
    fn test_register_all_continues_after_failure() {
        let registry = RejectNth {
            inner: InMemoryRegistry::new(),
            reject: 2,
            calls: Default::default(),
        };

        let registration = register_all(&registry, profile(vec![0.5; 3]));

        assert_eq!(registration.attempted.len(), 6);
        assert_eq!(registration.created.len(), 5);
        assert_eq!(
            registration.skipped,
            vec!["ChW Load Profile - Flow Fraction Schedule".to_string()]
        );
        assert_eq!(registry.schedule_count(), 5);
    }
}
