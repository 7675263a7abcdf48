use crate::domain::model::{Schedule, ScheduleId, TimeSeries};
use crate::domain::ports::ScheduleRegistry;
use std::sync::{Mutex, MutexGuard};

/// In-process schedule store standing in for the simulation model.
///
/// A series is accepted only when it has at least one point and every value
/// is finite. New schedules get a default name until renamed.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    schedules: Mutex<Vec<Schedule>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Schedule>> {
        // append-only store, a poisoned lock still holds consistent data
        self.schedules.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn schedule(&self, id: ScheduleId) -> Option<Schedule> {
        self.lock().iter().find(|s| s.id == id).cloned()
    }

    pub fn find_by_name(&self, name: &str) -> Vec<Schedule> {
        self.lock().iter().filter(|s| s.name == name).cloned().collect()
    }

    pub fn schedules(&self) -> Vec<Schedule> {
        self.lock().clone()
    }
}

impl ScheduleRegistry for InMemoryRegistry {
    fn create_schedule(&self, series: &TimeSeries) -> Option<ScheduleId> {
        if series.is_empty() || series.values().iter().any(|v| !v.is_finite()) {
            return None;
        }

        let mut schedules = self.lock();
        let id = ScheduleId(schedules.len());
        schedules.push(Schedule {
            id,
            name: format!("Schedule Fixed Interval {}", id.0 + 1),
            series: series.clone(),
        });
        Some(id)
    }

    fn set_name(&self, id: ScheduleId, name: &str) {
        if let Some(schedule) = self.lock().iter_mut().find(|s| s.id == id) {
            schedule.name = name.to_string();
        }
    }

    fn schedule_count(&self) -> usize {
        self.lock().len()
    }
}
