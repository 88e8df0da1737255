use crate::record::{FlagField, Record};

/// Per-flag tallies over the whole record sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub total: usize,
    pub name_ok: usize,
    pub period_ok: usize,
    pub task_ok: usize,
}

impl ReviewSummary {
    pub fn from_records(records: &[Record]) -> Self {
        let count = |field| records.iter().filter(|r| r.flag(field)).count();
        Self {
            total: records.len(),
            name_ok: count(FlagField::Name),
            period_ok: count(FlagField::Period),
            task_ok: count(FlagField::Task),
        }
    }

    pub fn count(&self, field: FlagField) -> usize {
        match field {
            FlagField::Name => self.name_ok,
            FlagField::Period => self.period_ok,
            FlagField::Task => self.task_ok,
        }
    }

    pub fn pct(&self, field: FlagField) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(field) as f64 / self.total as f64 * 100.0
        }
    }
}
