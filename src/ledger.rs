use crate::errors::LedgerError;
use crate::registry::TaskRegistry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_day(input: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDay(input.to_string()))
}

// Cells for removed tasks stay; aggregation only walks current tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    days: BTreeMap<String, BTreeMap<String, bool>>,
}

impl Ledger {
    pub fn is_checked(&self, day: NaiveDate, task: &str) -> bool {
        self.days
            .get(&day_key(day))
            .and_then(|cells| cells.get(task))
            .copied()
            .unwrap_or(false)
    }

    pub fn toggle(&mut self, day: NaiveDate, task: &str) -> bool {
        let cell = self
            .days
            .entry(day_key(day))
            .or_default()
            .entry(task.to_string())
            .or_insert(false);
        *cell = !*cell;
        *cell
    }

    pub fn checked_on(&self, day: NaiveDate, tasks: &TaskRegistry) -> usize {
        tasks
            .labels()
            .iter()
            .filter(|task| self.is_checked(day, task))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    #[test]
    fn missing_cells_read_unchecked() {
        let ledger = Ledger::default();
        assert!(!ledger.is_checked(day(), "Read"));
    }

    #[test]
    fn toggle_twice_restores_value() {
        let mut ledger = Ledger::default();
        assert!(ledger.toggle(day(), "Read"));
        assert!(ledger.is_checked(day(), "Read"));
        assert!(!ledger.toggle(day(), "Read"));
        assert!(!ledger.is_checked(day(), "Read"));
    }

    #[test]
    fn checked_on_ignores_orphaned_cells() {
        let mut ledger = Ledger::default();
        ledger.toggle(day(), "A");
        ledger.toggle(day(), "Gone");
        let tasks = TaskRegistry::from(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(ledger.checked_on(day(), &tasks), 1);
    }

    #[test]
    fn stored_shape_is_nested_day_map() {
        let mut ledger = Ledger::default();
        ledger.toggle(day(), "Read");
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"2026-01-05":{"Read":true}}"#);

        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert_eq!(parse_day("2026-01-05").unwrap(), day());
        assert_eq!(
            parse_day("tomorrow"),
            Err(LedgerError::InvalidDay("tomorrow".to_string()))
        );
    }
}
