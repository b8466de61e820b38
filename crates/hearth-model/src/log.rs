//! Maintenance log entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single piece of maintenance performed on an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    /// Identifier of the maintainable row this entry belongs to
    pub maintainable_id: String,

    /// Day the work was performed
    pub date: NaiveDate,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performed_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
}

impl MaintenanceLog {
    /// Days between this entry and its next due date, if one is set
    #[must_use]
    pub fn days_until_due(&self) -> Option<i64> {
        self.next_due_date.map(|due| (due - self.date).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dates_parse_from_iso_strings() {
        let log: MaintenanceLog = serde_json::from_value(json!({
            "maintainableId": "abc",
            "date": "2024-03-01",
            "title": "Replaced filter",
            "nextDueDate": "2024-06-01",
        }))
        .unwrap();
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(log.days_until_due(), Some(92));
    }
}
