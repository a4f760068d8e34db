use chrono::{DateTime, Utc};
use database_layer::{TriageRecord, TriageStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::requests::{LEAST_URGENT, MOST_URGENT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: TriageStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LevelCount {
    pub triage_level: i32,
    pub count: usize,
}

/// Emergency department activity for arrivals since a given instant
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentSummary {
    pub since: DateTime<Utc>,
    pub total_arrivals: usize,
    /// Every status, including those with no records
    pub by_status: Vec<StatusCount>,
    /// Levels 1 to 5
    pub by_level: Vec<LevelCount>,
    /// Mean minutes from arrival to treatment start, over treated patients
    pub average_wait_minutes: Option<f64>,
}

impl DepartmentSummary {
    pub fn from_records(since: DateTime<Utc>, records: &[TriageRecord]) -> Self {
        let by_status = TriageStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: records.iter().filter(|r| r.triage_status == *status).count(),
            })
            .collect();
        let by_level = (MOST_URGENT..=LEAST_URGENT)
            .map(|level| LevelCount {
                triage_level: level,
                count: records.iter().filter(|r| r.triage_level == level).count(),
            })
            .collect();

        let waits: Vec<f64> = records
            .iter()
            .filter_map(|r| r.start_time.map(|start| start - r.arrival_time))
            .map(|wait| wait.num_seconds() as f64 / 60.0)
            .collect();
        let average_wait_minutes = if waits.is_empty() {
            None
        } else {
            let mean = waits.iter().sum::<f64>() / waits.len() as f64;
            Some((mean * 10.0).round() / 10.0)
        };

        Self {
            since,
            total_arrivals: records.len(),
            by_status,
            by_level,
            average_wait_minutes,
        }
    }

    pub fn count(&self, status: TriageStatus) -> usize {
        self.by_status
            .iter()
            .find(|c| c.status == status)
            .map_or(0, |c| c.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn record(level: i32, status: TriageStatus, waited: Option<i64>) -> TriageRecord {
        let arrival = Utc::now() - Duration::hours(2);
        TriageRecord {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            chief_complaint: "Fall".to_string(),
            triage_level: level,
            triage_nurse: "Nurse Joy".to_string(),
            assigned_doctor: None,
            triage_status: status,
            arrival_time: arrival,
            start_time: waited.map(|m| arrival + Duration::minutes(m)),
            end_time: None,
            notes: None,
        }
    }

    #[test]
    fn test_counts_cover_every_status_and_level() {
        let records = vec![
            record(2, TriageStatus::Waiting, None),
            record(2, TriageStatus::InProgress, Some(10)),
            record(4, TriageStatus::Completed, Some(25)),
        ];
        let summary = DepartmentSummary::from_records(Utc::now(), &records);

        assert_eq!(summary.total_arrivals, 3);
        assert_eq!(summary.by_status.len(), TriageStatus::ALL.len());
        assert_eq!(summary.count(TriageStatus::Waiting), 1);
        assert_eq!(summary.count(TriageStatus::Transferred), 0);
        let levels: Vec<usize> = summary.by_level.iter().map(|l| l.count).collect();
        assert_eq!(levels, vec![0, 2, 0, 1, 0]);
        assert_eq!(summary.average_wait_minutes, Some(17.5));
    }

    #[test]
    fn test_empty_department() {
        let summary = DepartmentSummary::from_records(Utc::now(), &[]);
        assert_eq!(summary.total_arrivals, 0);
        assert_eq!(summary.average_wait_minutes, None);
    }
}
