//! Aggregate statistics over the record log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pagedrill_core::model::LogRecord;

/// Totals across every logged page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Number of page sessions logged.
    pub sessions: usize,
    pub total_correct: u64,
    pub total_incorrect: u64,
    pub total_fast: u64,
    /// Mean correct count per session.
    pub avg_correct: f64,
    /// Best session by correct count (earliest wins ties).
    pub best: Option<BestSession>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSession {
    pub page_id: String,
    pub correct: u32,
    pub date: NaiveDate,
}

/// Compute history statistics from log records.
pub fn compute_history_stats(records: &[LogRecord]) -> HistoryStats {
    if records.is_empty() {
        return HistoryStats::default();
    }

    let total_correct: u64 = records.iter().map(|r| r.correct as u64).sum();
    let total_incorrect: u64 = records.iter().map(|r| r.incorrect as u64).sum();
    let total_fast: u64 = records.iter().map(|r| r.fast as u64).sum();

    let mut best: Option<&LogRecord> = None;
    for r in records {
        if best.is_none_or(|b| r.correct > b.correct) {
            best = Some(r);
        }
    }

    HistoryStats {
        sessions: records.len(),
        total_correct,
        total_incorrect,
        total_fast,
        avg_correct: total_correct as f64 / records.len() as f64,
        best: best.map(|b| BestSession {
            page_id: b.page_id.clone(),
            correct: b.correct,
            date: b.date,
        }),
        first_date: records.iter().map(|r| r.date).min(),
        last_date: records.iter().map(|r| r.date).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(page_id: &str, correct: u32, fast: u32, day: u32) -> LogRecord {
        LogRecord {
            page_id: page_id.into(),
            correct,
            incorrect: 60 - correct,
            fast,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        }
    }

    #[test]
    fn empty_history() {
        let stats = compute_history_stats(&[]);
        assert_eq!(stats.sessions, 0);
        assert!(stats.best.is_none());
    }

    #[test]
    fn totals_and_best() {
        let records = vec![
            record("a.txt", 40, 10, 3),
            record("b.txt", 55, 20, 1),
            record("c.txt", 55, 30, 9),
        ];
        let stats = compute_history_stats(&records);
        assert_eq!(stats.sessions, 3);
        assert_eq!(stats.total_correct, 150);
        assert_eq!(stats.total_incorrect, 30);
        assert_eq!(stats.total_fast, 60);
        assert!((stats.avg_correct - 50.0).abs() < f64::EPSILON);

        let best = stats.best.unwrap();
        assert_eq!(best.page_id, "b.txt");
        assert_eq!(stats.first_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(stats.last_date, NaiveDate::from_ymd_opt(2024, 6, 9));
    }
}
