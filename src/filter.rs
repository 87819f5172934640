//! User activity filtering and incomplete-row removal

use crate::config::ActivityRange;
use crate::types::FeatureRow;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// Result of the activity filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityOutcome {
    /// Distinct users seen before filtering
    pub users: usize,
    /// Users outside the activity range, sorted
    pub dropped_users: Vec<String>,
    /// Rows whose user field was cleared
    pub cleared_rows: usize,
}

/// Clears the user of rows belonging to users with too few or too many rows
pub struct UserActivityFilter {
    range: ActivityRange,
}

impl UserActivityFilter {
    pub fn new(range: ActivityRange) -> Self {
        Self { range }
    }

    /// Rows per user
    pub fn counts(rows: &[FeatureRow]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for user in rows.iter().filter_map(|r| r.user.as_ref()) {
            *counts.entry(user.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn apply(&self, rows: &mut [FeatureRow]) -> ActivityOutcome {
        let counts = Self::counts(rows);

        let mut dropped_users: Vec<String> = counts
            .iter()
            .filter(|&(_, &count)| !self.range.contains(count))
            .map(|(user, _)| user.clone())
            .collect();
        dropped_users.sort();

        let mut cleared_rows = 0;
        for row in rows.iter_mut() {
            let drop = row
                .user
                .as_ref()
                .is_some_and(|user| dropped_users.binary_search(user).is_ok());
            if drop {
                row.user = None;
                cleared_rows += 1;
            }
        }

        info!(
            users = counts.len(),
            dropped_users = dropped_users.len(),
            cleared_rows,
            min = self.range.min,
            max = self.range.max,
            "applied user activity filter"
        );

        ActivityOutcome {
            users: counts.len(),
            dropped_users,
            cleared_rows,
        }
    }
}

/// Keep complete rows, paired with their position in the input
pub fn retain_complete(rows: Vec<FeatureRow>) -> Vec<(usize, FeatureRow)> {
    rows.into_iter()
        .enumerate()
        .filter(|(_, row)| row.is_complete())
        .collect()
}
