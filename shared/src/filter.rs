//! Material request filtering
//!
//! Every filter field is optional; the predicate is a strict conjunction
//! of whichever fields are active. Dropping a field can only grow the
//! result set, never shrink it.

use crate::mappings::ReferenceTables;
use crate::models::MaterialRequest;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status filter: a single value or an OR-set of values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusFilter {
    One(String),
    Many(Vec<String>),
}

impl StatusFilter {
    /// Whether the filter is active at all. A blank single value means the
    /// UI cleared the picker; an empty set is still an active filter that
    /// matches nothing.
    fn is_active(&self) -> bool {
        match self {
            StatusFilter::One(s) => !s.trim().is_empty(),
            StatusFilter::Many(_) => true,
        }
    }

    fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::One(want) => status.trim().eq_ignore_ascii_case(want.trim()),
            StatusFilter::Many(wants) => wants
                .iter()
                .any(|want| status.trim().eq_ignore_ascii_case(want.trim())),
        }
    }
}

/// Filter parameters for the MR dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MrFilter {
    pub status: Option<StatusFilter>,
    pub branch: Option<String>,
    pub department: Option<String>,
    pub cost_center: Option<String>,
    pub project: Option<String>,
    pub request_type: Option<String>,
    /// Transaction-date range, inclusive on both ends
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Required-by range, inclusive on both ends
    pub required_start: Option<NaiveDate>,
    pub required_end: Option<NaiveDate>,
}

/// Treat blank strings the same as an absent filter.
fn active(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// True when the date (if any) falls inside an active range. An MR whose
/// date is missing or unparseable is excluded whenever the range is active.
fn in_range(day: Option<NaiveDate>, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    if start.is_none() && end.is_none() {
        return true;
    }
    let Some(day) = day else {
        return false;
    };
    if let Some(start) = start {
        if day < start {
            return false;
        }
    }
    if let Some(end) = end {
        if day > end {
            return false;
        }
    }
    true
}

impl MrFilter {
    /// Evaluate the full conjunction against one MR.
    pub fn matches(&self, mr: &MaterialRequest, tables: &ReferenceTables) -> bool {
        if let Some(status) = &self.status {
            if status.is_active() && !status.matches(&mr.status) {
                return false;
            }
        }
        if !in_range(mr.transaction_day(), self.start_date, self.end_date) {
            return false;
        }
        if !in_range(mr.required_by_day(), self.required_start, self.required_end) {
            return false;
        }
        if let Some(branch) = active(&self.branch) {
            if tables.branches.branch_for(mr.cost_center.as_deref()) != branch {
                return false;
            }
        }
        if let Some(department) = active(&self.department) {
            let needle = department.to_lowercase();
            let hit = mr.items.iter().any(|item| {
                item.department
                    .as_deref()
                    .map(|d| contains_ci(d, &needle))
                    .unwrap_or(false)
            });
            if !hit {
                return false;
            }
        }
        if let Some(cost_center) = active(&self.cost_center) {
            let needle = cost_center.to_lowercase();
            let hit = mr.items.iter().any(|item| {
                item.cost_center
                    .as_deref()
                    .map(|c| contains_ci(c, &needle))
                    .unwrap_or(false)
            });
            if !hit {
                return false;
            }
        }
        if let Some(project) = active(&self.project) {
            let needle = project.to_lowercase();
            let hit = mr.items.iter().any(|item| {
                item.project
                    .as_deref()
                    .map(|p| contains_ci(p, &needle))
                    .unwrap_or(false)
            });
            if !hit {
                return false;
            }
        }
        if let Some(request_type) = active(&self.request_type) {
            if tables.request_types.request_type(mr) != request_type {
                return false;
            }
        }
        true
    }
}

/// Filter a document list down to the MRs matching every active field.
pub fn filter_material_requests<'a>(
    requests: &'a [MaterialRequest],
    filter: &MrFilter,
    tables: &ReferenceTables,
) -> Vec<&'a MaterialRequest> {
    requests
        .iter()
        .filter(|mr| filter.matches(mr, tables))
        .collect()
}
