//! Dashboard aggregations over a filtered MR set
//!
//! Each view is a pure function of the filtered list and the reference
//! tables; callers re-derive them whenever the filter changes.

use crate::filter::{filter_material_requests, MrFilter};
use crate::mappings::{ReferenceTables, CHART_PALETTE};
use crate::models::MaterialRequest;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// MR count for one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchCount {
    pub branch: String,
    pub count: u64,
}

/// One slice of the department pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSlice {
    pub department: String,
    pub count: u64,
    pub percentage: f64,
    pub color: String,
}

/// Item-line count for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCount {
    pub project: String,
    pub count: u64,
}

/// Headline counters over the filtered set.
///
/// Both date fields keep the earliest value seen: the oldest open request
/// and the most urgent required-by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrSummary {
    pub total: u64,
    pub draft: u64,
    pub partially_ordered: u64,
    pub pending: u64,
    pub oldest_transaction_date: Option<NaiveDate>,
    pub nearest_required_by: Option<NaiveDate>,
}

/// MR count per branch, seeded with every known branch at zero so empty
/// branches still render. Unknown pass-through branches are appended as
/// they appear. Output is ordered by branch name.
pub fn branch_summary(
    requests: &[&MaterialRequest],
    tables: &ReferenceTables,
) -> Vec<BranchCount> {
    let mut counts: BTreeMap<String, u64> = tables
        .branches
        .known_branches()
        .map(|b| (b.to_string(), 0))
        .collect();
    counts.insert(crate::mappings::UNASSIGNED_BRANCH.to_string(), 0);
    for mr in requests {
        let branch = tables.branches.branch_for(mr.cost_center.as_deref());
        *counts.entry(branch).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(branch, count)| BranchCount { branch, count })
        .collect()
}

/// MR count per department. Each MR contributes at most once per distinct
/// mapped department across its items, so several lines in the same
/// department do not inflate the slice. Slices are ordered by descending
/// count and colored cyclically from the palette in that order.
pub fn department_summary(
    requests: &[&MaterialRequest],
    tables: &ReferenceTables,
) -> Vec<DepartmentSlice> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for mr in requests {
        let departments: BTreeSet<String> = mr
            .items
            .iter()
            .filter_map(|item| item.department.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(|d| tables.departments.short_name(d))
            .collect();
        for department in departments {
            *counts.entry(department).or_insert(0) += 1;
        }
    }

    let total: u64 = counts.values().sum();
    let mut slices: Vec<(String, u64)> = counts.into_iter().collect();
    slices.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    slices
        .into_iter()
        .enumerate()
        .map(|(rank, (department, count))| DepartmentSlice {
            department,
            count,
            percentage: if total == 0 {
                0.0
            } else {
                round1(count as f64 * 100.0 / total as f64)
            },
            color: CHART_PALETTE[rank % CHART_PALETTE.len()].to_string(),
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Item-line count per distinct non-empty project, descending by count.
pub fn project_summary(requests: &[&MaterialRequest]) -> Vec<ProjectCount> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for mr in requests {
        for item in &mr.items {
            let Some(project) = item.project.as_deref().map(str::trim) else {
                continue;
            };
            if project.is_empty() {
                continue;
            }
            *counts.entry(project.to_string()).or_insert(0) += 1;
        }
    }
    let mut out: Vec<ProjectCount> = counts
        .into_iter()
        .map(|(project, count)| ProjectCount { project, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.project.cmp(&b.project)));
    out
}

/// Headline counters with min-reductions over both date columns.
pub fn mr_summary(requests: &[&MaterialRequest]) -> MrSummary {
    let mut summary = MrSummary {
        total: requests.len() as u64,
        draft: 0,
        partially_ordered: 0,
        pending: 0,
        oldest_transaction_date: None,
        nearest_required_by: None,
    };
    for mr in requests {
        if mr.has_status("Draft") {
            summary.draft += 1;
        } else if mr.has_status("Partially Ordered") {
            summary.partially_ordered += 1;
        } else if mr.has_status("Pending") {
            summary.pending += 1;
        }
        summary.oldest_transaction_date = min_date(summary.oldest_transaction_date, mr.transaction_day());
        summary.nearest_required_by = min_date(summary.nearest_required_by, mr.required_by_day());
    }
    summary
}

fn min_date(current: Option<NaiveDate>, candidate: Option<NaiveDate>) -> Option<NaiveDate> {
    match (current, candidate) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Everything the MR dashboard renders, derived in one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrDashboard {
    pub requests: Vec<MaterialRequest>,
    pub branch_summary: Vec<BranchCount>,
    pub department_summary: Vec<DepartmentSlice>,
    pub project_summary: Vec<ProjectCount>,
    pub summary: MrSummary,
}

/// Filter the raw list and derive every dashboard view over the result.
pub fn dashboard(
    requests: &[MaterialRequest],
    filter: &MrFilter,
    tables: &ReferenceTables,
) -> MrDashboard {
    let filtered = filter_material_requests(requests, filter, tables);
    MrDashboard {
        branch_summary: branch_summary(&filtered, tables),
        department_summary: department_summary(&filtered, tables),
        project_summary: project_summary(&filtered),
        summary: mr_summary(&filtered),
        requests: filtered.into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mr(value: serde_json::Value) -> MaterialRequest {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Vec<MaterialRequest> {
        vec![
            mr(serde_json::json!({
                "name": "MR-1",
                "status": "Draft",
                "transaction_date": "2024-03-05",
                "required_by": "2024-03-20",
                "cost_center": "JKT-001",
                "items": [
                    {"item_code": "MID-1", "qty": 1, "department": "Blower - DN", "project": "SO-2024-001"},
                    {"item_code": "MID-2", "qty": 1, "department": "Blower - DN", "project": "SO-2024-001"}
                ]
            })),
            mr(serde_json::json!({
                "name": "MR-2",
                "status": "partially ordered",
                "transaction_date": "2024-02-01",
                "required_by": "2024-03-10",
                "cost_center": "JKT-002",
                "items": [
                    {"item_code": "MID-3", "qty": 1, "department": "Produksi - DN", "project": "SO-2024-001"}
                ]
            })),
            mr(serde_json::json!({
                "name": "MR-3",
                "status": "Pending",
                "cost_center": "XYZ-1",
                "items": [
                    {"item_code": "MID-4", "qty": 1, "department": "Blower - DN", "project": "STOCK"}
                ]
            })),
        ]
    }

    fn refs(mrs: &[MaterialRequest]) -> Vec<&MaterialRequest> {
        mrs.iter().collect()
    }

    #[test]
    fn test_branch_summary_seeds_known_branches_at_zero() {
        let mrs = sample();
        let out = branch_summary(&refs(&mrs), &ReferenceTables::default());
        let jakarta = out.iter().find(|b| b.branch == "JAKARTA").unwrap();
        assert_eq!(jakarta.count, 2);
        // no MR in MEDAN, but the row is still there
        let medan = out.iter().find(|b| b.branch == "MEDAN").unwrap();
        assert_eq!(medan.count, 0);
        // pass-through branch appears once seen
        let xyz = out.iter().find(|b| b.branch == "XYZ").unwrap();
        assert_eq!(xyz.count, 1);
    }

    #[test]
    fn test_department_summary_counts_each_mr_once_per_department() {
        let mrs = sample();
        let out = department_summary(&refs(&mrs), &ReferenceTables::default());
        // MR-1 has two BLOWER lines but contributes one count
        let blower = out.iter().find(|d| d.department == "BLOWER").unwrap();
        assert_eq!(blower.count, 2);
        let produksi = out.iter().find(|d| d.department == "PRODUKSI").unwrap();
        assert_eq!(produksi.count, 1);
    }

    #[test]
    fn test_department_summary_orders_by_count_and_cycles_palette() {
        let mrs = sample();
        let out = department_summary(&refs(&mrs), &ReferenceTables::default());
        assert_eq!(out[0].department, "BLOWER");
        assert_eq!(out[0].color, CHART_PALETTE[0]);
        assert_eq!(out[1].color, CHART_PALETTE[1]);
        // percentages are over the summed counts (2 + 1)
        assert_eq!(out[0].percentage, 66.7);
        assert_eq!(out[1].percentage, 33.3);
    }

    #[test]
    fn test_project_summary_counts_item_lines() {
        let mrs = sample();
        let out = project_summary(&refs(&mrs));
        assert_eq!(
            out,
            vec![
                ProjectCount { project: "SO-2024-001".to_string(), count: 3 },
                ProjectCount { project: "STOCK".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_mr_summary_counts_statuses_case_insensitively() {
        let mrs = sample();
        let out = mr_summary(&refs(&mrs));
        assert_eq!(out.total, 3);
        assert_eq!(out.draft, 1);
        assert_eq!(out.partially_ordered, 1);
        assert_eq!(out.pending, 1);
    }

    #[test]
    fn test_mr_summary_keeps_earliest_dates() {
        let mrs = sample();
        let out = mr_summary(&refs(&mrs));
        assert_eq!(
            out.oldest_transaction_date,
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        assert_eq!(out.nearest_required_by, NaiveDate::from_ymd_opt(2024, 3, 10));
    }

    #[test]
    fn test_mr_summary_of_empty_set() {
        let out = mr_summary(&[]);
        assert_eq!(out.total, 0);
        assert_eq!(out.oldest_transaction_date, None);
        assert_eq!(out.nearest_required_by, None);
    }

    #[test]
    fn test_dashboard_bundles_filtered_views() {
        let mrs = sample();
        let filter = MrFilter {
            branch: Some("JAKARTA".to_string()),
            ..Default::default()
        };
        let out = dashboard(&mrs, &filter, &ReferenceTables::default());
        assert_eq!(out.requests.len(), 2);
        assert_eq!(out.summary.total, 2);
        assert!(out
            .project_summary
            .iter()
            .all(|p| p.project == "SO-2024-001"));
    }
}
