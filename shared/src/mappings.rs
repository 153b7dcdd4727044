//! Reference tables used by filtering and aggregation
//!
//! Branch names, department short forms and request-type rules are data,
//! not code: they are carried in these structs so deployments can override
//! them from configuration. The `Default` impls hold the production tables.

use crate::models::MaterialRequest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Branch assigned to MRs without a usable cost center.
pub const UNASSIGNED_BRANCH: &str = "Unassigned";

/// Colors assigned cyclically to chart slices by descending-count rank.
pub const CHART_PALETTE: [&str; 8] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D", "#FFC658", "#FF6B6B",
];

/// Cost-center to branch-name derivation table.
///
/// `specials` is checked first against the start of the cost center;
/// otherwise the first three characters go through `prefixes`. Unknown
/// prefixes pass through unchanged so new branches show up before anyone
/// updates the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchMap {
    pub specials: BTreeMap<String, String>,
    pub prefixes: BTreeMap<String, String>,
}

impl Default for BranchMap {
    fn default() -> Self {
        let mut specials = BTreeMap::new();
        specials.insert("SBY-PG".to_string(), "SURABAYA-PG".to_string());

        let mut prefixes = BTreeMap::new();
        for (prefix, branch) in [
            ("JKT", "JAKARTA"),
            ("SBY", "SURABAYA"),
            ("SMG", "SEMARANG"),
            ("BDG", "BANDUNG"),
            ("MDN", "MEDAN"),
            ("MKS", "MAKASSAR"),
            ("PLB", "PALEMBANG"),
            ("BPN", "BALIKPAPAN"),
        ] {
            prefixes.insert(prefix.to_string(), branch.to_string());
        }
        Self { specials, prefixes }
    }
}

impl BranchMap {
    pub fn new(specials: BTreeMap<String, String>, prefixes: BTreeMap<String, String>) -> Self {
        Self { specials, prefixes }
    }

    /// Derive the branch name for a cost center.
    pub fn branch_for(&self, cost_center: Option<&str>) -> String {
        let cc = cost_center.map(str::trim).unwrap_or("");
        if cc.is_empty() {
            return UNASSIGNED_BRANCH.to_string();
        }
        for (special, branch) in &self.specials {
            if cc.starts_with(special.as_str()) {
                return branch.clone();
            }
        }
        let prefix: String = cc.chars().take(3).collect();
        match self.prefixes.get(&prefix) {
            Some(branch) => branch.clone(),
            None => prefix,
        }
    }

    /// Every branch name the table can produce, for zero-seeding summaries.
    pub fn known_branches(&self) -> impl Iterator<Item = &str> {
        self.prefixes
            .values()
            .chain(self.specials.values())
            .map(String::as_str)
    }
}

/// ERP long-form department names to dashboard short forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentMap {
    pub short_names: BTreeMap<String, String>,
}

impl Default for DepartmentMap {
    fn default() -> Self {
        let mut short_names = BTreeMap::new();
        for (long, short) in [
            ("Blower - DN", "BLOWER"),
            ("Produksi - DN", "PRODUKSI"),
            ("Maintenance - DN", "MAINTENANCE"),
            ("Quality Control - DN", "QC"),
            ("Warehouse - DN", "WAREHOUSE"),
            ("Purchasing - DN", "PURCHASING"),
            ("Engineering - DN", "ENGINEERING"),
            ("General Affair - DN", "GA"),
            ("Human Resources - DN", "HRD"),
        ] {
            short_names.insert(long.to_string(), short.to_string());
        }
        Self { short_names }
    }
}

impl DepartmentMap {
    pub fn new(short_names: BTreeMap<String, String>) -> Self {
        Self { short_names }
    }

    /// Map a raw department value, falling back to the trimmed raw value.
    pub fn short_name(&self, raw: &str) -> String {
        let raw = raw.trim();
        match self.short_names.get(raw) {
            Some(short) => short.clone(),
            None => raw.to_string(),
        }
    }
}

/// Request-type label when no rule matches any item.
pub const DEFAULT_REQUEST_TYPE: &str = "Lain-lain";

/// One request-type rule: a label plus how a project string matches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRule {
    pub label: String,
    #[serde(default)]
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub exact: Option<String>,
}

impl TypeRule {
    fn matches(&self, project: &str) -> bool {
        if self.prefixes.iter().any(|p| project.starts_with(p.as_str())) {
            return true;
        }
        self.exact.as_deref() == Some(project)
    }
}

/// Ordered request-type rules; earlier rules win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRules {
    pub rules: Vec<TypeRule>,
    pub default_label: String,
}

impl Default for TypeRules {
    fn default() -> Self {
        Self {
            rules: vec![
                TypeRule {
                    label: "Project".to_string(),
                    prefixes: ["SO-", "SOW-", "PK/", "PPM/", "PP/"]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                    exact: None,
                },
                TypeRule {
                    label: "Operational".to_string(),
                    prefixes: vec!["OPERATIONAL".to_string()],
                    exact: None,
                },
                TypeRule {
                    label: "Stock".to_string(),
                    prefixes: Vec::new(),
                    exact: Some("STOCK".to_string()),
                },
            ],
            default_label: DEFAULT_REQUEST_TYPE.to_string(),
        }
    }
}

impl TypeRules {
    /// First rule label matching a single project string.
    pub fn classify_value(&self, project: &str) -> Option<&str> {
        let project = project.trim();
        self.rules
            .iter()
            .find(|r| r.matches(project))
            .map(|r| r.label.as_str())
    }

    /// Request type of an MR: rules are tried in priority order and each
    /// rule scans all items, so a Project item anywhere beats a Stock item
    /// on the first line.
    pub fn request_type(&self, mr: &MaterialRequest) -> &str {
        for rule in &self.rules {
            let hit = mr.items.iter().any(|item| {
                item.project
                    .as_deref()
                    .map(|p| rule.matches(p.trim()))
                    .unwrap_or(false)
            });
            if hit {
                return &rule.label;
            }
        }
        &self.default_label
    }
}

/// All reference tables the filter and aggregation functions take.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceTables {
    #[serde(default)]
    pub branches: BranchMap,
    #[serde(default)]
    pub departments: DepartmentMap,
    #[serde(default)]
    pub request_types: TypeRules,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mr_with_projects(projects: &[Option<&str>]) -> MaterialRequest {
        serde_json::from_value(serde_json::json!({
            "name": "MR-T",
            "status": "Draft",
            "items": projects
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    serde_json::json!({
                        "item_code": format!("MID-{}", i),
                        "qty": 1,
                        "project": p,
                    })
                })
                .collect::<Vec<_>>()
        }))
        .unwrap()
    }

    #[test]
    fn test_branch_special_case_wins_over_prefix() {
        let map = BranchMap::default();
        assert_eq!(map.branch_for(Some("SBY-PG")), "SURABAYA-PG");
        assert_eq!(map.branch_for(Some("SBY-001")), "SURABAYA");
    }

    #[test]
    fn test_branch_prefix_lookup() {
        let map = BranchMap::default();
        assert_eq!(map.branch_for(Some("JKT-001")), "JAKARTA");
        assert_eq!(map.branch_for(Some("MDN-WH")), "MEDAN");
    }

    #[test]
    fn test_branch_unknown_prefix_passes_through() {
        let map = BranchMap::default();
        assert_eq!(map.branch_for(Some("XYZ-1")), "XYZ");
    }

    #[test]
    fn test_branch_missing_cost_center_is_unassigned() {
        let map = BranchMap::default();
        assert_eq!(map.branch_for(None), UNASSIGNED_BRANCH);
        assert_eq!(map.branch_for(Some("")), UNASSIGNED_BRANCH);
        assert_eq!(map.branch_for(Some("   ")), UNASSIGNED_BRANCH);
    }

    #[test]
    fn test_known_branches_covers_specials() {
        let map = BranchMap::default();
        let branches: Vec<&str> = map.known_branches().collect();
        assert!(branches.contains(&"SURABAYA-PG"));
        assert!(branches.contains(&"JAKARTA"));
    }

    #[test]
    fn test_department_short_name_fallback() {
        let map = DepartmentMap::default();
        assert_eq!(map.short_name("Blower - DN"), "BLOWER");
        assert_eq!(map.short_name("  Blower - DN "), "BLOWER");
        assert_eq!(map.short_name("Logistik"), "Logistik");
    }

    #[test]
    fn test_classify_value_by_prefix_and_exact() {
        let rules = TypeRules::default();
        assert_eq!(rules.classify_value("SO-2024-001"), Some("Project"));
        assert_eq!(rules.classify_value("PPM/JKT/07"), Some("Project"));
        assert_eq!(rules.classify_value("OPERATIONAL JKT"), Some("Operational"));
        assert_eq!(rules.classify_value("STOCK"), Some("Stock"));
        // exact means exact
        assert_eq!(rules.classify_value("STOCK JKT"), None);
        assert_eq!(rules.classify_value("lorem"), None);
    }

    #[test]
    fn test_request_type_priority_over_item_order() {
        let rules = TypeRules::default();
        // stock line first, project line later: Project still wins
        let mr = mr_with_projects(&[Some("STOCK"), Some("SO-2024-001")]);
        assert_eq!(rules.request_type(&mr), "Project");
    }

    #[test]
    fn test_request_type_default() {
        let rules = TypeRules::default();
        let mr = mr_with_projects(&[None, Some("misc")]);
        assert_eq!(rules.request_type(&mr), DEFAULT_REQUEST_TYPE);
    }
}
