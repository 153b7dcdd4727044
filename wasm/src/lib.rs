//! WebAssembly module for the Procurement Management Dashboard
//!
//! Client-side computation for:
//! - Material request filtering and dashboard aggregation
//! - Branch derivation and request-type classification
//! - Tri-state selection for the category/TOP picker trees
//!
//! Complex values cross the boundary as JSON strings; the dashboard
//! re-runs these functions on every filter change.

use std::collections::BTreeSet;
use wasm_bindgen::prelude::*;

use shared::filter::{self, MrFilter};
use shared::mappings::ReferenceTables;
use shared::models::MaterialRequest;
use shared::outstanding;
use shared::selection::{TreeIndex, TreeNode};
use shared::summary;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn from_json<T: serde::de::DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Reference tables are optional on every call; an empty string means the
/// built-in defaults.
fn parse_tables(tables_json: &str) -> Result<ReferenceTables, JsValue> {
    if tables_json.trim().is_empty() {
        return Ok(ReferenceTables::default());
    }
    from_json("tables", tables_json)
}

/// Filter material requests; returns the filtered list as JSON
#[wasm_bindgen]
pub fn filter_material_requests(
    requests_json: &str,
    filter_json: &str,
    tables_json: &str,
) -> Result<String, JsValue> {
    let requests: Vec<MaterialRequest> = from_json("requests", requests_json)?;
    let mr_filter: MrFilter = from_json("filter", filter_json)?;
    let tables = parse_tables(tables_json)?;

    let filtered = filter::filter_material_requests(&requests, &mr_filter, &tables);
    to_json(&filtered)
}

/// Filtered list plus branch/department/project summaries and counters,
/// as one JSON document
#[wasm_bindgen]
pub fn material_request_dashboard(
    requests_json: &str,
    filter_json: &str,
    tables_json: &str,
) -> Result<String, JsValue> {
    let requests: Vec<MaterialRequest> = from_json("requests", requests_json)?;
    let mr_filter: MrFilter = from_json("filter", filter_json)?;
    let tables = parse_tables(tables_json)?;

    to_json(&summary::dashboard(&requests, &mr_filter, &tables))
}

/// Branch name derived from a cost center
#[wasm_bindgen]
pub fn derive_branch(cost_center: &str, tables_json: &str) -> Result<String, JsValue> {
    let tables = parse_tables(tables_json)?;
    Ok(tables.branches.branch_for(Some(cost_center)))
}

/// Request type of one material request, classified from its item projects
#[wasm_bindgen]
pub fn classify_request_type(request_json: &str, tables_json: &str) -> Result<String, JsValue> {
    let request: MaterialRequest = from_json("request", request_json)?;
    let tables = parse_tables(tables_json)?;
    Ok(tables.request_types.request_type(&request).to_string())
}

/// Webhook lines the make-po call would produce for the given item codes
#[wasm_bindgen]
pub fn outstanding_lines_preview(
    requests_json: &str,
    item_codes_json: &str,
) -> Result<String, JsValue> {
    let requests: Vec<MaterialRequest> = from_json("requests", requests_json)?;
    let item_codes: Vec<String> = from_json("item_codes", item_codes_json)?;

    to_json(&outstanding::outstanding_lines(&requests, &item_codes))
}

/// Checkbox state ("checked" | "indeterminate" | "unchecked") of one
/// picker node, derived from the selected-id set
#[wasm_bindgen]
pub fn selection_state(
    nodes_json: &str,
    selected_json: &str,
    id: &str,
) -> Result<String, JsValue> {
    let nodes: Vec<TreeNode> = from_json("nodes", nodes_json)?;
    let selected: BTreeSet<String> = from_json("selected", selected_json)?;

    let index = TreeIndex::new(nodes);
    Ok(format!("{}", index.state(id, &selected)))
}

/// Toggle one picker node; returns the new selected-id set as a JSON array
#[wasm_bindgen]
pub fn toggle_selection(
    nodes_json: &str,
    selected_json: &str,
    id: &str,
) -> Result<String, JsValue> {
    let nodes: Vec<TreeNode> = from_json("nodes", nodes_json)?;
    let selected: BTreeSet<String> = from_json("selected", selected_json)?;

    let index = TreeIndex::new(nodes);
    to_json(&index.toggle(id, &selected))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUESTS: &str = r#"[
        {
            "name": "MR-1",
            "status": "Draft",
            "transaction_date": "2024-03-01",
            "cost_center": "SBY-PG",
            "items": [{"item_code": "MID-1", "qty": 10, "qty_total_po": 4, "project": "SO-100"}]
        },
        {
            "name": "MR-2",
            "status": "Pending",
            "transaction_date": "2024-03-08",
            "cost_center": "JKT-001",
            "items": [{"item_code": "MID-2", "qty": 5, "qty_total_po": 5}]
        }
    ]"#;

    #[test]
    fn test_filter_material_requests_by_status() {
        let out = filter_material_requests(REQUESTS, r#"{"status": "Draft"}"#, "").unwrap();
        let names: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0]["name"], "MR-1");
    }

    #[test]
    fn test_dashboard_includes_summaries() {
        let out = material_request_dashboard(REQUESTS, "{}", "").unwrap();
        let dashboard: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(dashboard["summary"]["total"], 2);
        assert_eq!(dashboard["summary"]["draft"], 1);
        assert_eq!(dashboard["summary"]["pending"], 1);
        assert_eq!(dashboard["requests"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_derive_branch_handles_specials_and_unknowns() {
        assert_eq!(derive_branch("SBY-PG", "").unwrap(), "SURABAYA-PG");
        assert_eq!(derive_branch("JKT-001", "").unwrap(), "JAKARTA");
        assert_eq!(derive_branch("XYZ-1", "").unwrap(), "XYZ");
        assert_eq!(derive_branch("", "").unwrap(), "Unassigned");
    }

    #[test]
    fn test_classify_request_type() {
        let mr = r#"{"name": "MR-1", "status": "Draft",
                     "items": [{"item_code": "A", "project": "SO-123"}]}"#;
        assert_eq!(classify_request_type(mr, "").unwrap(), "Project");

        let plain = r#"{"name": "MR-2", "status": "Draft", "items": []}"#;
        assert_eq!(classify_request_type(plain, "").unwrap(), "Lain-lain");
    }

    #[test]
    fn test_outstanding_lines_preview() {
        let out = outstanding_lines_preview(REQUESTS, r#"["MID-1", "MID-2"]"#).unwrap();
        let lines: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        // MID-2 is fully covered, only MID-1 remains outstanding
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["mr_name"], "MR-1");
        assert_eq!(lines[0]["item_code"], "MID-1");
    }

    #[test]
    fn test_selection_round_trip() {
        let nodes = r#"[
            {"id": "Spare Parts", "parent": null, "selectable": false},
            {"id": "Bearings", "parent": "Spare Parts", "selectable": true},
            {"id": "Belts", "parent": "Spare Parts", "selectable": true}
        ]"#;

        assert_eq!(selection_state(nodes, r#"["Bearings"]"#, "Spare Parts").unwrap(), "indeterminate");

        let toggled = toggle_selection(nodes, r#"["Bearings"]"#, "Spare Parts").unwrap();
        let selected: Vec<String> = serde_json::from_str(&toggled).unwrap();
        assert_eq!(selected, vec!["Bearings", "Belts"]);

        assert_eq!(selection_state(nodes, &toggled, "Spare Parts").unwrap(), "checked");
    }
}
