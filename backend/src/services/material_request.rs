//! Material request service
//!
//! Open-status listing, dashboard aggregation, CSV export and the make-po
//! flow. Filtering and aggregation run in memory on top of the shared pure
//! functions; only the make-po write path is expressed in SQL.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::filter::{filter_material_requests, MrFilter};
use shared::mappings::ReferenceTables;
use shared::models::{MaterialRequest, MaterialRequestItem, OPEN_STATUSES};
use shared::outstanding::PoRequestLine;
use shared::summary::{dashboard, MrDashboard};
use shared::validation::validate_item_codes;
use sqlx::PgPool;
use std::collections::{BTreeSet, HashMap};

use crate::error::{AppError, AppResult};
use crate::external::AutomationClient;

/// Line qualification for the make-po flow. The SELECT that builds the
/// webhook payload and the UPDATE that flags the lines both use this
/// predicate, so they can never disagree about which lines qualify. It is
/// the SQL form of `shared::outstanding::is_outstanding`.
const OUTSTANDING_PREDICATE: &str = "item_code = ANY($1) AND qty > COALESCE(qty_total_po, 0)";

/// Material request service for dashboard queries and the make-po flow
#[derive(Clone)]
pub struct MaterialRequestService {
    db: PgPool,
}

/// Body of POST /api/material-request/make-po.
///
/// Defaults let a malformed body degrade to an empty input, which then
/// fails item_codes validation with a 400.
#[derive(Debug, Default, Deserialize)]
pub struct MakePoInput {
    #[serde(default)]
    pub item_codes: Vec<String>,
    /// Reserved for the automation; accepted but not interpreted here
    #[serde(default)]
    pub po_meta: Option<serde_json::Value>,
}

/// make-po result, camelCase per the existing dashboard consumer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MakePoResponse {
    pub matched_count: u64,
    pub modified_count: u64,
    pub webhook_sent_for: Vec<PoRequestLine>,
}

/// One CSV row of the dashboard export: a material request line, repeated
/// per item. Requests without items still produce one row so the export
/// never loses a request.
#[derive(Debug, Serialize)]
pub struct MrExportRow {
    pub mr_name: String,
    pub status: String,
    pub transaction_date: String,
    pub required_by: String,
    pub item_code: String,
    pub item_name: String,
    pub qty: Option<Decimal>,
    pub qty_total_po: Option<Decimal>,
    pub uom: String,
    pub project: String,
    pub department: String,
    pub cost_center: String,
}

#[derive(sqlx::FromRow)]
struct MrRow {
    name: String,
    status: String,
    transaction_date: Option<String>,
    required_by: Option<String>,
    cost_center: Option<String>,
    department: Option<String>,
}

#[derive(sqlx::FromRow)]
struct MrItemRow {
    mr_name: String,
    item_code: String,
    item_name: String,
    qty: Decimal,
    qty_total_po: Option<Decimal>,
    received_qty: Option<Decimal>,
    uom: Option<String>,
    project: Option<String>,
    department: Option<String>,
    cost_center: Option<String>,
    po_detail: Option<serde_json::Value>,
    is_po: Option<bool>,
}

impl MrItemRow {
    fn into_item(self) -> MaterialRequestItem {
        MaterialRequestItem {
            item_code: self.item_code,
            item_name: self.item_name,
            qty: self.qty,
            qty_total_po: self.qty_total_po,
            received_qty: self.received_qty,
            uom: self.uom,
            project: self.project,
            department: self.department,
            cost_center: self.cost_center,
            // written by the external automation; tolerate foreign shapes
            po_detail: self.po_detail.and_then(|v| serde_json::from_value(v).ok()),
            is_po: self.is_po,
        }
    }
}

/// Flatten filtered requests into export rows, one per item line.
pub fn export_rows(requests: &[&MaterialRequest]) -> Vec<MrExportRow> {
    let mut rows = Vec::new();
    for mr in requests {
        if mr.items.is_empty() {
            rows.push(MrExportRow {
                mr_name: mr.name.clone(),
                status: mr.status.clone(),
                transaction_date: mr.transaction_date.clone().unwrap_or_default(),
                required_by: mr.required_by.clone().unwrap_or_default(),
                item_code: String::new(),
                item_name: String::new(),
                qty: None,
                qty_total_po: None,
                uom: String::new(),
                project: String::new(),
                department: String::new(),
                cost_center: String::new(),
            });
            continue;
        }
        for item in &mr.items {
            rows.push(MrExportRow {
                mr_name: mr.name.clone(),
                status: mr.status.clone(),
                transaction_date: mr.transaction_date.clone().unwrap_or_default(),
                required_by: mr.required_by.clone().unwrap_or_default(),
                item_code: item.item_code.clone(),
                item_name: item.item_name.clone(),
                qty: Some(item.qty),
                qty_total_po: item.qty_total_po,
                uom: item.uom.clone().unwrap_or_default(),
                project: item.project.clone().unwrap_or_default(),
                department: item.department.clone().unwrap_or_default(),
                cost_center: item.cost_center.clone().unwrap_or_default(),
            });
        }
    }
    rows
}

/// Render export rows as a CSV document with a header row.
pub fn render_csv(rows: &[MrExportRow]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV buffer error: {}", e)))?;
    String::from_utf8(data).map_err(|e| AppError::Internal(format!("CSV encoding error: {}", e)))
}

impl MaterialRequestService {
    /// Create a new MaterialRequestService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All open-status requests with their items hydrated
    async fn fetch_open(&self) -> AppResult<Vec<MaterialRequest>> {
        let statuses: Vec<String> = OPEN_STATUSES.iter().map(|s| s.to_lowercase()).collect();

        let mr_rows = sqlx::query_as::<_, MrRow>(
            "SELECT name, status, transaction_date, required_by, cost_center, department \
             FROM material_requests \
             WHERE LOWER(status) = ANY($1) \
             ORDER BY name",
        )
        .bind(&statuses)
        .fetch_all(&self.db)
        .await?;

        let item_rows = sqlx::query_as::<_, MrItemRow>(
            "SELECT i.mr_name, i.item_code, i.item_name, i.qty, i.qty_total_po, \
                    i.received_qty, i.uom, i.project, i.department, i.cost_center, \
                    i.po_detail, i.is_po \
             FROM material_request_items i \
             JOIN material_requests m ON m.name = i.mr_name \
             WHERE LOWER(m.status) = ANY($1) \
             ORDER BY i.mr_name, i.position",
        )
        .bind(&statuses)
        .fetch_all(&self.db)
        .await?;

        let mut items_by_mr: HashMap<String, Vec<MaterialRequestItem>> = HashMap::new();
        for row in item_rows {
            let mr_name = row.mr_name.clone();
            items_by_mr.entry(mr_name).or_default().push(row.into_item());
        }

        Ok(mr_rows
            .into_iter()
            .map(|row| MaterialRequest {
                items: items_by_mr.remove(&row.name).unwrap_or_default(),
                name: row.name,
                status: row.status,
                transaction_date: row.transaction_date,
                required_by: row.required_by,
                cost_center: row.cost_center,
                department: row.department,
            })
            .collect())
    }

    /// Open requests matching the filter
    pub async fn list_open(
        &self,
        filter: &MrFilter,
        tables: &ReferenceTables,
    ) -> AppResult<Vec<MaterialRequest>> {
        let requests = self.fetch_open().await?;
        Ok(filter_material_requests(&requests, filter, tables)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Filtered list plus every aggregation the dashboard renders
    pub async fn dashboard(
        &self,
        filter: &MrFilter,
        tables: &ReferenceTables,
    ) -> AppResult<MrDashboard> {
        let requests = self.fetch_open().await?;
        Ok(dashboard(&requests, filter, tables))
    }

    /// The filtered rows as a CSV document
    pub async fn export_csv(
        &self,
        filter: &MrFilter,
        tables: &ReferenceTables,
    ) -> AppResult<String> {
        let requests = self.fetch_open().await?;
        let filtered = filter_material_requests(&requests, filter, tables);
        render_csv(&export_rows(&filtered))
    }

    /// Flag outstanding lines for the given item codes and notify the PO
    /// automation.
    ///
    /// The SELECT and the UPDATE run in one transaction over the shared
    /// predicate; the webhook fires only after commit, and a webhook
    /// failure is logged but never rolls the flags back. `modified_count`
    /// excludes requests whose qualifying lines were all flagged already.
    pub async fn make_po(
        &self,
        input: MakePoInput,
        automation: &AutomationClient,
    ) -> AppResult<MakePoResponse> {
        if let Err(msg) = validate_item_codes(&input.item_codes) {
            return Err(AppError::Validation {
                field: "item_codes".to_string(),
                message: msg.to_string(),
                message_id: "Daftar kode item wajib diisi".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let line_rows = sqlx::query_as::<_, (String, String)>(&format!(
            "SELECT mr_name, item_code FROM material_request_items \
             WHERE {} \
             ORDER BY mr_name, position",
            OUTSTANDING_PREDICATE
        ))
        .bind(&input.item_codes)
        .fetch_all(&mut *tx)
        .await?;

        let touched = sqlx::query_as::<_, (String,)>(&format!(
            "UPDATE material_request_items SET is_po = TRUE \
             WHERE {} AND is_po IS DISTINCT FROM TRUE \
             RETURNING mr_name",
            OUTSTANDING_PREDICATE
        ))
        .bind(&input.item_codes)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let matched_count = line_rows
            .iter()
            .map(|(mr_name, _)| mr_name.as_str())
            .collect::<BTreeSet<_>>()
            .len() as u64;
        let modified_count = touched
            .iter()
            .map(|(mr_name,)| mr_name.as_str())
            .collect::<BTreeSet<_>>()
            .len() as u64;

        let lines: Vec<PoRequestLine> = line_rows
            .into_iter()
            .map(|(mr_name, item_code)| PoRequestLine { mr_name, item_code })
            .collect();

        let webhook_sent_for = if lines.is_empty() {
            Vec::new()
        } else {
            match automation.send_po_request(&lines).await {
                Ok(()) => lines,
                Err(e) => {
                    tracing::warn!("PO webhook failed after commit: {}", e);
                    Vec::new()
                }
            }
        };

        Ok(MakePoResponse {
            matched_count,
            modified_count,
            webhook_sent_for,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requests() -> Vec<MaterialRequest> {
        serde_json::from_value(serde_json::json!([
            {
                "name": "MR-1",
                "status": "Draft",
                "transaction_date": "2024-03-01",
                "required_by": "2024-03-15",
                "items": [
                    {"item_code": "MID-1", "item_name": "Bearing 6204", "qty": 10,
                     "qty_total_po": 4, "uom": "Pcs", "project": "SO-100",
                     "department": "Maintenance - DN"},
                    {"item_code": "MID-2", "item_name": "V-Belt", "qty": 2, "uom": "Pcs"}
                ]
            },
            {
                "name": "MR-2",
                "status": "Pending",
                "items": []
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_export_rows_flatten_one_row_per_item() {
        let requests = requests();
        let refs: Vec<&MaterialRequest> = requests.iter().collect();
        let rows = export_rows(&refs);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].mr_name, "MR-1");
        assert_eq!(rows[0].item_code, "MID-1");
        assert_eq!(rows[0].qty, Some(rust_decimal::Decimal::from(10)));
        assert_eq!(rows[1].item_code, "MID-2");
        assert_eq!(rows[1].qty_total_po, None);
    }

    #[test]
    fn test_export_keeps_itemless_requests() {
        let requests = requests();
        let refs: Vec<&MaterialRequest> = requests.iter().collect();
        let rows = export_rows(&refs);

        assert_eq!(rows[2].mr_name, "MR-2");
        assert_eq!(rows[2].item_code, "");
        assert_eq!(rows[2].qty, None);
    }

    #[test]
    fn test_render_csv_emits_header_and_rows() {
        let requests = requests();
        let refs: Vec<&MaterialRequest> = requests.iter().collect();
        let csv = render_csv(&export_rows(&refs)).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "mr_name,status,transaction_date,required_by,item_code,item_name,\
             qty,qty_total_po,uom,project,department,cost_center"
        );
        assert_eq!(csv.lines().count(), 4);
        assert!(csv.contains("MR-1,Draft,2024-03-01,2024-03-15,MID-1,Bearing 6204,10,4,Pcs"));
    }

    #[test]
    fn test_empty_input_validation() {
        assert!(validate_item_codes(&[]).is_err());
        assert!(validate_item_codes(&["MID-1".to_string()]).is_ok());
        let input = MakePoInput::default();
        assert!(input.item_codes.is_empty());
    }
}
