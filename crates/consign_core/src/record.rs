use serde::{Deserialize, Serialize};

/// Structured shipment record as returned by the extraction endpoint.
///
/// Every field is nullable; the two averages are derived server-side
/// (total ÷ line item count) and are never recomputed here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub bill_of_lading_number: Option<String>,
    pub container_number: Option<String>,
    pub consignee_name: Option<String>,
    pub consignee_address: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    pub date_of_export: Option<String>,
    pub line_items_count: Option<i64>,
    pub total_gross_weight: Option<f64>,
    pub total_invoice_amount: Option<f64>,
    pub average_gross_weight: Option<f64>,
    pub average_price: Option<f64>,
}

/// Success body of the save endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub message: String,
    pub filename: String,
}
