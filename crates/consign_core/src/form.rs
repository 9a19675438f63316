use crate::record::ShipmentRecord;

/// Identifies one editable field of the shipment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    BillOfLadingNumber,
    ContainerNumber,
    ConsigneeName,
    ConsigneeAddress,
    DateOfExport,
    LineItemsCount,
    TotalGrossWeight,
    TotalInvoiceAmount,
    AverageGrossWeight,
    AveragePrice,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [FormField; 10] = [
        FormField::BillOfLadingNumber,
        FormField::ContainerNumber,
        FormField::ConsigneeName,
        FormField::ConsigneeAddress,
        FormField::DateOfExport,
        FormField::LineItemsCount,
        FormField::TotalGrossWeight,
        FormField::TotalInvoiceAmount,
        FormField::AverageGrossWeight,
        FormField::AveragePrice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::BillOfLadingNumber => "Bill of Lading No.",
            FormField::ContainerNumber => "Container No.",
            FormField::ConsigneeName => "Consignee Name",
            FormField::ConsigneeAddress => "Consignee Address",
            FormField::DateOfExport => "Date of Export",
            FormField::LineItemsCount => "Line Items Count",
            FormField::TotalGrossWeight => "Total Gross Weight",
            FormField::TotalInvoiceAmount => "Total Invoice Amount",
            FormField::AverageGrossWeight => "Avg. Gross Weight",
            FormField::AveragePrice => "Avg. Price",
        }
    }
}

/// Editable fork of a [`ShipmentRecord`]: one text buffer per field.
///
/// Buffers hold whatever the user typed; nothing is validated before save
/// or export. [`ShipmentForm::to_record`] re-types leniently: blank buffers
/// become null, numeric buffers that do not parse become null.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShipmentForm {
    pub bill_of_lading_number: String,
    pub container_number: String,
    pub consignee_name: String,
    pub consignee_address: String,
    pub date_of_export: String,
    pub line_items_count: String,
    pub total_gross_weight: String,
    pub total_invoice_amount: String,
    pub average_gross_weight: String,
    pub average_price: String,
}

impl ShipmentForm {
    /// Field-by-field copy from a freshly extracted record; null source
    /// fields land as empty buffers.
    pub fn from_record(record: &ShipmentRecord) -> Self {
        Self {
            bill_of_lading_number: text(&record.bill_of_lading_number),
            container_number: text(&record.container_number),
            consignee_name: text(&record.consignee_name),
            consignee_address: text(&record.consignee_address),
            date_of_export: text(&record.date_of_export),
            line_items_count: record.line_items_count.map(|v| v.to_string()).unwrap_or_default(),
            total_gross_weight: number_text(record.total_gross_weight),
            total_invoice_amount: number_text(record.total_invoice_amount),
            average_gross_weight: number_text(record.average_gross_weight),
            average_price: number_text(record.average_price),
        }
    }

    /// Serialize the current buffers back into the wire shape.
    pub fn to_record(&self) -> ShipmentRecord {
        ShipmentRecord {
            bill_of_lading_number: non_blank(&self.bill_of_lading_number),
            container_number: non_blank(&self.container_number),
            consignee_name: non_blank(&self.consignee_name),
            consignee_address: non_blank(&self.consignee_address),
            date_of_export: non_blank(&self.date_of_export),
            line_items_count: self.line_items_count.trim().parse().ok(),
            total_gross_weight: self.total_gross_weight.trim().parse().ok(),
            total_invoice_amount: self.total_invoice_amount.trim().parse().ok(),
            average_gross_weight: self.average_gross_weight.trim().parse().ok(),
            average_price: self.average_price.trim().parse().ok(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::BillOfLadingNumber => &self.bill_of_lading_number,
            FormField::ContainerNumber => &self.container_number,
            FormField::ConsigneeName => &self.consignee_name,
            FormField::ConsigneeAddress => &self.consignee_address,
            FormField::DateOfExport => &self.date_of_export,
            FormField::LineItemsCount => &self.line_items_count,
            FormField::TotalGrossWeight => &self.total_gross_weight,
            FormField::TotalInvoiceAmount => &self.total_invoice_amount,
            FormField::AverageGrossWeight => &self.average_gross_weight,
            FormField::AveragePrice => &self.average_price,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::BillOfLadingNumber => &mut self.bill_of_lading_number,
            FormField::ContainerNumber => &mut self.container_number,
            FormField::ConsigneeName => &mut self.consignee_name,
            FormField::ConsigneeAddress => &mut self.consignee_address,
            FormField::DateOfExport => &mut self.date_of_export,
            FormField::LineItemsCount => &mut self.line_items_count,
            FormField::TotalGrossWeight => &mut self.total_gross_weight,
            FormField::TotalInvoiceAmount => &mut self.total_invoice_amount,
            FormField::AverageGrossWeight => &mut self.average_gross_weight,
            FormField::AveragePrice => &mut self.average_price,
        };
        *slot = value;
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn number_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn non_blank(buffer: &str) -> Option<String> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
