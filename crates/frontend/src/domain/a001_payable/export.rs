use chrono::NaiveDate;
use contracts::domain::a001_payable::PayableRecord;

use crate::shared::export::{build_csv, download_csv, CsvCell, CsvExportable};

impl CsvExportable for PayableRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "id",
            "descricao",
            "fornecedor",
            "filial",
            "categoria",
            "data_vencimento",
            "valor_final",
            "valor_pago",
            "valor_restante",
            "status",
        ]
    }

    fn to_csv_row(&self) -> Vec<CsvCell> {
        let text = |value: Option<&str>| CsvCell::Text(value.unwrap_or_default().to_string());
        vec![
            CsvCell::Raw(self.id.to_string()),
            CsvCell::Text(self.description.clone()),
            text(self.supplier.name.as_deref()),
            text(self.branch.name.as_deref()),
            text(self.category.name.as_deref()),
            CsvCell::Raw(self.due_date.format("%Y-%m-%d").to_string()),
            CsvCell::Raw(format!("{:.2}", self.final_amount())),
            CsvCell::Raw(format!("{:.2}", self.amount_paid)),
            CsvCell::Raw(format!("{:.2}", self.remaining_amount())),
            CsvCell::Raw(self.status.as_str().to_string()),
        ]
    }
}

pub fn export_filename(today: NaiveDate) -> String {
    format!("contas_export_{}.csv", today.format("%Y-%m-%d"))
}

/// Downloads `records` as CSV. Returns the file name that was offered.
pub fn export_payables(records: &[PayableRecord], today: NaiveDate) -> Result<String, String> {
    let filename = export_filename(today);
    download_csv(&build_csv(records), &filename)?;
    log::info!("payables: exported {} records to {}", records.len(), filename);
    Ok(filename)
}
