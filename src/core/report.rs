use crate::domain::model::{PhotoReport, PriceRecord};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::collections::BTreeSet;

pub const REPORT_FILE: &str = "report.html";
pub const CSV_FILE: &str = "prices.csv";
pub const JSON_FILE: &str = "prices.json";

/// Writes the report bundle: a standalone HTML page with the embedded map,
/// the raw records as JSON, a CSV flattening of the records, and a copy of
/// the photo so the page can show it offline.
pub struct ReportWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> ReportWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn write(&self, report: &PhotoReport, photo: &[u8], photo_name: &str) -> Result<()> {
        let html = render_page(report, photo_name);
        tracing::debug!("Writing {} ({} bytes)", REPORT_FILE, html.len());
        self.storage.write_file(REPORT_FILE, html.as_bytes()).await?;

        let json = serde_json::to_string_pretty(&report.price_records)?;
        self.storage.write_file(JSON_FILE, json.as_bytes()).await?;

        let csv = price_records_csv(&report.price_records)?;
        self.storage.write_file(CSV_FILE, &csv).await?;

        self.storage.write_file(photo_name, photo).await?;

        tracing::info!("💾 Report bundle written ({} records)", report.price_records.len());
        Ok(())
    }
}

/// Union of every field name across the records, sorted so column order
/// does not depend on hash iteration.
fn column_names(records: &[PriceRecord]) -> Vec<&str> {
    let mut columns = BTreeSet::new();
    for record in records {
        for key in record.data.keys() {
            columns.insert(key.as_str());
        }
    }
    columns.into_iter().collect()
}

fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn price_records_csv(records: &[PriceRecord]) -> Result<Vec<u8>> {
    let columns = column_names(records);
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(&columns)?;
        for record in records {
            let row: Vec<String> = columns
                .iter()
                .map(|column| record.data.get(*column).map(cell_text).unwrap_or_default())
                .collect();
            writer.write_record(&row)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

fn render_table(records: &[PriceRecord]) -> String {
    if records.is_empty() {
        return "<p>No transactions recorded in this window.</p>\n".to_string();
    }

    let columns = column_names(records);
    let mut table = String::from("<table>\n<tr>");
    for column in &columns {
        table.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    table.push_str("</tr>\n");

    for record in records {
        table.push_str("<tr>");
        for column in &columns {
            let text = record.data.get(*column).map(cell_text).unwrap_or_default();
            table.push_str(&format!("<td>{}</td>", escape_html(&text)));
        }
        table.push_str("</tr>\n");
    }
    table.push_str("</table>\n");
    table
}

fn render_page(report: &PhotoReport, photo_name: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"ja\">\n\
         <head>\n\
         <meta charset=\"utf-8\"/>\n\
         <title>Land price report</title>\n\
         {header}\
         </head>\n\
         <body>\n\
         <h1>Land price report</h1>\n\
         <p>Coordinate {coordinate} / municipality {municipality} / window {window}</p>\n\
         <img src=\"{photo}\" alt=\"photo\" width=\"400\"/>\n\
         {map_body}\
         <script>\n{script}</script>\n\
         <h2>Transactions ({count})</h2>\n\
         {table}\
         </body>\n\
         </html>\n",
        header = report.map.header,
        coordinate = report.coordinate,
        municipality = escape_html(report.municipality.as_str()),
        window = report.window,
        photo = escape_html(photo_name),
        map_body = report.map.body,
        script = report.map.script,
        count = report.price_records.len(),
        table = render_table(&report.price_records),
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
