//! CSV report export.
//!
//! Rows go through a real CSV writer, so fields containing commas,
//! quotes, or newlines come out correctly quoted instead of corrupting
//! the row. Exports are built in memory and returned as a `String`; the
//! caller decides where the bytes go.

use chrono::Utc;
use csv::WriterBuilder;

use crate::error::CoreError;
use crate::model::{Client, Shipment, Transporter};

fn write_rows(
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<String, CoreError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Export(e.to_string()))
}

/// Download filename for an export, stamped with today's date.
pub fn export_filename(kind: &str) -> String {
    format!("{kind}-export-{}.csv", Utc::now().format("%Y-%m-%d"))
}

fn opt_date(value: Option<chrono::DateTime<Utc>>) -> String {
    value.map_or_else(|| "N/A".to_owned(), |d| d.format("%Y-%m-%d").to_string())
}

pub fn clients_csv(clients: &[Client]) -> Result<String, CoreError> {
    write_rows(
        &[
            "ID",
            "Name",
            "Company",
            "Region",
            "Total Shipments",
            "Status",
            "Tier",
            "Contact Email",
        ],
        clients.iter().map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.company.clone(),
                c.region.clone().unwrap_or_else(|| "N/A".to_owned()),
                c.total_shipments.to_string(),
                c.status.to_string(),
                c.tier.to_string(),
                c.email.clone(),
            ]
        }),
    )
}

pub fn transporters_csv(transporters: &[Transporter]) -> Result<String, CoreError> {
    write_rows(
        &[
            "ID",
            "Name",
            "Regions",
            "Modes",
            "Reliability",
            "On-Time Rate",
            "Status",
        ],
        transporters.iter().map(|t| {
            vec![
                t.id.to_string(),
                t.name.clone(),
                t.regions_covered.join("; "),
                t.transport_modes.join("; "),
                format!("{:.2}", t.reliability_score),
                format!("{:.2}", t.on_time_rate()),
                t.status.to_string(),
            ]
        }),
    )
}

pub fn shipments_csv(shipments: &[Shipment]) -> Result<String, CoreError> {
    write_rows(
        &[
            "ID",
            "Origin",
            "Destination",
            "Status",
            "Mode",
            "Weight (kg)",
            "Total Cost",
            "Risk Level",
            "Created",
        ],
        shipments.iter().map(|s| {
            vec![
                s.id.to_string(),
                s.origin.clone(),
                s.destination.clone(),
                s.status.to_string(),
                s.transport_mode.clone(),
                s.weight_kg.to_string(),
                s.total_cost
                    .map_or_else(|| "N/A".to_owned(), |c| format!("{c:.2}")),
                s.risk_level.to_string(),
                opt_date(s.created_at),
            ]
        }),
    )
}
