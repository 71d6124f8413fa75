//! CSV and JSON renderings of the ledger.
//!
//! Both walk the same [`Reservation`] record, so column order in the CSV and
//! key order in the JSON objects are identical.

use chrono::NaiveDateTime;

use crate::domain::{DomainError, DomainResult, Reservation};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub const CSV_HEADER: [&str; 9] = [
    "id",
    "nombre",
    "correo",
    "telefono",
    "fecha_llegada",
    "fecha_salida",
    "habitaciones",
    "total",
    "created_at",
];

/// Render `records` in the given order as a CSV document with a header row.
pub fn export_csv(records: &[Reservation]) -> DomainResult<Vec<u8>> {
    let export_err = |e: csv::Error| DomainError::Export(e.to_string());

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(export_err)?;
    for record in records {
        writer.serialize(record).map_err(export_err)?;
    }

    writer
        .into_inner()
        .map_err(|e| DomainError::Export(e.to_string()))
}

/// `reservas_export_<YYYYMMDD_HHMMSS>.csv`
pub fn export_filename(at: NaiveDateTime) -> String {
    format!("reservas_export_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Render `records` as a bare JSON array of objects.
///
/// Serialized straight from the records, never through `serde_json::Value`,
/// whose maps would sort the keys.
pub fn export_json(records: &[Reservation]) -> DomainResult<Vec<u8>> {
    serde_json::to_vec(records).map_err(|e| DomainError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample() -> Reservation {
        Reservation {
            id: 1,
            name: "Pérez, Juan".into(),
            email: Some("juan@example.com".into()),
            phone: None,
            arrival_date: Some("2025-10-01".into()),
            departure_date: Some("2025-10-03".into()),
            room_count: Some(2),
            total_amount: Some(180.5),
            created_at: Some("2025-09-30 10:00:00".into()),
        }
    }

    #[test]
    fn empty_ledger_still_has_header() {
        let bytes = export_csv(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "id,nombre,correo,telefono,fecha_llegada,fecha_salida,habitaciones,total,created_at\r\n"
        );
    }

    #[test]
    fn rows_are_quoted_where_needed() {
        let text = String::from_utf8(export_csv(&[sample()]).unwrap()).unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "1,\"Pérez, Juan\",juan@example.com,,2025-10-01,2025-10-03,2,180.5,2025-09-30 10:00:00"
        );
        assert_eq!(lines[2], "");
    }

    #[test]
    fn csv_reads_back_into_the_same_values() {
        let mut second = sample();
        second.id = 2;
        second.name = "Ana \"La Jefa\" Gómez".into();
        second.total_amount = Some(240.0);

        let bytes = export_csv(&[sample(), second.clone()]).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        assert_eq!(reader.headers().unwrap(), CSV_HEADER.as_slice());

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][1], "Ana \"La Jefa\" Gómez");
        assert_eq!(rows[1][7].parse::<f64>().unwrap(), 240.0);
    }

    #[test]
    fn filename_has_fixed_width_timestamp() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(5, 6, 7)
            .unwrap();
        assert_eq!(export_filename(at), "reservas_export_20250304_050607.csv");
    }

    /// Byte offsets of each column's key within one exported object.
    fn key_positions(text: &str) -> Vec<usize> {
        CSV_HEADER
            .iter()
            .map(|key| text.find(&format!("\"{key}\":")).unwrap())
            .collect()
    }

    #[test]
    fn json_is_a_bare_array_in_storage_order() {
        let bytes = export_json(&[sample()]).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("[{\"id\":1,\"nombre\":"), "{text}");
        assert!(key_positions(&text).windows(2).all(|w| w[0] < w[1]), "{text}");

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["nombre"], "Pérez, Juan");
        assert_eq!(items[0]["telefono"], serde_json::Value::Null);
        assert_eq!(items[0]["total"], 180.5);
    }

    #[test]
    fn empty_ledger_is_an_empty_array() {
        assert_eq!(export_json(&[]).unwrap(), b"[]");
    }
}
