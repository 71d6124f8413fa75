//! Ingestion of the external reservation CSV.
//!
//! The file is read whole and every row is parsed before anything is written,
//! so a bad row leaves the ledger untouched. Rows are appended as-is: there is
//! no duplicate detection and the file is left in place.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::domain::reservation::model::{parse_or_default, DEFAULT_ROOM_COUNT, DEFAULT_TOTAL_AMOUNT};
use crate::domain::{DomainError, DomainResult, NewReservation, ReservationRepository};

/// Accepted header spellings per field, looked up in order.
const NAME: [&str; 2] = ["nombre", "Nombre"];
const EMAIL: [&str; 2] = ["correo", "Correo"];
const PHONE: [&str; 2] = ["telefono", "Telefono"];
const ARRIVAL: [&str; 2] = ["fecha_llegada", "FechaLlegada"];
const DEPARTURE: [&str; 2] = ["fecha_salida", "FechaSalida"];
const ROOMS: [&str; 2] = ["habitaciones", "Habitaciones"];
const TOTAL: [&str; 2] = ["total", "Total"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// No file at the import path
    Absent,
    /// The file was parsed and its rows appended
    Ingested { rows: u64 },
}

struct Columns(HashMap<String, usize>);

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        // Later duplicates win, like a dict built from the header row.
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(idx, name)| (name.to_string(), idx))
                .collect(),
        )
    }

    /// First non-empty value among the accepted spellings.
    fn value<'r>(&self, record: &'r csv::StringRecord, names: &[&str]) -> Option<&'r str> {
        names
            .iter()
            .filter_map(|name| self.0.get(*name))
            .filter_map(|idx| record.get(*idx))
            .find(|value| !value.is_empty())
    }
}

/// Parse the import file contents into insertable rows.
pub fn parse_import(data: &[u8]) -> DomainResult<Vec<NewReservation>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| DomainError::Ingestion(format!("unreadable header row: {}", e)))?
        .clone();
    let columns = Columns::from_headers(&headers);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let record =
            record.map_err(|e| DomainError::Ingestion(format!("line {}: {}", line, e)))?;

        let text = |names: &[&str]| columns.value(&record, names).unwrap_or_default().to_string();

        let room_count = parse_or_default(columns.value(&record, &ROOMS), DEFAULT_ROOM_COUNT)
            .map_err(|e| DomainError::Ingestion(format!("line {}: habitaciones: {}", line, e)))?;
        let total_amount = parse_or_default(columns.value(&record, &TOTAL), DEFAULT_TOTAL_AMOUNT)
            .map_err(|e| DomainError::Ingestion(format!("line {}: total: {}", line, e)))?;

        rows.push(NewReservation {
            name: text(&NAME),
            email: text(&EMAIL),
            phone: text(&PHONE),
            arrival_date: text(&ARRIVAL),
            departure_date: text(&DEPARTURE),
            room_count,
            total_amount,
        });
    }

    Ok(rows)
}

/// Append the rows of the CSV at `path`, if one exists.
///
/// Runs the whole batch or nothing. Errors are returned to the caller, which
/// decides whether they are fatal.
pub async fn ingest_external_file(
    repo: &dyn ReservationRepository,
    path: &Path,
) -> DomainResult<IngestOutcome> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No import file at {}", path.display());
            return Ok(IngestOutcome::Absent);
        }
        Err(e) => {
            return Err(DomainError::Ingestion(format!(
                "cannot read {}: {}",
                path.display(),
                e
            )))
        }
    };

    let rows = parse_import(&data)?;
    let inserted = repo.insert_many(rows).await?;
    info!("Imported {} reservations from {}", inserted, path.display());
    Ok(IngestOutcome::Ingested { rows: inserted })
}

/// Target name for an archived import file:
/// `import_reservas.csv` becomes `import_reservas.imported-20251110_083000.csv`.
pub fn archived_path(path: &Path, at: NaiveDateTime) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "import".to_string());
    let mut name = format!("{}.imported-{}", stem, at.format("%Y%m%d_%H%M%S"));
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

/// Move a processed import file out of the way so it is not applied again.
pub async fn archive_import_file(path: &Path, at: NaiveDateTime) -> DomainResult<PathBuf> {
    let target = archived_path(path, at);
    tokio::fs::rename(path, &target).await.map_err(|e| {
        DomainError::Ingestion(format!(
            "cannot archive {} to {}: {}",
            path.display(),
            target.display(),
            e
        ))
    })?;
    info!("Archived import file to {}", target.display());
    Ok(target)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::infrastructure::database::testing::TempDatabase;
    use crate::infrastructure::database::SeaOrmReservationRepository;

    #[test]
    fn lowercase_headers() {
        let csv = "nombre,correo,telefono,fecha_llegada,fecha_salida,habitaciones,total\n\
                   Luis,luis@example.com,300,2025-10-01,2025-10-03,2,180.5\n";
        let rows = parse_import(csv.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![NewReservation {
                name: "Luis".into(),
                email: "luis@example.com".into(),
                phone: "300".into(),
                arrival_date: "2025-10-01".into(),
                departure_date: "2025-10-03".into(),
                room_count: 2,
                total_amount: 180.5,
            }]
        );
    }

    #[test]
    fn capitalized_headers_and_defaults() {
        let csv = "Nombre,Correo,FechaLlegada,Habitaciones\n\
                   \"Pérez, Juan\",juan@example.com,2025-10-01,\n";
        let rows = parse_import(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.name, "Pérez, Juan");
        assert_eq!(row.email, "juan@example.com");
        assert_eq!(row.phone, "");
        assert_eq!(row.arrival_date, "2025-10-01");
        assert_eq!(row.departure_date, "");
        assert_eq!(row.room_count, 1);
        assert_eq!(row.total_amount, 0.0);
    }

    #[test]
    fn empty_lowercase_value_falls_back_to_capitalized_column() {
        let csv = "nombre,Nombre,total\n,Rosa, 99.9 \n";
        let rows = parse_import(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "Rosa");
        assert_eq!(rows[0].total_amount, 99.9);
    }

    #[test]
    fn short_rows_are_tolerated() {
        let csv = "nombre,correo,habitaciones\nSolo\n";
        let rows = parse_import(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "Solo");
        assert_eq!(rows[0].email, "");
        assert_eq!(rows[0].room_count, 1);
    }

    #[test]
    fn bad_number_aborts_the_batch() {
        let csv = "nombre,habitaciones\nA,1\nB,two\nC,3\n";
        let err = parse_import(csv.as_bytes()).unwrap_err();
        match err {
            DomainError::Ingestion(msg) => assert!(msg.starts_with("line 3"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn archived_name_keeps_extension() {
        let at = NaiveDate::from_ymd_opt(2025, 11, 10)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let target = archived_path(Path::new("data/import_reservas.csv"), at);
        assert_eq!(
            target,
            PathBuf::from("data/import_reservas.imported-20251110_083000.csv")
        );
    }

    #[tokio::test]
    async fn absent_file_is_a_no_op() {
        let tmp = TempDatabase::new();
        let repo = SeaOrmReservationRepository::new(tmp.config.clone());
        repo.ensure_schema().await.unwrap();

        let outcome = ingest_external_file(&repo, Path::new("/nonexistent/import.csv"))
            .await
            .unwrap();
        assert_eq!(outcome, IngestOutcome::Absent);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn ingesting_twice_doubles_the_rows() {
        let tmp = TempDatabase::new();
        let repo = SeaOrmReservationRepository::new(tmp.config.clone());
        repo.ensure_schema().await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import_reservas.csv");
        std::fs::write(&path, "nombre,total\nUno,10\nDos,20\n").unwrap();

        for _ in 0..2 {
            let outcome = ingest_external_file(&repo, &path).await.unwrap();
            assert_eq!(outcome, IngestOutcome::Ingested { rows: 2 });
        }

        assert!(path.exists());
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn malformed_file_inserts_nothing() {
        let tmp = TempDatabase::new();
        let repo = SeaOrmReservationRepository::new(tmp.config.clone());
        repo.ensure_schema().await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import_reservas.csv");
        std::fs::write(&path, "nombre,total\nUno,10\nDos,abc\n").unwrap();

        let err = ingest_external_file(&repo, &path).await.unwrap_err();
        assert!(matches!(err, DomainError::Ingestion(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn archive_moves_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import_reservas.csv");
        std::fs::write(&path, "nombre\nX\n").unwrap();

        let at = NaiveDate::from_ymd_opt(2026, 1, 8)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let target = archive_import_file(&path, at).await.unwrap();
        assert!(!path.exists());
        assert!(target.exists());
    }
}
