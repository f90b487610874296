use crate::domain::model::Participant;
use crate::utils::error::{Result, SantaError};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

/// 從 CSV 名單載入參與者（需有 name、email 欄位，其餘欄位忽略）
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<Participant>> {
    let file = std::fs::File::open(&path)?;
    let participants = read_roster(file)?;
    tracing::debug!(
        "Loaded {} participants from {}",
        participants.len(),
        path.as_ref().display()
    );
    Ok(participants)
}

pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Participant>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in ["name", "email"] {
        if !headers.iter().any(|h| h.eq_ignore_ascii_case(required)) {
            return Err(SantaError::ConfigValidationError {
                field: "roster".to_string(),
                message: format!("CSV header is missing the '{}' column", required),
            });
        }
    }
    let normalized: csv::StringRecord = headers.iter().map(|h| h.to_lowercase()).collect();
    csv_reader.set_headers(normalized);

    let mut participants = Vec::new();
    for row in csv_reader.deserialize::<RosterRow>() {
        let row = row?;
        // 整列空白視為分隔用，略過
        if row.name.is_empty() && row.email.is_empty() {
            continue;
        }
        participants.push(Participant::new(row.name, row.email));
    }

    Ok(participants)
}
