use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::CustomerProfile;

#[derive(Debug, thiserror::Error)]
pub enum ProfileImportError {
    #[error("failed to read profile export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid profile CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("profile export is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("{}: unreadable row ({reason})", row_label(.row, .customer_id))]
    Row {
        row: usize,
        customer_id: Option<String>,
        reason: String,
    },
}

/// Outcome of importing a single CSV row.
pub type ImportedRow = Result<ImportedProfile, ProfileImportError>;

/// One CSV row turned into a profile, labelled for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedProfile {
    pub row: usize,
    pub customer_id: Option<String>,
    pub profile: CustomerProfile,
}

impl ImportedProfile {
    pub fn display_id(&self) -> String {
        row_label(&self.row, &self.customer_id)
    }
}

fn row_label(row: &usize, customer_id: &Option<String>) -> String {
    customer_id
        .clone()
        .unwrap_or_else(|| format!("row {row}"))
}

const REQUIRED_COLUMNS: [&str; 5] = [
    "tenure",
    "MonthlyCharges",
    "PaperlessBilling",
    "Contract",
    "InternetService",
];

/// Reads exports laid out like the Telco customer dataset. Unused columns are ignored.
///
/// A missing header or required column fails the whole import; a row that cannot be
/// read is returned as [`ProfileImportError::Row`] next to the rows that could.
pub struct ProfileImporter;

impl ProfileImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ImportedRow>, ProfileImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ImportedRow>, ProfileImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|header| header == **column))
        {
            return Err(ProfileImportError::MissingColumn(*missing));
        }
        let id_column = headers.iter().position(|header| header == "customerID");

        let mut rows = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let row = index + 1;
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    rows.push(Err(ProfileImportError::Row {
                        row,
                        customer_id: None,
                        reason: err.to_string(),
                    }));
                    continue;
                }
            };

            let customer_id = id_column
                .and_then(|column| record.get(column))
                .filter(|value| !value.is_empty())
                .map(str::to_string);

            let parsed = record
                .deserialize::<ProfileRow>(Some(&headers))
                .map(|fields| ImportedProfile {
                    row,
                    customer_id: customer_id.clone(),
                    profile: CustomerProfile {
                        tenure_months: fields.tenure,
                        monthly_charges: fields.monthly_charges,
                        total_charges: fields.total_charges.unwrap_or(0.0),
                        paperless_billing: fields.paperless_billing,
                        contract_type: fields.contract,
                        internet_service: fields.internet_service,
                    },
                })
                .map_err(|err| ProfileImportError::Row {
                    row,
                    customer_id,
                    reason: err.to_string(),
                });
            rows.push(parsed);
        }

        Ok(rows)
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    tenure: i64,
    #[serde(rename = "MonthlyCharges")]
    monthly_charges: f64,
    // The public dataset leaves this blank for brand-new subscribers.
    #[serde(rename = "TotalCharges", default, deserialize_with = "blank_as_none")]
    total_charges: Option<f64>,
    #[serde(rename = "PaperlessBilling")]
    paperless_billing: String,
    #[serde(rename = "Contract")]
    contract: String,
    #[serde(rename = "InternetService")]
    internet_service: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
