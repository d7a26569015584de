use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use super::domain::{PostalCode, PostalCodeId, Region, RegionId};

/// In-memory view of the national postal register, grouped by region so the
/// coverage endpoints can answer bulk-selection calls without re-parsing.
#[derive(Debug, Clone, Default)]
pub struct PostalCodeRegister {
    regions: BTreeMap<RegionId, Region>,
    codes: BTreeMap<PostalCodeId, PostalCode>,
}

/// Errors raised while loading the register export.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("failed to read postal register: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed postal code '{raw}' on row {row}")]
    MalformedCode { raw: String, row: usize },
}

#[derive(Debug, Deserialize)]
struct RegisterRow {
    #[serde(rename = "Postnummer")]
    postal_code: String,
    #[serde(rename = "Postort")]
    locality: String,
    #[serde(rename = "Län")]
    region: String,
}

impl PostalCodeRegister {
    /// Parse a register export. Codes are normalized to five digits
    /// (`"123 45"` becomes `"12345"`); anything else is rejected.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegisterError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut register = Self::default();
        for (index, record) in csv_reader.deserialize::<RegisterRow>().enumerate() {
            let row = record?;
            let code = normalize_code(&row.postal_code).ok_or(RegisterError::MalformedCode {
                raw: row.postal_code.clone(),
                // header is row 1 in the export
                row: index + 2,
            })?;

            let code_id = PostalCodeId(code.clone());
            register.codes.insert(
                code_id.clone(),
                PostalCode {
                    id: code_id.clone(),
                    code,
                    locality: row.locality,
                },
            );

            let region_id = region_slug(&row.region);
            let region = register
                .regions
                .entry(region_id.clone())
                .or_insert_with(|| Region {
                    id: region_id,
                    name: row.region.clone(),
                    postal_codes: Vec::new(),
                });
            if !region.postal_codes.contains(&code_id) {
                region.postal_codes.push(code_id);
            }
        }

        Ok(register)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn postal_code(&self, id: &PostalCodeId) -> Option<&PostalCode> {
        self.codes.get(id)
    }

    pub fn code_count(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Strip interior whitespace and require exactly five ASCII digits.
fn normalize_code(raw: &str) -> Option<String> {
    let compact: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    if compact.len() == 5 && compact.chars().all(|ch| ch.is_ascii_digit()) {
        Some(compact)
    } else {
        None
    }
}

/// Stable id derived from the region name ("Skåne län" -> "skåne-län").
fn region_slug(name: &str) -> RegionId {
    let slug: String = name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    RegionId(slug)
}
