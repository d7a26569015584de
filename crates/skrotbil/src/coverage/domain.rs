use serde::{Deserialize, Serialize};

/// Identifier wrapper for a postal code; the id is the normalized five-digit
/// code itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostalCodeId(pub String);

/// Identifier wrapper for a region (län) in the postal register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub String);

/// One row of the postal register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalCode {
    pub id: PostalCodeId,
    pub code: String,
    pub locality: String,
}

/// A region and the postal codes it contains, as grouped by the register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub postal_codes: Vec<PostalCodeId>,
}

/// Outcome of a single-code toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    Added,
    Removed,
}

/// Outcome of a region-wide selection. `added == 0` with `already_complete`
/// set means the region was fully selected before the call; the caller
/// surfaces a notification instead of writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSelection {
    pub added: usize,
    pub already_complete: bool,
}

/// Selected-versus-total counts for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStatus {
    pub selected: usize,
    pub total: usize,
}

impl RegionStatus {
    pub fn level(self) -> CoverageLevel {
        if self.total > 0 && self.selected == self.total {
            CoverageLevel::Full
        } else if self.selected > 0 {
            CoverageLevel::Partial
        } else {
            CoverageLevel::None
        }
    }
}

/// Derived selection level for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageLevel {
    None,
    Partial,
    Full,
}

impl CoverageLevel {
    pub const fn label(self) -> &'static str {
        match self {
            CoverageLevel::None => "none",
            CoverageLevel::Partial => "partial",
            CoverageLevel::Full => "full",
        }
    }
}
