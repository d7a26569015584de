//! Postal-code coverage administration: which codes a tenant services,
//! with region-level bulk selection and a register loaded from the Swedish
//! postal-code export.

pub mod domain;
pub mod register;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    CoverageLevel, PostalCode, PostalCodeId, Region, RegionId, RegionSelection, RegionStatus,
    Toggle,
};
pub use register::{PostalCodeRegister, RegisterError};
pub use repository::{CoverageStore, CoverageStoreError};
pub use router::{coverage_router, CoverageState};
pub use service::CoverageService;
