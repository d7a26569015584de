//! Domain library for the Skrotbil operations platform.
//!
//! Tenants are independent scrapyard businesses sharing the service. The
//! library owns the pricing engine (distance rules, bonus offers, tenant
//! pricing dials), postal-code coverage administration, the pickup dispatch
//! status machine, and SMS template rendering. Persistence is abstracted
//! behind per-module repository traits so the logic can be exercised in
//! isolation; `services/api` supplies the deployable wiring.

pub mod config;
pub mod coverage;
pub mod dispatch;
pub mod error;
pub mod messaging;
pub mod pricing;
pub mod telemetry;
pub mod tenant;
