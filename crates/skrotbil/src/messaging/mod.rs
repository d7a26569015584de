//! Customer SMS templating. Templates carry `{{placeholder}}` variables and
//! render against a binding map; actual delivery goes through the
//! [`SmsGateway`] trait so provider adapters stay outside this crate.

pub mod gateway;
pub mod templates;

pub use gateway::{SmsError, SmsGateway, SmsMessage};
pub use templates::{SmsTemplate, TemplateError};
