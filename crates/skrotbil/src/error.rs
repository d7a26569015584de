use crate::config::ConfigError;
use crate::coverage::register::RegisterError;
use crate::coverage::repository::CoverageStoreError;
use crate::dispatch::service::DispatchError;
use crate::messaging::gateway::SmsError;
use crate::messaging::templates::TemplateError;
use crate::pricing::service::PricingServiceError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Register(RegisterError),
    Pricing(PricingServiceError),
    Coverage(CoverageStoreError),
    Dispatch(DispatchError),
    Template(TemplateError),
    Sms(SmsError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Register(err) => write!(f, "postal register error: {}", err),
            AppError::Pricing(err) => write!(f, "pricing error: {}", err),
            AppError::Coverage(err) => write!(f, "coverage error: {}", err),
            AppError::Dispatch(err) => write!(f, "dispatch error: {}", err),
            AppError::Template(err) => write!(f, "template error: {}", err),
            AppError::Sms(err) => write!(f, "sms error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Register(err) => Some(err),
            AppError::Pricing(err) => Some(err),
            AppError::Coverage(err) => Some(err),
            AppError::Dispatch(err) => Some(err),
            AppError::Template(err) => Some(err),
            AppError::Sms(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Register(_)
            | AppError::Pricing(_)
            | AppError::Dispatch(_)
            | AppError::Template(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Coverage(_)
            | AppError::Sms(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RegisterError> for AppError {
    fn from(value: RegisterError) -> Self {
        Self::Register(value)
    }
}

impl From<PricingServiceError> for AppError {
    fn from(value: PricingServiceError) -> Self {
        Self::Pricing(value)
    }
}

impl From<CoverageStoreError> for AppError {
    fn from(value: CoverageStoreError) -> Self {
        Self::Coverage(value)
    }
}

impl From<DispatchError> for AppError {
    fn from(value: DispatchError) -> Self {
        Self::Dispatch(value)
    }
}

impl From<TemplateError> for AppError {
    fn from(value: TemplateError) -> Self {
        Self::Template(value)
    }
}

impl From<SmsError> for AppError {
    fn from(value: SmsError) -> Self {
        Self::Sms(value)
    }
}
