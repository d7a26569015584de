use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// SMS template with `{{placeholder}}` variables, configured per tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsTemplate {
    pub key: String,
    pub body: String,
}

/// Rendering failures: every placeholder needs a binding, and every opening
/// brace pair needs a closing one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("missing value for placeholder '{name}'")]
    MissingVariable { name: String },
    #[error("unterminated placeholder at byte {at}")]
    Unterminated { at: usize },
}

impl SmsTemplate {
    pub fn new(key: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
        }
    }

    /// Substitute every `{{name}}` with its binding. Extra bindings are
    /// ignored; a placeholder without a binding aborts the render.
    pub fn render(&self, vars: &BTreeMap<String, String>) -> Result<String, TemplateError> {
        let mut rendered = String::with_capacity(self.body.len());
        let mut rest = self.body.as_str();

        while let Some(open) = rest.find("{{") {
            rendered.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];
            let close = after_open
                .find("}}")
                .ok_or(TemplateError::Unterminated {
                    at: self.body.len() - rest.len() + open,
                })?;

            let name = after_open[..close].trim();
            let value = vars
                .get(name)
                .ok_or_else(|| TemplateError::MissingVariable {
                    name: name.to_string(),
                })?;
            rendered.push_str(value);

            rest = &after_open[close + 2..];
        }

        rendered.push_str(rest);
        Ok(rendered)
    }

    /// Templates provisioned for a new tenant, covering the pickup
    /// lifecycle notifications the operators send most.
    pub fn standard_set() -> Vec<SmsTemplate> {
        vec![
            SmsTemplate::new(
                "pickup_scheduled",
                "Hej {{name}}! Vi hämtar din bil {{registration}} den {{date}}. Hälsningar {{yard}}.",
            ),
            SmsTemplate::new(
                "driver_on_the_way",
                "Hej {{name}}! Vår chaufför är på väg till {{address}} för att hämta {{registration}}.",
            ),
            SmsTemplate::new(
                "pickup_completed",
                "Tack {{name}}! {{registration}} är nu mottagen. Ersättningen på {{amount}} kr betalas ut inom några dagar.",
            ),
        ]
    }
}
