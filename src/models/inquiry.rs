use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::require_text;

/// A contact request submitted from the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Inquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub detail: Option<String>,
    pub agreed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InquiryCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub detail: Option<String>,
    pub agreed: bool,
}

impl InquiryCreate {
    pub fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)?;
        require_text("phone", &self.phone)?;

        if !validate_email(&self.email) {
            return Err(format!("'{}' is not a valid email", self.email));
        }

        if !self.agreed {
            return Err("Terms must be agreed to".into());
        }

        Ok(())
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
pub fn validate_email(email: &str) -> bool {
    let email = email.trim();

    if email.is_empty() || email.len() > 254 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.is_empty() {
        return false;
    }

    if domain.contains('@') || !domain.contains('.') {
        return false;
    }

    !domain.starts_with('.') && !domain.ends_with('.')
}
