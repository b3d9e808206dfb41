use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{require_text, NewsStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub status: NewsStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsCreate {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub status: Option<NewsStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub status: Option<NewsStatus>,
}

impl NewsCreate {
    pub fn validate(&self) -> Result<(), String> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)?;
        Ok(())
    }

    pub fn status_or_default(&self) -> NewsStatus {
        self.status.unwrap_or_default()
    }
}

impl NewsUpdate {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                title: None,
                content: None,
                image: None,
                video: None,
                status: None,
            }
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("No fields provided".into());
        }

        if let Some(title) = &self.title {
            require_text("title", title)?;
        }

        if let Some(content) = &self.content {
            require_text("content", content)?;
        }

        Ok(())
    }
}
