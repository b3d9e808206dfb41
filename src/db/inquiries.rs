use uuid::Uuid;

use super::Database;
use crate::common::ContentError;
use crate::log_err;
use crate::models::{Inquiry, InquiryCreate, RecordKind};

impl Database {
    pub async fn create_inquiry(
        &self,
        data: &InquiryCreate,
    ) -> Result<Inquiry, ContentError> {
        data.validate().map_err(ContentError::Validation)?;

        let result = sqlx::query_as::<_, Inquiry>(
            r#"
            INSERT INTO inquiries (name, email, phone, detail, agreed)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(data.email.trim())
        .bind(data.phone.trim())
        .bind(data.detail.as_deref().map(str::trim))
        .bind(data.agreed)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(inquiry) => {
                log::info!(
                    "New inquiry {} from {} <{}>",
                    inquiry.id,
                    inquiry.name,
                    inquiry.email
                );
                Ok(inquiry)
            }

            Err(e) => {
                log_err!(data, &e);
                Err(ContentError::Database(e))
            }
        }
    }

    pub async fn list_inquiries(&self) -> Result<Vec<Inquiry>, ContentError> {
        let inquiries = sqlx::query_as::<_, Inquiry>(
            r#"
            SELECT *
            FROM inquiries
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(inquiries)
    }

    pub async fn get_inquiry(&self, id: Uuid) -> Result<Inquiry, ContentError> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            r#"
            SELECT *
            FROM inquiries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        inquiry.ok_or_else(|| ContentError::not_found(RecordKind::Inquiry, id))
    }
}
