use sqlx::{FromRow, Postgres, QueryBuilder};
use uuid::Uuid;

use super::listing::{build_list_query, decode_list_page, Ordering};
use super::Database;
use crate::common::{is_unique_violation, ContentError};
use crate::log_err;
use crate::models::{
    ListPage, News, NewsCreate, NewsFilter, NewsStatus, NewsUpdate, RecordKind,
};

/// Every read of `news` goes through this projection so rows written
/// before `status` existed surface as ACTIVE.
const NEWS_COLUMNS: &str = "id, title, content, image, video, \
     COALESCE(status, 'ACTIVE') AS status, created_at, updated_at";

#[derive(Debug, FromRow)]
struct RemovalOutcome {
    status: NewsStatus,
    removed: bool,
}

/// Match/sort/paginate statement for a news listing.
///
/// Without a status filter every record that is not soft-deleted
/// matches, legacy rows included. With one, the (backfilled) status must
/// equal it exactly, which is how deleted records are browsed.
pub fn build_news_list_query(
    filter: &NewsFilter,
) -> Result<QueryBuilder<'static, Postgres>, ContentError> {
    let pagination = filter.pagination().map_err(ContentError::Validation)?;
    let offset = pagination
        .offset()
        .ok_or_else(|| ContentError::Validation("Pagination offset is too large".into()))?;
    let sort = filter.sort_field().map_err(ContentError::Validation)?;
    let status = filter.status;

    let ordering = Ordering {
        column: sort.column(),
        direction: filter.direction(),
    };

    Ok(build_list_query(
        "news",
        NEWS_COLUMNS,
        move |builder| match status {
            Some(status) => {
                builder
                    .push("COALESCE(status, 'ACTIVE') = ")
                    .push_bind(status.as_str());
            }
            None => {
                builder.push("status IS DISTINCT FROM 'DELETE'");
            }
        },
        ordering,
        pagination,
        offset,
    ))
}

impl Database {
    pub async fn list_news(
        &self,
        filter: &NewsFilter,
    ) -> Result<ListPage<News>, ContentError> {
        let mut query = build_news_list_query(filter)?;

        let row = query.build().fetch_one(&self.pool).await?;

        Ok(decode_list_page(&row)?)
    }

    pub async fn get_news(&self, id: Uuid) -> Result<News, ContentError> {
        let news = sqlx::query_as::<_, News>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        news.ok_or_else(|| ContentError::not_found(RecordKind::News, id))
    }

    pub async fn create_news(
        &self,
        data: &NewsCreate,
    ) -> Result<News, ContentError> {
        data.validate().map_err(ContentError::Validation)?;

        let title = data.title.trim();

        let result = sqlx::query_as::<_, News>(&format!(
            r#"
            INSERT INTO news (title, content, image, video, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {NEWS_COLUMNS}
            "#
        ))
        .bind(title)
        .bind(data.content.trim())
        .bind(data.image.as_deref())
        .bind(data.video.as_deref())
        .bind(data.status_or_default().as_str())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(news) => {
                log::info!("Created news {} '{}'", news.id, news.title);
                Ok(news)
            }

            Err(e) if is_unique_violation(&e) => {
                Err(ContentError::conflict(RecordKind::News, title))
            }

            Err(e) => {
                log_err!(data, &e);
                Err(ContentError::Database(e))
            }
        }
    }

    /// Applies the provided fields. Any status may be set, including
    /// DELETE; purging is a separate step, see [`Database::remove_news`].
    pub async fn update_news(
        &self,
        id: Uuid,
        data: &NewsUpdate,
    ) -> Result<News, ContentError> {
        data.validate().map_err(ContentError::Validation)?;

        let title = data.title.as_deref().map(str::trim);

        let result = sqlx::query_as::<_, News>(&format!(
            r#"
            UPDATE news
            SET
                title = COALESCE($1, title),
                content = COALESCE($2, content),
                image = COALESCE($3, image),
                video = COALESCE($4, video),
                status = COALESCE($5, status),
                updated_at = now()
            WHERE id = $6
            RETURNING {NEWS_COLUMNS}
            "#
        ))
        .bind(title)
        .bind(data.content.as_deref().map(str::trim))
        .bind(data.image.as_deref())
        .bind(data.video.as_deref())
        .bind(data.status.as_ref().map(NewsStatus::as_str))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(news)) => {
                log::info!("Updated news {} (status {})", news.id, news.status);
                Ok(news)
            }

            Ok(None) => Err(ContentError::not_found(RecordKind::News, id)),

            // Either the new title collides, or a soft-deleted record was
            // revived while another visible record holds its title.
            Err(e) if is_unique_violation(&e) => {
                let title = match title {
                    Some(title) => title.to_string(),
                    None => self.get_news(id).await?.title,
                };
                Err(ContentError::conflict(RecordKind::News, title))
            }

            Err(e) => {
                log_err!(data, &e);
                Err(ContentError::Database(e))
            }
        }
    }

    /// Purges a soft-deleted record. The status check and the delete run
    /// as one statement, so a concurrent revival cannot be purged.
    pub async fn remove_news(&self, id: Uuid) -> Result<Uuid, ContentError> {
        let outcome = sqlx::query_as::<_, RemovalOutcome>(
            r#"
            WITH removed AS (
                DELETE FROM news
                WHERE id = $1 AND status = 'DELETE'
                RETURNING id
            )
            SELECT
                COALESCE(n.status, 'ACTIVE') AS status,
                EXISTS(SELECT 1 FROM removed) AS removed
            FROM news n
            WHERE n.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match outcome {
            Some(RemovalOutcome { removed: true, .. }) => {
                log::info!("Purged news {}", id);
                Ok(id)
            }

            Some(RemovalOutcome { status, .. }) if !status.is_purgeable() => {
                Err(ContentError::PolicyViolation(format!(
                    "Only news with DELETE status can be removed (current status: {}). \
                     Please change status to DELETE first.",
                    status
                )))
            }

            // Status flipped to DELETE after the delete's snapshot was taken.
            Some(_) => Err(ContentError::PolicyViolation(
                "News status changed during removal, retry".into(),
            )),

            None => Err(ContentError::not_found(RecordKind::News, id)),
        }
    }
}
