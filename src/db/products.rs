use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::listing::{build_list_query, decode_list_page, Ordering};
use super::Database;
use crate::common::{is_unique_violation, ContentError};
use crate::log_err;
use crate::models::{
    ListPage, Product, ProductCreate, ProductFilter, ProductUpdate, RecordKind,
};

const PRODUCT_COLUMNS: &str =
    "id, title, description, image, created_at, updated_at";

/// Products carry no status, every row matches.
pub fn build_product_list_query(
    filter: &ProductFilter,
) -> Result<QueryBuilder<'static, Postgres>, ContentError> {
    let pagination = filter.pagination().map_err(ContentError::Validation)?;
    let offset = pagination
        .offset()
        .ok_or_else(|| ContentError::Validation("Pagination offset is too large".into()))?;
    let sort = filter.sort_field().map_err(ContentError::Validation)?;

    let ordering = Ordering {
        column: sort.column(),
        direction: filter.direction(),
    };

    Ok(build_list_query(
        "products",
        PRODUCT_COLUMNS,
        |builder| {
            builder.push("TRUE");
        },
        ordering,
        pagination,
        offset,
    ))
}

impl Database {
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<ListPage<Product>, ContentError> {
        let mut query = build_product_list_query(filter)?;

        let row = query.build().fetch_one(&self.pool).await?;

        Ok(decode_list_page(&row)?)
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, ContentError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| ContentError::not_found(RecordKind::Product, id))
    }

    pub async fn create_product(
        &self,
        data: &ProductCreate,
    ) -> Result<Product, ContentError> {
        data.validate().map_err(ContentError::Validation)?;

        let title = data.title.trim();

        let result = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (title, description, image)
            VALUES ($1, $2, $3)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(title)
        .bind(data.description.trim())
        .bind(data.image.as_deref())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(product) => {
                log::info!("Created product {} '{}'", product.id, product.title);
                Ok(product)
            }

            Err(e) if is_unique_violation(&e) => {
                Err(ContentError::conflict(RecordKind::Product, title))
            }

            Err(e) => {
                log_err!(data, &e);
                Err(ContentError::Database(e))
            }
        }
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        data: &ProductUpdate,
    ) -> Result<Product, ContentError> {
        data.validate().map_err(ContentError::Validation)?;

        let title = data.title.as_deref().map(str::trim);

        let result = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                image = COALESCE($3, image),
                updated_at = now()
            WHERE id = $4
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(title)
        .bind(data.description.as_deref().map(str::trim))
        .bind(data.image.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(product)) => {
                log::info!("Updated product {}", product.id);
                Ok(product)
            }

            Ok(None) => Err(ContentError::not_found(RecordKind::Product, id)),

            Err(e) if is_unique_violation(&e) => Err(ContentError::conflict(
                RecordKind::Product,
                title.unwrap_or_default(),
            )),

            Err(e) => {
                log_err!(data, &e);
                Err(ContentError::Database(e))
            }
        }
    }

    /// Products have no soft-delete state; removal is immediate.
    pub async fn remove_product(&self, id: Uuid) -> Result<Uuid, ContentError> {
        let removed = sqlx::query_scalar::<_, Uuid>(
            r#"
            DELETE FROM products
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match removed {
            Some(id) => {
                log::info!("Removed product {}", id);
                Ok(id)
            }
            None => Err(ContentError::not_found(RecordKind::Product, id)),
        }
    }
}
