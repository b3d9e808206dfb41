mod common;

#[cfg(test)]
pub mod product_tests {
    use sqlx::PgPool;

    use super::common::*;
    use newsdesk::common::ContentError;
    use newsdesk::db::Database;
    use newsdesk::models::*;

    fn product_ids(page: &ListPage<Product>) -> Vec<uuid::Uuid> {
        ids(&page.list, |p| p.id)
    }

    #[sqlx::test(fixtures("products"))]
    async fn list_products(pool: PgPool) {
        let db = Database::from_pool(pool);

        let page = db.list_products(&ProductFilter::default()).await.unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(
            product_ids(&page),
            vec![PRODUCT_DESK, PRODUCT_CHAIR, PRODUCT_LAMP]
        );
        assert_eq!(page.list[1], get_seed_product_chair());
    }

    #[sqlx::test(fixtures("products"))]
    async fn list_products_paged_by_title(pool: PgPool) {
        let db = Database::from_pool(pool);

        let filter = ProductFilter {
            page: Some(2),
            limit: Some(2),
            sort: Some("title".into()),
            direction: Some(SortDirection::Asc),
        };

        let page = db.list_products(&filter).await.unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(product_ids(&page), vec![PRODUCT_DESK]);
    }

    #[sqlx::test(fixtures("products"))]
    async fn list_products_rejects_status_sort(pool: PgPool) {
        let db = Database::from_pool(pool);

        let result = db
            .list_products(&ProductFilter {
                sort: Some("status".into()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(ContentError::Validation(_))));
    }

    #[sqlx::test(fixtures("products"))]
    async fn get_product(pool: PgPool) {
        let db = Database::from_pool(pool);

        assert_eq!(
            db.get_product(PRODUCT_CHAIR).await.unwrap(),
            get_seed_product_chair()
        );

        let missing = db.get_product(PRODUCT_NONEXISTING).await;
        assert!(matches!(missing, Err(ContentError::NotFound { .. })));
    }

    #[sqlx::test(fixtures("products"))]
    async fn create_product(pool: PgPool) {
        let db = Database::from_pool(pool);

        let product = db
            .create_product(&ProductCreate {
                title: " Monitor Arm ".into(),
                description: "Dual mount".into(),
                image: None,
            })
            .await
            .unwrap();
        assert_eq!(product.title, "Monitor Arm");
        assert_eq!(db.get_product(product.id).await.unwrap(), product);

        let duplicate = db
            .create_product(&ProductCreate {
                title: "Desk Lamp".into(),
                description: "Again".into(),
                image: None,
            })
            .await;
        assert!(matches!(
            duplicate,
            Err(ContentError::Conflict { ref title, .. }) if title == "Desk Lamp"
        ));

        let blank = db
            .create_product(&ProductCreate {
                title: "Footrest".into(),
                description: " ".into(),
                image: None,
            })
            .await;
        assert!(matches!(blank, Err(ContentError::Validation(_))));
    }

    #[sqlx::test(fixtures("products"))]
    async fn update_product(pool: PgPool) {
        let db = Database::from_pool(pool);
        let before = get_seed_product_chair();

        let updated = db
            .update_product(
                PRODUCT_CHAIR,
                &ProductUpdate {
                    image: Some("/uploads/products/2-chair.png".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, before.title);
        assert_eq!(updated.image.as_deref(), Some("/uploads/products/2-chair.png"));
        assert!(updated.updated_at > before.updated_at);

        let taken = db
            .update_product(
                PRODUCT_CHAIR,
                &ProductUpdate {
                    title: Some("Desk Lamp".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(taken, Err(ContentError::Conflict { .. })));

        let missing = db
            .update_product(
                PRODUCT_NONEXISTING,
                &ProductUpdate {
                    title: Some("Ghost".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(missing, Err(ContentError::NotFound { .. })));

        let empty = db
            .update_product(PRODUCT_CHAIR, &ProductUpdate::default())
            .await;
        assert!(matches!(empty, Err(ContentError::Validation(_))));
    }

    #[sqlx::test(fixtures("products"))]
    async fn remove_product(pool: PgPool) {
        let db = Database::from_pool(pool);

        assert_eq!(db.remove_product(PRODUCT_LAMP).await.unwrap(), PRODUCT_LAMP);

        let page = db.list_products(&ProductFilter::default()).await.unwrap();
        assert_eq!(page.total_count, 2);

        let again = db.remove_product(PRODUCT_LAMP).await;
        assert!(matches!(again, Err(ContentError::NotFound { .. })));
    }
}
