use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{Postgres, QueryBuilder, Row};

use serde::de::DeserializeOwned;

use crate::models::{ListPage, Pagination, SortDirection};

/// Ordering applied to the matched set. `column` must come from a
/// whitelisted sort field, it is spliced into the statement verbatim.
#[derive(Debug, Clone, Copy)]
pub struct Ordering {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl Ordering {
    fn push_to(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        let dir = self.direction.as_sql();
        builder.push(format!("{} {}, id {}", self.column, dir, dir));
    }
}

/// Builds the single statement behind every listing:
///
/// ```sql
/// WITH matched AS (SELECT <projection> FROM <table> WHERE <predicate>),
///      page AS (SELECT * FROM matched ORDER BY .. LIMIT .. OFFSET ..)
/// SELECT (SELECT COUNT(*) FROM matched) AS total_count,
///        COALESCE((SELECT json_agg(page ORDER BY ..) FROM page), '[]') AS list
/// ```
///
/// The count and the page are two branches over the same CTE, so they
/// share a snapshot.
pub fn build_list_query<'args, P>(
    table: &'static str,
    projection: &'static str,
    push_predicate: P,
    ordering: Ordering,
    pagination: Pagination,
    offset: i64,
) -> QueryBuilder<'args, Postgres>
where
    P: FnOnce(&mut QueryBuilder<'args, Postgres>),
{
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("WITH matched AS (SELECT ");
    builder.push(projection);
    builder.push(" FROM ");
    builder.push(table);
    builder.push(" WHERE ");
    push_predicate(&mut builder);

    builder.push("), page AS (SELECT * FROM matched ORDER BY ");
    ordering.push_to(&mut builder);
    builder.push(" LIMIT ").push_bind(pagination.limit);
    builder.push(" OFFSET ").push_bind(offset);

    builder.push(
        ") SELECT (SELECT COUNT(*) FROM matched) AS total_count, \
         COALESCE((SELECT json_agg(page ORDER BY ",
    );
    ordering.push_to(&mut builder);
    builder.push(") FROM page), '[]'::json) AS list");

    builder
}

pub fn decode_list_page<T>(row: &PgRow) -> Result<ListPage<T>, sqlx::Error>
where
    T: DeserializeOwned,
{
    let total_count: i64 = row.try_get("total_count")?;
    let Json(list): Json<Vec<T>> = row.try_get("list")?;

    Ok(ListPage { list, total_count })
}
