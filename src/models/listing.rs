use serde::{Deserialize, Serialize};

use super::NewsStatus;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 5;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[serde(alias = "asc")]
    Asc,
    #[default]
    #[serde(alias = "desc")]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Columns a news listing may be ordered by.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum NewsSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Status,
}

impl NewsSortField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
            Self::Status => "status",
        }
    }
}

impl std::str::FromStr for NewsSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "updatedAt" | "updated_at" => Ok(Self::UpdatedAt),
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            _ => Err(format!("news cannot be sorted by '{}'", s)),
        }
    }
}

/// Columns a product listing may be ordered by.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum ProductSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}

impl ProductSortField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
        }
    }
}

impl std::str::FromStr for ProductSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "updatedAt" | "updated_at" => Ok(Self::UpdatedAt),
            "title" => Ok(Self::Title),
            _ => Err(format!("products cannot be sorted by '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn resolve(
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Self, String> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if page < 1 {
            return Err("Pagination 'page' must be at least 1".into());
        }

        if limit < 1 {
            return Err("Pagination 'limit' must be at least 1".into());
        }

        Ok(Self { page, limit })
    }

    /// Rows skipped before the page starts, `None` on overflow.
    pub fn offset(&self) -> Option<i64> {
        (self.page - 1).checked_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsFilter {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
    pub status: Option<NewsStatus>,
}

impl NewsFilter {
    pub fn pagination(&self) -> Result<Pagination, String> {
        Pagination::resolve(self.page, self.limit)
    }

    pub fn sort_field(&self) -> Result<NewsSortField, String> {
        match self.sort.as_deref() {
            Some(sort) => sort.parse(),
            None => Ok(NewsSortField::default()),
        }
    }

    pub fn direction(&self) -> SortDirection {
        self.direction.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
}

impl ProductFilter {
    pub fn pagination(&self) -> Result<Pagination, String> {
        Pagination::resolve(self.page, self.limit)
    }

    pub fn sort_field(&self) -> Result<ProductSortField, String> {
        match self.sort.as_deref() {
            Some(sort) => sort.parse(),
            None => Ok(ProductSortField::default()),
        }
    }

    pub fn direction(&self) -> SortDirection {
        self.direction.unwrap_or_default()
    }
}

/// One page of a listing plus the size of the whole matched set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    pub list: Vec<T>,
    pub total_count: i64,
}

impl<T> ListPage<T> {
    pub fn empty() -> Self {
        Self {
            list: Vec::new(),
            total_count: 0,
        }
    }
}
