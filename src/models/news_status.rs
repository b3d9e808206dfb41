use serde::{Deserialize, Serialize};

/// Visibility state of a news record.
///
/// `Delete` hides the record from default listings; the row stays in
/// storage until it is purged.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum NewsStatus {
    Active,
    #[default]
    Pause,
    Delete,
}

impl NewsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Pause => "PAUSE",
            Self::Delete => "DELETE",
        }
    }

    /// Only soft-deleted records may be purged from storage.
    pub fn is_purgeable(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

impl std::fmt::Display for NewsStatus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
