#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RecordKind {
    News,
    Product,
    Inquiry,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "News",
            Self::Product => "Product",
            Self::Inquiry => "Inquiry",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
