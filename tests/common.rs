use chrono::{DateTime, Utc};
use uuid::Uuid;

use newsdesk::models::*;

pub const NEWS_ALPHA: Uuid = Uuid::from_u128(0xa1);
pub const NEWS_BRAVO: Uuid = Uuid::from_u128(0xa2);
pub const NEWS_CHARLIE: Uuid = Uuid::from_u128(0xa3);
pub const NEWS_PAUSED: Uuid = Uuid::from_u128(0xa4);
pub const NEWS_RETIRED: Uuid = Uuid::from_u128(0xa5);
pub const NEWS_LEGACY: Uuid = Uuid::from_u128(0xa6);
pub const NEWS_NONEXISTING: Uuid = Uuid::from_u128(0xaf);

pub const PRODUCT_LAMP: Uuid = Uuid::from_u128(0xb1);
pub const PRODUCT_CHAIR: Uuid = Uuid::from_u128(0xb2);
pub const PRODUCT_DESK: Uuid = Uuid::from_u128(0xb3);
pub const PRODUCT_NONEXISTING: Uuid = Uuid::from_u128(0xbf);

pub const INQUIRY_DANA: Uuid = Uuid::from_u128(0xc1);
pub const INQUIRY_ELI: Uuid = Uuid::from_u128(0xc2);

pub const ADMIN_TOKEN: &str = "test-admin-token";

const SQL_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S%#z";

pub fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_str(s, SQL_TIME_FMT)
        .expect("Invalid time format in test helper")
        .with_timezone(&Utc)
}

pub fn get_seed_news_alpha() -> News {
    News {
        id: NEWS_ALPHA,
        title: "Alpha".to_string(),
        content: "Alpha body".to_string(),
        image: Some("/uploads/news/1767261600000-alpha.png".to_string()),
        video: None,
        status: NewsStatus::Active,
        created_at: parse_time("2026-01-01 10:00:00+00"),
        updated_at: parse_time("2026-01-01 10:00:00+00"),
    }
}

pub fn get_seed_news_legacy() -> News {
    News {
        id: NEWS_LEGACY,
        title: "Legacy".to_string(),
        content: "Legacy body".to_string(),
        image: None,
        video: None,
        status: NewsStatus::Active,
        created_at: parse_time("2026-01-06 10:00:00+00"),
        updated_at: parse_time("2026-01-06 10:00:00+00"),
    }
}

pub fn get_seed_product_chair() -> Product {
    Product {
        id: PRODUCT_CHAIR,
        title: "Office Chair".to_string(),
        description: "Mesh back".to_string(),
        image: Some("/uploads/products/1769936400000-chair.jpg".to_string()),
        created_at: parse_time("2026-02-02 09:00:00+00"),
        updated_at: parse_time("2026-02-02 09:00:00+00"),
    }
}

pub fn ids<T, F>(items: &[T], id: F) -> Vec<Uuid>
where
    F: Fn(&T) -> Uuid,
{
    items.iter().map(id).collect()
}

pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

/// Encodes parts as `multipart/form-data`, returning the content type
/// header value and the body.
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let boundary = "newsdesk-test-boundary";
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());

        let disposition = match part.filename {
            Some(filename) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.name, filename
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name),
        };
        body.extend_from_slice(disposition.as_bytes());

        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }

        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    (format!("multipart/form-data; boundary={}", boundary), body)
}
