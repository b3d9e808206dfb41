use subtle::ConstantTimeEq;

/// Placeholder admin guard: a single shared bearer token.
///
/// With no token configured every request passes, which is how local
/// development runs.
#[derive(Debug, Clone, Default)]
pub struct AdminGuard {
    token: Option<String>,
}

impl AdminGuard {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }

    /// Checks an `Authorization` header value of the form `Bearer <token>`.
    pub fn authorize(&self, authorization: Option<&str>) -> bool {
        let Some(expected) = &self.token else {
            return true;
        };

        authorization
            .and_then(|value| value.trim().strip_prefix("Bearer "))
            .is_some_and(|given| constant_time_eq(given.trim().as_bytes(), expected.as_bytes()))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
