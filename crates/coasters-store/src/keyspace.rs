//! Environment-scoped Redis key layout.

/// Key prefix used in production.
pub const PRODUCTION_PREFIX: &str = "coaster:prod:";

/// Key prefix used in every other environment.
pub const DEVELOPMENT_PREFIX: &str = "coaster:dev:";

const INDEX_SUFFIX: &str = "all";

/// Builds record and index keys under one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    prefix: String,
}

impl Keyspace {
    /// Uses `prefix` verbatim in front of every key.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// `production` maps to the production prefix; anything else is
    /// development.
    #[must_use]
    pub fn for_environment(environment: &str) -> Self {
        if environment.eq_ignore_ascii_case("production") {
            Self::new(PRODUCTION_PREFIX)
        } else {
            Self::new(DEVELOPMENT_PREFIX)
        }
    }

    /// The prefix shared by every key.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key of the JSON snapshot for `id`.
    #[must_use]
    pub fn record_key(&self, id: &str) -> String {
        format!("{}{id}", self.prefix)
    }

    /// Key of the set holding every stored identity.
    #[must_use]
    pub fn index_key(&self) -> String {
        format!("{}{INDEX_SUFFIX}", self.prefix)
    }
}
