//! Environment-driven settings for the service binary and the test harness.

pub const DEFAULT_DATABASE_PATH: &str = "data/blog_posts.db";
pub const DEFAULT_TEST_DATABASE_PATH: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Database the binary serves from.
    pub database_path: String,
    /// Database the harness binds the service to.
    pub test_database_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            test_database_path: DEFAULT_TEST_DATABASE_PATH.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            database_path: non_empty("DATABASE_PATH").unwrap_or(defaults.database_path),
            test_database_path: non_empty("TEST_DATABASE_PATH").unwrap_or(defaults.test_database_path),
        }
    }
}
