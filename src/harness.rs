//! Starts the service against a test database and hands tests a client plus
//! direct access to the same connection the service uses.
//!
//! A `Harness` only exists between `start` and `stop`: requests go through
//! it and `stop` consumes it, so the service can never be used before it is
//! up or after it has shut down.

use std::sync::MutexGuard;

use rocket::local::blocking::Client;
use rusqlite::Connection;
use thiserror::Error;

use crate::config::Config;
use crate::fixtures::{self, DEFAULT_SEED_COUNT};
use crate::models::BlogPost;
use crate::{create_rocket, db, DbPool, DbPoolExt};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("failed to launch service: {0}")]
    Launch(String),
    #[error("service has no managed database connection")]
    MissingDatabase,
}

pub struct Harness {
    client: Client,
    target: String,
}

impl Harness {
    /// Opens `target`, prepares the schema and ignites the service. Returns
    /// once the service accepts requests.
    pub fn start(target: &str) -> Result<Self, HarnessError> {
        log::info!("starting blog posts service against {}", target);
        let conn = db::open(target)?;
        db::initialize(&conn)?;
        let client = Client::tracked(create_rocket(conn))
            .map_err(|e| HarnessError::Launch(e.to_string()))?;
        Ok(Self { client, target: target.to_string() })
    }

    /// Starts against `TEST_DATABASE_PATH`, or an in-memory database.
    pub fn start_from_env() -> Result<Self, HarnessError> {
        Self::start(&Config::from_env().test_database_path)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Locks the service's connection. Drop the guard before dispatching a
    /// request or the handler will block on it.
    pub fn db(&self) -> Result<MutexGuard<'_, Connection>, HarnessError> {
        self.client
            .rocket()
            .state::<DbPool>()
            .map(|pool| pool.conn())
            .ok_or(HarnessError::MissingDatabase)
    }

    pub fn seed(&self, n: usize) -> Result<Vec<BlogPost>, HarnessError> {
        let mut conn = self.db()?;
        Ok(fixtures::seed(&mut conn, n)?)
    }

    pub fn seed_default(&self) -> Result<Vec<BlogPost>, HarnessError> {
        self.seed(DEFAULT_SEED_COUNT)
    }

    pub fn teardown(&self) -> Result<(), HarnessError> {
        let conn = self.db()?;
        Ok(fixtures::teardown(&conn)?)
    }

    pub fn count(&self) -> Result<usize, HarnessError> {
        let conn = self.db()?;
        Ok(db::count_posts(&conn)?)
    }

    /// Shuts the service down and closes its connection.
    pub fn stop(self) {
        log::info!("closing blog posts service ({})", self.target);
        drop(self.client.terminate());
    }
}
