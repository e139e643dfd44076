//! Shared fixtures for the integration tests.

pub mod catalog_test;
pub mod dashboard_test;
pub mod executor_test;

use pulse_insights::catalog::schema::fixture_ddl;
use pulse_insights::config::{ConnectionConfig, DashboardSettings};
use pulse_insights::dashboard::Dashboard;
use pulse_insights::db::DatabaseBackend;
use std::io::Write;
use tempfile::NamedTempFile;

/// A small extract with rows in every table.
pub const SAMPLE_ROWS: &str = "
INSERT INTO aggregated_transaction VALUES (2022, 1, 'goa', 'Recharge & bill payments', 100, 10);
INSERT INTO aggregated_transaction VALUES (2022, 3, 'kerala', 'Peer-to-peer payments', 250, 20);
INSERT INTO aggregated_transaction VALUES (2023, 3, 'goa', 'Peer-to-peer payments', 50, 5);
INSERT INTO aggregated_user VALUES ('Xiaomi', 'goa', 400, 0.25);
INSERT INTO aggregated_user VALUES ('Samsung', 'kerala', 300, 0.2);
INSERT INTO aggregated_insurance VALUES ('goa', 2022, 12, 3400.5);
INSERT INTO aggregated_insurance VALUES ('kerala', 2023, 30, 9000);
INSERT INTO map_transaction VALUES ('goa', 2022, 1, 1200, 40);
INSERT INTO map_transaction VALUES ('kerala', 2023, 2, 800, 25);
INSERT INTO map_user VALUES ('goa', 1000, 5000);
INSERT INTO map_user VALUES ('kerala', 2000, 7000);
";

/// An in-memory SQLite connection whose every connection is seeded with the
/// known schema plus `rows`.
pub struct Fixture {
    pub connection: ConnectionConfig,
    _seed: NamedTempFile,
}

impl Fixture {
    pub fn new(rows: &str) -> Self {
        let mut seed = NamedTempFile::new().unwrap();
        writeln!(seed, "{}", fixture_ddl()).unwrap();
        writeln!(seed, "{rows}").unwrap();
        let connection = ConnectionConfig {
            backend: DatabaseBackend::Sqlite,
            seed: Some(seed.path().to_path_buf()),
            ..Default::default()
        };
        Self {
            connection,
            _seed: seed,
        }
    }

    pub fn sample() -> Self {
        Self::new(SAMPLE_ROWS)
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.connection.clone(), &DashboardSettings::default())
    }
}
