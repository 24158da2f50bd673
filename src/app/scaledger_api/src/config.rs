use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use pg_store::PgConnectionOptions;

#[derive(confique::Config, Debug)]
pub struct Config {
    #[config(env = "DATABASE_URL")]
    pub database_url: String,
    /// Schema holding the exposed relation
    #[config(env = "DATABASE_SCHEMA", default = "scaledger_public")]
    pub database_schema: String,
    #[config(env = "DATABASE_MAX_CONNECTIONS", default = 10)]
    pub database_max_connections: u32,
    #[config(env = "DATABASE_CONNECT_RETRY_DELAY_IN_SECS", default = 5)]
    pub database_connect_retry_delay_in_secs: u64,
    /// Keep retrying the initial connection instead of exiting
    #[config(env = "RETRY_ON_INIT_FAIL", default = true)]
    pub retry_on_init_fail: bool,

    #[config(env = "HTTP_ADDRESS", default = "0.0.0.0")]
    pub http_address: IpAddr,
    #[config(env = "PORT", default = 5000)]
    pub http_port: u16,
    #[config(env = "GRAPHIQL", default = true)]
    pub graphiql: bool,

    /// Write the schema SDL to `export_schema_path` on startup
    #[config(env = "BUILD_SCHEMA", default = false)]
    pub build_schema: bool,
    #[config(env = "EXPORT_SCHEMA_PATH", default = "schema.graphql")]
    pub export_schema_path: PathBuf,

    #[config(env = "PUBSUB_CHANNEL_PREFIX", default = "postgraphile:")]
    pub pubsub_channel_prefix: String,
    /// Events kept for subscribers that fall behind
    #[config(env = "NOTIFICATION_BUFFER_SIZE", default = 1024)]
    pub notification_buffer_size: usize,
}

impl Config {
    pub fn builder() -> confique::Builder<Config> {
        confique::Config::builder()
    }

    pub fn pg_connection_options(&self) -> PgConnectionOptions {
        PgConnectionOptions {
            database_url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            retry_on_init_fail: self.retry_on_init_fail,
            retry_delay: Duration::from_secs(self.database_connect_retry_delay_in_secs),
        }
    }
}

/// Loads variables from `.env`. A missing file is fine, the environment may be
/// set up already, but a malformed one is an error.
pub fn load_dotenv() -> Result<(), dotenv::Error> {
    skip_missing_dotenv(dotenv::dotenv().map(|_| ()))
}

fn skip_missing_dotenv(result: Result<(), dotenv::Error>) -> Result<(), dotenv::Error> {
    match result {
        Err(e) if e.not_found() => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dotenv_file_is_skipped() {
        let missing = std::env::temp_dir().join("scaledger-api-no-such-dir/.env");

        assert!(skip_missing_dotenv(dotenv::from_path(missing)).is_ok());
    }

    #[test]
    fn test_malformed_dotenv_file_is_reported() {
        let malformed = dotenv::Error::LineParse("DATABASE_URL='postgres".to_string(), 13);

        let result = skip_missing_dotenv(Err(malformed));

        assert!(matches!(result, Err(dotenv::Error::LineParse(_, 13))));
    }
}
