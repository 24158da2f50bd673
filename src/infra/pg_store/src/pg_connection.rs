use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

#[derive(Debug, Clone)]
pub struct PgConnectionOptions {
    pub database_url: String,
    pub max_connections: u32,
    pub retry_on_init_fail: bool,
    pub retry_delay: Duration,
}

/// Connects the pool, retrying until the database is reachable when
/// `retry_on_init_fail` is set.
pub async fn connect_pool(options: &PgConnectionOptions) -> Result<PgPool, sqlx::Error> {
    retry_on_init_fail(options, "connect", || async move {
        PgPoolOptions::new()
            .max_connections(options.max_connections)
            .connect(&options.database_url)
            .await
    })
    .await
}

pub async fn retry_on_init_fail<T, E, F, Fut>(
    options: &PgConnectionOptions,
    operation: &'static str,
    mut f: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1u32;

    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if options.retry_on_init_fail => {
                tracing::warn!(
                    operation,
                    attempt,
                    error = %e,
                    retry_in = ?options.retry_delay,
                    "Database initialization failed, retrying"
                );
                attempt += 1;
                tokio::time::sleep(options.retry_delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn options(retry_on_init_fail: bool) -> PgConnectionOptions {
        PgConnectionOptions {
            database_url: "postgres://localhost/scaledger".to_string(),
            max_connections: 1,
            retry_on_init_fail,
            retry_delay: Duration::ZERO,
        }
    }

    fn failing_until(success_attempt: u32) -> impl FnMut() -> std::future::Ready<Result<u32, String>> {
        let mut attempt = 0;

        move || {
            attempt += 1;
            std::future::ready(if attempt < success_attempt {
                Err(format!("attempt {attempt} failed"))
            } else {
                Ok(attempt)
            })
        }
    }

    #[tokio::test]
    async fn test_retries_until_operation_succeeds() {
        let result = retry_on_init_fail(&options(true), "test", failing_until(3)).await;

        assert_eq!(Ok(3), result);
    }

    #[tokio::test]
    async fn test_first_error_is_returned_when_retry_is_disabled() {
        let result = retry_on_init_fail(&options(false), "test", failing_until(3)).await;

        assert_eq!(Err("attempt 1 failed".to_string()), result);
    }

    #[tokio::test]
    async fn test_no_retry_needed_on_first_success() {
        let result = retry_on_init_fail(&options(false), "test", failing_until(1)).await;

        assert_eq!(Ok(1), result);
    }
}
