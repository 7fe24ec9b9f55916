use std::future::Future;
use std::time::Duration;

use super::MongoError;

/// Per-operation deadline used by the domain repositories unless overridden
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Await a driver call, failing with [`MongoError::Timeout`] once `limit` elapses.
///
/// The pending operation is dropped on timeout; the server may still apply it.
///
/// ```ignore
/// let doc = with_timeout("products.find_one", DEFAULT_OPERATION_TIMEOUT, async {
///     collection.find_one(doc! { "_id": oid }).await
/// })
/// .await?;
/// ```
pub async fn with_timeout<T, F>(
    operation: &'static str,
    limit: Duration,
    fut: F,
) -> Result<T, MongoError>
where
    F: Future<Output = Result<T, mongodb::error::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(MongoError::from),
        Err(_) => {
            tracing::warn!(operation, limit_ms = limit.as_millis() as u64, "MongoDB operation timed out");
            Err(MongoError::Timeout { operation, limit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completed_operation_passes_through() {
        let value = with_timeout("ping", Duration::from_secs(1), async {
            Ok::<_, mongodb::error::Error>(42)
        })
        .await
        .unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_stalled_operation_times_out() {
        let err = with_timeout(
            "products.find",
            Duration::from_millis(20),
            std::future::pending::<Result<(), mongodb::error::Error>>(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, MongoError::Timeout { operation: "products.find", .. }));
        assert!(err.to_string().contains("timed out"));
    }
}
