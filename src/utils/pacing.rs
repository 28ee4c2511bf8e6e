use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};

/// 等待指定时间，期间可被取消；时长为零时只检查取消状态
pub async fn pause(duration: Duration, cancel: &CancellationToken) -> AppResult<()> {
    ensure_active(cancel)?;
    if duration.is_zero() {
        return Ok(());
    }
    tokio::select! {
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}

/// 已取消时返回 `AppError::Cancelled`
pub fn ensure_active(cancel: &CancellationToken) -> AppResult<()> {
    if cancel.is_cancelled() {
        return Err(AppError::Cancelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pause_interrupted_by_cancel() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result = pause(Duration::from_secs(30), &cancel).await;
        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[test]
    fn test_zero_pause_completes_immediately() {
        let cancel = CancellationToken::new();
        assert!(tokio_test::block_on(pause(Duration::ZERO, &cancel)).is_ok());
    }
}
