use std::time::Duration;

/// Waits out the fixed delays between rate-limited requests
#[async_trait::async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

pub struct SleepPacer;

#[async_trait::async_trait]
impl Pacer for SleepPacer {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}
