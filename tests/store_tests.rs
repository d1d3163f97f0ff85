//! 订阅购买任务测试：取消静默、失败告警

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use ember_manager_lib::store::{spawn_purchase, spawn_restore, PurchaseError, PurchaseManager};

/// 测试用购买后端：固定结果
struct FakeManager {
    result: Result<(), PurchaseError>,
}

impl FakeManager {
    fn new(result: Result<(), PurchaseError>) -> Arc<Self> {
        Arc::new(Self { result })
    }
}

impl PurchaseManager for FakeManager {
    fn purchase(&self) -> impl Future<Output = Result<(), PurchaseError>> + Send {
        let result = self.result.clone();
        async move { result }
    }

    fn restore(&self) -> impl Future<Output = Result<(), PurchaseError>> + Send {
        let result = self.result.clone();
        async move { result }
    }
}

#[tokio::test]
async fn successful_purchase_sends_no_alert() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let manager = FakeManager::new(Ok(()));

    spawn_purchase(manager, tx).await.unwrap();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn cancelled_purchase_is_silent() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let manager = FakeManager::new(Err(PurchaseError::Cancelled));

    spawn_purchase(manager, tx).await.unwrap();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn failed_purchase_raises_alert() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let manager = FakeManager::new(Err(PurchaseError::Failed("network unreachable".into())));

    spawn_purchase(manager, tx).await.unwrap();

    let alert = rx.try_recv().unwrap();
    assert_eq!(alert.title, "订阅失败");
    assert_eq!(alert.message, "network unreachable");
}

#[tokio::test]
async fn failed_restore_raises_alert() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let manager = FakeManager::new(Err(PurchaseError::Failed("nothing to restore".into())));

    spawn_restore(manager, tx).await.unwrap();

    let alert = rx.try_recv().unwrap();
    assert_eq!(alert.title, "恢复购买失败");
}
