//! 订阅与恢复购买
//!
//! 购买动作以 fire-and-forget 任务派发，网络阶段可能挂起。
//! 用户中途取消是静默无操作，不算错误；真正的失败通过告警
//! 通道上报给界面层。

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// 购买失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// 用户主动取消（静默处理）
    #[error("购买已取消")]
    Cancelled,
    #[error("购买失败: {0}")]
    Failed(String),
}

/// 购买后端（App Store 等），由外部注入
pub trait PurchaseManager {
    fn purchase(&self) -> impl Future<Output = Result<(), PurchaseError>> + Send;
    fn restore(&self) -> impl Future<Output = Result<(), PurchaseError>> + Send;
}

/// 上报给界面层的告警
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAlert {
    pub title: String,
    pub message: String,
}

/// 派发一次订阅购买；取消静默，失败发告警
pub fn spawn_purchase<M>(
    manager: Arc<M>,
    alerts: mpsc::UnboundedSender<StoreAlert>,
) -> JoinHandle<()>
where
    M: PurchaseManager + Send + Sync + 'static,
{
    tokio::spawn(async move {
        match manager.purchase().await {
            Ok(()) => {}
            Err(PurchaseError::Cancelled) => {
                log::debug!("购买已取消");
            }
            Err(PurchaseError::Failed(message)) => {
                let _ = alerts.send(StoreAlert {
                    title: "订阅失败".to_string(),
                    message,
                });
            }
        }
    })
}

/// 派发一次恢复购买；取消静默，失败发告警
pub fn spawn_restore<M>(
    manager: Arc<M>,
    alerts: mpsc::UnboundedSender<StoreAlert>,
) -> JoinHandle<()>
where
    M: PurchaseManager + Send + Sync + 'static,
{
    tokio::spawn(async move {
        match manager.restore().await {
            Ok(()) => {}
            Err(PurchaseError::Cancelled) => {
                log::debug!("恢复购买已取消");
            }
            Err(PurchaseError::Failed(message)) => {
                let _ = alerts.send(StoreAlert {
                    title: "恢复购买失败".to_string(),
                    message,
                });
            }
        }
    })
}
