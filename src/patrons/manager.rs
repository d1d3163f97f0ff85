//! 会员名单拉取管理
//!
//! 名单来源（Patreon API 等）通过 PatronsSource 注入，管理器
//! 只负责开关门控、缓存整体替换、记录最近一次结果并广播更新。

use parking_lot::Mutex;
use sea_orm::DatabaseConnection;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::database::repository::patrons_repository::{PatronRecord, PatronsRepository};
use crate::database::repository::settings_repository::SettingsRepository;

/// 名单拉取失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatronsFetchError {
    #[error("拉取会员名单失败: {0}")]
    Fetch(String),
    #[error("会员名单写入失败: {0}")]
    Database(String),
}

/// 会员名单来源
pub trait PatronsSource {
    async fn fetch_patrons(&self) -> Result<Vec<PatronRecord>, PatronsFetchError>;
}

/// 会员名单拉取管理器
pub struct PatronsManager {
    db: DatabaseConnection,
    /// 最近一次拉取结果；None 表示尚未开始或正在进行
    last_result: Mutex<Option<Result<(), PatronsFetchError>>>,
    events: broadcast::Sender<()>,
}

impl PatronsManager {
    pub fn new(db: DatabaseConnection) -> Self {
        let (events, _) = broadcast::channel(16);

        Self {
            db,
            last_result: Mutex::new(None),
            events,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 订阅"名单已更新"事件
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.events.subscribe()
    }

    /// 最近一次拉取结果
    pub fn last_result(&self) -> Option<Result<(), PatronsFetchError>> {
        self.last_result.lock().clone()
    }

    /// 按设置门控拉取名单并整体替换缓存
    ///
    /// 开关关闭时直接返回，不记录结果也不广播。
    pub async fn update_patrons_if_needed(
        &self,
        source: &impl PatronsSource,
    ) -> Result<(), PatronsFetchError> {
        let enabled = SettingsRepository::get_should_fetch_patrons(&self.db)
            .await
            .map_err(|e| PatronsFetchError::Database(e.to_string()))?;

        if !enabled {
            log::debug!("会员名单拉取已关闭，跳过");
            return Ok(());
        }

        *self.last_result.lock() = None;

        let outcome = match source.fetch_patrons().await {
            Ok(records) => PatronsRepository::replace_all(&self.db, records)
                .await
                .map_err(|e| PatronsFetchError::Database(e.to_string())),
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            log::warn!("会员名单更新失败: {}", e);
        }

        *self.last_result.lock() = Some(outcome.clone());
        let _ = self.events.send(());

        outcome
    }
}
