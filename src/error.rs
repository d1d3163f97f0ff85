//! 库级错误类型
//!
//! 仓库层沿用 SeaORM 的 DbErr，对外门面统一包装为 LibraryError。

use sea_orm::DbErr;
use thiserror::Error;

use crate::sync::SyncValidationError;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("数据库错误: {0}")]
    Database(#[from] DbErr),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("游戏不存在: {0}")]
    GameNotFound(i32),

    #[error("无法识别的游戏文件: {0}")]
    UnknownSystem(String),

    #[error("路径无效: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    SyncValidation(#[from] SyncValidationError),
}
