//! 跨设备同步描述
//!
//! 同步层不搬运记录本身，只声明每条记录如何参与同步：
//! 主键字段、参与同步的属性与关系、随记录一起上传的文件集合。
//! melonDS BIOS 两个占位记录不对应普通 ROM，文件集合来自桥接
//! 的固定路径约定。

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sea_orm::DatabaseConnection;
use thiserror::Error;

use crate::database::repository::collections_repository::CollectionsRepository;
use crate::entity::games;
use crate::error::LibraryError;
use crate::library::artwork::{self, ArtworkUrl};
use crate::library::bridge::MelonDsBridge;

/// melonDS DS BIOS 占位记录的 identifier
pub const MELON_DS_BIOS_IDENTIFIER: &str = "com.rileytestut.MelonDSDeltaCore.BIOS";
/// melonDS DSi BIOS 占位记录的 identifier
pub const MELON_DS_DSI_BIOS_IDENTIFIER: &str = "com.rileytestut.MelonDSDeltaCore.DSiBIOS";

/// 随记录同步的单个文件：远端标识 + 本地路径
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyncFile {
    pub identifier: String,
    pub path: PathBuf,
}

impl SyncFile {
    pub fn new(identifier: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            path: path.into(),
        }
    }
}

/// 同步描述所需的环境句柄，由 GameLibrary 构造
pub struct SyncContext<'a> {
    pub games_dir: &'a Path,
    pub artwork_dir: &'a Path,
    pub melon_ds: &'a MelonDsBridge,
}

/// 记录参与同步的方式
pub trait Syncable {
    /// 远端主键对应的属性名
    fn sync_primary_key() -> &'static str;

    /// 参与同步的属性名
    fn sync_keys() -> &'static [&'static str];

    /// 参与同步的关系名
    fn sync_relationships() -> &'static [&'static str];

    /// 冲突界面展示用的名称
    fn localized_name(&self) -> Option<String>;

    /// 随记录一起上传的文件集合
    fn syncable_files(&self, ctx: &SyncContext<'_>) -> HashSet<SyncFile>;
}

impl Syncable for games::Model {
    fn sync_primary_key() -> &'static str {
        "identifier"
    }

    fn sync_keys() -> &'static [&'static str] {
        &["artwork_url", "filename", "name", "game_type"]
    }

    fn sync_relationships() -> &'static [&'static str] {
        &["collection"]
    }

    fn localized_name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn syncable_files(&self, ctx: &SyncContext<'_>) -> HashSet<SyncFile> {
        // 封面：本地封面按存储值解析，没有（或是远程地址）时
        // 使用约定路径，远端可能已有对应文件
        let artwork_path = self
            .artwork_url
            .as_deref()
            .map(|stored| artwork::resolve(stored, ctx.games_dir))
            .and_then(|resolved| match resolved {
                ArtworkUrl::Local(path) => Some(path),
                ArtworkUrl::Remote(_) => None,
            })
            .unwrap_or_else(|| ctx.artwork_dir.join(format!("{}.png", self.identifier)));

        let artwork = SyncFile::new("artwork", artwork_path);

        match self.identifier.as_str() {
            // BIOS 占位记录没有 ROM 文件，上传桥接约定的系统文件
            MELON_DS_BIOS_IDENTIFIER => HashSet::from([
                artwork,
                SyncFile::new("bios7", ctx.melon_ds.bios7_url()),
                SyncFile::new("bios9", ctx.melon_ds.bios9_url()),
                SyncFile::new("firmware", ctx.melon_ds.firmware_url()),
            ]),
            MELON_DS_DSI_BIOS_IDENTIFIER => HashSet::from([
                artwork,
                SyncFile::new("bios7", ctx.melon_ds.dsi_bios7_url()),
                SyncFile::new("bios9", ctx.melon_ds.dsi_bios9_url()),
                SyncFile::new("firmware", ctx.melon_ds.dsi_firmware_url()),
            ]),
            _ => HashSet::from([
                artwork,
                SyncFile::new("game", ctx.games_dir.join(&self.filename)),
            ]),
        }
    }
}

/// 远端记录落库前的一致性校验失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncValidationError {
    /// 游戏挂在了错误的合集下（携带实际找到的合集标识）
    #[error("游戏所属合集不正确: {0:?}")]
    IncorrectGameCollection(Option<String>),
}

/// 远端游戏记录合并进本地库后的校验：
/// 所属合集必须存在，且合集标识与游戏的 game_type 一致
pub async fn awake_from_sync(
    db: &DatabaseConnection,
    game: &games::Model,
) -> Result<(), LibraryError> {
    let collection = match game.collection_id {
        Some(collection_id) => CollectionsRepository::find_by_id(db, collection_id).await?,
        None => None,
    };

    match collection {
        Some(collection) if collection.identifier == game.game_type => Ok(()),
        Some(collection) => Err(SyncValidationError::IncorrectGameCollection(Some(
            collection.identifier,
        ))
        .into()),
        None => Err(SyncValidationError::IncorrectGameCollection(None).into()),
    }
}
