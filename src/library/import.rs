//! 游戏导入
//!
//! identifier 取文件内容的 SHA-1（小写十六进制），天然去重；
//! 文件拷入游戏库根目录后统一命名为 `<identifier>.<扩展名>`。
//! 同 identifier 的旧记录按合并冲突处理：标记插入中再删除旧行，
//! 删除级联因此跳过文件与关联副作用，新记录接管它们。

use std::fs::File;
use std::io;
use std::path::Path;

use sha1::{Digest, Sha1};
use walkdir::WalkDir;

use crate::database::dto::InsertGameData;
use crate::database::repository::collections_repository::CollectionsRepository;
use crate::database::repository::games_repository::GamesRepository;
use crate::entity::game_system::GameSystem;
use crate::entity::games;
use crate::error::LibraryError;
use crate::library::GameLibrary;

impl GameLibrary {
    /// 导入单个游戏文件
    ///
    /// 扩展名无法识别时返回 UnknownSystem；同 identifier 的
    /// 旧记录会被替换。
    pub async fn import_game(&self, source: &Path) -> Result<games::Model, LibraryError> {
        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let system = GameSystem::from_extension(&extension)
            .ok_or_else(|| LibraryError::UnknownSystem(source.display().to_string()))?;

        let identifier = hash_file(source)?;
        let filename = format!("{}.{}", identifier, extension);

        let destination = self.games_dir().join(&filename);
        if !destination.exists() {
            std::fs::copy(source, &destination)?;
        }

        let name = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.clone());

        let collection = CollectionsRepository::ensure_for_system(self.db(), system).await?;

        // 同 identifier 的旧记录：抑制文件级联后替换
        if let Some(existing) = GamesRepository::find_by_identifier(self.db(), &identifier).await? {
            self.mark_inserting(&identifier);
            let deleted = self.delete_game(existing.id).await;
            if deleted.is_err() {
                self.unmark_inserting(&identifier);
            }
            deleted?;
        } else {
            self.mark_inserting(&identifier);
        }

        let inserted = GamesRepository::insert(
            self.db(),
            InsertGameData {
                identifier: identifier.clone(),
                filename,
                name,
                game_type: system.as_str().to_string(),
                artwork_url: None,
                game_settings: None,
                collection_id: Some(collection.id),
            },
        )
        .await;

        self.unmark_inserting(&identifier);
        Ok(inserted?)
    }

    /// 扫描目录并导入其中所有可识别的游戏文件
    ///
    /// 单个文件失败只记录日志，不中断整个扫描。
    pub async fn import_directory(&self, dir: &Path) -> Result<Vec<games::Model>, LibraryError> {
        let mut imported = Vec::new();

        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }

            let extension = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase())
                .unwrap_or_default();

            if GameSystem::from_extension(&extension).is_none() {
                continue;
            }

            match self.import_game(entry.path()).await {
                Ok(game) => imported.push(game),
                Err(e) => {
                    log::warn!("导入失败 {}: {}", entry.path().display(), e);
                }
            }
        }

        Ok(imported)
    }
}

/// 流式计算文件内容的 SHA-1，返回小写十六进制
fn hash_file(path: &Path) -> Result<String, io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha1::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}
