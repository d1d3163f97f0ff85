//! 游戏删除级联
//!
//! 行删除本身总会发生；所有文件系统与关联副作用由一组防御性
//! 守卫控制，任何一个守卫触发即提前退出副作用阶段：
//!
//! 1. filename 为空：空文件名会解析为游戏库根目录本身，
//!    绝不能把它交给删除逻辑；
//! 2. 同 identifier 的记录正在插入：合并冲突解决期间删除旧记录，
//!    文件与关联仍归新记录所有；
//! 3. 解析出的路径不存在或是目录：目录永远不删。
//!
//! 文件删除失败只记录日志，级联继续（尽力清理）。

use std::fs;

use sea_orm::*;

use crate::database::repository::games_repository::GamesRepository;
use crate::entity::prelude::*;
use crate::entity::{games, save_states};
use crate::error::LibraryError;
use crate::library::GameLibrary;

impl GameLibrary {
    /// 删除游戏：守卫式副作用 + 行删除，整体在一个事务中提交
    ///
    /// 返回是否确实存在并删除了该记录。
    pub async fn delete_game(&self, id: i32) -> Result<bool, LibraryError> {
        let Some(game) = GamesRepository::find_by_id(self.db(), id).await? else {
            return Ok(false);
        };

        let txn = self.db().begin().await?;

        self.prepare_for_deletion(&game, &txn).await?;
        Games::delete_by_id(game.id).exec(&txn).await?;

        txn.commit().await?;
        Ok(true)
    }

    async fn prepare_for_deletion(
        &self,
        game: &games::Model,
        txn: &DatabaseTransaction,
    ) -> Result<(), LibraryError> {
        // 守卫 1：空文件名（合并期间可能出现）会解析为游戏库根目录
        if game.filename.is_empty() {
            return Ok(());
        }

        // 守卫 2：同 identifier 正在插入，说明是合并冲突解决中的
        // 旧记录，文件与关联数据必须留给新记录
        if self.is_inserting(&game.identifier) {
            return Ok(());
        }

        // 守卫 3：路径必须存在且不是目录
        let path = self.file_url(game);
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(_) => return Ok(()),
        };
        if metadata.is_dir() {
            return Ok(());
        }

        if let Err(e) = fs::remove_file(&path) {
            log::warn!("删除游戏文件失败 {}: {}", path.display(), e);
        }

        // 这是合集中最后一个游戏时，合集一并删除
        if let Some(collection_id) = game.collection_id {
            let remaining = Games::find()
                .filter(games::Column::CollectionId.eq(collection_id))
                .count(txn)
                .await?;

            if remaining == 1 {
                Collections::delete_by_id(collection_id).exec(txn).await?;
            }
        }

        // 存档记录持有对游戏的回引用，必须先于游戏行删除
        let states = SaveStates::find()
            .filter(save_states::Column::GameId.eq(game.id))
            .all(txn)
            .await?;

        for state in &states {
            let state_path = self.save_state_path(&state.filename);
            if let Err(e) = fs::remove_file(&state_path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("删除存档文件失败 {}: {}", state_path.display(), e);
                }
            }
        }

        SaveStates::delete_many()
            .filter(save_states::Column::GameId.eq(game.id))
            .exec(txn)
            .await?;

        Ok(())
    }
}
