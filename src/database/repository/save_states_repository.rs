//! 即时存档数据仓库

use crate::entity::prelude::*;
use crate::entity::save_states;
use sea_orm::*;

/// 即时存档数据仓库
pub struct SaveStatesRepository;

impl SaveStatesRepository {
    /// 保存存档记录
    pub async fn insert(
        db: &DatabaseConnection,
        game_id: i32,
        filename: &str,
    ) -> Result<save_states::Model, DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;

        let record = save_states::ActiveModel {
            id: NotSet,
            game_id: Set(game_id),
            filename: Set(filename.to_string()),
            created_at: Set(Some(now)),
        };

        record.insert(db).await
    }

    /// 获取指定游戏的所有存档记录（按时间倒序）
    pub async fn find_by_game(
        db: &DatabaseConnection,
        game_id: i32,
    ) -> Result<Vec<save_states::Model>, DbErr> {
        SaveStates::find()
            .filter(save_states::Column::GameId.eq(game_id))
            .order_by_desc(save_states::Column::CreatedAt)
            .all(db)
            .await
    }

    /// 获取指定游戏的存档数量
    pub async fn count_by_game(db: &DatabaseConnection, game_id: i32) -> Result<u64, DbErr> {
        SaveStates::find()
            .filter(save_states::Column::GameId.eq(game_id))
            .count(db)
            .await
    }

    /// 删除存档记录
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
        SaveStates::delete_by_id(id).exec(db).await
    }

    /// 批量删除指定游戏的所有存档记录
    pub async fn delete_by_game(
        db: &DatabaseConnection,
        game_id: i32,
    ) -> Result<DeleteResult, DbErr> {
        SaveStates::delete_many()
            .filter(save_states::Column::GameId.eq(game_id))
            .exec(db)
            .await
    }
}
