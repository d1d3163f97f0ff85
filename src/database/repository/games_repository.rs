//! 游戏数据仓库
//!
//! games 表的 CRUD 操作。文件系统副作用（删除级联、导入拷贝）
//! 不在此层，见 library 模块。

use crate::database::dto::{InsertGameData, UpdateGameData};
use crate::entity::games;
use crate::entity::prelude::*;
use sea_orm::*;
use serde::{Deserialize, Serialize};

/// 最近游玩列表的固定长度
pub const RECENTLY_PLAYED_LIMIT: u64 = 4;

/// 游戏数据排序选项
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    Name,
    Addtime,
    LastPlayed,
}

/// 排序方向
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// 游戏数据仓库
pub struct GamesRepository;

impl GamesRepository {
    // ==================== 游戏 CRUD 操作 ====================

    /// 插入游戏数据
    pub async fn insert(db: &DatabaseConnection, game: InsertGameData) -> Result<games::Model, DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;

        let game_active = games::ActiveModel {
            id: NotSet,
            identifier: Set(game.identifier),
            filename: Set(game.filename),
            name: Set(game.name),
            game_type: Set(game.game_type),
            artwork_url: Set(game.artwork_url),
            game_settings: Set(game.game_settings),
            played_date: NotSet,
            collection_id: Set(game.collection_id),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };

        game_active.insert(db).await
    }

    /// 更新游戏数据
    ///
    /// 支持部分更新，未提供的字段保持不变
    pub async fn update(
        db: &DatabaseConnection,
        game_id: i32,
        updates: UpdateGameData,
    ) -> Result<games::Model, DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;

        let game_active = games::ActiveModel {
            id: Set(game_id),
            name: updates.name.map_or(NotSet, Set),
            filename: updates.filename.map_or(NotSet, Set),
            game_type: updates.game_type.map_or(NotSet, Set),
            artwork_url: updates.artwork_url.map_or(NotSet, Set),
            game_settings: updates.game_settings.map_or(NotSet, Set),
            played_date: updates.played_date.map_or(NotSet, Set),
            collection_id: updates.collection_id.map_or(NotSet, Set),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        game_active.update(db).await
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 查询游戏
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<games::Model>, DbErr> {
        Games::find_by_id(id).one(db).await
    }

    /// 根据内容标识查询游戏
    pub async fn find_by_identifier(
        db: &DatabaseConnection,
        identifier: &str,
    ) -> Result<Option<games::Model>, DbErr> {
        Games::find()
            .filter(games::Column::Identifier.eq(identifier))
            .one(db)
            .await
    }

    /// 获取所有游戏，支持排序
    pub async fn find_all(
        db: &DatabaseConnection,
        sort_option: SortOption,
        sort_order: SortOrder,
    ) -> Result<Vec<games::Model>, DbErr> {
        let order = match sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let query = match sort_option {
            SortOption::Name => Games::find().order_by(games::Column::Name, order),
            SortOption::Addtime => Games::find().order_by(games::Column::Id, order),
            SortOption::LastPlayed => Games::find()
                .order_by(games::Column::PlayedDate, order)
                .order_by_asc(games::Column::Name),
        };

        query.all(db).await
    }

    /// 最近游玩的游戏：只统计有 played_date 的记录，
    /// 按最近游玩时间倒序、名称升序，固定取前 4 条
    pub async fn recently_played(db: &DatabaseConnection) -> Result<Vec<games::Model>, DbErr> {
        Games::find()
            .filter(games::Column::PlayedDate.is_not_null())
            .order_by_desc(games::Column::PlayedDate)
            .order_by_asc(games::Column::Name)
            .limit(RECENTLY_PLAYED_LIMIT)
            .all(db)
            .await
    }

    /// 获取合集中的所有游戏
    pub async fn find_by_collection(
        db: &DatabaseConnection,
        collection_id: i32,
    ) -> Result<Vec<games::Model>, DbErr> {
        Games::find()
            .filter(games::Column::CollectionId.eq(collection_id))
            .order_by_asc(games::Column::Name)
            .all(db)
            .await
    }

    /// 获取游戏总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Games::find().count(db).await
    }

    // ==================== 状态更新 ====================

    /// 记录一次游玩（刷新 played_date 时间戳）
    pub async fn mark_played(db: &DatabaseConnection, game_id: i32) -> Result<(), DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;

        let game_active = games::ActiveModel {
            id: Set(game_id),
            played_date: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        game_active.update(db).await?;
        Ok(())
    }

    /// 删除游戏记录（仅数据库行，文件级联见 GameLibrary::delete_game）
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
        Games::delete_by_id(id).exec(db).await
    }
}
