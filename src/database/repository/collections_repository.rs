//! 合集数据仓库

use crate::entity::game_system::GameSystem;
use crate::entity::prelude::*;
use crate::entity::{collections, games};
use sea_orm::*;

/// 合集数据仓库
pub struct CollectionsRepository;

impl CollectionsRepository {
    /// 创建合集
    pub async fn create(
        db: &DatabaseConnection,
        identifier: String,
        name: String,
    ) -> Result<collections::Model, DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;

        let collection = collections::ActiveModel {
            id: NotSet,
            identifier: Set(identifier),
            name: Set(name),
            created_at: Set(Some(now)),
        };

        collection.insert(db).await
    }

    /// 根据 ID 查询合集
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<collections::Model>, DbErr> {
        Collections::find_by_id(id).one(db).await
    }

    /// 根据系统标识查询合集
    pub async fn find_by_identifier(
        db: &DatabaseConnection,
        identifier: &str,
    ) -> Result<Option<collections::Model>, DbErr> {
        Collections::find()
            .filter(collections::Column::Identifier.eq(identifier))
            .one(db)
            .await
    }

    /// 获取所有合集
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<collections::Model>, DbErr> {
        Collections::find()
            .order_by_asc(collections::Column::Name)
            .all(db)
            .await
    }

    /// 确保某个系统的合集存在，返回该合集
    pub async fn ensure_for_system(
        db: &DatabaseConnection,
        system: GameSystem,
    ) -> Result<collections::Model, DbErr> {
        if let Some(existing) = Self::find_by_identifier(db, system.as_str()).await? {
            return Ok(existing);
        }

        Self::create(
            db,
            system.as_str().to_string(),
            system.display_name().to_string(),
        )
        .await
    }

    /// 获取合集中的游戏数量
    pub async fn count_games(db: &DatabaseConnection, collection_id: i32) -> Result<u64, DbErr> {
        Games::find()
            .filter(games::Column::CollectionId.eq(collection_id))
            .count(db)
            .await
    }

    /// 删除合集
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
        Collections::delete_by_id(id).exec(db).await
    }
}
