//! 用户设置仓库

use crate::entity::prelude::*;
use crate::entity::user;
use sea_orm::*;

/// 用户设置仓库
pub struct SettingsRepository;

impl SettingsRepository {
    /// 确保用户记录存在（ID 固定为 1）
    async fn ensure_user_exists(db: &DatabaseConnection) -> Result<(), DbErr> {
        let existing = User::find_by_id(1).one(db).await?;

        if existing.is_none() {
            let user = user::ActiveModel {
                id: Set(1),
                games_dir: Set(None),
                should_fetch_patrons: Set(None),
            };

            user.insert(db).await?;
        }

        Ok(())
    }

    async fn find_user(db: &DatabaseConnection) -> Result<user::Model, DbErr> {
        Self::ensure_user_exists(db).await?;

        User::find_by_id(1)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("User record not found".to_string()))
    }

    /// 获取自定义游戏库目录（未设置或为空串时返回 None）
    pub async fn get_games_dir(db: &DatabaseConnection) -> Result<Option<String>, DbErr> {
        let user = Self::find_user(db).await?;
        Ok(user.games_dir.filter(|s| !s.trim().is_empty()))
    }

    /// 设置自定义游戏库目录
    pub async fn set_games_dir(db: &DatabaseConnection, path: String) -> Result<(), DbErr> {
        let user = Self::find_user(db).await?;

        let mut active: user::ActiveModel = user.into();
        active.games_dir = Set(Some(path));

        active.update(db).await?;
        Ok(())
    }

    /// 是否允许拉取会员名单
    pub async fn get_should_fetch_patrons(db: &DatabaseConnection) -> Result<bool, DbErr> {
        let user = Self::find_user(db).await?;
        Ok(user.should_fetch_patrons.unwrap_or(0) != 0)
    }

    /// 设置是否允许拉取会员名单
    pub async fn set_should_fetch_patrons(
        db: &DatabaseConnection,
        enabled: bool,
    ) -> Result<(), DbErr> {
        let user = Self::find_user(db).await?;

        let mut active: user::ActiveModel = user.into();
        active.should_fetch_patrons = Set(Some(if enabled { 1 } else { 0 }));

        active.update(db).await?;
        Ok(())
    }

    /// 获取所有设置
    pub async fn get_all_settings(db: &DatabaseConnection) -> Result<user::Model, DbErr> {
        Self::find_user(db).await
    }
}
