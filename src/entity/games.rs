//! 游戏数据实体
//!
//! games 表是核心表，包含游戏的基础信息和嵌入的 JSON 设置列。
//! `identifier` 为 ROM 文件内容的 SHA-1，跨设备同步时作为主键使用；
//! `filename` 相对于游戏库根目录存储，绝对路径总是在读取时重新拼接。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::game_settings::GameSettings;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    // === 身份标识 ===
    #[sea_orm(column_type = "Text")]
    pub identifier: String,
    #[sea_orm(column_type = "Text")]
    pub filename: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub game_type: String,

    // === 核心状态 ===
    #[sea_orm(column_type = "Text", nullable)]
    pub artwork_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub game_settings: Option<GameSettings>,
    pub played_date: Option<i32>,
    pub collection_id: Option<i32>,

    // === 时间戳 ===
    pub created_at: Option<i32>,
    pub updated_at: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::collections::Entity",
        from = "Column::CollectionId",
        to = "super::collections::Column::Id"
    )]
    Collections,
    #[sea_orm(has_many = "super::save_states::Entity")]
    SaveStates,
}

impl Related<super::collections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Collections.def()
    }
}

impl Related<super::save_states::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaveStates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
