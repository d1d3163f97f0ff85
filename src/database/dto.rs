//! 数据传输对象 (DTO)
//!
//! 游戏记录插入与部分更新所用的结构定义。

use serde::{Deserialize, Deserializer, Serialize};

use crate::entity::game_settings::GameSettings;

/// 辅助函数：支持 Option<Option<T>> 的反序列化
/// 用于区分"未提供字段"和"显式设为 null"
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// 用于插入游戏的数据结构
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InsertGameData {
    pub identifier: String,
    pub filename: String,
    pub name: String,
    pub game_type: String,
    pub artwork_url: Option<String>,
    pub game_settings: Option<GameSettings>,
    pub collection_id: Option<i32>,
}

/// 用于更新游戏的数据结构
///
/// 所有字段均为 Option，允许部分更新。
/// 使用 Option<Option<T>> 来区分"未提供"和"设为 null"。
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateGameData {
    pub name: Option<String>,
    pub filename: Option<String>,
    pub game_type: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub artwork_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub game_settings: Option<Option<GameSettings>>,
    #[serde(default, deserialize_with = "double_option")]
    pub played_date: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub collection_id: Option<Option<i32>>,
}
