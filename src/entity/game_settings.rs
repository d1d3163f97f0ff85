//! 游戏设置 JSON 结构体
//!
//! 此文件定义了存储在 games.game_settings 列中的 JSON 数据结构。
//! 历史数据以字符串键存储（如 "openGLES2"），serde rename 保证
//! 与既有存量数据逐位兼容；未识别的键通过 flatten 原样保留。

use std::collections::BTreeMap;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// 单个游戏的覆盖设置（存储为 JSON）
///
/// 字段均为可选：None 表示"未显式设置"，读取有效设置时
/// 才会叠加默认值。空设置在写入时存储为 SQL NULL 而非 `{}`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, FromJsonQueryResult)]
#[serde(default)]
pub struct GameSettings {
    /// 是否启用 OpenGL ES 2.0 渲染兼容模式
    #[serde(rename = "openGLES2", skip_serializing_if = "Option::is_none")]
    pub opengl_es2: Option<bool>,

    /// 未识别的历史键，原样保留避免丢数据
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl GameSettings {
    /// 是否没有任何显式设置
    pub fn is_empty(&self) -> bool {
        self.opengl_es2.is_none() && self.extra.is_empty()
    }
}
