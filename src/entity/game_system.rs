//! 模拟系统类型枚举
//!
//! 原始标识字符串与存量数据、同步记录保持逐位一致，不可更改。

use serde::{Deserialize, Serialize};

/// 支持的模拟系统
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameSystem {
    #[serde(rename = "com.rileytestut.delta.game.nes")]
    Nes,
    #[serde(rename = "com.rileytestut.delta.game.snes")]
    Snes,
    #[serde(rename = "com.rileytestut.delta.game.n64")]
    N64,
    #[serde(rename = "com.rileytestut.delta.game.gbc")]
    Gbc,
    #[serde(rename = "com.rileytestut.delta.game.gba")]
    Gba,
    #[serde(rename = "com.rileytestut.delta.game.ds")]
    Ds,
    #[serde(rename = "com.rileytestut.delta.game.genesis")]
    Genesis,
}

impl GameSystem {
    /// 系统原始标识（games.game_type 与 collections.identifier 的存储值）
    pub const fn as_str(&self) -> &'static str {
        match self {
            GameSystem::Nes => "com.rileytestut.delta.game.nes",
            GameSystem::Snes => "com.rileytestut.delta.game.snes",
            GameSystem::N64 => "com.rileytestut.delta.game.n64",
            GameSystem::Gbc => "com.rileytestut.delta.game.gbc",
            GameSystem::Gba => "com.rileytestut.delta.game.gba",
            GameSystem::Ds => "com.rileytestut.delta.game.ds",
            GameSystem::Genesis => "com.rileytestut.delta.game.genesis",
        }
    }

    /// 从原始标识解析系统类型
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "com.rileytestut.delta.game.nes" => Some(GameSystem::Nes),
            "com.rileytestut.delta.game.snes" => Some(GameSystem::Snes),
            "com.rileytestut.delta.game.n64" => Some(GameSystem::N64),
            "com.rileytestut.delta.game.gbc" => Some(GameSystem::Gbc),
            "com.rileytestut.delta.game.gba" => Some(GameSystem::Gba),
            "com.rileytestut.delta.game.ds" => Some(GameSystem::Ds),
            "com.rileytestut.delta.game.genesis" => Some(GameSystem::Genesis),
            _ => None,
        }
    }

    /// 合集展示名称
    pub const fn display_name(&self) -> &'static str {
        match self {
            GameSystem::Nes => "Nintendo Entertainment System",
            GameSystem::Snes => "Super Nintendo",
            GameSystem::N64 => "Nintendo 64",
            GameSystem::Gbc => "Game Boy Color",
            GameSystem::Gba => "Game Boy Advance",
            GameSystem::Ds => "Nintendo DS",
            GameSystem::Genesis => "Sega Genesis",
        }
    }

    /// 根据 ROM 文件扩展名推断系统类型（小写比较）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "nes" => Some(GameSystem::Nes),
            "smc" | "sfc" => Some(GameSystem::Snes),
            "n64" | "z64" | "v64" => Some(GameSystem::N64),
            "gb" | "gbc" => Some(GameSystem::Gbc),
            "gba" => Some(GameSystem::Gba),
            "ds" | "nds" => Some(GameSystem::Ds),
            "gen" | "md" | "smd" => Some(GameSystem::Genesis),
            _ => None,
        }
    }
}
