//! 数据实体模块
//!
//! 包含所有 SeaORM 实体定义、JSON 数据结构与系统类型枚举。

pub mod prelude;

// === JSON 数据结构与领域值类型 ===
pub mod game_settings;
pub mod game_system;

// === SeaORM 实体（对应数据库表）===
pub mod collections;
pub mod games;
pub mod patrons;
pub mod save_states;
pub mod user;
