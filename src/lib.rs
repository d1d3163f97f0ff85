//! EmberManager 游戏库核心
//!
//! 模拟器前端的数据层：游戏与合集的持久化、删除级联、
//! 跨设备同步描述、会员名单与订阅入口。

pub mod database;
pub mod entity;
pub mod error;
pub mod library;
pub mod patrons;
pub mod store;
pub mod sync;
pub mod utils;

pub use error::LibraryError;
pub use library::{GameLibrary, LibraryPaths};
