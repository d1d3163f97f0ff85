//! 预导入模块
//!
//! 提供常用类型的快捷导入。

// === SeaORM 实体 ===
pub use super::collections::Entity as Collections;
pub use super::games::Entity as Games;
pub use super::patrons::Entity as Patrons;
pub use super::save_states::Entity as SaveStates;
pub use super::user::Entity as User;
