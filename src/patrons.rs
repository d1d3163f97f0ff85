//! 会员名单
//!
//! manager 负责拉取与缓存替换，list 负责展示模型。

pub mod list;
pub mod manager;

pub use list::{FooterState, PatronListModel, Section, PATRONS_RELOAD_DELAY};
pub use manager::{PatronsFetchError, PatronsManager, PatronsSource};
