//! 会员名单展示模型
//!
//! 两个分区：介绍/订阅分区没有条目，名单分区展示已缓存的可展示
//! 会员。出现时与收到"名单已更新"事件时刷新，后者带固定的半秒
//! 防抖再重载。

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::database::repository::patrons_repository::PatronsRepository;
use crate::database::repository::settings_repository::SettingsRepository;
use crate::entity::patrons;
use crate::error::LibraryError;
use crate::patrons::manager::{PatronsFetchError, PatronsManager, PatronsSource};

/// "名单已更新"事件触发重载前的防抖延迟
pub const PATRONS_RELOAD_DELAY: Duration = Duration::from_millis(500);

/// 名单页的分区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// 介绍与订阅入口，无条目
    About,
    /// 会员名单
    Patrons,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::About, Section::Patrons];
}

/// 页脚展示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterState {
    /// 拉取进行中
    Loading,
    /// 成功或无需展示
    Hidden,
    /// 拉取失败
    Error,
}

/// 会员名单展示模型
pub struct PatronListModel {
    manager: Arc<PatronsManager>,
    patrons: Vec<patrons::Model>,
}

impl PatronListModel {
    pub fn new(manager: Arc<PatronsManager>) -> Self {
        Self {
            manager,
            patrons: Vec::new(),
        }
    }

    pub fn patrons(&self) -> &[patrons::Model] {
        &self.patrons
    }

    /// 页面出现：打开拉取开关、触发更新、重载名单
    pub async fn view_will_appear(
        &mut self,
        source: &impl PatronsSource,
    ) -> Result<(), LibraryError> {
        SettingsRepository::set_should_fetch_patrons(self.manager.db(), true).await?;

        let _ = self.manager.update_patrons_if_needed(source).await;

        self.reload().await
    }

    /// 从缓存重载可展示名单
    pub async fn reload(&mut self) -> Result<(), LibraryError> {
        self.patrons = PatronsRepository::find_displayable(self.manager.db()).await?;
        Ok(())
    }

    /// "名单已更新"事件：防抖后重载
    pub async fn handle_patrons_updated(&mut self) -> Result<(), LibraryError> {
        sleep(PATRONS_RELOAD_DELAY).await;
        self.reload().await
    }

    pub fn number_of_sections(&self) -> usize {
        Section::ALL.len()
    }

    pub fn number_of_items(&self, section: Section) -> usize {
        match section {
            Section::About => 0,
            Section::Patrons => self.patrons.len(),
        }
    }

    /// 当前页脚状态
    pub fn footer_state(&self) -> FooterState {
        footer_state_for(
            self.manager.last_result().as_ref(),
            !self.patrons.is_empty(),
            cfg!(debug_assertions),
        )
    }
}

/// 页脚状态推导：进行中显示加载，成功隐藏；失败时若已有可展示
/// 的缓存则隐藏错误，调试构建下错误总是可见
pub fn footer_state_for(
    result: Option<&Result<(), PatronsFetchError>>,
    has_cached: bool,
    debug: bool,
) -> FooterState {
    match result {
        None => FooterState::Loading,
        Some(Ok(())) => FooterState::Hidden,
        Some(Err(_)) => {
            if has_cached && !debug {
                FooterState::Hidden
            } else {
                FooterState::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_shows_loading_while_fetching() {
        assert_eq!(footer_state_for(None, false, false), FooterState::Loading);
        assert_eq!(footer_state_for(None, true, false), FooterState::Loading);
    }

    #[test]
    fn footer_hidden_on_success() {
        assert_eq!(
            footer_state_for(Some(&Ok(())), false, false),
            FooterState::Hidden
        );
    }

    #[test]
    fn footer_error_suppressed_by_cached_items() {
        let err = Err(PatronsFetchError::Fetch("timeout".into()));

        assert_eq!(footer_state_for(Some(&err), false, false), FooterState::Error);
        assert_eq!(footer_state_for(Some(&err), true, false), FooterState::Hidden);
    }

    #[test]
    fn footer_error_always_visible_in_debug() {
        let err = Err(PatronsFetchError::Fetch("timeout".into()));

        assert_eq!(footer_state_for(Some(&err), true, true), FooterState::Error);
    }
}
