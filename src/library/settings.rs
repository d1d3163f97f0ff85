//! 游戏设置叠加
//!
//! 读取有效设置时在存储值之上叠加默认值，显式存储的值总是优先。

use crate::database::dto::UpdateGameData;
use crate::database::repository::games_repository::GamesRepository;
use crate::entity::game_settings::GameSettings;
use crate::entity::game_system::GameSystem;
use crate::entity::games;
use crate::error::LibraryError;
use crate::library::GameLibrary;

/// 内部名包含此子串的 N64 游戏默认启用 OpenGL ES 2.0 兼容模式
pub const OPENGL_ES2_TRIGGER: &str = "DONKEY KONG 64";

impl GameLibrary {
    /// 有效设置：存储值叠加默认值，存储值优先
    pub fn effective_settings(&self, game: &games::Model) -> GameSettings {
        let mut settings = game.game_settings.clone().unwrap_or_default();

        if settings.opengl_es2.is_none() && self.default_opengl_es2(game) {
            settings.opengl_es2 = Some(true);
        }

        settings
    }

    fn default_opengl_es2(&self, game: &games::Model) -> bool {
        if game.game_type != GameSystem::N64.as_str() {
            return false;
        }

        self.internal_name(game)
            .map(|name| name.contains(OPENGL_ES2_TRIGGER))
            .unwrap_or(false)
    }

    /// 写入游戏设置；空设置存储为 NULL 而非空容器
    pub async fn set_settings(
        &self,
        game_id: i32,
        settings: GameSettings,
    ) -> Result<games::Model, LibraryError> {
        let stored = if settings.is_empty() {
            None
        } else {
            Some(settings)
        };

        let updates = UpdateGameData {
            game_settings: Some(stored),
            ..Default::default()
        };

        Ok(GamesRepository::update(self.db(), game_id, updates).await?)
    }
}
