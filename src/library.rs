//! 游戏库门面
//!
//! GameLibrary 持有数据库连接与各类根目录，承担所有涉及文件系统
//! 的领域操作：封面 URL 规范化、设置叠加、内部名读取、导入与
//! 删除级联。协作对象（melonDS 桥接）在构造时显式传入，不使用
//! 全局单例。

pub mod artwork;
pub mod bridge;
pub mod deletion;
pub mod import;
pub mod internal_name;
pub mod settings;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use sea_orm::DatabaseConnection;

use crate::database::connection::establish_connection;
use crate::database::repository::settings_repository::SettingsRepository;
use crate::entity::games;
use crate::error::LibraryError;
use crate::sync::SyncContext;
use bridge::MelonDsBridge;
use migration::{Migrator, MigratorTrait};

/// 游戏库各根目录
#[derive(Debug, Clone)]
pub struct LibraryPaths {
    pub db_path: PathBuf,
    pub games_dir: PathBuf,
    pub artwork_dir: PathBuf,
    pub save_states_dir: PathBuf,
    /// melonDS BIOS/固件所在目录
    pub melon_ds_system_dir: PathBuf,
}

impl LibraryPaths {
    /// 根据 ember-path 的默认规则推导所有目录
    pub fn default_paths() -> Result<Self, LibraryError> {
        let base = ember_path::get_base_data_dir().map_err(LibraryError::InvalidPath)?;

        Ok(Self {
            db_path: base
                .join(ember_path::DB_DATA_DIR)
                .join(ember_path::DB_FILE_NAME),
            games_dir: base.join(ember_path::GAMES_DIR),
            artwork_dir: base.join(ember_path::ARTWORK_DIR),
            save_states_dir: base.join(ember_path::SAVE_STATES_DIR),
            melon_ds_system_dir: base.join("MelonDS"),
        })
    }
}

/// 游戏库门面
pub struct GameLibrary {
    db: DatabaseConnection,
    games_dir: PathBuf,
    artwork_dir: PathBuf,
    save_states_dir: PathBuf,
    melon_ds: MelonDsBridge,

    /// 正在插入的 identifier 集合（合并冲突期间抑制删除级联）
    pending_inserts: Mutex<HashSet<String>>,
    /// 内部 ROM 名缓存，按游戏 ID 记忆化
    internal_names: Mutex<HashMap<i32, Option<String>>>,
}

impl GameLibrary {
    /// 打开游戏库：建立连接、执行迁移、准备目录
    pub async fn open(paths: LibraryPaths) -> Result<Self, LibraryError> {
        let conn = establish_connection(&paths.db_path).await?;
        log::info!("数据库连接建立成功");

        Migrator::up(&conn, None).await?;
        log::info!("数据库迁移完成");

        let mut paths = paths;

        // 用户可在设置中覆盖游戏库目录
        if let Some(custom) = SettingsRepository::get_games_dir(&conn).await? {
            paths.games_dir = PathBuf::from(custom);
        }

        for dir in [
            &paths.games_dir,
            &paths.artwork_dir,
            &paths.save_states_dir,
        ] {
            fs::create_dir_all(dir)?;
        }

        let melon_ds = MelonDsBridge::new(&paths.melon_ds_system_dir);
        Ok(Self::with_connection(conn, paths, melon_ds))
    }

    /// 使用现成的连接构造（测试与嵌入场景）
    pub fn with_connection(
        db: DatabaseConnection,
        paths: LibraryPaths,
        melon_ds: MelonDsBridge,
    ) -> Self {
        Self {
            db,
            games_dir: paths.games_dir,
            artwork_dir: paths.artwork_dir,
            save_states_dir: paths.save_states_dir,
            melon_ds,
            pending_inserts: Mutex::new(HashSet::new()),
            internal_names: Mutex::new(HashMap::new()),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn games_dir(&self) -> &Path {
        &self.games_dir
    }

    pub fn artwork_dir(&self) -> &Path {
        &self.artwork_dir
    }

    pub fn save_states_dir(&self) -> &Path {
        &self.save_states_dir
    }

    pub fn melon_ds(&self) -> &MelonDsBridge {
        &self.melon_ds
    }

    /// 游戏 ROM 文件的绝对路径：游戏库根目录 + 存储的文件名
    pub fn file_url(&self, game: &games::Model) -> PathBuf {
        self.games_dir.join(&game.filename)
    }

    /// 即时存档文件的绝对路径
    pub fn save_state_path(&self, filename: &str) -> PathBuf {
        self.save_states_dir.join(filename)
    }

    /// 同步层使用的上下文句柄
    pub fn sync_context(&self) -> SyncContext<'_> {
        SyncContext {
            games_dir: &self.games_dir,
            artwork_dir: &self.artwork_dir,
            melon_ds: &self.melon_ds,
        }
    }

    // ==================== 合并冲突插入跟踪 ====================

    /// 标记某个 identifier 正在插入（替换旧记录期间调用）
    pub fn mark_inserting(&self, identifier: &str) {
        self.pending_inserts.lock().insert(identifier.to_string());
    }

    /// 插入完成后取消标记
    pub fn unmark_inserting(&self, identifier: &str) {
        self.pending_inserts.lock().remove(identifier);
    }

    /// 某个 identifier 是否正处于插入过程中
    pub fn is_inserting(&self, identifier: &str) -> bool {
        self.pending_inserts.lock().contains(identifier)
    }
}
