//! 内部 ROM 名读取
//!
//! N64 ROM 在文件头固定偏移处带有内部名称，按游戏 ID 记忆化，
//! 读取失败只记录日志，调用方拿到 None。
//! 偏移量与存量行为逐位兼容，不可更改。

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::entity::game_system::GameSystem;
use crate::entity::games;
use crate::library::GameLibrary;

/// 内部名在 ROM 文件中的偏移
pub const INTERNAL_NAME_OFFSET: u64 = 0x20;
/// 内部名字段长度
pub const INTERNAL_NAME_LENGTH: u64 = 0x14;

impl GameLibrary {
    /// 懒读取游戏的内部 ROM 名
    ///
    /// 仅对 N64 有意义；文件无法打开、读取失败或非 UTF-8 时返回 None。
    pub fn internal_name(&self, game: &games::Model) -> Option<String> {
        if game.game_type != GameSystem::N64.as_str() {
            return None;
        }

        if let Some(cached) = self.internal_names.lock().get(&game.id) {
            return cached.clone();
        }

        let name = match read_internal_name(&self.file_url(game)) {
            Ok(name) => name,
            Err(e) => {
                log::error!("读取内部 ROM 名失败: {}", e);
                None
            }
        };

        self.internal_names.lock().insert(game.id, name.clone());
        name
    }
}

fn read_internal_name(path: &Path) -> io::Result<Option<String>> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(INTERNAL_NAME_OFFSET))?;

    let mut buffer = Vec::with_capacity(INTERNAL_NAME_LENGTH as usize);
    file.take(INTERNAL_NAME_LENGTH).read_to_end(&mut buffer)?;

    // 非 UTF-8 内容视为"无内部名"，不算错误
    Ok(std::str::from_utf8(&buffer)
        .ok()
        .map(|name| name.trim().to_string()))
}
