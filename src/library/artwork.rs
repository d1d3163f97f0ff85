//! 封面 URL 规范化
//!
//! 本地封面只存储文件名，读取时相对当前游戏库根目录重新解析，
//! 保证沙盒/数据目录迁移后绝对路径仍然有效。远程封面中已失效的
//! 旧图床域名在读取时重写到新域名。常量与存量数据逐位兼容，
//! 不可更改。

use std::path::{Path, PathBuf};

use url::Url;

use crate::database::dto::UpdateGameData;
use crate::database::repository::games_repository::GamesRepository;
use crate::entity::games;
use crate::error::LibraryError;
use crate::library::GameLibrary;

/// 已失效的旧图床域名
const RETIRED_ARTWORK_HOSTS: [&str; 2] = ["img.gamefaqs.net", "gamefaqs1.cbsistatic.com"];
/// 替换域名与路径前缀
const REPLACEMENT_ARTWORK_HOST: &str = "gamefaqs.gamespot.com";
const REPLACEMENT_PATH_PREFIX: &str = "/a";

/// 规范化后的封面地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtworkUrl {
    /// 本地文件（已解析为绝对路径）
    Local(PathBuf),
    /// 远程地址
    Remote(Url),
}

/// 写入规范化：本地封面只保留文件名，远程地址原样存储
pub fn normalize_for_write(value: &ArtworkUrl) -> String {
    match value {
        ArtworkUrl::Local(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        ArtworkUrl::Remote(url) => url.to_string(),
    }
}

/// 读取规范化：相对当前游戏库根目录解析本地封面，重写失效图床域名
pub fn resolve(stored: &str, games_dir: &Path) -> ArtworkUrl {
    if let Ok(url) = Url::parse(stored) {
        match url.scheme() {
            "http" | "https" => return ArtworkUrl::Remote(rewrite_retired_host(url)),
            "file" => {
                // 历史数据可能存有完整 file URL，降级为文件名后重新解析
                let filename = url
                    .path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .unwrap_or_default()
                    .to_string();
                return ArtworkUrl::Local(games_dir.join(filename));
            }
            _ => {}
        }
    }

    ArtworkUrl::Local(games_dir.join(stored))
}

/// 旧图床域名重写：换新域名、强制 https、路径加 "/a" 前缀。
/// 其他域名一律不动；重写失败时保留原地址。
fn rewrite_retired_host(url: Url) -> Url {
    let is_retired = url
        .host_str()
        .map(|host| {
            RETIRED_ARTWORK_HOSTS
                .iter()
                .any(|retired| host.eq_ignore_ascii_case(retired))
        })
        .unwrap_or(false);

    if !is_retired {
        return url;
    }

    let mut updated = url.clone();
    let new_path = format!("{}{}", REPLACEMENT_PATH_PREFIX, url.path());

    if updated.set_scheme("https").is_err() {
        return url;
    }
    if updated.set_host(Some(REPLACEMENT_ARTWORK_HOST)).is_err() {
        return url;
    }
    updated.set_path(&new_path);

    updated
}

impl GameLibrary {
    /// 读取游戏封面地址（已规范化）
    pub fn artwork_url(&self, game: &games::Model) -> Option<ArtworkUrl> {
        game.artwork_url
            .as_deref()
            .map(|stored| resolve(stored, self.games_dir()))
    }

    /// 设置游戏封面地址（写入前规范化），None 表示清除
    pub async fn set_artwork_url(
        &self,
        game_id: i32,
        value: Option<ArtworkUrl>,
    ) -> Result<games::Model, LibraryError> {
        let stored = value.as_ref().map(normalize_for_write);

        let updates = UpdateGameData {
            artwork_url: Some(stored),
            ..Default::default()
        };

        Ok(GamesRepository::update(self.db(), game_id, updates).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_artwork_resolves_against_current_root() {
        let stored = normalize_for_write(&ArtworkUrl::Local(PathBuf::from(
            "/old/sandbox/Games/cover.png",
        )));
        assert_eq!(stored, "cover.png");

        let resolved = resolve(&stored, Path::new("/new/sandbox/Games"));
        assert_eq!(
            resolved,
            ArtworkUrl::Local(PathBuf::from("/new/sandbox/Games/cover.png"))
        );
    }

    #[test]
    fn retired_hosts_are_rewritten() {
        for host in RETIRED_ARTWORK_HOSTS {
            let stored = format!("http://{}/box/5/1/2/12345_front.jpg", host);
            let resolved = resolve(&stored, Path::new("/tmp"));

            match resolved {
                ArtworkUrl::Remote(url) => {
                    assert_eq!(url.scheme(), "https");
                    assert_eq!(url.host_str(), Some("gamefaqs.gamespot.com"));
                    assert_eq!(url.path(), "/a/box/5/1/2/12345_front.jpg");
                }
                other => panic!("expected remote url, got {:?}", other),
            }
        }
    }

    #[test]
    fn other_hosts_are_untouched() {
        let stored = "https://example.com/box/cover.png";
        let resolved = resolve(stored, Path::new("/tmp"));
        assert_eq!(
            resolved,
            ArtworkUrl::Remote(Url::parse(stored).unwrap())
        );
    }

    #[test]
    fn legacy_file_urls_degrade_to_filename() {
        let resolved = resolve("file:///old/root/Games/cover.png", Path::new("/new/Games"));
        assert_eq!(
            resolved,
            ArtworkUrl::Local(PathBuf::from("/new/Games/cover.png"))
        );
    }
}
