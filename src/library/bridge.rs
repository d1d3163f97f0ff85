//! melonDS 平台桥接
//!
//! 暴露 DS/DSi BIOS 与固件的固定文件位置。桥接对象在启动时构造
//! 并显式传入 GameLibrary，文件本身由模拟核心维护，这里只负责
//! 路径约定。

use std::path::{Path, PathBuf};

/// melonDS BIOS/固件路径桥接
#[derive(Debug, Clone)]
pub struct MelonDsBridge {
    system_dir: PathBuf,
}

impl MelonDsBridge {
    pub fn new(system_dir: impl Into<PathBuf>) -> Self {
        Self {
            system_dir: system_dir.into(),
        }
    }

    pub fn system_dir(&self) -> &Path {
        &self.system_dir
    }

    // === DS ===

    pub fn bios7_url(&self) -> PathBuf {
        self.system_dir.join("bios7.bin")
    }

    pub fn bios9_url(&self) -> PathBuf {
        self.system_dir.join("bios9.bin")
    }

    pub fn firmware_url(&self) -> PathBuf {
        self.system_dir.join("firmware.bin")
    }

    // === DSi ===

    pub fn dsi_bios7_url(&self) -> PathBuf {
        self.system_dir.join("dsi_bios7.bin")
    }

    pub fn dsi_bios9_url(&self) -> PathBuf {
        self.system_dir.join("dsi_bios9.bin")
    }

    pub fn dsi_firmware_url(&self) -> PathBuf {
        self.system_dir.join("dsi_firmware.bin")
    }
}
