//! 游戏库集成测试：导入、内部名读取、设置叠加、删除级联

use std::fs;
use std::path::PathBuf;

use sha1::{Digest, Sha1};
use tempfile::TempDir;

use ember_manager_lib::database::connection::establish_in_memory_connection;
use ember_manager_lib::database::dto::{InsertGameData, UpdateGameData};
use ember_manager_lib::database::repository::collections_repository::CollectionsRepository;
use ember_manager_lib::database::repository::games_repository::{
    GamesRepository, SortOption, SortOrder,
};
use ember_manager_lib::database::repository::settings_repository::SettingsRepository;
use ember_manager_lib::database::repository::save_states_repository::SaveStatesRepository;
use ember_manager_lib::entity::game_settings::GameSettings;
use ember_manager_lib::entity::game_system::GameSystem;
use ember_manager_lib::library::bridge::MelonDsBridge;
use ember_manager_lib::{GameLibrary, LibraryPaths};
use migration::{Migrator, MigratorTrait};

async fn setup_library() -> (GameLibrary, TempDir) {
    let temp = tempfile::tempdir().unwrap();

    let conn = establish_in_memory_connection().await.unwrap();
    Migrator::up(&conn, None).await.unwrap();

    let paths = LibraryPaths {
        db_path: temp.path().join("library.db"),
        games_dir: temp.path().join("Games"),
        artwork_dir: temp.path().join("Artwork"),
        save_states_dir: temp.path().join("Save States"),
        melon_ds_system_dir: temp.path().join("MelonDS"),
    };

    fs::create_dir_all(&paths.games_dir).unwrap();
    fs::create_dir_all(&paths.artwork_dir).unwrap();
    fs::create_dir_all(&paths.save_states_dir).unwrap();

    let melon_ds = MelonDsBridge::new(&paths.melon_ds_system_dir);
    (GameLibrary::with_connection(conn, paths, melon_ds), temp)
}

fn write_source_file(temp: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// 构造一个 N64 ROM：0x20 字节文件头，随后是 0x14 字节的内部名
fn n64_rom_bytes(internal_name: &str) -> Vec<u8> {
    let mut bytes = vec![0u8; 0x20];
    let mut name_field = [b' '; 0x14];
    name_field[..internal_name.len()].copy_from_slice(internal_name.as_bytes());
    bytes.extend_from_slice(&name_field);
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}

fn sha1_hex(contents: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(contents);
    hex::encode(hasher.finalize())
}

// ==================== 导入 ====================

#[tokio::test]
async fn import_creates_game_and_collection() {
    let (library, temp) = setup_library().await;

    let contents = b"gba rom contents";
    let source = write_source_file(&temp, "Pocket Quest.gba", contents);

    let game = library.import_game(&source).await.unwrap();

    assert_eq!(game.identifier, sha1_hex(contents));
    assert_eq!(game.filename, format!("{}.gba", game.identifier));
    assert_eq!(game.name, "Pocket Quest");
    assert_eq!(game.game_type, "com.rileytestut.delta.game.gba");
    assert!(library.file_url(&game).is_file());

    let collection = CollectionsRepository::find_by_id(library.db(), game.collection_id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(collection.identifier, "com.rileytestut.delta.game.gba");
}

#[tokio::test]
async fn import_rejects_unknown_extension() {
    let (library, temp) = setup_library().await;
    let source = write_source_file(&temp, "notes.txt", b"not a game");

    let result = library.import_game(&source).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn import_replaces_record_with_same_identifier() {
    let (library, temp) = setup_library().await;

    let contents = b"identical contents";
    let first = write_source_file(&temp, "First Name.gba", contents);
    let second = write_source_file(&temp, "Second Name.gba", contents);

    let old = library.import_game(&first).await.unwrap();
    let new = library.import_game(&second).await.unwrap();

    assert_eq!(old.identifier, new.identifier);
    assert_ne!(old.id, new.id);
    assert_eq!(GamesRepository::count(library.db()).await.unwrap(), 1);

    // 替换期间文件级联被抑制，ROM 文件归新记录所有
    assert!(library.file_url(&new).is_file());
}

#[tokio::test]
async fn import_directory_skips_unrecognized_files() {
    let (library, temp) = setup_library().await;

    let scan_dir = temp.path().join("incoming");
    fs::create_dir_all(&scan_dir).unwrap();
    fs::write(scan_dir.join("one.nes"), b"nes one").unwrap();
    fs::write(scan_dir.join("two.gbc"), b"gbc two").unwrap();
    fs::write(scan_dir.join("readme.txt"), b"skip me").unwrap();

    let imported = library.import_directory(&scan_dir).await.unwrap();
    assert_eq!(imported.len(), 2);
    assert_eq!(GamesRepository::count(library.db()).await.unwrap(), 2);
}

// ==================== 内部 ROM 名 ====================

#[tokio::test]
async fn internal_name_is_read_from_header() {
    let (library, temp) = setup_library().await;

    let rom = n64_rom_bytes("DONKEY KONG 64");
    let source = write_source_file(&temp, "dk64.n64", &rom);
    let game = library.import_game(&source).await.unwrap();

    assert_eq!(
        library.internal_name(&game),
        Some("DONKEY KONG 64".to_string())
    );
}

#[tokio::test]
async fn internal_name_is_none_for_other_systems() {
    let (library, temp) = setup_library().await;

    let source = write_source_file(&temp, "game.gba", b"gba rom");
    let game = library.import_game(&source).await.unwrap();

    assert_eq!(library.internal_name(&game), None);
}

#[tokio::test]
async fn internal_name_is_none_when_file_missing() {
    let (library, temp) = setup_library().await;

    let rom = n64_rom_bytes("ZELDA");
    let source = write_source_file(&temp, "zelda.n64", &rom);
    let game = library.import_game(&source).await.unwrap();

    fs::remove_file(library.file_url(&game)).unwrap();
    assert_eq!(library.internal_name(&game), None);
}

// ==================== 设置叠加 ====================

#[tokio::test]
async fn settings_default_opengl_for_dk64() {
    let (library, temp) = setup_library().await;

    let rom = n64_rom_bytes("DONKEY KONG 64");
    let source = write_source_file(&temp, "dk64.n64", &rom);
    let game = library.import_game(&source).await.unwrap();

    assert_eq!(library.effective_settings(&game).opengl_es2, Some(true));
}

#[tokio::test]
async fn settings_no_default_for_other_n64_games() {
    let (library, temp) = setup_library().await;

    let rom = n64_rom_bytes("SUPER MARIO 64");
    let source = write_source_file(&temp, "sm64.n64", &rom);
    let game = library.import_game(&source).await.unwrap();

    assert_eq!(library.effective_settings(&game).opengl_es2, None);
}

#[tokio::test]
async fn stored_settings_override_defaults() {
    let (library, temp) = setup_library().await;

    let rom = n64_rom_bytes("DONKEY KONG 64");
    let source = write_source_file(&temp, "dk64.n64", &rom);
    let game = library.import_game(&source).await.unwrap();

    let game = library
        .set_settings(
            game.id,
            GameSettings {
                opengl_es2: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // 显式存储的 false 优先于默认 true
    assert_eq!(library.effective_settings(&game).opengl_es2, Some(false));
}

#[tokio::test]
async fn empty_settings_are_stored_as_null() {
    let (library, temp) = setup_library().await;

    let source = write_source_file(&temp, "game.gba", b"gba rom");
    let game = library.import_game(&source).await.unwrap();

    let game = library
        .set_settings(
            game.id,
            GameSettings {
                opengl_es2: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(game.game_settings.is_some());

    let game = library
        .set_settings(game.id, GameSettings::default())
        .await
        .unwrap();
    assert!(game.game_settings.is_none());
}

// ==================== 删除级联 ====================

#[tokio::test]
async fn delete_removes_row_and_file() {
    let (library, temp) = setup_library().await;

    let source = write_source_file(&temp, "game.gba", b"gba rom");
    let game = library.import_game(&source).await.unwrap();
    let rom_path = library.file_url(&game);

    assert!(library.delete_game(game.id).await.unwrap());
    assert!(!rom_path.exists());
    assert!(GamesRepository::find_by_id(library.db(), game.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn delete_missing_game_returns_false() {
    let (library, _temp) = setup_library().await;
    assert!(!library.delete_game(999).await.unwrap());
}

#[tokio::test]
async fn delete_last_game_removes_collection() {
    let (library, temp) = setup_library().await;

    let source = write_source_file(&temp, "game.gba", b"gba rom");
    let game = library.import_game(&source).await.unwrap();
    let collection_id = game.collection_id.unwrap();

    library.delete_game(game.id).await.unwrap();

    assert!(CollectionsRepository::find_by_id(library.db(), collection_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn delete_keeps_collection_with_remaining_games() {
    let (library, temp) = setup_library().await;

    let first = write_source_file(&temp, "one.gba", b"rom one");
    let second = write_source_file(&temp, "two.gba", b"rom two");
    let game_one = library.import_game(&first).await.unwrap();
    let game_two = library.import_game(&second).await.unwrap();
    assert_eq!(game_one.collection_id, game_two.collection_id);

    library.delete_game(game_one.id).await.unwrap();

    assert!(
        CollectionsRepository::find_by_id(library.db(), game_two.collection_id.unwrap())
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn delete_removes_save_states() {
    let (library, temp) = setup_library().await;

    let source = write_source_file(&temp, "game.gba", b"gba rom");
    let game = library.import_game(&source).await.unwrap();

    let state = SaveStatesRepository::insert(library.db(), game.id, "slot0.sav")
        .await
        .unwrap();
    let state_path = library.save_state_path(&state.filename);
    fs::write(&state_path, b"save data").unwrap();

    library.delete_game(game.id).await.unwrap();

    assert!(!state_path.exists());
    assert_eq!(
        SaveStatesRepository::count_by_game(library.db(), game.id)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn delete_skips_side_effects_for_empty_filename() {
    let (library, _temp) = setup_library().await;

    // 空文件名会解析为游戏库根目录，副作用必须全部跳过
    let game = GamesRepository::insert(
        library.db(),
        InsertGameData {
            identifier: "merge-placeholder".to_string(),
            filename: String::new(),
            name: "占位记录".to_string(),
            game_type: GameSystem::Gba.as_str().to_string(),
            artwork_url: None,
            game_settings: None,
            collection_id: None,
        },
    )
    .await
    .unwrap();

    assert!(library.delete_game(game.id).await.unwrap());
    assert!(library.games_dir().is_dir());
}

#[tokio::test]
async fn delete_skips_side_effects_while_inserting() {
    let (library, temp) = setup_library().await;

    let source = write_source_file(&temp, "game.gba", b"gba rom");
    let game = library.import_game(&source).await.unwrap();
    let rom_path = library.file_url(&game);

    library.mark_inserting(&game.identifier);
    assert!(library.delete_game(game.id).await.unwrap());
    library.unmark_inserting(&game.identifier);

    // 行被删除但文件保留，归接管的新记录所有
    assert!(rom_path.is_file());
}

#[tokio::test]
async fn delete_never_removes_directories() {
    let (library, _temp) = setup_library().await;

    let dir_name = "nested";
    fs::create_dir_all(library.games_dir().join(dir_name)).unwrap();

    let game = GamesRepository::insert(
        library.db(),
        InsertGameData {
            identifier: "dir-shaped".to_string(),
            filename: dir_name.to_string(),
            name: "目录同名记录".to_string(),
            game_type: GameSystem::Gba.as_str().to_string(),
            artwork_url: None,
            game_settings: None,
            collection_id: None,
        },
    )
    .await
    .unwrap();

    assert!(library.delete_game(game.id).await.unwrap());
    assert!(library.games_dir().join(dir_name).is_dir());
}

// ==================== 查询与设置 ====================

#[tokio::test]
async fn find_all_sorts_by_name() {
    let (library, temp) = setup_library().await;

    for name in ["Charlie", "Alpha", "Bravo"] {
        let source = write_source_file(
            &temp,
            &format!("{}.gba", name),
            format!("rom {}", name).as_bytes(),
        );
        library.import_game(&source).await.unwrap();
    }

    let games = GamesRepository::find_all(library.db(), SortOption::Name, SortOrder::Asc)
        .await
        .unwrap();
    let names: Vec<&str> = games.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Bravo", "Charlie"]);
}

#[tokio::test]
async fn games_dir_setting_ignores_blank_values() {
    let (library, _temp) = setup_library().await;

    SettingsRepository::set_games_dir(library.db(), "   ".to_string())
        .await
        .unwrap();
    assert_eq!(SettingsRepository::get_games_dir(library.db()).await.unwrap(), None);

    SettingsRepository::set_games_dir(library.db(), "/mnt/roms".to_string())
        .await
        .unwrap();
    assert_eq!(
        SettingsRepository::get_games_dir(library.db()).await.unwrap(),
        Some("/mnt/roms".to_string())
    );
}

// ==================== 最近游玩 ====================

#[tokio::test]
async fn recently_played_is_capped_and_sorted() {
    let (library, temp) = setup_library().await;

    let names = ["Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot"];
    for name in names {
        let source = write_source_file(
            &temp,
            &format!("{}.gba", name),
            format!("rom {}", name).as_bytes(),
        );
        let game = library.import_game(&source).await.unwrap();

        // 固定时间戳，让排序只由名称决定
        GamesRepository::update(
            library.db(),
            game.id,
            UpdateGameData {
                played_date: Some(Some(1_000)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let recent = GamesRepository::recently_played(library.db())
        .await
        .unwrap();

    assert_eq!(recent.len(), 4);
    // 时间戳相同的批次按名称升序稳定排序
    let recent_names: Vec<&str> = recent.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(recent_names, ["Alpha", "Bravo", "Charlie", "Delta"]);
}
