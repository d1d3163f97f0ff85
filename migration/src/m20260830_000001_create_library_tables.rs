use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, TransactionTrait};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // 开启事务，保证所有建表操作的原子性
        let txn = conn.begin().await?;

        // 1. 合集表：每个模拟系统对应一个合集，identifier 为系统原始标识
        txn.execute_unprepared(
            r#"CREATE TABLE IF NOT EXISTS "collections" (
                "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
                "identifier" TEXT NOT NULL UNIQUE,
                "name" TEXT NOT NULL,
                "created_at" INTEGER DEFAULT (strftime('%s', 'now'))
            )"#,
        )
        .await?;

        // 2. 核心 games 表（game_settings 以 JSON 列存储）
        txn.execute_unprepared(
            r#"CREATE TABLE IF NOT EXISTS "games" (
                "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
                "identifier" TEXT NOT NULL,
                "filename" TEXT NOT NULL,
                "name" TEXT NOT NULL,
                "game_type" TEXT NOT NULL,
                "artwork_url" TEXT,
                "game_settings" TEXT,
                "played_date" INTEGER,
                "collection_id" INTEGER,
                "created_at" INTEGER DEFAULT (strftime('%s', 'now')),
                "updated_at" INTEGER DEFAULT (strftime('%s', 'now')),
                FOREIGN KEY("collection_id") REFERENCES "collections"("id") ON DELETE SET NULL
            )"#,
        )
        .await?;

        txn.execute_unprepared(
            r#"CREATE INDEX IF NOT EXISTS "idx_games_identifier" ON "games" ("identifier")"#,
        )
        .await?;
        txn.execute_unprepared(
            r#"CREATE INDEX IF NOT EXISTS "idx_games_collection" ON "games" ("collection_id")"#,
        )
        .await?;

        // 3. 即时存档表（记录持有对 games 的回引用，删除游戏前需先删除这些记录）
        txn.execute_unprepared(
            r#"CREATE TABLE IF NOT EXISTS "save_states" (
                "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
                "game_id" INTEGER NOT NULL,
                "filename" TEXT NOT NULL,
                "created_at" INTEGER DEFAULT (strftime('%s', 'now')),
                FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE
            )"#,
        )
        .await?;

        // 4. 会员名单缓存表
        txn.execute_unprepared(
            r#"CREATE TABLE IF NOT EXISTS "patrons" (
                "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
                "identifier" TEXT NOT NULL UNIQUE,
                "name" TEXT
            )"#,
        )
        .await?;

        // 5. 用户设置表（单行，ID 固定为 1）
        txn.execute_unprepared(
            r#"CREATE TABLE IF NOT EXISTS "user" (
                "id" INTEGER PRIMARY KEY,
                "games_dir" TEXT,
                "should_fetch_patrons" INTEGER
            )"#,
        )
        .await?;

        txn.commit().await?;

        println!("[MIGRATION] v1 baseline schema created successfully");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("PRAGMA foreign_keys = OFF").await?;
        conn.execute_unprepared(r#"DROP TABLE IF EXISTS "save_states""#)
            .await?;
        conn.execute_unprepared(r#"DROP TABLE IF EXISTS "games""#)
            .await?;
        conn.execute_unprepared(r#"DROP TABLE IF EXISTS "collections""#)
            .await?;
        conn.execute_unprepared(r#"DROP TABLE IF EXISTS "patrons""#)
            .await?;
        conn.execute_unprepared(r#"DROP TABLE IF EXISTS "user""#)
            .await?;
        conn.execute_unprepared("PRAGMA foreign_keys = ON").await?;

        Ok(())
    }
}
