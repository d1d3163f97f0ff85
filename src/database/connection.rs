use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Establish a SeaORM database connection.
pub async fn establish_connection(db_path: &Path) -> Result<DatabaseConnection, DbErr> {
    // 1. 确保数据库所在的目录存在
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DbErr::Conn(RuntimeErr::Internal(format!("无法创建数据库目录: {}", e)))
        })?;
    }

    // 2. 使用 `url` crate 安全地构建连接字符串
    let db_url = Url::from_file_path(db_path).map_err(|_| {
        DbErr::Conn(RuntimeErr::Internal(format!(
            "Invalid database path: {}",
            db_path.display()
        )))
    })?;

    // 注意：对于本地文件，sqlite 驱动通常期望的格式是 sqlite:path (没有 //)
    // 但 sqlx-sqlite 对 sqlite:// 也有很好的兼容性。更通用的写法是直接用路径。
    let connection_string = format!("sqlite:{}?mode=rwc", db_url.path());

    connect_with_options(connection_string).await
}

/// 建立内存数据库连接（测试与一次性工具使用）
pub async fn establish_in_memory_connection() -> Result<DatabaseConnection, DbErr> {
    connect_with_options("sqlite::memory:".to_string()).await
}

async fn connect_with_options(connection_string: String) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(connection_string);
    options
        .max_connections(1) // 对于本地 SQLite，连接池大小为 1 即可
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    Database::connect(options).await
}

/// 关闭数据库连接
pub async fn close_connection(conn: DatabaseConnection) -> Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}
