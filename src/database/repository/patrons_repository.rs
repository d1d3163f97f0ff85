//! 会员名单数据仓库

use crate::entity::patrons;
use crate::entity::prelude::*;
use sea_orm::*;
use serde::{Deserialize, Serialize};

/// 远端拉取到的单条会员记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatronRecord {
    pub identifier: String,
    pub name: Option<String>,
}

/// 会员名单数据仓库
pub struct PatronsRepository;

impl PatronsRepository {
    /// 用最新名单整体替换缓存（在事务中执行）
    pub async fn replace_all(
        db: &DatabaseConnection,
        records: Vec<PatronRecord>,
    ) -> Result<(), DbErr> {
        let txn = db.begin().await?;

        Patrons::delete_many().exec(&txn).await?;

        if !records.is_empty() {
            let models: Vec<patrons::ActiveModel> = records
                .into_iter()
                .map(|record| patrons::ActiveModel {
                    id: NotSet,
                    identifier: Set(record.identifier),
                    name: Set(record.name),
                })
                .collect();

            Patrons::insert_many(models).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// 获取可展示的会员（name 为空的记录没有展示意义，直接过滤）
    ///
    /// SQLite 的默认排序对大小写敏感，名称的不区分大小写排序
    /// 在应用层完成。
    pub async fn find_displayable(db: &DatabaseConnection) -> Result<Vec<patrons::Model>, DbErr> {
        let mut rows = Patrons::find()
            .filter(patrons::Column::Name.is_not_null())
            .all(db)
            .await?;

        rows.sort_by(|a, b| {
            let a_name = a.name.as_deref().unwrap_or_default().to_lowercase();
            let b_name = b.name.as_deref().unwrap_or_default().to_lowercase();
            a_name.cmp(&b_name)
        });

        Ok(rows)
    }

    /// 获取缓存的会员总数（含无名记录）
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Patrons::find().count(db).await
    }
}
