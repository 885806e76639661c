use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// 连接考勤库。表结构由数据库侧维护，这里不做任何建表或迁移。
pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .with_context(|| format!("无法连接考勤数据库: {}", redact(database_url)))?;

    info!("✅ 已连接考勤数据库: {}", redact(database_url));
    Ok(db)
}

/// 隐去连接串中的密码
fn redact(database_url: &str) -> String {
    let Some((scheme, rest)) = database_url.split_once("://") else {
        return database_url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return database_url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
        None => database_url.to_string(),
    }
}
