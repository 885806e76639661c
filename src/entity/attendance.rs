use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 每个 (网络, 日期, 客户端) 一行
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Attendance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "NetworkName")]
    pub network_name: String,
    #[sea_orm(primary_key, auto_increment = false, column_name = "Date")]
    pub date: String, // 格式: YYYY-MM-DD
    #[sea_orm(column_name = "Description")]
    pub description: String,
    #[sea_orm(column_name = "User")]
    pub user: Option<String>,
    #[sea_orm(column_name = "Usage")]
    pub usage: i64,
    #[sea_orm(primary_key, auto_increment = false, column_name = "MerakiID")]
    pub meraki_id: String,
    #[sea_orm(column_name = "Mac")]
    pub mac: Option<String>,
    #[sea_orm(column_name = "IP")]
    pub ip: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
