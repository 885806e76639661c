use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Set};

use crate::entity::{Attendance, attendance};
use crate::meraki::NetworkClient;

/// 行键中的网络名，取前 31 个字符
pub fn worksheet_name(network_name: &str) -> String {
    network_name.chars().take(31).collect()
}

/// 由客户端信息和当日用量组装一行
pub fn attendance_row(
    network_name: &str,
    date: &str,
    client: &NetworkClient,
    usage: i64,
) -> attendance::Model {
    attendance::Model {
        network_name: network_name.to_string(),
        date: date.to_string(),
        description: client.description_or_empty(),
        user: client.user.clone(),
        usage,
        meraki_id: client.id.clone(),
        mac: client.mac.clone(),
        ip: client.ip.clone(),
    }
}

/// 按 (NetworkName, Date, MerakiID) 插入或覆盖非键字段
pub async fn upsert_attendance<C: ConnectionTrait>(
    db: &C,
    row: attendance::Model,
) -> Result<(), DbErr> {
    let active = attendance::ActiveModel {
        network_name: Set(row.network_name),
        date: Set(row.date),
        description: Set(row.description),
        user: Set(row.user),
        usage: Set(row.usage),
        meraki_id: Set(row.meraki_id),
        mac: Set(row.mac),
        ip: Set(row.ip),
    };

    Attendance::insert(active)
        .on_conflict(
            OnConflict::columns([
                attendance::Column::NetworkName,
                attendance::Column::Date,
                attendance::Column::MerakiId,
            ])
            .update_columns([
                attendance::Column::Description,
                attendance::Column::User,
                attendance::Column::Usage,
                attendance::Column::Mac,
                attendance::Column::Ip,
            ])
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(())
}
