//! `SeaORM` Entity for transactions (peer-to-peer transfer records).
//!
//! Append-only: the initial migration installs a trigger that rejects
//! UPDATE and DELETE on this table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub amount: i64,
    pub created_at: DateTimeWithTimeZone,
}

/// Both relations point at `users`; there is no unambiguous `Related`
/// impl, so queries name the side they want explicitly.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SenderId",
        to = "super::users::Column::Id"
    )]
    Sender,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ReceiverId",
        to = "super::users::Column::Id"
    )]
    Receiver,
}

impl ActiveModelBehavior for ActiveModel {}
