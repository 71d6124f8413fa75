//! Reservation entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reservas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub nombre: String,

    #[sea_orm(nullable)]
    pub correo: Option<String>,
    #[sea_orm(nullable)]
    pub telefono: Option<String>,
    #[sea_orm(nullable)]
    pub fecha_llegada: Option<String>,
    #[sea_orm(nullable)]
    pub fecha_salida: Option<String>,
    #[sea_orm(nullable)]
    pub habitaciones: Option<i32>,
    #[sea_orm(nullable)]
    pub total: Option<f64>,

    /// Stamped by SQLite (`CURRENT_TIMESTAMP`), never written by the ledger
    #[sea_orm(nullable)]
    pub created_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
