//! Reservation table definition
//!
//! `CREATE TABLE IF NOT EXISTS`, so running it against an existing database
//! is a no-op. There is no migration history.

use sea_orm::sea_query::{ColumnDef, Expr, Table, TableCreateStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::debug;

use super::entities::reservation::{Column, Entity};
use crate::domain::DomainResult;

pub fn reservation_table() -> TableCreateStatement {
    Table::create()
        .table(Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(Column::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Column::Nombre).text().not_null())
        .col(ColumnDef::new(Column::Correo).text())
        .col(ColumnDef::new(Column::Telefono).text())
        .col(ColumnDef::new(Column::FechaLlegada).text())
        .col(ColumnDef::new(Column::FechaSalida).text())
        .col(ColumnDef::new(Column::Habitaciones).integer())
        .col(ColumnDef::new(Column::Total).double())
        .col(
            ColumnDef::new(Column::CreatedAt)
                .text()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

pub async fn ensure_schema(db: &DatabaseConnection) -> DomainResult<()> {
    let backend = db.get_database_backend();
    db.execute(backend.build(&reservation_table())).await?;
    debug!("Reservation table ensured");
    Ok(())
}
