use common::ordering::PositionUpdate;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::*;

/// Serialize appends and reorders on one collection until the surrounding
/// transaction ends. Plain reads are not blocked.
///
/// Row locks cannot guard an append to an empty table, so this locks the
/// table itself in a mode that conflicts only with other writers.
pub async fn lock_collection<E, C>(db: &C) -> Result<(), DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let table = E::default().table_name();
    db.execute_unprepared(&format!(
        "LOCK TABLE \"{table}\" IN SHARE ROW EXCLUSIVE MODE"
    ))
    .await?;
    Ok(())
}

/// Load a whole collection in display order, locking every row until the
/// surrounding transaction ends.
pub async fn load_locked<E, C>(
    db: &C,
    order_col: E::Column,
    id_col: E::Column,
) -> Result<Vec<E::Model>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    E::find()
        .order_by_asc(order_col)
        .order_by_asc(id_col)
        .lock(LockType::Update)
        .all(db)
        .await
}

/// All `display_order` values currently stored in a collection.
pub async fn current_orders<E, C>(db: &C, order_col: E::Column) -> Result<Vec<i32>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    E::find()
        .select_only()
        .column(order_col)
        .into_tuple::<i32>()
        .all(db)
        .await
}

/// Write a reconciled position set. Call inside a transaction so that the
/// batch is applied entirely or not at all.
pub async fn persist_positions<E, C>(
    db: &C,
    id_col: E::Column,
    order_col: E::Column,
    updates: &[PositionUpdate],
) -> Result<(), DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    for update in updates {
        E::update_many()
            .col_expr(order_col, Expr::value(update.display_order))
            .filter(id_col.eq(update.id))
            .exec(db)
            .await?;
    }
    Ok(())
}
