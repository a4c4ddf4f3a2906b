//! PostgreSQL-backed `OrderRepository`.
//!
//! Listings join `students` to attach the owner's name. Status and count
//! changes are single-row `UPDATE ... RETURNING` statements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OrderFilter, OrderRepository, OrderRepositoryError};
use crate::domain::{
    BagNumber, ClothesCount, NewOrder, Order, OrderCounts, OrderId, OrderStatus, StudentOrder,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewOrderRow, OrderRow};
use super::pool::{DbPool, PoolError};
use super::schema::{orders, students};

/// Diesel implementation of the order repository port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a repository backed by the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OrderRepositoryError {
    map_basic_pool_error(error, OrderRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OrderRepositoryError {
    map_basic_diesel_error(
        error,
        OrderRepositoryError::query,
        OrderRepositoryError::connection,
    )
}

fn parse_status(raw: &str) -> Result<OrderStatus, OrderRepositoryError> {
    OrderStatus::from_stored(raw)
        .ok_or_else(|| OrderRepositoryError::query(format!("stored order status `{raw}`")))
}

fn row_to_order(row: OrderRow) -> Result<Order, OrderRepositoryError> {
    Ok(Order {
        id: OrderId::new(row.id),
        bag_no: BagNumber::parse(&row.bag_no)
            .map_err(|err| OrderRepositoryError::query(format!("stored bag number: {err}")))?,
        number_of_clothes: ClothesCount::new(i64::from(row.number_of_clothes))
            .map_err(|err| OrderRepositoryError::query(format!("stored clothes count: {err}")))?,
        status: parse_status(&row.status)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Fold `(status, count)` groups into per-status totals.
fn fold_counts(groups: Vec<(String, i64)>) -> Result<OrderCounts, OrderRepositoryError> {
    groups
        .into_iter()
        .try_fold(OrderCounts::default(), |mut acc, (status, count)| {
            let count = u64::try_from(count)
                .map_err(|_| OrderRepositoryError::query("negative order count"))?;
            match parse_status(&status)? {
                OrderStatus::Pending => acc.pending_orders += count,
                OrderStatus::InProgress => acc.inprogress_orders += count,
                OrderStatus::Complete => acc.complete_orders += count,
            }
            acc.total_orders += count;
            Ok(acc)
        })
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn insert(&self, order: &NewOrder) -> Result<Order, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewOrderRow {
            bag_no: order.bag_no.as_str(),
            number_of_clothes: order.number_of_clothes.get(),
            status: order.status.as_str(),
            created_at: order.created_at,
            updated_at: order.created_at,
        };

        let row = diesel::insert_into(orders::table)
            .values(&new_row)
            .returning(OrderRow::as_returning())
            .get_result::<OrderRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_order(row)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = orders::table
            .find(id.get())
            .select(OrderRow::as_select())
            .first::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_order).transpose()
    }

    async fn update_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let target = orders::table
            .find(id.get())
            .filter(orders::status.eq(from.as_str()));
        let row = diesel::update(target)
            .set((
                orders::status.eq(to.as_str()),
                orders::updated_at.eq(updated_at),
            ))
            .returning(OrderRow::as_returning())
            .get_result::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_order).transpose()
    }

    async fn update_count(
        &self,
        id: OrderId,
        count: ClothesCount,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(orders::table.find(id.get()))
            .set((
                orders::number_of_clothes.eq(count.get()),
                orders::updated_at.eq(updated_at),
            ))
            .returning(OrderRow::as_returning())
            .get_result::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_order).transpose()
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<StudentOrder>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = orders::table
            .inner_join(students::table)
            .select((OrderRow::as_select(), students::name))
            .order((orders::created_at.desc(), orders::id.desc()))
            .into_boxed();
        if let Some(bag_no) = &filter.bag_no {
            query = query.filter(orders::bag_no.eq(bag_no.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(orders::status.eq(status.as_str()));
        }
        if let Some(limit) = filter.limit {
            let limit = i64::try_from(limit)
                .map_err(|_| OrderRepositoryError::query("listing limit out of range"))?;
            query = query.limit(limit);
        }

        let rows: Vec<(OrderRow, String)> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(row, student_name)| {
                Ok(StudentOrder {
                    order: row_to_order(row)?,
                    student_name,
                })
            })
            .collect()
    }

    async fn count_by_status(
        &self,
        bag_no: Option<BagNumber>,
    ) -> Result<OrderCounts, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let groups: Vec<(String, i64)> = match &bag_no {
            Some(bag_no) => {
                orders::table
                    .filter(orders::bag_no.eq(bag_no.as_str()))
                    .group_by(orders::status)
                    .select((orders::status, count_star()))
                    .load(&mut conn)
                    .await
            }
            None => {
                orders::table
                    .group_by(orders::status)
                    .select((orders::status, count_star()))
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        fold_counts(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn folds_status_groups() {
        let counts = fold_counts(vec![
            ("PENDING".into(), 2),
            ("COMPLETE".into(), 5),
        ])
        .expect("valid groups");

        assert_eq!(counts.total_orders, 7);
        assert_eq!(counts.pending_orders, 2);
        assert_eq!(counts.inprogress_orders, 0);
        assert_eq!(counts.complete_orders, 5);
    }

    #[rstest]
    fn unknown_stored_status_is_a_query_error() {
        let err = fold_counts(vec![("LOST".into(), 1)]).expect_err("unknown status");
        assert!(err.to_string().contains("LOST"));
    }

    #[rstest]
    fn out_of_range_stored_count_is_rejected() {
        let row = OrderRow {
            id: 1,
            bag_no: "B-1".into(),
            number_of_clothes: 99,
            status: "PENDING".into(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        assert!(row_to_order(row).is_err());
    }
}
