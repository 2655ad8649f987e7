//! Transactional event submission and the inverse load path.
//!
//! Submission writes every row set of a flattened event inside a single
//! transaction: either the whole configuration commits or none of it does,
//! so a failed submit can be retried without duplicating rows. Replacing an
//! existing event deletes its child rows and re-inserts them in the same
//! transaction.

use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::entities::{
    BatchEntity, CouponEntity, CouponProductPriceEntity, CouponTicketPriceEntity, EventEntity,
    ProductEntity, TicketEntity,
};
use crate::metrics::QueryTimer;
use domain::models::rows::FlattenedEvent;

/// A persisted event fetched back as the row sets the unflatten path expects.
#[derive(Debug, Clone)]
pub struct LoadedEvent {
    pub event: EventEntity,
    pub rows: FlattenedEvent,
}

/// Repository for writing and reading whole event configurations.
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    /// Creates a new SubmissionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a flattened event for the producer in one transaction.
    ///
    /// With `event_id` set, the existing event (which must belong to the
    /// producer) is updated and its child rows replaced; otherwise a new
    /// event row is inserted. Returns the event id.
    pub async fn submit(
        &self,
        producer_id: Uuid,
        event_id: Option<Uuid>,
        rows: &FlattenedEvent,
    ) -> Result<Uuid, sqlx::Error> {
        let timer = QueryTimer::new("submit_event");
        let mut tx = self.pool.begin().await?;

        let event_id = match event_id {
            Some(id) => {
                self.replace_event(&mut tx, id, producer_id, rows).await?;
                id
            }
            None => self.insert_event(&mut tx, producer_id, rows).await?,
        };

        self.insert_children(&mut tx, event_id, rows).await?;

        tx.commit().await?;
        timer.record();

        info!(
            event_id = %event_id,
            tickets = rows.tickets.len(),
            coupons = rows.coupons.len(),
            products = rows.products.len(),
            "Event configuration persisted"
        );
        Ok(event_id)
    }

    /// Fetches an event and all of its child rows, ordered for the
    /// unflatten path. Returns `None` when the event does not exist. Any
    /// failed fetch aborts the whole load.
    pub async fn load(&self, event_id: Uuid) -> Result<Option<LoadedEvent>, sqlx::Error> {
        let timer = QueryTimer::new("load_event");

        let event = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT * FROM events WHERE id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(event) = event else {
            timer.record();
            return Ok(None);
        };

        let batches = sqlx::query_as::<_, BatchEntity>(
            r#"
            SELECT * FROM batches WHERE event_id = $1 ORDER BY position
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        let tickets = sqlx::query_as::<_, TicketEntity>(
            r#"
            SELECT * FROM tickets WHERE event_id = $1 ORDER BY position
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        let coupons = sqlx::query_as::<_, CouponEntity>(
            r#"
            SELECT * FROM coupons WHERE event_id = $1 ORDER BY position
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        let coupon_ticket_prices = sqlx::query_as::<_, CouponTicketPriceEntity>(
            r#"
            SELECT ctp.* FROM coupon_ticket_prices ctp
            JOIN coupons c ON c.id = ctp.coupon_id
            WHERE c.event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        let products = sqlx::query_as::<_, ProductEntity>(
            r#"
            SELECT * FROM products WHERE event_id = $1 ORDER BY position
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        let coupon_product_prices = sqlx::query_as::<_, CouponProductPriceEntity>(
            r#"
            SELECT cpp.* FROM coupon_product_prices cpp
            JOIN coupons c ON c.id = cpp.coupon_id
            WHERE c.event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        timer.record();
        Ok(Some(LoadedEvent {
            rows: FlattenedEvent {
                event: event.clone().into(),
                batches: batches.into_iter().map(Into::into).collect(),
                tickets: tickets.into_iter().map(Into::into).collect(),
                coupons: coupons.into_iter().map(Into::into).collect(),
                coupon_ticket_prices: coupon_ticket_prices
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                products: products.into_iter().map(Into::into).collect(),
                coupon_product_prices: coupon_product_prices
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            },
            event,
        }))
    }

    async fn insert_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        producer_id: Uuid,
        rows: &FlattenedEvent,
    ) -> Result<Uuid, sqlx::Error> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO events (producer_id, name, description, starts_at, venue,
                                cover_image_url, buyer_fee_percent, producer_absorbs_percent)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(producer_id)
        .bind(&rows.event.name)
        .bind(&rows.event.description)
        .bind(rows.event.starts_at)
        .bind(&rows.event.venue)
        .bind(&rows.event.cover_image_url)
        .bind(rows.event.buyer_fee_percent)
        .bind(rows.event.producer_absorbs_percent)
        .fetch_one(&mut **tx)
        .await?;
        Ok(id)
    }

    async fn replace_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        producer_id: Uuid,
        rows: &FlattenedEvent,
    ) -> Result<(), sqlx::Error> {
        let updated: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE events SET
                name = $3,
                description = $4,
                starts_at = $5,
                venue = $6,
                cover_image_url = $7,
                buyer_fee_percent = $8,
                producer_absorbs_percent = $9,
                updated_at = NOW()
            WHERE id = $1 AND producer_id = $2
            RETURNING id
            "#,
        )
        .bind(event_id)
        .bind(producer_id)
        .bind(&rows.event.name)
        .bind(&rows.event.description)
        .bind(rows.event.starts_at)
        .bind(&rows.event.venue)
        .bind(&rows.event.cover_image_url)
        .bind(rows.event.buyer_fee_percent)
        .bind(rows.event.producer_absorbs_percent)
        .fetch_optional(&mut **tx)
        .await?;
        if updated.is_none() {
            return Err(sqlx::Error::RowNotFound);
        }

        // Child rows are re-inserted from the draft; join rows cascade.
        for table in ["tickets", "coupons", "products", "batches"] {
            sqlx::query(&format!("DELETE FROM {} WHERE event_id = $1", table))
                .bind(event_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    async fn insert_children(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        rows: &FlattenedEvent,
    ) -> Result<(), sqlx::Error> {
        for batch in &rows.batches {
            sqlx::query(
                r#"
                INSERT INTO batches (id, event_id, name, starts_at, ends_at, position)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(batch.id)
            .bind(event_id)
            .bind(&batch.name)
            .bind(batch.starts_at)
            .bind(batch.ends_at)
            .bind(batch.position)
            .execute(&mut **tx)
            .await?;
        }

        for ticket in &rows.tickets {
            sqlx::query(
                r#"
                INSERT INTO tickets (id, event_id, sector_name, sector_capacity, batch_id,
                                     name, price, quantity, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(ticket.id)
            .bind(event_id)
            .bind(&ticket.sector_name)
            .bind(ticket.sector_capacity)
            .bind(ticket.batch_id)
            .bind(&ticket.name)
            .bind(ticket.price)
            .bind(ticket.quantity)
            .bind(ticket.position)
            .execute(&mut **tx)
            .await?;
        }

        for coupon in &rows.coupons {
            sqlx::query(
                r#"
                INSERT INTO coupons (id, event_id, code, description, max_uses,
                                     starts_at, ends_at, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(coupon.id)
            .bind(event_id)
            .bind(&coupon.code)
            .bind(&coupon.description)
            .bind(coupon.max_uses)
            .bind(coupon.starts_at)
            .bind(coupon.ends_at)
            .bind(coupon.position)
            .execute(&mut **tx)
            .await?;
        }

        for price in &rows.coupon_ticket_prices {
            sqlx::query(
                r#"
                INSERT INTO coupon_ticket_prices (coupon_id, ticket_id, price)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(price.coupon_id)
            .bind(price.ticket_id)
            .bind(price.price)
            .execute(&mut **tx)
            .await?;
        }

        for product in &rows.products {
            sqlx::query(
                r#"
                INSERT INTO products (id, event_id, name, description, price, quantity,
                                      size, category, image_url, accepts_coupons, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(product.id)
            .bind(event_id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.quantity)
            .bind(&product.size)
            .bind(product.category.as_str())
            .bind(&product.image_url)
            .bind(product.accepts_coupons)
            .bind(product.position)
            .execute(&mut **tx)
            .await?;
        }

        for price in &rows.coupon_product_prices {
            sqlx::query(
                r#"
                INSERT INTO coupon_product_prices (coupon_id, product_id, price)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(price.coupon_id)
            .bind(price.product_id)
            .bind(price.price)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
