//! PostgreSQL Repository Implementations

use chrono::NaiveDate;
use platform::client::SourceAddress;
use sqlx::PgPool;

use crate::domain::entities::Listing;
use crate::domain::repository::{ListingRepository, SubmissionQuotaRepository};
use crate::domain::value_objects::{ListingDraft, ListingStatus};
use crate::error::{ListingError, ListingResult};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete quota counter rows older than the retention window
    ///
    /// Old rows are dead weight; each day's counting only ever touches
    /// today's row.
    pub async fn cleanup_old_quotas(&self, retention_days: u32) -> ListingResult<u64> {
        let deleted = sqlx::query(
            "DELETE FROM submission_quotas WHERE quota_date < CURRENT_DATE - $1::INT",
        )
        .bind(retention_days as i32)
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::info!(quota_rows = deleted, "Cleaned up old submission quotas");

        Ok(deleted)
    }
}

impl ListingRepository for PgListingRepository {
    async fn create(&self, draft: &ListingDraft, source: &SourceAddress) -> ListingResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO listings (
                product_name,
                product_condition,
                room_number,
                year_bought,
                image_url,
                description,
                seller_name,
                seller_email,
                seller_phone,
                status,
                source_ip
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING listing_id
            "#,
        )
        .bind(&draft.product_name)
        .bind(&draft.product_condition)
        .bind(&draft.room_number)
        .bind(draft.year_bought)
        .bind(&draft.image_url)
        .bind(&draft.description)
        .bind(&draft.seller_name)
        .bind(&draft.seller_email)
        .bind(draft.seller_phone.as_deref())
        .bind(ListingStatus::Pending.id())
        .bind(source.as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(listing_id = id, "Listing created");

        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> ListingResult<Option<Listing>> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT
                listing_id,
                product_name,
                product_condition,
                room_number,
                year_bought,
                image_url,
                description,
                seller_name,
                seller_email,
                seller_phone,
                status,
                source_ip,
                created_at
            FROM listings
            WHERE listing_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_listing()).transpose()
    }

    async fn list_approved(&self) -> ListingResult<Vec<Listing>> {
        self.list_by_status(ListingStatus::Approved).await
    }

    async fn list_by_status(&self, status: ListingStatus) -> ListingResult<Vec<Listing>> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT
                listing_id,
                product_name,
                product_condition,
                room_number,
                year_bought,
                image_url,
                description,
                seller_name,
                seller_email,
                seller_phone,
                status,
                source_ip,
                created_at
            FROM listings
            WHERE status = $1
            ORDER BY created_at DESC, listing_id DESC
            "#,
        )
        .bind(status.id())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_listing()).collect()
    }

    async fn update_status(&self, id: i64, status: ListingStatus) -> ListingResult<bool> {
        let updated = sqlx::query("UPDATE listings SET status = $1 WHERE listing_id = $2")
            .bind(status.id())
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, id: i64) -> ListingResult<bool> {
        let deleted = sqlx::query("DELETE FROM listings WHERE listing_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

impl SubmissionQuotaRepository for PgListingRepository {
    async fn register_submission(
        &self,
        source: &SourceAddress,
        date: NaiveDate,
    ) -> ListingResult<u32> {
        // Single-statement upsert: concurrent submissions from one address
        // serialize at the row, so the returned count is exact
        let row = sqlx::query_as::<_, (i32,)>(
            r#"
            INSERT INTO submission_quotas (source_ip, quota_date, submission_count)
            VALUES ($1, $2, 1)
            ON CONFLICT (source_ip, quota_date)
            DO UPDATE SET submission_count = submission_quotas.submission_count + 1
            RETURNING submission_count
            "#,
        )
        .bind(source.as_str())
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0 as u32)
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct ListingRow {
    listing_id: i64,
    product_name: String,
    product_condition: String,
    room_number: String,
    year_bought: Option<i32>,
    image_url: String,
    description: String,
    seller_name: String,
    seller_email: String,
    seller_phone: Option<String>,
    status: i16,
    source_ip: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl ListingRow {
    fn into_listing(self) -> ListingResult<Listing> {
        let status = ListingStatus::from_id(self.status).ok_or_else(|| {
            ListingError::Internal(format!(
                "unknown listing status {} for listing {}",
                self.status, self.listing_id
            ))
        })?;

        Ok(Listing {
            id: self.listing_id,
            product_name: self.product_name,
            product_condition: self.product_condition,
            room_number: self.room_number,
            year_bought: self.year_bought,
            image_url: self.image_url,
            description: self.description,
            seller_name: self.seller_name,
            seller_email: self.seller_email,
            seller_phone: self.seller_phone,
            status,
            source_ip: SourceAddress::from_db(self.source_ip),
            created_at: self.created_at,
        })
    }
}
