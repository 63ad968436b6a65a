use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::time::hhmm;

use super::office::Office;

/// How the consultation takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "consultation_channel", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Phone,
    Visit,
    Video,
}

impl Channel {
    /// Korean display label used in notification copy.
    pub fn label_kr(&self) -> &'static str {
        match self {
            Channel::Phone => "전화 상담",
            Channel::Visit => "방문 상담",
            Channel::Video => "화상 상담",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Consultation booking - SQL persistence layer.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub channel: Channel,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub category: Option<String>,
    pub message: Option<String>,
    pub preferred_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub preferred_time: NaiveTime,
    /// Required for visit consultations, absent otherwise.
    pub office_location: Option<Office>,
    pub status: BookingStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated booking fields ready for insertion.
#[derive(Debug, Clone)]
pub struct CreateBookingInput {
    pub channel: Channel,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub category: Option<String>,
    pub message: Option<String>,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    pub office_location: Option<Office>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub channel: Option<Channel>,
    pub office_location: Option<Office>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl Booking {
    pub async fn insert(input: &CreateBookingInput, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO bookings (
                channel,
                name,
                phone,
                email,
                category,
                message,
                preferred_date,
                preferred_time,
                office_location
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(input.channel)
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.category)
        .bind(&input.message)
        .bind(input.preferred_date)
        .bind(input.preferred_time)
        .bind(input.office_location)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_all(filter: &BookingFilter, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM bookings
             WHERE ($1::booking_status IS NULL OR status = $1)
               AND ($2::consultation_channel IS NULL OR channel = $2)
               AND ($3::office_location IS NULL OR office_location = $3)
               AND ($4::date IS NULL OR preferred_date >= $4)
               AND ($5::date IS NULL OR preferred_date <= $5)
             ORDER BY created_at DESC",
        )
        .bind(filter.status)
        .bind(filter.channel)
        .bind(filter.office_location)
        .bind(filter.date_from)
        .bind(filter.date_to)
        .fetch_all(pool)
        .await
    }

    /// Confirmed bookings on a given day, in slot order. This is the
    /// reminder batch's working set.
    pub async fn find_confirmed_on(date: NaiveDate, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM bookings
             WHERE status = 'confirmed' AND preferred_date = $1
             ORDER BY preferred_time",
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// Pending bookings submitted before `cutoff`, oldest first.
    pub async fn find_pending_created_before(
        cutoff: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM bookings
             WHERE status = 'pending' AND created_at < $1
             ORDER BY created_at",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    /// Whether a confirmed booking already occupies the same slot at the
    /// same office (office equality treats two NULLs as equal).
    pub async fn has_confirmed_conflict(
        date: NaiveDate,
        time: NaiveTime,
        office: Option<Office>,
        exclude_id: Uuid,
        pool: &PgPool,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE status = 'confirmed'
                  AND preferred_date = $1
                  AND preferred_time = $2
                  AND office_location IS NOT DISTINCT FROM $3
                  AND id <> $4
             )",
        )
        .bind(date)
        .bind(time)
        .bind(office)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    pub async fn update_status(
        id: Uuid,
        status: BookingStatus,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE bookings SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
    }

    pub async fn update_admin_notes(
        id: Uuid,
        notes: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE bookings SET admin_notes = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(notes)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
impl Booking {
    /// In-memory fixture for dispatcher and batch tests.
    pub fn fixture() -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: Channel::Visit,
            name: "홍길동".to_string(),
            phone: "010-1234-5678".to_string(),
            email: Some("client@example.com".to_string()),
            category: Some("이혼소송".to_string()),
            message: None,
            preferred_date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            preferred_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            office_location: Some(Office::Cheonan),
            status: BookingStatus::Pending,
            admin_notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
