use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::time::hhmm_option;
use crate::domains::scheduling::errors::SchedulingError;

use super::office::Office;

/// How a blocked time removes availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "block_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Removes the whole day.
    Date,
    /// Removes `[blocked_time_start, blocked_time_end)` within the day.
    TimeSlot,
}

/// Admin-authored rule that removes availability. Rows are immutable except
/// for delete; overlapping rules are legal and simply union away the same
/// slots.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct BlockedTime {
    pub id: Uuid,
    pub block_type: BlockType,
    pub blocked_date: NaiveDate,
    #[serde(with = "hhmm_option")]
    pub blocked_time_start: Option<NaiveTime>,
    #[serde(with = "hhmm_option")]
    pub blocked_time_end: Option<NaiveTime>,
    /// `None` applies to every office.
    pub office_location: Option<Office>,
    pub reason: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlockedTimeInput {
    pub block_type: BlockType,
    pub blocked_date: NaiveDate,
    #[serde(default, with = "hhmm_option")]
    pub blocked_time_start: Option<NaiveTime>,
    #[serde(default, with = "hhmm_option")]
    pub blocked_time_end: Option<NaiveTime>,
    #[serde(default)]
    pub office_location: Option<Office>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockedTimeFilter {
    #[serde(rename = "type")]
    pub block_type: Option<BlockType>,
    pub office: Option<Office>,
}

impl BlockedTime {
    /// Validate a creation request. Time-slot blocks need a well-formed
    /// half-open range; full-day blocks ignore the time fields.
    pub fn validate_input(input: &CreateBlockedTimeInput) -> Result<(), SchedulingError> {
        if input.block_type != BlockType::TimeSlot {
            return Ok(());
        }
        match (input.blocked_time_start, input.blocked_time_end) {
            (Some(start), Some(end)) if start < end => Ok(()),
            (Some(_), Some(_)) => Err(SchedulingError::InvalidTimeRange),
            _ => Err(SchedulingError::MissingTimeRange),
        }
    }

    pub async fn create(
        input: CreateBlockedTimeInput,
        created_by: &str,
        pool: &PgPool,
    ) -> Result<Self, SchedulingError> {
        Self::validate_input(&input)?;

        // Full-day blocks never carry a time range, even if the client sent one.
        let (start, end) = match input.block_type {
            BlockType::Date => (None, None),
            BlockType::TimeSlot => (input.blocked_time_start, input.blocked_time_end),
        };

        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO blocked_times (
                block_type,
                blocked_date,
                blocked_time_start,
                blocked_time_end,
                office_location,
                reason,
                created_by
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(input.block_type)
        .bind(input.blocked_date)
        .bind(start)
        .bind(end)
        .bind(input.office_location)
        .bind(&input.reason)
        .bind(created_by)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    pub async fn find_all(filter: &BlockedTimeFilter, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM blocked_times
             WHERE ($1::block_type IS NULL OR block_type = $1)
               AND ($2::office_location IS NULL OR office_location = $2)
             ORDER BY blocked_date, blocked_time_start",
        )
        .bind(filter.block_type)
        .bind(filter.office)
        .fetch_all(pool)
        .await
    }

    /// All rules on or after `start`: the resolver's input for a booking
    /// window opening at `start`.
    pub async fn find_from(start: NaiveDate, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM blocked_times WHERE blocked_date >= $1 ORDER BY blocked_date",
        )
        .bind(start)
        .fetch_all(pool)
        .await
    }

    pub async fn delete(id: Uuid, pool: &PgPool) -> Result<(), SchedulingError> {
        let result = sqlx::query("DELETE FROM blocked_times WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(SchedulingError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(block_type: BlockType, start: Option<(u32, u32)>, end: Option<(u32, u32)>) -> CreateBlockedTimeInput {
        CreateBlockedTimeInput {
            block_type,
            blocked_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            blocked_time_start: start.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap()),
            blocked_time_end: end.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap()),
            office_location: None,
            reason: None,
        }
    }

    #[test]
    fn full_day_block_needs_no_times() {
        assert!(BlockedTime::validate_input(&input(BlockType::Date, None, None)).is_ok());
    }

    #[test]
    fn time_slot_block_requires_both_times() {
        let missing = input(BlockType::TimeSlot, Some((10, 0)), None);
        assert!(matches!(
            BlockedTime::validate_input(&missing),
            Err(SchedulingError::MissingTimeRange)
        ));
    }

    #[test]
    fn rejects_inverted_and_empty_ranges() {
        let inverted = input(BlockType::TimeSlot, Some((12, 0)), Some((10, 0)));
        assert!(matches!(
            BlockedTime::validate_input(&inverted),
            Err(SchedulingError::InvalidTimeRange)
        ));

        let empty = input(BlockType::TimeSlot, Some((10, 0)), Some((10, 0)));
        assert!(matches!(
            BlockedTime::validate_input(&empty),
            Err(SchedulingError::InvalidTimeRange)
        ));
    }

    #[test]
    fn accepts_well_formed_range() {
        let ok = input(BlockType::TimeSlot, Some((10, 0)), Some((12, 0)));
        assert!(BlockedTime::validate_input(&ok).is_ok());
    }
}
