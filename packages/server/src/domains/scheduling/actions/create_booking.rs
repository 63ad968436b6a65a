//! Create booking action.
//!
//! Validates the submission, re-checks the requested slot against the
//! current blocked-time set (the slot list the client saw may be stale by
//! now), persists the booking as pending, then dispatches the created
//! event. The booking is the source of truth: a failed dispatch is logged
//! and reported, never rolled back.

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;

use crate::domains::notifications::{dispatch, NotificationEvent, NotificationSummary};
use crate::domains::scheduling::availability::slot_bookable;
use crate::domains::scheduling::errors::SchedulingError;
use crate::domains::scheduling::models::{BlockedTime, Booking, Channel, CreateBookingInput};
use crate::kernel::ServerDeps;

lazy_static! {
    /// Korean mobile numbers, hyphens optional: 010-1234-5678, 01012345678.
    static ref PHONE_RE: Regex =
        Regex::new(r"^01[0-9]-?[0-9]{3,4}-?[0-9]{4}$").expect("phone pattern is valid");
}

pub fn validate_phone(phone: &str) -> Result<(), SchedulingError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(SchedulingError::InvalidPhoneFormat)
    }
}

/// Synchronous field validation, before any I/O.
fn validate_submission(input: &CreateBookingInput) -> Result<(), SchedulingError> {
    if input.name.trim().chars().count() < 2 {
        return Err(SchedulingError::InvalidName);
    }
    validate_phone(&input.phone)?;
    if let Some(email) = &input.email {
        if !email.contains('@') {
            return Err(SchedulingError::InvalidEmail);
        }
    }
    if input.channel == Channel::Visit && input.office_location.is_none() {
        return Err(SchedulingError::MissingOfficeForVisit);
    }
    Ok(())
}

pub async fn create_booking(
    mut input: CreateBookingInput,
    deps: &ServerDeps,
    now: NaiveDateTime,
) -> Result<(Booking, NotificationSummary), SchedulingError> {
    // Treat empty optional strings as absent.
    input.email = input.email.filter(|e| !e.trim().is_empty());
    input.category = input.category.filter(|c| !c.trim().is_empty());
    input.message = input.message.filter(|m| !m.trim().is_empty());

    validate_submission(&input)?;

    let rules = BlockedTime::find_from(now.date(), &deps.db_pool).await?;
    if !slot_bookable(
        input.preferred_date,
        input.preferred_time,
        input.office_location,
        &rules,
        now,
    ) {
        return Err(SchedulingError::SlotNoLongerAvailable);
    }

    let booking = Booking::insert(&input, &deps.db_pool).await?;
    tracing::info!(booking_id = %booking.id, channel = ?booking.channel, "Booking created");

    let result = dispatch(NotificationEvent::Created, &booking, &deps.notifier).await;

    Ok((booking, result.summary()))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use crate::domains::scheduling::models::Office;

    use super::*;

    #[test]
    fn accepts_common_korean_mobile_formats() {
        for phone in ["010-1234-5678", "01012345678", "011-123-4567", "010-123-4567"] {
            assert!(validate_phone(phone).is_ok(), "{phone} should be valid");
        }
    }

    #[test]
    fn rejects_landlines_and_garbage() {
        for phone in ["02-1234-5678", "010-12345-678", "0101234567890", "", "전화주세요"] {
            assert!(validate_phone(phone).is_err(), "{phone} should be invalid");
        }
    }

    fn submission(channel: Channel, office: Option<Office>) -> CreateBookingInput {
        CreateBookingInput {
            channel,
            name: "홍길동".to_string(),
            phone: "010-1234-5678".to_string(),
            email: None,
            category: None,
            message: None,
            preferred_date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            preferred_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            office_location: office,
        }
    }

    #[test]
    fn visit_without_office_is_rejected() {
        let input = submission(Channel::Visit, None);
        assert!(matches!(
            validate_submission(&input),
            Err(SchedulingError::MissingOfficeForVisit)
        ));
    }

    #[test]
    fn visit_with_office_passes_and_other_channels_need_none() {
        assert!(validate_submission(&submission(Channel::Visit, Some(Office::Cheonan))).is_ok());
        assert!(validate_submission(&submission(Channel::Phone, None)).is_ok());
        assert!(validate_submission(&submission(Channel::Video, None)).is_ok());
    }

    #[test]
    fn short_name_and_bad_email_are_rejected() {
        let mut input = submission(Channel::Phone, None);
        input.name = "홍".to_string();
        assert!(matches!(
            validate_submission(&input),
            Err(SchedulingError::InvalidName)
        ));

        let mut input = submission(Channel::Phone, None);
        input.email = Some("not-an-email".to_string());
        assert!(matches!(
            validate_submission(&input),
            Err(SchedulingError::InvalidEmail)
        ));
    }
}
