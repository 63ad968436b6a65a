//! Admin status transitions.
//!
//! pending -> confirmed | cancelled, confirmed -> cancelled | completed;
//! cancelled and completed are terminal. Confirm/cancel transitions
//! dispatch the matching notification event after the row is updated;
//! notification failure never reverses the transition.

use serde::Deserialize;
use uuid::Uuid;

use crate::domains::notifications::{dispatch, NotificationEvent, NotificationSummary};
use crate::domains::scheduling::errors::SchedulingError;
use crate::domains::scheduling::models::{Booking, BookingStatus};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookingInput {
    pub status: Option<BookingStatus>,
    pub admin_notes: Option<String>,
}

pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) | (Confirmed, Completed)
    )
}

pub async fn update_booking_status(
    id: Uuid,
    input: UpdateBookingInput,
    deps: &ServerDeps,
) -> Result<(Booking, Option<NotificationSummary>), SchedulingError> {
    let mut booking = Booking::find_by_id(id, &deps.db_pool)
        .await?
        .ok_or(SchedulingError::NotFound)?;

    let mut notification = None;

    if let Some(to) = input.status {
        let from = booking.status;
        if from.is_terminal() {
            return Err(SchedulingError::TerminalState(from));
        }
        if !can_transition(from, to) {
            return Err(SchedulingError::InvalidTransition { from, to });
        }

        booking = Booking::update_status(id, to, &deps.db_pool)
            .await?
            .ok_or(SchedulingError::NotFound)?;
        tracing::info!(booking_id = %id, %from, %to, "Booking status updated");

        let event = match to {
            BookingStatus::Confirmed => Some(NotificationEvent::Confirmed),
            BookingStatus::Cancelled => Some(NotificationEvent::Cancelled),
            _ => None,
        };
        if let Some(event) = event {
            let result = dispatch(event, &booking, &deps.notifier).await;
            notification = Some(result.summary());
        }
    }

    if let Some(notes) = &input.admin_notes {
        booking = Booking::update_admin_notes(id, notes, &deps.db_pool)
            .await?
            .ok_or(SchedulingError::NotFound)?;
    }

    Ok((booking, notification))
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingStatus::*;

    #[test]
    fn allowed_transitions() {
        assert!(can_transition(Pending, Confirmed));
        assert!(can_transition(Pending, Cancelled));
        assert!(can_transition(Confirmed, Cancelled));
        assert!(can_transition(Confirmed, Completed));
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for from in [Cancelled, Completed] {
            for to in [Pending, Confirmed, Cancelled, Completed] {
                assert!(!can_transition(from, to), "{from} -> {to} must be rejected");
            }
        }
    }

    #[test]
    fn no_skipping_or_reversing() {
        assert!(!can_transition(Pending, Completed));
        assert!(!can_transition(Pending, Pending));
        assert!(!can_transition(Confirmed, Pending));
        assert!(!can_transition(Confirmed, Confirmed));
    }
}
