// Booking lifecycle actions
pub mod auto_confirm;
pub mod create_booking;
pub mod update_status;

pub use auto_confirm::{run_auto_confirm, AutoConfirmReport};
pub use create_booking::create_booking;
pub use update_status::{can_transition, update_booking_status, UpdateBookingInput};
