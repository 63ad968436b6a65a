pub mod blocked_time;
pub mod booking;
pub mod office;

pub use blocked_time::{BlockType, BlockedTime, BlockedTimeFilter, CreateBlockedTimeInput};
pub use booking::{Booking, BookingFilter, BookingStatus, Channel, CreateBookingInput};
pub use office::Office;
