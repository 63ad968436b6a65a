use thiserror::Error;

use super::models::BookingStatus;

/// Scheduling errors surfaced to API clients.
///
/// Messages for client-caused rejections are user-facing Korean copy; the
/// HTTP layer maps each variant to a status code.
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("이름을 입력해주세요 (최소 2자)")]
    InvalidName,

    #[error("올바른 전화번호를 입력해주세요")]
    InvalidPhoneFormat,

    #[error("올바른 이메일 주소를 입력해주세요")]
    InvalidEmail,

    #[error("방문 상담의 경우 사무소 위치를 선택해주세요")]
    MissingOfficeForVisit,

    #[error("선택하신 시간은 예약할 수 없습니다. 다른 시간을 선택해주세요")]
    SlotNoLongerAvailable,

    #[error("시간 차단에는 시작/종료 시간이 모두 필요합니다")]
    MissingTimeRange,

    #[error("차단 시작 시간은 종료 시간보다 빨라야 합니다")]
    InvalidTimeRange,

    #[error("이미 종결된 예약은 변경할 수 없습니다 (현재 상태: {0})")]
    TerminalState(BookingStatus),

    #[error("허용되지 않는 상태 변경입니다: {from} -> {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("요청한 항목을 찾을 수 없습니다")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
