//! Notification copy, rendered per lifecycle event.
//!
//! Email bodies are compact transactional HTML; SMS copy is the short
//! Korean text the firm sends today. Both pull the firm identity from
//! [`BusinessProfile`] rather than hard-coding it.

use crate::common::time::{format_hhmm, korean_date};
use crate::config::BusinessProfile;
use crate::domains::scheduling::models::Booking;

use super::dispatcher::NotificationEvent;

pub fn email_subject(event: NotificationEvent, business: &BusinessProfile) -> String {
    let line = match event {
        NotificationEvent::Created => "상담 예약이 접수되었습니다",
        NotificationEvent::Confirmed => "상담 예약이 확정되었습니다",
        NotificationEvent::Cancelled => "상담 예약이 취소되었습니다",
        NotificationEvent::Reminder => "내일 상담 예약이 있습니다",
    };
    format!("[{}] {}", business.name, line)
}

pub fn email_body(
    event: NotificationEvent,
    booking: &Booking,
    business: &BusinessProfile,
) -> String {
    let lead = match event {
        NotificationEvent::Created => format!(
            "{}님, {}에 {} 예약을 신청해주셔서 감사합니다.<br>담당자가 확인 후 <strong>{}</strong>으로 연락드리겠습니다.",
            booking.name,
            business.name,
            booking.channel.label_kr(),
            booking.phone
        ),
        NotificationEvent::Confirmed => format!(
            "{}님, 신청하신 {} 예약이 확정되었습니다.",
            booking.name,
            booking.channel.label_kr()
        ),
        NotificationEvent::Cancelled => format!(
            "{}님, 신청하신 {} 예약이 취소되었습니다.<br>다른 일정이 필요하시면 다시 예약해주세요.",
            booking.name,
            booking.channel.label_kr()
        ),
        NotificationEvent::Reminder => format!(
            "{}님, 내일 상담 일정을 알려드립니다.<br>잊지 말고 참석해 주세요.",
            booking.name
        ),
    };

    let office_row = match booking.office_location {
        Some(office) => format!("<li>사무소: {}</li>", office),
        None => String::new(),
    };

    format!(
        "<div style=\"font-family: sans-serif; line-height: 1.6; color: #333;\">\
         <h2>{}</h2>\
         <p>{}</p>\
         <ul>\
         <li>상담 유형: {}</li>\
         {}\
         <li>날짜: {}</li>\
         <li>시간: {}</li>\
         </ul>\
         <p>문의: {} ({})</p>\
         </div>",
        email_subject(event, business),
        lead,
        booking.channel.label_kr(),
        office_row,
        korean_date(booking.preferred_date),
        format_hhmm(booking.preferred_time),
        business.phone,
        business.email_reply_to,
    )
}

/// Subject for the internal new-booking alert.
pub fn admin_alert_subject(booking: &Booking) -> String {
    format!("[신규 예약] {} - {}", booking.channel.label_kr(), booking.name)
}

pub fn admin_alert_body(booking: &Booking) -> String {
    let office_row = match booking.office_location {
        Some(office) => format!("<li>사무소: {}</li>", office),
        None => String::new(),
    };
    let category_row = match &booking.category {
        Some(category) => format!("<li>상담 분야: {}</li>", category),
        None => String::new(),
    };
    let message_row = match &booking.message {
        Some(message) => format!("<li>메시지: {}</li>", message),
        None => String::new(),
    };

    format!(
        "<div style=\"font-family: sans-serif; line-height: 1.6; color: #333;\">\
         <h2>신규 상담 예약 알림</h2>\
         <p>새로운 상담 예약이 접수되었습니다. 고객에게 확인 연락을 진행해주세요.</p>\
         <ul>\
         <li>예약번호: {}</li>\
         <li>상담 유형: {}</li>\
         {}\
         <li>이름: {}</li>\
         <li>전화번호: {}</li>\
         <li>희망 일시: {} {}</li>\
         {}{}\
         </ul>\
         </div>",
        booking.id,
        booking.channel.label_kr(),
        office_row,
        booking.name,
        booking.phone,
        korean_date(booking.preferred_date),
        format_hhmm(booking.preferred_time),
        category_row,
        message_row,
    )
}

pub fn sms_text(
    event: NotificationEvent,
    booking: &Booking,
    business: &BusinessProfile,
) -> String {
    let when = format!(
        "{} {}",
        korean_date(booking.preferred_date),
        format_hhmm(booking.preferred_time)
    );

    match event {
        NotificationEvent::Created => format!(
            "[{}] {}님의 {} 예약이 접수되었습니다.\n일시: {}\n담당자가 확인 후 연락드리겠습니다.\n문의: {}",
            business.name,
            booking.name,
            booking.channel.label_kr(),
            when,
            business.phone
        ),
        NotificationEvent::Confirmed => format!(
            "[{}] {}님의 상담 예약이 확정되었습니다.\n일시: {}\n준비물: 신분증, 관련 서류\n문의: {}",
            business.name, booking.name, when, business.phone
        ),
        NotificationEvent::Cancelled => format!(
            "[{}] {}님의 상담 예약이 취소되었습니다.\n일시: {}\n문의: {}",
            business.name, booking.name, when, business.phone
        ),
        NotificationEvent::Reminder => format!(
            "[{}] {}님, 내일 상담 일정을 알려드립니다.\n일시: {}\n잊지 말고 참석해 주세요!\n문의: {}",
            business.name, booking.name, when, business.phone
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sms_copy_carries_slot_and_firm_identity() {
        let booking = Booking::fixture();
        let business = BusinessProfile::default();

        for event in [
            NotificationEvent::Created,
            NotificationEvent::Confirmed,
            NotificationEvent::Cancelled,
            NotificationEvent::Reminder,
        ] {
            let text = sms_text(event, &booking, &business);
            assert!(text.contains(&booking.name));
            assert!(text.contains("10:30"));
            assert!(text.starts_with(&format!("[{}]", business.name)));
        }
    }

    #[test]
    fn email_body_lists_office_only_for_visit() {
        let business = BusinessProfile::default();
        let visit = Booking::fixture();
        let body = email_body(NotificationEvent::Confirmed, &visit, &business);
        assert!(body.contains("사무소: 천안"));

        let mut phone = Booking::fixture();
        phone.office_location = None;
        let body = email_body(NotificationEvent::Confirmed, &phone, &business);
        assert!(!body.contains("사무소"));
    }
}
