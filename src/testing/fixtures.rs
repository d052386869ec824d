//! Fake data helpers and ready-made fixtures.

use crate::booking::{BookingData, Member, PaymentInfo};
use uuid::Uuid;

/// Helper functions for generating fake test data
pub mod fake {
    use super::*;

    /// Generate a fake email address
    pub fn email() -> String {
        format!("test-{}@example.com", Uuid::new_v4().simple())
    }

    /// Generate a fake name
    pub fn name() -> String {
        format!("Test User {}", &Uuid::new_v4().simple().to_string()[..8])
    }

    /// Generate a fake Indian mobile number
    pub fn phone() -> String {
        format!("+919{:09}", fastrand::u32(0..999_999_999))
    }

    /// Generate a random integer between min and max (inclusive)
    pub fn int(min: i32, max: i32) -> i32 {
        fastrand::i32(min..=max)
    }

    /// Generate a random alphabetic string of the given length
    pub fn string(length: usize) -> String {
        (0..length).map(|_| fastrand::alphabetic()).collect()
    }
}

/// A booking with `members` attendees and stable display fields.
#[must_use]
pub fn sample_booking(members: usize) -> BookingData {
    BookingData {
        booking_code: "FX001".to_string(),
        members: (0..members)
            .map(|i| {
                Member::new(
                    format!("Member {}", i + 1),
                    format!("member{}@example.com", i + 1),
                    format!("90000000{:02}", i + 1),
                )
            })
            .collect(),
        event_title: "Fusion Night 2026".to_string(),
        date: "15 March 2026".to_string(),
        time: "7:00 PM".to_string(),
        venue: "GLITZFUSION Arena".to_string(),
        total_amount: members as i64 * 1500,
    }
}

/// A completed payment matching [`sample_booking`]'s totals.
#[must_use]
pub fn sample_payment(amount: i64) -> PaymentInfo {
    PaymentInfo {
        payment_id: "pay_test123456".to_string(),
        payment_method: "UPI".to_string(),
        payment_date: "7 March 2026".to_string(),
        amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_booking_shape() {
        let booking = sample_booking(3);
        assert_eq!(booking.members.len(), 3);
        assert!(booking.validate().is_ok());
    }

    #[test]
    fn test_fake_helpers() {
        assert!(fake::email().contains('@'));
        assert_eq!(fake::string(10).len(), 10);
        let n = fake::int(1, 5);
        assert!((1..=5).contains(&n));
    }
}
