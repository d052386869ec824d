//! Booking and payment data shapes consumed by the engine.
//!
//! These records arrive fully formed from the booking store; the engine
//! never persists them. Display fields (`date`, `time`, `total_amount`)
//! are already formatted by the caller.

use serde::{Deserialize, Serialize};

/// One attendee on a booking. Index 0 is the purchasing contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Explicit per-attendee ticket code, when the booking store assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_code: Option<String>,
}

impl Member {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            member_code: None,
        }
    }

    /// Set an explicit member code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.member_code = Some(code.into());
        self
    }
}

/// A confirmed booking as handed over by the booking/payment layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingData {
    /// Short alphanumeric identifier, unique per booking. Doubles as the
    /// primary member's ticket code.
    pub booking_code: String,
    pub members: Vec<Member>,
    pub event_title: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    /// Whole rupees.
    pub total_amount: i64,
}

impl BookingData {
    /// The purchasing contact.
    #[must_use]
    pub fn primary_member(&self) -> Option<&Member> {
        self.members.first()
    }

    #[must_use]
    pub fn member_count(&self) -> u32 {
        self.members.len() as u32
    }

    /// Index of the member with the given email, case-insensitive.
    #[must_use]
    pub fn member_index_by_email(&self, email: &str) -> Option<usize> {
        self.members
            .iter()
            .position(|m| m.email.eq_ignore_ascii_case(email))
    }

    /// Resolve the ticket code printed for the member at `index`.
    ///
    /// The primary member (index 0) always uses the booking code. Other
    /// members use their explicit code when one was assigned, otherwise a
    /// freshly generated 6-character code. Generated codes are cosmetic
    /// per-email fallbacks, not authoritative ticket codes, so they are
    /// not stable across calls.
    #[must_use]
    pub fn resolved_member_code(&self, index: usize) -> String {
        if index == 0 {
            return self.booking_code.clone();
        }
        self.members
            .get(index)
            .and_then(|m| m.member_code.as_deref())
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .unwrap_or_else(random_member_code)
    }

    /// Sanity checks mirrored from the booking API route guards.
    ///
    /// The booking layer validates before handing records over; this is a
    /// cheap re-check so a malformed record fails with a clear message
    /// instead of an empty email.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.booking_code.trim().is_empty() {
            return Err("booking code is required".into());
        }
        if self.members.is_empty() {
            return Err("booking must have at least one member".into());
        }
        if self.total_amount < 0 {
            return Err("booking total must not be negative".into());
        }
        Ok(())
    }
}

/// Payment identity attached to a completed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub payment_id: String,
    pub payment_method: String,
    /// Display string, formatted by the caller.
    pub payment_date: String,
    /// Whole rupees.
    pub amount: i64,
}

const MEMBER_CODE_LEN: usize = 6;
const MEMBER_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random 6-character uppercase alphanumeric member code.
#[must_use]
pub fn random_member_code() -> String {
    (0..MEMBER_CODE_LEN)
        .map(|_| {
            let idx = fastrand::usize(..MEMBER_CODE_CHARSET.len());
            MEMBER_CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_with_members(n: usize) -> BookingData {
        BookingData {
            booking_code: "FX001".to_string(),
            members: (0..n)
                .map(|i| Member::new(format!("Member {i}"), format!("m{i}@test.com"), "9000000000"))
                .collect(),
            event_title: "Fusion Night".to_string(),
            date: "15 March 2026".to_string(),
            time: "7:00 PM".to_string(),
            venue: "GLITZFUSION Arena".to_string(),
            total_amount: 4500,
        }
    }

    #[test]
    fn test_primary_member_code_is_booking_code() {
        let booking = booking_with_members(3);
        assert_eq!(booking.resolved_member_code(0), "FX001");
    }

    #[test]
    fn test_explicit_member_code_wins_for_non_primary() {
        let mut booking = booking_with_members(3);
        booking.members[2].member_code = Some("ZZTOP9".to_string());
        assert_eq!(booking.resolved_member_code(2), "ZZTOP9");
    }

    #[test]
    fn test_fallback_codes_are_distinct_six_char_alphanumeric() {
        let booking = booking_with_members(3);
        let a = booking.resolved_member_code(1);
        let b = booking.resolved_member_code(2);
        for code in [&a, &b] {
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
            assert_ne!(code.as_str(), "FX001");
        }
        assert_ne!(a, b);
    }

    #[test]
    fn test_member_index_lookup_is_case_insensitive() {
        let booking = booking_with_members(2);
        assert_eq!(booking.member_index_by_email("M1@TEST.COM"), Some(1));
        assert_eq!(booking.member_index_by_email("stranger@test.com"), None);
    }

    #[test]
    fn test_validate_rejects_empty_members() {
        let mut booking = booking_with_members(1);
        booking.members.clear();
        assert!(booking.validate().is_err());
        assert!(booking_with_members(1).validate().is_ok());
    }
}
