//! Ticket image rendering.
//!
//! Produces one PNG admission credential per attendee. Two paths:
//!
//! - **Templated** — the event carries an uploaded background image;
//!   identity text is composited onto it and the output matches the
//!   template's pixel dimensions exactly.
//! - **Default** — no template; a built-in 800×400 branded design is drawn
//!   from scratch.
//!
//! Template decode failures are errors, never a silent fallback to the
//! default design — the dispatcher decides fallback policy explicitly.

mod fetch;
mod render;

pub use fetch::fetch_template;
pub use render::{render_default_ticket, render_ticket_on_template};

use crate::booking::BookingData;
use serde::{Deserialize, Serialize};

/// Ticket rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum TicketRenderError {
    #[error("failed to fetch ticket template: {0}")]
    Fetch(String),

    #[error("failed to decode ticket template: {0}")]
    Decode(String),

    #[error("failed to encode ticket image: {0}")]
    Encode(String),

    #[error("ticket font unavailable: {0}")]
    Font(String),
}

/// Per-recipient render input.
///
/// Constructed fresh for each email send; never persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketData {
    pub booking_code: String,
    /// Resolved per-attendee code: booking code for the primary member,
    /// explicit or generated code for everyone else.
    pub member_code: String,
    pub member_name: String,
    pub event_title: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub member_index: u32,
    pub total_members: u32,
}

impl TicketData {
    /// Build the render input for the member at `index`, applying the
    /// shared member-code resolution rule.
    #[must_use]
    pub fn for_member(booking: &BookingData, index: usize) -> Self {
        let member = booking.members.get(index);
        Self {
            booking_code: booking.booking_code.clone(),
            member_code: booking.resolved_member_code(index),
            member_name: member.map(|m| m.name.clone()).unwrap_or_default(),
            event_title: booking.event_title.clone(),
            date: booking.date.clone(),
            time: booking.time.clone(),
            venue: booking.venue.clone(),
            member_index: index as u32,
            total_members: booking.member_count(),
        }
    }

    /// "{date} • {time}" line shown on every ticket.
    #[must_use]
    pub fn date_time_line(&self) -> String {
        format!("{} • {}", self.date, self.time)
    }
}

/// Render a ticket, choosing the templated or default path.
pub fn render_ticket(
    data: &TicketData,
    template: Option<&[u8]>,
) -> std::result::Result<Vec<u8>, TicketRenderError> {
    match template {
        Some(bytes) => render_ticket_on_template(bytes, data),
        None => render_default_ticket(data),
    }
}
