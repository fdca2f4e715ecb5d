use serde::{Deserialize, Serialize};
use time::{format_description::BorrowedFormatItem, macros::format_description, PrimitiveDateTime};
use uuid::Uuid;

use crate::modules::books::models::BookId;

/// Textual pickup time format: `YYYY-MM-DD HH:MM:SS`, 24-hour clock.
/// Used both for strict request parsing and for human-readable output.
pub const PICKUP_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A booked pickup slot. Book fields are snapshot copies taken at
/// booking time, not live references; the referenced book id is not
/// re-validated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub book_id: BookId,
    pub book_title: String,
    pub book_authors: String,
    pub book_edition_number: Option<String>,
    pub book_publish_year: Option<i32>,
    pub pickup_time: PrimitiveDateTime,
}

impl Appointment {
    /// Pickup time rendered in the request format
    pub fn human_pickup_time(&self) -> String {
        self.pickup_time
            .format(PICKUP_TIME_FORMAT)
            .unwrap_or_else(|_| self.pickup_time.to_string())
    }
}

/// Wire representation of an appointment with a human-readable
/// pickup time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentView {
    pub id: Uuid,
    pub book_id: BookId,
    pub book_title: String,
    pub book_authors: String,
    pub book_edition_number: Option<String>,
    pub book_publish_year: Option<i32>,
    pub pickup_time: String,
}

impl From<&Appointment> for AppointmentView {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            book_id: appointment.book_id,
            book_title: appointment.book_title.clone(),
            book_authors: appointment.book_authors.clone(),
            book_edition_number: appointment.book_edition_number.clone(),
            book_publish_year: appointment.book_publish_year,
            pickup_time: appointment.human_pickup_time(),
        }
    }
}

/// Request model for booking a pickup slot. Both fields are required;
/// the camelCase alias keeps older clients working.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateScheduleRequest {
    #[serde(alias = "bookId")]
    pub book_id: Option<BookId>,
    pub time: Option<String>,
}

/// Response model for the upcoming-schedule listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleListResponse {
    pub schedules: Vec<AppointmentView>,
}
