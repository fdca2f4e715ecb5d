//! Pickup appointment scheduling.

use std::sync::Arc;

use thiserror::Error;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::modules::books::cache::CatalogCache;
use crate::modules::books::models::BookId;
use crate::modules::books::source::FetchError;

use super::models::{Appointment, PICKUP_TIME_FORMAT};
use super::store::ScheduleStore;

/// Why a scheduling attempt was rejected. The caller-error variants are
/// mutually exclusive and produced in gate order; `Source` is an
/// infrastructure failure from a triggered catalog build.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("book_id and time are both required")]
    InvalidPayload,

    #[error("time must match the format YYYY-MM-DD HH:MM:SS")]
    InvalidDateFormat,

    #[error("pickup time must be strictly in the future")]
    PastDate,

    #[error("no book with id {0}")]
    BookNotFound(BookId),

    #[error(transparent)]
    Source(#[from] FetchError),
}

/// Validates pickup requests and records accepted appointments.
pub struct AppointmentScheduler {
    cache: Arc<CatalogCache>,
    store: Arc<ScheduleStore>,
}

impl AppointmentScheduler {
    pub fn new(cache: Arc<CatalogCache>, store: Arc<ScheduleStore>) -> Self {
        Self { cache, store }
    }

    /// Validate a pickup request and, on success, snapshot the book into
    /// a stored appointment.
    ///
    /// The gates run in a fixed order, each failing closed: payload
    /// presence, strict time parse, strictly-future check, then book
    /// lookup (which may trigger the one-time catalog build). A rejected
    /// attempt leaves both store and cache unchanged.
    pub async fn schedule(
        &self,
        book_id: Option<BookId>,
        raw_time: Option<&str>,
        now: PrimitiveDateTime,
    ) -> Result<Appointment, ScheduleError> {
        let (book_id, raw_time) = match (book_id, raw_time) {
            (Some(id), Some(time)) if !time.trim().is_empty() => (id, time.trim()),
            _ => return Err(ScheduleError::InvalidPayload),
        };

        let pickup_time = PrimitiveDateTime::parse(raw_time, PICKUP_TIME_FORMAT)
            .map_err(|_| ScheduleError::InvalidDateFormat)?;

        if pickup_time <= now {
            return Err(ScheduleError::PastDate);
        }

        let catalog = self.cache.get().await?;
        let book = catalog
            .find(book_id)
            .ok_or(ScheduleError::BookNotFound(book_id))?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            book_id: book.id,
            book_title: book.title.clone(),
            book_authors: book.authors.clone(),
            book_edition_number: book.edition_number.clone(),
            book_publish_year: book.publish_year,
            pickup_time,
        };

        tracing::info!(
            appointment_id = %appointment.id,
            book_id = book.id,
            pickup_time = %appointment.human_pickup_time(),
            "appointment scheduled"
        );

        self.store.append(appointment.clone());
        Ok(appointment)
    }
}
