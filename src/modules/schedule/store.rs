//! Append-only appointment store.
//!
//! Grows for the process lifetime; past appointments stay stored but are
//! excluded from the upcoming projection. No pruning.

use std::sync::RwLock;

use time::PrimitiveDateTime;

use super::models::Appointment;

#[derive(Default)]
pub struct ScheduleStore {
    appointments: RwLock<Vec<Appointment>>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an appointment. Each append is atomic under concurrent
    /// callers; ordering between independent callers is unspecified.
    pub fn append(&self, appointment: Appointment) {
        self.appointments
            .write()
            .expect("schedule store poisoned")
            .push(appointment);
    }

    /// Appointments with a pickup time strictly after `now`, in
    /// insertion order.
    pub fn list_upcoming(&self, now: PrimitiveDateTime) -> Vec<Appointment> {
        self.appointments
            .read()
            .expect("schedule store poisoned")
            .iter()
            .filter(|appointment| appointment.pickup_time > now)
            .cloned()
            .collect()
    }

    /// Every stored appointment, past ones included.
    pub fn all(&self) -> Vec<Appointment> {
        self.appointments
            .read()
            .expect("schedule store poisoned")
            .clone()
    }
}
