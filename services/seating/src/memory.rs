//! In-memory stores for tests

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    models::{ActivityLogEntry, Contact, Event, EventPayload, NewBooking, SeatStatus},
    repositories::{BookingStore, ContactStore, EventStore},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn check(failing: &AtomicBool) -> DatabaseResult<()> {
    if failing.load(Ordering::SeqCst) {
        return Err(DatabaseError::Unavailable("memory store offline".to_string()));
    }
    Ok(())
}

/// Row of the in-memory `bookings` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRow {
    pub id: i64,
    pub selected_seat: String,
    pub status: SeatStatus,
}

#[derive(Default)]
struct BookingTables {
    bookings: Vec<BookingRow>,
    activity: Vec<ActivityLogEntry>,
    next_id: i64,
}

/// Booking store holding both tables behind one lock so claims stay atomic
#[derive(Clone, Default)]
pub struct MemoryBookingStore {
    tables: Arc<Mutex<BookingTables>>,
    failing: Arc<AtomicBool>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn bookings(&self) -> Vec<BookingRow> {
        lock(&self.tables).bookings.clone()
    }

    pub fn activity(&self) -> Vec<ActivityLogEntry> {
        lock(&self.tables).activity.clone()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn claim_seat(&self, booking: &NewBooking) -> DatabaseResult<Option<ActivityLogEntry>> {
        check(&self.failing)?;
        let mut tables = lock(&self.tables);

        let taken = tables.bookings.iter().any(|row| {
            row.selected_seat == booking.selected_seat && row.status == SeatStatus::Occupied
        });
        if taken {
            return Ok(None);
        }

        tables.next_id += 1;
        let id = tables.next_id;
        tables.bookings.push(BookingRow {
            id,
            selected_seat: booking.selected_seat.clone(),
            status: SeatStatus::Occupied,
        });

        let entry = ActivityLogEntry {
            id,
            full_name: booking.full_name.clone(),
            division_name: booking.division_name.clone(),
            selected_seat: booking.selected_seat.clone(),
            status: SeatStatus::Occupied,
            created_at: Utc::now(),
        };
        tables.activity.push(entry.clone());
        Ok(Some(entry))
    }

    async fn occupied_seats(&self) -> DatabaseResult<Vec<String>> {
        check(&self.failing)?;
        let mut seats: Vec<String> = lock(&self.tables)
            .bookings
            .iter()
            .filter(|row| row.status == SeatStatus::Occupied)
            .map(|row| row.selected_seat.clone())
            .collect();
        seats.sort();
        seats.dedup();
        Ok(seats)
    }

    async fn reset_occupied(&self) -> DatabaseResult<u64> {
        check(&self.failing)?;
        let mut tables = lock(&self.tables);
        let mut flipped = 0;
        for row in tables
            .bookings
            .iter_mut()
            .filter(|row| row.status == SeatStatus::Occupied)
        {
            row.status = SeatStatus::Available;
            flipped += 1;
        }
        Ok(flipped)
    }

    async fn activity_log(&self) -> DatabaseResult<Vec<ActivityLogEntry>> {
        check(&self.failing)?;
        Ok(self.activity())
    }

    async fn activity_for_booking(&self, booking_id: i64) -> DatabaseResult<Vec<ActivityLogEntry>> {
        check(&self.failing)?;
        Ok(lock(&self.tables)
            .activity
            .iter()
            .filter(|entry| entry.id == booking_id)
            .cloned()
            .collect())
    }

    async fn delete_activity(&self, id: i64) -> DatabaseResult<bool> {
        check(&self.failing)?;
        let mut tables = lock(&self.tables);
        let before = tables.activity.len();
        tables.activity.retain(|entry| entry.id != id);
        Ok(tables.activity.len() != before)
    }
}

#[derive(Default)]
struct EventTable {
    events: Vec<Event>,
    next_id: i64,
}

#[derive(Clone, Default)]
pub struct MemoryEventStore {
    table: Arc<Mutex<EventTable>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn create(&self, payload: &EventPayload) -> DatabaseResult<Event> {
        let mut table = lock(&self.table);
        table.next_id += 1;
        let event = Event {
            id: table.next_id,
            name: payload.name.clone(),
            time: payload.time.clone(),
            detail: payload.detail.clone(),
        };
        table.events.push(event.clone());
        Ok(event)
    }

    async fn list(&self) -> DatabaseResult<Vec<Event>> {
        Ok(lock(&self.table).events.clone())
    }

    async fn update(&self, id: i64, payload: &EventPayload) -> DatabaseResult<Option<Event>> {
        let mut table = lock(&self.table);
        Ok(table.events.iter_mut().find(|e| e.id == id).map(|event| {
            event.name = payload.name.clone();
            event.time = payload.time.clone();
            event.detail = payload.detail.clone();
            event.clone()
        }))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut table = lock(&self.table);
        let before = table.events.len();
        table.events.retain(|e| e.id != id);
        Ok(table.events.len() != before)
    }
}

#[derive(Clone, Default)]
pub struct MemoryContactStore {
    contacts: Arc<Mutex<Vec<Contact>>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn save(&self, contact: &Contact) -> DatabaseResult<()> {
        lock(&self.contacts).push(contact.clone());
        Ok(())
    }

    async fn list(&self) -> DatabaseResult<Vec<Contact>> {
        Ok(lock(&self.contacts).clone())
    }
}
