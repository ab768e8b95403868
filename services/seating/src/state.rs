//! Application state shared across handlers

use identity::IdentityService;
use std::sync::Arc;

use crate::{
    booking::BookingService,
    clock::Clock,
    repositories::{ContactStore, EventStore},
};

#[derive(Clone)]
pub struct AppState {
    pub bookings: BookingService,
    pub events: Arc<dyn EventStore>,
    pub contacts: Arc<dyn ContactStore>,
    pub identity: IdentityService,
    pub clock: Arc<dyn Clock>,
}
