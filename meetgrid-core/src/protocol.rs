//! Wire types for the meetgrid backend API.
//!
//! These shapes mirror the server contract exactly and are treated as
//! stable: dates are ISO `YYYY-MM-DD`, times of day are the three
//! lowercase enum literals, and per-slot name lists travel as
//! comma-joined strings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::batch::Batch;
use crate::slot::TimeOfDay;

/// `date -> time of day -> comma-joined display names`, as reported by
/// `GET /api/events/{id}`.
pub type UnavailabilityDetails = BTreeMap<NaiveDate, BTreeMap<TimeOfDay, String>>;

/// Externally supplied identity. The core takes it as given and never
/// validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// One shared event, as listed and embedded in detail responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub public_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

/// `GET /api/events/{id}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub event: EventSummary,
    pub unavailability_details: UnavailabilityDetails,
}

/// Body of `POST|DELETE /api/events/{id}/availability` — one per batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub user_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub times_of_day: Vec<TimeOfDay>,
}

impl AvailabilityRequest {
    pub fn from_batch(user_id: i64, batch: &Batch) -> AvailabilityRequest {
        AvailabilityRequest {
            user_id,
            start_date: batch.start_date,
            end_date: batch.end_date,
            times_of_day: batch.times_of_day.clone(),
        }
    }
}

/// Body of `DELETE /api/events/{id}/my-availability`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearRequest {
    pub user_id: i64,
}

/// Body of `POST /api/users/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
}

/// Whether login matched an existing user or registered a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginStatus {
    Exists,
    Created,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: LoginStatus,
    pub user: User,
}
