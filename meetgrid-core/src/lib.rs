//! Core types and logic for meetgrid, the shared "mark your
//! unavailability" calendar.
//!
//! This crate holds everything with real invariants:
//! - `slot` — the (date, time-of-day) coordinate system
//! - `grid` — range resolution over an event's selectable days
//! - `region` — non-overlapping pending selections
//! - `batch` — compaction of slot sets into minimal server requests
//! - `cache` — the optimistic local mirror of server state
//! - `session` — the save/reconcile/rollback protocol
//!
//! Transport is abstracted behind `session::AvailabilityApi`; the CLI
//! provides the HTTP implementation.

pub mod batch;
pub mod cache;
pub mod error;
pub mod grid;
pub mod protocol;
pub mod region;
pub mod session;
pub mod slot;

pub use batch::{Batch, compact};
pub use cache::OptimisticCache;
pub use error::{MeetgridError, MeetgridResult};
pub use grid::{GridCoord, SlotGrid};
pub use protocol::{
    AvailabilityRequest, ClearRequest, EventDetails, EventSummary, LoginRequest, LoginResponse,
    LoginStatus, UnavailabilityDetails, User,
};
pub use region::{Region, RegionId, RegionSet};
pub use session::{AvailabilityApi, BatchAction, SaveOutcome, Session};
pub use slot::{SlotKey, TimeOfDay};
