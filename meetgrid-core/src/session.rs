//! Session controller: one user working on one open event.
//!
//! Owns the selection staging area and the optimistic cache, and drives
//! the save protocol against the backend: mutate the cache and drop the
//! regions synchronously, fan the compacted batches out concurrently,
//! then either reconcile (refetch on success) or roll back (full reload
//! on any failure). Transport lives behind [`AvailabilityApi`] so the
//! core never touches HTTP itself.

use futures::future::try_join_all;

use crate::batch::compact;
use crate::cache::OptimisticCache;
use crate::error::{MeetgridError, MeetgridResult};
use crate::grid::{GridCoord, SlotGrid};
use crate::protocol::{AvailabilityRequest, ClearRequest, EventDetails, EventSummary, User};
use crate::region::{RegionId, RegionSet};
use crate::slot::SlotKey;

/// Direction of a save operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    /// `POST` — mark the slots unavailable.
    Add,
    /// `DELETE` — withdraw the marks.
    Remove,
}

/// What a save/remove call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Submitted,
    /// Another operation's batches are still in flight. An owned
    /// `&mut Session` cannot observe this (the borrow already serializes
    /// calls); it surfaces when the session is driven through a shared
    /// handle that releases its lock across await points.
    Busy,
    /// Nothing selected; silently a no-op.
    NothingSelected,
}

/// Backend operations the session needs. Implemented over HTTP by the
/// CLI and by in-memory fakes in tests.
pub trait AvailabilityApi {
    async fn fetch_event(&self, public_id: &str) -> MeetgridResult<EventDetails>;
    async fn send_availability(
        &self,
        public_id: &str,
        action: BatchAction,
        request: &AvailabilityRequest,
    ) -> MeetgridResult<()>;
    async fn clear_availability(
        &self,
        public_id: &str,
        request: &ClearRequest,
    ) -> MeetgridResult<()>;
}

/// State tied to the currently open event, created on open and replaced
/// wholesale on event switch.
#[derive(Debug)]
pub struct EventContext {
    event: EventSummary,
    grid: SlotGrid,
    regions: RegionSet,
    cache: OptimisticCache,
}

impl EventContext {
    fn from_details(details: EventDetails) -> EventContext {
        let grid = SlotGrid::from_span(details.event.earliest, details.event.latest);
        let mut cache = OptimisticCache::new();
        cache.seed(&details.unavailability_details);
        EventContext {
            event: details.event,
            grid,
            regions: RegionSet::new(),
            cache,
        }
    }
}

pub struct Session<A> {
    api: A,
    user: User,
    context: Option<EventContext>,
    saving: bool,
}

impl<A: AvailabilityApi> Session<A> {
    pub fn new(api: A, user: User) -> Session<A> {
        Session {
            api,
            user,
            context: None,
            saving: false,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn event(&self) -> Option<&EventSummary> {
        self.context.as_ref().map(|c| &c.event)
    }

    pub fn grid(&self) -> MeetgridResult<&SlotGrid> {
        Ok(&self.context()?.grid)
    }

    pub fn regions(&self) -> MeetgridResult<&RegionSet> {
        Ok(&self.context()?.regions)
    }

    pub fn cache(&self) -> MeetgridResult<&OptimisticCache> {
        Ok(&self.context()?.cache)
    }

    fn context(&self) -> MeetgridResult<&EventContext> {
        self.context.as_ref().ok_or(MeetgridError::NoOpenEvent)
    }

    fn context_mut(&mut self) -> MeetgridResult<&mut EventContext> {
        self.context.as_mut().ok_or(MeetgridError::NoOpenEvent)
    }

    /// Fetch an event and make it the current one, discarding any previous
    /// selection and cache.
    pub async fn open_event(&mut self, public_id: &str) -> MeetgridResult<()> {
        let details = self.api.fetch_event(public_id).await?;
        self.context = Some(EventContext::from_details(details));
        Ok(())
    }

    /// Re-fetch the current event from the server and replace all local
    /// state with it. Used for reconciliation and rollback alike.
    pub async fn reload(&mut self) -> MeetgridResult<()> {
        let public_id = self.context()?.event.public_id.clone();
        self.open_event(&public_id).await
    }

    /// Single-click toggle on one slot.
    pub fn toggle_slot(&mut self, key: SlotKey) -> MeetgridResult<()> {
        self.context_mut()?.regions.toggle(key);
        Ok(())
    }

    /// Range selection between two grid cells. Returns the slots that were
    /// actually added (already-occupied ones are skipped); empty when the
    /// whole span was occupied or an endpoint was off the grid.
    pub fn select_range(&mut self, a: GridCoord, b: GridCoord) -> MeetgridResult<Vec<SlotKey>> {
        let ctx = self.context_mut()?;
        let span = ctx.grid.slots_between(a, b);
        Ok(match ctx.regions.commit(span) {
            Some(region) => region.slots().iter().copied().collect(),
            None => Vec::new(),
        })
    }

    pub fn delete_region(&mut self, id: RegionId) -> MeetgridResult<()> {
        self.context_mut()?.regions.delete(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) -> MeetgridResult<()> {
        self.context_mut()?.regions.clear();
        Ok(())
    }

    /// Submit every pending region as one save (`Add`) or remove
    /// (`Remove`) operation.
    ///
    /// The cache mutation and region clearing happen before the first
    /// await, so a caller can render the optimistic state immediately.
    /// All batches are dispatched concurrently; any failure counts as
    /// total failure and triggers a full reload before the error is
    /// returned. Success triggers a reconciliation refetch, which is
    /// authoritative.
    pub async fn save(&mut self, action: BatchAction) -> MeetgridResult<SaveOutcome> {
        if self.context.is_none() {
            return Err(MeetgridError::NoOpenEvent);
        }
        if self.saving {
            return Ok(SaveOutcome::Busy);
        }

        let user = self.user.clone();
        let ctx = self.context_mut()?;
        let slots = ctx.regions.all_slots();
        if slots.is_empty() {
            return Ok(SaveOutcome::NothingSelected);
        }

        self.saving = true;

        let ctx = self.context_mut()?;
        match action {
            BatchAction::Add => ctx.cache.apply_add(&user.name, slots.iter().copied()),
            BatchAction::Remove => ctx.cache.apply_remove(&user.name, slots.iter().copied()),
        }
        ctx.regions.clear();
        let public_id = ctx.event.public_id.clone();

        let requests: Vec<AvailabilityRequest> = compact(slots)
            .iter()
            .map(|batch| AvailabilityRequest::from_batch(user.id, batch))
            .collect();

        let result = try_join_all(
            requests
                .iter()
                .map(|request| self.api.send_availability(&public_id, action, request)),
        )
        .await;
        self.saving = false;

        match result {
            Ok(_) => {
                // Fold in whatever other users did meanwhile
                self.reload().await?;
                Ok(SaveOutcome::Submitted)
            }
            Err(err) => {
                // Batches may have landed partially on the server; the only
                // safe remedy is a full reload, never a local undo.
                let _ = self.reload().await;
                Err(err)
            }
        }
    }

    /// Wipe every mark the user has on this event, server-side and local.
    pub async fn clear_all(&mut self) -> MeetgridResult<()> {
        let ctx = self.context_mut()?;
        ctx.regions.clear();
        let public_id = ctx.event.public_id.clone();
        let request = ClearRequest { user_id: self.user.id };

        self.api.clear_availability(&public_id, &request).await?;
        self.reload().await
    }
}
