//! The event store.
//!
//! Events are kept in buckets keyed by date. Within a bucket events are
//! sorted by start time, and events added through [`EventStore::add`] never
//! overlap. The whole store is written to its storage slot after every
//! mutation; a mutation whose write fails leaves the in-memory state as it
//! was.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CalGridError, CalGridResult};
use crate::event::Event;
use crate::export::{self, Export, ExportFormat};
use crate::search;
use crate::storage::{STORAGE_KEY, Storage};

/// Events partitioned by day, each bucket sorted by start time.
pub type Buckets = BTreeMap<NaiveDate, Vec<Event>>;

/// What a move does when the destination day already has an overlapping event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePolicy {
    /// Move anyway and report the conflicting events.
    #[default]
    Allow,
    /// Refuse the move with an overlap error.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The event now lives on the destination day. `conflicts` lists the ids
    /// of destination events it overlaps.
    Moved { conflicts: Vec<String> },
    /// Source and destination are the same day.
    Unchanged,
    /// No event with that id on the source day.
    Missing,
}

pub struct EventStore<S: Storage> {
    storage: S,
    buckets: Buckets,
    move_policy: MovePolicy,
    search_term: String,
    // Only populated while a search term is active
    view: Buckets,
}

impl<S: Storage> EventStore<S> {
    /// Open the store persisted in `storage`, or an empty one if the slot has
    /// never been written.
    pub fn load(storage: S) -> CalGridResult<Self> {
        let buckets = match storage.read(STORAGE_KEY)? {
            Some(document) => export::parse_json(&document)?,
            None => Buckets::new(),
        };

        info!(
            days = buckets.len(),
            events = buckets.values().map(Vec::len).sum::<usize>(),
            "loaded event store"
        );

        Ok(EventStore {
            storage,
            buckets,
            move_policy: MovePolicy::default(),
            search_term: String::new(),
            view: Buckets::new(),
        })
    }

    pub fn with_move_policy(mut self, policy: MovePolicy) -> Self {
        self.move_policy = policy;
        self
    }

    pub fn move_policy(&self) -> MovePolicy {
        self.move_policy
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // MUTATIONS:

    /// Add a new event.
    ///
    /// Fails with [`CalGridError::Overlap`] if the event's interval overlaps
    /// any event already on that day.
    pub fn add(&mut self, event: Event) -> CalGridResult<()> {
        event.validate()?;

        if self.event(&event.id).is_some() {
            return Err(CalGridError::DuplicateId(event.id));
        }

        if let Some(existing) = self.events_on(event.date).iter().find(|e| e.overlaps(&event)) {
            return Err(CalGridError::Overlap {
                date: event.date,
                conflicting_id: existing.id.clone(),
            });
        }

        let mut staged = self.buckets.clone();
        let (id, date) = (event.id.clone(), event.date);
        insert_sorted(staged.entry(date).or_default(), event);
        self.commit(staged)?;

        debug!(%id, %date, "added event");
        Ok(())
    }

    /// Replace an existing event, found by id wherever it currently is.
    ///
    /// Overlap with neighbouring events on the same day is not checked. If
    /// the date changed the event is moved to its new day, and overlap there
    /// is handled per the store's [`MovePolicy`] as in [`EventStore::move_event`].
    pub fn update(&mut self, event: Event) -> CalGridResult<()> {
        event.validate()?;

        let (old_date, index) = self
            .locate(&event.id)
            .ok_or_else(|| CalGridError::NotFound(event.id.clone()))?;

        let (id, date) = (event.id.clone(), event.date);
        let conflicts = if old_date == date {
            Vec::new()
        } else {
            self.check_destination(&event)?
        };

        let mut staged = self.buckets.clone();

        if old_date == date {
            if let Some(bucket) = staged.get_mut(&date) {
                bucket[index] = event;
                bucket.sort_by_key(|e| e.start_time);
            }
        } else {
            if let Some(bucket) = staged.get_mut(&old_date) {
                bucket.remove(index);
            }
            insert_sorted(staged.entry(date).or_default(), event);
        }

        self.commit(staged)?;

        if conflicts.is_empty() {
            debug!(%id, from = %old_date, to = %date, "updated event");
        } else {
            warn!(%id, from = %old_date, to = %date, ?conflicts, "updated event overlaps existing events");
        }
        Ok(())
    }

    /// Remove the event `id` from `date`'s bucket. Returns whether anything
    /// was removed; an unknown id is not an error.
    pub fn delete(&mut self, id: &str, date: NaiveDate) -> CalGridResult<bool> {
        let Some(index) = self.events_on(date).iter().position(|e| e.id == id) else {
            return Ok(false);
        };

        let mut staged = self.buckets.clone();
        if let Some(bucket) = staged.get_mut(&date) {
            bucket.remove(index);
        }
        self.commit(staged)?;

        debug!(%id, %date, "deleted event");
        Ok(true)
    }

    /// Move the event `id` from `from`'s bucket to `to`'s bucket.
    ///
    /// The event is only looked up on `from`; if it is not there nothing
    /// happens. Overlap on the destination day is handled per the store's
    /// [`MovePolicy`].
    pub fn move_event(
        &mut self,
        id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CalGridResult<MoveOutcome> {
        let Some(index) = self.events_on(from).iter().position(|e| e.id == id) else {
            return Ok(MoveOutcome::Missing);
        };

        if from == to {
            return Ok(MoveOutcome::Unchanged);
        }

        let mut moved = self.events_on(from)[index].clone();
        moved.date = to;
        let conflicts = self.check_destination(&moved)?;

        let mut staged = self.buckets.clone();
        if let Some(bucket) = staged.get_mut(&from) {
            bucket.remove(index);
        }
        insert_sorted(staged.entry(to).or_default(), moved);
        self.commit(staged)?;

        if conflicts.is_empty() {
            debug!(%id, %from, %to, "moved event");
        } else {
            warn!(%id, %from, %to, ?conflicts, "moved event overlaps existing events");
        }

        Ok(MoveOutcome::Moved { conflicts })
    }

    // QUERIES:

    /// Events on `date`, restricted to search matches while a search term
    /// is active.
    pub fn events_for_date(&self, date: NaiveDate) -> &[Event] {
        self.search_view().get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every event in the store, ignoring the search term. Day order is
    /// ascending; within a day, by start time.
    pub fn all_events(&self) -> Vec<&Event> {
        self.buckets.values().flatten().collect()
    }

    /// Look up an event by id across all days.
    pub fn event(&self, id: &str) -> Option<&Event> {
        self.locate(id)
            .and_then(|(date, index)| self.buckets.get(&date).map(|b| &b[index]))
    }

    /// The full, unfiltered store.
    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    // SEARCH:

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refresh_view();
    }

    /// Days and events matching the active search term (the whole store when
    /// no term is set).
    pub fn search_view(&self) -> &Buckets {
        if self.search_term.is_empty() {
            &self.buckets
        } else {
            &self.view
        }
    }

    // EXPORT:

    /// Render the whole store, ignoring the search term.
    pub fn export(&self, format: ExportFormat, at: DateTime<Utc>) -> CalGridResult<Export> {
        Export::render(&self.buckets, format, at)
    }

    // INTERNAL:

    fn events_on(&self, date: NaiveDate) -> &[Event] {
        self.buckets.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    fn locate(&self, id: &str) -> Option<(NaiveDate, usize)> {
        self.buckets.iter().find_map(|(date, events)| {
            events.iter().position(|e| e.id == id).map(|index| (*date, index))
        })
    }

    /// Ids of events on `arriving.date` that `arriving` would overlap. Under
    /// [`MovePolicy::Reject`] any overlap is an error instead.
    fn check_destination(&self, arriving: &Event) -> CalGridResult<Vec<String>> {
        let conflicts: Vec<String> = self
            .events_on(arriving.date)
            .iter()
            .filter(|e| e.id != arriving.id && e.overlaps(arriving))
            .map(|e| e.id.clone())
            .collect();

        if self.move_policy == MovePolicy::Reject
            && let Some(conflicting_id) = conflicts.first()
        {
            return Err(CalGridError::Overlap {
                date: arriving.date,
                conflicting_id: conflicting_id.clone(),
            });
        }

        Ok(conflicts)
    }

    /// Persist `staged` and make it the current state.
    fn commit(&mut self, staged: Buckets) -> CalGridResult<()> {
        let document = serde_json::to_string(&staged)?;
        self.storage.write(STORAGE_KEY, &document)?;
        self.buckets = staged;
        self.refresh_view();
        Ok(())
    }

    fn refresh_view(&mut self) {
        self.view = if self.search_term.is_empty() {
            Buckets::new()
        } else {
            search::filter(&self.buckets, &self.search_term)
        };
    }
}

/// Append and stable-sort by start time.
fn insert_sorted(bucket: &mut Vec<Event>, event: Event) {
    bucket.push(event);
    bucket.sort_by_key(|e| e.start_time);
}
