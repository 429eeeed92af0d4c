//! Event service layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{EventError, Result};
use crate::models::{
    CreateEvent, DeleteResponse, Event, EventDocument, MAX_LIST_EVENTS, UpdateEvent, now_millis,
};
use crate::repository::EventRepository;

/// Event service mapping requests onto single repository calls
///
/// Input is validated by the extractor before it reaches the service.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Store a new event with `created_at == updated_at == now`
    #[instrument(skip(self, create), fields(title = %create.title))]
    pub async fn create(&self, create: CreateEvent) -> Result<Event> {
        let document = EventDocument::new_from(create, now_millis())?;
        let stored = self.repository.insert(document).await?;
        let event = Event::try_from(stored)?;
        info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    /// At most [`MAX_LIST_EVENTS`] events in store order
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Event>> {
        self.repository
            .find_all(MAX_LIST_EVENTS)
            .await?
            .into_iter()
            .map(Event::try_from)
            .collect()
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: ObjectId) -> Result<Event> {
        let document = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))?;
        Event::try_from(document)
    }

    /// Apply the supplied fields and bump `updated_at`
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: ObjectId, update: UpdateEvent) -> Result<Event> {
        let changes = update.to_set_document()?;
        let document = self
            .repository
            .update_by_id(id, changes, now_millis())
            .await?
            .ok_or(EventError::NotFound(id))?;
        info!(event_id = %id, "Event updated");
        Event::try_from(document)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: ObjectId) -> Result<DeleteResponse> {
        self.repository
            .delete_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))?;
        info!(event_id = %id, "Event deleted");
        Ok(DeleteResponse::deleted())
    }
}
