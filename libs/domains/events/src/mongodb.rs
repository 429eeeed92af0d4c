//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tracing::instrument;

use crate::error::{EventError, Result};
use crate::models::{EVENTS_COLLECTION, EventDocument, to_bson_datetime};
use crate::repository::EventRepository;

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<EventDocument>,
}

impl MongoEventRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(EVENTS_COLLECTION),
        }
    }
}

/// Single-stage update pipeline for [`EventRepository::update_by_id`].
///
/// Supplied values are wrapped in `$literal` so strings starting with `$`
/// are stored as given. `updated_at` moves to `max(now, updated_at + 1ms)`.
fn update_pipeline(changes: Document, now: DateTime<Utc>) -> Vec<Document> {
    let mut set: Document = changes
        .into_iter()
        .map(|(key, value)| (key, Bson::Document(doc! { "$literal": value })))
        .collect();
    set.insert(
        "updated_at",
        doc! { "$max": [to_bson_datetime(now), { "$add": ["$updated_at", 1_i64] }] },
    );
    vec![doc! { "$set": set }]
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(title = %event.title))]
    async fn insert(&self, mut event: EventDocument) -> Result<EventDocument> {
        let result = self.collection.insert_one(&event).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            EventError::Internal(format!("unexpected inserted _id: {}", result.inserted_id))
        })?;
        event.id = Some(id);
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64) -> Result<Vec<EventDocument>> {
        let cursor = self.collection.find(doc! {}).limit(limit).await?;
        let events: Vec<EventDocument> = cursor.try_collect().await?;
        Ok(events)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<EventDocument>> {
        let event = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(event)
    }

    #[instrument(skip(self, changes))]
    async fn update_by_id(
        &self,
        id: ObjectId,
        changes: Document,
        now: DateTime<Utc>,
    ) -> Result<Option<EventDocument>> {
        let event = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update_pipeline(changes, now))
            .return_document(ReturnDocument::After)
            .await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<EventDocument>> {
        let event = self.collection.find_one_and_delete(doc! { "_id": id }).await?;
        Ok(event)
    }
}
