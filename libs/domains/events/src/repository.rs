use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{Document, oid::ObjectId};

use crate::error::Result;
use crate::models::EventDocument;

/// Repository trait for event persistence
///
/// Every operation is a single round-trip against the store; per-document
/// atomicity is all that is relied on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a new document and return it with its assigned `_id`
    async fn insert(&self, event: EventDocument) -> Result<EventDocument>;

    /// Up to `limit` documents in store order
    async fn find_all(&self, limit: i64) -> Result<Vec<EventDocument>>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<EventDocument>>;

    /// Apply `changes` and return the post-update document, `None` if absent.
    ///
    /// In the same atomic write `updated_at` becomes the later of `now` and
    /// one millisecond past its stored value, so it strictly increases.
    async fn update_by_id(
        &self,
        id: ObjectId,
        changes: Document,
        now: DateTime<Utc>,
    ) -> Result<Option<EventDocument>>;

    /// Remove and return the document, `None` if absent
    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<EventDocument>>;
}
