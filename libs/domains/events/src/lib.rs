//! Events Domain
//!
//! CRUD over historical and upcoming space events stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, ObjectId + body validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Timestamps, not-found mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + MongoDB implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Request, stored and response shapes
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{EventService, MongoEventRepository, events_router};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = mongodb::Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoEventRepository::new(&client.database("space_db"));
//! let router: axum::Router = events_router().with_state(Arc::new(EventService::new(repository)));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{EventError, Result};
pub use handlers::{ApiDoc, EventsState, events_router};
pub use models::{
    CreateEvent, DeleteResponse, Event, EventDate, EventDocument, MAX_LIST_EVENTS, Media, Patch,
    UpdateEvent,
};
pub use mongodb::MongoEventRepository;
pub use repository::EventRepository;
pub use service::EventService;
