//! HTTP handlers for the events API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ObjectIdPath, ValidatedJson,
    errors::responses::{
        BadRequestObjectIdResponse, InternalServerErrorResponse, NotFoundResponse,
        ValidationErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::Result;
use crate::models::{CreateEvent, DeleteResponse, Event, Media, UpdateEvent};
use crate::repository::EventRepository;
use crate::service::EventService;

/// Events router state
pub type EventsState<R> = Arc<EventService<R>>;

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(list_events, create_event, get_event, update_event, delete_event),
    components(
        schemas(Event, CreateEvent, UpdateEvent, Media, DeleteResponse),
        responses(
            BadRequestObjectIdResponse,
            NotFoundResponse,
            ValidationErrorResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "events", description = "Space event management")
    )
)]
pub struct ApiDoc;

/// Create the events router
///
/// Collection routes answer both with and without a trailing slash.
pub fn events_router<R: EventRepository + 'static>() -> Router<EventsState<R>> {
    Router::new()
        .route("/events", get(list_events::<R>).post(create_event::<R>))
        .route("/events/", get(list_events::<R>).post(create_event::<R>))
        .route(
            "/events/{id}",
            get(get_event::<R>)
                .patch(update_event::<R>)
                .delete(delete_event::<R>),
        )
}

/// Create a new event
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> Result<impl IntoResponse> {
    let event = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// List events, at most 100, in store order
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<EventsState<R>>,
) -> Result<Json<Vec<Event>>> {
    let events = service.list().await?;
    Ok(Json(events))
}

/// Get a single event
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = String, Path, description = "Event ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<Json<Event>> {
    let event = service.get(id).await?;
    Ok(Json(event))
}

/// Partially update an event
///
/// Only the supplied fields change; `updated_at` is always refreshed.
#[utoipa::path(
    patch,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = String, Path, description = "Event ObjectId (24 hex characters)")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> Result<Json<Event>> {
    let event = service.update(id, input).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "events",
    params(
        ("id" = String, Path, description = "Event ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Event deleted", body = DeleteResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<EventsState<R>>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<Json<DeleteResponse>> {
    let response = service.delete(id).await?;
    Ok(Json(response))
}
