//! Event domain models
//!
//! Three shapes describe an event:
//! - [`CreateEvent`] / [`UpdateEvent`]: validated request bodies
//! - [`EventDocument`]: what is stored in the `events` collection
//! - [`Event`]: what is returned to clients

use chrono::{DateTime, SubsecRound, TimeZone, Utc};
use mongodb::bson::{self, Bson, DateTime as BsonDateTime, Document, oid::ObjectId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;
use url::Url;
use validator::{Validate, ValidationError};

use crate::error::EventError;

/// Collection holding event documents
pub const EVENTS_COLLECTION: &str = "events";

/// Upper bound on the number of events returned by a list request
pub const MAX_LIST_EVENTS: i64 = 100;

/// Current time truncated to millisecond precision, the resolution of BSON datetimes.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub(crate) fn to_bson_datetime(dt: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_datetime(dt: BsonDateTime, field: &str) -> Result<DateTime<Utc>, EventError> {
    Utc.timestamp_millis_opt(dt.timestamp_millis())
        .single()
        .ok_or_else(|| EventError::Internal(format!("{} is out of range: {}", field, dt)))
}

// Validation helpers shared by the create and update shapes

fn url_error(url: &str) -> ValidationError {
    let mut err = ValidationError::new("url").with_message("must be an absolute http(s) URL".into());
    err.add_param("value".into(), &url);
    err
}

fn is_http_url(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some())
        .unwrap_or(false)
}

/// Accepts absolute `http`/`https` URLs only.
pub fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    if is_http_url(url) {
        Ok(())
    } else {
        Err(url_error(url))
    }
}

/// Every entry must pass [`validate_http_url`]; the first offender is reported.
pub fn validate_http_urls(urls: &[String]) -> Result<(), ValidationError> {
    urls.iter().try_for_each(|url| validate_http_url(url))
}

fn length_error(max: u64, value: &str) -> ValidationError {
    let mut err = ValidationError::new("length");
    err.add_param("max".into(), &max);
    err.add_param("value".into(), &value);
    err
}

fn null_error() -> ValidationError {
    ValidationError::new("null").with_message("may be omitted but not null".into())
}

fn check_len(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        let mut err = length_error(max as u64, value);
        err.add_param("min".into(), &(min as u64));
        return Err(err);
    }
    Ok(())
}

/// Tri-state field of a partial update.
///
/// `Missing` when the key is absent, `Null` for an explicit `null`,
/// `Value` otherwise. Pair with `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> Patch<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|v| match v {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

// `Missing` and `Null` both serialize as `None`; only used for error params.
impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Value(v) => serializer.serialize_some(v),
            Patch::Missing | Patch::Null => serializer.serialize_none(),
        }
    }
}

/// Event date as supplied by a client.
///
/// Deserialization accepts any JSON value so that a malformed date is
/// reported by validation together with the other field violations. Only
/// RFC 3339 strings carrying an offset become [`EventDate::Valid`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventDate {
    Valid(DateTime<Utc>),
    Invalid(String),
}

impl EventDate {
    fn require(&self) -> Result<DateTime<Utc>, EventError> {
        match self {
            Self::Valid(dt) => Ok(*dt),
            Self::Invalid(raw) => Err(EventError::Internal(format!("unvalidated event date: {}", raw))),
        }
    }
}

impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(text) => match DateTime::parse_from_rfc3339(&text) {
                Ok(dt) => Self::Valid(dt.with_timezone(&Utc)),
                Err(_) => Self::Invalid(text),
            },
            other => Self::Invalid(other.to_string()),
        })
    }
}

impl Serialize for EventDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Valid(dt) => dt.serialize(serializer),
            Self::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

fn validate_event_date(date: &EventDate) -> Result<(), ValidationError> {
    match date {
        EventDate::Valid(_) => Ok(()),
        EventDate::Invalid(raw) => {
            let mut err = ValidationError::new("datetime")
                .with_message("must be an RFC 3339 date-time with an offset".into());
            err.add_param("value".into(), raw);
            Err(err)
        }
    }
}

fn put<T: Serialize>(set: &mut Document, key: &str, patch: &Patch<T>) -> Result<(), EventError> {
    match patch {
        Patch::Missing => {}
        Patch::Null => {
            set.insert(key, Bson::Null);
        }
        Patch::Value(v) => {
            set.insert(key, bson::to_bson(v)?);
        }
    }
    Ok(())
}

/// Image and video links attached to an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Media {
    #[serde(default)]
    #[validate(custom(function = "validate_http_urls"))]
    #[schema(example = json!(["https://images.nasa.gov/apollo11.jpg"]))]
    pub images: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_http_urls"))]
    pub videos: Vec<String>,
}

/// Request body for creating an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Apollo 11 Moon Landing")]
    pub title: String,

    pub description: Option<String>,

    /// RFC 3339 timestamp
    #[validate(custom(function = "validate_event_date"))]
    #[schema(value_type = String, format = DateTime, example = "1969-07-20T20:17:00Z")]
    pub date: EventDate,

    #[serde(rename = "type")]
    #[validate(length(max = 100))]
    #[schema(example = "Mission")]
    pub event_type: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(custom(function = "validate_http_url"))]
    pub source: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_http_urls"))]
    pub related_links: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(nested)]
    pub media: Option<Media>,
}

fn validate_title_patch(title: &Patch<String>) -> Result<(), ValidationError> {
    match title {
        Patch::Missing => Ok(()),
        Patch::Null => Err(null_error()),
        Patch::Value(title) => check_len(title, 1, 255),
    }
}

fn validate_date_patch(date: &Patch<EventDate>) -> Result<(), ValidationError> {
    match date {
        Patch::Missing => Ok(()),
        Patch::Null => Err(null_error()),
        Patch::Value(date) => validate_event_date(date),
    }
}

fn validate_type_patch(event_type: &Patch<String>) -> Result<(), ValidationError> {
    event_type.value().map_or(Ok(()), |v| check_len(v, 0, 100))
}

fn validate_location_patch(location: &Patch<String>) -> Result<(), ValidationError> {
    location.value().map_or(Ok(()), |v| check_len(v, 0, 255))
}

fn validate_source_patch(source: &Patch<String>) -> Result<(), ValidationError> {
    source.value().map_or(Ok(()), |v| validate_http_url(v))
}

fn validate_links_patch(links: &Patch<Vec<String>>) -> Result<(), ValidationError> {
    match links {
        Patch::Missing => Ok(()),
        Patch::Null => Err(null_error()),
        Patch::Value(links) => validate_http_urls(links),
    }
}

fn validate_tags_patch(tags: &Patch<Vec<String>>) -> Result<(), ValidationError> {
    match tags {
        Patch::Null => Err(null_error()),
        _ => Ok(()),
    }
}

fn validate_media_patch(media: &Patch<Media>) -> Result<(), ValidationError> {
    match media.value() {
        Some(media) => {
            validate_http_urls(&media.images)?;
            validate_http_urls(&media.videos)
        }
        None => Ok(()),
    }
}

/// Request body for a partial update.
///
/// Absent keys are left untouched. `description`, `type`, `location`,
/// `source` and `media` may be set to `null` to clear them; `title`, `date`,
/// `related_links` and `tags` may not.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[serde(default)]
    #[validate(custom(function = "validate_title_patch"))]
    #[schema(value_type = Option<String>, example = "Updated Test Event")]
    pub title: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_date_patch"))]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub date: Patch<EventDate>,

    #[serde(default, rename = "type")]
    #[validate(custom(function = "validate_type_patch"))]
    #[schema(value_type = Option<String>)]
    pub event_type: Patch<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_location_patch"))]
    #[schema(value_type = Option<String>)]
    pub location: Patch<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_source_patch"))]
    #[schema(value_type = Option<String>)]
    pub source: Patch<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_links_patch"))]
    #[schema(value_type = Option<Vec<String>>)]
    pub related_links: Patch<Vec<String>>,

    #[serde(default)]
    #[validate(custom(function = "validate_tags_patch"))]
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Patch<Vec<String>>,

    #[serde(default)]
    #[validate(custom(function = "validate_media_patch"))]
    #[schema(value_type = Option<Media>)]
    pub media: Patch<Media>,
}

impl UpdateEvent {
    /// Supplied fields only, keyed by their stored names. `updated_at` is
    /// left to the repository.
    pub fn to_set_document(&self) -> Result<Document, EventError> {
        let mut set = Document::new();

        put(&mut set, "title", &self.title)?;
        put(&mut set, "description", &self.description)?;
        match &self.date {
            Patch::Missing => {}
            Patch::Null => {
                set.insert("date", Bson::Null);
            }
            Patch::Value(date) => {
                set.insert("date", to_bson_datetime(date.require()?.trunc_subsecs(3)));
            }
        }
        put(&mut set, "type", &self.event_type)?;
        put(&mut set, "location", &self.location)?;
        put(&mut set, "source", &self.source)?;
        put(&mut set, "related_links", &self.related_links)?;
        put(&mut set, "tags", &self.tags)?;
        put(&mut set, "media", &self.media)?;
        Ok(set)
    }
}

/// Event as stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: BsonDateTime,
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub related_links: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media: Option<Media>,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl EventDocument {
    /// New, not yet persisted document with `created_at == updated_at == now`.
    pub fn new_from(create: CreateEvent, now: DateTime<Utc>) -> Result<Self, EventError> {
        let now = to_bson_datetime(now);
        Ok(Self {
            id: None,
            title: create.title,
            description: create.description,
            date: to_bson_datetime(create.date.require()?),
            event_type: create.event_type,
            location: create.location,
            source: create.source,
            related_links: create.related_links,
            tags: create.tags,
            media: create.media,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Event as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// 24-character hex ObjectId
    #[schema(example = "65f2a1c4e4b0a1b2c3d4e5f6")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub location: Option<String>,
    pub source: Option<String>,
    pub related_links: Vec<String>,
    pub tags: Vec<String>,
    pub media: Option<Media>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<EventDocument> for Event {
    type Error = EventError;

    fn try_from(doc: EventDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .ok_or_else(|| EventError::Internal("event document has no _id".to_string()))?;

        Ok(Self {
            id: id.to_hex(),
            title: doc.title,
            description: doc.description,
            date: from_bson_datetime(doc.date, "date")?,
            event_type: doc.event_type,
            location: doc.location,
            source: doc.source,
            related_links: doc.related_links,
            tags: doc.tags,
            media: doc.media,
            created_at: from_bson_datetime(doc.created_at, "created_at")?,
            updated_at: from_bson_datetime(doc.updated_at, "updated_at")?,
        })
    }
}

/// Confirmation returned after a delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Event deleted successfully")]
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Event deleted successfully".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn sample_create() -> CreateEvent {
        serde_json::from_value(json!({
            "title": "Test Space Event",
            "description": "This is a test space event",
            "date": "2024-03-14T10:00:00Z",
            "type": "Test",
            "location": "Test Location",
            "tags": ["test", "space"],
            "source": "https://test.com",
            "related_links": ["https://test.com/related"],
            "media": {
                "images": ["https://test.com/image.jpg"],
                "videos": ["https://test.com/video.mp4"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_create_event_valid() {
        let create = sample_create();
        assert!(create.validate().is_ok());
        assert_eq!(create.event_type.as_deref(), Some("Test"));
    }

    #[test]
    fn test_create_event_defaults() {
        let create: CreateEvent =
            serde_json::from_value(json!({"title": "Launch", "date": "2024-03-14T10:00:00Z"})).unwrap();
        assert!(create.related_links.is_empty());
        assert!(create.tags.is_empty());
        assert!(create.media.is_none());
        assert!(create.validate().is_ok());
    }

    #[test]
    fn test_create_event_missing_date_fails_to_parse() {
        let result: Result<CreateEvent, _> = serde_json::from_value(json!({"title": "Launch"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_event_invalid_date_reported_with_other_fields() {
        let create: CreateEvent =
            serde_json::from_value(json!({"title": "", "date": "invalid-date"})).unwrap();
        assert_eq!(create.date, EventDate::Invalid("invalid-date".to_string()));

        let errors = create.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert_eq!(fields["date"][0].code, "datetime");
    }

    #[test]
    fn test_event_date_requires_offset() {
        let parse = |value: Value| serde_json::from_value::<EventDate>(value).unwrap();

        assert!(matches!(parse(json!("2024-03-14T10:00:00+02:00")), EventDate::Valid(_)));
        assert!(matches!(parse(json!("2024-03-14T10:00:00")), EventDate::Invalid(_)));
        assert_eq!(parse(json!(1710410400)), EventDate::Invalid("1710410400".to_string()));
        assert_eq!(parse(json!(null)), EventDate::Invalid("null".to_string()));
    }

    #[test]
    fn test_event_date_is_normalized_to_utc() {
        let date: EventDate = serde_json::from_value(json!("2024-03-14T12:00:00+02:00")).unwrap();
        assert_eq!(date, EventDate::Valid(Utc.with_ymd_and_hms(2024, 3, 14, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_new_from_unvalidated_date_is_internal_error() {
        let mut create = sample_create();
        create.date = EventDate::Invalid("yesterday".to_string());
        assert!(matches!(
            EventDocument::new_from(create, now_millis()),
            Err(EventError::Internal(_))
        ));
    }

    #[test]
    fn test_create_event_empty_title_rejected() {
        let mut create = sample_create();
        create.title = String::new();
        let errors = create.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_create_event_length_limits() {
        let mut create = sample_create();
        create.title = "x".repeat(256);
        create.event_type = Some("t".repeat(101));
        create.location = Some("l".repeat(256));
        let errors = create.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("location"));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_create_event_title_length_counts_chars() {
        let mut create = sample_create();
        create.title = "🚀".repeat(255);
        assert!(create.validate().is_ok());
    }

    #[test]
    fn test_url_validation() {
        assert!(validate_http_url("https://test.com").is_ok());
        assert!(validate_http_url("HTTP://test.com/path?q=1").is_ok());
        assert!(validate_http_url("ftp://test.com").is_err());
        assert!(validate_http_url("test.com").is_err());
        assert!(validate_http_url("not a url").is_err());
        assert!(validate_http_urls(&["https://a.com".to_string(), "nope".to_string()]).is_err());
    }

    #[test]
    fn test_create_event_bad_nested_media_url() {
        let mut create = sample_create();
        create.media = Some(Media {
            images: vec!["not-a-url".to_string()],
            videos: vec![],
        });
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_create_event_bad_source_and_links() {
        let mut create = sample_create();
        create.source = Some("mailto:someone@test.com".to_string());
        create.related_links = vec!["https://ok.com".to_string(), "::".to_string()];
        let errors = create.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("source"));
        assert!(errors.field_errors().contains_key("related_links"));
    }

    #[test]
    fn test_patch_deserialization_tracks_presence() {
        let update: UpdateEvent =
            serde_json::from_value(json!({"title": "Updated Test Event", "description": null})).unwrap();
        assert_eq!(update.title, Patch::Value("Updated Test Event".to_string()));
        assert_eq!(update.description, Patch::Null);
        assert_eq!(update.location, Patch::Missing);
        assert_eq!(update.date, Patch::Missing);
    }

    #[test]
    fn test_update_event_null_title_rejected() {
        let update: UpdateEvent = serde_json::from_value(json!({"title": null})).unwrap();
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_update_event_null_date_and_tags_rejected() {
        let update: UpdateEvent = serde_json::from_value(json!({"date": null, "tags": null})).unwrap();
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("date"));
        assert!(errors.field_errors().contains_key("tags"));
    }

    #[test]
    fn test_update_event_validates_supplied_values() {
        let update: UpdateEvent = serde_json::from_value(json!({
            "title": "",
            "source": "nope",
            "media": {"videos": ["ftp://video"]}
        }))
        .unwrap();
        let errors = update.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("source"));
        assert!(fields.contains_key("media"));
    }

    #[test]
    fn test_update_event_invalid_date_rejected() {
        let update: UpdateEvent = serde_json::from_value(json!({"date": "next tuesday"})).unwrap();
        let errors = update.validate().unwrap_err();
        assert_eq!(errors.field_errors()["date"][0].code, "datetime");
    }

    #[test]
    fn test_patch_serializes_as_option() {
        assert_eq!(serde_json::to_value(Patch::Value("x".to_string())).unwrap(), json!("x"));
        assert_eq!(serde_json::to_value(Patch::<String>::Null).unwrap(), Value::Null);
        assert_eq!(serde_json::to_value(Patch::<String>::Missing).unwrap(), Value::Null);
    }

    #[test]
    fn test_update_event_empty_body_is_valid() {
        let update: UpdateEvent = serde_json::from_value(json!({})).unwrap();
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_to_set_document_contains_only_supplied_fields() {
        let update: UpdateEvent = serde_json::from_value(json!({
            "title": "Updated Test Event",
            "location": null,
            "tags": ["a"]
        }))
        .unwrap();

        let set = update.to_set_document().unwrap();

        assert_eq!(set.get_str("title").unwrap(), "Updated Test Event");
        assert_eq!(set.get("location"), Some(&Bson::Null));
        assert_eq!(set.get_array("tags").unwrap().len(), 1);
        assert!(!set.contains_key("description"));
        assert!(!set.contains_key("date"));
        assert!(!set.contains_key("updated_at"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_to_set_document_stores_date_as_bson_datetime() {
        let update: UpdateEvent =
            serde_json::from_value(json!({"date": "2024-03-15T08:30:00.123456Z"})).unwrap();
        let set = update.to_set_document().unwrap();
        let date = set.get_datetime("date").unwrap();
        assert_eq!(date.timestamp_millis() % 1000, 123);
    }

    #[test]
    fn test_to_set_document_media_is_subdocument() {
        let update: UpdateEvent = serde_json::from_value(json!({
            "media": {"images": ["https://test.com/new.jpg"]}
        }))
        .unwrap();
        let set = update.to_set_document().unwrap();
        let media = set.get_document("media").unwrap();
        assert_eq!(media.get_array("images").unwrap().len(), 1);
        assert!(media.get_array("videos").unwrap().is_empty());
    }

    #[test]
    fn test_new_from_sets_equal_timestamps() {
        let now = now_millis();
        let doc = EventDocument::new_from(sample_create(), now).unwrap();
        assert!(doc.id.is_none());
        assert_eq!(doc.created_at, doc.updated_at);
        assert_eq!(doc.created_at.timestamp_millis(), now.timestamp_millis());
    }

    #[test]
    fn test_document_round_trip_through_bson_omits_missing_id() {
        let doc = EventDocument::new_from(sample_create(), now_millis()).unwrap();
        let bson_doc = bson::to_document(&doc).unwrap();
        assert!(!bson_doc.contains_key("_id"));
        assert!(matches!(bson_doc.get("date"), Some(Bson::DateTime(_))));
        assert_eq!(bson_doc.get_str("type").unwrap(), "Test");
    }

    #[test]
    fn test_event_from_document() {
        let now = now_millis();
        let mut doc = EventDocument::new_from(sample_create(), now).unwrap();
        let id = ObjectId::new();
        doc.id = Some(id);

        let event = Event::try_from(doc).unwrap();
        assert_eq!(event.id, id.to_hex());
        assert_eq!(event.created_at, now);
        assert_eq!(event.updated_at, now);
        assert_eq!(event.date.to_rfc3339(), "2024-03-14T10:00:00+00:00");
        assert_eq!(event.tags, vec!["test", "space"]);
    }

    #[test]
    fn test_event_from_document_without_id_fails() {
        let doc = EventDocument::new_from(sample_create(), now_millis()).unwrap();
        assert!(matches!(Event::try_from(doc), Err(EventError::Internal(_))));
    }

    #[test]
    fn test_event_serializes_type_key() {
        let mut doc = EventDocument::new_from(sample_create(), now_millis()).unwrap();
        doc.id = Some(ObjectId::new());
        let value = serde_json::to_value(Event::try_from(doc).unwrap()).unwrap();
        assert_eq!(value["type"], "Test");
        assert!(value.get("event_type").is_none());
        assert_eq!(value["media"]["images"][0], "https://test.com/image.jpg");
    }

    #[test]
    fn test_now_millis_has_no_sub_millisecond_part() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
