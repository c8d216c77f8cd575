//! A single log message and its text round-trip.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::schema::MalformedPolicy;
use crate::location::{decode, encode, LocationRecord};
use crate::record::level::{LogLevel, LogMessageType};
use crate::record::RecordError;

/// Renders one field of a message for display.
pub type FieldAccessor = fn(&LogMessage) -> String;

/// One entry in the log.
///
/// A passive holder: the location is carried as a typed `LocationRecord`
/// and only turned into text by the codec when the message is serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    pub level: LogLevel,
    pub message_type: LogMessageType,
    /// Local time of the source machine, including its UTC offset.
    pub time: DateTime<FixedOffset>,
    pub message: String,
    #[serde(default)]
    pub exception_text: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub machine_name: Option<String>,
    /// Call site, serialized as `Class.Method(File:Line)`.
    #[serde(default)]
    pub location: Option<LocationRecord>,
    #[serde(default)]
    pub user_name: Option<String>,
    /// Numeric severity; starts out equal to `level`.
    pub level_value: i32,
    /// Logging category, `"*"` when unspecified.
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub managed_thread_id: i32,
    #[serde(default)]
    pub task_id: Option<i32>,
    #[serde(default)]
    pub work_session_id: Option<Uuid>,
    /// Free-form key/value pairs.
    #[serde(default)]
    pub attributes: Vec<(String, String)>,
}

fn default_category() -> String {
    "*".to_string()
}

fn render(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

impl LogMessage {
    /// Field names paired with their renderers, in declaration order.
    pub const FIELDS: &'static [(&'static str, FieldAccessor)] = &[
        ("id", |m: &LogMessage| m.id.to_string()),
        ("level", |m: &LogMessage| format!("{:?}", m.level)),
        ("message_type", |m: &LogMessage| format!("{:?}", m.message_type)),
        ("time", |m: &LogMessage| m.time.to_rfc3339()),
        ("message", |m: &LogMessage| m.message.clone()),
        ("exception_text", |m: &LogMessage| render(&m.exception_text)),
        ("source", |m: &LogMessage| render(&m.source)),
        ("target", |m: &LogMessage| render(&m.target)),
        ("machine_name", |m: &LogMessage| render(&m.machine_name)),
        ("location", |m: &LogMessage| render(&m.location_text())),
        ("user_name", |m: &LogMessage| render(&m.user_name)),
        ("level_value", |m: &LogMessage| m.level_value.to_string()),
        ("category", |m: &LogMessage| m.category.clone()),
        ("managed_thread_id", |m: &LogMessage| m.managed_thread_id.to_string()),
        ("task_id", |m: &LogMessage| render(&m.task_id.map(|id| id.to_string()))),
        ("work_session_id", |m: &LogMessage| {
            render(&m.work_session_id.map(|id| id.to_string()))
        }),
        ("attributes", |m: &LogMessage| {
            m.attributes
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(",")
        }),
    ];

    /// Create a message with a fresh id and every optional field unset.
    pub fn create(
        level: LogLevel,
        message_type: LogMessageType,
        time: DateTime<FixedOffset>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message_type,
            time,
            message: message.into(),
            exception_text: None,
            source: None,
            target: None,
            machine_name: None,
            location: None,
            user_name: None,
            level_value: level.into(),
            category: default_category(),
            managed_thread_id: 0,
            task_id: None,
            work_session_id: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_exception_text(mut self, text: impl Into<String>) -> Self {
        self.exception_text = Some(text.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_machine_name(mut self, name: impl Into<String>) -> Self {
        self.machine_name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: LocationRecord) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_managed_thread_id(mut self, id: i32) -> Self {
        self.managed_thread_id = id;
        self
    }

    pub fn with_task_id(mut self, id: i32) -> Self {
        self.task_id = Some(id);
        self
    }

    pub fn with_work_session_id(mut self, id: Uuid) -> Self {
        self.work_session_id = Some(id);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// The message time converted to UTC.
    pub fn utc_time(&self) -> DateTime<Utc> {
        self.time.with_timezone(&Utc)
    }

    /// Canonical location string, if a location is set.
    pub fn location_text(&self) -> Option<String> {
        self.location.as_ref().map(encode)
    }

    /// Every field name with its rendered value.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        Self::FIELDS
            .iter()
            .map(move |(name, accessor)| (*name, accessor(self)))
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuild a message from its JSON form.
    ///
    /// A location string that fails to decode is handled by `policy`;
    /// `Ok(None)` means the policy discarded the record. Missing `category`
    /// and `level_value` get the same defaults `create` assigns.
    pub fn rehydrate(json: &str, policy: MalformedPolicy) -> Result<Option<Self>, RecordError> {
        let mut value: Value = serde_json::from_str(json)?;

        // Pull the location out so a bad string reaches the policy instead
        // of failing deserialization of the whole record.
        let location_text = match value.get_mut("location").map(Value::take) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text),
            Some(other) => return Err(RecordError::LocationNotText(other.to_string())),
        };

        if let Some(fields) = value.as_object_mut() {
            if !fields.contains_key("level_value") {
                if let Some(level) = fields.get("level") {
                    let level = LogLevel::deserialize(level)?;
                    fields.insert("level_value".to_string(), Value::from(i32::from(level)));
                }
            }
        }

        let mut message: LogMessage = serde_json::from_value(value)?;

        let Some(text) = location_text else {
            return Ok(Some(message));
        };

        match decode(&text) {
            Ok(location) => message.location = Some(location),
            Err(error) => {
                tracing::warn!(
                    id = %message.id,
                    location = %text,
                    %error,
                    ?policy,
                    "Malformed location in stored record"
                );
                match policy {
                    MalformedPolicy::Absent => {}
                    MalformedPolicy::Placeholder => {
                        message.location = Some(LocationRecord::unknown());
                    }
                    MalformedPolicy::Discard => return Ok(None),
                }
            }
        }

        Ok(Some(message))
    }
}
