//! Form-level metadata
//!
//! Everything about a form except its questions: title, visibility, the
//! window it accepts responses in, and response limits. Hosts hand in an
//! [`InitialForm`] and receive a [`SavePayload`].

use crate::config::EditorConfig;
use crate::error::{SessionError, SessionResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Date format of open/close instants
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Form-level settings edited alongside the questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMetadata {
    /// Form title
    pub title: String,
    /// Form description
    pub description: String,
    /// Visibility tag, passed through to the host
    pub visibility: String,
    /// Day responses open
    pub opens: Option<NaiveDate>,
    /// Time of day responses open
    pub opens_time: Option<NaiveTime>,
    /// Day responses close
    pub closes: Option<NaiveDate>,
    /// Time of day responses close
    pub closes_time: Option<NaiveTime>,
    /// Responses are not linked to respondents
    pub anonymous: bool,
    /// Total response cap, if any
    pub max_responses: Option<u32>,
    /// Responses allowed per respondent
    pub individual_limit: u32,
    /// Respondents may edit submitted responses
    pub editable_responses: bool,
}

impl FormMetadata {
    /// Defaults for a new form
    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            title: config.default_title.clone(),
            description: config.default_description.clone(),
            visibility: config.default_visibility.clone(),
            opens: None,
            opens_time: None,
            closes: None,
            closes_time: None,
            anonymous: false,
            max_responses: None,
            individual_limit: config.default_individual_limit,
            editable_responses: false,
        }
    }

    /// Metadata of a stored form
    ///
    /// Empty titles and descriptions fall back to the configured defaults.
    /// Instants that are not dates are logged and left unset.
    #[must_use]
    pub fn from_initial(initial: &InitialForm, config: &EditorConfig) -> Self {
        let mut meta = Self::from_config(config);

        if let Some(title) = initial.title.as_deref().filter(|t| !t.is_empty()) {
            meta.title = title.to_string();
        }
        if let Some(description) = initial.description.as_deref().filter(|d| !d.is_empty()) {
            meta.description = description.to_string();
        }
        if let Some(visibility) = initial.visibility.as_deref().filter(|v| !v.is_empty()) {
            meta.visibility = visibility.to_string();
        }

        if let Some(instant) = initial.opens.as_deref().filter(|s| !s.is_empty()) {
            match split_instant("opens", instant) {
                Ok((date, time)) => {
                    meta.opens = Some(date);
                    meta.opens_time = time;
                }
                Err(e) => tracing::warn!(error = %e, "leaving open instant unset"),
            }
        }
        if let Some(instant) = initial.closes.as_deref().filter(|s| !s.is_empty()) {
            match split_instant("closes", instant) {
                Ok((date, time)) => {
                    meta.closes = Some(date);
                    meta.closes_time = time;
                }
                Err(e) => tracing::warn!(error = %e, "leaving close instant unset"),
            }
        }

        meta.anonymous = initial.anonymous.unwrap_or(false);
        meta.max_responses = initial.max_responses;
        meta.individual_limit = initial
            .individual_limit
            .unwrap_or(config.default_individual_limit);
        meta.editable_responses = initial.editable_responses.unwrap_or(false);
        meta
    }

    /// Instant responses open (midnight when no time is set)
    #[must_use]
    pub fn opens_at(&self) -> Option<NaiveDateTime> {
        combine(self.opens, self.opens_time)
    }

    /// Instant responses close (midnight when no time is set)
    #[must_use]
    pub fn closes_at(&self) -> Option<NaiveDateTime> {
        combine(self.closes, self.closes_time)
    }

    /// Merge supplied fields, leaving the rest untouched
    pub fn apply(&mut self, patch: MetadataPatch) {
        let MetadataPatch {
            title,
            description,
            visibility,
            opens,
            opens_time,
            closes,
            closes_time,
            anonymous,
            max_responses,
            individual_limit,
            editable_responses,
        } = patch;

        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = visibility {
            self.visibility = v;
        }
        if let Some(v) = opens {
            self.opens = v;
        }
        if let Some(v) = opens_time {
            self.opens_time = v;
        }
        if let Some(v) = closes {
            self.closes = v;
        }
        if let Some(v) = closes_time {
            self.closes_time = v;
        }
        if let Some(v) = anonymous {
            self.anonymous = v;
        }
        if let Some(v) = max_responses {
            self.max_responses = v;
        }
        if let Some(v) = individual_limit {
            self.individual_limit = v;
        }
        if let Some(v) = editable_responses {
            self.editable_responses = v;
        }
    }
}

fn combine(date: Option<NaiveDate>, time: Option<NaiveTime>) -> Option<NaiveDateTime> {
    date.map(|d| d.and_time(time.unwrap_or(NaiveTime::MIN)))
}

/// Split an instant string into date and optional time of day
///
/// Accepts `YYYY-MM-DD` optionally followed by `T` and a time; only hours
/// and minutes of the time are kept, and unreadable parts count as zero.
pub fn split_instant(field: &'static str, instant: &str) -> SessionResult<(NaiveDate, Option<NaiveTime>)> {
    let (date_part, time_part) = match instant.split_once('T') {
        Some((d, t)) => (d, Some(t)),
        None => (instant, None),
    };

    let date = NaiveDate::parse_from_str(date_part.trim(), DATE_FORMAT)
        .map_err(|_| SessionError::invalid_instant(field, instant))?;

    let time = match time_part.filter(|t| !t.is_empty()) {
        Some(t) => {
            let mut parts = t.split(':').map(|p| p.trim().parse::<u32>().unwrap_or(0));
            let hours = parts.next().unwrap_or(0);
            let minutes = parts.next().unwrap_or(0);
            Some(
                NaiveTime::from_hms_opt(hours, minutes, 0)
                    .ok_or_else(|| SessionError::invalid_instant(field, instant))?,
            )
        }
        None => None,
    };

    Ok((date, time))
}

/// Partial update of [`FormMetadata`]
///
/// Fields left as `None` are not touched. Clearable fields take an inner
/// `Option`, so `opens(None)` clears the open date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataPatch {
    title: Option<String>,
    description: Option<String>,
    visibility: Option<String>,
    opens: Option<Option<NaiveDate>>,
    opens_time: Option<Option<NaiveTime>>,
    closes: Option<Option<NaiveDate>>,
    closes_time: Option<Option<NaiveTime>>,
    anonymous: Option<bool>,
    max_responses: Option<Option<u32>>,
    individual_limit: Option<u32>,
    editable_responses: Option<bool>,
}

impl MetadataPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set visibility
    #[must_use]
    pub fn visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    /// Set or clear the open date
    #[must_use]
    pub fn opens(mut self, date: Option<NaiveDate>) -> Self {
        self.opens = Some(date);
        self
    }

    /// Set or clear the open time
    #[must_use]
    pub fn opens_time(mut self, time: Option<NaiveTime>) -> Self {
        self.opens_time = Some(time);
        self
    }

    /// Set or clear the close date
    #[must_use]
    pub fn closes(mut self, date: Option<NaiveDate>) -> Self {
        self.closes = Some(date);
        self
    }

    /// Set or clear the close time
    #[must_use]
    pub fn closes_time(mut self, time: Option<NaiveTime>) -> Self {
        self.closes_time = Some(time);
        self
    }

    /// Set anonymity
    #[must_use]
    pub fn anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = Some(anonymous);
        self
    }

    /// Set or clear the response cap
    #[must_use]
    pub fn max_responses(mut self, max: Option<u32>) -> Self {
        self.max_responses = Some(max);
        self
    }

    /// Set per-respondent limit
    #[must_use]
    pub fn individual_limit(mut self, limit: u32) -> Self {
        self.individual_limit = Some(limit);
        self
    }

    /// Set whether responses are editable
    #[must_use]
    pub fn editable_responses(mut self, editable: bool) -> Self {
        self.editable_responses = Some(editable);
        self
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Stored form handed in by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialForm {
    /// Stored title
    pub title: Option<String>,
    /// Stored description
    pub description: Option<String>,
    /// Stored visibility
    pub visibility: Option<String>,
    /// Open instant, `YYYY-MM-DD[THH:MM...]`
    pub opens: Option<String>,
    /// Close instant, `YYYY-MM-DD[THH:MM...]`
    pub closes: Option<String>,
    /// Stored anonymity
    pub anonymous: Option<bool>,
    /// Stored response cap
    pub max_responses: Option<u32>,
    /// Stored per-respondent limit
    pub individual_limit: Option<u32>,
    /// Stored editability
    pub editable_responses: Option<bool>,
    /// Encoded question document
    pub structure: Option<String>,
}

impl InitialForm {
    /// Parse a host JSON payload
    pub fn from_json(json: &str) -> SessionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Stored form with only a question document
    #[must_use]
    pub fn with_structure(structure: impl Into<String>) -> Self {
        Self {
            structure: Some(structure.into()),
            ..Self::default()
        }
    }
}

/// What a save sends back to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePayload {
    /// Form title
    pub title: String,
    /// Form description
    pub description: String,
    /// Visibility tag
    pub visibility: String,
    /// Open instant as `YYYY-MM-DDTHH:MM:SS`
    pub opens: Option<String>,
    /// Close instant as `YYYY-MM-DDTHH:MM:SS`
    pub closes: Option<String>,
    /// Responses are not linked to respondents
    pub anonymous: bool,
    /// Total response cap
    pub max_responses: Option<u32>,
    /// Responses allowed per respondent
    pub individual_limit: u32,
    /// Respondents may edit responses
    pub editable_responses: bool,
    /// Encoded question document
    pub structure: String,
}

impl SavePayload {
    /// Assemble from metadata and the encoded structure
    #[must_use]
    pub fn new(meta: &FormMetadata, structure: String) -> Self {
        let instant = |at: Option<NaiveDateTime>| at.map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string());
        Self {
            title: meta.title.clone(),
            description: meta.description.clone(),
            visibility: meta.visibility.clone(),
            opens: instant(meta.opens_at()),
            closes: instant(meta.closes_at()),
            anonymous: meta.anonymous,
            max_responses: meta.max_responses,
            individual_limit: meta.individual_limit,
            editable_responses: meta.editable_responses,
            structure,
        }
    }

    /// Serialize for the host
    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
