/// Track domain type
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One playable item and its metadata
///
/// Immutable once constructed, except for the requester, which is assigned
/// once when the track is queued on behalf of a user. Tracks have no
/// identity beyond structural equality; the same track may appear in a
/// queue more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track title (may be empty; display falls back to the URLs)
    pub title: String,

    /// Opaque source locator, resolved to a streamable handle externally
    pub source_url: String,

    /// Canonical page URL
    pub page_url: String,

    /// Duration in whole seconds (0 = unknown)
    pub duration_secs: u64,

    /// User the track was queued for
    pub requester: Option<UserId>,

    /// Thumbnail reference
    pub thumbnail: Option<String>,

    /// When the track was created
    pub added_at: DateTime<Utc>,
}

impl Track {
    /// Create a new track
    pub fn new(
        title: impl Into<String>,
        source_url: impl Into<String>,
        page_url: impl Into<String>,
        duration_secs: u64,
    ) -> Self {
        Self {
            title: title.into(),
            source_url: source_url.into(),
            page_url: page_url.into(),
            duration_secs,
            requester: None,
            thumbnail: None,
            added_at: Utc::now(),
        }
    }

    /// Attach a thumbnail reference
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Record who the track was queued for
    ///
    /// The first assignment wins; later calls are ignored.
    pub fn assign_requester(&mut self, user: UserId) {
        if self.requester.is_none() {
            self.requester = Some(user);
        }
    }

    /// Title for display, falling back to the page URL and then the locator
    pub fn display_title(&self) -> &str {
        if !self.title.is_empty() {
            &self.title
        } else if !self.page_url.is_empty() {
            &self.page_url
        } else {
            &self.source_url
        }
    }

    /// Serializable summary for snapshots and viewers
    pub fn brief(&self) -> TrackBrief {
        let url = if self.page_url.is_empty() {
            self.source_url.clone()
        } else {
            self.page_url.clone()
        };
        TrackBrief {
            title: self.display_title().to_string(),
            url,
            duration: self.duration_secs,
            requester: self.requester,
            thumb: self.thumbnail.clone(),
        }
    }
}

/// Compact track summary exported to external viewers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackBrief {
    /// Display title
    pub title: String,

    /// Canonical URL
    pub url: String,

    /// Duration in whole seconds (0 = unknown)
    pub duration: u64,

    /// User the track was queued for
    pub requester: Option<UserId>,

    /// Thumbnail reference
    pub thumb: Option<String>,
}
