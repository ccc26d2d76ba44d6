//! Portfolio project records, write intents, and their validation.
//!
//! [`Project`] is the stored shape. [`ProjectDraft`] is what the admin submits:
//! everything except the id and the creation date. Normalization (trimming,
//! placeholder image, dropping blank optional text) happens once, here, so the
//! renderer never has to re-derive defaults.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::{ProjectId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Image shown when a project has none.
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// Creation dates are stored pre-formatted, day first.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The fixed set of system categories a project can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fire,
    Security,
    Video,
    Access,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Fire,
        Category::Security,
        Category::Video,
        Category::Access,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Fire => "fire",
            Category::Security => "security",
            Category::Video => "video",
            Category::Access => "access",
        }
    }

    /// Human-readable name used on badges and filter buttons.
    pub fn label(self) -> &'static str {
        match self {
            Category::Fire => "Fire safety",
            Category::Security => "Security systems",
            Category::Video => "Video surveillance",
            Category::Access => "Access control",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown category '{s}'. Must be one of: fire, security, video, access"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// A stored portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub categories: BTreeSet<Category>,
    #[serde(default = "default_image", deserialize_with = "image_or_default")]
    pub image: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub area: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(default)]
    pub date: String,
}

impl Project {
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Replace every editable field with the draft's, keeping `id` and `date`.
    pub fn apply(&mut self, draft: ProjectDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.categories = draft.categories;
        self.image = draft.image;
        self.details = draft.details;
        self.area = draft.area;
        self.duration = draft.duration;
        self.location = draft.location;
    }
}

// ---------------------------------------------------------------------------
// ProjectDraft
// ---------------------------------------------------------------------------

/// A create/update intent: every project field except `id` and `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: BTreeSet<Category>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub area: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
}

impl ProjectDraft {
    /// Trim every text field, drop blank detail lines and blank optional text,
    /// and substitute the placeholder image when none was given.
    pub fn normalized(self) -> Self {
        let image = self.image.trim();
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            categories: self.categories,
            image: if image.is_empty() {
                DEFAULT_IMAGE.to_string()
            } else {
                image.to_string()
            },
            details: self
                .details
                .iter()
                .map(|d| d.trim())
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect(),
            area: trimmed_or_none(self.area),
            duration: trimmed_or_none(self.duration),
            location: trimmed_or_none(self.location),
        }
    }

    /// Title and description are required.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Required fields are empty: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn into_project(self, id: ProjectId, date: String) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            categories: self.categories,
            image: self.image,
            details: self.details,
            area: self.area,
            duration: self.duration,
            location: self.location,
            date,
        }
    }
}

impl From<&Project> for ProjectDraft {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            categories: project.categories.clone(),
            image: project.image.clone(),
            details: project.details.clone(),
            area: project.area.clone(),
            duration: project.duration.clone(),
            location: project.location.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ids, dates, defaults
// ---------------------------------------------------------------------------

/// Generate an id that is unique within `existing`.
///
/// Starts from the current millisecond timestamp and steps forward past any
/// collision.
pub fn generate_id(now: Timestamp, existing: &[Project]) -> ProjectId {
    let mut candidate = now.timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|p| p.id.as_str() == id) {
            return ProjectId::new(id);
        }
        candidate += 1;
    }
}

pub fn format_date(now: Timestamp) -> String {
    now.format(DATE_FORMAT).to_string()
}

/// The single showcase entry displayed when no project list has been stored
/// yet or the backing store cannot be read.
pub fn default_project(now: Timestamp) -> Project {
    Project {
        id: ProjectId::new("1"),
        title: "Europa shopping centre".to_string(),
        description: "Integrated security system for a shopping centre".to_string(),
        categories: [Category::Fire, Category::Security, Category::Video]
            .into_iter()
            .collect(),
        image: "fire1.jpg".to_string(),
        details: vec![
            "Fire safety system design".to_string(),
            "Intrusion alarm installation".to_string(),
            "Video surveillance installation".to_string(),
            "Commissioning".to_string(),
        ],
        area: Some("15 000 m²".to_string()),
        duration: Some("3 months".to_string()),
        location: Some("Yekaterinburg".to_string()),
        date: format_date(now),
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

fn image_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw {
        Some(image) if !image.trim().is_empty() => image,
        _ => default_image(),
    })
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn trimmed_or_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
