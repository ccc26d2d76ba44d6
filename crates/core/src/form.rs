//! Typed adapter between the admin project form and [`ProjectDraft`].
//!
//! The form is submitted as `application/x-www-form-urlencoded`. Checkboxes
//! are only present in the body when ticked, so each toggle deserializes to
//! `true` when the key is there at all.

use serde::{Deserialize, Deserializer};

use crate::project::{Category, Project, ProjectDraft};

/// Read/write access to the fields of a project form.
pub trait ProjectForm {
    /// Map the current field values into a write intent. No validation.
    fn read(&self) -> ProjectDraft;
    /// Populate the fields from a stored record.
    fn write(&mut self, project: &Project);
    /// Blank every field and untick every toggle.
    fn clear(&mut self);
}

/// Raw values of the admin project form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectFormFields {
    pub title: String,
    pub description: String,
    pub image: String,
    /// One work item per line.
    pub details: String,
    pub area: String,
    pub duration: String,
    pub location: String,
    #[serde(deserialize_with = "checkbox")]
    pub system_fire: bool,
    #[serde(deserialize_with = "checkbox")]
    pub system_security: bool,
    #[serde(deserialize_with = "checkbox")]
    pub system_video: bool,
    #[serde(deserialize_with = "checkbox")]
    pub system_access: bool,
}

impl ProjectFormFields {
    pub fn is_checked(&self, category: Category) -> bool {
        match category {
            Category::Fire => self.system_fire,
            Category::Security => self.system_security,
            Category::Video => self.system_video,
            Category::Access => self.system_access,
        }
    }

    fn toggle_mut(&mut self, category: Category) -> &mut bool {
        match category {
            Category::Fire => &mut self.system_fire,
            Category::Security => &mut self.system_security,
            Category::Video => &mut self.system_video,
            Category::Access => &mut self.system_access,
        }
    }
}

impl ProjectForm for ProjectFormFields {
    fn read(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            categories: Category::ALL
                .into_iter()
                .filter(|c| self.is_checked(*c))
                .collect(),
            image: self.image.trim().to_string(),
            details: self
                .details
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            area: optional(&self.area),
            duration: optional(&self.duration),
            location: optional(&self.location),
        }
    }

    fn write(&mut self, project: &Project) {
        self.title = project.title.clone();
        self.description = project.description.clone();
        self.image = project.image.clone();
        self.details = project.details.join("\n");
        self.area = project.area.clone().unwrap_or_default();
        self.duration = project.duration.clone().unwrap_or_default();
        self.location = project.location.clone().unwrap_or_default();
        for category in Category::ALL {
            *self.toggle_mut(category) = project.has_category(category);
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn checkbox<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.is_some_and(|v| v != "false" && v != "off"))
}
