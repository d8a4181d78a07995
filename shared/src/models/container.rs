//! Container (tub) model

use super::variant::{TubVariant, deserialize_variant_lenient};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::util::is_hex_color;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Colour preselected in the create form
pub const DEFAULT_CONTAINER_COLOR: &str = "#8a2be2";

/// Container row (`tubs` table)
///
/// Only `name` is required; everything else degrades to empty on display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "deserialize_variant_lenient")]
    pub icon: Option<TubVariant>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Container {
    /// Minimal container with only an id and a name
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            location: None,
            color: None,
            icon: None,
            user_id: None,
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_icon(mut self, icon: TubVariant) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Description or empty string
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Case-insensitive match on name or description
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }
}

/// Create container payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewContainer {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[validate(custom(function = "validate_color"))]
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: TubVariant,
}

fn default_color() -> String {
    DEFAULT_CONTAINER_COLOR.to_string()
}

fn default_icon() -> TubVariant {
    TubVariant::Bin
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_color(value: &str) -> Result<(), ValidationError> {
    if !is_hex_color(value) {
        return Err(ValidationError::new("hex_color"));
    }
    Ok(())
}

impl NewContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            location: String::new(),
            color: default_color(),
            icon: default_icon(),
        }
    }

    /// Trim text fields and validate; run before any insert
    pub fn normalized(mut self) -> AppResult<Self> {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.location = self.location.trim().to_string();
        if self.name.is_empty() {
            return Err(AppError::new(ErrorCode::ContainerNameRequired).with_detail("field", "name"));
        }
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_row() {
        let c: Container = serde_json::from_str(r#"{"name":"Garage Tools"}"#).unwrap();
        assert_eq!(c.name, "Garage Tools");
        assert_eq!(c.id, "");
        assert_eq!(c.description_or_empty(), "");
        assert!(c.icon.is_none());
    }

    #[test]
    fn test_unknown_icon_is_absent() {
        let c: Container =
            serde_json::from_str(r#"{"id":"x","name":"A","icon":"barrel"}"#).unwrap();
        assert!(c.icon.is_none());
        let c: Container = serde_json::from_str(r#"{"id":"x","name":"A","icon":null}"#).unwrap();
        assert!(c.icon.is_none());
    }

    #[test]
    fn test_matches() {
        let c = Container::named("1", "Camping Gear").with_description("Tents, sleeping bags");
        assert!(c.matches("camp"));
        assert!(c.matches("TENTS"));
        assert!(c.matches("  "));
        assert!(!c.matches("drill"));
    }

    #[test]
    fn test_new_container_normalized() {
        let mut input = NewContainer::new("  Tools  ");
        input.location = " Basement ".into();
        let ok = input.normalized().unwrap();
        assert_eq!(ok.name, "Tools");
        assert_eq!(ok.location, "Basement");
    }

    #[test]
    fn test_new_container_rejects_blank_and_bad_color() {
        let err = NewContainer::new("   ").normalized().unwrap_err();
        assert_eq!(err.code, ErrorCode::ContainerNameRequired);

        let mut input = NewContainer::new("Tools");
        input.color = "purple".into();
        let err = input.normalized().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
