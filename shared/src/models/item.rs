//! Item model

use super::container::validate_not_blank;
use crate::error::{AppError, AppResult, ErrorCode};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Item row (`items` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tub_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    pub fn new(id: impl Into<String>, tub_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tub_id: tub_id.into(),
            name: name.into(),
            description: None,
            image_url: None,
            expiry_date: None,
            tags: Vec::new(),
            user_id: None,
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Case-insensitive match on name, description or any tag
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
            || self.tags.iter().any(|t| t.to_lowercase().contains(&term))
    }

    /// True if the expiry date is set and strictly before `today`
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d < today)
    }
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewItem {
    #[validate(custom(function = "validate_not_blank"))]
    pub tub_id: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewItem {
    pub fn new(tub_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tub_id: tub_id.into(),
            name: name.into(),
            description: String::new(),
            image_url: None,
            expiry_date: None,
            tags: Vec::new(),
        }
    }

    /// Add a tag the way the item form does: trimmed, ignored if blank or
    /// already present
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Trim fields, clean tags and validate; run before any insert
    pub fn normalized(mut self) -> AppResult<Self> {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        if self.name.is_empty() {
            return Err(AppError::new(ErrorCode::ItemNameRequired).with_detail("field", "name"));
        }
        let raw = std::mem::take(&mut self.tags);
        for tag in &raw {
            self.add_tag(tag);
        }
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_tags_deserialize_empty() {
        let item: Item =
            serde_json::from_str(r#"{"id":"i1","tub_id":"t1","name":"Tent","tags":null}"#)
                .unwrap();
        assert!(item.tags.is_empty());
        assert!(item.expiry_date.is_none());
    }

    #[test]
    fn test_expiry_date_parses() {
        let item: Item = serde_json::from_str(
            r#"{"id":"i1","tub_id":"t1","name":"Batteries","expiry_date":"2026-01-31"}"#,
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert!(item.is_expired(today));
        assert!(!item.is_expired(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
    }

    #[test]
    fn test_matches_tags() {
        let item = Item::new("i1", "t1", "Drill").with_tags(["Power Tools", "garage"]);
        assert!(item.matches("power"));
        assert!(item.matches("dri"));
        assert!(!item.matches("tent"));
    }

    #[test]
    fn test_normalized_cleans_tags() {
        let mut input = NewItem::new("t1", " Lights ");
        input.tags = vec![" xmas ".into(), "".into(), "xmas".into(), "led".into()];
        let ok = input.normalized().unwrap();
        assert_eq!(ok.name, "Lights");
        assert_eq!(ok.tags, vec!["xmas", "led"]);
    }

    #[test]
    fn test_normalized_rejects_blank_name_and_missing_container() {
        let err = NewItem::new("t1", "  ").normalized().unwrap_err();
        assert_eq!(err.code, ErrorCode::ItemNameRequired);

        let err = NewItem::new("", "Tent").normalized().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_add_tag() {
        let mut input = NewItem::new("t1", "Tent");
        assert!(input.add_tag("camping"));
        assert!(!input.add_tag(" camping "));
        assert!(!input.add_tag("   "));
        assert!(input.add_tag("winter"));
        assert_eq!(input.tags, ["camping", "winter"]);
    }
}
