//! Learning-centre content items.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use pathway_core::{ContentId, ContentKind, MembershipTier, Visibility};

use super::ValidationError;
use crate::components::Record;

sort_field! {
    /// Sort choices for content listings.
    ContentSortField {
        #[default]
        LastUpdated => "last_updated", "lastUpdated";
    }
}

/// An article, lesson, video, link or static page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ContentId,
    pub kind: ContentKind,
    /// Label shown in the type column (`"Resource Link"`).
    pub type_label: String,
    pub title: String,
    pub category: String,
    pub visibility: Visibility,
    pub tier: MembershipTier,
    pub last_updated: String,
}

impl Record for ContentItem {
    type Id = ContentId;
    type SortField = ContentSortField;

    fn id(&self) -> &ContentId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let value: &str = match name {
            "id" => self.id.as_str(),
            "kind" => self.kind.as_str(),
            "typeLabel" => &self.type_label,
            "title" => &self.title,
            "category" => &self.category,
            "visibility" => self.visibility.as_str(),
            "tier" => self.tier.as_str(),
            "lastUpdated" => &self.last_updated,
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.category.as_str()]
    }
}

/// Create/edit form for a content item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    #[serde(default = "default_tier")]
    pub tier: MembershipTier,
}

const fn default_visibility() -> Visibility {
    Visibility::Visible
}

const fn default_tier() -> MembershipTier {
    MembershipTier::Free
}

impl ContentForm {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the title or category is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() || self.category.trim().is_empty() {
            return Err(ValidationError::new("Please fill in all required fields."));
        }
        Ok(())
    }

    /// Build a new item of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if required fields are blank.
    pub fn into_item(
        self,
        id: ContentId,
        kind: ContentKind,
        today: &str,
    ) -> Result<ContentItem, ValidationError> {
        self.validate()?;
        Ok(ContentItem {
            id,
            kind,
            type_label: kind.label().to_string(),
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            visibility: self.visibility,
            tier: self.tier,
            last_updated: today.to_string(),
        })
    }

    /// Overwrite `item` and stamp it with `today`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if required fields are blank.
    pub fn apply_to(self, item: &mut ContentItem, today: &str) -> Result<(), ValidationError> {
        self.validate()?;
        item.title = self.title.trim().to_string();
        item.category = self.category.trim().to_string();
        item.visibility = self.visibility;
        item.tier = self.tier;
        item.last_updated = today.to_string();
        Ok(())
    }
}
