//! Credit-repair journeys shown on the reports page.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use pathway_core::JourneyId;

use crate::components::Record;

sort_field! {
    /// Sort choices for the journey table.
    JourneySortField {
        #[default]
        LastUpdated => "last_updated", "lastUpdated";
    }
}

/// A customer's progress through their plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub id: JourneyId,
    pub name: String,
    pub email: String,
    pub plan: String,
    pub stage: String,
    /// Percent complete, 0-100.
    pub progress: u8,
    pub last_updated: String,
}

impl Record for Journey {
    type Id = JourneyId;
    type SortField = JourneySortField;

    fn id(&self) -> &JourneyId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let value: &str = match name {
            "id" => self.id.as_str(),
            "name" => &self.name,
            "email" => &self.email,
            "plan" => &self.plan,
            "stage" => &self.stage,
            "progress" => return Some(Cow::Owned(self.progress.to_string())),
            "lastUpdated" => &self.last_updated,
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.plan.as_str()]
    }
}
