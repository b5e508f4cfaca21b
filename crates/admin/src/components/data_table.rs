//! Data table descriptions served to the rendering layer.
//!
//! A [`DataTableConfig`] tells the renderer which columns, filters and sort
//! choices a table has. The rows themselves come from
//! [`TableQuery`](super::table_query::TableQuery).

use serde::Serialize;

use pathway_core::{MembershipTier, TicketPriority, TicketStatus, UserStatus, UserTier, Visibility};

use super::table_query::FILTER_ALL;

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct TableColumn {
    /// Record field shown in the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is visible by default.
    pub default_visible: bool,
}

impl TableColumn {
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            default_visible: true,
        }
    }

    /// Set whether the column is visible by default.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }
}

/// Filter definition for a data table.
///
/// Every filter is an exact-match select whose first option is "all".
#[derive(Debug, Clone, Serialize)]
pub struct TableFilter {
    /// Query parameter and record field name.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Available options, starting with "all".
    pub options: Vec<FilterOption>,
}

/// Option for a select filter.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

impl TableFilter {
    /// Create a select filter with an "all" option prepended.
    #[must_use]
    pub fn select(key: &str, label: &str, all_label: &str, options: Vec<FilterOption>) -> Self {
        let mut all = vec![FilterOption::new(FILTER_ALL, all_label)];
        all.extend(options);
        Self {
            key: key.to_string(),
            label: label.to_string(),
            options: all,
        }
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Filter definitions.
    pub filters: Vec<TableFilter>,
    /// Sort choices (wire value, label).
    pub sort_options: Vec<FilterOption>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            filters: vec![],
            sort_options: vec![],
            search_placeholder: "Search...".to_string(),
            empty_title: "No items found".to_string(),
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a sort choice.
    #[must_use]
    pub fn sort_option(mut self, value: &str, label: &str) -> Self {
        self.sort_options.push(FilterOption::new(value, label));
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Keys of the columns visible by default.
    #[must_use]
    pub fn default_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.default_visible)
            .map(|c| c.key.clone())
            .collect()
    }
}

fn options<T: Copy>(all: &[T], value: fn(T) -> &'static str, label: fn(T) -> &'static str) -> Vec<FilterOption> {
    all.iter()
        .map(|v| FilterOption::new(value(*v), label(*v)))
        .collect()
}

/// Build the user management table configuration.
#[must_use]
pub fn users_table_config() -> DataTableConfig {
    DataTableConfig::new("users")
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("email", "Email"))
        .column(TableColumn::new("tier", "Tier"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("dateJoined", "Date Joined"))
        .column(TableColumn::new("lastActivity", "Last Activity"))
        .column(TableColumn::new("phone", "Phone").visible(false))
        .column(TableColumn::new("address", "Address").visible(false))
        .filter(TableFilter::select(
            "tier",
            "Tier",
            "All Tiers",
            options(UserTier::ALL, UserTier::as_str, UserTier::label),
        ))
        .filter(TableFilter::select(
            "status",
            "Status",
            "All Statuses",
            options(UserStatus::ALL, UserStatus::as_str, UserStatus::label),
        ))
        .sort_option("date_joined", "Date Joined")
        .sort_option("last_activity", "Last Activity")
        .search_placeholder("Search by name or email...")
        .empty_state("No users found", Some("Try adjusting your search or filters"))
}

/// Build the user journey table configuration.
#[must_use]
pub fn journeys_table_config(stages: &[&str]) -> DataTableConfig {
    DataTableConfig::new("journeys")
        .column(TableColumn::new("name", "User"))
        .column(TableColumn::new("plan", "Plan"))
        .column(TableColumn::new("stage", "Stage"))
        .column(TableColumn::new("progress", "Progress"))
        .column(TableColumn::new("lastUpdated", "Last Updated"))
        .filter(TableFilter::select(
            "stage",
            "Stage",
            "All Stages",
            stages.iter().map(|s| FilterOption::new(s, s)).collect(),
        ))
        .sort_option("last_updated", "Last Updated")
        .search_placeholder("Search by name, email or plan...")
        .empty_state("No journeys match your filters.", None)
}

/// Build the support ticket table configuration.
#[must_use]
pub fn tickets_table_config() -> DataTableConfig {
    DataTableConfig::new("tickets")
        .column(TableColumn::new("subject", "Subject"))
        .column(TableColumn::new("user", "User"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("priority", "Priority"))
        .column(TableColumn::new("assignedTo", "Assigned To"))
        .column(TableColumn::new("lastUpdated", "Last Updated"))
        .filter(TableFilter::select(
            "status",
            "Status",
            "All Statuses",
            options(TicketStatus::ALL, TicketStatus::as_str, TicketStatus::label),
        ))
        .filter(TableFilter::select(
            "priority",
            "Priority",
            "All Priorities",
            options(TicketPriority::ALL, TicketPriority::as_str, TicketPriority::label),
        ))
        .sort_option("last_updated", "Last Updated")
        .search_placeholder("Search tickets by subject or user...")
        .empty_state("No tickets found", None)
}

/// Build the content-control table configuration.
///
/// The active tab is applied as a `kind` filter, so it is not offered as a
/// filter here.
#[must_use]
pub fn content_table_config() -> DataTableConfig {
    DataTableConfig::new("content")
        .column(TableColumn::new("title", "Title"))
        .column(TableColumn::new("typeLabel", "Type"))
        .column(TableColumn::new("category", "Category"))
        .column(TableColumn::new("visibility", "Visibility"))
        .column(TableColumn::new("tier", "Tier"))
        .column(TableColumn::new("lastUpdated", "Last Updated"))
        .filter(TableFilter::select(
            "visibility",
            "Visibility",
            "All",
            options(Visibility::ALL, Visibility::as_str, Visibility::label),
        ))
        .filter(TableFilter::select(
            "tier",
            "Tier",
            "All Tiers",
            options(MembershipTier::ALL, MembershipTier::as_str, MembershipTier::label),
        ))
        .sort_option("last_updated", "Last Updated")
        .search_placeholder("Search by title or category...")
        .empty_state("No content yet", Some("Create an item to get started"))
}
