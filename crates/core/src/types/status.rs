//! Status and classification enums for dashboard records.
//!
//! Every enum here is a closed set of wire strings. The wire string is what
//! appears in query parameters, persisted JSON and CSV exports, so it is also
//! the value used for exact-match table filtering.

use serde::{Deserialize, Serialize};

/// Error returned when a wire string does not name a known variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    /// Create a parse error for the given enum kind and rejected input.
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }

    /// Name of the enum that failed to parse.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }
}

/// Defines a wire-string enum with `as_str`, `label`, `Display`, `FromStr`
/// and serde support.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $wire:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire string for this variant.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Human-readable label.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(ParseEnumError::new($kind, s)),
                }
            }
        }
    };
}

wire_enum! {
    /// Membership tier of an end user.
    UserTier, "tier" {
        Core => "Core", "Core";
        Advantage => "Advantage", "Advantage";
        Pro => "Pro", "Pro";
    }
}

wire_enum! {
    /// Account status of an end user.
    UserStatus, "status" {
        Active => "active", "Active";
        Inactive => "inactive", "Inactive";
    }
}

impl UserStatus {
    /// The status an activate/deactivate toggle moves to.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

wire_enum! {
    /// Lifecycle state of a support ticket.
    TicketStatus, "ticket status" {
        Open => "open", "Open";
        Pending => "pending", "Pending";
        Closed => "closed", "Closed";
    }
}

wire_enum! {
    /// Triage priority of a support ticket.
    TicketPriority, "priority" {
        Low => "low", "Low";
        Medium => "medium", "Medium";
        High => "high", "High";
    }
}

wire_enum! {
    /// Kind of learning-centre content.
    ContentKind, "content kind" {
        Article => "article", "Article";
        Lesson => "lesson", "Lesson";
        Video => "video", "Video";
        Link => "link", "Resource Link";
        Page => "page", "Static Page";
    }
}

impl ContentKind {
    /// Name of the content-control tab listing this kind.
    #[must_use]
    pub const fn tab(self) -> &'static str {
        match self {
            Self::Article => "articles",
            Self::Lesson => "lessons",
            Self::Video => "videos",
            Self::Link => "links",
            Self::Page => "static",
        }
    }

    /// Resolve a content-control tab name to the kind it lists.
    #[must_use]
    pub fn from_tab(tab: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tab() == tab)
    }
}

wire_enum! {
    /// Whether a content item is shown to members.
    Visibility, "visibility" {
        Visible => "visible", "Visible";
        Hidden => "hidden", "Hidden";
    }
}

impl Visibility {
    /// The visibility a show/hide toggle moves to.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Visible => Self::Hidden,
            Self::Hidden => Self::Visible,
        }
    }
}

wire_enum! {
    /// Membership level required to read a content item.
    MembershipTier, "membership tier" {
        Free => "free", "Free";
        Paid => "paid", "Paid";
        Vip => "vip", "VIP";
    }
}

wire_enum! {
    /// Reporting window used by dashboards and export file names.
    DateRange, "date range" {
        Last7Days => "last_7_days", "Last 7 Days";
        Last30Days => "last_30_days", "Last 30 Days";
        ThisMonth => "this_month", "This Month";
        ThisQuarter => "this_quarter", "This Quarter";
        Custom => "custom", "Custom";
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::Last7Days
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings_round_trip() {
        for tier in UserTier::ALL {
            assert_eq!(tier.as_str().parse::<UserTier>().unwrap(), *tier);
        }
        for status in TicketStatus::ALL {
            assert_eq!(status.as_str().parse::<TicketStatus>().unwrap(), *status);
        }
        for range in DateRange::ALL {
            assert_eq!(range.as_str().parse::<DateRange>().unwrap(), *range);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("pro".parse::<UserTier>().is_err());
        assert!("Active".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_parse_error_names_the_kind() {
        let err = "urgent".parse::<TicketPriority>().unwrap_err();
        assert_eq!(err.kind(), "priority");
        assert_eq!(err.to_string(), "invalid priority: urgent");
    }

    #[test]
    fn test_serde_uses_wire_strings() {
        assert_eq!(serde_json::to_string(&UserTier::Pro).unwrap(), "\"Pro\"");
        assert_eq!(
            serde_json::to_string(&DateRange::Last30Days).unwrap(),
            "\"last_30_days\""
        );
    }

    #[test]
    fn test_toggles() {
        assert_eq!(UserStatus::Active.toggled(), UserStatus::Inactive);
        assert_eq!(Visibility::Hidden.toggled(), Visibility::Visible);
    }

    #[test]
    fn test_content_tabs() {
        assert_eq!(ContentKind::from_tab("static"), Some(ContentKind::Page));
        assert_eq!(ContentKind::from_tab("podcasts"), None);
        assert_eq!(ContentKind::Link.label(), "Resource Link");
    }
}
