//! Domain models for the dashboard.
//!
//! Every record type implements [`Record`](crate::components::Record) so the
//! same filter/sort/paginate pipeline and CSV exporter serve all tables.
//! Field names in [`Record::field`](crate::components::Record::field) use the
//! camelCase wire names that also appear in JSON and CSV headers.

/// Defines a per-collection sort field enum.
///
/// Each variant maps a query-string value (`date_joined`) to the record
/// field it compares (`dateJoined`).
macro_rules! sort_field {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal, $key:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Default, ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Query-string value for this sort field.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl $crate::components::SortField for $name {
            fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::pathway_core::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(::pathway_core::ParseEnumError::new("sort field", s)),
                }
            }
        }
    };
}

pub mod content;
pub mod journey;
pub mod session;
pub mod ticket;
pub mod user;

use thiserror::Error;

pub use content::{ContentForm, ContentItem, ContentSortField};
pub use journey::{Journey, JourneySortField};
pub use session::{Identity, ProfilePatch};
pub use ticket::{ReplyForm, Ticket, TicketForm, TicketMessage, TicketSortField};
pub use user::{User, UserForm, UserSortField};

/// Required form input is missing or malformed.
///
/// The message is shown inline next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Trim a form value, mapping blank input to `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
