//! Support desk tickets and their message threads.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use pathway_core::{MessageId, TicketId, TicketPriority, TicketStatus};

use super::{ValidationError, non_blank};
use crate::components::Record;

/// Author recorded on replies sent from the dashboard.
pub const SUPPORT_AUTHOR: &str = "Support";

sort_field! {
    /// Sort choices for the ticket table.
    TicketSortField {
        #[default]
        LastUpdated => "last_updated", "lastUpdated";
    }
}

/// One message in a ticket thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketMessage {
    pub id: MessageId,
    pub author: String,
    pub text: String,
    pub date: String,
}

/// A support ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub subject: String,
    /// Requester, usually an email address.
    pub user: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    /// Agent name, empty when unassigned.
    pub assigned_to: String,
    /// Internal summary line.
    pub message: String,
    pub messages: Vec<TicketMessage>,
    pub last_updated: String,
}

impl Record for Ticket {
    type Id = TicketId;
    type SortField = TicketSortField;

    fn id(&self) -> &TicketId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let value: &str = match name {
            "id" => self.id.as_str(),
            "subject" => &self.subject,
            "user" => &self.user,
            "status" => self.status.as_str(),
            "priority" => self.priority.as_str(),
            "assignedTo" => &self.assigned_to,
            "message" => &self.message,
            "lastUpdated" => &self.last_updated,
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.subject.as_str(), self.user.as_str()]
    }
}

/// Create/edit form for a ticket. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketForm {
    pub subject: Option<String>,
    pub user: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assigned_to: Option<String>,
    pub message: Option<String>,
}

impl TicketForm {
    /// Build a new ticket, filling blanks with desk defaults.
    #[must_use]
    pub fn into_ticket(self, id: TicketId, today: &str) -> Ticket {
        Ticket {
            id,
            subject: non_blank(self.subject.as_deref())
                .unwrap_or("New ticket")
                .to_string(),
            user: non_blank(self.user.as_deref()).unwrap_or("unknown").to_string(),
            status: self.status.unwrap_or(TicketStatus::Open),
            priority: self.priority.unwrap_or(TicketPriority::Medium),
            assigned_to: self.assigned_to.unwrap_or_default().trim().to_string(),
            message: self.message.unwrap_or_default(),
            messages: Vec::new(),
            last_updated: today.to_string(),
        }
    }

    /// Overwrite the supplied fields of `ticket` and stamp it with `today`.
    pub fn apply_to(self, ticket: &mut Ticket, today: &str) {
        if let Some(subject) = self.subject {
            ticket.subject = subject;
        }
        if let Some(user) = self.user {
            ticket.user = user;
        }
        if let Some(status) = self.status {
            ticket.status = status;
        }
        if let Some(priority) = self.priority {
            ticket.priority = priority;
        }
        if let Some(assigned_to) = self.assigned_to {
            ticket.assigned_to = assigned_to.trim().to_string();
        }
        if let Some(message) = self.message {
            ticket.message = message;
        }
        ticket.last_updated = today.to_string();
    }
}

/// A reply appended to a ticket thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplyForm {
    #[serde(default)]
    pub text: String,
    pub author: Option<String>,
}

impl ReplyForm {
    /// Turn the reply into a thread message.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the reply text is blank.
    pub fn into_message(self, id: MessageId, today: &str) -> Result<TicketMessage, ValidationError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ValidationError::new("Please enter a reply."));
        }
        Ok(TicketMessage {
            id,
            author: non_blank(self.author.as_deref())
                .unwrap_or(SUPPORT_AUTHOR)
                .to_string(),
            text: text.to_string(),
            date: today.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let ticket = TicketForm::default().into_ticket(TicketId::new("99"), "2024-06-01");
        assert_eq!(ticket.subject, "New ticket");
        assert_eq!(ticket.user, "unknown");
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, TicketPriority::Medium);
        assert_eq!(ticket.assigned_to, "");
        assert!(ticket.messages.is_empty());
        assert_eq!(ticket.last_updated, "2024-06-01");
    }

    #[test]
    fn test_blank_subject_uses_default() {
        let form = TicketForm {
            subject: Some("  ".to_string()),
            ..TicketForm::default()
        };
        assert_eq!(form.into_ticket(TicketId::new("1"), "2024-06-01").subject, "New ticket");
    }

    #[test]
    fn test_edit_overwrites_and_refreshes_date() {
        let mut ticket = TicketForm::default().into_ticket(TicketId::new("1"), "2024-05-01");
        TicketForm {
            status: Some(TicketStatus::Closed),
            assigned_to: Some("Ava".to_string()),
            ..TicketForm::default()
        }
        .apply_to(&mut ticket, "2024-06-02");

        assert_eq!(ticket.status, TicketStatus::Closed);
        assert_eq!(ticket.assigned_to, "Ava");
        assert_eq!(ticket.subject, "New ticket");
        assert_eq!(ticket.last_updated, "2024-06-02");
    }

    #[test]
    fn test_reply_defaults_author_and_trims() {
        let reply = ReplyForm {
            text: "  On it.  ".to_string(),
            author: None,
        };
        let message = reply.into_message(MessageId::new("m9"), "2024-06-02").unwrap();
        assert_eq!(message.author, "Support");
        assert_eq!(message.text, "On it.");
    }

    #[test]
    fn test_blank_reply_rejected() {
        assert!(ReplyForm::default().into_message(MessageId::new("m"), "2024-06-02").is_err());
    }
}
