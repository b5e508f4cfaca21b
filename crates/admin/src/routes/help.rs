//! Help center: FAQ, quick links and contact details.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::middleware::View;
use crate::state::AppState;

/// Build the help router.
pub fn router() -> Router<AppState> {
    Router::new().route("/help", get(index))
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Faq {
    pub id: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
}

const FAQS: &[Faq] = &[
    Faq {
        id: "kpi-calculation",
        question: "How are dashboard KPIs calculated?",
        answer: "KPIs are computed from user activity within the selected date range.",
    },
    Faq {
        id: "inactive-users",
        question: "Why does a user show as inactive?",
        answer: "Users are marked inactive when an admin deactivates the account.",
    },
    Faq {
        id: "add-user",
        question: "How do I add a new user?",
        answer: "Open User Management and use the Add User button.",
    },
    Faq {
        id: "change-tier",
        question: "How do I change a user's membership tier?",
        answer: "Edit the user from the User Management table and pick a new tier.",
    },
    Faq {
        id: "analytics-refresh",
        question: "How often is analytics data refreshed?",
        answer: "Analytics figures refresh when the date range changes.",
    },
    Faq {
        id: "disputes-vs-letters",
        question: "What is the difference between disputes and letters?",
        answer: "A dispute is a case; letters are the mailings generated for it.",
    },
    Faq {
        id: "create-content",
        question: "How do I publish new content?",
        answer: "Use Content Control, choose a tab and create an item set to visible.",
    },
    Faq {
        id: "support-contact",
        question: "How do I reach the support team?",
        answer: "Email the address below or open a ticket from the Support view.",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct QuickLink {
    pub label: &'static str,
    pub path: &'static str,
}

/// Contact address shown on the help page.
pub const SUPPORT_EMAIL: &str = "support@paramount-credit.com";

/// Help view-model.
#[derive(Debug, Clone, Serialize)]
pub struct HelpView {
    pub faqs: &'static [Faq],
    pub quick_links: Vec<QuickLink>,
    pub contact_email: &'static str,
}

fn quick_links() -> Vec<QuickLink> {
    [
        ("Managing Users", View::Users),
        ("Analytics Dashboard", View::Analytics),
        ("Content Management", View::ContentControl),
        ("Reports & Disputes", View::Reports),
    ]
    .into_iter()
    .map(|(label, view)| QuickLink {
        label,
        path: view.path(),
    })
    .collect()
}

/// Help view.
///
/// GET /help
async fn index() -> Json<HelpView> {
    Json(HelpView {
        faqs: FAQS,
        quick_links: quick_links(),
        contact_email: SUPPORT_EMAIL,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_links_point_at_views() {
        let paths: Vec<_> = quick_links().into_iter().map(|l| l.path).collect();
        assert_eq!(paths, ["/users", "/analytics", "/content-control", "/reports"]);
    }

    #[test]
    fn test_faq_ids_are_unique() {
        let mut ids: Vec<_> = FAQS.iter().map(|f| f.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), FAQS.len());
    }
}
