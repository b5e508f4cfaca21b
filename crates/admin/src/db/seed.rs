//! Demo data the dashboard starts with.

use pathway_core::{
    ContentId, ContentKind, JourneyId, MembershipTier, MessageId, TicketId, TicketPriority,
    TicketStatus, UserId, UserStatus, UserTier, Visibility,
};

use crate::models::{ContentItem, Journey, Ticket, TicketMessage, User};

/// Stages a journey moves through, in order.
pub const JOURNEY_STAGES: &[&str] = &[
    "Onboarding",
    "Disputes filed",
    "Letters in progress",
    "Monitoring",
];

#[allow(clippy::too_many_arguments)]
fn user(
    id: &str,
    name: &str,
    email: &str,
    tier: UserTier,
    status: UserStatus,
    date_joined: &str,
    last_activity: &str,
    phone: &str,
    address: &str,
) -> User {
    User {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        tier,
        status,
        date_joined: date_joined.to_string(),
        last_activity: last_activity.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
    }
}

/// Seed customer accounts.
#[must_use]
#[rustfmt::skip]
pub fn users() -> Vec<User> {
    use UserStatus::{Active, Inactive};
    use UserTier::{Advantage, Core, Pro};

    vec![
        user("1", "John Doe", "john.doe@email.com", Pro, Active, "2023-10-26", "2024-05-20", "(555) 123-4567", "123 Main St, Anytown, USA"),
        user("2", "Jane Smith", "jane.smith@email.com", Advantage, Active, "2023-09-15", "2024-05-18", "(555) 555-1234", "45 River Rd, Anytown, USA"),
        user("3", "Peter Jones", "peter.jones@email.com", Core, Inactive, "2023-08-01", "2024-01-10", "(555) 222-3333", "9 Market St, Anytown, USA"),
        user("4", "Mary Williams", "mary.williams@email.com", Pro, Active, "2023-11-05", "2024-05-21", "(555) 777-8888", "77 Sunset Blvd, Anytown, USA"),
        user("5", "David Brown", "david.brown@email.com", Advantage, Active, "2024-01-20", "2024-05-19", "(555) 444-9999", "12 Oak Ave, Anytown, USA"),
    ]
}

fn journey(
    id: &str,
    name: &str,
    email: &str,
    plan: &str,
    stage: &str,
    progress: u8,
    last_updated: &str,
) -> Journey {
    Journey {
        id: JourneyId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        plan: plan.to_string(),
        stage: stage.to_string(),
        progress,
        last_updated: last_updated.to_string(),
    }
}

/// Seed plan journeys.
#[must_use]
#[rustfmt::skip]
pub fn journeys() -> Vec<Journey> {
    vec![
        journey("1", "John Doe", "john.doe@email.com", "Premium Boost", "Letters in progress", 70, "2024-05-20"),
        journey("2", "Jane Smith", "jane.smith@email.com", "Score Rebuild", "Disputes filed", 45, "2024-05-18"),
        journey("3", "Peter Jones", "peter.jones@email.com", "Debt Relief", "Onboarding", 15, "2024-05-10"),
        journey("4", "Mary Williams", "mary.williams@email.com", "Premium Boost", "Monitoring", 90, "2024-05-21"),
    ]
}

fn message(id: &str, author: &str, text: &str, date: &str) -> TicketMessage {
    TicketMessage {
        id: MessageId::new(id),
        author: author.to_string(),
        text: text.to_string(),
        date: date.to_string(),
    }
}

/// Seed support tickets.
#[must_use]
#[rustfmt::skip]
pub fn tickets() -> Vec<Ticket> {
    vec![
        Ticket {
            id: TicketId::new("t1"),
            subject: "Cannot login".to_string(),
            user: "john.doe@example.com".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::High,
            assigned_to: "Ava".to_string(),
            message: "User reports login failure.".to_string(),
            messages: vec![
                message("m1", "john.doe@example.com", "I can't sign in with my account.", "2024-05-20"),
                message("m2", "Ava", "Can you confirm if you receive an error message?", "2024-05-21"),
            ],
            last_updated: "2024-05-21".to_string(),
        },
        Ticket {
            id: TicketId::new("t2"),
            subject: "Billing question".to_string(),
            user: "jane.smith@example.com".to_string(),
            status: TicketStatus::Pending,
            priority: TicketPriority::Medium,
            assigned_to: "Liam".to_string(),
            message: "Invoice clarification.".to_string(),
            messages: vec![
                message("m3", "jane.smith@example.com", "Why was I billed twice?", "2024-05-18"),
                message("m4", "Liam", "We're reviewing this and will update soon.", "2024-05-19"),
            ],
            last_updated: "2024-05-19".to_string(),
        },
        Ticket {
            id: TicketId::new("t3"),
            subject: "Feature request".to_string(),
            user: "mary.williams@example.com".to_string(),
            status: TicketStatus::Closed,
            priority: TicketPriority::Low,
            assigned_to: String::new(),
            message: "Request for export feature.".to_string(),
            messages: vec![
                message("m5", "mary.williams@example.com", "It would be great to download reports.", "2024-05-14"),
                message("m6", "Support", "Thanks, we'll consider this in roadmap.", "2024-05-15"),
            ],
            last_updated: "2024-05-15".to_string(),
        },
    ]
}

fn article(
    id: &str,
    title: &str,
    category: &str,
    visibility: Visibility,
    tier: MembershipTier,
    last_updated: &str,
) -> ContentItem {
    ContentItem {
        id: ContentId::new(id),
        kind: ContentKind::Article,
        type_label: ContentKind::Article.label().to_string(),
        title: title.to_string(),
        category: category.to_string(),
        visibility,
        tier,
        last_updated: last_updated.to_string(),
    }
}

/// Seed learning-centre content.
#[must_use]
#[rustfmt::skip]
pub fn content() -> Vec<ContentItem> {
    use MembershipTier::{Free, Paid, Vip};
    use Visibility::{Hidden, Visible};

    vec![
        article("1", "The Art of Budgeting", "Financial Basics", Visible, Free, "2023-10-26"),
        article("2", "Understanding Your Credit Score", "Credit Health", Visible, Paid, "2023-10-25"),
        article("3", "Advanced Investment Strategies", "Investing", Hidden, Vip, "2023-10-24"),
        article("4", "How to Save for a Down Payment", "Home Buying", Visible, Free, "2023-10-23"),
        article("5", "Navigating Student Loans", "Debt Management", Visible, Paid, "2023-10-22"),
    ]
}
