//! Notification message formatting.

use crate::github::PullRequestNotification;

/// Rendered in place of any payload field the delivery did not carry.
/// The message always keeps all of its lines.
pub const MISSING_FIELD_PLACEHOLDER: &str = "unknown";

/// Format the Discord message for a newly opened pull request.
pub fn format_pull_request_message(notification: &PullRequestNotification) -> String {
    let field = |value: &Option<String>| -> String {
        value
            .clone()
            .unwrap_or_else(|| MISSING_FIELD_PLACEHOLDER.to_string())
    };

    format!(
        "New pull request in **{repo}**\n\
         Title: {title}\n\
         Author: {author}\n\
         Branches: {head} → {base}\n\
         {url}",
        repo = field(&notification.repo),
        title = field(&notification.title),
        author = field(&notification.author),
        head = field(&notification.head_ref),
        base = field(&notification.base_ref),
        url = field(&notification.url),
    )
}
