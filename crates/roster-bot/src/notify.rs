//! Announcement and roster formatting
//!
//! Pure string builders; the handler decides when to send. A member with no
//! display name renders as the empty string, never as a placeholder.

use roster_core::ChannelAccount;

/// Format the roster reply for a conversation.
///
/// Returns `None` for an empty member list: no members means no reply.
pub fn roster_text(members: &[ChannelAccount]) -> Option<String> {
    if members.is_empty() {
        return None;
    }

    let member_list = members
        .iter()
        .map(|m| format!("* {} (Id: {})", m.name.as_deref().unwrap_or(""), m.id))
        .collect::<Vec<_>>()
        .join("\n ");

    Some(format!(
        "These are the members of this conversation: \n {}",
        member_list
    ))
}

/// Label one member for a join/leave announcement.
///
/// When the member is the bot itself the bot's configured display name is
/// used instead of whatever name the channel reported.
pub fn member_label(member: &ChannelAccount, bot: &ChannelAccount) -> String {
    let name = if member.id == bot.id {
        bot.name.as_deref()
    } else {
        member.name.as_deref()
    }
    .unwrap_or("");

    format!("{} (Id: {})", name, member.id)
}

fn joined_labels(members: &[ChannelAccount], bot: &ChannelAccount) -> String {
    members
        .iter()
        .map(|m| member_label(m, bot))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Announcement for members added to the conversation
pub fn welcome_text(added: &[ChannelAccount], bot: &ChannelAccount) -> Option<String> {
    if added.is_empty() {
        return None;
    }
    Some(format!("Welcome {}", joined_labels(added, bot)))
}

/// Announcement for members removed from the conversation
pub fn farewell_text(removed: &[ChannelAccount], bot: &ChannelAccount) -> Option<String> {
    if removed.is_empty() {
        return None;
    }
    Some(format!(
        "The following members {} were removed or left the conversation :(",
        joined_labels(removed, bot)
    ))
}
