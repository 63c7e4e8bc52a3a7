//! Mapping from a provider's role vocabulary onto the closed [`Role`] set.

use colloquy_types::llm::{ProviderMessage, ProviderRole};
use colloquy_types::message::{Message, Role};

/// Map a provider role onto [`Role`].
///
/// Total: `System` and `Assistant` map to themselves, every other provider
/// role (user, tool, function, unrecognized names) maps to `Role::User`.
pub fn map_role(role: &ProviderRole) -> Role {
    match role {
        ProviderRole::System => Role::System,
        ProviderRole::Assistant => Role::Assistant,
        ProviderRole::User
        | ProviderRole::Tool
        | ProviderRole::Function
        | ProviderRole::Other(_) => Role::User,
    }
}

/// Convert a provider reply into a domain [`Message`].
pub fn map_provider_message(message: ProviderMessage) -> Message {
    Message::new(map_role(&message.role), message.content)
}
