use serde::Deserialize;

/// A chat message as delivered by the messaging platform.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct IncomingMessage {
	pub user: Option<String>,
	pub text: Option<String>,
	/// Set when the author is another bot.
	pub bot_id: Option<String>,
}

/// What to do with an incoming message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Action {
	pub learn: bool,
	pub reply: bool,
}

impl Action {
	pub const IGNORE: Self = Self { learn: false, reply: false };
}

/// Returns the mention marker for `bot_user`, e.g. `<@U024BE7LH>`.
pub fn mention(bot_user: &str) -> String {
	format!("<@{bot_user}>")
}

/// Decides how to handle `message`.
///
/// - Messages written by `bot_user` itself, or without text, are ignored.
/// - Messages from other bots are not learned.
/// - Messages mentioning `bot_user` get a reply.
pub fn route(message: &IncomingMessage, bot_user: Option<&str>) -> Action {
	if bot_user.is_some() && message.user.as_deref() == bot_user {
		return Action::IGNORE;
	}

	let Some(text) = message.text.as_deref() else {
		return Action::IGNORE;
	};

	Action {
		learn: message.bot_id.is_none(),
		reply: bot_user.is_some_and(|bot| text.contains(&mention(bot))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn message(user: &str, text: &str) -> IncomingMessage {
		IncomingMessage { user: Some(user.to_owned()), text: Some(text.to_owned()), bot_id: None }
	}

	#[test]
	fn plain_message_is_learned() {
		assert_eq!(route(&message("U1", "hello there"), Some("BOT")), Action { learn: true, reply: false });
	}

	#[test]
	fn own_messages_are_ignored() {
		assert_eq!(route(&message("BOT", "hello <@BOT>"), Some("BOT")), Action::IGNORE);
	}

	#[test]
	fn other_bots_are_not_learned() {
		let mut msg = message("U2", "beep <@BOT>");
		msg.bot_id = Some("B9".to_owned());
		assert_eq!(route(&msg, Some("BOT")), Action { learn: false, reply: true });
	}

	#[test]
	fn mention_gets_a_reply() {
		assert_eq!(route(&message("U1", "hey <@BOT> talk"), Some("BOT")), Action { learn: true, reply: true });
	}

	#[test]
	fn no_text_is_ignored() {
		let msg = IncomingMessage { user: Some("U1".to_owned()), ..Default::default() };
		assert_eq!(route(&msg, Some("BOT")), Action::IGNORE);
	}

	#[test]
	fn without_identity_nothing_is_a_mention() {
		assert_eq!(route(&message("U1", "hey <@BOT>"), None), Action { learn: true, reply: false });
	}
}
