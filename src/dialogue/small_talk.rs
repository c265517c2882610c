//! Canned replies to greetings and farewells outside of any dialogue step.

use log::debug;

struct SmallTalkRule {
    name: &'static str,
    cues: &'static [&'static str],
    reply: &'static str,
}

const RULES: [SmallTalkRule; 2] = [
    SmallTalkRule {
        name: "greeting",
        cues: &["прив"],
        reply: "Привет! Чем могу помочь сегодня?",
    },
    SmallTalkRule {
        name: "farewell",
        cues: &["до свид", "пока"],
        reply: "До свидания! Буду рад видеть тебя снова!",
    },
];

/// First matching canned reply for `content`, if any. Greetings win over farewells.
pub(super) fn reply_to(content: &str) -> Option<&'static str> {
    let content = content.to_lowercase();
    let rule = RULES
        .iter()
        .find(|rule| rule.cues.iter().any(|cue| content.contains(*cue)))?;
    debug!("Small talk match: {}", rule.name);
    Some(rule.reply)
}
