//! Sender extraction for transcript blocks.
//!
//! Exports differ by platform and locale in how metadata prefixes a message, so sender
//! detection is an ordered list of increasingly permissive rules. Each rule is a pure
//! function returning an optional match; the first rule that matches wins.
//!
//! A block becomes a system notification (sender [`GROUP_NOTIFICATION`]) when:
//! - no rule matches,
//! - the matched body is empty, or
//! - the matched sender name contains a membership keyword, which means the "name" is
//!   really an event sentence such as `Alice changed the subject to: ...`.
//!
//! A keyword inside the body of a properly attributed message does not reclassify it.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::GROUP_NOTIFICATION;

/// Candidate sender names must be shorter than this (in characters) for the generic rule
const MAX_GENERIC_SENDER_CHARS: usize = 50;

static NAME_COLON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([^:]+):\s(.+)$").expect("name rule must compile"));

static BRACKETED_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\[.*?\]\s*([^:]+):\s(.+)$").expect("bracketed rule must compile")
});

static DASH_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^.*?-\s*([^:]+):\s(.+)$").expect("dash rule must compile"));

static NAME_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s\-.]+$").expect("name charset must compile"));

static MEMBERSHIP_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:added|removed|left|joined|created|changed)\b")
        .expect("keyword pattern must compile")
});

/// Sender and body split out of a block by one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderMatch {
    pub sender: String,
    pub body: String,
}

impl SenderMatch {
    fn new(sender: &str, body: &str) -> Option<Self> {
        let sender = sender.trim();
        if sender.is_empty() {
            return None;
        }
        Some(Self { sender: sender.to_string(), body: body.trim().to_string() })
    }
}

/// Why a block was classified as a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Membership or group event (someone added, left, changed something)
    Membership,
    /// Text that no rule could attribute to a participant
    Unattributed,
}

/// Result of sender extraction for one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Message { sender: String, body: String },
    Notification { kind: NotificationKind, body: String },
}

impl Extraction {
    pub fn sender(&self) -> &str {
        match self {
            Extraction::Message { sender, .. } => sender,
            Extraction::Notification { .. } => GROUP_NOTIFICATION,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Extraction::Message { body, .. } | Extraction::Notification { body, .. } => body,
        }
    }

    /// `(sender, body)` with notifications using the [`GROUP_NOTIFICATION`] sender
    pub fn into_parts(self) -> (String, String) {
        match self {
            Extraction::Message { sender, body } => (sender, body),
            Extraction::Notification { body, .. } => (GROUP_NOTIFICATION.to_string(), body),
        }
    }
}

pub type SenderRule = fn(&str) -> Option<SenderMatch>;

/// Extraction rules in the order they are tried
pub const SENDER_RULES: [(&str, SenderRule); 4] = [
    ("name_colon", name_colon),
    ("bracketed_prefix", bracketed_prefix),
    ("dash_prefix", dash_prefix),
    ("generic_colon", generic_colon),
];

/// `name: message`, the name running up to the first colon
pub fn name_colon(block: &str) -> Option<SenderMatch> {
    capture_rule(&NAME_COLON_RE, block)
}

/// `[...] name: message`
pub fn bracketed_prefix(block: &str) -> Option<SenderMatch> {
    capture_rule(&BRACKETED_PREFIX_RE, block)
}

/// `... - name: message`
pub fn dash_prefix(block: &str) -> Option<SenderMatch> {
    capture_rule(&DASH_PREFIX_RE, block)
}

/// Any colon, provided the text before it looks like a short plain name
///
/// The body may be empty here; the caller turns that into a notification.
pub fn generic_colon(block: &str) -> Option<SenderMatch> {
    let colon = block.find(':').filter(|&pos| pos > 0)?;
    let name = block[..colon].trim();

    if name.chars().count() >= MAX_GENERIC_SENDER_CHARS || !NAME_CHARS_RE.is_match(name) {
        return None;
    }

    SenderMatch::new(name, &block[colon + 1..])
}

fn capture_rule(re: &Regex, block: &str) -> Option<SenderMatch> {
    let caps = re.captures(block)?;
    SenderMatch::new(caps.get(1)?.as_str(), caps.get(2)?.as_str())
}

pub fn contains_membership_keyword(text: &str) -> bool {
    MEMBERSHIP_KEYWORD_RE.is_match(text)
}

/// Separate sender from message body, or classify the block as a notification
pub fn extract_sender(block: &str) -> Extraction {
    let matched = SENDER_RULES.iter().find_map(|(_, rule)| rule(block));

    match matched {
        Some(m) if !m.body.is_empty() && !contains_membership_keyword(&m.sender) => {
            Extraction::Message { sender: m.sender, body: m.body }
        }
        _ => notification(block),
    }
}

fn notification(block: &str) -> Extraction {
    let kind = if contains_membership_keyword(block) {
        NotificationKind::Membership
    } else {
        NotificationKind::Unattributed
    };
    Extraction::Notification { kind, body: block.trim().to_string() }
}
