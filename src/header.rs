//! Header block parsing.
//!
//! The raw text is tokenized by `mail-parser`; values are then sliced out of
//! the original buffer and unfolded here, so that every hop keeps its full
//! text rather than the parser's structured interpretation of it. `Subject`,
//! `From` and `To` are the exception: their RFC 2047 encoded words are shown
//! decoded.

use mail_parser::{Addr, HeaderName, HeaderValue, MessageParser};
use std::fmt;

/// Single-valued header fields picked out of the header block, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    From,
    To,
    Subject,
    Date,
    MessageId,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::From,
        Field::To,
        Field::Subject,
        Field::Date,
        Field::MessageId,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::From => "From",
            Field::To => "To",
            Field::Subject => "Subject",
            Field::Date => "Date",
            Field::MessageId => "Message-ID",
        }
    }

    /// Case-insensitive lookup of a header name.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `Received` chain of a message.
///
/// `NotFound` is kept apart from an empty list so that "no relay headers at
/// all" stays distinguishable from relay headers that are present but blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RelayPath {
    Hops(Vec<String>),
    #[default]
    NotFound,
}

impl RelayPath {
    /// Rendered in place of the hop list when no `Received` header exists.
    pub const NOT_FOUND: &'static str = "No Received headers found.";

    pub fn from_hops(hops: Vec<String>) -> Self {
        if hops.is_empty() {
            RelayPath::NotFound
        } else {
            RelayPath::Hops(hops)
        }
    }

    pub fn hops(&self) -> &[String] {
        match self {
            RelayPath::Hops(hops) => hops,
            RelayPath::NotFound => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RelayPath::Hops(_))
    }

    pub fn len(&self) -> usize {
        self.hops().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lines of the `Received Path:` section: the hops, or the sentinel text.
    pub fn entries(&self) -> Vec<&str> {
        match self {
            RelayPath::Hops(hops) => hops.iter().map(String::as_str).collect(),
            RelayPath::NotFound => vec![Self::NOT_FOUND],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRecord {
    pub from: Option<String>,
    pub to: Option<String>,
    pub subject: Option<String>,
    pub date: Option<String>,
    pub message_id: Option<String>,
    pub received: RelayPath,
}

impl HeaderRecord {
    /// Build a record from a raw header block.
    ///
    /// Never fails. Unknown headers are ignored, the first occurrence of a
    /// single-valued field wins, and every `Received` header is kept in order.
    pub fn parse(raw: &[u8]) -> Self {
        let mut record = HeaderRecord::default();
        let mut hops = Vec::new();
        let all = headers(raw);
        for (name, value) in &all {
            if name.eq_ignore_ascii_case("Received") {
                hops.push(value.clone());
            } else if let Some(field) = Field::from_name(name) {
                let slot = record.slot_mut(field);
                if slot.is_none() {
                    *slot = Some(value.clone());
                }
            }
        }
        log::debug!("parsed {} headers, {} relay hops", all.len(), hops.len());
        record.received = RelayPath::from_hops(hops);
        record
    }

    pub fn parse_str(raw: &str) -> Self {
        Self::parse(raw.as_bytes())
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::From => self.from.as_deref(),
            Field::To => self.to.as_deref(),
            Field::Subject => self.subject.as_deref(),
            Field::Date => self.date.as_deref(),
            Field::MessageId => self.message_id.as_deref(),
        }
    }

    pub fn hop_count(&self) -> usize {
        self.received.len()
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::From => &mut self.from,
            Field::To => &mut self.to,
            Field::Subject => &mut self.subject,
            Field::Date => &mut self.date,
            Field::MessageId => &mut self.message_id,
        }
    }
}

/// All headers of the block in input order, as `(name, unfolded value)`.
///
/// Leading blank lines are skipped. Input that does not yield a header block
/// returns an empty list.
pub fn headers(raw: &[u8]) -> Vec<(String, String)> {
    // stray blank lines in pasted text would otherwise turn everything into body
    let raw = raw.trim_ascii_start();
    if raw.is_empty() {
        return Vec::new();
    }
    let Some(msg) = MessageParser::default().parse(raw) else {
        log::debug!("no header block recognized in {} bytes of input", raw.len());
        return Vec::new();
    };
    let buffer = msg.raw_message();
    msg.headers()
        .iter()
        .map(|h| {
            let decoded = match (&h.name, &h.value) {
                (HeaderName::Subject, value) => value.as_text().map(|t| t.trim().to_string()),
                (HeaderName::From | HeaderName::To, value) => format_address_list(value),
                _ => None,
            };
            let value = decoded.unwrap_or_else(|| {
                let value = buffer
                    .get(h.offset_start as usize..h.offset_end as usize)
                    .unwrap_or_default();
                unfold(&String::from_utf8_lossy(value))
            });
            (h.name.as_str().to_string(), value)
        })
        .collect()
}

/// Render a parsed address list as `name <addr>, ...` with decoded names.
///
/// Groups and unparsable values give `None` so the raw text is shown instead.
fn format_address_list(value: &HeaderValue<'_>) -> Option<String> {
    let list = value.as_address()?.as_list()?;
    if list.is_empty() {
        return None;
    }
    let parts: Vec<String> = list.iter().map(format_addr).collect();
    Some(parts.join(", "))
}

fn format_addr(addr: &Addr<'_>) -> String {
    let name = addr.name().map(str::trim).filter(|n| !n.is_empty());
    match (name, addr.address()) {
        (Some(name), Some(address)) => format!("{} <{address}>", quote_display_name(name)),
        (Some(name), None) => quote_display_name(name),
        (None, Some(address)) => address.to_string(),
        (None, None) => String::new(),
    }
}

/// Quote a display name only when it contains RFC 5322 specials.
fn quote_display_name(name: &str) -> String {
    if name.contains(|c: char| "()<>@,;:\\\".[]".contains(c)) {
        format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        name.to_string()
    }
}

/// Join continuation lines into one logical line, collapsing each fold to a
/// single space.
pub fn unfold(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(line);
    }
    out
}

#[test]
fn test_unfold() {
    assert_eq!(unfold(" value\r\n"), "value");
    assert_eq!(
        unfold(" from a.example\r\n    by b.example;\r\n\tTue, 1 Oct 2024\r\n"),
        "from a.example by b.example; Tue, 1 Oct 2024"
    );
    assert_eq!(unfold(" keeps  inner   spacing\n"), "keeps  inner   spacing");
    assert_eq!(unfold(""), "");
}

#[test]
fn test_quote_display_name() {
    assert_eq!(quote_display_name("Jörg Example"), "Jörg Example");
    assert_eq!(quote_display_name("Doe, John"), "\"Doe, John\"");
    assert_eq!(quote_display_name("a \"b\" c."), "\"a \\\"b\\\" c.\"");
}

#[test]
fn test_field_from_name() {
    assert_eq!(Field::from_name("from"), Some(Field::From));
    assert_eq!(Field::from_name("MESSAGE-ID"), Some(Field::MessageId));
    assert_eq!(Field::from_name("Message-Id"), Some(Field::MessageId));
    assert_eq!(Field::from_name("Received"), None);
    assert_eq!(Field::from_name("X-Mailer"), None);
}

#[test]
fn test_relay_path_entries() {
    assert_eq!(RelayPath::from_hops(Vec::new()), RelayPath::NotFound);
    assert_eq!(RelayPath::NotFound.entries(), [RelayPath::NOT_FOUND]);
    assert!(RelayPath::NotFound.is_empty());
    let path = RelayPath::from_hops(vec!["a".to_string(), String::new()]);
    assert!(path.is_found());
    assert_eq!(path.len(), 2);
    assert_eq!(path.entries(), ["a", ""]);
}

#[test]
fn test_parse_empty() {
    assert_eq!(HeaderRecord::parse(b""), HeaderRecord::default());
    assert_eq!(HeaderRecord::parse(b"\r\n\r\n  \n"), HeaderRecord::default());
}
