use crate::error::ProbeError;
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct PendingEntry {
    title: Option<String>,
    published: Option<String>,
    updated: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Published,
    Updated,
}

/// Parses an RSS 2.0, RSS 1.0 or Atom document into its entries.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, ProbeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut saw_root = false;
    let mut entries = Vec::new();
    let mut current: Option<PendingEntry> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ProbeError::Malformed(format!("feed xml: {e}")))?;
        match event {
            Event::Start(element) => {
                let name = element.local_name();
                match name.as_ref() {
                    b"rss" | b"feed" | b"RDF" => saw_root = true,
                    b"item" | b"entry" => current = Some(PendingEntry::default()),
                    other if current.is_some() => {
                        field = field_for(other);
                        text.clear();
                    }
                    _ => {}
                }
            }
            Event::Text(content) if field.is_some() => {
                let unescaped = content
                    .unescape()
                    .map_err(|e| ProbeError::Malformed(format!("feed text: {e}")))?;
                text.push_str(&unescaped);
            }
            Event::CData(content) if field.is_some() => {
                text.push_str(&String::from_utf8_lossy(&content.into_inner()));
            }
            Event::End(element) => {
                let name = element.local_name();
                match name.as_ref() {
                    b"item" | b"entry" => {
                        if let Some(pending) = current.take() {
                            entries.push(finish_entry(pending));
                        }
                        field = None;
                    }
                    other => {
                        if let (Some(active), Some(pending)) = (field, current.as_mut()) {
                            if field_for(other) == Some(active) {
                                store_field(pending, active, text.trim());
                                field = None;
                            }
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(ProbeError::Malformed(
            "document is not an RSS or Atom feed".to_string(),
        ));
    }
    Ok(entries)
}

fn field_for(local_name: &[u8]) -> Option<Field> {
    match local_name {
        b"title" => Some(Field::Title),
        b"pubDate" | b"published" | b"date" => Some(Field::Published),
        b"updated" => Some(Field::Updated),
        _ => None,
    }
}

fn store_field(pending: &mut PendingEntry, field: Field, value: &str) {
    if value.is_empty() {
        return;
    }
    let slot = match field {
        Field::Title => &mut pending.title,
        Field::Published => &mut pending.published,
        Field::Updated => &mut pending.updated,
    };
    if slot.is_none() {
        *slot = Some(value.to_string());
    }
}

fn finish_entry(pending: PendingEntry) -> FeedEntry {
    let published = pending
        .published
        .as_deref()
        .or(pending.updated.as_deref())
        .and_then(parse_feed_timestamp);
    FeedEntry {
        title: pending.title,
        published,
    }
}

/// RSS uses RFC 2822 dates, Atom and Dublin Core use RFC 3339.
pub fn parse_feed_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
}
