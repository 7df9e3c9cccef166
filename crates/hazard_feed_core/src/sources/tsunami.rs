//! NOAA tsunami warning Atom feed, read through the relay.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use reqwest::Client;

use crate::api::get_text;
use crate::date;
use crate::error::{FeedError, Result};
use crate::models::{HazardEvent, HazardType};
use crate::sources::HazardSource;

/// Marker sizing constant; tsunami bulletins carry no comparable magnitude.
pub const TSUNAMI_MAGNITUDE: f64 = 7.5;

/// Mid-Pacific placeholder for bulletins that are not tied to a point.
pub const PLACEHOLDER_POINT: (f64, f64) = (0.0, -150.0);

pub struct TsunamiSource {
    client: Client,
    url: String,
}

impl TsunamiSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl HazardSource for TsunamiSource {
    fn kind(&self) -> HazardType {
        HazardType::Tsunami
    }

    async fn fetch(&self) -> Result<Vec<HazardEvent>> {
        let body = get_text(&self.client, &self.url, "application/atom+xml, application/xml").await?;
        parse_tsunami_feed(&body)
    }
}

#[derive(Clone, Copy)]
enum Field {
    Title,
    Summary,
    Published,
    Updated,
    Point,
}

#[derive(Default)]
struct RawEntry {
    title: String,
    summary: String,
    published: String,
    updated: String,
    point: String,
    link: Option<String>,
}

impl RawEntry {
    fn push(&mut self, field: Field, text: &str) {
        let target = match field {
            Field::Title => &mut self.title,
            Field::Summary => &mut self.summary,
            Field::Published => &mut self.published,
            Field::Updated => &mut self.updated,
            Field::Point => &mut self.point,
        };
        target.push_str(text);
    }

    fn into_event(self) -> Option<HazardEvent> {
        let (lat, lng) = parse_point(&self.point).unwrap_or(PLACEHOLDER_POINT);
        let title = match self.title.trim() {
            "" => "Tsunami Bulletin".to_string(),
            t => t.to_string(),
        };
        let description = match self.summary.trim() {
            "" => title.clone(),
            s => s.to_string(),
        };
        let when = date::or_now(
            date::parse_loose(&self.published).or_else(|| date::parse_loose(&self.updated)),
        );
        HazardEvent::new(HazardType::Tsunami, title, description, lat, lng, TSUNAMI_MAGNITUDE, when)
            .map(|e| e.with_source("NOAA").with_url(self.link))
    }
}

/// `georss:point` is "lat lng", whitespace separated.
fn parse_point(raw: &str) -> Option<(f64, f64)> {
    let mut parts = raw.split_whitespace();
    let lat: f64 = parts.next()?.parse().ok()?;
    let lng: f64 = parts.next()?.parse().ok()?;
    (lat.is_finite() && lng.is_finite()).then_some((lat, lng))
}

fn link_href(e: &BytesStart<'_>) -> Option<String> {
    e.try_get_attribute("href")
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok())
        .map(|v| v.into_owned())
}

fn field_for(local_name: &[u8]) -> Option<Field> {
    match local_name {
        b"title" => Some(Field::Title),
        b"summary" => Some(Field::Summary),
        b"published" => Some(Field::Published),
        b"updated" => Some(Field::Updated),
        b"point" => Some(Field::Point),
        _ => None,
    }
}

/// Parse every `<entry>` of an Atom document into a tsunami event.
pub fn parse_tsunami_feed(xml: &str) -> Result<Vec<HazardEvent>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut events = Vec::new();
    let mut current: Option<RawEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let local = e.local_name();
                if local.as_ref() == b"entry" {
                    current = Some(RawEntry::default());
                    field = None;
                } else if let Some(entry) = current.as_mut() {
                    if local.as_ref() == b"link" && entry.link.is_none() {
                        entry.link = link_href(&e);
                    }
                    field = field_for(local.as_ref());
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(entry) = current.as_mut() {
                    if e.local_name().as_ref() == b"link" && entry.link.is_none() {
                        entry.link = link_href(&e);
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = t
                        .unescape()
                        .map_err(|e| FeedError::Parse(format!("tsunami feed text: {}", e)))?;
                    entry.push(f, &text);
                }
            }
            Ok(Event::CData(c)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let raw = c.into_inner();
                    entry.push(f, &String::from_utf8_lossy(&raw));
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"entry" {
                    if let Some(event) = current.take().and_then(RawEntry::into_event) {
                        events.push(event);
                    }
                }
                field = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FeedError::Parse(format!(
                    "tsunami feed at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            Ok(_) => {}
        }
    }

    Ok(events)
}
