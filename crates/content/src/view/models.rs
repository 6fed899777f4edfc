//! View models handed to the presentation layer.

use chrono::Datelike;
use serde::Serialize;
use serde_json::Value;

use super::policy::{self, TBD};
use crate::model::Record;
use crate::temporal::{display_date, to_comparable_instant, to_comparable_year};

/// A listing page: its items, plus a visible error when loading failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    /// The items to show.
    pub items: Vec<T>,
    /// User-visible message when the listing is degraded.
    pub error: Option<String>,
}

impl<T> Listing<T> {
    /// A successfully loaded listing.
    pub fn loaded(items: Vec<T>) -> Self {
        Self { items, error: None }
    }

    /// An empty listing carrying an error message.
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// Items that did load, plus a message about the part that did not.
    pub fn partial(items: Vec<T>, message: impl Into<String>) -> Self {
        Self {
            items,
            error: Some(message.into()),
        }
    }

    /// True when loading failed.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// An artist as shown on the artists index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub origin: Option<String>,
    pub profile_picture: Option<String>,
}

impl ArtistSummary {
    /// Builds a summary from an artist record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id().to_string(),
            name: policy::display_title(record),
            slug: policy::public_slug(record, &["slug"]),
            origin: record.text("origin").map(String::from),
            profile_picture: record.text("profilePicture").map(String::from),
        }
    }
}

/// An artist page with resolved artworks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub summary: ArtistSummary,
    pub birth_year: Option<i32>,
    pub bio: Vec<String>,
    pub manifesto: Vec<String>,
    pub web: Option<String>,
    pub cv_url: Option<String>,
    pub artworks: Vec<ArtworkView>,
    /// Artwork ids listed on the artist that could not be resolved.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_artworks: Vec<String>,
}

impl ArtistDetail {
    /// Builds the detail view from an artist record and its artworks.
    pub fn from_parts(record: &Record, artworks: &[Record], missing: Vec<String>) -> Self {
        Self {
            summary: ArtistSummary::from_record(record),
            birth_year: record.get("birthDate").and_then(to_comparable_year),
            bio: record.texts("bio"),
            manifesto: record.texts("manifesto"),
            web: record.text("web").map(String::from),
            cv_url: record.text("cvUrl").map(String::from),
            artworks: artworks.iter().map(ArtworkView::from_record).collect(),
            missing_artworks: missing,
        }
    }
}

/// One artwork.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkView {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub image: String,
    pub medium: Option<String>,
    pub measurements: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub extras: Option<String>,
    /// Stored as-is; `null` when unpriced.
    pub price: Value,
    pub availability_status: Option<String>,
}

impl ArtworkView {
    /// Builds the view from an artwork record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id().to_string(),
            slug: policy::public_slug(record, &["artworkSlug", "slug"]),
            title: record
                .first_text(&["title", "name"])
                .unwrap_or(policy::UNTITLED)
                .to_string(),
            image: record
                .text("url")
                .unwrap_or(policy::PLACEHOLDER_IMAGE)
                .to_string(),
            medium: record.text("medium").map(String::from),
            measurements: record.text("measurements").map(String::from),
            description: record.text("description").map(String::from),
            date: display_value(record.get("date")),
            extras: record.text("extras").map(String::from),
            price: record.get("price").cloned().unwrap_or(Value::Null),
            availability_status: record.text("availability_status").map(String::from),
        }
    }
}

/// An artwork page with its owning artist, when one lists it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtworkDetail {
    pub artwork: ArtworkView,
    pub artist: Option<ArtistSummary>,
}

/// An exhibition with the address of the location hosting it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub opening_date: Option<String>,
    pub closing_date: Option<String>,
    pub year: Option<i32>,
    pub headquarters_id: Option<String>,
    pub address: Option<String>,
}

impl ExhibitionView {
    /// Builds the view from an exhibition and its (optional) headquarters.
    pub fn from_parts(record: &Record, headquarters: Option<&Record>) -> Self {
        Self {
            id: record.id().to_string(),
            name: policy::display_title(record),
            slug: policy::public_slug(record, &["slug"]),
            opening_date: display_value(record.get("openingDate")),
            closing_date: display_value(record.get("closingDate")),
            year: record.get("openingDate").and_then(to_comparable_year),
            headquarters_id: headquarters.map(|hq| hq.id().to_string()),
            address: headquarters.and_then(|hq| hq.text("address")).map(String::from),
        }
    }
}

/// A gallery location with the exhibitions it hosts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadquartersView {
    pub id: String,
    pub address: Option<String>,
    pub exhibitions: Vec<ExhibitionView>,
}

impl HeadquartersView {
    /// Builds the view from a headquarters record and its exhibitions.
    pub fn from_parts(record: &Record, exhibitions: &[Record]) -> Self {
        Self {
            id: record.id().to_string(),
            address: record.text("address").map(String::from),
            exhibitions: exhibitions
                .iter()
                .map(|exhibition| ExhibitionView::from_parts(exhibition, Some(record)))
                .collect(),
        }
    }
}

/// One scheduled date of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDate {
    pub date: String,
    pub time: String,
}

/// An event or performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub image: String,
    pub tags: Vec<String>,
    pub dates: Vec<EventDate>,
    pub year: Option<i32>,
    pub featured: bool,
    pub description: Option<String>,
}

impl EventView {
    /// Builds the view from an event or performance record.
    pub fn from_record(record: &Record) -> Self {
        let mut dates = event_dates(record);
        if dates.is_empty() {
            dates.push(EventDate {
                date: TBD.to_string(),
                time: TBD.to_string(),
            });
        }

        Self {
            id: record.id().to_string(),
            slug: policy::public_slug(record, &["slug"]),
            title: policy::display_title(record),
            image: policy::image_url(record),
            tags: policy::record_tags(record),
            dates,
            year: policy::event_instant(record).map(|instant| instant.year()),
            featured: policy::is_featured_record(record),
            description: record.text("description").map(String::from),
        }
    }
}

fn event_dates(record: &Record) -> Vec<EventDate> {
    let Some(Value::Array(entries)) = record.get("dates") else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| EventDate {
            date: display_value(entry.get("date")).unwrap_or_else(|| TBD.to_string()),
            time: entry
                .get("time")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(TBD)
                .to_string(),
        })
        .collect()
}

/// A team member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberView {
    pub id: String,
    pub name: String,
    pub roles: Vec<String>,
    pub profile_picture: Option<String>,
}

impl TeamMemberView {
    /// Builds the view from a member record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id().to_string(),
            name: policy::display_title(record),
            roles: record.texts("roles"),
            profile_picture: record.text("profilePicture").map(String::from),
        }
    }
}

/// Renders a date-like value for display.
///
/// Resolvable values are formatted uniformly. Bare years and unresolvable
/// text are shown verbatim so hand-entered labels like "Spring 2024" survive.
fn display_value(value: Option<&Value>) -> Option<String> {
    let value = value?;
    let is_bare_year = value
        .as_str()
        .is_some_and(|s| s.trim().len() == 4 && s.trim().bytes().all(|b| b.is_ascii_digit()));
    if let Some(instant) = to_comparable_instant(value).filter(|_| !is_bare_year) {
        return Some(display_date(instant));
    }
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
