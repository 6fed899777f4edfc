//! Listing and detail builders.

use std::collections::HashSet;

use futures::future::join_all;
use gallery_persistence::DocumentStore;
use serde_json::Value;
use tracing::{debug, warn};

use super::models::{
    ArtistDetail, ArtistSummary, ArtworkDetail, ArtworkView, EventView, ExhibitionView,
    HeadquartersView, Listing, TeamMemberView,
};
use super::policy;
use crate::fetcher::{FetchError, FetchResult, Fetcher};
use crate::model::{Record, collections};
use crate::resolver::{find_parent, find_referencing, resolve_ids};
use crate::temporal::to_comparable_instant;

/// Decides whether a fetched record belongs in a listing.
pub type Predicate = fn(&Record) -> bool;

/// One collection feeding a listing, with its filter.
#[derive(Debug, Clone, Copy)]
pub struct Source {
    /// The collection to scan.
    pub collection: &'static str,
    /// Records failing this are skipped.
    pub predicate: Predicate,
}

impl Source {
    /// Every record of a collection.
    pub const fn all(collection: &'static str) -> Self {
        Self {
            collection,
            predicate: any,
        }
    }

    /// The records of a collection that pass `predicate`.
    pub const fn filtered(collection: &'static str, predicate: Predicate) -> Self {
        Self {
            collection,
            predicate,
        }
    }
}

fn any(_: &Record) -> bool {
    true
}

fn is_performance(record: &Record) -> bool {
    policy::has_tag(record, "performance")
}

/// Featured events.
pub const HIGHLIGHTS: &[Source] = &[Source::filtered(
    collections::EVENTS,
    policy::is_featured_record,
)];

/// Performances, plus events tagged as performances.
pub const PERFORMANCES: &[Source] = &[
    Source::all(collections::PERFORMANCES),
    Source::filtered(collections::EVENTS, is_performance),
];

fn unavailable(err: &FetchError) -> String {
    format!("Unable to load {} right now.", err.collection)
}

/// Builds every view the site shows from a document store.
#[derive(Debug, Clone)]
pub struct Gallery<S> {
    fetcher: Fetcher<S>,
}

impl<S: DocumentStore> Gallery<S> {
    /// Creates a builder over the given store.
    pub fn new(store: S) -> Self {
        Self {
            fetcher: Fetcher::new(store),
        }
    }

    /// The underlying fetcher.
    pub fn fetcher(&self) -> &Fetcher<S> {
        &self.fetcher
    }

    /// Reads all `sources` concurrently, filters them and drops repeated ids.
    ///
    /// The first source to yield an id wins. A failed source contributes
    /// nothing; its error is returned alongside the records of the others.
    pub async fn collect(&self, sources: &[Source]) -> (Vec<Record>, Vec<FetchError>) {
        let reads = sources
            .iter()
            .map(|source| self.fetcher.fetch_all(source.collection));
        let results = join_all(reads).await;

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        let mut errors = Vec::new();
        for (source, result) in sources.iter().zip(results) {
            let batch = match result {
                Ok(batch) => batch,
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };
            for record in batch {
                if (source.predicate)(&record) && seen.insert(record.id().to_string()) {
                    records.push(record);
                }
            }
        }
        (records, errors)
    }

    /// Events from `sources`, most recent first.
    ///
    /// The listing is only emptied when every source failed.
    pub async fn events(&self, sources: &[Source]) -> Listing<EventView> {
        let (mut records, errors) = self.collect(sources).await;
        let Some(first) = errors.first() else {
            policy::sort_by_recency(&mut records, policy::event_instant);
            return Listing::loaded(records.iter().map(EventView::from_record).collect());
        };

        if errors.len() == sources.len() {
            warn!(error = %first, "Serving degraded event listing");
            return Listing::degraded(unavailable(first));
        }

        for e in &errors {
            warn!(error = %e, "Serving partial event listing");
        }
        policy::sort_by_recency(&mut records, policy::event_instant);
        Listing::partial(
            records.iter().map(EventView::from_record).collect(),
            unavailable(first),
        )
    }

    /// Featured events, most recent first.
    pub async fn highlights(&self) -> Listing<EventView> {
        self.events(HIGHLIGHTS).await
    }

    /// Performances and performance-tagged events, most recent first.
    pub async fn performances(&self) -> Listing<EventView> {
        self.events(PERFORMANCES).await
    }

    /// Exhibitions with their hosting address, latest opening first.
    ///
    /// If headquarters cannot be read the exhibitions are still listed,
    /// without addresses.
    pub async fn exhibitions(&self) -> Listing<ExhibitionView> {
        let (exhibitions, headquarters) = futures::join!(
            self.fetcher.fetch_all(collections::EXHIBITIONS),
            self.fetcher.fetch_all(collections::HEADQUARTERS),
        );

        let mut exhibitions = match exhibitions {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Serving degraded exhibition listing");
                return Listing::degraded(unavailable(&e));
            }
        };
        let headquarters = headquarters.unwrap_or_else(|e| {
            warn!(error = %e, "Listing exhibitions without addresses");
            Vec::new()
        });

        policy::sort_by_recency(&mut exhibitions, |record| {
            record.get("openingDate").and_then(to_comparable_instant)
        });

        Listing::loaded(
            exhibitions
                .iter()
                .map(|exhibition| {
                    let hq = find_parent(&headquarters, "exhibitions", exhibition.id());
                    ExhibitionView::from_parts(exhibition, hq)
                })
                .collect(),
        )
    }

    /// Each headquarters with its resolved exhibitions.
    pub async fn headquarters(&self) -> Listing<HeadquartersView> {
        let records = match self.fetcher.fetch_all(collections::HEADQUARTERS).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Serving degraded headquarters listing");
                return Listing::degraded(unavailable(&e));
            }
        };

        let resolutions = join_all(records.iter().map(|hq| {
            let ids = hq.ids("exhibitions");
            async move { resolve_ids(&self.fetcher, collections::EXHIBITIONS, &ids).await }
        }))
        .await;

        Listing::loaded(
            records
                .iter()
                .zip(resolutions)
                .map(|(hq, resolution)| HeadquartersView::from_parts(hq, &resolution.records))
                .collect(),
        )
    }

    /// Artists in alphabetical order.
    pub async fn artists(&self) -> Listing<ArtistSummary> {
        match self.fetcher.fetch_all(collections::ARTISTS).await {
            Ok(records) => {
                let mut artists: Vec<_> = records.iter().map(ArtistSummary::from_record).collect();
                policy::sort_alphabetically(&mut artists, |artist| artist.name.as_str());
                Listing::loaded(artists)
            }
            Err(e) => {
                warn!(error = %e, "Serving degraded artist listing");
                Listing::degraded(unavailable(&e))
            }
        }
    }

    /// Members flagged `team: true`, in alphabetical order.
    pub async fn team(&self) -> Listing<TeamMemberView> {
        match self
            .fetcher
            .fetch_where(collections::MEMBERS, "team", &Value::Bool(true))
            .await
        {
            Ok(records) => {
                let mut members: Vec<_> =
                    records.iter().map(TeamMemberView::from_record).collect();
                policy::sort_alphabetically(&mut members, |member| member.name.as_str());
                Listing::loaded(members)
            }
            Err(e) => {
                warn!(error = %e, "Serving degraded team listing");
                Listing::degraded(unavailable(&e))
            }
        }
    }

    /// An artist page, with artworks resolved in the order the artist lists them.
    pub async fn artist(&self, slug: &str) -> FetchResult<Option<ArtistDetail>> {
        let Some(artist) = self
            .fetcher
            .fetch_by_slug(collections::ARTISTS, "slug", slug)
            .await?
        else {
            return Ok(None);
        };

        let ids = artist.ids("artworks");
        let resolution = resolve_ids(&self.fetcher, collections::ARTWORKS, &ids).await;
        if !resolution.is_complete() {
            debug!(artist = %artist.id(), dropped = ?resolution.dropped, "Artist has dangling artworks");
        }

        Ok(Some(ArtistDetail::from_parts(
            &artist,
            &resolution.records,
            resolution.dropped,
        )))
    }

    /// An artwork page, looked up by `artworkSlug` and then by id.
    pub async fn artwork(&self, slug: &str) -> FetchResult<Option<ArtworkDetail>> {
        let Some(artwork) = self
            .fetcher
            .fetch_by_slug(collections::ARTWORKS, "artworkSlug", slug)
            .await?
        else {
            return Ok(None);
        };

        // A missing owner only hides the artist block.
        let artist = match find_referencing(
            &self.fetcher,
            collections::ARTISTS,
            "artworks",
            artwork.id(),
        )
        .await
        {
            Ok(owners) => owners.first().map(ArtistSummary::from_record),
            Err(e) => {
                warn!(artwork = %artwork.id(), error = %e, "Could not look up artwork owner");
                None
            }
        };

        Ok(Some(ArtworkDetail {
            artwork: ArtworkView::from_record(&artwork),
            artist,
        }))
    }

    /// An exhibition page with its hosting headquarters.
    pub async fn exhibition(&self, slug: &str) -> FetchResult<Option<ExhibitionView>> {
        let Some(exhibition) = self
            .fetcher
            .fetch_by_slug(collections::EXHIBITIONS, "slug", slug)
            .await?
        else {
            return Ok(None);
        };

        let headquarters = match find_referencing(
            &self.fetcher,
            collections::HEADQUARTERS,
            "exhibitions",
            exhibition.id(),
        )
        .await
        {
            Ok(parents) => parents,
            Err(e) => {
                warn!(exhibition = %exhibition.id(), error = %e, "Could not look up headquarters");
                Vec::new()
            }
        };

        Ok(Some(ExhibitionView::from_parts(
            &exhibition,
            headquarters.first(),
        )))
    }

    /// A performance page. Dedicated performances win over events with the
    /// same slug.
    pub async fn performance(&self, slug: &str) -> FetchResult<Option<EventView>> {
        for collection in [collections::PERFORMANCES, collections::EVENTS] {
            if let Some(record) = self.fetcher.fetch_by_slug(collection, "slug", slug).await? {
                return Ok(Some(EventView::from_record(&record)));
            }
        }
        Ok(None)
    }
}
