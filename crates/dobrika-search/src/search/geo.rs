//! Geo search: every live task ranked by distance from a centre point.
//!
//! The geo value-slot lives in two fast-field columns. A match-all query runs
//! through a [`TopDocs`] collector whose score is the negated distance read
//! from those columns, so the engine keeps only the window's top-k heap.
//! Equal distances tie-break on document address, which keeps paging stable
//! between calls against the same commit.

use dobrika_core::{Error, Result};
use tantivy::collector::{CustomScorer, CustomSegmentScorer, TopDocs};
use tantivy::columnar::Column;
use tantivy::query::AllQuery;
use tantivy::{DocId, SegmentReader};

use super::{collect_task_ids, ResultWindow};
use crate::geo::GeoPoint;
use crate::store::TaskIndex;

/// Task ids nearest to `centre`, nearest first, within `window`.
pub fn search(store: &TaskIndex, centre: GeoPoint, window: ResultWindow) -> Result<Vec<String>> {
    if window.is_empty() {
        return Ok(Vec::new());
    }

    let (lat_column, lon_column) = store.schema().geo_columns();
    let scorer = DistanceScorer {
        centre,
        lat_column,
        lon_column,
    };

    let searcher = store.searcher();
    let top_docs = searcher
        .search(
            &AllQuery,
            &TopDocs::with_limit(window.limit)
                .and_offset(window.offset)
                .custom_score(scorer),
        )
        .map_err(|e| Error::engine(format!("Geo query failed: {e}")))?;

    collect_task_ids(
        &searcher,
        store.schema(),
        top_docs.into_iter().map(|(_, address)| address),
        false,
    )
}

/// Scores documents by negated distance from `centre`.
struct DistanceScorer {
    centre: GeoPoint,
    lat_column: String,
    lon_column: String,
}

impl CustomScorer<f64> for DistanceScorer {
    type Child = SegmentDistanceScorer;

    fn segment_scorer(&self, segment_reader: &SegmentReader) -> tantivy::Result<Self::Child> {
        let fast_fields = segment_reader.fast_fields();
        Ok(SegmentDistanceScorer {
            centre: self.centre,
            lats: fast_fields.f64(&self.lat_column)?,
            lons: fast_fields.f64(&self.lon_column)?,
        })
    }
}

struct SegmentDistanceScorer {
    centre: GeoPoint,
    lats: Column<f64>,
    lons: Column<f64>,
}

impl CustomSegmentScorer<f64> for SegmentDistanceScorer {
    fn score(&mut self, doc: DocId) -> f64 {
        match (self.lats.first(doc), self.lons.first(doc)) {
            (Some(lat), Some(lon)) => -self.centre.distance_to(&GeoPoint { lat, lon }),
            // Rank after every located task.
            _ => f64::NEG_INFINITY,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
