use crate::error::{MoodmapError, Result};
use crate::geo::{Position, geo_distance};
use crate::geometry::{Region, find_center};
use crate::sentiment::{SentimentTable, tweet_sentiment};
use crate::tweet::Tweet;

use log::warn;
use std::collections::BTreeMap;

/// Computes the center of every region.
///
/// A region whose polygons are all degenerate is skipped with a warning
/// rather than failing the whole batch; the remaining regions still get
/// centers. Only an empty result is fatal.
///
/// # Errors
/// Returns `EmptyRegionSet` if no region yields a usable center.
pub fn region_centers(regions: &[Region]) -> Result<BTreeMap<String, Position>> {
    let mut centers = BTreeMap::new();

    for region in regions {
        match find_center(&region.polygons) {
            Ok(center) => {
                centers.insert(region.name.clone(), center);
            }
            Err(MoodmapError::DegenerateRegion { .. }) => {
                warn!("Skipping region '{}': zero total area", region.name);
            }
            Err(e) => return Err(e),
        }
    }

    if centers.is_empty() {
        return Err(MoodmapError::EmptyRegionSet);
    }
    Ok(centers)
}

/// Name of the region whose center is closest to `point`.
///
/// Linear scan with a strict `<` comparison, so on an exact distance tie
/// the first entry in `BTreeMap` order (the lexicographically smallest
/// name) wins. That makes assignment reproducible across runs.
///
/// # Errors
/// Returns `EmptyRegionSet` when `centers` is empty.
pub fn closest_region<'a>(
    point: Position,
    centers: &'a BTreeMap<String, Position>,
) -> Result<&'a str> {
    let mut best: Option<(&str, f64)> = None;

    for (name, &center) in centers {
        let dist = geo_distance(point, center);
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((name, dist));
        }
    }

    best.map(|(name, _)| name).ok_or(MoodmapError::EmptyRegionSet)
}

/// Partitions tweets by their nearest region center.
///
/// Centers are computed once up front. Each bucket preserves the input
/// order of its tweets; regions that attract no tweet are absent from the
/// result entirely.
pub fn group_tweets(tweets: &[Tweet], regions: &[Region]) -> Result<BTreeMap<String, Vec<Tweet>>> {
    let centers = region_centers(regions)?;
    let mut grouped: BTreeMap<String, Vec<Tweet>> = BTreeMap::new();

    for tweet in tweets {
        let name = closest_region(tweet.location(), &centers)?;
        grouped.entry(name.to_string()).or_default().push(tweet.clone());
    }

    Ok(grouped)
}

/// Names of the `n` regions whose centers are nearest to `name`'s center,
/// including `name` itself, nearest first. Distance ties fall back to name
/// order so the result is reproducible.
///
/// # Errors
/// Returns `UnknownRegion` when `name` has no center in the map.
pub fn regions_nearest_to(
    name: &str,
    centers: &BTreeMap<String, Position>,
    n: usize,
) -> Result<Vec<String>> {
    let &origin = centers
        .get(name)
        .ok_or_else(|| MoodmapError::UnknownRegion(name.to_string()))?;

    let mut by_distance: Vec<(&String, f64)> = centers
        .iter()
        .map(|(other, &center)| (other, geo_distance(origin, center)))
        .collect();
    by_distance.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    Ok(by_distance
        .into_iter()
        .take(n)
        .map(|(other, _)| other.clone())
        .collect())
}

/// Average sentiment per region, over tweets that score at all.
///
/// A region whose every tweet scores unknown is left out of the result —
/// absence means "no data", never 0 (0 is neutral sentiment).
pub fn average_sentiments(
    grouped: &BTreeMap<String, Vec<Tweet>>,
    table: &SentimentTable,
) -> BTreeMap<String, f64> {
    let mut averages = BTreeMap::new();

    for (name, tweets) in grouped {
        let mut sum = 0.0;
        let mut count = 0u32;
        for tweet in tweets {
            if let Some(score) = tweet_sentiment(tweet, table) {
                sum += score;
                count += 1;
            }
        }
        if count > 0 {
            averages.insert(name.clone(), sum / f64::from(count));
        }
    }

    averages
}
