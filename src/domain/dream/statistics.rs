//! Aggregate statistics over a user's dream history.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::{DreamRecord, Mood};
use crate::domain::foundation::Timestamp;

const TOP_KEYWORDS: usize = 5;
const TOP_EMOTIONS: usize = 3;
const MONTHLY_WINDOW_DAYS: i64 = 180;

/// A value with its number of occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frequency {
    pub value: String,
    pub count: usize,
}

/// Summary of a user's journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DreamStatistics {
    pub total_dreams: usize,
    pub days_since_last: i64,
    pub most_common_keywords: Vec<Frequency>,
    pub mood_distribution: BTreeMap<Mood, usize>,
    pub most_common_emotions: Vec<Frequency>,
    /// Dreams per `YYYY-MM` over the last 180 days.
    pub monthly_counts: BTreeMap<String, usize>,
}

impl DreamStatistics {
    /// Computes statistics as of `now`. Returns `None` for an empty journal.
    pub fn compute(dreams: &[DreamRecord], now: Timestamp) -> Option<Self> {
        let latest = dreams.iter().map(|d| d.created_at()).max()?;

        let mut mood_distribution = BTreeMap::new();
        for dream in dreams {
            *mood_distribution.entry(dream.mood()).or_insert(0) += 1;
        }

        let window_start = now.minus_days(MONTHLY_WINDOW_DAYS);
        let mut monthly_counts = BTreeMap::new();
        for dream in dreams.iter().filter(|d| d.created_at().is_after(&window_start)) {
            *monthly_counts.entry(dream.created_at().month_key()).or_insert(0) += 1;
        }

        Some(Self {
            total_dreams: dreams.len(),
            days_since_last: now.duration_since(&latest).num_days(),
            most_common_keywords: most_common(
                dreams.iter().flat_map(|d| d.keywords().iter()),
                TOP_KEYWORDS,
            ),
            mood_distribution,
            most_common_emotions: most_common(
                dreams.iter().flat_map(|d| d.emotions().iter()),
                TOP_EMOTIONS,
            ),
            monthly_counts,
        })
    }
}

/// Highest counts first; ties keep first-seen order.
fn most_common<'a>(values: impl Iterator<Item = &'a String>, limit: usize) -> Vec<Frequency> {
    let mut order: Vec<&String> = Vec::new();
    let mut counts: HashMap<&String, usize> = HashMap::new();
    for value in values {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut ranked: Vec<Frequency> = order
        .into_iter()
        .map(|value| Frequency {
            value: value.clone(),
            count: counts.get(value).copied().unwrap_or_default(),
        })
        .collect();
    // stable sort keeps insertion order among equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}
