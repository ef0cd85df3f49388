//! Keyword scoring of a single playlist against every category.

use crate::categories::{CategoryRegistry, UNCATEGORIZED};
use crate::models::Playlist;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::{debug, warn};

pub const TITLE_WEIGHT: u64 = 3;
pub const DESCRIPTION_WEIGHT: u64 = 2;
pub const BODY_WEIGHT: u64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub category: String,
    pub confidence: f64,
    pub score: u64,
    /// Raw score of every category, in registry order.
    pub scores: Vec<CategoryScore>,
}

impl Classification {
    pub fn is_categorized(&self) -> bool {
        self.category != UNCATEGORIZED
    }
}

struct CategoryMatcher {
    id: String,
    keywords: Vec<Regex>,
}

/// Lowercased text buckets of one playlist.
struct TextBuckets {
    title: String,
    description: String,
    body: String,
}

impl TextBuckets {
    fn from_playlist(playlist: &Playlist) -> Self {
        let mut body = String::new();
        for video in &playlist.videos {
            body.push(' ');
            body.push_str(&video.title);
            body.push(' ');
            body.push_str(&video.description);
        }
        Self {
            title: playlist.title.to_lowercase(),
            description: playlist.description.to_lowercase(),
            body: body.to_lowercase(),
        }
    }

    fn word_count(&self) -> usize {
        format!("{} {} {}", self.title, self.description, self.body)
            .split_whitespace()
            .count()
    }
}

pub struct ContentAnalyzer<'r> {
    registry: &'r CategoryRegistry,
    matchers: Vec<CategoryMatcher>,
}

impl<'r> ContentAnalyzer<'r> {
    pub fn new(registry: &'r CategoryRegistry) -> Self {
        let matchers = registry
            .iter()
            .map(|category| CategoryMatcher {
                id: category.id.clone(),
                keywords: category
                    .keywords
                    .iter()
                    .filter(|k| !k.is_empty())
                    .filter_map(|k| compile_keyword(&category.id, k))
                    .collect(),
            })
            .collect();
        Self { registry, matchers }
    }

    pub fn registry(&self) -> &'r CategoryRegistry {
        self.registry
    }

    pub fn score(&self, playlist: &Playlist) -> Classification {
        let buckets = TextBuckets::from_playlist(playlist);

        let scores: Vec<CategoryScore> = self
            .matchers
            .iter()
            .map(|m| CategoryScore {
                category: m.id.clone(),
                score: raw_score(&m.keywords, &buckets),
            })
            .collect();

        // Strictly greater keeps the earliest category on ties.
        let mut best: Option<&CategoryScore> = None;
        for s in &scores {
            if best.map_or(true, |b| s.score > b.score) {
                best = Some(s);
            }
        }

        let (category, score) = match best {
            Some(b) if b.score > 0 => (b.category.clone(), b.score),
            _ => {
                debug!(playlist = %playlist.title, "no keyword matched");
                return Classification {
                    category: UNCATEGORIZED.to_string(),
                    confidence: 0.0,
                    score: 0,
                    scores,
                };
            }
        };

        let confidence = confidence(score, buckets.word_count());
        debug!(
            playlist = %playlist.title,
            category = %category,
            score,
            confidence,
            "scored playlist"
        );
        Classification {
            category,
            confidence,
            score,
            scores,
        }
    }
}

/// `min(score / max(words / 10, 1), 1)`.
pub fn confidence(score: u64, word_count: usize) -> f64 {
    let volume = (word_count as f64 / 10.0).max(1.0);
    (score as f64 / volume).min(1.0)
}

fn raw_score(keywords: &[Regex], buckets: &TextBuckets) -> u64 {
    keywords
        .iter()
        .map(|k| {
            count_matches(k, &buckets.title) * TITLE_WEIGHT
                + count_matches(k, &buckets.description) * DESCRIPTION_WEIGHT
                + count_matches(k, &buckets.body) * BODY_WEIGHT
        })
        .sum()
}

fn count_matches(keyword: &Regex, text: &str) -> u64 {
    keyword.find_iter(text).count() as u64
}

fn compile_keyword(category: &str, keyword: &str) -> Option<Regex> {
    let build = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();
    match build(keyword) {
        Ok(re) => Some(re),
        Err(err) => {
            warn!(
                category,
                keyword,
                error = %err,
                "keyword is not a valid pattern, matching literally"
            );
            build(&regex::escape(keyword))
                .map_err(|err| warn!(category, keyword, error = %err, "dropping keyword"))
                .ok()
        }
    }
}
