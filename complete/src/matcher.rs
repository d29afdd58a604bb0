//! Reference implementation of the multi-tier candidate matcher.
//!
//! The generated Bash and PowerShell scripts carry their own copies of this
//! algorithm. This one exists so the ranking can be tested and inspected
//! from Rust (`cmdflag score`), and the shared vectors in
//! `tests/vectors.rs` hold all three to the same answers.
//!
//! Tiers run in order and the first non-empty tier wins:
//!
//! | Tier | Runs when | Keeps |
//! |------|-----------|-------|
//! | guard | more than `max_candidates` candidates | case-sensitive prefix matches |
//! | exact prefix | always | case-sensitive prefix matches |
//! | folded prefix | exact prefix empty | case-insensitive prefix matches |
//! | fuzzy | folded prefix empty, fuzzy on, pattern long enough | top scores over threshold |
//! | substring | everything above empty or skipped | case-insensitive substring matches |

use std::collections::HashMap;
use std::fmt;

use crate::config::CompletionConfig;

/// Score awarded to a case-insensitive prefix match.
pub const PREFIX_SCORE: u32 = 100;

const MATCH_WEIGHT: usize = 60;
const RUN_WEIGHT: usize = 20;
const START_BONUS: usize = 20;
const MAX_LENGTH_PENALTY: usize = 10;

/// Which tier produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Candidate list over `max_candidates`; prefix matches only.
    Guarded,
    ExactPrefix,
    FoldedPrefix,
    Fuzzy,
    Substring,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guarded => "guarded",
            Self::ExactPrefix => "exact-prefix",
            Self::FoldedPrefix => "folded-prefix",
            Self::Fuzzy => "fuzzy",
            Self::Substring => "substring",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores `candidate` against `pattern` on a 0-100 scale.
///
/// Lengths are counted in characters. Matching is case-insensitive.
///
/// # Examples
///
/// ```
/// use cmdflag_complete::compute_score;
///
/// assert_eq!(compute_score("ST", "start"), 100);
/// assert_eq!(compute_score("sr", "start"), 87);
/// assert_eq!(compute_score("xz", "start"), 0);
/// ```
pub fn compute_score(pattern: &str, candidate: &str) -> u32 {
    let pat_len = pattern.chars().count();
    let cand_len = candidate.chars().count();
    if cand_len < pat_len {
        return 0;
    }

    let pattern = pattern.to_lowercase();
    let candidate = candidate.to_lowercase();
    if candidate.starts_with(&pattern) {
        return PREFIX_SCORE;
    }
    if !pattern.chars().all(|ch| candidate.contains(ch)) {
        return 0;
    }

    let wanted: Vec<char> = pattern.chars().collect();
    let mut next = 0;
    let mut matched = 0;
    let mut run = 0;
    let mut max_run = 0;
    let mut last_hit: Option<usize> = None;
    let mut start_bonus = false;

    for (i, ch) in candidate.chars().enumerate() {
        if next >= wanted.len() {
            break;
        }
        if ch != wanted[next] {
            continue;
        }
        if i == 0 && next == 0 {
            start_bonus = true;
        }
        run = match last_hit {
            Some(prev) if prev + 1 == i => run + 1,
            _ => 1,
        };
        max_run = max_run.max(run);
        last_hit = Some(i);
        matched += 1;
        next += 1;
    }

    let mut score = matched * MATCH_WEIGHT / pat_len + max_run * RUN_WEIGHT / pat_len;
    if start_bonus {
        score += START_BONUS;
    }
    let penalty = (cand_len - pat_len).min(MAX_LENGTH_PENALTY);
    score.saturating_sub(penalty).min(PREFIX_SCORE as usize) as u32
}

/// Score memo keyed by `(pattern, candidate)`.
///
/// Once it holds more than `max_size` entries the next insert clears it.
#[derive(Debug, Clone)]
pub struct ScoreCache {
    entries: HashMap<(String, String), u32>,
    max_size: usize,
}

impl ScoreCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_size,
        }
    }

    pub fn get(&self, pattern: &str, candidate: &str) -> Option<u32> {
        self.entries
            .get(&(pattern.to_string(), candidate.to_string()))
            .copied()
    }

    pub fn insert(&mut self, pattern: &str, candidate: &str, score: u32) {
        if self.entries.len() > self.max_size {
            self.entries.clear();
        }
        self.entries
            .insert((pattern.to_string(), candidate.to_string()), score);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stateful matcher: a config plus its score memo.
///
/// # Examples
///
/// ```
/// use cmdflag_complete::{CompletionConfig, Matcher, Tier};
///
/// let mut matcher = Matcher::new(CompletionConfig::default());
/// let candidates = ["start", "stop", "status", "restart"];
///
/// assert_eq!(matcher.filter("st", &candidates), vec!["start", "stop", "status"]);
///
/// let (tier, matches) = matcher.filter_with_tier("sr", &candidates);
/// assert_eq!(tier, Some(Tier::Fuzzy));
/// assert_eq!(matches, vec!["start", "restart"]);
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    config: CompletionConfig,
    cache: ScoreCache,
}

impl Matcher {
    pub fn new(config: CompletionConfig) -> Self {
        let cache = ScoreCache::new(config.cache_max_size);
        Self { config, cache }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }

    /// Memoized [`compute_score`].
    pub fn score(&mut self, pattern: &str, candidate: &str) -> u32 {
        if let Some(score) = self.cache.get(pattern, candidate) {
            return score;
        }
        let score = compute_score(pattern, candidate);
        self.cache.insert(pattern, candidate, score);
        score
    }

    /// Filters and orders `candidates` for `pattern`.
    pub fn filter<S: AsRef<str>>(&mut self, pattern: &str, candidates: &[S]) -> Vec<String> {
        self.filter_with_tier(pattern, candidates).1
    }

    /// Like [`filter`](Self::filter), also reporting the tier that
    /// produced the result (`None` when nothing matched).
    pub fn filter_with_tier<S: AsRef<str>>(
        &mut self,
        pattern: &str,
        candidates: &[S],
    ) -> (Option<Tier>, Vec<String>) {
        let exact = || -> Vec<String> {
            candidates
                .iter()
                .map(AsRef::as_ref)
                .filter(|c| c.starts_with(pattern))
                .map(str::to_string)
                .collect()
        };

        if candidates.len() > self.config.max_candidates {
            let matches = exact();
            return (tier_if_any(Tier::Guarded, &matches), matches);
        }

        let matches = exact();
        if !matches.is_empty() {
            return (Some(Tier::ExactPrefix), matches);
        }

        let folded = pattern.to_lowercase();
        let matches: Vec<String> = candidates
            .iter()
            .map(AsRef::as_ref)
            .filter(|c| c.to_lowercase().starts_with(&folded))
            .map(str::to_string)
            .collect();
        if !matches.is_empty() {
            return (Some(Tier::FoldedPrefix), matches);
        }

        if self.config.fuzzy_enabled
            && pattern.chars().count() >= self.config.min_pattern_length
        {
            let matches = self.fuzzy(pattern, candidates);
            if !matches.is_empty() {
                return (Some(Tier::Fuzzy), matches);
            }
        }

        let matches: Vec<String> = candidates
            .iter()
            .map(AsRef::as_ref)
            .filter(|c| c.to_lowercase().contains(&folded))
            .map(str::to_string)
            .collect();
        (tier_if_any(Tier::Substring, &matches), matches)
    }

    fn fuzzy<S: AsRef<str>>(&mut self, pattern: &str, candidates: &[S]) -> Vec<String> {
        let threshold = self.config.score_threshold;
        let mut scored: Vec<(u32, &str)> = Vec::new();
        for candidate in candidates.iter().map(AsRef::as_ref) {
            let score = self.score(pattern, candidate);
            if score > 0 && score >= threshold {
                scored.push((score, candidate));
            }
        }
        // Stable: equal scores keep candidate order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(self.config.max_results)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

fn tier_if_any(tier: Tier, matches: &[String]) -> Option<Tier> {
    (!matches.is_empty()).then_some(tier)
}
