//! Job Matcher: additive keyword/location/skill/seniority scorer over a read-only catalog.
//!
//! Pure and synchronous: no I/O, no locking, safe to share as `Arc<JobMatcher>`.
//! The only non-determinism is the no-match fallback sample, which draws from an
//! injectable RNG so tests can seed it.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::jobs::models::{JobPosting, ScoredJob, SearchQuery, SearchResults};

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

const LOCATION_MATCH: u32 = 30;
const REMOTE_MATCH: u32 = 40;
const SKILL_MATCH: u32 = 20;
const SENIORITY_MATCH: u32 = 25;
const TITLE_MATCH: u32 = 30;
const DESCRIPTION_MATCH: u32 = 15;
const COMPANY_MATCH: u32 = 10;

/// Score given to every posting in the random fallback sample.
pub const FALLBACK_SCORE: u32 = 10;
/// Maximum number of postings returned per search.
pub const MAX_RESULTS: usize = 3;

/// Token that marks a remote-friendly location ("remote").
const REMOTE_TOKEN: &str = "リモート";

// ────────────────────────────────────────────────────────────────────────────
// Matcher
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct JobMatcher {
    catalog: Arc<[JobPosting]>,
}

impl JobMatcher {
    pub fn new(catalog: impl Into<Arc<[JobPosting]>>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }

    pub fn catalog(&self) -> &[JobPosting] {
        &self.catalog
    }

    /// Runs a search, using the thread RNG for the fallback sample.
    pub fn search(&self, query: &SearchQuery) -> SearchResults {
        self.search_with_rng(query, &mut rand::thread_rng())
    }

    /// Scores every posting, keeps the non-zero ones and returns the top
    /// `MAX_RESULTS` by descending score. Equal scores keep catalog order.
    ///
    /// When nothing scores above zero, returns up to `MAX_RESULTS` distinct
    /// postings drawn at random from the whole catalog, each scored `FALLBACK_SCORE`.
    pub fn search_with_rng<R: Rng + ?Sized>(
        &self,
        query: &SearchQuery,
        rng: &mut R,
    ) -> SearchResults {
        let mut scored: Vec<ScoredJob> = self
            .catalog
            .iter()
            .filter_map(|posting| {
                let score = score_posting(posting, query);
                (score > 0).then(|| ScoredJob {
                    posting: posting.clone(),
                    score,
                })
            })
            .collect();

        if scored.is_empty() {
            debug!("No posting matched {query:?}; returning random sample");
            return SearchResults {
                items: self.fallback_sample(rng),
            };
        }

        // Vec::sort_by is stable, so ties stay in catalog order.
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(MAX_RESULTS);

        debug!(
            "Matched {} postings, top score {}",
            scored.len(),
            scored[0].score
        );

        SearchResults { items: scored }
    }

    fn fallback_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<ScoredJob> {
        self.catalog
            .choose_multiple(rng, MAX_RESULTS)
            .map(|posting| ScoredJob {
                posting: posting.clone(),
                score: FALLBACK_SCORE,
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Computes the relevance of one posting for a query. Depends on nothing but
/// the two arguments, so a posting scores the same in any catalog.
pub fn score_posting(posting: &JobPosting, query: &SearchQuery) -> u32 {
    let mut score = 0;

    if let Some(location) = query.location() {
        let location = location.to_lowercase();
        if posting.location.to_lowercase().contains(&location) {
            score += LOCATION_MATCH;
        }
        // Stacks with the generic location match above.
        if location.contains(REMOTE_TOKEN) && posting.location.contains(REMOTE_TOKEN) {
            score += REMOTE_MATCH;
        }
    }

    if let Some(skills) = &query.skills {
        let posting_skills: Vec<String> =
            posting.skills.iter().map(|s| s.to_lowercase()).collect();
        let matched = skills
            .iter()
            .map(|skill| skill.to_lowercase())
            .filter(|skill| posting_skills.iter().any(|s| s.contains(skill.as_str())))
            .count() as u32;
        score += matched * SKILL_MATCH;
    }

    if query.seniority.is_some() && posting.seniority == query.seniority {
        score += SENIORITY_MATCH;
    }

    if let Some(keyword) = query.keyword() {
        let keyword = keyword.to_lowercase();
        if posting.title.to_lowercase().contains(&keyword) {
            score += TITLE_MATCH;
        }
        if posting
            .description
            .as_deref()
            .map(|d| d.to_lowercase().contains(&keyword))
            .unwrap_or(false)
        {
            score += DESCRIPTION_MATCH;
        }
        if posting.company.to_lowercase().contains(&keyword) {
            score += COMPANY_MATCH;
        }
    }

    score
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::catalog::seed_catalog;
    use crate::jobs::models::Seniority;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn seed_matcher() -> JobMatcher {
        JobMatcher::new(seed_catalog().unwrap())
    }

    fn make_posting(id: &str, title: &str, location: &str, skills: &[&str]) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: title.to_string(),
            company: format!("Company {id}"),
            location: location.to_string(),
            url: format!("https://example.com/{id}"),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn ids(results: &SearchResults) -> Vec<&str> {
        results.items.iter().map(|i| i.posting.id.as_str()).collect()
    }

    #[test]
    fn test_score_is_independent_of_catalog() {
        let catalog = seed_catalog().unwrap();
        let query = SearchQuery {
            q: Some("受付".to_string()),
            skills: Some(vec!["接客".to_string()]),
            ..Default::default()
        };

        let single = JobMatcher::new(vec![catalog[4].clone()]);
        let full = JobMatcher::new(catalog);

        let alone = single.search(&query).items[0].score;
        let among = full
            .search(&query)
            .items
            .iter()
            .find(|i| i.posting.id == "5")
            .map(|i| i.score)
            .unwrap();
        assert_eq!(alone, among);
        assert_eq!(alone, 30 + 15 + 20);
    }

    #[test]
    fn test_empty_query_returns_fallback_sample() {
        let matcher = seed_matcher();
        let mut rng = StdRng::seed_from_u64(7);
        let results = matcher.search_with_rng(&SearchQuery::default(), &mut rng);

        assert_eq!(results.items.len(), MAX_RESULTS);
        assert!(results.items.iter().all(|i| i.score == FALLBACK_SCORE));
    }

    #[test]
    fn test_fallback_on_small_catalog_returns_everything() {
        let matcher = JobMatcher::new(vec![
            make_posting("a", "受付", "大阪", &[]),
            make_posting("b", "看護師", "福岡", &[]),
        ]);
        let results = matcher.search(&SearchQuery::default());
        assert_eq!(results.items.len(), 2);
        let unique: HashSet<&str> = ids(&results).into_iter().collect();
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_fallback_never_repeats_postings() {
        let matcher = seed_matcher();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let results = matcher.search_with_rng(&SearchQuery::default(), &mut rng);
            let unique: HashSet<&str> = ids(&results).into_iter().collect();
            assert_eq!(unique.len(), MAX_RESULTS, "seed {seed} produced duplicates");
        }
    }

    #[test]
    fn test_fallback_is_reproducible_with_same_seed() {
        let matcher = seed_matcher();
        let query = SearchQuery {
            q: Some("エンジニア".to_string()),
            ..Default::default()
        };
        let first = matcher.search_with_rng(&query, &mut StdRng::seed_from_u64(42));
        let second = matcher.search_with_rng(&query, &mut StdRng::seed_from_u64(42));
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_junior_seniority_scores_25_capped_at_three() {
        let results = seed_matcher().search(&SearchQuery {
            seniority: Some(Seniority::Junior),
            ..Default::default()
        });
        assert_eq!(results.items.len(), 3);
        assert!(results.items.iter().all(|i| i.score == 25));
        assert_eq!(ids(&results), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_seniority_mismatch_is_dropped() {
        let mut senior = make_posting("s", "院長", "東京", &[]);
        senior.seniority = Some(Seniority::Senior);
        let mut junior = make_posting("j", "受付", "東京", &[]);
        junior.seniority = Some(Seniority::Junior);
        let unrated = make_posting("u", "看護師", "東京", &[]);

        let results = JobMatcher::new(vec![senior, junior, unrated]).search(&SearchQuery {
            seniority: Some(Seniority::Junior),
            ..Default::default()
        });
        assert_eq!(ids(&results), vec!["j"]);
        assert_eq!(results.items[0].score, 25);
    }

    #[test]
    fn test_location_tokyo_matches_all_seed_postings() {
        let matcher = seed_matcher();
        let query = SearchQuery {
            location: Some("東京".to_string()),
            ..Default::default()
        };
        for posting in matcher.catalog() {
            assert!(score_posting(posting, &query) >= 30);
        }
        let results = matcher.search(&query);
        assert_eq!(ids(&results), vec!["1", "2", "3"]);
        assert!(results.items.iter().all(|i| i.score == 30));
    }

    #[test]
    fn test_location_match_is_case_insensitive() {
        let posting = make_posting("a", "Nurse", "Tokyo, Shinjuku", &[]);
        let query = SearchQuery {
            location: Some("TOKYO".to_string()),
            ..Default::default()
        };
        assert_eq!(score_posting(&posting, &query), 30);
    }

    #[test]
    fn test_remote_bonus_stacks_with_location_match() {
        let posting = make_posting("r", "受付", "リモート", &[]);
        let query = SearchQuery {
            location: Some("リモート".to_string()),
            ..Default::default()
        };
        assert_eq!(score_posting(&posting, &query), 70);
    }

    #[test]
    fn test_remote_bonus_without_substring_match() {
        let posting = make_posting("r", "受付", "リモート可", &[]);
        let query = SearchQuery {
            location: Some("フルリモート".to_string()),
            ..Default::default()
        };
        assert_eq!(score_posting(&posting, &query), 40);
    }

    #[test]
    fn test_keyword_reception_hits_title_and_description() {
        let results = seed_matcher().search(&SearchQuery {
            q: Some("受付".to_string()),
            ..Default::default()
        });
        assert_eq!(ids(&results), vec!["1", "5"]);
        assert!(results.items.iter().all(|i| i.score == 30 + 15));
    }

    #[test]
    fn test_keyword_company_match_adds_ten() {
        let posting = JobPosting {
            description: Some("受付業務".to_string()),
            company: "受付センター".to_string(),
            ..make_posting("k", "受付", "東京", &[])
        };
        let query = SearchQuery {
            q: Some("受付".to_string()),
            ..Default::default()
        };
        assert_eq!(score_posting(&posting, &query), 30 + 15 + 10);
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let posting = make_posting("v", "VIP Concierge", "東京", &[]);
        let query = SearchQuery {
            q: Some("vip".to_string()),
            ..Default::default()
        };
        assert_eq!(score_posting(&posting, &query), 30);
    }

    #[test]
    fn test_skill_customer_service_matches_four_postings() {
        let matcher = seed_matcher();
        let query = SearchQuery {
            skills: Some(vec!["接客".to_string()]),
            ..Default::default()
        };
        let matched: Vec<&str> = matcher
            .catalog()
            .iter()
            .filter(|p| score_posting(p, &query) == 20)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(matched, vec!["1", "2", "3", "5"]);
        assert_eq!(score_posting(&matcher.catalog()[3], &query), 0);

        let results = matcher.search(&query);
        assert_eq!(ids(&results), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_skill_matches_by_substring_once_per_query_skill() {
        let posting = make_posting("s", "受付", "東京", &["接客経験", "接客マナー"]);
        let query = SearchQuery {
            skills: Some(vec!["接客".to_string(), "看護".to_string()]),
            ..Default::default()
        };
        assert_eq!(score_posting(&posting, &query), 20);
    }

    #[test]
    fn test_multiple_skills_accumulate() {
        let results = seed_matcher().search(&SearchQuery {
            skills: Some(vec!["接客".to_string(), "カウンセリング".to_string()]),
            ..Default::default()
        });
        assert!(results.items.iter().all(|i| i.score == 40));
    }

    #[test]
    fn test_results_are_sorted_descending() {
        let results = seed_matcher().search(&SearchQuery {
            q: Some("看護師".to_string()),
            location: Some("新宿".to_string()),
            skills: Some(vec!["接客".to_string()]),
            ..Default::default()
        });
        assert_eq!(results.items[0].posting.id, "4");
        for pair in results.items.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_empty_keyword_is_ignored() {
        let posting = make_posting("e", "受付", "東京", &[]);
        let query = SearchQuery {
            q: Some(String::new()),
            location: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(score_posting(&posting, &query), 0);
    }

    #[test]
    fn test_empty_catalog_returns_empty_list() {
        let matcher = JobMatcher::new(Vec::new());
        assert!(matcher.search(&SearchQuery::default()).items.is_empty());
        let query = SearchQuery {
            q: Some("受付".to_string()),
            ..Default::default()
        };
        assert!(matcher.search(&query).items.is_empty());
    }
}
