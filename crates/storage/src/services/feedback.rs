use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::models::{FundingStage, NewFeedback};

const MOCK_REVIEWERS: [(&str, &str); 4] = [
    ("inv-001", "Dutch Ventures Capital"),
    ("inv-002", "Innovation Angels NL"),
    ("inv-003", "Growth Partners BV"),
    ("inv-004", "Startup Accelerator NL"),
];

const STRENGTHS: [&str; 5] = [
    "Clear value proposition",
    "Strong team background",
    "Innovative solution",
    "Scalable business model",
    "Promising market potential",
];

const IMPROVEMENTS: [&str; 5] = [
    "More market validation needed",
    "Financial projections could be more detailed",
    "Consider refining go-to-market strategy",
    "Competitive analysis needs expansion",
    "Clarify revenue model",
];

const SUGGESTION: &str =
    "Consider focusing on your core value proposition and refining your market analysis.";

pub fn stage_message(stage: FundingStage) -> &'static str {
    match stage {
        FundingStage::Ideation => {
            "Your pitch needs more clarity on the problem you're solving. Consider focusing on a specific pain point that your target market experiences."
        }
        FundingStage::Validation => {
            "Good start on defining your solution, but try to explain more concretely how it addresses the specific problem you identified."
        }
        FundingStage::Seed => {
            "I like your business model, but you should elaborate more on how you'll monetize your solution at scale. Consider including pricing tiers."
        }
        FundingStage::Growth => {
            "Your pitch shows potential, but the competitive landscape analysis could be stronger. Who are your direct and indirect competitors?"
        }
        FundingStage::Expansion => {
            "Interesting concept! I'd like to see more validation data to support your market size estimates."
        }
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, pool: &[&str]) -> Vec<String> {
    let count = rng.gen_range(1..=3);
    pool.choose_multiple(rng, count)
        .map(|s| s.to_string())
        .collect()
}

/// Simulated investor reviews for a submitted pitch: one to three items.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    pitch_id: Uuid,
    user_id: &str,
    stage: FundingStage,
) -> Vec<NewFeedback> {
    let count = rng.gen_range(1..=3);
    (0..count)
        .map(|_| {
            let (reviewer_id, reviewer_name) = MOCK_REVIEWERS[rng.gen_range(0..MOCK_REVIEWERS.len())];
            NewFeedback {
                pitch_id,
                user_id: user_id.to_string(),
                stage,
                reviewer_id: reviewer_id.to_string(),
                reviewer_name: reviewer_name.to_string(),
                message: stage_message(stage).to_string(),
                rating: Some(rng.gen_range(0..=5)),
                strengths: sample(rng, &STRENGTHS),
                weaknesses: sample(rng, &IMPROVEMENTS),
                suggestions: Some(SUGGESTION.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generates_between_one_and_three_items() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let items = generate(&mut rng, Uuid::new_v4(), "u", FundingStage::Seed);
            assert!((1..=3).contains(&items.len()));
            for item in items {
                assert!(item.reviewer_id.starts_with("inv-00"));
                assert!((1..=3).contains(&item.strengths.len()));
                assert!((1..=3).contains(&item.weaknesses.len()));
                assert!(item.rating.is_some_and(|r| (0..=5).contains(&r)));
                assert_eq!(item.message, stage_message(FundingStage::Seed));
            }
        }
    }

    #[test]
    fn test_sampled_strengths_are_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let picked = sample(&mut rng, &STRENGTHS);
        let mut unique = picked.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), picked.len());
    }
}
