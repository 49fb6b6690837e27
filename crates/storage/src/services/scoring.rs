use std::collections::BTreeMap;

use crate::models::FundingStage;

/// Minimum trimmed length for a field to count as answered.
const MIN_FILLED_CHARS: usize = 10;

pub const MAX_SCORE: f64 = 5.0;

/// Share of fields that must be filled for a stage to count as completed.
pub const COMPLETION_RATIO: f64 = 0.5;

pub fn stage_fields(stage: FundingStage) -> &'static [&'static str] {
    match stage {
        FundingStage::Ideation => &["value_proposition", "target_market", "business_model"],
        FundingStage::Validation => &[
            "problem_validation",
            "solution_validation",
            "market_research",
        ],
        FundingStage::Seed => &["traction_metrics", "mvp_roadmap", "funding_use"],
        FundingStage::Growth => &["growth_strategy", "financials", "competitive_advantage"],
        FundingStage::Expansion => &["expansion_plan", "team_scaling", "long_term_vision"],
    }
}

fn is_filled(value: Option<&String>) -> bool {
    value.is_some_and(|text| text.trim().chars().count() > MIN_FILLED_CHARS)
}

/// Fraction of the stage's fields that are filled, in `[0, 1]`.
pub fn completeness(stage: FundingStage, content: &BTreeMap<String, String>) -> f64 {
    let fields = stage_fields(stage);
    let filled = fields
        .iter()
        .filter(|field| is_filled(content.get(**field)))
        .count();
    filled as f64 / fields.len() as f64
}

/// Pitch score on the 0 to 5 scale.
pub fn score(stage: FundingStage, content: &BTreeMap<String, String>) -> f64 {
    completeness(stage, content) * MAX_SCORE
}

pub fn completes_stage(stage: FundingStage, content: &BTreeMap<String, String>) -> bool {
    completeness(stage, content) >= COMPLETION_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_short_answers_do_not_count() {
        let c = content(&[
            ("value_proposition", "   too short   "),
            ("target_market", "Dutch SMEs in logistics"),
        ]);
        assert!((completeness(FundingStage::Ideation, &c) - 1.0 / 3.0).abs() < 1e-9);
        assert!(!completes_stage(FundingStage::Ideation, &c));
    }

    #[test]
    fn test_full_pitch_scores_five() {
        let c = content(&[
            ("growth_strategy", "Expand to Belgium and Germany"),
            ("financials", "Break-even in eighteen months"),
            ("competitive_advantage", "Proprietary routing algorithm"),
        ]);
        assert_eq!(score(FundingStage::Growth, &c), MAX_SCORE);
        assert!(completes_stage(FundingStage::Growth, &c));
    }

    #[test]
    fn test_fields_from_other_stage_ignored() {
        let c = content(&[
            ("value_proposition", "A long enough answer here"),
            ("target_market", "Another long enough answer"),
        ]);
        assert_eq!(score(FundingStage::Seed, &c), 0.0);
    }

    #[test]
    fn test_two_of_three_completes() {
        let c = content(&[
            ("traction_metrics", "1200 paying customers"),
            ("mvp_roadmap", "Launch v2 in Q3 with payments"),
        ]);
        assert!(completes_stage(FundingStage::Seed, &c));
    }
}
