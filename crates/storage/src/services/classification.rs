use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::FundingOpportunity;

/// Primary browsing category. An opportunity may belong to several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FundingCategory {
    Public,
    Private,
    Accelerator,
    Eu,
    Impact,
    Early,
    Innovation,
    Angel,
}

impl FundingCategory {
    pub const ALL: [FundingCategory; 8] = [
        Self::Public,
        Self::Private,
        Self::Accelerator,
        Self::Eu,
        Self::Impact,
        Self::Early,
        Self::Innovation,
        Self::Angel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Accelerator => "accelerator",
            Self::Eu => "eu",
            Self::Impact => "impact",
            Self::Early => "early",
            Self::Innovation => "innovation",
            Self::Angel => "angel",
        }
    }

    pub fn matches(&self, opportunity: &FundingOpportunity) -> bool {
        let sector = opportunity.sector.to_lowercase();
        let description = opportunity.description.to_lowercase();

        match self {
            Self::Public => contains_any(&sector, &["public", "government"]),
            Self::Private => contains_any(&sector, &["private", "venture"]),
            Self::Accelerator => contains_any(&sector, &["accelerator", "incubator"]),
            Self::Eu => contains_any(&sector, &["eu", "europe"]),
            Self::Impact => {
                contains_any(&sector, &["impact", "sdg"])
                    || contains_any(&description, &["sustainability", "climate"])
            }
            Self::Early => {
                contains_any(&sector, &["early", "seed"])
                    || contains_any(&description, &["early stage", "startup"])
            }
            Self::Innovation => sector.contains("innovation") || description.contains("innovation"),
            Self::Angel => sector.contains("angel") || description.contains("angel investor"),
        }
    }
}

/// Narrowing filter applied on top of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SecondaryFilter {
    Equity,
    NoEquity,
    WithProgram,
    Ai,
    Impact,
}

impl SecondaryFilter {
    pub fn matches(&self, opportunity: &FundingOpportunity) -> bool {
        let equity_required = opportunity
            .details
            .as_ref()
            .and_then(|details| details.equity_required());

        match self {
            Self::Equity => equity_required == Some(true),
            Self::NoEquity => equity_required == Some(false),
            Self::WithProgram => opportunity.program_support,
            Self::Ai => {
                mentions_ai(&opportunity.title)
                    || opportunity
                        .description
                        .to_lowercase()
                        .contains("artificial intelligence")
            }
            Self::Impact => {
                opportunity.title.to_lowercase().contains("impact")
                    || opportunity
                        .description
                        .to_lowercase()
                        .contains("sustainability")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryCount {
    pub category: FundingCategory,
    pub count: usize,
}

/// Keep opportunities matching both the category and the secondary filter, when given.
pub fn filter<'a>(
    opportunities: &'a [FundingOpportunity],
    category: Option<FundingCategory>,
    secondary: Option<SecondaryFilter>,
) -> Vec<&'a FundingOpportunity> {
    opportunities
        .iter()
        .filter(|o| category.is_none_or(|c| c.matches(o)))
        .filter(|o| secondary.is_none_or(|s| s.matches(o)))
        .collect()
}

pub fn category_counts(opportunities: &[FundingOpportunity]) -> Vec<CategoryCount> {
    FundingCategory::ALL
        .iter()
        .map(|category| CategoryCount {
            category: *category,
            count: opportunities.iter().filter(|o| category.matches(o)).count(),
        })
        .collect()
}

/// True when `text` contains "AI" as a standalone word (so "sustainability" does not count).
pub fn mentions_ai(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| word.eq_ignore_ascii_case("ai"))
}

/// Coarse funding type used when reference data is loaded.
pub fn derive_funding_type(sector: &str) -> &'static str {
    let sector = sector.to_lowercase();
    if contains_any(&sector, &["public", "government", "grant"]) {
        "grant"
    } else if contains_any(&sector, &["eu", "europe"]) {
        "eu_program"
    } else if sector.contains("accelerator") {
        "accelerator"
    } else if sector.contains("incubator") {
        "incubator"
    } else if contains_any(&sector, &["private", "venture", "angel"]) {
        "private"
    } else {
        "other"
    }
}

pub fn is_early_stage(sector: &str, description: &str) -> bool {
    contains_any(&sector.to_lowercase(), &["early", "seed", "pre-seed"])
        || contains_any(&description.to_lowercase(), &["early stage", "early-stage", "startup"])
}

pub fn is_impact_focused(sector: &str, description: &str) -> bool {
    contains_any(&sector.to_lowercase(), &["impact", "sdg", "social"])
        || contains_any(
            &description.to_lowercase(),
            &["sustainability", "sustainable", "climate", "circular"],
        )
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{DisplayType, OpportunityDetails};
    use std::collections::BTreeMap;

    pub(crate) fn opportunity(id: &str, title: &str, sector: &str, description: &str) -> FundingOpportunity {
        FundingOpportunity {
            id: id.to_string(),
            title: title.to_string(),
            fund_provider: "Provider".to_string(),
            sector: sector.to_string(),
            amount_description: "EUR 10k - 50k".to_string(),
            amount_min: None,
            amount_max: None,
            location: "Netherlands".to_string(),
            description: description.to_string(),
            relevant_links: vec![],
            display_type: DisplayType::Default,
            image_url: None,
            equity: None,
            program_support: false,
            funding_type: None,
            is_early_stage: false,
            is_impact_focused: false,
            details: None,
        }
    }

    #[test]
    fn test_category_membership_is_multi_valued() {
        let o = opportunity(
            "wbso",
            "WBSO",
            "Public Grants - Innovation",
            "Tax credit for early stage R&D",
        );

        assert!(FundingCategory::Public.matches(&o));
        assert!(FundingCategory::Innovation.matches(&o));
        assert!(FundingCategory::Early.matches(&o));
        assert!(!FundingCategory::Private.matches(&o));
    }

    #[test]
    fn test_impact_matches_on_description() {
        let o = opportunity("green", "Green Fund", "Private Equity", "Climate tech investments");
        assert!(FundingCategory::Impact.matches(&o));
    }

    #[test]
    fn test_equity_secondary_filters_need_details_map() {
        let mut with_equity = opportunity("a", "A", "Private", "");
        let mut fields = BTreeMap::new();
        fields.insert("equityRequired".to_string(), serde_json::Value::Bool(true));
        with_equity.details = Some(OpportunityDetails::Fields(fields));

        let without_details = opportunity("b", "B", "Private", "");

        assert!(SecondaryFilter::Equity.matches(&with_equity));
        assert!(!SecondaryFilter::NoEquity.matches(&with_equity));
        assert!(!SecondaryFilter::Equity.matches(&without_details));
        assert!(!SecondaryFilter::NoEquity.matches(&without_details));
    }

    #[test]
    fn test_ai_requires_whole_word() {
        assert!(mentions_ai("LUMO Labs Pre-seed AI Fund"));
        assert!(mentions_ai("ai-first startups"));
        assert!(!mentions_ai("Sustainability Grant"));
        assert!(!mentions_ai("Maintenance"));
    }

    #[test]
    fn test_filter_combines_category_and_secondary() {
        let mut program = opportunity("p", "Techstars", "Accelerator", "");
        program.program_support = true;
        let plain = opportunity("q", "Incubator Space", "Incubator", "");
        let list = vec![program, plain];

        let all = filter(&list, Some(FundingCategory::Accelerator), None);
        assert_eq!(all.len(), 2);

        let with_program = filter(
            &list,
            Some(FundingCategory::Accelerator),
            Some(SecondaryFilter::WithProgram),
        );
        assert_eq!(with_program.len(), 1);
        assert_eq!(with_program[0].id, "p");
    }

    #[test]
    fn test_category_counts_cover_every_category() {
        let list = vec![
            opportunity("a", "A", "Public Grants", ""),
            opportunity("b", "B", "Venture Capital", ""),
            opportunity("c", "C", "Public Loans", ""),
        ];
        let counts = category_counts(&list);

        assert_eq!(counts.len(), FundingCategory::ALL.len());
        let public = counts
            .iter()
            .find(|c| c.category == FundingCategory::Public)
            .unwrap();
        assert_eq!(public.count, 2);
    }

    #[test]
    fn test_derived_flags() {
        assert_eq!(derive_funding_type("Public Grants - R&D"), "grant");
        assert_eq!(derive_funding_type("EU Programs"), "eu_program");
        assert_eq!(derive_funding_type("Venture Capital"), "private");
        assert_eq!(derive_funding_type("Something else"), "other");
        assert!(is_early_stage("Pre-Seed", ""));
        assert!(is_impact_focused("Private", "Circular economy ventures"));
    }
}
