use crate::models::{FundingOpportunity, Investor};

/// Provider keywords that indicate an investor of a given type runs or backs the opportunity.
fn provider_keywords(investor_type: &str) -> &'static [&'static str] {
    let investor_type = investor_type.to_lowercase();
    if investor_type.contains("public") || investor_type.contains("grant") {
        &["rvo", "grant"]
    } else if investor_type.contains("venture") || investor_type == "vc" {
        &["capital", "venture"]
    } else if investor_type.contains("angel") {
        &["angel", "network"]
    } else if investor_type.contains("accelerator") || investor_type.contains("incubator") {
        &["accelerator", "bootcamp"]
    } else if investor_type.contains("impact") {
        &["impact", "social"]
    } else {
        &[]
    }
}

/// Why an investor was associated with an opportunity, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    ProviderType,
    FocusSector,
    Fallback,
}

/// Heuristic association between an investor and an opportunity.
///
/// Provider keywords for the investor's type are checked first, then overlap
/// between the investor's focus sectors and the opportunity sector. Pairs that
/// match neither are still associated so every opportunity shows a panel.
pub fn match_kind(investor: &Investor, opportunity: &FundingOpportunity) -> MatchKind {
    let provider = opportunity.fund_provider.to_lowercase();
    if provider_keywords(&investor.investor_type)
        .iter()
        .any(|keyword| provider.contains(keyword))
    {
        return MatchKind::ProviderType;
    }

    let sector = opportunity.sector.to_lowercase();
    let overlaps = investor.focus_sectors.iter().any(|focus| {
        let focus = focus.to_lowercase();
        !focus.is_empty()
            && !sector.is_empty()
            && (sector.contains(&focus) || focus.contains(&sector))
    });
    if overlaps {
        return MatchKind::FocusSector;
    }

    MatchKind::Fallback
}

/// Investors for an opportunity, strongest matches first.
pub fn investors_for<'a>(
    opportunity: &FundingOpportunity,
    investors: &'a [Investor],
) -> Vec<&'a Investor> {
    let mut matched: Vec<&Investor> = investors.iter().collect();
    matched.sort_by_key(|investor| match_kind(investor, opportunity));
    matched
}

/// Opportunities for an investor, strongest matches first.
pub fn opportunities_for<'a>(
    investor: &Investor,
    opportunities: &'a [FundingOpportunity],
) -> Vec<&'a FundingOpportunity> {
    let mut matched: Vec<&FundingOpportunity> = opportunities.iter().collect();
    matched.sort_by_key(|opportunity| match_kind(investor, opportunity));
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FundingStage;
    use crate::services::classification::tests::opportunity;

    fn investor(id: &str, investor_type: &str, focus: &[&str]) -> Investor {
        Investor {
            id: id.to_string(),
            name: id.to_string(),
            investor_type: investor_type.to_string(),
            stages: vec![FundingStage::Seed],
            description: String::new(),
            focus_sectors: focus.iter().map(|s| s.to_string()).collect(),
            investment_range: None,
            location: None,
            website: None,
            logo_url: None,
        }
    }

    #[test]
    fn test_provider_keywords_match_by_type() {
        let mut o = opportunity("vc", "Fund", "Private", "");
        o.fund_provider = "Peak Capital".to_string();

        let vc = investor("inv-vc", "Venture Capital", &[]);
        let angel = investor("inv-angel", "Angel Investor", &[]);

        assert_eq!(match_kind(&vc, &o), MatchKind::ProviderType);
        assert_eq!(match_kind(&angel, &o), MatchKind::Fallback);
    }

    #[test]
    fn test_focus_sector_overlap() {
        let o = opportunity("h", "Health Fund", "HealthTech", "");
        let inv = investor("inv-h", "Venture Capital", &["healthtech"]);
        assert_eq!(match_kind(&inv, &o), MatchKind::FocusSector);
    }

    #[test]
    fn test_blank_sector_never_overlaps_focus() {
        let o = opportunity("blank", "Blank", "", "");
        let inv = investor("inv-f", "Family Office", &["fintech", "healthtech"]);
        assert_eq!(match_kind(&inv, &o), MatchKind::Fallback);
    }

    #[test]
    fn test_fallback_still_associates() {
        let o = opportunity("x", "X", "Unrelated", "");
        let investors = vec![investor("inv-x", "Family Office", &["fintech"])];

        assert_eq!(match_kind(&investors[0], &o), MatchKind::Fallback);
        assert_eq!(investors_for(&o, &investors).len(), 1);
    }

    #[test]
    fn test_direct_matches_sorted_first() {
        let mut o = opportunity("a", "A", "Accelerator", "");
        o.fund_provider = "Startup Bootcamp".to_string();
        let investors = vec![
            investor("other", "Family Office", &[]),
            investor("acc", "Accelerator", &[]),
        ];

        let matched = investors_for(&o, &investors);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].id, "acc");
    }
}
