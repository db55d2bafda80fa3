use super::super::domain::Rating;
use super::config::ScoringConfig;
use super::cqc::CqcRating;
use super::uqc::UqcRating;

/// Questions on the UQC sheet; the denominator of the UQC share.
const UQC_POSSIBLE: f64 = 4.0;

/// Weighted completion across both stages.
pub(crate) fn overall_pct(config: &ScoringConfig, uqc: &UqcRating, cqc: &CqcRating) -> f64 {
    config.uqc_weight * (f64::from(uqc.score) / UQC_POSSIBLE) + config.cqc_weight * cqc.pct
}

/// Combine both stage ratings into the final verdict. ANSA always wins.
pub(crate) fn decide_overall(
    config: &ScoringConfig,
    ansa: bool,
    uqc: &UqcRating,
    cqc: &CqcRating,
) -> Rating {
    if ansa {
        return Rating::Bad;
    }

    config.rate_pct(overall_pct(config, uqc, cqc))
}
