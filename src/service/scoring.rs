use serde::{Deserialize, Serialize};

use crate::models::{NewReport, Report};

/// Which fields the duplicate guard consults. The original product rule is
/// location-only; the stricter variant also requires color and brand to line
/// up before blocking a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    LocationOnly,
    LocationColorBrand,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "location-only" => Ok(DuplicatePolicy::LocationOnly),
            "location-color-brand" => Ok(DuplicatePolicy::LocationColorBrand),
            other => Err(format!("unknown duplicate policy: {}", other)),
        }
    }
}

/// Field weights and the strong-match threshold. Calibration constants, kept
/// configurable rather than baked into the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchParams {
    pub brand_weight: u32,
    pub model_weight: u32,
    pub color_weight: u32,
    pub characteristics_weight: u32,
    pub location_weight: u32,
    /// Minimum score for a candidate to surface as a strong match. The
    /// default is chosen so no single field alone qualifies, but any two of
    /// brand/model/color do.
    pub threshold: u32,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            brand_weight: 3,
            model_weight: 3,
            color_weight: 2,
            characteristics_weight: 2,
            location_weight: 1,
            threshold: 5,
            duplicate_policy: DuplicatePolicy::LocationOnly,
        }
    }
}

impl MatchParams {
    pub fn max_score(&self) -> u32 {
        self.brand_weight
            + self.model_weight
            + self.color_weight
            + self.characteristics_weight
            + self.location_weight
    }
}

/// Additive similarity score between a new submission and one opposite-kind
/// candidate of the same category. The caller filters kind and category
/// before invoking; this function only compares descriptive fields.
///
/// Scoring is intentionally asymmetric: the characteristics comparison checks
/// whether the candidate's text contains the new report's text, so a fuller
/// description on the candidate side still matches a terse submission.
pub fn score(new: &NewReport, candidate: &Report, params: &MatchParams) -> u32 {
    let mut total = 0;
    if both_filled_eq(&new.brand, &candidate.brand) {
        total += params.brand_weight;
    }
    if both_filled_eq(&new.model, &candidate.model) {
        total += params.model_weight;
    }
    if both_filled_eq(&new.color, &candidate.color) {
        total += params.color_weight;
    }
    if contains_ci(&candidate.characteristics, &new.characteristics) {
        total += params.characteristics_weight;
    }
    // Unlike brand/model/color, the location comparison is relaxed: case is
    // ignored and two empty locations still count as equal.
    if new.location.eq_ignore_ascii_case(&candidate.location) {
        total += params.location_weight;
    }
    total
}

/// True when the user already owns a report of the opposite kind for the same
/// category and location. Blocks self-matching ("lost wallet at library" plus
/// "found wallet at library" under one account). Short-circuits on the first
/// qualifying report.
pub fn is_duplicate(new: &NewReport, existing: &[Report], policy: DuplicatePolicy) -> bool {
    existing.iter().any(|r| {
        let same_claim = r.kind == new.kind.opposite()
            && r.category == new.category
            && r.location == new.location;
        match policy {
            DuplicatePolicy::LocationOnly => same_claim,
            DuplicatePolicy::LocationColorBrand => {
                same_claim && r.color == new.color && r.brand == new.brand
            }
        }
    })
}

/// Empty on either side means "no information", never a match.
fn both_filled_eq(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && a == b
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    !haystack.is_empty()
        && !needle.is_empty()
        && haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Category, NewReport, Report, ReportKind, ReportStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    pub fn submission(kind: ReportKind, category: Category) -> NewReport {
        NewReport {
            kind,
            category,
            brand: String::new(),
            model: String::new(),
            color: String::new(),
            characteristics: String::new(),
            location: String::new(),
            reported_on: NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
            photo: None,
        }
    }

    pub fn candidate(id: i64, kind: ReportKind, category: Category, owner: &str) -> Report {
        Report {
            id,
            kind,
            category,
            brand: String::new(),
            model: String::new(),
            color: String::new(),
            characteristics: String::new(),
            location: String::new(),
            reported_on: NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
            photo: None,
            status: ReportStatus::Pending,
            owner_id: owner.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{candidate, submission};
    use super::*;
    use crate::models::{Category, ReportKind};

    #[test]
    fn fossil_wallet_scores_seven() {
        let mut new = submission(ReportKind::Lost, Category::Wallet);
        new.brand = "Fossil".to_string();
        new.color = "black".to_string();
        new.characteristics = "worn leather".to_string();
        new.location = "Main Cafeteria".to_string();

        let mut found = candidate(1, ReportKind::Found, Category::Wallet, "finder");
        found.brand = "Fossil".to_string();
        found.color = "black".to_string();
        found.characteristics = "black worn leather wallet".to_string();
        found.location = "Library".to_string();

        // brand 3 + color 2 + characteristics substring 2
        assert_eq!(score(&new, &found, &MatchParams::default()), 7);
    }

    #[test]
    fn silver_keys_score_two() {
        let mut new = submission(ReportKind::Found, Category::Keys);
        new.color = "silver".to_string();
        new.location = "Gym".to_string();

        let mut lost = candidate(2, ReportKind::Lost, Category::Keys, "owner");
        lost.color = "silver".to_string();
        lost.location = "Library".to_string();

        assert_eq!(score(&new, &lost, &MatchParams::default()), 2);
    }

    #[test]
    fn characteristics_containment_is_asymmetric() {
        let params = MatchParams::default();

        let mut new = submission(ReportKind::Lost, Category::Wallet);
        new.characteristics = "red".to_string();
        new.location = "A".to_string();
        let mut cand = candidate(3, ReportKind::Found, Category::Wallet, "finder");
        cand.characteristics = "dark red bag".to_string();
        cand.location = "B".to_string();

        // "red" is contained in "dark red bag"
        assert_eq!(score(&new, &cand, &params), 2);

        // Swap the texts: "dark red bag" is not contained in "red".
        let mut swapped_new = submission(ReportKind::Lost, Category::Wallet);
        swapped_new.characteristics = "dark red bag".to_string();
        swapped_new.location = "A".to_string();
        let mut swapped_cand = candidate(4, ReportKind::Found, Category::Wallet, "finder");
        swapped_cand.characteristics = "red".to_string();
        swapped_cand.location = "B".to_string();

        assert_eq!(score(&swapped_new, &swapped_cand, &params), 0);
    }

    #[test]
    fn characteristics_containment_ignores_case() {
        let mut new = submission(ReportKind::Lost, Category::Laptop);
        new.characteristics = "NASA sticker".to_string();
        new.location = "A".to_string();
        let mut cand = candidate(5, ReportKind::Found, Category::Laptop, "finder");
        cand.characteristics = "silver laptop with nasa STICKER on lid".to_string();
        cand.location = "B".to_string();

        assert_eq!(score(&new, &cand, &MatchParams::default()), 2);
    }

    #[test]
    fn brand_model_color_are_case_sensitive() {
        let mut new = submission(ReportKind::Lost, Category::Phone);
        new.brand = "apple".to_string();
        new.location = "A".to_string();
        let mut cand = candidate(6, ReportKind::Found, Category::Phone, "finder");
        cand.brand = "Apple".to_string();
        cand.location = "B".to_string();

        assert_eq!(score(&new, &cand, &MatchParams::default()), 0);
    }

    #[test]
    fn empty_fields_on_both_sides_award_nothing() {
        let mut new = submission(ReportKind::Lost, Category::Other);
        new.location = "A".to_string();
        let mut cand = candidate(7, ReportKind::Found, Category::Other, "finder");
        cand.location = "B".to_string();

        // brand/model/color/characteristics all empty on both sides.
        assert_eq!(score(&new, &cand, &MatchParams::default()), 0);
    }

    #[test]
    fn equal_locations_award_one_even_when_both_empty() {
        let new = submission(ReportKind::Lost, Category::Other);
        let cand = candidate(8, ReportKind::Found, Category::Other, "finder");

        assert_eq!(score(&new, &cand, &MatchParams::default()), 1);
    }

    #[test]
    fn location_equality_ignores_case() {
        let mut new = submission(ReportKind::Lost, Category::Other);
        new.location = "Library".to_string();
        let mut cand = candidate(15, ReportKind::Found, Category::Other, "finder");
        cand.location = "library".to_string();

        assert_eq!(score(&new, &cand, &MatchParams::default()), 1);
    }

    #[test]
    fn full_agreement_hits_the_maximum() {
        let params = MatchParams::default();
        assert_eq!(params.max_score(), 11);

        let mut new = submission(ReportKind::Lost, Category::Phone);
        new.brand = "Apple".to_string();
        new.model = "iPhone 14 Pro".to_string();
        new.color = "Space Gray".to_string();
        new.characteristics = "cracked corner".to_string();
        new.location = "Lecture Hall B".to_string();

        let mut cand = candidate(9, ReportKind::Found, Category::Phone, "finder");
        cand.brand = "Apple".to_string();
        cand.model = "iPhone 14 Pro".to_string();
        cand.color = "Space Gray".to_string();
        cand.characteristics = "cracked corner, blue case".to_string();
        cand.location = "Lecture Hall B".to_string();

        assert_eq!(score(&new, &cand, &params), 11);
    }

    #[test]
    fn scorer_is_pure() {
        let mut new = submission(ReportKind::Lost, Category::Wallet);
        new.brand = "Fossil".to_string();
        new.location = "Gym".to_string();
        let mut cand = candidate(10, ReportKind::Found, Category::Wallet, "finder");
        cand.brand = "Fossil".to_string();
        cand.location = "Gym".to_string();

        let params = MatchParams::default();
        let first = score(&new, &cand, &params);
        let second = score(&new, &cand, &params);
        assert_eq!(first, second);
        assert_eq!(first, 4);
    }

    #[test]
    fn opposite_kind_same_location_is_duplicate() {
        let mut mine = candidate(11, ReportKind::Lost, Category::Laptop, "user-1");
        mine.location = "Library".to_string();

        let mut new = submission(ReportKind::Found, Category::Laptop);
        new.location = "Library".to_string();

        assert!(is_duplicate(&new, &[mine], DuplicatePolicy::LocationOnly));
    }

    #[test]
    fn different_location_is_not_duplicate() {
        let mut mine = candidate(12, ReportKind::Lost, Category::Laptop, "user-1");
        mine.location = "Library".to_string();

        let mut new = submission(ReportKind::Found, Category::Laptop);
        new.location = "Cafeteria".to_string();

        assert!(!is_duplicate(&new, &[mine], DuplicatePolicy::LocationOnly));
    }

    #[test]
    fn same_kind_or_other_category_never_blocks() {
        let mut lost_keys = candidate(13, ReportKind::Lost, Category::Keys, "user-1");
        lost_keys.location = "Library".to_string();

        let mut new_lost = submission(ReportKind::Lost, Category::Keys);
        new_lost.location = "Library".to_string();
        assert!(!is_duplicate(
            &new_lost,
            std::slice::from_ref(&lost_keys),
            DuplicatePolicy::LocationOnly
        ));

        let mut new_found_wallet = submission(ReportKind::Found, Category::Wallet);
        new_found_wallet.location = "Library".to_string();
        assert!(!is_duplicate(
            &new_found_wallet,
            &[lost_keys],
            DuplicatePolicy::LocationOnly
        ));
    }

    #[test]
    fn strict_policy_also_compares_color_and_brand() {
        let mut mine = candidate(14, ReportKind::Lost, Category::Wallet, "user-1");
        mine.location = "Library".to_string();
        mine.color = "black".to_string();
        mine.brand = "Fossil".to_string();

        let mut new = submission(ReportKind::Found, Category::Wallet);
        new.location = "Library".to_string();
        new.color = "brown".to_string();
        new.brand = "Fossil".to_string();

        // Distinct color at the same location: blocked by the default rule,
        // allowed by the stricter one.
        assert!(is_duplicate(
            &new,
            std::slice::from_ref(&mine),
            DuplicatePolicy::LocationOnly
        ));
        assert!(!is_duplicate(
            &new,
            std::slice::from_ref(&mine),
            DuplicatePolicy::LocationColorBrand
        ));

        new.color = "black".to_string();
        assert!(is_duplicate(
            &new,
            &[mine],
            DuplicatePolicy::LocationColorBrand
        ));
    }
}
