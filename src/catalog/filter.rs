use std::{fmt, str::FromStr};

use crate::catalog::{Catalog, Tour};

// An activity category. The fixed variants each expand to a keyword set;
// tokens outside the fixed set carry themselves as the sole keyword.
#[derive(Clone, Debug, PartialEq)]
pub enum Activity {
    Airboat,
    Kayak,
    Wildlife,
    Walking,
    Fishing,
    Night,
    Other(String),
}

impl Activity {
    // The fixed categories, in the order the selector cycles through them.
    pub const FIXED: [Activity; 6] = [
        Activity::Airboat,
        Activity::Kayak,
        Activity::Wildlife,
        Activity::Walking,
        Activity::Fishing,
        Activity::Night,
    ];

    fn keywords(&self) -> &[&str] {
        match self {
            Activity::Airboat => &["airboat", "air boat", "fan boat"],
            Activity::Kayak => &["kayak", "canoe", "paddle"],
            Activity::Wildlife => &["wildlife", "gator", "alligator", "animal", "bird"],
            Activity::Walking => &["walking", "walk", "hiking", "trail"],
            Activity::Fishing => &["fishing", "fish", "charter"],
            Activity::Night => &["night", "sunset", "evening"],
            // Matched on the token itself, see `matches`.
            Activity::Other(_) => &[],
        }
    }

    // Whether any keyword for this category is a case-insensitive substring
    // of the tour's tag line or name.
    pub fn matches(&self, tour: &Tour) -> bool {
        let tags = tour.tag_line().to_lowercase();
        let name = tour.name.to_lowercase();
        let hit = |keyword: &str| tags.contains(keyword) || name.contains(keyword);

        match self {
            Activity::Other(token) => hit(&token.to_lowercase()),
            fixed => fixed.keywords().iter().any(|keyword| hit(keyword)),
        }
    }
}

impl FromStr for Activity {
    type Err = std::convert::Infallible;

    // Every token parses: unknown categories fall through to `Other` rather
    // than erroring, keeping filter values permissive.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let activity = match token.trim().to_lowercase().as_str() {
            "airboat" => Activity::Airboat,
            "kayak" => Activity::Kayak,
            "wildlife" => Activity::Wildlife,
            "walking" => Activity::Walking,
            "fishing" => Activity::Fishing,
            "night" => Activity::Night,
            other => Activity::Other(other.to_string()),
        };

        Ok(activity)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Airboat => write!(f, "airboat"),
            Activity::Kayak => write!(f, "kayak"),
            Activity::Wildlife => write!(f, "wildlife"),
            Activity::Walking => write!(f, "walking"),
            Activity::Fishing => write!(f, "fishing"),
            Activity::Night => write!(f, "night"),
            Activity::Other(token) => write!(f, "{token}"),
        }
    }
}

// A coarse price range. Boundaries are inclusive on the upper bound of each
// named range; `Over200` is open-ended.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PriceBucket {
    #[default]
    Any,
    UpTo50,
    To100,
    To200,
    Over200,
}

impl PriceBucket {
    // The buckets, in the order the selector cycles through them.
    pub const ALL: [PriceBucket; 5] = [
        PriceBucket::Any,
        PriceBucket::UpTo50,
        PriceBucket::To100,
        PriceBucket::To200,
        PriceBucket::Over200,
    ];

    // Unrecognized bucket values match everything rather than nothing.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "0-50" => PriceBucket::UpTo50,
            "50-100" => PriceBucket::To100,
            "100-200" => PriceBucket::To200,
            "200+" => PriceBucket::Over200,
            _ => PriceBucket::Any,
        }
    }

    // A tour without a price only ever matches `Any`.
    pub fn matches(&self, price: Option<f64>) -> bool {
        let Some(price) = price else {
            return matches!(self, PriceBucket::Any);
        };

        match self {
            PriceBucket::Any => true,
            PriceBucket::UpTo50 => price <= 50.0,
            PriceBucket::To100 => price > 50.0 && price <= 100.0,
            PriceBucket::To200 => price > 100.0 && price <= 200.0,
            PriceBucket::Over200 => price > 200.0,
        }
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceBucket::Any => write!(f, "any"),
            PriceBucket::UpTo50 => write!(f, "0-50"),
            PriceBucket::To100 => write!(f, "50-100"),
            PriceBucket::To200 => write!(f, "100-200"),
            PriceBucket::Over200 => write!(f, "200+"),
        }
    }
}

// The three orthogonal filter selectors, combined with AND semantics.
// Absent selectors impose no constraint.
#[derive(Clone, Debug, Default)]
pub struct CatalogFilter {
    pub activity: Option<Activity>,
    pub price: PriceBucket,
    pub query: String,
}

impl CatalogFilter {
    pub fn matches(&self, tour: &Tour) -> bool {
        if let Some(activity) = &self.activity {
            if !activity.matches(tour) {
                return false;
            }
        }

        if !self.price.matches(tour.price) {
            return false;
        }

        let query = self.query.trim().to_lowercase();
        if !query.is_empty() && !tour.haystack().contains(&query) {
            return false;
        }

        true
    }
}

impl Catalog {
    // The filter pipeline: a pure pass over the working set that preserves
    // its relative order. Recomputed in full on every call.
    pub fn apply_filter(&self, filter: &CatalogFilter) -> Catalog {
        self.iter()
            .filter(|tour| filter.matches(tour))
            .cloned()
            .collect::<Vec<Tour>>()
            .into()
    }

    // Orders by quality score, best first. The sort is stable, so tours with
    // equal scores keep their filtered order.
    pub fn sorted_by_quality(&self) -> Catalog {
        let mut tours = self.to_vec();
        tours.sort_by(|a, b| b.quality().total_cmp(&a.quality()));
        tours.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tour(name: &str, tags: &[&str], price: Option<f64>, quality: Option<f64>) -> Tour {
        Tour {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            price,
            quality_score: quality,
            ..Tour::default()
        }
    }

    fn sample_catalog() -> Catalog {
        vec![
            tour(
                "Sunset Airboat Ride",
                &["airboat", "sunset"],
                Some(75.0),
                Some(9.0),
            ),
            tour(
                "Gator Spotting Kayak",
                &["kayak", "wildlife"],
                Some(40.0),
                Some(7.0),
            ),
        ]
        .into()
    }

    #[test]
    fn test_fixed_category_expands_to_keywords() {
        let gator = tour("Gator Spotting Kayak", &["kayak", "wildlife"], None, None);
        let airboat = tour("Sunset Airboat Ride", &["airboat", "sunset"], None, None);

        assert!(Activity::Wildlife.matches(&gator));
        assert!(!Activity::Wildlife.matches(&airboat));
        // "sunset" is in the night keyword set.
        assert!(Activity::Night.matches(&airboat));
    }

    #[test]
    fn test_unknown_category_is_a_plain_substring_test() {
        let swamp = tour("Swamp Buggy Adventure", &["buggy"], None, None);

        let buggy: Activity = "buggy".parse().expect("token always parses");
        assert_eq!(buggy, Activity::Other("buggy".into()));
        assert!(buggy.matches(&swamp));

        let zipline: Activity = "zipline".parse().expect("token always parses");
        assert!(!zipline.matches(&swamp));
    }

    #[test]
    fn test_category_matches_against_name_as_well_as_tags() {
        let untagged = tour("Evening Gator Cruise", &[], None, None);
        assert!(Activity::Wildlife.matches(&untagged));
    }

    #[test]
    fn test_price_of_exactly_fifty_is_in_the_lower_bucket() {
        assert!(PriceBucket::UpTo50.matches(Some(50.0)));
        assert!(!PriceBucket::To100.matches(Some(50.0)));
    }

    #[test]
    fn test_priceless_tours_match_only_the_any_bucket() {
        assert!(PriceBucket::Any.matches(None));

        for bucket in &PriceBucket::ALL[1..] {
            assert!(!bucket.matches(None), "bucket {bucket} should reject");
        }
    }

    #[test]
    fn test_zero_price_is_distinct_from_no_price() {
        assert!(PriceBucket::UpTo50.matches(Some(0.0)));
        assert!(!PriceBucket::UpTo50.matches(None));
    }

    #[test]
    fn test_top_bucket_is_open_ended() {
        assert!(PriceBucket::Over200.matches(Some(200.01)));
        assert!(PriceBucket::Over200.matches(Some(10_000.0)));
        assert!(!PriceBucket::Over200.matches(Some(200.0)));
    }

    #[test]
    fn test_unrecognized_bucket_matches_unconditionally() {
        let bucket = PriceBucket::parse("cheap");
        assert_eq!(bucket, PriceBucket::Any);
        assert!(bucket.matches(Some(75.0)));
        assert!(bucket.matches(None));
    }

    #[test]
    fn test_filter_by_category_only() {
        let results = sample_catalog().apply_filter(&CatalogFilter {
            activity: Some(Activity::Wildlife),
            ..CatalogFilter::default()
        });

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Gator Spotting Kayak");
    }

    #[test]
    fn test_filter_by_price_bucket_only() {
        let results = sample_catalog().apply_filter(&CatalogFilter {
            price: PriceBucket::To100,
            ..CatalogFilter::default()
        });

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Sunset Airboat Ride");
    }

    #[test]
    fn test_filter_by_search_query_only() {
        let results = sample_catalog().apply_filter(&CatalogFilter {
            query: "kayak".into(),
            ..CatalogFilter::default()
        });

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Gator Spotting Kayak");
    }

    #[test]
    fn test_query_is_trimmed_and_lowercased() {
        let results = sample_catalog().apply_filter(&CatalogFilter {
            query: "  KAYAK ".into(),
            ..CatalogFilter::default()
        });

        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_empty_filter_imposes_no_constraint() {
        let catalog = sample_catalog();
        let results = catalog.apply_filter(&CatalogFilter::default());

        assert_eq!(results.len(), catalog.len());
    }

    // The three matchers are independent, so applying them one at a time in
    // any order must select the same subset as applying them together.
    #[test]
    fn test_filter_application_order_is_irrelevant() {
        let catalog: Catalog = vec![
            tour("Sunset Airboat Ride", &["airboat", "sunset"], Some(75.0), None),
            tour("Gator Spotting Kayak", &["kayak", "wildlife"], Some(40.0), None),
            tour("Gator Night Kayak", &["kayak", "wildlife"], Some(60.0), None),
            tour("Wild Bird Walk", &["walking", "bird"], None, None),
        ]
        .into();

        let by_activity = CatalogFilter {
            activity: Some(Activity::Wildlife),
            ..CatalogFilter::default()
        };
        let by_price = CatalogFilter {
            price: PriceBucket::To100,
            ..CatalogFilter::default()
        };
        let by_query = CatalogFilter {
            query: "kayak".into(),
            ..CatalogFilter::default()
        };
        let combined = CatalogFilter {
            activity: Some(Activity::Wildlife),
            price: PriceBucket::To100,
            query: "kayak".into(),
        };

        let all_at_once = catalog.apply_filter(&combined);
        let orderings = [
            [&by_activity, &by_price, &by_query],
            [&by_price, &by_query, &by_activity],
            [&by_query, &by_activity, &by_price],
        ];

        for ordering in orderings {
            let mut subset = catalog.clone();
            for filter in ordering {
                subset = subset.apply_filter(filter);
            }
            assert_eq!(subset.to_vec(), all_at_once.to_vec());
        }
    }

    #[test]
    fn test_sort_is_descending_with_missing_scores_last() {
        let catalog: Catalog = vec![
            tour("Unrated Walk", &[], None, None),
            tour("Great Airboat", &[], None, Some(9.0)),
            tour("Decent Kayak", &[], None, Some(7.0)),
        ]
        .into();

        let sorted = catalog.sorted_by_quality();
        let names: Vec<&str> = sorted.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Great Airboat", "Decent Kayak", "Unrated Walk"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_scores() {
        let catalog: Catalog = vec![
            tour("First", &[], None, Some(5.0)),
            tour("Second", &[], None, Some(5.0)),
            tour("Third", &[], None, Some(5.0)),
            tour("Best", &[], None, Some(8.0)),
        ]
        .into();

        let sorted = catalog.sorted_by_quality();
        let names: Vec<&str> = sorted.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Best", "First", "Second", "Third"]);
    }

    #[test]
    fn test_missing_score_sorts_as_zero_not_as_an_error() {
        let catalog: Catalog = vec![
            tour("Unrated", &[], None, None),
            tour("Zero Rated", &[], None, Some(0.0)),
        ]
        .into();

        let sorted = catalog.sorted_by_quality();
        // Equal effective scores, so the original order holds.
        assert_eq!(sorted[0].name, "Unrated");
        assert_eq!(sorted[1].name, "Zero Rated");
    }
}
