use crate::constants::{COMMENTS_WEIGHT, CREDIBILITY_WEIGHT, VIEWS_WEIGHT};
use crate::content::Engagement;

/// Weighted relevance of an item's engagement.
///
/// One comment counts as fifty views and one credibility point as a hundred,
/// so trust signals dominate raw traffic. No normalization happens here.
pub fn score(engagement: &Engagement) -> f64 {
    VIEWS_WEIGHT * engagement.views as f64
        + COMMENTS_WEIGHT * engagement.comments as f64
        + CREDIBILITY_WEIGHT * engagement.credibility_percent as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eng(views: u64, comments: u64, credibility_percent: u8) -> Engagement {
        Engagement {
            views,
            comments,
            credibility_percent,
        }
    }

    #[test]
    fn weights_match_reference() {
        assert_eq!(score(&eng(5000, 10, 80)), 13_500.0);
        assert_eq!(score(&eng(0, 0, 0)), 0.0);
        assert_eq!(score(&eng(1, 1, 1)), 151.0);
    }

    #[test]
    fn strictly_increasing_in_each_input() {
        for base in [0u64, 7, 10_000, 250_000] {
            let cred = (base % 100) as u8;
            let s = score(&eng(base, base, cred));
            assert!(score(&eng(base + 1, base, cred)) > s);
            assert!(score(&eng(base, base + 1, cred)) > s);
            assert!(score(&eng(base, base, cred + 1)) > s);
        }
    }
}
