//! Review rating aggregation

/// Aggregate a provider's ratings into `(avg_rating, review_count)`.
///
/// The average is the arithmetic mean rounded to one decimal place. The
/// empty set yields `(0.0, 0)` rather than an error; an unreviewed
/// provider is a normal state, not a failure.
pub fn summarize(ratings: &[u8]) -> (f64, usize) {
    if ratings.is_empty() {
        return (0.0, 0);
    }

    let sum: u32 = ratings.iter().map(|r| u32::from(*r)).sum();
    let mean = f64::from(sum) / ratings.len() as f64;
    ((mean * 10.0).round() / 10.0, ratings.len())
}

/// Render an average for display: one decimal, or the literal `"0"` when
/// there are no reviews.
pub fn format_average(avg_rating: f64, review_count: usize) -> String {
    if review_count == 0 {
        "0".to_string()
    } else {
        format!("{avg_rating:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_yields_zero_pair() {
        assert_eq!(summarize(&[]), (0.0, 0));
    }

    #[test]
    fn mean_rounds_to_one_decimal() {
        assert_eq!(summarize(&[5, 4, 3]), (4.0, 3));
        assert_eq!(summarize(&[5, 4]), (4.5, 2));
        // 4 + 4 + 5 = 13 / 3 = 4.333... -> 4.3
        assert_eq!(summarize(&[4, 4, 5]), (4.3, 3));
        // 3 + 4 = 7 / 2 = 3.5 stays exact
        assert_eq!(summarize(&[3, 4]), (3.5, 2));
    }

    #[test]
    fn single_rating_is_its_own_average() {
        assert_eq!(summarize(&[2]), (2.0, 1));
    }

    #[test]
    fn format_average_uses_literal_zero_when_unreviewed() {
        assert_eq!(format_average(0.0, 0), "0");
        assert_eq!(format_average(4.0, 3), "4.0");
        assert_eq!(format_average(4.35, 2), "4.3");
    }
}
