//! Incremental rating aggregation.
//!
//! Two pure transforms: a running-average update and a Wilson lower-bound
//! confidence score remapped into the [0,5] rating space. The score is what
//! search ranks on, so low-vote records get pulled toward the low end of
//! their confidence interval instead of sitting at their raw average.

use crate::error::{Error, Result};

use super::model::Recipe;

/// z for a 95% confidence interval.
const Z: f64 = 1.96;

/// Fold one new rating into a running average.
///
/// `votes` must already include the vote being absorbed; the weighted form
/// `((votes - 1) * avg + rating) / votes` is used rather than the delta form
/// so rounding matches the stored history.
pub fn update_average(current_average: f64, votes: u32, new_rating: u8) -> Result<f64> {
    if votes == 0 {
        return Err(Error::Precondition(
            "update_average called before the vote was counted",
        ));
    }
    if !(1..=5).contains(&new_rating) {
        return Err(Error::Precondition("rating outside [1,5]"));
    }
    let n = f64::from(votes);
    Ok(((n - 1.0) * current_average + f64::from(new_rating)) / n)
}

/// Wilson score lower bound for the record's average, mapped back into the
/// rating space: `average` in [1,5] becomes a proportion `x` in [0,1], the
/// bound is computed at 95% confidence, and the result is `1 + 4 * bound`.
///
/// Zero votes short-circuits to exactly `0.0` (no votes, no confidence).
pub fn wilson_score(average: f64, votes: u32) -> Result<f64> {
    if votes == 0 {
        return Ok(0.0);
    }
    if !(1.0..=5.0).contains(&average) {
        return Err(Error::Precondition("average outside [1,5] with votes present"));
    }

    let n = f64::from(votes);
    let x = (average - 1.0) / 4.0;
    // Radicand is non-negative for x in [0,1] and n >= 1.
    let bound = (x + Z * Z / (2.0 * n) - Z * ((x * (1.0 - x) + Z * Z / (4.0 * n)) / n).sqrt())
        / (1.0 + Z * Z / n);
    Ok(1.0 + 4.0 * bound)
}

/// The pre-write step, run by every store before validation.
///
/// If a rating is staged, the average absorbs it first; the score is then
/// recomputed from the fresh average. A record that has never been scored
/// gets its score filled in even without a rating (the zero-vote branch).
/// The staged rating is left in place so the validation gate can check it.
pub fn prepare(recipe: &mut Recipe) -> Result<()> {
    let rated = recipe.rating.is_some();
    if let Some(rating) = recipe.rating {
        recipe.average = update_average(recipe.average, recipe.votes, rating)?;
    }
    if rated || recipe.score.is_none() {
        recipe.score = Some(wilson_score(recipe.average, recipe.votes)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::model::NewRecipe;

    fn recipe() -> Recipe {
        Recipe::new(NewRecipe {
            name: "Citrus Sunrise".into(),
            photo: "photos/citrus.jpg".into(),
            ingredients: vec!["orange".into(), "carrot".into()],
            tags: vec!["breakfast".into()],
        })
    }

    #[test]
    fn first_vote_is_the_average() {
        let avg = update_average(3.0, 1, 3).expect("valid inputs");
        assert_eq!(avg, 3.0);
    }

    #[test]
    fn weighted_update_matches_full_recount() {
        // 3 prior votes averaging 4.0, plus a 2: (3*4 + 2)/4 = 3.5
        let avg = update_average(4.0, 4, 2).expect("valid inputs");
        assert_eq!(avg, 3.5);
    }

    #[test]
    fn update_stays_between_old_average_and_new_rating() {
        for votes in [1u32, 2, 7, 50, 1000] {
            for rating in 1u8..=5 {
                for current in [1.0, 2.3, 3.0, 4.99, 5.0] {
                    let avg = update_average(current, votes, rating).expect("valid inputs");
                    let lo = current.min(f64::from(rating));
                    let hi = current.max(f64::from(rating));
                    assert!(avg >= lo && avg <= hi, "avg {avg} outside [{lo}, {hi}]");
                }
            }
        }
    }

    #[test]
    fn update_refuses_uncounted_vote() {
        let err = update_average(3.0, 0, 4).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn update_refuses_out_of_range_rating() {
        assert!(matches!(
            update_average(3.0, 2, 0).unwrap_err(),
            Error::Precondition(_)
        ));
        assert!(matches!(
            update_average(3.0, 2, 6).unwrap_err(),
            Error::Precondition(_)
        ));
    }

    #[test]
    fn zero_votes_scores_zero_for_any_average() {
        for avg in [0.0, 1.0, 3.3, 5.0] {
            assert_eq!(wilson_score(avg, 0).expect("zero-vote branch"), 0.0);
        }
    }

    #[test]
    fn score_stays_within_rating_space() {
        for votes in [1u32, 2, 10, 137, 100_000] {
            let mut avg = 1.0;
            while avg <= 5.0 {
                let score = wilson_score(avg, votes).expect("valid inputs");
                assert!((0.0..=5.0).contains(&score), "score {score} for avg {avg}, n {votes}");
                avg += 0.25;
            }
        }
    }

    #[test]
    fn score_is_monotone_in_average() {
        for votes in [1u32, 5, 100] {
            let mut prev = f64::NEG_INFINITY;
            let mut avg = 1.0;
            while avg <= 5.0 {
                let score = wilson_score(avg, votes).expect("valid inputs");
                assert!(score >= prev, "score dropped at avg {avg}, n {votes}");
                prev = score;
                avg += 0.125;
            }
        }
    }

    #[test]
    fn many_perfect_votes_approach_five() {
        let score = wilson_score(5.0, 1000).expect("valid inputs");
        assert!(score > 4.9 && score <= 5.0, "got {score}");
    }

    #[test]
    fn single_vote_is_heavily_discounted() {
        // One 5-star vote should rank well below a long perfect history.
        let one = wilson_score(5.0, 1).expect("valid inputs");
        let many = wilson_score(5.0, 1000).expect("valid inputs");
        assert!(one < many);
        assert!(one < 3.0, "got {one}");
    }

    #[test]
    fn score_is_pure() {
        let a = wilson_score(3.7, 42).expect("valid inputs");
        let b = wilson_score(3.7, 42).expect("valid inputs");
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn score_refuses_average_outside_rating_space() {
        assert!(matches!(
            wilson_score(0.5, 3).unwrap_err(),
            Error::Precondition(_)
        ));
        assert!(matches!(
            wilson_score(5.1, 3).unwrap_err(),
            Error::Precondition(_)
        ));
    }

    #[test]
    fn prepare_scores_a_brand_new_record() {
        let mut r = recipe();
        prepare(&mut r).expect("new record prepares");
        assert_eq!(r.average, 0.0);
        assert_eq!(r.score, Some(0.0));
    }

    #[test]
    fn prepare_absorbs_a_staged_rating_average_first() {
        let mut r = recipe();
        prepare(&mut r).expect("initial prepare");

        r.submit_rating(4);
        prepare(&mut r).expect("rated prepare");
        assert_eq!(r.votes, 1);
        assert_eq!(r.average, 4.0);
        // Score must come from the updated average, not the stale one.
        let expected = wilson_score(4.0, 1).expect("valid inputs");
        assert_eq!(r.score, Some(expected));
        // The staged rating survives for the validation gate.
        assert_eq!(r.rating, Some(4));
    }

    #[test]
    fn prepare_without_rating_leaves_existing_score_alone() {
        let mut r = recipe();
        r.submit_rating(5);
        prepare(&mut r).expect("rated prepare");
        let scored = r.score;
        r.rating = None;

        prepare(&mut r).expect("idle prepare");
        assert_eq!(r.score, scored);
        assert_eq!(r.average, 5.0);
    }
}
