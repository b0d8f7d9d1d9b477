//! Pairwise min/max reduction
//!
//! Each round compares neighbours two at a time and keeps the winner; an odd
//! element left without a partner is carried into the next round unchanged.

/// Index and value of the largest element, `None` for an empty slice.
/// Ties resolve to the lowest index.
pub fn pairwise_max(values: &[f64]) -> Option<(usize, f64)> {
    pairwise_reduce(values, |kept, challenger| challenger > kept)
}

/// Index and value of the smallest element, `None` for an empty slice.
/// Ties resolve to the lowest index.
pub fn pairwise_min(values: &[f64]) -> Option<(usize, f64)> {
    pairwise_reduce(values, |kept, challenger| challenger < kept)
}

fn pairwise_reduce<F>(values: &[f64], replaces: F) -> Option<(usize, f64)>
where
    F: Fn(f64, f64) -> bool,
{
    let mut candidates: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    let mut len = candidates.len();
    if len == 0 {
        return None;
    }

    while len > 1 {
        let pairs = len / 2;
        for k in 0..pairs {
            let left = candidates[2 * k];
            let right = candidates[2 * k + 1];
            candidates[k] = if replaces(left.1, right.1) { right } else { left };
        }

        if len % 2 == 1 {
            candidates[pairs] = candidates[len - 1];
            len = pairs + 1;
        } else {
            len = pairs;
        }
    }

    Some(candidates[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_of_two_length() {
        let values = [3.0, 7.0, -1.0, 4.0, 9.5, 2.0, 0.0, 8.0];
        assert_eq!(pairwise_max(&values), Some((4, 9.5)));
        assert_eq!(pairwise_min(&values), Some((2, -1.0)));
    }

    #[test]
    fn test_odd_lengths_carry_unpaired() {
        // The extreme sits in the unpaired tail on every round
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        assert_eq!(pairwise_max(&values), Some((6, 7.0)));
        assert_eq!(pairwise_min(&values), Some((0, 1.0)));

        let values = [4.0, 2.0, -3.0];
        assert_eq!(pairwise_min(&values), Some((2, -3.0)));
    }

    #[test]
    fn test_ties_keep_lowest_index() {
        let values = [1.0, 5.0, 5.0, 0.0, 5.0];
        assert_eq!(pairwise_max(&values), Some((1, 5.0)));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(pairwise_max(&[]), None);
        assert_eq!(pairwise_min(&[42.0]), Some((0, 42.0)));
    }

    #[test]
    fn test_matches_linear_scan() {
        let values: Vec<f64> = (0..37).map(|i| ((i * 7919) % 101) as f64 - 50.0).collect();
        let expected = values
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, v)| if v > best.1 { (i, v) } else { best });
        assert_eq!(pairwise_max(&values), Some(expected));
    }
}
