//! Majority vote over a window of gesture ids

/// Most frequent id in `ids`
///
/// Ties go to the id whose first occurrence comes earliest, so the
/// result never depends on hash order. Returns `None` for an empty window.
pub fn majority_vote<I>(ids: I) -> Option<u8>
where
    I: IntoIterator<Item = u8>,
{
    let mut counts = [0usize; 256];
    // Distinct ids in order of first appearance
    let mut order: Vec<u8> = Vec::new();

    for id in ids {
        let slot = &mut counts[id as usize];
        if *slot == 0 {
            order.push(id);
        }
        *slot += 1;
    }

    let mut winner: Option<(u8, usize)> = None;
    for id in order {
        let count = counts[id as usize];
        match winner {
            Some((_, best)) if count <= best => {}
            _ => winner = Some((id, count)),
        }
    }
    winner.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_majority() {
        assert_eq!(majority_vote([1, 1, 2, 2, 2, 3]), Some(2));
    }

    #[test]
    fn test_all_distinct_returns_first_inserted() {
        assert_eq!(majority_vote([1, 2, 3, 4, 5, 6]), Some(1));
    }

    #[test]
    fn test_tie_goes_to_earliest_first_occurrence() {
        assert_eq!(majority_vote([3, 1, 1, 3]), Some(3));
        assert_eq!(majority_vote([0, 5, 5, 0, 7]), Some(0));
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(majority_vote(std::iter::empty()), None);
    }
}
