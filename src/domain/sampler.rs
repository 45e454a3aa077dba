//! Weighted random initialisation of a cell buffer.

use super::RandomSource;

/// Fill `cells` from a weighted distribution, one draw per cell.
///
/// Entries are scanned in order while subtracting their weight from the
/// draw; the first `Some` entry reached once the draw is exhausted wins.
/// A `None` entry never writes and does not restore the draw, so its
/// weight goes to the next `Some` entry. Cells with no winner keep their
/// current value.
pub fn fill(cells: &mut [u8], distribution: &[(Option<u8>, f64)], rng: &mut dyn RandomSource) {
    let sum: f64 = distribution.iter().map(|(_, weight)| weight).sum();

    for cell in cells.iter_mut() {
        let mut selection = rng.next_f64() * sum;

        for (value, weight) in distribution {
            selection -= weight;
            if selection <= 0.0 {
                if let Some(value) = value {
                    *cell = *value;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_draw_per_cell() {
        let mut cells = vec![9; 9];
        let mut calls = 0;
        let mut rng = || {
            calls += 1;
            (calls as f64 * 0.1) % 1.0
        };
        fill(&mut cells, &[(Some(0), 50.0), (Some(1), 50.0)], &mut rng);
        drop(rng);
        assert_eq!(calls, 9);
        assert!(cells.iter().all(|&c| c == 0 || c == 1));
    }

    #[test]
    fn test_selection_follows_weights() {
        let mut cells = vec![0; 3];
        let mut draws = [0.05, 0.5, 0.95].into_iter();
        let mut rng = move || draws.next().unwrap_or(0.0);
        fill(&mut cells, &[(Some(1), 10.0), (Some(2), 80.0), (Some(3), 10.0)], &mut rng);
        assert_eq!(cells, vec![1, 2, 3]);
    }

    #[test]
    fn test_lone_none_leaves_cells() {
        let mut cells = vec![1];
        let mut rng = || 0.3;
        fill(&mut cells, &[(None, 100.0)], &mut rng);
        assert_eq!(cells, vec![1]);
    }

    #[test]
    fn test_none_mass_goes_to_next_entry() {
        // A draw landing in the None slot selects the entry after it
        let mut cells = vec![0; 2];
        let mut draws = [0.1, 0.5].into_iter();
        let mut rng = move || draws.next().unwrap_or(0.0);
        fill(&mut cells, &[(Some(4), 25.0), (None, 50.0), (Some(6), 25.0)], &mut rng);
        assert_eq!(cells, vec![4, 6]);
    }

    #[test]
    fn test_zero_draw_selects_first_value() {
        let mut cells = vec![5; 4];
        let mut rng = || 0.0;
        fill(&mut cells, &[(Some(2), 1.0), (Some(3), 1.0)], &mut rng);
        assert_eq!(cells, vec![2; 4]);
    }
}
