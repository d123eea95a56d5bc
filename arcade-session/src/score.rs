/// Collapses a finished session into a single score.
///
/// `acc01` is the answered-only accuracy ratio in [0, 1]. Accuracy is
/// worth up to 1000 points, each streak step 12, and speed up to 220
/// (linear below a 1200 ms mean, floored at 0). No overall cap.
pub fn compute_score(acc01: f64, mean_rt_ms: Option<u32>, streak_best: u32) -> i32 {
    let acc_pts = (acc01 * 1000.0).round() as i32;
    let streak_pts = streak_best as i32 * 12;
    let speed_pts = match mean_rt_ms {
        None => 0,
        Some(rt) => ((1200.0 - rt as f64) / 2.0).clamp(0.0, 220.0).round() as i32,
    };
    acc_pts + streak_pts + speed_pts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_in_accuracy() {
        let accs = [0.0, 0.25, 0.5, 0.75, 0.9, 1.0];
        for pair in accs.windows(2) {
            assert!(compute_score(pair[0], Some(600), 4) <= compute_score(pair[1], Some(600), 4));
        }
    }

    #[test]
    fn faster_never_scores_lower() {
        let rts = [100, 300, 500, 760, 1100, 1200, 2000];
        for pair in rts.windows(2) {
            assert!(compute_score(0.8, Some(pair[0]), 3) >= compute_score(0.8, Some(pair[1]), 3));
        }
    }

    #[test]
    fn no_reaction_time_means_no_speed_points() {
        assert_eq!(compute_score(0.8, None, 5), 800 + 60);
        assert_eq!(compute_score(1.0, None, 0), 1000);
    }

    #[test]
    fn speed_points_are_clamped() {
        // 100 ms would earn 550 uncapped.
        assert_eq!(compute_score(0.0, Some(100), 0), 220);
        // Slower than the pivot earns nothing, never negative.
        assert_eq!(compute_score(0.0, Some(1200), 0), 0);
        assert_eq!(compute_score(0.0, Some(3000), 0), 0);
    }

    #[test]
    fn streak_is_12_per_step() {
        assert_eq!(compute_score(0.0, None, 10) - compute_score(0.0, None, 0), 120);
    }

    #[test]
    fn mid_range_example() {
        // 760 ms mean -> (1200-760)/2 = 220, exactly at the cap.
        assert_eq!(compute_score(0.9, Some(760), 7), 900 + 84 + 220);
        // 1000 ms mean -> 100 speed points.
        assert_eq!(compute_score(0.5, Some(1000), 2), 500 + 24 + 100);
    }
}
