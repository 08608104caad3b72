//! Property tests for the window scan, local p-values and toy generation.

use bumphunter_stats::{
    ScanOptions, Window, WindowScan, ZeroPredictionPolicy, evaluate_statistic, local_p_value,
    make_toys, poisson_tail,
};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

const DEFAULT_CASES: u32 = 256;

fn proptest_cases() -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(DEFAULT_CASES)
}

/// Aligned (observed, predicted) histograms with strictly positive prediction
fn histogram_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (5usize..40).prop_flat_map(|bins| {
        (
            prop::collection::vec(0u32..60, bins),
            prop::collection::vec(1u32..400, bins),
        )
            .prop_map(|(observed, predicted)| {
                (
                    observed.into_iter().map(f64::from).collect(),
                    predicted.into_iter().map(|m| f64::from(m) / 10.0).collect(),
                )
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        .. ProptestConfig::default()
    })]

    #[test]
    fn windows_stay_inside_range_and_under_half_span(lo in 0usize..50, span in 0usize..80) {
        let hi = lo + span;
        let scan = WindowScan::new(lo, hi);
        let mut count = 0;
        for window in scan.iter() {
            prop_assert!(window.lo < window.hi);
            prop_assert!(window.lo >= lo);
            prop_assert!(window.hi <= hi);
            prop_assert!(window.width() <= span / 2);
            count += 1;
        }
        prop_assert_eq!(count, scan.len());
    }

    #[test]
    fn p_value_is_a_probability(d in 0.0f64..5_000.0, m in 0.01f64..5_000.0) {
        let p = poisson_tail(d, m);
        prop_assert!(p > 0.0 && p <= 1.0);
        if d <= m {
            prop_assert_eq!(p, 1.0);
        }
    }

    #[test]
    fn p_value_non_increasing_in_observed(m in 0.1f64..500.0, d in 0u32..1_000, extra in 1u32..50) {
        let d = f64::from(d);
        let p_low = poisson_tail(d, m);
        let p_high = poisson_tail(d + f64::from(extra), m);
        prop_assert!(p_high <= p_low, "p({}) = {} > p({}) = {}", d + f64::from(extra), p_high, d, p_low);
    }

    #[test]
    fn dips_are_never_significant((observed, predicted) in histogram_strategy()) {
        let dipped: Vec<f64> = predicted.iter().map(|m| (m * 0.5).floor()).collect();
        let window = Window::new(0, observed.len());
        let local = local_p_value(window, &dipped, &predicted, &ScanOptions::default()).unwrap();
        prop_assert_eq!(local.p_value, 1.0);
    }

    #[test]
    fn statistic_is_minus_log_of_min_p((observed, predicted) in histogram_strategy()) {
        let options = ScanOptions::default();
        let result = evaluate_statistic(&observed, &predicted, &options).unwrap();

        let min_p = WindowScan::new(0, predicted.len() - 1)
            .iter()
            .map(|w| local_p_value(w, &observed, &predicted, &options).unwrap().p_value)
            .fold(1.0, f64::min);

        prop_assert!(result.statistic >= 0.0);
        prop_assert_eq!(result.p_value, min_p);
        prop_assert!((result.statistic + min_p.ln()).abs() <= 1e-12 * (1.0 + result.statistic));
    }

    #[test]
    fn zero_prediction_toys_are_zero(bins in 1usize..30, n in 1usize..20, seed in any::<u64>()) {
        for toy in make_toys(&vec![0.0; bins], n, seed).unwrap() {
            prop_assert!(toy.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn ignore_policy_never_errors_on_gaps(
        (observed, mut predicted) in histogram_strategy(),
        gap in 1usize..3,
    ) {
        let gap = gap.min(predicted.len() - 2);
        predicted[gap] = 0.0;
        let options = ScanOptions {
            zero_prediction: ZeroPredictionPolicy::Ignore,
            ..Default::default()
        };
        prop_assert!(evaluate_statistic(&observed, &predicted, &options).is_ok());
    }
}
