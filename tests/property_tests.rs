//! Property-based tests for plotkit
//!
//! - Step ordering and overwrite invariants of the run logger
//! - Snapshot round trips (in memory and through JSON)
//! - Colormap bounds
//! - Run with ProptestConfig::with_cases(100)

use proptest::prelude::*;
use plotkit::palette::{Colormap, Rgb};
use plotkit::runlog::RunLogger;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Generate a metric name from a small pool so collisions happen
fn arb_metric_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["loss", "acc", "lr", "f1", "val_loss"]).prop_map(String::from)
}

/// Generate finite metric values
fn arb_value() -> impl Strategy<Value = f64> {
    -1.0e6f64..1.0e6
}

/// Generate a sequence of (step, metrics) log calls in arbitrary order
fn arb_log_calls() -> impl Strategy<Value = Vec<(i64, Vec<(String, f64)>)>> {
    prop::collection::vec(
        (
            -50i64..50,
            prop::collection::vec((arb_metric_name(), arb_value()), 1..4),
        ),
        0..40,
    )
}

/// Generate a run where every step carries the same metric set
fn arb_uniform_run() -> impl Strategy<Value = Vec<(i64, f64, f64)>> {
    prop::collection::vec((-1000i64..1000, arb_value(), arb_value()), 1..30)
}

fn arb_rgb() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Run Logger Properties
    // ========================================================================

    /// Property: steps are strictly ascending regardless of call order
    #[test]
    fn prop_steps_sorted_ascending(calls in arb_log_calls()) {
        let mut logger = RunLogger::new(100).unwrap();
        for (step, metrics) in &calls {
            logger.log(metrics.iter().cloned(), *step).unwrap();
        }

        let steps = logger.steps();
        for pair in steps.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }

        let mut expected: Vec<i64> = calls.iter().map(|(s, _)| *s).collect();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(steps, expected);
    }

    /// Property: the last value logged for (step, metric) is the one kept
    #[test]
    fn prop_last_write_wins(calls in arb_log_calls()) {
        let mut logger = RunLogger::new(100).unwrap();
        for (step, metrics) in &calls {
            logger.log(metrics.iter().cloned(), *step).unwrap();
        }

        for (step, record) in logger.history() {
            for (name, value) in record.iter() {
                let last = calls
                    .iter()
                    .filter(|(s, _)| s == step)
                    .flat_map(|(_, m)| m.iter())
                    .filter(|(n, _)| n == name)
                    .map(|(_, v)| *v)
                    .last();
                prop_assert_eq!(Some(value), last);
            }
        }
    }

    /// Property: get() succeeds exactly for names present at the first step
    #[test]
    fn prop_get_follows_first_step(calls in arb_log_calls(), name in arb_metric_name()) {
        let mut logger = RunLogger::new(100).unwrap();
        for (step, metrics) in &calls {
            logger.log(metrics.iter().cloned(), *step).unwrap();
        }

        let at_first = logger.metric_names().contains(&name.as_str());
        prop_assert_eq!(logger.get(&name).is_ok(), at_first);
    }

    /// Property: snapshot -> from_snapshot reproduces the run
    #[test]
    fn prop_snapshot_round_trip(run in arb_uniform_run()) {
        let mut logger = RunLogger::new(100).unwrap();
        for (step, loss, acc) in &run {
            logger.log([("loss", *loss), ("acc", *acc)], *step).unwrap();
        }

        let restored = RunLogger::from_snapshot(&logger.snapshot()).unwrap();
        prop_assert_eq!(restored.steps(), logger.steps());
        prop_assert_eq!(restored.get("loss").unwrap(), logger.get("loss").unwrap());
        prop_assert_eq!(restored.get("acc").unwrap(), logger.get("acc").unwrap());
    }

    /// Property: the JSON form round-trips to an equal snapshot
    #[test]
    fn prop_snapshot_json_round_trip(run in arb_uniform_run()) {
        let mut logger = RunLogger::new(100).unwrap();
        for (step, loss, acc) in &run {
            logger.log([("loss", *loss), ("acc", *acc)], *step).unwrap();
        }

        let snapshot = logger.snapshot();
        let restored = RunLogger::from_json(&snapshot.to_json().unwrap()).unwrap();
        prop_assert_eq!(restored.snapshot(), snapshot);
    }

    // ========================================================================
    // Colormap Properties
    // ========================================================================

    /// Property: sampled colors stay inside the bounding box of the stops
    #[test]
    fn prop_colormap_within_stop_bounds(
        a in arb_rgb(),
        b in arb_rgb(),
        t in -0.5f64..1.5
    ) {
        let cmap = Colormap::from_list("pair", [a, b], 256).unwrap();
        let c = cmap.sample(t);

        prop_assert!(c.r >= a.r.min(b.r) && c.r <= a.r.max(b.r));
        prop_assert!(c.g >= a.g.min(b.g) && c.g <= a.g.max(b.g));
        prop_assert!(c.b >= a.b.min(b.b) && c.b <= a.b.max(b.b));
    }

    /// Property: hex formatting round-trips
    #[test]
    fn prop_hex_round_trip(c in arb_rgb()) {
        prop_assert_eq!(Rgb::from_hex(&c.to_hex()).unwrap(), c);
    }
}
