use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use scrollnorm::event::{DeltaMode, RawEvent, WheelEvent};
use scrollnorm::host::{Capabilities, MemoryHost};
use scrollnorm::{Config, Normalizer};

type Deltas = Rc<RefCell<Vec<(f64, f64)>>>;

fn recording(config: Config, capabilities: Capabilities) -> (Normalizer<MemoryHost>, Deltas) {
    let deltas: Deltas = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&deltas);
    let mut normalizer = Normalizer::new(MemoryHost::new(capabilities), config);
    normalizer.subscribe(move |event| {
        sink.borrow_mut().push((event.delta_x, event.delta_y));
        Ok(())
    });
    (normalizer, deltas)
}

// Small integers keep the float sums exact.
fn small() -> impl Strategy<Value = f64> {
    (-500i32..=500).prop_map(f64::from)
}

proptest! {
    #[test]
    fn wheel_delta_is_scaled_raw_delta(
        raw_x in small(),
        raw_y in small(),
        multiplier in 1i32..=8,
        quirk in any::<bool>(),
        line_mode in any::<bool>(),
    ) {
        let multiplier = f64::from(multiplier);
        let capabilities = Capabilities { line_delta_quirk: quirk, ..Capabilities::all() };
        let (mut normalizer, deltas) = recording(
            Config::default().with_mouse_multiplier(multiplier),
            capabilities,
        );
        let mode = if line_mode { DeltaMode::Line } else { DeltaMode::Pixel };

        normalizer.handle_event(&RawEvent::wheel(WheelEvent::new(raw_x, raw_y, mode))).unwrap();

        let line_factor = if quirk && line_mode { 15.0 } else { 1.0 };
        let (dx, dy) = deltas.borrow()[0];
        prop_assert_eq!(dx, -raw_x * line_factor * multiplier);
        prop_assert_eq!(dy, -raw_y * line_factor * multiplier);
    }

    #[test]
    fn touch_moves_are_incremental(
        points in prop::collection::vec((small(), small()), 2..12),
        multiplier in 1i32..=4,
    ) {
        let multiplier = f64::from(multiplier);
        let (mut normalizer, deltas) = recording(
            Config::default().with_touch_multiplier(multiplier),
            Capabilities::all(),
        );

        let (start_x, start_y) = points[0];
        normalizer.handle_event(&RawEvent::touch_start(start_x, start_y)).unwrap();
        for &(x, y) in &points[1..] {
            normalizer.handle_event(&RawEvent::touch_move(x, y)).unwrap();
        }

        let (end_x, end_y) = points[points.len() - 1];
        let sum_x: f64 = deltas.borrow().iter().map(|(dx, _)| dx).sum();
        let sum_y: f64 = deltas.borrow().iter().map(|(_, dy)| dy).sum();
        prop_assert_eq!(sum_x, (end_x - start_x) * multiplier);
        prop_assert_eq!(sum_y, (end_y - start_y) * multiplier);
    }

    #[test]
    fn totals_equal_sum_of_dispatched_deltas(
        events in prop::collection::vec((small(), small(), any::<bool>()), 1..24),
    ) {
        let (mut normalizer, deltas) = recording(Config::default(), Capabilities::all());

        normalizer.handle_event(&RawEvent::touch_start(0.0, 0.0)).unwrap();
        for &(a, b, is_wheel) in &events {
            let raw = if is_wheel {
                RawEvent::wheel(WheelEvent::new(a, b, DeltaMode::Pixel))
            } else {
                RawEvent::touch_move(a, b)
            };
            normalizer.handle_event(&raw).unwrap();
        }

        let expected_x: f64 = deltas.borrow().iter().map(|(dx, _)| dx).sum();
        let expected_y: f64 = deltas.borrow().iter().map(|(_, dy)| dy).sum();
        prop_assert_eq!(deltas.borrow().len(), events.len());
        prop_assert_eq!(normalizer.state().total_x, expected_x);
        prop_assert_eq!(normalizer.state().total_y, expected_y);
    }

    #[test]
    fn single_key_presses_never_dispatch(key_code in 0u32..256) {
        let (mut normalizer, deltas) = recording(Config::default(), Capabilities::all());
        normalizer.handle_event(&RawEvent::key_down(key_code)).unwrap();
        prop_assert!(deltas.borrow().is_empty());
    }
}
