use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use turntable_core::*;

struct Sink;

impl Renderer for Sink {
    type Image = ();
    fn resize(&mut self, _viewport: Viewport) {}
    fn render(&mut self, _frame: FrameView<'_, ()>) {}
}

fn ready_sequence(n: usize) -> FrameSequence<()> {
    let mut seq = FrameSequence::from_frames((0..n).map(|i| format!("/{i}")).collect());
    for i in 0..n {
        seq.resource_loaded(i, ());
    }
    seq
}

proptest! {
    #[test]
    fn stepping_never_leaves_the_range(
        n in 1usize..64,
        steps in prop::collection::vec(any::<bool>(), 0..256)
    ) {
        let mut seq = FrameSequence::<()>::from_frames((0..n).map(|i| i.to_string()).collect());
        for forward in steps {
            let dir = if forward { Direction::Forward } else { Direction::Backward };
            let next = seq.advance(dir);
            prop_assert!(next < n);
        }
    }

    #[test]
    fn stepping_wraps_at_both_ends(n in 1usize..64) {
        let mut seq = FrameSequence::<()>::from_frames((0..n).map(|i| i.to_string()).collect());
        prop_assert_eq!(seq.step_index(Direction::Backward), n - 1);
        for _ in 0..n - 1 {
            seq.advance(Direction::Forward);
        }
        prop_assert_eq!(seq.current_index(), n - 1);
        prop_assert_eq!(seq.step_index(Direction::Forward), 0);
    }

    #[test]
    fn direction_follows_pointer_delta(prev in -5000.0f64..5000.0, next in -5000.0f64..5000.0) {
        let cur = Direction::Forward;
        let got = Direction::infer(prev, next, cur);
        if next < prev {
            prop_assert_eq!(got, Direction::Backward);
        } else if next > prev {
            prop_assert_eq!(got, Direction::Forward);
        } else {
            prop_assert_eq!(got, cur);
        }
    }

    #[test]
    fn decay_is_monotonic_and_converges(default in 5u32..5000, start in 0u32..5000) {
        let current = start % default;
        let next = next_interval(default, current);
        prop_assert!(next >= current);
        prop_assert!(next <= default);

        let mut value = current;
        let mut steps = 0u32;
        while value != default {
            let n = next_interval(default, value);
            prop_assert!(n > value);
            prop_assert!(n <= default);
            value = n;
            steps += 1;
            prop_assert!(steps <= default / 5 + 1);
        }
    }

    #[test]
    fn drag_interval_stays_in_bounds(
        distance in 0.0f64..100_000.0,
        duration in -100.0f64..100_000.0,
        default in 5u32..5000
    ) {
        let got = drag_interval(distance, duration, default);
        prop_assert!(got >= MIN_INTERVAL_MS);
        prop_assert!(got <= default);
    }
}

/// Random interleavings of input (including cancelled drags), ticks, resizes and visibility never leave
/// more than one tick scheduled, and `running` always matches it.
#[test]
fn at_most_one_tick_is_ever_pending() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut v = Viewer::from_parts(
        ready_sequence(12),
        120,
        Direction::Forward,
        true,
        Sink,
        ManualTimer::new(),
    );
    let mut t = 0.0;
    let mut x = 400.0;
    for _ in 0..5_000 {
        t += rng.gen_range(0.0..40.0);
        match rng.gen_range(0..10) {
            0 => {
                v.show(Viewport::new(640.0, 480.0));
            }
            1 => v.hide(),
            2 => v.pointer_down(x, t),
            3 | 4 => {
                x += rng.gen_range(-30.0..30.0);
                v.pointer_move(x);
            }
            5 => {
                v.pointer_up(x, t);
            }
            6 => v.resize(Viewport::new(rng.gen_range(100.0..900.0), 300.0)),
            7 => v.stop(),
            8 => v.pointer_cancel(t),
            _ => {
                if v.timer_mut().fire().is_some() {
                    v.tick();
                }
            }
        }
        assert!(v.timer().pending_count() <= 1);
        assert_eq!(v.timer().pending_count(), v.has_pending_tick() as usize);
        assert_eq!(v.is_running(), v.has_pending_tick());
        assert!(v.frames().current_index() < 12);
        assert!(v.interval_ms() >= MIN_INTERVAL_MS && v.interval_ms() <= 120);
    }
}
