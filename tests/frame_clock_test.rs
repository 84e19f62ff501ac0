use term_savers::core::{registry, SimRng, Simulation};
use term_savers::term::FrameClock;
use term_savers::types::{Grid, Tick};

#[test]
fn frame_clock_first_frame_is_immediate() {
    let mut c = FrameClock::new(30);
    assert_eq!(c.poll(0), Some(0));
}

#[test]
fn frame_clock_waits_out_the_period() {
    let mut c = FrameClock::new(20);
    assert_eq!(c.poll(0), Some(0));
    assert_eq!(c.poll(49), None);
    assert_eq!(c.until_next(49), 1);
    assert_eq!(c.poll(50), Some(1));
}

#[test]
fn frame_clock_never_bursts_after_a_stall() {
    let mut c = FrameClock::new(60);
    assert_eq!(c.poll(0), Some(0));
    // A five second stall yields exactly one frame.
    assert_eq!(c.poll(5000), Some(1));
    assert_eq!(c.poll(5000), None);
    assert_eq!(c.until_next(5000), c.period_ms());
}

#[test]
fn frame_clock_paces_a_saver_over_virtual_time() {
    let kind = registry::find("matrix-rain").unwrap();
    let fps = kind.info().fps.unwrap();
    let mut saver = kind.create();
    let mut clock = FrameClock::new(fps);
    let mut rng = SimRng::new(2);
    let mut grid = Grid::default();

    let mut frames = 0;
    let mut now = 0;
    while now <= 2000 {
        if let Some(frame) = clock.poll(now) {
            assert_eq!(frame, frames);
            saver.advance(Tick::new(80, 24, frame, now), &mut rng, &mut grid);
            frames += 1;
        }
        // Sleep the way the host does, but never zero so time moves on.
        now += clock.until_next(now).max(1);
    }

    let period = clock.period_ms();
    assert_eq!(frames, 2000 / period + 1);
    assert_eq!((grid.width(), grid.height()), (80, 24));
}
