use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use term_savers::core::savers::{Fire, GameOfLife};
use term_savers::core::{SimRng, Simulation};
use term_savers::types::{Grid, Tick};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

/// Warm up for one tick, then count allocations over 200 more.
fn steady_state_allocs(sim: &mut impl Simulation) -> usize {
    let tick = Tick::new(80, 24, 0, 0);
    let mut rng = SimRng::new(1);
    let mut grid = Grid::default();
    sim.advance(tick, &mut rng, &mut grid);

    with_alloc_counting(|| {
        for frame in 1..=200 {
            sim.advance(tick.with_frame(frame), &mut rng, &mut grid);
        }
    })
}

// One test function: the counter is process-wide, so parallel tests would
// count each other's allocations.
#[test]
fn heavy_simulations_are_allocation_free_after_warmup() {
    assert_eq!(steady_state_allocs(&mut Fire::new()), 0, "fire");
    assert_eq!(steady_state_allocs(&mut GameOfLife::new()), 0, "game-of-life");
}
