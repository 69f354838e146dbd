//! The per-frame hot path (tick, drain events, snapshot, render) must not
//! allocate once buffers are warm. Keep this the only test in the binary so
//! other tests cannot perturb the counter.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use classic_tetris::core::{Engine, GameSnapshot, Scoreboard};
use classic_tetris::term::{FrameBuffer, GameView, Viewport};

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

#[test]
fn frame_loop_is_allocation_free_after_warmup() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = GameSnapshot::default();
    let mut scoreboard = Scoreboard::default();

    let mut engine = Engine::new(1);
    engine.start();

    // Warm-up.
    engine.snapshot_into(&mut snap);
    view.render_into(&snap, scoreboard.score(), viewport, &mut fb);
    engine.drain_events().for_each(drop);

    let allocs = with_alloc_counting(|| {
        for _ in 0..2_000 {
            if !engine.is_running() {
                engine.start();
            }
            engine.tick();
            for event in engine.drain_events() {
                scoreboard.observe(&event);
            }
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, scoreboard.score(), viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
