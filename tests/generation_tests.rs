// Host-side tests for mount generations.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod generation {
    include!("../src/generation.rs");
}

use generation::Generation;

// mount() = unmount() + a fresh generation for the spawned init
fn mount(g: &Generation) -> u64 {
    g.advance();
    g.advance()
}

#[test]
fn fresh_counter_starts_at_zero() {
    let g = Generation::new();
    assert_eq!(g.current(), 0);
    assert!(g.is_current(0));
}

#[test]
fn init_queued_by_an_earlier_mount_is_superseded() {
    let g = Generation::new();
    let first = mount(&g);
    let second = mount(&g);
    // Neither init has run yet; only the latest may touch the page.
    assert!(!g.is_current(first));
    assert!(g.is_current(second));
}

#[test]
fn unmount_invalidates_a_pending_init() {
    let g = Generation::new();
    let token = mount(&g);
    g.advance();
    assert!(!g.is_current(token));
}

#[test]
fn advance_yields_distinct_tokens() {
    let g = Generation::new();
    let mut last = 0;
    for _ in 0..3 {
        let next = g.advance();
        assert_ne!(next, last);
        last = next;
    }
    assert_eq!(g.current(), 3);
}
