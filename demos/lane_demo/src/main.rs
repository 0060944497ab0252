// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated overlay session that exercises lane placement and tracing.
//!
//! Spawns a deterministic stream of items of every category over 20 seconds
//! of media time, places them each frame with the stock
//! [`TrajectoryOracle`], and reports lane changes through a
//! [`PrettyPrintSink`](marquee_debug::pretty::PrettyPrintSink) and a
//! [`JsonLinesSink`](marquee_debug::json::JsonLinesSink). A tally of
//! placement outcomes is printed at the end.

use std::fs::File;
use std::io::BufWriter;

use kurbo::Size;

use marquee_core::category::MotionCategory;
use marquee_core::dispatch::Dispatcher;
use marquee_core::item::{ItemDesc, ItemId, ItemStore};
use marquee_core::oracle::TrajectoryOracle;
use marquee_core::time::{Duration, MediaTime};
use marquee_core::trace::{
    EvictionEvent, LaneResetEvent, LanesClearedEvent, PlacementCounts, PlacementEvent,
    PlacementOutcome, TraceSink, Tracer,
};

use marquee_debug::json::JsonLinesSink;
use marquee_debug::pretty::PrettyPrintSink;

const SURFACE: Size = Size::new(960.0, 240.0);
/// One frame every 40ms (25 fps).
const FRAME_MS: i64 = 40;
const FRAME_COUNT: i64 = 500;
const LIFETIME: Duration = Duration::from_secs(4);

/// Forwards events to every diagnostic sink. Re-confirmations of shown items
/// are counted but not printed.
struct Fanout<'a> {
    pretty: &'a mut PrettyPrintSink,
    json: &'a mut JsonLinesSink<BufWriter<File>>,
    counts: &'a mut PlacementCounts,
}

impl TraceSink for Fanout<'_> {
    fn on_placement(&mut self, e: &PlacementEvent) {
        self.counts.on_placement(e);
        if e.outcome != PlacementOutcome::Kept {
            self.pretty.on_placement(e);
            self.json.on_placement(e);
        }
    }

    fn on_eviction(&mut self, e: &EvictionEvent) {
        self.counts.on_eviction(e);
        self.pretty.on_eviction(e);
        self.json.on_eviction(e);
    }

    fn on_lane_reset(&mut self, e: &LaneResetEvent) {
        self.counts.on_lane_reset(e);
        self.pretty.on_lane_reset(e);
        self.json.on_lane_reset(e);
    }

    fn on_lanes_cleared(&mut self, e: &LanesClearedEvent) {
        self.counts.on_lanes_cleared(e);
        self.pretty.on_lanes_cleared(e);
        self.json.on_lanes_cleared(e);
    }
}

/// Small linear congruential generator so runs are reproducible.
struct Lcg(u64);

impl Lcg {
    fn step(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.step() % n
    }
}

fn spawn(items: &mut ItemStore, rng: &mut Lcg, now: MediaTime) -> ItemId {
    let category = match rng.below(10) {
        0..=4 => MotionCategory::ScrollRightToLeft,
        5 => MotionCategory::ScrollLeftToRight,
        6 => MotionCategory::FixedTop,
        7 | 8 => MotionCategory::FixedBottom,
        _ => MotionCategory::Special,
    };
    let chars = 4 + rng.below(20);
    let width = 12.0 * chars as f64;
    let height = if rng.below(4) == 0 { 36.0 } else { 24.0 };
    items.create_item(ItemDesc {
        category,
        size: Size::new(width, height),
        start: now,
        duration: LIFETIME,
    })
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let path = "placements.jsonl";
    let file = File::create(path).expect("failed to create placements.jsonl");
    let mut json = JsonLinesSink::new(BufWriter::new(file));
    let mut counts = PlacementCounts::default();

    // -- session -----------------------------------------------------------
    let mut items = ItemStore::new();
    let mut dispatcher = Dispatcher::new();
    let oracle = TrajectoryOracle;
    let mut rng = Lcg(0x5eed);
    let mut live: Vec<ItemId> = Vec::new();
    let mut peak_live = 0;

    {
        let mut fanout = Fanout {
            pretty: &mut pretty,
            json: &mut json,
            counts: &mut counts,
        };
        let mut tracer = Tracer::new(&mut fanout);

        for frame in 0..FRAME_COUNT {
            let now = MediaTime(frame * FRAME_MS);
            items.set_now(now);

            // 1. Retire items whose lifetime is over.
            live.retain(|&id| {
                let done = items.is_timed_out(id);
                if done {
                    items.destroy_item(id);
                }
                !done
            });

            // 2. Bursty arrivals: most frames spawn nothing.
            let arrivals = match rng.below(8) {
                0 => 3,
                1 | 2 => 1,
                _ => 0,
            };
            for _ in 0..arrivals {
                live.push(spawn(&mut items, &mut rng, now));
            }
            peak_live = peak_live.max(live.len());

            // 3. Move, then place.
            for &id in &live {
                items.advance(id, &SURFACE);
            }
            dispatcher.fix_all_traced(
                live.iter().copied(),
                &mut items,
                &SURFACE,
                &oracle,
                &mut tracer,
            );
        }

        dispatcher.release_traced(&mut tracer);
    }

    json.finish().expect("failed to write placements.jsonl");

    // -- summary -----------------------------------------------------------
    println!();
    println!("{FRAME_COUNT} frames, peak {peak_live} live items");
    for outcome in [
        PlacementOutcome::Origin,
        PlacementOutcome::Stacked,
        PlacementOutcome::ReusedLane,
        PlacementOutcome::Overwrote,
        PlacementOutcome::Displaced,
        PlacementOutcome::Reentered,
        PlacementOutcome::Kept,
        PlacementOutcome::Special,
    ] {
        println!("  {outcome:?}: {}", counts.placed(outcome));
    }
    println!(
        "  evictions={} resets={} discarded={}",
        counts.evictions, counts.resets, counts.discarded
    );
    println!("Wrote {path}");
}
