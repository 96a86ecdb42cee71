//! Benchmark for frame-indexed attribute resolution.
//!
//! Builds a synthetic enhanced multi-frame record and times each kind of
//! lookup the resolver performs across every frame.
//!
//! Usage: `bench-frames [FRAMES] [SUMMARY.json]`

use std::fs;
use std::hint::black_box;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dicom_frames::{
    tags, validate_functional_groups, FrameResolver, Item, MetaData, ResolverOptions, Tag, Value,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

// =============================================================================
// SYNTHETIC RECORD
// =============================================================================

const VENDOR: &str = "ACME FRAME DATA";

/// Private sequence holding vendor per-frame data.
const VENDOR_SEQUENCE: Tag = Tag::new(0x0029, 0x1010);

/// Vendor attribute that only exists inside the private sequence.
const VENDOR_GAIN: Tag = Tag::new(0x0029, 0x1011);

/// Placeholder for the vendor's private block.
const VENDOR_PLACEHOLDER: Tag = Tag::new(0x0029, 0x0011);

fn build_record(frames: usize) -> MetaData {
    let mut meta = MetaData::new();
    meta.set(tags::MODALITY, "MR");
    meta.set(tags::ROWS, Value::int(256));
    meta.set(tags::COLUMNS, Value::int(256));
    meta.set(tags::NUMBER_OF_FRAMES, Value::int(frames as i64));

    let shared = Item::new()
        .with(
            tags::PIXEL_MEASURES_SEQUENCE,
            Item::new()
                .with(tags::PIXEL_SPACING, "0.9375\\0.9375")
                .with(tags::SLICE_THICKNESS, Value::float(3.0)),
        )
        .with(
            tags::PLANE_ORIENTATION_SEQUENCE,
            Item::new().with(
                tags::IMAGE_ORIENTATION_PATIENT,
                Value::Float(vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]),
            ),
        );
    meta.set(tags::SHARED_FUNCTIONAL_GROUPS_SEQUENCE, shared);

    let per_frame = (0..frames).map(|f| {
        Item::new()
            .with(
                tags::PLANE_POSITION_SEQUENCE,
                Item::new().with(
                    tags::IMAGE_POSITION_PATIENT,
                    Value::Float(vec![-120.0, -120.0, f as f64 * 3.0]),
                ),
            )
            .with(
                tags::FRAME_CONTENT_SEQUENCE,
                Item::new().with(tags::IN_STACK_POSITION_NUMBER, Value::int(f as i64 + 1)),
            )
            .with(
                VENDOR_SEQUENCE,
                Item::new()
                    .with(Tag::new(0x0029, 0x0010), VENDOR)
                    .with(VENDOR_GAIN, Value::float(1.0 + f as f64 / 100.0)),
            )
    });
    meta.set(tags::PER_FRAME_FUNCTIONAL_GROUPS_SEQUENCE, Value::sequence(per_frame));

    meta
}

// =============================================================================
// TIMING
// =============================================================================

const ITERS: u32 = 20;

#[derive(Debug, Serialize)]
struct Timing {
    lookup: &'static str,
    frames: usize,
    avg_per_pass_us: f64,
    ns_per_lookup: f64,
}

fn time_lookup<F>(lookup: &'static str, frames: usize, mut f: F) -> Timing
where
    F: FnMut(usize) -> bool,
{
    // Warmup
    for frame in 0..frames {
        black_box(f(frame));
    }

    let start = Instant::now();
    for _ in 0..ITERS {
        let mut found = 0usize;
        for frame in 0..frames {
            found += usize::from(f(frame));
        }
        assert_eq!(found, frames, "{lookup} should resolve for every frame");
    }
    let per_pass = start.elapsed() / ITERS;

    let timing = Timing {
        lookup,
        frames,
        avg_per_pass_us: per_pass.as_secs_f64() * 1e6,
        ns_per_lookup: per_pass.as_nanos() as f64 / frames.max(1) as f64,
    };
    println!(
        "{:<28} {:>10.1} us/pass  {:>8.1} ns/lookup",
        timing.lookup, timing.avg_per_pass_us, timing.ns_per_lookup
    );
    timing
}

#[derive(Debug, Serialize)]
struct Summary {
    frames: usize,
    iterations: u32,
    build_ms: f64,
    construct_us: f64,
    timings: Vec<Timing>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let frames: usize = args
        .next()
        .map(|s| s.parse().expect("FRAMES must be a positive integer"))
        .unwrap_or(1000);
    let summary_path = args.next();

    println!("=== Building record ===");
    let build_start = Instant::now();
    let meta = Arc::new(build_record(frames));
    let build_time = build_start.elapsed();
    println!("Frames: {}", frames);
    println!("Built in {:?}", build_time);

    validate_functional_groups(&meta, 0).expect("synthetic record should be consistent");

    let construct_start = Instant::now();
    let resolver = FrameResolver::new(meta.clone());
    let construct_time: Duration = construct_start.elapsed();
    assert!(resolver.is_per_frame());
    assert_eq!(resolver.frame_count(), frames);
    println!("Resolver constructed in {:?}", construct_time);

    println!("\n=== Lookups (avg of {} passes) ===", ITERS);
    let mut timings = Vec::new();

    timings.push(time_lookup("per-frame nested public", frames, |f| {
        resolver.get(f, tags::IMAGE_POSITION_PATIENT).is_valid()
    }));
    timings.push(time_lookup("shared nested public", frames, |f| {
        resolver.get(f, tags::PIXEL_SPACING).is_valid()
    }));
    timings.push(time_lookup("base record", frames, |f| {
        resolver.get(f, tags::MODALITY).is_valid()
    }));
    timings.push(time_lookup("private fallback", frames, |f| {
        resolver.get(f, VENDOR_GAIN).is_valid()
    }));
    timings.push(time_lookup("hidden NumberOfFrames", frames, |f| {
        !resolver.get(f, tags::NUMBER_OF_FRAMES).is_valid()
    }));
    timings.push(time_lookup("resolve private tag", frames, |f| {
        !resolver
            .resolve_private_tag(f, VENDOR_PLACEHOLDER, VENDOR)
            .is_unresolved()
    }));

    let strict = FrameResolver::with_options(Some(meta), None, ResolverOptions::strict_public());
    timings.push(time_lookup("strict public (miss)", frames, |f| {
        !strict.get(f, VENDOR_GAIN).is_valid()
    }));

    let summary = Summary {
        frames,
        iterations: ITERS,
        build_ms: build_time.as_secs_f64() * 1e3,
        construct_us: construct_time.as_secs_f64() * 1e6,
        timings,
    };

    if let Some(path) = summary_path {
        let json = serde_json::to_string_pretty(&summary).expect("Failed to serialize summary");
        fs::write(&path, json).expect("Failed to write summary");
        println!("\nSummary written to {}", path);
    }
}
