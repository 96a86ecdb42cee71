//! Prints a few resolved attributes for every frame of a small enhanced record.

use std::sync::Arc;

use dicom_frames::{tags, FrameResolver, Item, MetaData, Tag, Value};

fn format_value(v: &Value) -> String {
    match v {
        Value::Invalid => "-".to_string(),
        Value::Text(values) => values.join("\\"),
        Value::Int(values) => values.iter().map(i64::to_string).collect::<Vec<_>>().join("\\"),
        Value::Float(values) => values.iter().map(|f| format!("{:.2}", f)).collect::<Vec<_>>().join("\\"),
        Value::Bytes(b) => format!("BYTES[{}]", b.len()),
        Value::Sequence(items) => format!("SEQUENCE[{}]", items.len()),
    }
}

fn main() {
    let frames = 4;
    let vendor_gain = Tag::new(0x0029, 0x1011);

    let mut meta = MetaData::new();
    meta.set(tags::MODALITY, "CT");
    meta.set(tags::NUMBER_OF_FRAMES, Value::int(frames));
    meta.set(
        tags::SHARED_FUNCTIONAL_GROUPS_SEQUENCE,
        Item::new().with(
            tags::PIXEL_MEASURES_SEQUENCE,
            Item::new().with(tags::PIXEL_SPACING, "0.7\\0.7"),
        ),
    );
    meta.set(
        tags::PER_FRAME_FUNCTIONAL_GROUPS_SEQUENCE,
        Value::sequence((0..frames).map(|f| {
            Item::new()
                .with(
                    tags::PLANE_POSITION_SEQUENCE,
                    Item::new().with(
                        tags::IMAGE_POSITION_PATIENT,
                        Value::Float(vec![0.0, 0.0, f as f64 * 1.25]),
                    ),
                )
                .with(
                    Tag::new(0x0029, 0x1010),
                    Item::new()
                        .with(Tag::new(0x0029, 0x0010), "ACME FRAME DATA")
                        .with(vendor_gain, Value::float(1.0 + f as f64 / 10.0)),
                )
        })),
    );

    let resolver = FrameResolver::new(Arc::new(meta));
    println!(
        "Frames: {} (per-frame groups: {})",
        resolver.frame_count(),
        resolver.is_per_frame()
    );

    let columns = [
        tags::MODALITY,
        tags::PIXEL_SPACING,
        tags::IMAGE_POSITION_PATIENT,
        vendor_gain,
        tags::NUMBER_OF_FRAMES,
    ];
    for frame in 0..resolver.frame_count() {
        println!("\n=== Frame {} ===", frame);
        for tag in columns {
            let name = tags::keyword(tag).unwrap_or("(private)");
            println!("{} {:<24} {}", tag, name, format_value(resolver.get(frame, tag)));
        }
    }
}
