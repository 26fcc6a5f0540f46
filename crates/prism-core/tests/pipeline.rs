//! End-to-end pipeline tests over synthetic image trees.

use std::path::Path;

use prism_core::{Anchor, Config, Processor};

/// Write a small PNG whose pixel content is derived from `tint`, so files
/// with different tints have different bytes (and checksums).
fn write_png(path: &Path, tint: u8) {
    let mut buf = image::RgbImage::new(48, 36);
    for (x, y, pixel) in buf.enumerate_pixels_mut() {
        *pixel = image::Rgb([tint, (x % 256) as u8, (y % 256) as u8]);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    buf.save_with_format(path, image::ImageFormat::Png).unwrap();
}

fn base_config(input_root: &Path, output_root: &Path) -> Config {
    let mut config = Config::default();
    config.paths.input_root = input_root.to_path_buf();
    config.paths.output_root = output_root.to_path_buf();
    config.processing.workers = 4;
    config
}

#[tokio::test(flavor = "multi_thread")]
async fn dedup_scenario_mirrors_tree_and_drops_duplicate() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("root");
    let out = tmp.path().join("out");

    write_png(&root.join("a/1.png"), 10);
    std::fs::copy(root.join("a/1.png"), root.join("a/2.png")).unwrap(); // byte-identical
    write_png(&root.join("b/3.png"), 77);

    let mut config = base_config(&root, &out);
    config.processing.dedup = true;
    config.processing.shuffle = false;
    config.thumbnail.anchors = vec![Anchor::Left, Anchor::Center];
    config.thumbnail.flip_vertical = false;

    let summary = Processor::new(config).run().await.unwrap();

    assert_eq!(summary.discovered, 3);
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.variants_written, 4);

    // The surviving duplicate is whichever copy a worker reached first; both
    // live in a/, so a/ holds exactly one stem's outputs.
    let a_outputs: Vec<String> = std::fs::read_dir(out.join("a"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(a_outputs.len(), 2);
    let stem = a_outputs[0].split('_').next().unwrap().to_string();
    assert!(a_outputs.iter().all(|n| n.starts_with(&stem)));
    assert!(a_outputs.iter().any(|n| n.ends_with("_left.png")));
    assert!(a_outputs.iter().any(|n| n.ends_with("_center.png")));

    assert!(out.join("b/3_left.png").is_file());
    assert!(out.join("b/3_center.png").is_file());
}

#[tokio::test(flavor = "multi_thread")]
async fn every_eligible_file_is_consumed_exactly_once() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("root");
    let out = tmp.path().join("out");

    let n = 40u8;
    for i in 0..n {
        write_png(&root.join(format!("pack{}/{i:02}.png", i % 4)), i);
    }
    // Ineligible entries the filter must drop.
    std::fs::write(root.join("pack0/.hidden.png"), b"x").unwrap();
    std::fs::write(root.join("pack1/empty.png"), b"").unwrap();

    let mut config = base_config(&root, &out);
    config.processing.shuffle = true;
    config.processing.seed = Some(1);
    config.thumbnail.anchors = vec![Anchor::Center];
    config.thumbnail.flip_vertical = false;

    let summary = Processor::new(config).run().await.unwrap();

    assert_eq!(summary.discovered, n as u64);
    assert_eq!(summary.consumed(), n as u64);
    assert_eq!(summary.processed, n as u64);
    assert_eq!(summary.variants_written, n as u64);

    let outputs = walkdir::WalkDir::new(&out)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .count();
    assert_eq!(outputs, n as usize);
}

#[tokio::test(flavor = "multi_thread")]
async fn flip_enabled_writes_both_variants_per_anchor() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("root");
    let out = tmp.path().join("out");
    write_png(&root.join("pack/photo.png"), 42);

    let mut config = base_config(&root, &out);
    config.processing.shuffle = false;
    config.thumbnail.anchors = vec![Anchor::Left, Anchor::Right, Anchor::Center];
    config.thumbnail.flip_vertical = true;

    let summary = Processor::new(config).run().await.unwrap();
    assert_eq!(summary.variants_written, 6);

    for name in [
        "photo_left.png",
        "photo_left_flipped.png",
        "photo_center.png",
        "photo_center_flipped.png",
        "photo_right.png",
        "photo_right_flipped.png",
    ] {
        assert!(out.join("pack").join(name).is_file(), "missing {name}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn dedup_disabled_processes_identical_copies() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("root");
    let out = tmp.path().join("out");
    write_png(&root.join("a/1.png"), 10);
    std::fs::copy(root.join("a/1.png"), root.join("a/2.png")).unwrap();

    let mut config = base_config(&root, &out);
    config.processing.dedup = false;
    config.processing.shuffle = false;
    config.thumbnail.anchors = vec![Anchor::Center];
    config.thumbnail.flip_vertical = false;

    let summary = Processor::new(config).run().await.unwrap();
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.duplicates, 0);
    assert!(out.join("a/1_center.png").is_file());
    assert!(out.join("a/2_center.png").is_file());
}

#[tokio::test(flavor = "multi_thread")]
async fn bad_files_are_skipped_and_the_run_still_completes() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("root");
    let out = tmp.path().join("out");
    write_png(&root.join("a/good.png"), 5);
    std::fs::write(root.join("a/truncated.png"), b"\x89PNG\r\n\x1a\nbroken").unwrap();

    let mut config = base_config(&root, &out);
    config.processing.shuffle = false;
    config.thumbnail.anchors = vec![Anchor::Center];
    config.thumbnail.flip_vertical = false;

    let summary = Processor::new(config).run().await.unwrap();
    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);
    assert!(out.join("a/good_center.png").is_file());
}
