// 该文件是 Qiangjian （墙检） 项目的一部分。
// tests/pipeline.rs - 批处理流水线集成测试
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::Path;

use anyhow::Result;
use image::{Rgb, RgbImage};

use qiangjian::detector::{Detection, Detector};
use qiangjian::input::resolve_images;
use qiangjian::output::create_output_writers;
use qiangjian::task::run_batch;

/// 按调用顺序返回预设结果的桩检测器
struct StubDetector {
  results: Vec<Vec<Detection>>,
  calls: usize,
}

impl StubDetector {
  fn new(results: Vec<Vec<Detection>>) -> Self {
    Self { results, calls: 0 }
  }
}

impl Detector for StubDetector {
  fn detect(&mut self, _image: &RgbImage) -> Result<Vec<Detection>> {
    let result = self.results.get(self.calls).cloned().unwrap_or_default();
    self.calls += 1;
    Ok(result)
  }
}

fn detection(x1: f32, y1: f32, x2: f32, y2: f32) -> Detection {
  Detection {
    x1,
    y1,
    x2,
    y2,
    confidence: 0.9,
  }
}

fn save_plan(dir: &Path, name: &str, width: u32, height: u32) {
  let image = RgbImage::from_pixel(width, height, Rgb([240, 240, 240]));
  image.save(dir.join(name)).unwrap();
}

#[test]
fn directory_batch_appends_one_block_per_image() {
  let dir = tempfile::tempdir().unwrap();
  let plans = dir.path().join("plans");
  std::fs::create_dir(&plans).unwrap();
  save_plan(&plans, "a.png", 64, 64);
  save_plan(&plans, "b.png", 64, 64);

  let record_path = dir.path().join("walls.json");
  let out_dir = dir.path().join("annotated");

  let images = resolve_images(plans.to_str().unwrap()).unwrap();
  let mut detector = StubDetector::new(vec![
    vec![
      detection(10.5, 20.0, 110.25, 220.75),
      detection(1.0, 2.0, 3.0, 4.0),
    ],
    vec![],
  ]);
  let mut writers = create_output_writers(out_dir.to_str().unwrap(), record_path.to_str().unwrap());

  let summary = run_batch(&mut detector, &images, &mut writers).unwrap();
  assert_eq!(summary.images, 2);
  assert_eq!(summary.detections, 2);

  let expected = concat!(
    "{\n",
    "\"meta\":{\"source\": \"a.png\"},\n",
    "\"walls:[\n",
    "{\"id\":\"w1\",\"points\":[[10.5,20.0],[110.25,220.75]]},\n",
    "{\"id\":\"w2\",\"points\":[[1.0,2.0],[3.0,4.0]]}\n",
    "]\n",
    "}\n",
    "{\n",
    "\"meta\":{\"source\": \"b.png\"},\n",
    "\"walls:[\n",
    "}\n",
  );
  let content = std::fs::read_to_string(&record_path).unwrap();
  assert_eq!(content, expected);
}

#[test]
fn annotated_images_keep_source_dimensions() {
  let dir = tempfile::tempdir().unwrap();
  let plans = dir.path().join("plans");
  std::fs::create_dir(&plans).unwrap();
  save_plan(&plans, "floor1.jpg", 80, 50);

  let record_path = dir.path().join("walls.json");
  let out_dir = dir.path().join("annotated");

  let images = resolve_images(plans.to_str().unwrap()).unwrap();
  let mut detector = StubDetector::new(vec![vec![detection(5.0, 5.0, 25.0, 25.0)]]);
  let mut writers = create_output_writers(out_dir.to_str().unwrap(), record_path.to_str().unwrap());

  run_batch(&mut detector, &images, &mut writers).unwrap();

  let annotated = image::open(out_dir.join("floor1_with_boxes.jpg"))
    .unwrap()
    .to_rgb8();
  assert_eq!(annotated.dimensions(), (80, 50));
}

#[test]
fn directory_without_images_produces_no_output() {
  let dir = tempfile::tempdir().unwrap();
  let plans = dir.path().join("plans");
  std::fs::create_dir(&plans).unwrap();
  std::fs::write(plans.join("notes.txt"), b"no plans here").unwrap();

  let record_path = dir.path().join("walls.json");
  let out_dir = dir.path().join("annotated");

  let images = resolve_images(plans.to_str().unwrap()).unwrap();
  assert!(images.is_empty());

  let mut detector = StubDetector::new(vec![]);
  let mut writers = create_output_writers(out_dir.to_str().unwrap(), record_path.to_str().unwrap());

  let summary = run_batch(&mut detector, &images, &mut writers).unwrap();
  assert_eq!(summary.images, 0);

  assert!(!record_path.exists());
  assert!(!out_dir.exists());
}

#[test]
fn second_run_appends_to_existing_record() {
  let dir = tempfile::tempdir().unwrap();
  let plans = dir.path().join("plans");
  std::fs::create_dir(&plans).unwrap();
  save_plan(&plans, "a.png", 32, 32);

  let record_path = dir.path().join("walls.json");
  let out_dir = dir.path().join("annotated");
  let images = resolve_images(plans.to_str().unwrap()).unwrap();

  for _ in 0..2 {
    let mut detector = StubDetector::new(vec![vec![detection(1.0, 2.0, 3.0, 4.0)]]);
    let mut writers =
      create_output_writers(out_dir.to_str().unwrap(), record_path.to_str().unwrap());
    run_batch(&mut detector, &images, &mut writers).unwrap();
  }

  let content = std::fs::read_to_string(&record_path).unwrap();
  let blocks = content.matches("\"meta\":{\"source\": \"a.png\"}").count();
  assert_eq!(blocks, 2);
}
