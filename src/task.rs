// 该文件是 Qiangjian （墙检） 项目的一部分。
// src/task.rs - 批处理任务
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::detector::Detector;
use crate::input;
use crate::output::OutputWriter;

/// 任务运行结果统计
#[derive(Debug, Default)]
pub struct RunSummary {
  /// 已处理图片数
  pub images: usize,
  /// 检测到的墙体总数
  pub detections: usize,
}

/// 顺序处理图片列表
///
/// 每张图片依次完成加载、推理与全部输出写入，然后才处理下一张。
/// 任何一步失败都会中止整个批次，错误向上传播。
pub fn run_batch(
  detector: &mut dyn Detector,
  images: &[PathBuf],
  writers: &mut [Box<dyn OutputWriter>],
) -> Result<RunSummary> {
  let mut summary = RunSummary::default();

  for path in images {
    info!("处理图片: {}", path.display());

    let image = input::load_image(path)?;

    let now = std::time::Instant::now();
    let detections = detector.detect(&image)?;
    info!(
      "检测到 {} 面墙，耗时: {:.2?}",
      detections.len(),
      now.elapsed()
    );

    for writer in writers.iter_mut() {
      writer.write_image(path, &image, &detections)?;
    }

    summary.images += 1;
    summary.detections += detections.len();
  }

  for writer in writers.iter_mut() {
    writer.finish()?;
  }

  Ok(summary)
}
