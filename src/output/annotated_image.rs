// 该文件是 Qiangjian （墙检） 项目的一部分。
// src/output/annotated_image.rs - 标注图片输出
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbImage;
use tracing::debug;

use super::{OutputWriter, Visualizer};
use crate::detector::Detection;

/// 标注图片输出
///
/// 将检测框绘制到原图副本上，以 `<原文件名主干>_with_boxes.jpg`
/// 保存到输出目录，同名文件会被覆盖。
pub struct AnnotatedImageOutput {
  /// 输出目录
  output_dir: PathBuf,
  /// 可视化工具
  visualizer: Visualizer,
}

impl AnnotatedImageOutput {
  /// 创建一个新的标注图片输出
  pub fn new(output_dir: &str) -> Self {
    Self {
      output_dir: PathBuf::from(output_dir),
      visualizer: Visualizer::new(),
    }
  }

  fn output_path(&self, source: &Path) -> PathBuf {
    let stem = source
      .file_stem()
      .map(|s| s.to_string_lossy().into_owned())
      .unwrap_or_default();
    self.output_dir.join(format!("{}_with_boxes.jpg", stem))
  }
}

impl OutputWriter for AnnotatedImageOutput {
  fn write_image(
    &mut self,
    source: &Path,
    image: &RgbImage,
    detections: &[Detection],
  ) -> Result<()> {
    std::fs::create_dir_all(&self.output_dir)
      .with_context(|| format!("无法创建输出目录: {}", self.output_dir.display()))?;

    let mut annotated = image.clone();
    self.visualizer.draw_detections(&mut annotated, detections);

    let path = self.output_path(source);
    annotated
      .save(&path)
      .with_context(|| format!("无法保存图片: {}", path.display()))?;
    debug!("保存标注图片: {}", path.display());

    Ok(())
  }
}
