// 该文件是 Qiangjian （墙检） 项目的一部分。
// src/output/mod.rs - 输出模块
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

mod annotated_image;
mod visualizer;
mod wall_record;

pub use annotated_image::AnnotatedImageOutput;
pub use visualizer::Visualizer;
pub use wall_record::WallRecordWriter;

use std::path::Path;

use anyhow::Result;
use image::RgbImage;

use crate::detector::Detection;

/// 输出写入器 trait
///
/// 每张处理完的图片依次交给各个写入器。
pub trait OutputWriter {
  /// 写入一张图片的检测结果
  fn write_image(
    &mut self,
    source: &Path,
    image: &RgbImage,
    detections: &[Detection],
  ) -> Result<()>;

  /// 完成写入
  fn finish(&mut self) -> Result<()> {
    Ok(())
  }
}

/// 创建输出写入器：标注图片 + 检测记录文件
pub fn create_output_writers(output_dir: &str, record_path: &str) -> Vec<Box<dyn OutputWriter>> {
  vec![
    Box::new(AnnotatedImageOutput::new(output_dir)),
    Box::new(WallRecordWriter::new(record_path)),
  ]
}
