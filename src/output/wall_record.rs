// 该文件是 Qiangjian （墙检） 项目的一部分。
// src/output/wall_record.rs - 墙体检测记录输出
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::RgbImage;
use thiserror::Error;
use tracing::debug;

use super::OutputWriter;
use crate::detector::Detection;

#[derive(Error, Debug)]
pub enum WallRecordError {
  #[error("I/O 错误: {0}")]
  Io(#[from] std::io::Error),
}

/// 墙体检测记录输出
///
/// 每张图片向记录文件追加一个文本块，块内每面墙以 `w<序号>` 标记，
/// 记录其左上角与右下角像素坐标。文件按追加模式打开，不存在则创建，
/// 跨多次运行持续增长。
pub struct WallRecordWriter {
  /// 记录文件路径
  path: PathBuf,
}

impl WallRecordWriter {
  /// 创建一个新的记录输出
  pub fn new(path: &str) -> Self {
    Self {
      path: PathBuf::from(path),
    }
  }

  fn append_block(&self, image_name: &str, detections: &[Detection]) -> Result<(), WallRecordError> {
    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)?;
    write_block(&mut file, image_name, detections)?;
    debug!("追加检测记录: {}", self.path.display());
    Ok(())
  }
}

/// 写出一张图片的记录块
///
/// 注意两处字面格式约定，下游消费者依赖它们，不得修正:
/// - `"walls:[` 缺少闭合引号；
/// - 结果为空时不写 `]` 行，块直接以 `}` 收尾。
///
/// 坐标按 Debug 格式输出，始终带小数点，不做任何舍入。
pub(crate) fn write_block<W: Write>(
  out: &mut W,
  image_name: &str,
  detections: &[Detection],
) -> std::io::Result<()> {
  write!(out, "{{\n\"meta\":{{\"source\": \"{}\"}},\n\"walls:[\n", image_name)?;

  for (idx, det) in detections.iter().enumerate() {
    let terminator = if idx + 1 == detections.len() { "\n]" } else { "," };
    writeln!(
      out,
      "{{\"id\":\"w{}\",\"points\":[[{:?},{:?}],[{:?},{:?}]]}}{}",
      idx + 1,
      det.x1,
      det.y1,
      det.x2,
      det.y2,
      terminator
    )?;
  }

  writeln!(out, "}}")?;
  Ok(())
}

impl OutputWriter for WallRecordWriter {
  fn write_image(
    &mut self,
    source: &Path,
    _image: &RgbImage,
    detections: &[Detection],
  ) -> anyhow::Result<()> {
    let image_name = source
      .file_name()
      .map(|s| s.to_string_lossy().into_owned())
      .unwrap_or_default();
    self.append_block(&image_name, detections)?;
    Ok(())
  }
}
