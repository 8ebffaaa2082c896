// 该文件是 Qiangjian （墙检） 项目的一部分。
// src/input/mod.rs - 输入解析模块
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::PathBuf;

use anyhow::{Context, Result};
use image::{ImageReader, RgbImage};

/// 将输入来源解析为待处理的图片路径列表
///
/// 以 `.jpg` 或 `.png` 结尾的来源视为单张图片，否则视为目录，
/// 取其中文件名包含 `.jpg` 或 `.png` 的条目。
/// 目录条目的系统顺序与平台有关，这里按字典序排序保证结果稳定。
pub fn resolve_images(source: &str) -> Result<Vec<PathBuf>> {
  let lower = source.to_lowercase();
  if lower.ends_with(".jpg") || lower.ends_with(".png") {
    return Ok(vec![PathBuf::from(source)]);
  }

  let mut paths = Vec::new();
  for entry in std::fs::read_dir(source).with_context(|| format!("无法读取目录: {}", source))? {
    let entry = entry.with_context(|| format!("无法读取目录条目: {}", source))?;
    let name = entry.file_name().to_string_lossy().into_owned();
    if name.contains(".jpg") || name.contains(".png") {
      paths.push(entry.path());
    }
  }
  paths.sort();

  Ok(paths)
}

/// 加载一张图片并转为 RGB
pub fn load_image(path: &std::path::Path) -> Result<RgbImage> {
  let image = ImageReader::open(path)
    .with_context(|| format!("无法打开图片文件: {}", path.display()))?
    .decode()
    .with_context(|| format!("无法解码图片文件: {}", path.display()))?
    .to_rgb8();

  Ok(image)
}
