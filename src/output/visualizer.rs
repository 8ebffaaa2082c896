// 该文件是 Qiangjian （墙检） 项目的一部分。
// src/output/visualizer.rs - 可视化模块
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::detector::Detection;

/// 边框颜色（蓝色）
const BOX_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

/// 可视化工具
///
/// 在图像上以固定颜色、2 像素宽的空心矩形绘制检测框。
pub struct Visualizer {
  color: Rgb<u8>,
}

impl Default for Visualizer {
  fn default() -> Self {
    Self::new()
  }
}

impl Visualizer {
  /// 创建一个新的可视化工具
  pub fn new() -> Self {
    Self { color: BOX_COLOR }
  }

  /// 在图像上绘制检测结果
  pub fn draw_detections(&self, image: &mut RgbImage, detections: &[Detection]) {
    for detection in detections {
      let x = detection.x1.max(0.0) as i32;
      let y = detection.y1.max(0.0) as i32;
      let width = (detection.x2.min(image.width() as f32) - detection.x1.max(0.0)) as u32;
      let height = (detection.y2.min(image.height() as f32) - detection.y1.max(0.0)) as u32;

      if width == 0 || height == 0 {
        continue;
      }

      let rect = Rect::at(x, y).of_size(width, height);
      draw_hollow_rect_mut(image, rect, self.color);

      // 加粗为 2 像素
      if width > 2 && height > 2 {
        let inner_rect = Rect::at(x + 1, y + 1).of_size(width - 2, height - 2);
        draw_hollow_rect_mut(image, inner_rect, self.color);
      }
    }
  }
}
