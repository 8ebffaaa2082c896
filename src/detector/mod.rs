// 该文件是 Qiangjian （墙检） 项目的一部分。
// src/detector/mod.rs - 检测器模块
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

mod yolo;

pub use yolo::YoloDetector;

use anyhow::Result;
use image::RgbImage;

/// 检测结果
///
/// 边界框以原图像素坐标表示，(x1, y1) 为左上角，(x2, y2) 为右下角。
#[derive(Clone, Debug)]
pub struct Detection {
  /// 左上角 x 坐标
  pub x1: f32,
  /// 左上角 y 坐标
  pub y1: f32,
  /// 右下角 x 坐标
  pub x2: f32,
  /// 右下角 y 坐标
  pub y2: f32,
  /// 置信度
  pub confidence: f32,
}

impl Detection {
  pub fn width(&self) -> f32 {
    self.x2 - self.x1
  }

  pub fn height(&self) -> f32 {
    self.y2 - self.y1
  }

  /// 计算两个边界框的 IoU
  pub fn iou(&self, other: &Detection) -> f32 {
    let x1 = self.x1.max(other.x1);
    let y1 = self.y1.max(other.y1);
    let x2 = self.x2.min(other.x2);
    let y2 = self.y2.min(other.y2);

    let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    let union = self.width() * self.height() + other.width() * other.height() - intersection;

    if union > 0.0 {
      intersection / union
    } else {
      0.0
    }
  }
}

/// 检测器 trait
///
/// 对一张图片运行推理，按检测顺序返回墙体边界框。
pub trait Detector {
  fn detect(&mut self, image: &RgbImage) -> Result<Vec<Detection>>;
}
