// 该文件是 Qiangjian （墙检） 项目的一部分。
// src/args.rs - 项目参数配置
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use clap::Parser;

/// Qiangjian 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// ONNX 模型文件路径
  #[arg(long, value_name = "FILE")]
  pub model: String,

  /// 输入来源（单张图片或包含图片的目录）
  /// 支持格式: *.jpg, *.png
  #[arg(long, value_name = "SOURCE")]
  pub input: String,

  /// 检测结果记录文件路径（追加写入）
  #[arg(long, value_name = "OUTPUT")]
  pub output: String,

  /// 标注图片输出目录
  #[arg(long, default_value = "output_images", value_name = "DIR")]
  pub output_dir: String,

  /// 置信度阈值 (0.0 - 1.0)
  #[arg(long, default_value = "0.5", value_name = "THRESHOLD")]
  pub confidence: f32,

  /// NMS IOU 阈值 (0.0 - 1.0)
  #[arg(long, default_value = "0.45", value_name = "THRESHOLD")]
  pub nms_threshold: f32,
}
