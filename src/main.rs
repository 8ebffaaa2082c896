// 该文件是 Qiangjian （墙检） 项目的一部分。
// src/main.rs - 项目主程序
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use anyhow::Result;
use clap::Parser;

use qiangjian::args::Args;
use qiangjian::detector::YoloDetector;
use qiangjian::input::resolve_images;
use qiangjian::output::create_output_writers;
use qiangjian::task::run_batch;

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  println!("Qiangjian 墙体检测");
  println!("==================");
  println!("模型文件路径: {}", args.model);
  println!("输入来源: {}", args.input);
  println!("记录文件: {}", args.output);
  println!("标注图片目录: {}", args.output_dir);
  println!("置信度阈值: {}", args.confidence);
  println!("NMS 阈值: {}", args.nms_threshold);
  println!();

  // 创建 YOLO 检测器
  println!("正在加载模型...");
  let mut detector = YoloDetector::new(&args.model, args.confidence, args.nms_threshold)?;
  println!("模型加载完成");

  // 解析输入
  let images = resolve_images(&args.input)?;
  println!("共 {} 张待处理图片", images.len());

  // 创建输出写入器
  let mut writers = create_output_writers(&args.output_dir, &args.output);

  // 处理图片
  println!();
  println!("开始处理...");
  let summary = run_batch(&mut detector, &images, &mut writers)?;

  println!();
  println!("处理完成!");
  println!("总图片数: {}", summary.images);
  println!("总检测数: {}", summary.detections);
  println!("记录文件: {}", args.output);

  Ok(())
}
