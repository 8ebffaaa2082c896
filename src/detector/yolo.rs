// 该文件是 Qiangjian （墙检） 项目的一部分。
// src/detector/yolo.rs - YOLO 墙体检测器
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use anyhow::{Context, Result, bail};
use image::RgbImage;
use image::imageops::FilterType;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Tensor;
use tracing::debug;

use super::{Detection, Detector};

/// 模型输入宽度
const YOLO_INPUT_W: u32 = 640;
/// 模型输入高度
const YOLO_INPUT_H: u32 = 640;
/// 模型输入张量名称（ultralytics 导出的默认名称）
const YOLO_INPUT_NAME: &str = "images";
/// 模型输出张量名称
const YOLO_OUTPUT_NAME: &str = "output0";

/// YOLO 墙体检测器
///
/// 加载 ONNX 格式的预训练模型，对单张图片进行推理。
/// 输出布局为 [1, 4 + 类别数, 候选框数]，每个候选框为
/// (cx, cy, w, h) 加各类别分数。
pub struct YoloDetector {
  /// ONNX Runtime 会话
  session: Session,
  /// 置信度阈值
  confidence_threshold: f32,
  /// NMS IOU 阈值
  nms_threshold: f32,
}

impl YoloDetector {
  /// 创建一个新的 YOLO 检测器
  pub fn new(model_path: &str, confidence_threshold: f32, nms_threshold: f32) -> Result<Self> {
    let session = Session::builder()
      .context("无法创建 ONNX Runtime 会话")?
      .with_optimization_level(GraphOptimizationLevel::Level3)
      .context("无法设置图优化级别")?
      .with_intra_threads(4)
      .context("无法设置线程数")?
      .commit_from_file(model_path)
      .with_context(|| format!("无法加载模型: {}", model_path))?;

    Ok(Self {
      session,
      confidence_threshold,
      nms_threshold,
    })
  }

  /// 预处理：缩放到模型输入尺寸，转为 NCHW 归一化张量
  fn preprocess(&self, image: &RgbImage) -> Result<Tensor<f32>> {
    let resized = image::imageops::resize(image, YOLO_INPUT_W, YOLO_INPUT_H, FilterType::Triangle);
    let raw = resized.as_raw();

    let size = (YOLO_INPUT_W * YOLO_INPUT_H) as usize;
    let mut tensor_data = vec![0f32; 3 * size];

    for idx in 0..size {
      tensor_data[idx] = raw[idx * 3] as f32 / 255.0;
      tensor_data[size + idx] = raw[idx * 3 + 1] as f32 / 255.0;
      tensor_data[2 * size + idx] = raw[idx * 3 + 2] as f32 / 255.0;
    }

    let shape = [1usize, 3, YOLO_INPUT_H as usize, YOLO_INPUT_W as usize];
    Tensor::from_array((shape, tensor_data.into_boxed_slice())).context("无法创建输入张量")
  }

  /// 后处理：过滤低置信度候选框，缩放回原图坐标，应用 NMS
  fn postprocess(
    &self,
    shape: &[i64],
    data: &[f32],
    original_width: f32,
    original_height: f32,
  ) -> Result<Vec<Detection>> {
    if shape.len() != 3 || shape[1] < 5 {
      bail!("模型输出形状异常: {:?}", shape);
    }

    let num_classes = shape[1] as usize - 4;
    let num_proposals = shape[2] as usize;

    let scale_x = original_width / YOLO_INPUT_W as f32;
    let scale_y = original_height / YOLO_INPUT_H as f32;

    let mut candidates = Vec::new();

    for i in 0..num_proposals {
      // 数据按行主序存储: [cx, cy, w, h, 类别0分数, 类别1分数, ...]
      let cx = data[i];
      let cy = data[num_proposals + i];
      let w = data[2 * num_proposals + i];
      let h = data[3 * num_proposals + i];

      let mut confidence = 0f32;
      for c in 0..num_classes {
        let score = data[(4 + c) * num_proposals + i];
        if score > confidence {
          confidence = score;
        }
      }

      if confidence < self.confidence_threshold {
        continue;
      }

      // (cx, cy, w, h) 转为角点坐标并缩放回原图尺寸
      let x1 = (cx - w / 2.0) * scale_x;
      let y1 = (cy - h / 2.0) * scale_y;
      let x2 = (cx + w / 2.0) * scale_x;
      let y2 = (cy + h / 2.0) * scale_y;

      candidates.push(Detection {
        x1: x1.max(0.0),
        y1: y1.max(0.0),
        x2: x2.min(original_width),
        y2: y2.min(original_height),
        confidence,
      });
    }

    Ok(nms(candidates, self.nms_threshold))
  }
}

impl Detector for YoloDetector {
  fn detect(&mut self, image: &RgbImage) -> Result<Vec<Detection>> {
    let (original_width, original_height) = (image.width() as f32, image.height() as f32);

    let input = self.preprocess(image)?;

    let now = std::time::Instant::now();
    let outputs = self
      .session
      .run(ort::inputs![YOLO_INPUT_NAME => input])
      .context("模型推理失败")?;
    debug!("推理耗时: {:.2?}", now.elapsed());

    let (shape, data) = outputs[YOLO_OUTPUT_NAME]
      .try_extract_tensor::<f32>()
      .context("无法提取输出张量")?;
    let (shape, data) = (shape.to_vec(), data.to_vec());
    drop(outputs);

    self.postprocess(&shape, &data, original_width, original_height)
  }
}

/// 非极大值抑制
fn nms(mut detections: Vec<Detection>, nms_threshold: f32) -> Vec<Detection> {
  // 按置信度降序排序
  detections.sort_by(|a, b| {
    b.confidence
      .partial_cmp(&a.confidence)
      .unwrap_or(std::cmp::Ordering::Equal)
  });

  let mut result = Vec::new();

  while !detections.is_empty() {
    let best = detections.remove(0);
    detections.retain(|det| best.iou(det) < nms_threshold);
    result.push(best);
  }

  result
}
