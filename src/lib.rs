//! GridBox is a geometric post-processing library for anchor-grid object
//! detectors.
//!
//! It decodes raw network outputs (anchor-relative box offsets, objectness
//! and class probabilities) into image-space detections: decode, filter by
//! confidence, greedy non-maximum suppression, clip to image bounds. Every
//! stage is a pure function over borrowed inputs; optional batch
//! parallelism is available via the `rayon` feature.

mod candidate;
mod decode;
pub mod geometry;
mod pipeline;
pub mod tensor;
pub(crate) mod trace;
pub mod util;

pub use candidate::filter::{score_filter, ScoredCandidate};
pub use candidate::nms::nms;
pub use candidate::Detection;
pub use decode::decode_boxes;
pub use geometry::{clip_boxes, remap_boxes, PixelBox};
pub use pipeline::{postprocess, postprocess_batch, DetectConfig, RawPrediction, DEFAULT_NMS_IOU};
#[cfg(feature = "rayon")]
pub use pipeline::postprocess_batch_par;
pub use tensor::MatrixView;
pub use util::{GridBoxError, GridBoxResult};
