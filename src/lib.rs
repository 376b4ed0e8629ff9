//! # bitstack — quantization and global-pooling layers on candle
//!
//! Thin layer primitives for binary networks, built on `candle-core` /
//! `candle-nn` graph construction. Each layer takes a predecessor, applies
//! one tensor operation, and records its output (and any trainable
//! parameter) in the append-only registries threaded through the chain:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`stack`] | `Layer` chain node, output/parameter registries, unique names |
//! | [`compat`] | `PrevLayer` shim for the deprecated `layer` argument |
//! | [`quantize`] | sign quantization with STE gradient routing |
//! | [`binary`] | `ScaleLayer`, `SignLayer` |
//! | [`pooling`] | `GlobalMeanPool{1,2,3}d`, `GlobalMaxPool{1,2,3}d` |
//! | [`config`] | serialisable `StackSpec`, `build_stack` |
//!
//! Autodiff, kernels, and device placement stay in candle; this crate is
//! bookkeeping around single-op construction calls.

pub mod binary;
pub mod compat;
pub mod config;
pub mod pooling;
pub mod quantize;
pub mod stack;

pub use binary::{ScaleLayer, SignLayer};
pub use compat::PrevLayer;
pub use config::{build_stack, LayerSpec, StackSpec};
pub use pooling::{
    GlobalMaxPool1d, GlobalMaxPool2d, GlobalMaxPool3d, GlobalMeanPool1d, GlobalMeanPool2d,
    GlobalMeanPool3d,
};
pub use quantize::{quantize, ste_sign};
pub use stack::Layer;
