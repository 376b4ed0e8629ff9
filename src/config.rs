//! Serialisable stack descriptions.
//!
//! A [`StackSpec`] is a JSON-friendly list of layer constructions that can
//! be replayed onto an input with [`build_stack`]. Every field has a serde
//! default matching the layer's default argument, so a minimal spec like
//! `[{"type": "sign"}]` is valid.

use std::path::Path;

use candle_core::Result;
use candle_nn::VarBuilder;
use serde::{Deserialize, Serialize};

use crate::binary::{ScaleLayer, SignLayer, DEFAULT_INIT_SCALE};
use crate::pooling::{
    GlobalMaxPool1d, GlobalMaxPool2d, GlobalMaxPool3d, GlobalMeanPool1d, GlobalMeanPool2d,
    GlobalMeanPool3d,
};
use crate::stack::Layer;

/// One layer construction, tagged by layer type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSpec {
    Scale {
        #[serde(default = "default_init_scale")]
        init_scale: f64,
        #[serde(default = "default_scale_name")]
        name: String,
    },
    Sign {
        #[serde(default = "default_sign_name")]
        name: String,
    },
    GlobalMeanPool1d {
        #[serde(default = "default_gmp1d_name")]
        name: String,
    },
    GlobalMeanPool2d {
        #[serde(default = "default_gmp2d_name")]
        name: String,
    },
    GlobalMeanPool3d {
        #[serde(default = "default_gmp3d_name")]
        name: String,
    },
    GlobalMaxPool1d {
        #[serde(default = "default_gxp1d_name")]
        name: String,
    },
    GlobalMaxPool2d {
        #[serde(default = "default_gxp2d_name")]
        name: String,
    },
    GlobalMaxPool3d {
        #[serde(default = "default_gxp3d_name")]
        name: String,
    },
}

fn default_init_scale() -> f64 {
    DEFAULT_INIT_SCALE
}
fn default_scale_name() -> String {
    "scale".to_string()
}
fn default_sign_name() -> String {
    "sign".to_string()
}
fn default_gmp1d_name() -> String {
    "globalmeanpool1d".to_string()
}
fn default_gmp2d_name() -> String {
    "globalmeanpool2d".to_string()
}
fn default_gmp3d_name() -> String {
    "globalmeanpool3d".to_string()
}
fn default_gxp1d_name() -> String {
    "globalmaxpool1d".to_string()
}
fn default_gxp2d_name() -> String {
    "globalmaxpool2d".to_string()
}
fn default_gxp3d_name() -> String {
    "globalmaxpool3d".to_string()
}

/// An ordered list of layer constructions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackSpec {
    pub layers: Vec<LayerSpec>,
}

impl StackSpec {
    /// Save the spec to a JSON file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a spec from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let spec = serde_json::from_str(&json)?;
        Ok(spec)
    }
}

/// Replay `spec` onto `input`, returning the final node of the chain.
///
/// Trainable parameters are allocated under `vb`, scoped by layer name.
pub fn build_stack(input: Layer, spec: &StackSpec, vb: VarBuilder) -> Result<Layer> {
    let mut layer = input;
    for entry in &spec.layers {
        layer = match entry {
            LayerSpec::Scale { init_scale, name } => {
                ScaleLayer::new(&layer, *init_scale, name, vb.clone())?.into_layer()
            }
            LayerSpec::Sign { name } => SignLayer::new(&layer, name)?.into_layer(),
            LayerSpec::GlobalMeanPool1d { name } => {
                GlobalMeanPool1d::new(&layer, name)?.into_layer()
            }
            LayerSpec::GlobalMeanPool2d { name } => {
                GlobalMeanPool2d::new(&layer, name)?.into_layer()
            }
            LayerSpec::GlobalMeanPool3d { name } => {
                GlobalMeanPool3d::new(&layer, name)?.into_layer()
            }
            LayerSpec::GlobalMaxPool1d { name } => GlobalMaxPool1d::new(&layer, name)?.into_layer(),
            LayerSpec::GlobalMaxPool2d { name } => GlobalMaxPool2d::new(&layer, name)?.into_layer(),
            LayerSpec::GlobalMaxPool3d { name } => GlobalMaxPool3d::new(&layer, name)?.into_layer(),
        };
    }
    Ok(layer)
}
