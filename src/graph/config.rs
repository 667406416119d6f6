use serde::Serialize;
use std::collections::BTreeMap;

use crate::orientation::{OrientationState, ResolvedOrientation};
use crate::settings::types::ModelComplexity;

pub const INPUT_ROTATION: &str = "input_rotation";
pub const INPUT_HORIZONTALLY_FLIPPED: &str = "input_horizontally_flipped";
pub const INPUT_VERTICALLY_FLIPPED: &str = "input_vertically_flipped";
pub const OUTPUT_ROTATION: &str = "output_rotation";
pub const OUTPUT_HORIZONTALLY_FLIPPED: &str = "output_horizontally_flipped";
pub const OUTPUT_VERTICALLY_FLIPPED: &str = "output_vertically_flipped";
pub const MODEL_COMPLEXITY: &str = "model_complexity";
pub const SMOOTH_LANDMARKS: &str = "smooth_landmarks";
pub const ENABLE_SEGMENTATION: &str = "enable_segmentation";
pub const SMOOTH_SEGMENTATION: &str = "smooth_segmentation";

/// A single side-packet value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Int(i32),
    Bool(bool),
}

/// Feature passthroughs that travel next to the orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureToggles {
    pub model_complexity: ModelComplexity,
    pub smooth_landmarks: bool,
    pub enable_segmentation: bool,
    pub smooth_segmentation: bool,
}

/// Named scalar values handed to the graph when a run starts.
///
/// Built once per session and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PipelineConfiguration {
    values: BTreeMap<&'static str, ConfigValue>,
}

impl PipelineConfiguration {
    pub fn new(orientation: &ResolvedOrientation, features: FeatureToggles) -> Self {
        let mut values = BTreeMap::new();
        let mut put_stage = |keys: [&'static str; 3], state: &OrientationState| {
            values.insert(keys[0], ConfigValue::Int(state.rotation.degrees()));
            values.insert(keys[1], ConfigValue::Bool(state.horizontally_flipped));
            values.insert(keys[2], ConfigValue::Bool(state.vertically_flipped));
        };
        put_stage(
            [
                INPUT_ROTATION,
                INPUT_HORIZONTALLY_FLIPPED,
                INPUT_VERTICALLY_FLIPPED,
            ],
            &orientation.input,
        );
        put_stage(
            [
                OUTPUT_ROTATION,
                OUTPUT_HORIZONTALLY_FLIPPED,
                OUTPUT_VERTICALLY_FLIPPED,
            ],
            &orientation.output,
        );

        values.insert(
            MODEL_COMPLEXITY,
            ConfigValue::Int(features.model_complexity.as_i32()),
        );
        values.insert(SMOOTH_LANDMARKS, ConfigValue::Bool(features.smooth_landmarks));
        values.insert(
            ENABLE_SEGMENTATION,
            ConfigValue::Bool(features.enable_segmentation),
        );
        values.insert(
            SMOOTH_SEGMENTATION,
            ConfigValue::Bool(features.smooth_segmentation),
        );

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        self.values.get(key).copied()
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            ConfigValue::Int(v) => Some(v),
            ConfigValue::Bool(_) => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            ConfigValue::Bool(v) => Some(v),
            ConfigValue::Int(_) => None,
        }
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, ConfigValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Compact JSON object of every entry.
    pub fn to_json(&self) -> String {
        // String keys and scalar values: serialisation cannot fail.
        serde_json::to_string(&self.values).unwrap_or_default()
    }
}
