use std::path::PathBuf;

use crate::graph::error::{GraphError, Result};
use crate::settings::types::ModelComplexity;

/// Person detector model, needed at every complexity.
pub const POSE_DETECTION_ASSET: &str = "pose_detection.bytes";

/// Source of model files for the graph.
pub trait AssetLoader: Send + Sync {
    /// Make `name` available locally and return its path.
    fn load(&self, name: &str) -> Result<PathBuf>;
}

/// Loads assets from a directory on disk.
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetLoader for DirectoryAssets {
    fn load(&self, name: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(GraphError::AssetUnavailable(format!(
                "{name} not found in {}",
                self.root.display()
            )))
        }
    }
}

/// Model files required for a complexity, detector first.
pub fn required_assets(complexity: ModelComplexity) -> [&'static str; 2] {
    [POSE_DETECTION_ASSET, complexity.landmark_asset()]
}

/// Load every model file for `complexity`.
pub fn prepare_assets(loader: &dyn AssetLoader, complexity: ModelComplexity) -> Result<Vec<PathBuf>> {
    required_assets(complexity)
        .iter()
        .map(|name| {
            let path = loader.load(name)?;
            tracing::debug!("asset {name} ready at {}", path.display());
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn asset_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), b"model").unwrap();
        }
        dir
    }

    #[test]
    fn required_assets_pair_detector_with_landmark_model() {
        assert_eq!(
            required_assets(ModelComplexity::Full),
            ["pose_detection.bytes", "pose_landmark_full.bytes"]
        );
    }

    #[test]
    fn prepare_resolves_paths_in_order() {
        let dir = asset_dir(&["pose_detection.bytes", "pose_landmark_heavy.bytes"]);
        let loader = DirectoryAssets::new(dir.path());

        let paths = prepare_assets(&loader, ModelComplexity::Heavy).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("pose_detection.bytes"));
        assert!(paths[1].ends_with("pose_landmark_heavy.bytes"));
    }

    #[test]
    fn prepare_fails_on_missing_landmark_model() {
        let dir = asset_dir(&["pose_detection.bytes", "pose_landmark_lite.bytes"]);
        let loader = DirectoryAssets::new(dir.path());

        let err = prepare_assets(&loader, ModelComplexity::Full).unwrap_err();
        match err {
            GraphError::AssetUnavailable(msg) => assert!(msg.contains("pose_landmark_full")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn directory_is_not_an_asset() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("pose_detection.bytes")).unwrap();
        let loader = DirectoryAssets::new(dir.path());
        assert!(loader.load(POSE_DETECTION_ASSET).is_err());
    }
}
