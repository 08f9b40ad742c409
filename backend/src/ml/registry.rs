//! Loading and serving the trained classifier bundles

use std::fs;

use serde::{Deserialize, Serialize};

use crate::config::ModelsConfig;
use crate::error::{AppError, AppResult};
use crate::ml::{Ensemble, LabelEncoder};

/// Crop recommendation bundle. Features are numeric: nitrogen,
/// phosphorus, potassium, pH (in that order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropArtifacts {
    pub model: Ensemble,
    pub target: LabelEncoder,
}

/// Crop rotation bundle with one encoder per categorical feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationArtifacts {
    pub model: Ensemble,
    pub last_crop: LabelEncoder,
    pub soil_type: LabelEncoder,
    pub season: LabelEncoder,
    pub target: LabelEncoder,
}

/// Soil health bundle. Features: pH, organic matter, N, P, K.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilArtifacts {
    pub model: Ensemble,
    pub target: LabelEncoder,
}

/// All model artifacts, loaded once at startup.
pub struct ModelRegistry {
    crop: CropArtifacts,
    rotation: RotationArtifacts,
    soil: SoilArtifacts,
}

impl ModelRegistry {
    /// Load every artifact bundle from disk. A missing or malformed
    /// bundle aborts startup rather than failing per-request.
    pub fn load(config: &ModelsConfig) -> AppResult<Self> {
        Ok(Self {
            crop: read_bundle(&config.crop_path)?,
            rotation: read_bundle(&config.rotation_path)?,
            soil: read_bundle(&config.soil_path)?,
        })
    }

    /// Assemble a registry from in-memory artifacts, for the trainer and
    /// for tests.
    pub fn from_artifacts(
        crop: CropArtifacts,
        rotation: RotationArtifacts,
        soil: SoilArtifacts,
    ) -> Self {
        Self {
            crop,
            rotation,
            soil,
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "crop ({} classes), rotation ({} classes), soil ({} classes)",
            self.crop.target.len(),
            self.rotation.target.len(),
            self.soil.target.len()
        )
    }

    /// Recommend a crop from soil nutrient levels and pH.
    pub fn recommend_crop(
        &self,
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        ph: f64,
    ) -> AppResult<String> {
        let features = [nitrogen, phosphorus, potassium, ph];
        let class = self.crop.model.predict(&features);
        Ok(self.crop.target.inverse_transform(class)?.to_string())
    }

    /// Recommend the next crop in a rotation from the previous crop,
    /// soil type, and season.
    pub fn recommend_rotation(
        &self,
        last_crop: &str,
        soil_type: &str,
        season: &str,
    ) -> AppResult<String> {
        let features = [
            self.rotation.last_crop.transform("last crop", last_crop)? as f64,
            self.rotation.soil_type.transform("soil type", soil_type)? as f64,
            self.rotation.season.transform("season", season)? as f64,
        ];
        let class = self.rotation.model.predict(&features);
        Ok(self.rotation.target.inverse_transform(class)?.to_string())
    }

    /// Classify soil health from chemical measurements.
    pub fn classify_soil_health(
        &self,
        ph: f64,
        organic_matter: f64,
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
    ) -> AppResult<String> {
        let features = [ph, organic_matter, nitrogen, phosphorus, potassium];
        let class = self.soil.model.predict(&features);
        Ok(self.soil.target.inverse_transform(class)?.to_string())
    }
}

fn read_bundle<T: serde::de::DeserializeOwned>(path: &str) -> AppResult<T> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Configuration(format!("cannot read model {}: {}", path, e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Configuration(format!("cannot parse model {}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::tree::{DecisionTree, TreeParams};

    fn tiny_ensemble(samples: &[Vec<f64>], labels: &[usize], n_classes: usize) -> Ensemble {
        let tree = DecisionTree::fit(samples, labels, n_classes, TreeParams::default());
        Ensemble::new(vec![tree], n_classes)
    }

    fn registry() -> ModelRegistry {
        // Crop: low pH -> rice, high pH -> wheat.
        let crop_samples = vec![
            vec![90.0, 40.0, 40.0, 5.5],
            vec![85.0, 45.0, 35.0, 5.8],
            vec![60.0, 30.0, 20.0, 7.2],
            vec![55.0, 35.0, 25.0, 7.5],
        ];
        let crop_target = LabelEncoder::fit(["rice", "rice", "wheat", "wheat"]);
        let crop_labels: Vec<usize> = ["rice", "rice", "wheat", "wheat"]
            .iter()
            .map(|c| crop_target.transform("crop", c).unwrap())
            .collect();
        let crop = CropArtifacts {
            model: tiny_ensemble(&crop_samples, &crop_labels, crop_target.len()),
            target: crop_target,
        };

        let last_crop = LabelEncoder::fit(["rice", "wheat"]);
        let soil_type = LabelEncoder::fit(["clay", "loam"]);
        let season = LabelEncoder::fit(["kharif", "rabi"]);
        let rotation_target = LabelEncoder::fit(["maize", "peas"]);
        let rotation_samples = vec![
            vec![0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ];
        let rotation_labels = vec![0, 0, 1, 1];
        let rotation = RotationArtifacts {
            model: tiny_ensemble(&rotation_samples, &rotation_labels, rotation_target.len()),
            last_crop,
            soil_type,
            season,
            target: rotation_target,
        };

        let soil_target = LabelEncoder::fit(["good", "poor"]);
        let soil_samples = vec![
            vec![6.5, 3.0, 90.0, 40.0, 160.0],
            vec![6.8, 2.5, 85.0, 35.0, 170.0],
            vec![4.5, 0.2, 20.0, 5.0, 40.0],
            vec![4.8, 0.3, 25.0, 8.0, 50.0],
        ];
        let soil_labels = vec![0, 0, 1, 1];
        let soil = SoilArtifacts {
            model: tiny_ensemble(&soil_samples, &soil_labels, soil_target.len()),
            target: soil_target,
        };

        ModelRegistry::from_artifacts(crop, rotation, soil)
    }

    #[test]
    fn crop_recommendation_uses_nutrient_features() {
        let registry = registry();
        assert_eq!(
            registry.recommend_crop(88.0, 42.0, 38.0, 5.6).unwrap(),
            "rice"
        );
        assert_eq!(
            registry.recommend_crop(58.0, 32.0, 22.0, 7.4).unwrap(),
            "wheat"
        );
    }

    #[test]
    fn rotation_rejects_unknown_category() {
        let registry = registry();
        let err = registry
            .recommend_rotation("sorghum", "clay", "kharif")
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownCategory { ref field, .. } if field == "last crop"));
    }

    #[test]
    fn rotation_is_case_insensitive() {
        let registry = registry();
        let rec = registry
            .recommend_rotation("Rice", "Clay", "Kharif")
            .unwrap();
        assert_eq!(rec, "maize");
    }

    #[test]
    fn soil_health_classifies_extremes() {
        let registry = registry();
        assert_eq!(
            registry
                .classify_soil_health(6.6, 2.8, 88.0, 38.0, 165.0)
                .unwrap(),
            "good"
        );
        assert_eq!(
            registry
                .classify_soil_health(4.6, 0.25, 22.0, 6.0, 45.0)
                .unwrap(),
            "poor"
        );
    }

    #[test]
    fn describe_reports_class_counts() {
        let registry = registry();
        assert_eq!(
            registry.describe(),
            "crop (2 classes), rotation (2 classes), soil (2 classes)"
        );
    }
}
