//! Graph configuration: named seeds, named sources and an ordered list of
//! generators.
//!
//! The in-memory model is typed (each generator kind carries only its own
//! parameters). On disk it is a JSON document with PascalCase keys where a
//! generator is a flat record tagged by `GeneratorType`:
//!
//! ```json
//! {
//!   "Seeds": { "Default": 1 },
//!   "Sources": { "perlin": { "SourceType": "perlin", "Seed": "Default" } },
//!   "Generators": [
//!     { "Name": "basic", "GeneratorType": "fBm2d", "Sources": ["perlin"],
//!       "Octaves": 5, "Persistence": 0.25, "Lacunarity": 2.0, "Frequency": 1.0 }
//!   ]
//! }
//! ```
//!
//! Unrecognized type tags are kept as `Other` and rejected when the graph is
//! built, not when the document is read.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Full description of a noise graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NoiseConfig {
    /// Seed values by name, referenced from [`SourceSpec::seed`].
    #[serde(default)]
    pub seeds: BTreeMap<String, i64>,
    /// Coherent noise sources by name.
    #[serde(default)]
    pub sources: BTreeMap<String, SourceSpec>,
    /// Generators in build order. A generator may only reference generators
    /// listed before it.
    #[serde(default)]
    pub generators: Vec<GeneratorSpec>,
}

impl NoiseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named seed.
    pub fn with_seed(mut self, name: impl Into<String>, value: i64) -> Self {
        self.seeds.insert(name.into(), value);
        self
    }

    /// Add or replace a named source.
    pub fn with_source(
        mut self,
        name: impl Into<String>,
        source_type: SourceType,
        seed: impl Into<String>,
    ) -> Self {
        self.sources.insert(
            name.into(),
            SourceSpec {
                source_type,
                seed: seed.into(),
            },
        );
        self
    }

    /// Append a generator to the build order.
    pub fn with_generator(mut self, generator: GeneratorSpec) -> Self {
        self.generators.push(generator);
        self
    }

    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from file (sync)
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save to file (sync), creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// A coherent noise source and the seed it is built from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceSpec {
    pub source_type: SourceType,
    /// Name of an entry in [`NoiseConfig::seeds`].
    pub seed: String,
}

/// Kernel used by a source. Serialized as `"perlin"` / `"opensimplex"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceType {
    Perlin,
    OpenSimplex,
    /// Unrecognized tag, rejected at build time.
    Other(String),
}

impl SourceType {
    pub fn as_str(&self) -> &str {
        match self {
            SourceType::Perlin => "perlin",
            SourceType::OpenSimplex => "opensimplex",
            SourceType::Other(tag) => tag,
        }
    }
}

impl From<String> for SourceType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "perlin" => SourceType::Perlin,
            "opensimplex" => SourceType::OpenSimplex,
            _ => SourceType::Other(tag),
        }
    }
}

impl From<SourceType> for String {
    fn from(source_type: SourceType) -> Self {
        match source_type {
            SourceType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// One entry in the ordered generator list.
///
/// Which references a kind consumes is fixed:
/// - fractal sum: `sources[0]`
/// - select: `generators[0]` control, `generators[1]` low, `generators[2]` high
/// - scale: `generators[0]`
///
/// Extra references are resolved (and must exist) but are not used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "GeneratorDoc", into = "GeneratorDoc")]
pub struct GeneratorSpec {
    pub name: String,
    /// Names of built sources.
    pub sources: Vec<String>,
    /// Names of generators earlier in the list.
    pub generators: Vec<String>,
    pub kind: GeneratorKind,
}

impl GeneratorSpec {
    pub fn fractal_sum(name: impl Into<String>, source: impl Into<String>, params: FractalParams) -> Self {
        Self {
            name: name.into(),
            sources: vec![source.into()],
            generators: Vec::new(),
            kind: GeneratorKind::FractalSum(params),
        }
    }

    pub fn select(
        name: impl Into<String>,
        control: impl Into<String>,
        low: impl Into<String>,
        high: impl Into<String>,
        params: SelectParams,
    ) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
            generators: vec![control.into(), low.into(), high.into()],
            kind: GeneratorKind::Select(params),
        }
    }

    pub fn scale(name: impl Into<String>, generator: impl Into<String>, params: ScaleParams) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
            generators: vec![generator.into()],
            kind: GeneratorKind::Scale(params),
        }
    }
}

/// Generator kind with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum GeneratorKind {
    FractalSum(FractalParams),
    Select(SelectParams),
    Scale(ScaleParams),
    /// Unrecognized `GeneratorType` tag, rejected at build time.
    Other(String),
}

impl GeneratorKind {
    pub const FRACTAL_SUM_TAG: &'static str = "fBm2d";
    pub const SELECT_TAG: &'static str = "select2d";
    pub const SCALE_TAG: &'static str = "scale2d";

    /// Tag written to the `GeneratorType` field.
    pub fn type_tag(&self) -> &str {
        match self {
            GeneratorKind::FractalSum(_) => Self::FRACTAL_SUM_TAG,
            GeneratorKind::Select(_) => Self::SELECT_TAG,
            GeneratorKind::Scale(_) => Self::SCALE_TAG,
            GeneratorKind::Other(tag) => tag,
        }
    }
}

/// Fractal sum (fBm) parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalParams {
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub frequency: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2.0,
            frequency: 1.0,
        }
    }
}

/// Select parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectParams {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub edge_falloff: f64,
}

impl Default for SelectParams {
    fn default() -> Self {
        Self {
            lower_bound: -1.0,
            upper_bound: 1.0,
            edge_falloff: 0.0,
        }
    }
}

/// Scale/bias/clamp parameters. The default clamp is the whole `f64` range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleParams {
    pub scale: f64,
    pub bias: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            bias: 0.0,
            min: f64::MIN,
            max: f64::MAX,
        }
    }
}

// ---------------------------------------------------------------------------
// Document form
// ---------------------------------------------------------------------------

/// Flat on-disk record of a generator. Only the fields relevant to the
/// generator type are written; missing ones take the kind's defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GeneratorDoc {
    name: String,
    generator_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generators: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    octaves: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    persistence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lacunarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lower_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    upper_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edge_falloff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bias: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
}

impl From<GeneratorDoc> for GeneratorSpec {
    fn from(doc: GeneratorDoc) -> Self {
        let kind = match doc.generator_type.as_str() {
            "fBm2d" | "fractalSum" => {
                let d = FractalParams::default();
                GeneratorKind::FractalSum(FractalParams {
                    octaves: doc.octaves.unwrap_or(d.octaves),
                    persistence: doc.persistence.unwrap_or(d.persistence),
                    lacunarity: doc.lacunarity.unwrap_or(d.lacunarity),
                    frequency: doc.frequency.unwrap_or(d.frequency),
                })
            }
            "select2d" | "select" => {
                let d = SelectParams::default();
                GeneratorKind::Select(SelectParams {
                    lower_bound: doc.lower_bound.unwrap_or(d.lower_bound),
                    upper_bound: doc.upper_bound.unwrap_or(d.upper_bound),
                    edge_falloff: doc.edge_falloff.unwrap_or(d.edge_falloff),
                })
            }
            "scale2d" | "scale" => {
                let d = ScaleParams::default();
                GeneratorKind::Scale(ScaleParams {
                    scale: doc.scale.unwrap_or(d.scale),
                    bias: doc.bias.unwrap_or(d.bias),
                    min: doc.min.unwrap_or(d.min),
                    max: doc.max.unwrap_or(d.max),
                })
            }
            _ => GeneratorKind::Other(doc.generator_type),
        };

        Self {
            name: doc.name,
            sources: doc.sources.unwrap_or_default(),
            generators: doc.generators.unwrap_or_default(),
            kind,
        }
    }
}

impl From<GeneratorSpec> for GeneratorDoc {
    fn from(spec: GeneratorSpec) -> Self {
        let mut doc = GeneratorDoc {
            generator_type: spec.kind.type_tag().to_string(),
            name: spec.name,
            sources: (!spec.sources.is_empty()).then_some(spec.sources),
            generators: (!spec.generators.is_empty()).then_some(spec.generators),
            ..Default::default()
        };

        match spec.kind {
            GeneratorKind::FractalSum(p) => {
                doc.octaves = Some(p.octaves);
                doc.persistence = Some(p.persistence);
                doc.lacunarity = Some(p.lacunarity);
                doc.frequency = Some(p.frequency);
            }
            GeneratorKind::Select(p) => {
                doc.lower_bound = Some(p.lower_bound);
                doc.upper_bound = Some(p.upper_bound);
                doc.edge_falloff = Some(p.edge_falloff);
            }
            GeneratorKind::Scale(p) => {
                doc.scale = Some(p.scale);
                doc.bias = Some(p.bias);
                doc.min = Some(p.min);
                doc.max = Some(p.max);
            }
            GeneratorKind::Other(_) => {}
        }

        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
      "Seeds": { "Default": 1 },
      "Sources": {
        "perlin": { "SourceType": "perlin", "Seed": "Default" }
      },
      "Generators": [
        {
          "Name": "basic",
          "GeneratorType": "fBm2d",
          "Sources": ["perlin"],
          "Octaves": 5,
          "Persistence": 0.25,
          "Lacunarity": 2.0,
          "Frequency": 1.0
        }
      ]
    }"#;

    #[test]
    fn test_parse_sample_document() {
        let config = NoiseConfig::from_json_str(SAMPLE).expect("parse failed");

        assert_eq!(config.seeds["Default"], 1);
        assert_eq!(config.sources["perlin"].source_type, SourceType::Perlin);
        assert_eq!(config.sources["perlin"].seed, "Default");

        let basic = &config.generators[0];
        assert_eq!(basic.name, "basic");
        assert_eq!(basic.sources, vec!["perlin".to_string()]);
        assert!(basic.generators.is_empty());
        assert_eq!(
            basic.kind,
            GeneratorKind::FractalSum(FractalParams {
                octaves: 5,
                persistence: 0.25,
                lacunarity: 2.0,
                frequency: 1.0,
            })
        );
    }

    #[test]
    fn test_unknown_tags_are_kept() {
        let json = r#"{
          "Sources": { "v": { "SourceType": "voronoi", "Seed": "s" } },
          "Generators": [ { "Name": "g", "GeneratorType": "ridged2d" } ]
        }"#;
        let config = NoiseConfig::from_json_str(json).expect("parse failed");
        assert_eq!(config.sources["v"].source_type, SourceType::Other("voronoi".into()));
        assert_eq!(config.generators[0].kind, GeneratorKind::Other("ridged2d".into()));
    }

    #[test]
    fn test_aliases_and_defaults() {
        let json = r#"{
          "Generators": [
            { "Name": "f", "GeneratorType": "fractalSum", "Sources": ["p"] },
            { "Name": "s", "GeneratorType": "select", "Generators": ["f", "f", "f"], "UpperBound": 0.5 },
            { "Name": "c", "GeneratorType": "scale", "Generators": ["s"], "Bias": 1.0 }
          ]
        }"#;
        let config = NoiseConfig::from_json_str(json).expect("parse failed");

        assert_eq!(config.generators[0].kind, GeneratorKind::FractalSum(FractalParams::default()));
        assert_eq!(
            config.generators[1].kind,
            GeneratorKind::Select(SelectParams { upper_bound: 0.5, ..Default::default() })
        );
        assert_eq!(
            config.generators[2].kind,
            GeneratorKind::Scale(ScaleParams { bias: 1.0, ..Default::default() })
        );
    }

    #[test]
    fn test_null_reference_lists() {
        let json = r#"{
          "Generators": [
            { "Name": "f", "GeneratorType": "fBm2d", "Sources": ["p"], "Generators": null }
          ]
        }"#;
        let config = NoiseConfig::from_json_str(json).expect("parse failed");
        assert!(config.generators[0].generators.is_empty());
    }

    #[test]
    fn test_only_relevant_fields_written() {
        let config = NoiseConfig::new()
            .with_seed("Default", 3)
            .with_source("p", SourceType::OpenSimplex, "Default")
            .with_generator(GeneratorSpec::scale("c", "f", ScaleParams::default()));

        let json = config.to_json_pretty().expect("encode failed");
        assert!(json.contains("\"GeneratorType\": \"scale2d\""));
        assert!(json.contains("\"SourceType\": \"opensimplex\""));
        assert!(json.contains("\"Bias\""));
        assert!(!json.contains("Octaves"));
        assert!(!json.contains("LowerBound"));
        assert!(!json.contains("\"Sources\": ["));
    }

    #[test]
    fn test_document_survives_save_and_load() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("configs").join("noise.json");

        let config = NoiseConfig::new()
            .with_seed("Default", -77)
            .with_source("perlin", SourceType::Perlin, "Default")
            .with_source("simplex", SourceType::OpenSimplex, "Default")
            .with_generator(GeneratorSpec::fractal_sum("fbm", "perlin", FractalParams::default()))
            .with_generator(GeneratorSpec::scale("clamped", "fbm", ScaleParams::default()))
            .with_generator(GeneratorSpec::select(
                "mix",
                "fbm",
                "clamped",
                "fbm",
                SelectParams { edge_falloff: 0.1, ..Default::default() },
            ));

        config.save(&path).expect("save failed");
        let loaded = NoiseConfig::load(&path).expect("load failed");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = NoiseConfig::from_json_str("{ \"Seeds\": [1, 2] }").unwrap_err();
        assert!(matches!(err, crate::core::ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let err = NoiseConfig::load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::core::ConfigError::Io(_)));
    }
}
