//! Two-phase construction of a named noise graph.
//!
//! `build_sources` turns every configured source into a kernel sampler seeded
//! from its named seed. `build_generators` then walks the generator list in
//! order, resolving references against the built sources and the generators
//! completed so far. A reference to a generator listed later (or to itself)
//! is therefore a build error, and cycles cannot be expressed.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::{ConfigError, ParamError, RefKind, Result};
use crate::graph::config::{GeneratorKind, GeneratorSpec, NoiseConfig, SourceType};
use crate::modifier::{FractalSum, Scale, Select};
use crate::source::random::default_source;
use crate::source::{PerlinSampler, RandomSource, SeedBuilder, SharedSampler, SimplexSampler};

/// A configuration plus the samplers built from it.
///
/// Both build phases replace their map only on success, so a failed build
/// leaves the previous state untouched. Once built, the handles returned by
/// [`NoiseGraph::generator`] are immutable and can be sampled from any
/// thread.
pub struct NoiseGraph {
    config: NoiseConfig,
    built_sources: HashMap<String, SharedSampler>,
    built_generators: HashMap<String, SharedSampler>,
}

impl NoiseGraph {
    pub fn new(config: NoiseConfig) -> Self {
        Self {
            config,
            built_sources: HashMap::new(),
            built_generators: HashMap::new(),
        }
    }

    /// Run both build phases.
    pub fn build(config: NoiseConfig, seed_builder: Option<&dyn SeedBuilder>) -> Result<Self> {
        let mut graph = Self::new(config);
        graph.build_sources(seed_builder)?;
        graph.build_generators()?;
        Ok(graph)
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Build every configured source.
    ///
    /// Each source gets its own [`RandomSource`] from `seed_builder`, or from
    /// a `StdRng` seeded with the seed value when none is given. Must run
    /// before [`NoiseGraph::build_generators`].
    pub fn build_sources(&mut self, seed_builder: Option<&dyn SeedBuilder>) -> Result<()> {
        let mut built = HashMap::with_capacity(self.config.sources.len());

        for (name, spec) in &self.config.sources {
            let seed = *self.config.seeds.get(&spec.seed).ok_or_else(|| ConfigError::UnknownSeed {
                source_name: name.clone(),
                seed: spec.seed.clone(),
            })?;

            let mut rng: Box<dyn RandomSource> = match seed_builder {
                Some(builder) => builder.build(seed),
                None => Box::new(default_source(seed)),
            };

            let sampler: SharedSampler = match &spec.source_type {
                SourceType::Perlin => Arc::new(PerlinSampler::new(rng.as_mut())),
                SourceType::OpenSimplex => Arc::new(SimplexSampler::new(rng.as_mut())),
                SourceType::Other(tag) => {
                    return Err(ConfigError::UnknownSourceType {
                        source_name: name.clone(),
                        source_type: tag.clone(),
                    });
                }
            };

            log::debug!("Built {} source \"{}\" (seed \"{}\" = {})", spec.source_type, name, spec.seed, seed);
            built.insert(name.clone(), sampler);
        }

        log::info!("Built {} noise sources", built.len());
        self.built_sources = built;
        Ok(())
    }

    /// Build every generator in configuration order.
    pub fn build_generators(&mut self) -> Result<()> {
        let mut built: HashMap<String, SharedSampler> =
            HashMap::with_capacity(self.config.generators.len());

        for spec in &self.config.generators {
            if built.contains_key(&spec.name) {
                return Err(ConfigError::DuplicateGenerator {
                    generator: spec.name.clone(),
                });
            }

            let sources = resolve(spec, &spec.sources, &self.built_sources, RefKind::Source)?;
            let generators = resolve(spec, &spec.generators, &built, RefKind::Generator)?;
            let sampler = instantiate(spec, &sources, &generators)?;

            log::debug!("Built {} generator \"{}\"", spec.kind.type_tag(), spec.name);
            built.insert(spec.name.clone(), sampler);
        }

        log::info!("Built {} noise generators", built.len());
        self.built_generators = built;
        Ok(())
    }

    /// A built generator by name, or `None` if no such generator has been
    /// built.
    pub fn generator(&self, name: &str) -> Option<SharedSampler> {
        self.built_generators.get(name).cloned()
    }

    /// A built source by name.
    pub fn source(&self, name: &str) -> Option<SharedSampler> {
        self.built_sources.get(name).cloned()
    }

    /// Names of built generators, in configuration order.
    pub fn generator_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.config
            .generators
            .iter()
            .map(|g| g.name.as_str())
            .filter(|name| self.built_generators.contains_key(*name))
    }
}

/// Look up every name in `refs`, failing on the first one missing.
fn resolve(
    spec: &GeneratorSpec,
    refs: &[String],
    built: &HashMap<String, SharedSampler>,
    kind: RefKind,
) -> Result<Vec<SharedSampler>> {
    refs.iter()
        .map(|name| {
            built.get(name).cloned().ok_or_else(|| ConfigError::ReferenceNotFound {
                generator: spec.name.clone(),
                reference: name.clone(),
                kind,
            })
        })
        .collect()
}

/// The first `N` resolved references, or an error naming how many were given.
fn leading<const N: usize>(
    spec: &GeneratorSpec,
    resolved: &[SharedSampler],
    kind: RefKind,
) -> Result<[SharedSampler; N]> {
    if resolved.len() < N {
        return Err(ConfigError::MissingReferences {
            generator: spec.name.clone(),
            kind,
            required: N,
            found: resolved.len(),
        });
    }
    Ok(std::array::from_fn(|i| Arc::clone(&resolved[i])))
}

fn invalid(spec: &GeneratorSpec) -> impl FnOnce(ParamError) -> ConfigError + '_ {
    move |reason| ConfigError::InvalidParameter {
        generator: spec.name.clone(),
        reason,
    }
}

fn instantiate(
    spec: &GeneratorSpec,
    sources: &[SharedSampler],
    generators: &[SharedSampler],
) -> Result<SharedSampler> {
    let sampler: SharedSampler = match &spec.kind {
        GeneratorKind::FractalSum(p) => {
            let [source] = leading::<1>(spec, sources, RefKind::Source)?;
            Arc::new(FractalSum::new(source, p.octaves, p.persistence, p.lacunarity, p.frequency))
        }
        GeneratorKind::Select(p) => {
            let [control, low, high] = leading::<3>(spec, generators, RefKind::Generator)?;
            Arc::new(
                Select::new(control, low, high, p.lower_bound, p.upper_bound, p.edge_falloff)
                    .map_err(invalid(spec))?,
            )
        }
        GeneratorKind::Scale(p) => {
            let [source] = leading::<1>(spec, generators, RefKind::Generator)?;
            Arc::new(Scale::new(source, p.scale, p.bias, p.min, p.max).map_err(invalid(spec))?)
        }
        GeneratorKind::Other(tag) => {
            return Err(ConfigError::UnknownGeneratorType {
                generator: spec.name.clone(),
                generator_type: tag.clone(),
            });
        }
    };
    Ok(sampler)
}
