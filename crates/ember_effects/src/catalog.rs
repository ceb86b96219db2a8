//! Effect catalog: which kernel jobs exist for each effect and where their
//! sources live relative to the asset root.

use ember_core::{Effect, DEFAULT_EFFECT};

use crate::error::{AssetError, AssetResult};

/// A job declared by an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSpec {
    /// Lookup key, e.g. `"update"`.
    pub key: &'static str,
    /// File name inside the effect directory.
    pub file: &'static str,
}

/// Static description of one effect's assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSpec {
    /// The effect.
    pub effect: Effect,
    /// Prelude file name inside the effect directory.
    pub prelude: &'static str,
    /// Declared jobs, in declaration order.
    pub jobs: &'static [JobSpec],
}

/// A resolved job: key, label and asset path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEntry {
    /// Job key.
    pub key: &'static str,
    /// Human-readable label, `particles.<effect>.<key>`.
    pub label: String,
    /// Path relative to the asset root.
    pub path: String,
}

const fn job(key: &'static str, file: &'static str) -> JobSpec {
    JobSpec { key, file }
}

static CATALOG: [EffectSpec; 6] = [
    EffectSpec {
        effect: Effect::Fire,
        prelude: "prelude.wgsl",
        jobs: &[job("physics", "physics.job.wgsl"), job("render", "render.job.wgsl")],
    },
    EffectSpec {
        effect: Effect::Sparks,
        prelude: "prelude.wgsl",
        jobs: &[job("update", "update.job.wgsl"), job("render", "render.job.wgsl")],
    },
    EffectSpec {
        effect: Effect::Text,
        prelude: "prelude.wgsl",
        jobs: &[job("layout", "layout.job.wgsl"), job("render", "render.job.wgsl")],
    },
    EffectSpec {
        effect: Effect::Rain,
        prelude: "prelude.wgsl",
        jobs: &[job("update", "update.job.wgsl"), job("render", "render.job.wgsl")],
    },
    EffectSpec {
        effect: Effect::Snow,
        prelude: "prelude.wgsl",
        jobs: &[job("update", "update.job.wgsl"), job("render", "render.job.wgsl")],
    },
    EffectSpec {
        effect: Effect::Firework,
        prelude: "prelude.wgsl",
        jobs: &[job("update", "update.job.wgsl"), job("render", "render.job.wgsl")],
    },
];

/// Read-only view over the built-in effect catalog.
pub struct EffectCatalog;

impl EffectCatalog {
    /// Spec for a known effect.
    #[must_use]
    pub fn spec(effect: Effect) -> &'static EffectSpec {
        let index = match effect {
            Effect::Fire => 0,
            Effect::Sparks => 1,
            Effect::Text => 2,
            Effect::Rain => 3,
            Effect::Snow => 4,
            Effect::Firework => 5,
        };
        &CATALOG[index]
    }

    /// Spec for the default effect (`fire`).
    #[must_use]
    pub fn default_spec() -> &'static EffectSpec {
        Self::spec(DEFAULT_EFFECT)
    }

    /// Looks up an effect by name.
    ///
    /// # Errors
    ///
    /// [`AssetError::UnknownEffect`] listing every catalog name.
    pub fn get(name: &str) -> AssetResult<&'static EffectSpec> {
        CATALOG
            .iter()
            .find(|spec| spec.effect.name() == name)
            .ok_or_else(|| AssetError::UnknownEffect {
                name: name.to_owned(),
                available: Self::names().join(", "),
            })
    }

    /// Effect names in catalog order.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        CATALOG.iter().map(|spec| spec.effect.name()).collect()
    }

    /// Every spec, in catalog order.
    #[must_use]
    pub fn all() -> &'static [EffectSpec] {
        &CATALOG
    }
}

impl EffectSpec {
    /// Effect name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.effect.name()
    }

    /// Prelude path relative to the asset root.
    #[must_use]
    pub fn prelude_path(&self) -> String {
        format!("effects/{}/{}", self.name(), self.prelude)
    }

    /// Label for a job key.
    #[must_use]
    pub fn label(&self, key: &str) -> String {
        format!("particles.{}.{key}", self.name())
    }

    /// Resolves a job key.
    ///
    /// # Errors
    ///
    /// [`AssetError::UnknownJob`] listing this effect's job keys.
    pub fn job(&self, key: &str) -> AssetResult<JobEntry> {
        self.jobs
            .iter()
            .find(|spec| spec.key == key)
            .map(|spec| self.entry(spec))
            .ok_or_else(|| AssetError::UnknownJob {
                effect: self.name().to_owned(),
                key: key.to_owned(),
                available: self.job_keys().join(", "),
            })
    }

    /// Every job, resolved, in declaration order.
    #[must_use]
    pub fn job_entries(&self) -> Vec<JobEntry> {
        self.jobs.iter().map(|spec| self.entry(spec)).collect()
    }

    /// Job keys in declaration order.
    #[must_use]
    pub fn job_keys(&self) -> Vec<&'static str> {
        self.jobs.iter().map(|spec| spec.key).collect()
    }

    fn entry(&self, spec: &JobSpec) -> JobEntry {
        JobEntry {
            key: spec.key,
            label: self.label(spec.key),
            path: format!("effects/{}/{}", self.name(), spec.file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_effect() {
        assert_eq!(EffectCatalog::names(), vec!["fire", "sparks", "text", "rain", "snow", "firework"]);
        for effect in Effect::ALL {
            assert_eq!(EffectCatalog::spec(effect).effect, effect);
        }
        let order: Vec<_> = EffectCatalog::all().iter().map(|spec| spec.effect).collect();
        assert_eq!(order, Effect::ALL);
    }

    #[test]
    fn test_default_effect_paths() {
        let fire = EffectCatalog::default_spec();
        assert_eq!(fire.prelude_path(), "effects/fire/prelude.wgsl");
        assert_eq!(fire.job("physics").unwrap().path, "effects/fire/physics.job.wgsl");
        assert_eq!(fire.job("render").unwrap().label, "particles.fire.render");
    }

    #[test]
    fn test_sparks_jobs() {
        let sparks = EffectCatalog::get("sparks").unwrap();
        let update = sparks.job("update").unwrap();
        assert_eq!(update.label, "particles.sparks.update");

        let err = sparks.job("physics").unwrap_err();
        match &err {
            AssetError::UnknownJob { effect, key, available } => {
                assert_eq!(effect, "sparks");
                assert_eq!(key, "physics");
                assert_eq!(available, "update, render");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("Available: update, render."));
    }

    #[test]
    fn test_unknown_effect() {
        let err = EffectCatalog::get("unknown-effect").unwrap_err();
        assert!(err.to_string().starts_with("unknown particle effect \"unknown-effect\""));
        assert!(err.to_string().contains("fire, sparks, text, rain, snow, firework"));
    }
}
