use std::collections::HashMap;

use anyhow::anyhow;
use beau_collector::BeauCollector;
use lazy_static::lazy_static;
use serde_derive::Deserialize;

use crate::{
    flags::{KnobValue, Knobs},
    fuzzers::{Fuzz, Fuzzer},
    log::warn,
    types::Type,
};

lazy_static! {
    /// Documented fallbacks for knobs a run file leaves unset.
    static ref DEFAULTS: HashMap<(&'static str, &'static str), KnobValue> = [
        (("identifier", "shadow"), KnobValue::Number(0.1)),
        (("object", "maxLength"), KnobValue::Number(10.0)),
        (("function", "maxParams"), KnobValue::Number(3.0)),
        (("boolean", "trueRatio"), KnobValue::Number(0.5)),
    ]
    .into_iter()
    .collect();
}

const PROBABILITY_KNOBS: [(&str, &str); 2] = [("identifier", "shadow"), ("boolean", "trueRatio")];
const COUNT_KNOBS: [(&str, &str); 2] = [("object", "maxLength"), ("function", "maxParams")];

pub fn default_knob(generator: &str, knob: &str) -> Option<KnobValue> {
    if knob == "weight" {
        return Some(KnobValue::Number(1.0));
    }
    DEFAULTS.get(&(generator, knob)).copied()
}

/// Per-generator knobs plus names the generated program may assume exist.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub generators: HashMap<String, Knobs>,

    #[serde(default)]
    pub externs: Vec<String>,
}

impl Configuration {
    pub fn with_knob<T: Into<KnobValue>>(mut self, generator: &str, knob: &str, value: T) -> Self {
        self.generators
            .entry(generator.to_string())
            .or_default()
            .put(knob.to_string(), value);
        self
    }

    pub fn with_externs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.externs.extend(names.into_iter().map(Into::into));
        self
    }

    fn lookup(&self, generator: &str, knob: &str) -> Option<KnobValue> {
        self.generators
            .get(generator)
            .and_then(|knobs| knobs.get(knob))
            .or_else(|| default_knob(generator, knob))
    }

    /// Numeric knob, falling back to the documented default. A knob with
    /// neither a value nor a default reads as 0 and leaves a warning in the log.
    pub fn knob_f64(&self, generator: &str, knob: &str) -> f64 {
        match self.lookup(generator, knob) {
            Some(KnobValue::Number(n)) => n,
            Some(KnobValue::Bool(b)) => {
                warn!("knob {generator}.{knob} is a boolean where a number is expected, reading {b} as a number");
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            None => {
                warn!("knob {generator}.{knob} is not configured and has no default, using 0");
                0.0
            }
        }
    }

    pub fn knob_usize(&self, generator: &str, knob: &str) -> usize {
        let value = self.knob_f64(generator, knob);
        if value.is_finite() && value > 0.0 {
            value as usize
        } else {
            0
        }
    }

    pub fn knob_bool(&self, generator: &str, knob: &str) -> bool {
        match self.lookup(generator, knob) {
            Some(KnobValue::Bool(b)) => b,
            Some(KnobValue::Number(n)) => n != 0.0,
            None => {
                warn!("knob {generator}.{knob} is not configured and has no default, using false");
                false
            }
        }
    }

    /// Checks every configured knob and reports all problems at once.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let checks = [check_probabilities, check_counts, check_weights];

        let _ = checks
            .into_iter()
            .map(|check| check(self))
            .bcollect::<Vec<_>>()?;

        Ok(())
    }
}

type ValidateResult = Result<(), anyhow::Error>;

fn configured_number(config: &Configuration, generator: &str, knob: &str) -> Option<Result<f64, anyhow::Error>> {
    config
        .generators
        .get(generator)?
        .get_f64(knob)
        .map(|value| value.map_err(|e| anyhow!("knob `{generator}.{knob}`: {e}")))
}

fn check_probabilities(config: &Configuration) -> ValidateResult {
    PROBABILITY_KNOBS
        .iter()
        .map(|(generator, knob)| match configured_number(config, generator, knob) {
            Some(Ok(p)) if !(0.0..=1.0).contains(&p) => Err(anyhow!(
                "knob `{generator}.{knob}` is a probability and must lie in [0, 1], got {p}"
            )),
            Some(Err(e)) => Err(e),
            _ => Ok(()),
        })
        .bcollect::<Vec<_>>()?;
    Ok(())
}

fn check_counts(config: &Configuration) -> ValidateResult {
    COUNT_KNOBS
        .iter()
        .map(|(generator, knob)| match configured_number(config, generator, knob) {
            Some(Ok(n)) if n < 0.0 || n.fract() != 0.0 => Err(anyhow!(
                "knob `{generator}.{knob}` must be a non-negative integer, got {n}"
            )),
            Some(Err(e)) => Err(e),
            _ => Ok(()),
        })
        .bcollect::<Vec<_>>()?;
    Ok(())
}

fn check_weights(config: &Configuration) -> ValidateResult {
    let weights = config
        .generators
        .iter()
        .filter_map(|(generator, knobs)| {
            knobs.get_f64("weight").map(|weight| match weight {
                Ok(w) if !w.is_finite() || w < 0.0 => Err(anyhow!(
                    "knob `{generator}.weight` must be a finite non-negative number, got {w}"
                )),
                Ok(w) => Ok(w),
                Err(e) => Err(anyhow!("knob `{generator}.weight`: {e}")),
            })
        })
        .bcollect::<Vec<_>>()?;

    // unconfigured generators still weigh in with their default
    let defaulted = Fuzzer::REGISTRY
        .iter()
        .filter(|f| {
            config
                .generators
                .get(f.config_name())
                .map_or(true, |knobs| knobs.get("weight").is_none())
        })
        .count();

    let total = weights.iter().sum::<f64>() + defaulted as f64;
    if !total.is_finite() {
        return Err(anyhow!(
            "generator weights add up to {total}, keep their sum below {:e}",
            f64::MAX
        ));
    }
    Ok(())
}

/// Run file read by the driver binary.
#[derive(Clone, Debug, Deserialize)]
pub struct FuzzConfig {
    pub run: RunOptions,

    #[serde(default)]
    pub output: OutputOptions,

    #[serde(flatten)]
    pub generation: Configuration,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RunOptions {
    pub seed: u64,
    pub budget: usize,

    #[serde(default = "any_types")]
    pub types: Vec<Type>,

    #[serde(default = "single_program")]
    pub count: usize,
}

fn any_types() -> Vec<Type> {
    vec![Type::Any]
}

fn single_program() -> usize {
    1
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Source,
    Json,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct OutputOptions {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub directory: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigReadError {
    #[error("failed to read run file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse run file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_config<P: AsRef<std::path::Path>>(path: P) -> Result<FuzzConfig, ConfigReadError> {
    let config = std::fs::read_to_string(path)?;

    Ok(toml::from_str::<FuzzConfig>(&config)?)
}
