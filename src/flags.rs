use std::collections::HashMap;

use serde_derive::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KnobValue {
    Bool(bool),
    Number(f64),
}

impl From<f64> for KnobValue {
    fn from(value: f64) -> Self {
        KnobValue::Number(value)
    }
}

impl From<bool> for KnobValue {
    fn from(value: bool) -> Self {
        KnobValue::Bool(value)
    }
}

/// Tunable knobs of a single generator, e.g. `shadow = 0.1`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Knobs {
    inner: HashMap<String, KnobValue>,
}

impl Knobs {
    pub fn put<T: Into<KnobValue>>(&mut self, key: String, value: T) {
        self.inner.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<KnobValue> {
        self.inner.get(key).copied()
    }

    pub fn get_f64(&self, key: &str) -> Option<Result<f64, String>> {
        match self.inner.get(key) {
            Some(KnobValue::Number(n)) => Some(Ok(*n)),
            Some(KnobValue::Bool(b)) => Some(Err(format!("expected a number, found `{b}`"))),
            None => None,
        }
    }
}
