//! Typed run options
//!
//! Project configuration hands the adapter an open-ended options bag. Only the
//! keys in [`RECOGNIZED_OPTIONS`] survive; everything else is dropped here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::{SpecsError, SpecsResult};

/// Option keys accepted from the options bag, including aliases
pub const RECOGNIZED_OPTIONS: &[&str] = &[
    "excludeStackTrace",
    "exclude_stack_trace",
    "nostacktrace",
    "properties",
    "extraProperties",
    "extra_properties",
    "extraRuntimeArgs",
    "extra_runtime_args",
    "java_args",
];

/// Switch passed to the specs runner to suppress stack traces
pub const NO_STACKTRACE_FLAG: &str = "-ns";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    /// Hide stack traces in spec failure output (default: false)
    #[serde(default, alias = "exclude_stack_trace", alias = "nostacktrace")]
    pub exclude_stack_trace: bool,

    /// System properties, passed as `-Dkey=value`
    #[serde(default, alias = "extraProperties", alias = "extra_properties")]
    pub properties: BTreeMap<String, String>,

    /// Extra JVM arguments. `None` falls back to `JAVA_OPTS`.
    #[serde(default, alias = "extra_runtime_args", alias = "java_args")]
    pub extra_runtime_args: Option<Vec<String>>,
}

impl RunOptions {
    /// Build options from a generic bag, ignoring unrecognized keys
    pub fn from_bag(bag: &Map<String, Value>) -> SpecsResult<Self> {
        let mut recognized = Map::new();
        for (key, value) in bag {
            if RECOGNIZED_OPTIONS.contains(&key.as_str()) {
                recognized.insert(key.clone(), value.clone());
            } else {
                warn!("Ignoring unrecognized option '{}'", key);
            }
        }

        serde_json::from_value(Value::Object(recognized))
            .map_err(|e| SpecsError::Config(format!("invalid run options: {e}")))
    }

    /// Merge `overrides` on top of these options
    pub fn merge(mut self, overrides: RunOptions) -> Self {
        self.exclude_stack_trace |= overrides.exclude_stack_trace;
        self.properties.extend(overrides.properties);
        if overrides.extra_runtime_args.is_some() {
            self.extra_runtime_args = overrides.extra_runtime_args;
        }
        self
    }

    pub fn with_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_extra_runtime_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_runtime_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn without_stack_trace(mut self) -> Self {
        self.exclude_stack_trace = true;
        self
    }

    /// Command-line switches derived from boolean options
    pub fn flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.exclude_stack_trace {
            flags.push(NO_STACKTRACE_FLAG);
        }
        flags
    }
}
