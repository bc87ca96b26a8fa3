use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SCHEMA_VERSION: &str = "1.0";

/// Upper bound on simulated blink cycles. Each cycle keeps its UART output
/// and spin records in memory until the run ends.
pub const MAX_CYCLES: u64 = 100_000;

/// Rejects a blink cycle count of zero or above [`MAX_CYCLES`].
pub fn check_cycles(cycles: u64) -> Result<()> {
    if cycles == 0 {
        anyhow::bail!("Limit 'cycles' must be greater than zero");
    }
    if cycles > MAX_CYCLES {
        anyhow::bail!(
            "Limit 'cycles' is {}, above the maximum of {}",
            cycles,
            MAX_CYCLES
        );
    }
    Ok(())
}

/// Which firmware image the simulator boots.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    /// Banner plus counted LED blink loop.
    Blinky,
    /// Fixed message 50 times, then halt.
    Hello,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct SimLimits {
    /// Blink cycles to run after boot. Ignored by `hello`.
    pub cycles: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct UartContainsAssertion {
    pub uart_contains: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct UartCount {
    pub text: String,
    pub times: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct UartCountAssertion {
    pub uart_count: UartCount,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LedEdgesAssertion {
    pub led_edges: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct NoFaultsAssertion {
    pub no_faults: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum SimAssertion {
    UartContains(UartContainsAssertion),
    UartCount(UartCountAssertion),
    LedEdges(LedEdgesAssertion),
    NoFaults(NoFaultsAssertion),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SimScript {
    pub schema_version: String,
    pub entry: Entry,
    /// Required for `blinky`; `hello` runs to its halt.
    #[serde(default)]
    pub limits: SimLimits,
    #[serde(default)]
    pub assertions: Vec<SimAssertion>,
}

impl SimScript {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open simulation script at {:?}", path.as_ref()))?;
        let script: Self =
            serde_yaml::from_reader(f).context("Failed to parse simulation script YAML")?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let script: Self =
            serde_yaml::from_str(yaml).context("Failed to parse simulation script YAML")?;
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '{}'",
                self.schema_version,
                SCHEMA_VERSION
            );
        }

        if self.entry == Entry::Blinky {
            check_cycles(self.limits.cycles)?;
        }

        for assertion in &self.assertions {
            match assertion {
                SimAssertion::UartContains(a) if a.uart_contains.is_empty() => {
                    anyhow::bail!("Assertion 'uart_contains' needs non-empty text");
                }
                SimAssertion::UartCount(a) if a.uart_count.text.is_empty() => {
                    anyhow::bail!("Assertion 'uart_count' needs non-empty text");
                }
                _ => {}
            }
        }

        Ok(())
    }
}
