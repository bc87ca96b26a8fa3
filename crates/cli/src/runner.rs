use boneboot_config::{Entry, SimAssertion, SimScript};
use boneboot_core::app::{self, Blinky};
use boneboot_core::sim::{CountingDelay, Soc};
use boneboot_core::uart::Uart;
use serde::Serialize;
use tracing::info;

/// What a simulated boot left behind.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub entry: Entry,
    pub cycles: u64,
    #[serde(skip)]
    pub uart: Vec<u8>,
    pub uart_bytes: usize,
    pub led_edges: u64,
    pub led_on: bool,
    pub spin_iterations: u64,
    pub register_accesses: u64,
    pub faults: Vec<String>,
}

impl RunReport {
    pub fn uart_text(&self) -> String {
        String::from_utf8_lossy(&self.uart).into_owned()
    }
}

/// Boots `entry` on a fresh simulated SoC. Blinky runs `cycles` loop
/// iterations; hello runs to its halt.
pub fn simulate(entry: Entry, cycles: u64) -> RunReport {
    match entry {
        Entry::Blinky => {
            let soc = Soc::new();
            let mut blinky = Blinky::boot(&soc, CountingDelay::new());
            for _ in 0..cycles {
                blinky.cycle();
            }
            info!("Blinky completed {} cycles", blinky.count());
            report(entry, blinky.count(), &soc, blinky.delay().total())
        }
        Entry::Hello => {
            let soc = Soc::after_rom();
            app::say_hello(&Uart::new(&soc));
            info!("Hello sent {} messages, halted", app::HELLO_REPEAT);
            report(entry, 0, &soc, 0)
        }
    }
}

fn report(entry: Entry, cycles: u64, soc: &Soc, spin_iterations: u64) -> RunReport {
    let uart = soc.uart_output();
    RunReport {
        entry,
        cycles,
        uart_bytes: uart.len(),
        uart,
        led_edges: soc.led_edges(),
        led_on: soc.led_is_on(),
        spin_iterations,
        register_accesses: soc.access_count(),
        faults: soc.faults().iter().map(|f| f.to_string()).collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct AssertionResult {
    pub assertion: String,
    pub passed: bool,
}

#[derive(Debug, Serialize)]
pub struct ScriptResult {
    pub status: &'static str,
    pub report: RunReport,
    pub assertions: Vec<AssertionResult>,
}

impl ScriptResult {
    pub fn passed(&self) -> bool {
        self.assertions.iter().all(|a| a.passed)
    }
}

pub fn run_script(script: &SimScript) -> ScriptResult {
    let report = simulate(script.entry, script.limits.cycles);
    let text = report.uart_text();

    let assertions: Vec<AssertionResult> = script
        .assertions
        .iter()
        .map(|assertion| match assertion {
            SimAssertion::UartContains(a) => AssertionResult {
                assertion: format!("uart_contains {:?}", a.uart_contains),
                passed: text.contains(&a.uart_contains),
            },
            SimAssertion::UartCount(a) => AssertionResult {
                assertion: format!("uart_count {:?} x{}", a.uart_count.text, a.uart_count.times),
                passed: text.matches(&a.uart_count.text).count() == a.uart_count.times,
            },
            SimAssertion::LedEdges(a) => AssertionResult {
                assertion: format!("led_edges {}", a.led_edges),
                passed: report.led_edges == a.led_edges,
            },
            SimAssertion::NoFaults(a) => AssertionResult {
                assertion: format!("no_faults {}", a.no_faults),
                passed: report.faults.is_empty() == a.no_faults,
            },
        })
        .collect();

    let status = if assertions.iter().all(|a| a.passed) {
        "pass"
    } else {
        "fail"
    };

    ScriptResult {
        status,
        report,
        assertions,
    }
}
