//! Bank tester simulator - Main Entry Point
//!
//! Drives the full per-reset firmware cycle against the emulated 4116 bank.
//! Each invocation models a number of reset taps in sequence; the persisted
//! mode file carries the sequencer state across runs like the real EEPROM
//! carries it across resets.
//!
//! ```bash
//! cargo run -p firmware -- 4               # four reset taps
//! cargo run -p firmware -- 1 --inject 5 40 # transient fault at row 5 col 40
//! ```

#![warn(clippy::print_stdout)]

use std::process::ExitCode;

use dram_emulator::{SimBank, SimDelay, Timeline};
use firmware::panel::ConsolePanel;
use firmware::store::FileStore;
use firmware::{reset_cycle, CycleOutcome, PassBudget};
use tester::{AccessMode, CellIo, TestConfig};
use tracing_subscriber::EnvFilter;

/// Passes an endless mode runs per simulated reset.
const ENDLESS_MODE_PASSES: u32 = 2;

struct Args {
    resets: u32,
    inject: Option<(u8, u8)>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        resets: 4,
        inject: None,
    };
    let mut saw_resets = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--inject" => {
                let row = args.next().ok_or("--inject needs ROW COL")?;
                let col = args.next().ok_or("--inject needs ROW COL")?;
                let row = row.parse().map_err(|_| format!("bad row {row:?}"))?;
                let col = col.parse().map_err(|_| format!("bad col {col:?}"))?;
                parsed.inject = Some((row, col));
            }
            other if !saw_resets => {
                parsed.resets = other.parse().map_err(|_| format!("bad reset count {other:?}"))?;
                saw_resets = true;
            }
            other => return Err(format!("unexpected argument {other:?}")),
        }
    }
    Ok(parsed)
}

fn mode_file() -> std::path::PathBuf {
    std::env::var_os("BANK_TESTER_MODE_FILE")
        .map(Into::into)
        .unwrap_or_else(|| std::env::temp_dir().join("bank-tester-mode"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            tracing::error!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let mut store = FileStore::new(mode_file());
    let mut panel = ConsolePanel::new();
    let config = TestConfig::default();

    for reset in 1..=args.resets {
        tracing::info!("=== reset {reset}/{} ===", args.resets);

        // Fresh silicon state per reset; anything unrefreshed through a real
        // reset would have decayed anyway.
        let timeline = Timeline::new();
        let mut bank = SimBank::new(timeline.clone());
        if let Some((row, col)) = args.inject {
            // 0x13 mismatches every suite pattern at most columns.
            bank.inject_once(row, col, 0x13);
            tracing::info!("injected transient fault at row {row} col {col}");
        }
        let mut io = CellIo::new(bank, SimDelay::new(timeline.clone()), AccessMode::Page);

        let result = reset_cycle(
            &mut io,
            &mut panel,
            &mut store,
            &config,
            PassBudget::Bounded(ENDLESS_MODE_PASSES),
        );

        let (bank, _) = io.release();
        let elapsed_ms = timeline.now_ns() / 1_000_000;
        match result {
            Ok(CycleOutcome::Suite { mode, faults }) => {
                tracing::info!("{}: suite complete, {faults} fault(s) recovered", mode.label());
            }
            Ok(CycleOutcome::Passes { mode, count }) => {
                tracing::info!("{}: {count} pass(es) before simulated reset", mode.label());
            }
            Err(err) => {
                tracing::error!("cycle halted: {err}");
                tracing::error!("panel: [{:<16}] [{:<16}]", panel.line1_text(), panel.line2_text());
                return ExitCode::FAILURE;
            }
        }
        tracing::info!(
            "simulated {elapsed_ms} ms, worst refresh gap {} us, {} decayed row(s), {} protocol violation(s)",
            bank.max_refresh_gap_ns() / 1_000,
            bank.decayed_rows(),
            bank.violations().len()
        );
        for violation in bank.violations() {
            tracing::warn!("{violation}");
        }
    }

    ExitCode::SUCCESS
}
