use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the route planner workspace",
    long_about = "A unified CLI for launching the route planner GUI, running\n\
                  benchmarks, and CI checks in the route planner workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the route planner GUI
    Ui {
        /// Routing backend base URL (overrides the config file)
        #[arg(long, env = "ROUTE_PLANNER_BASE_URL")]
        base_url: Option<String>,
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run Criterion benchmarks
    Bench {
        /// Save the results as a named Criterion baseline
        #[arg(long, conflicts_with = "baseline")]
        save_baseline: Option<String>,
        /// Compare against a previously saved baseline
        #[arg(long)]
        baseline: Option<String>,
    },
    /// Run CI checks (fmt, clippy, tests, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run benchmarks
    Bench,
    /// Run check + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test route_core");
    run_cargo(&["test", "-p", "route_core", "--all-features"]);

    step("Test route_ui");
    run_cargo(&["test", "-p", "route_ui"]);
}

fn bench(criterion_args: &[&str]) {
    let mut args = vec!["bench", "--package", "route_core", "--bench", "performance"];
    if !criterion_args.is_empty() {
        args.push("--");
        args.extend_from_slice(criterion_args);
    }
    run_cargo(&args);
}

fn ci_bench() {
    step("Run benchmarks");
    bench(&[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ui { base_url, release } => {
            let mut args = vec!["run", "-p", "route_ui"];
            if release {
                args.push("--release");
            }
            if let Some(base_url) = base_url.as_deref() {
                args.extend(["--", "--base-url", base_url]);
            }
            run_cargo(&args);
        }
        Commands::Bench {
            save_baseline,
            baseline,
        } => match (save_baseline.as_deref(), baseline.as_deref()) {
            (Some(name), _) => bench(&["--save-baseline", name]),
            (None, Some(name)) => bench(&["--baseline", name]),
            (None, None) => bench(&[]),
        },
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
