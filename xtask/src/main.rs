//! Build automation tasks for the occupancy display.
//!
//! Run with: `cargo xtask <command>`

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::{Command, ExitCode};

/// The firmware binary built from `demos/`.
const DEMO: &str = "occupancy_display_demo";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the occupancy display", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: host tests, firmware builds for every board, docs
    CheckAll,
    /// Run the host tests (unit, integration, and doc tests)
    Test,
    /// Build the library for a board
    Build {
        #[arg(long, default_value = "pico1")]
        board: Board,
        #[arg(long, default_value = "arm")]
        arch: Arch,
    },
    /// Build the demo firmware
    Demo {
        #[arg(long, default_value = "pico1")]
        board: Board,
        #[arg(long, default_value = "arm")]
        arch: Arch,
    },
    /// Build a UF2 of the demo firmware for flashing to a Pico
    Uf2 {
        #[arg(long, default_value = "pico1")]
        board: Board,
        #[arg(long, default_value = "arm")]
        arch: Arch,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Board {
    Pico1,
    Pico2,
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Board::Pico1 => write!(f, "pico1"),
            Board::Pico2 => write!(f, "pico2"),
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Arch {
    Arm,
    Riscv,
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arch::Arm => write!(f, "arm"),
            Arch::Riscv => write!(f, "riscv"),
        }
    }
}

impl Arch {
    fn target(&self, board: Board) -> Option<&'static str> {
        match (board, self) {
            (Board::Pico1, Arch::Arm) => Some("thumbv6m-none-eabi"),
            (Board::Pico2, Arch::Arm) => Some("thumbv8m.main-none-eabihf"),
            (Board::Pico2, Arch::Riscv) => Some("riscv32imac-unknown-none-elf"),
            (Board::Pico1, Arch::Riscv) => None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::Test => {
            if run_host_tests() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Build { board, arch } => build_lib(board, arch),
        Commands::Demo { board, arch } => build_demo(board, arch),
        Commands::Uf2 { board, arch } => build_uf2(board, arch),
    }
}

fn check_all() -> ExitCode {
    let workspace_root = workspace_root();

    println!("{}", "==> Running host tests...".cyan());
    if !run_host_tests() {
        return ExitCode::FAILURE;
    }

    for (board, arch) in [
        (Board::Pico1, Arch::Arm),
        (Board::Pico2, Arch::Arm),
        (Board::Pico2, Arch::Riscv),
    ] {
        let Some(target) = arch.target(board) else {
            continue;
        };
        let features = build_features(board, arch);
        println!(
            "\n{}",
            format!("==> Building library and demo ({board}, {arch})...").cyan()
        );
        if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
            "build",
            "--lib",
            "--bin",
            DEMO,
            "--target",
            target,
            "--features",
            &features,
            "--no-default-features",
        ])) {
            return ExitCode::FAILURE;
        }
    }

    println!("\n{}", "==> Building documentation...".cyan());
    let board = Board::Pico2;
    let arch = Arch::Arm;
    let Some(target) = arch.target(board) else {
        return ExitCode::FAILURE;
    };
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "doc",
        "--target",
        target,
        "--no-deps",
        "--features",
        &build_features(board, arch),
        "--no-default-features",
    ])) {
        return ExitCode::FAILURE;
    }

    println!("\n{}", "==> All checks passed!".green().bold());
    ExitCode::SUCCESS
}

fn run_host_tests() -> bool {
    let workspace_root = workspace_root();
    let host_target = host_target();
    match host_target.as_deref() {
        Some(target) => {
            println!(
                "  {}",
                format!("Using host target: {target}").bright_black()
            );
        }
        None => {
            println!(
                "{}",
                "  Unable to detect host target; relying on cargo default.".bright_black()
            );
        }
    }

    let mut test_cmd = Command::new("cargo");
    test_cmd
        .current_dir(&workspace_root)
        .args(["test", "--package", "occupancy-display"]);

    if let Some(target) = host_target {
        test_cmd.arg("--target").arg(target);
    }

    test_cmd.args(["--no-default-features", "--features", "host"]);

    run_command(&mut test_cmd)
}

fn build_lib(board: Board, arch: Arch) -> ExitCode {
    let workspace_root = workspace_root();
    let Some(target) = checked_target(board, arch) else {
        return ExitCode::FAILURE;
    };
    let features = build_features(board, arch);
    println!(
        "{}",
        format!("Building library with features: {features}").cyan()
    );

    if run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--lib",
        "--target",
        target,
        "--features",
        &features,
        "--no-default-features",
    ])) {
        println!("{}", "Build successful!".green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_demo(board: Board, arch: Arch) -> ExitCode {
    let workspace_root = workspace_root();
    let Some(target) = checked_target(board, arch) else {
        return ExitCode::FAILURE;
    };
    let features = build_features(board, arch);
    println!(
        "{}",
        format!("Building demo with features: {features}").cyan()
    );

    if run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--bin",
        DEMO,
        "--target",
        target,
        "--features",
        &features,
        "--no-default-features",
    ])) {
        println!("{}", "Build successful!".green());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_uf2(board: Board, arch: Arch) -> ExitCode {
    let workspace_root = workspace_root();
    let Some(target) = checked_target(board, arch) else {
        return ExitCode::FAILURE;
    };
    let features = build_features(board, arch);

    println!(
        "{}",
        format!("Building UF2 for the demo ({board}/{arch})").cyan()
    );
    println!("  Features: {}", features.bright_black());
    println!("  Target: {}", target.bright_black());

    // Build in release mode for UF2
    if !run_command(Command::new("cargo").current_dir(&workspace_root).args([
        "build",
        "--bin",
        DEMO,
        "--release",
        "--target",
        target,
        "--features",
        &features,
        "--no-default-features",
    ])) {
        return ExitCode::FAILURE;
    }

    // Convert to UF2 using elf2uf2-rs
    let elf_path = format!("target/{target}/release/{DEMO}");
    let uf2_path = format!("{DEMO}.uf2");

    println!("\n{}", "Converting to UF2 format...".cyan());

    if run_command(
        Command::new("elf2uf2-rs")
            .current_dir(&workspace_root)
            .args([&elf_path, &uf2_path]),
    ) {
        println!("{}", format!("UF2 created: {uf2_path}").green().bold());
        println!("{}", "Ready to drag-and-drop to your Pico!".bright_black());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            "Note: Install elf2uf2-rs with: cargo install elf2uf2-rs".yellow()
        );
        ExitCode::FAILURE
    }
}

fn checked_target(board: Board, arch: Arch) -> Option<&'static str> {
    let target = arch.target(board);
    if target.is_none() {
        eprintln!("{}", format!("{board} does not support {arch}").red());
    }
    target
}

fn build_features(board: Board, arch: Arch) -> String {
    [board.to_string(), arch.to_string(), "defmt".to_string()].join(",")
}

fn workspace_root() -> std::path::PathBuf {
    // cargo runs the alias from the workspace root
    std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."))
}

fn host_target() -> Option<String> {
    let output = Command::new("rustc").arg("-vV").output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        if let Some(host) = line.strip_prefix("host: ") {
            return Some(host.trim().to_string());
        }
    }
    None
}

fn run_command(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("{}", format!("Failed to execute command: {e}").red());
            false
        }
    }
}
