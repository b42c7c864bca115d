use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use std::path::Path;

use rufix_lib::config;
use rufix_lib::exit_codes;
use rufix_lib::init;
use rufix_lib::output::OutputFormat;
use rufix_lib::processor::{FixResult, SyntaxFixer};
use rufix_lib::report::{self, SummaryReport};
use rufix_lib::rules;
use rufix_lib::stats::RunStats;
use rufix_lib::tools::ToolBridge;

#[derive(Parser)]
#[command(author, version, about = "A fast multi-language heuristic syntax fixer", long_about = None)]
struct Cli {
    /// Files or directories to fix
    #[arg(required = false)]
    paths: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Output format: text, concise or json
    #[arg(short, long, default_value = "text")]
    output: String,

    /// Write corrected content back to the files
    #[arg(long, default_value_t = false)]
    write: bool,

    /// Append a summary report to the output
    #[arg(long, default_value_t = false)]
    report: bool,

    /// Print the running statistics after processing
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// Disable the external formatter bridge
    #[arg(long, default_value_t = false)]
    no_tools: bool,

    /// Exclude files or directories (comma-separated glob patterns)
    #[arg(long)]
    exclude: Option<String>,

    /// Ignore .gitignore files when scanning directories
    #[arg(long, default_value_t = false)]
    no_gitignore: bool,

    /// List all available rules
    #[arg(short, long, default_value_t = false)]
    list_rules: bool,

    /// Quiet mode: suppress per-file output
    #[arg(short, long)]
    quiet: bool,

    /// Show detailed output (repeat for debug logging)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new configuration file
    Init,
    /// Print version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Init) => match init::create_default_config(config::DEFAULT_CONFIG_FILE) {
            Ok(()) => {
                println!("Created {}", config::DEFAULT_CONFIG_FILE);
                exit_codes::exit::success();
            }
            Err(err) => {
                eprintln!("{}: {err}", "error".red().bold());
                exit_codes::exit::tool_error();
            }
        },
        Some(Commands::Version) => {
            println!("rufix {}", env!("CARGO_PKG_VERSION"));
            exit_codes::exit::success();
        }
        None => {}
    }

    if cli.list_rules {
        print_rules();
        exit_codes::exit::success();
    }

    let code = run(&cli);
    std::process::exit(code);
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_rules() {
    for (language, rule) in rules::rule_catalog() {
        println!("{language}/{} - {}", rule.name(), rule.description());
    }
}

fn run(cli: &Cli) -> i32 {
    let format = match OutputFormat::from_str(&cli.output) {
        Ok(format) => format,
        Err(err) => {
            eprintln!("{}: {err}", "error".red().bold());
            return exit_codes::TOOL_ERROR;
        }
    };

    let mut config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}: {err}", "error".red().bold());
            return exit_codes::TOOL_ERROR;
        }
    };
    if let Some(exclude) = &cli.exclude {
        config.global.exclude.extend(
            exclude
                .split(',')
                .map(|pattern| pattern.trim().to_string())
                .filter(|pattern| !pattern.is_empty()),
        );
    }
    if cli.no_gitignore {
        config.global.respect_gitignore = false;
    }
    if cli.no_tools {
        config.tools.enabled = false;
    }

    if cli.paths.is_empty() {
        eprintln!(
            "{}: no paths given; pass files or directories to fix",
            "error".red().bold()
        );
        return exit_codes::TOOL_ERROR;
    }

    let bridge = if config.tools.enabled {
        ToolBridge::probe()
    } else {
        ToolBridge::disabled()
    };
    let fixer = SyntaxFixer::with_bridge(config, bridge).with_write_back(cli.write);

    let mut results: Vec<FixResult> = Vec::new();
    for path in &cli.paths {
        results.extend(fixer.fix_tree(Path::new(path)));
    }

    let formatter = format.create_formatter();
    let rendered = formatter.format_results(&results);
    if !cli.quiet && !rendered.is_empty() {
        println!("{rendered}");
    }

    if cli.report {
        if let Some(report) = report::summarize(&results) {
            if format == OutputFormat::Json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(err) => log::warn!("failed to serialize report: {err}"),
                }
            } else {
                print_report(&report);
            }
        }
    }

    if cli.stats {
        let stats = fixer.stats_snapshot();
        if format == OutputFormat::Json {
            match serde_json::to_string_pretty(&stats) {
                Ok(json) => println!("{json}"),
                Err(err) => log::warn!("failed to serialize stats: {err}"),
            }
        } else {
            print_stats(&stats);
        }
    }

    // With --write, applied fixes count as resolved; otherwise any finding
    // keeps the exit code non-zero so CI notices.
    let clean = if cli.write {
        results.iter().all(|r| r.success)
    } else {
        results.iter().all(|r| r.success && r.original_errors.is_empty())
    };
    if clean {
        exit_codes::SUCCESS
    } else {
        exit_codes::ISSUES_FOUND
    }
}

fn print_report(report: &SummaryReport) {
    println!("{}", "Summary".bold());
    println!("  files processed:   {}", report.summary.total_files);
    println!(
        "  successful:        {} ({:.1}%)",
        report.summary.successful_files, report.summary.success_rate
    );
    println!("  issues found:      {}", report.summary.total_errors_found);
    println!("  fixes applied:     {}", report.summary.total_fixes_applied);
    println!("  avg time per file: {:.3}s", report.summary.avg_processing_secs);
    println!(
        "  throughput:        {:.1} files/s, {:.1} fixes/s",
        report.performance.files_per_second, report.performance.fixes_per_second
    );

    if !report.by_language.is_empty() {
        println!("\n{}", "By language".bold());
        for (language, breakdown) in &report.by_language {
            println!(
                "  {language}: {} files, {} issues, {} fixes, {:.1}% success",
                breakdown.files, breakdown.errors, breakdown.fixes, breakdown.success_rate
            );
        }
    }

    if !report.top_issues.is_empty() {
        println!("\n{}", "Top issues".bold());
        for issue in &report.top_issues {
            println!("  {:>4}  {}", issue.count, issue.issue);
        }
    }
}

fn print_stats(stats: &RunStats) {
    println!("{}", "Running statistics".bold());
    println!("  files processed: {}", stats.files_processed);
    println!("  total fixes:     {}", stats.total_fixes);
    println!("  success rate:    {:.1}%", stats.success_rate);
    println!("  avg time:        {:.1}ms", stats.avg_processing_ms);
}
