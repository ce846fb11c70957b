use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use cs_diff::{generate_unified_diff, DiffChecker, FileCompareResult, HunkLineKind};
use cs_utf8::{EncodingAnalysis, Utf8Checker, ValidationResult};
use serde::Serialize;

use crate::cli::*;
use crate::config::Config;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, config, &cli.format),
        Command::Validate(args) => cmd_validate(args, config, &cli.format),
        Command::Fix(args) => cmd_fix(args, config, &cli.format),
        Command::Analyze(args) => cmd_analyze(args, config, &cli.format),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_diff(args: DiffArgs, config: Config, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let mut options = config.diff;
    if let Some(context) = args.context {
        options.context_lines = context;
    }
    options.ignore_whitespace |= args.ignore_whitespace;
    options.ignore_case |= args.ignore_case;

    let report = DiffChecker::compare_files(&args.old, &args.new, options)
        .with_context(|| format!("cannot compare {} and {}", args.old.display(), args.new.display()))?;
    let code = if report.result.identical { ExitCode::SUCCESS } else { ExitCode::from(1) };

    if let OutputFormat::Json = format {
        print_json(&report)?;
    } else if args.unified {
        print!(
            "{}",
            generate_unified_diff(&report.result, &args.old.display().to_string(), &args.new.display().to_string())
        );
    } else {
        print_diff_report(&report);
    }
    Ok(code)
}

fn print_diff_report(report: &FileCompareResult) {
    let r = &report.result;
    println!(
        "{} ({} bytes, {} lines) → {} ({} bytes, {} lines)",
        report.file1.name.bold(),
        report.file1.size,
        r.total_lines.file1,
        report.file2.name.bold(),
        report.file2.size,
        r.total_lines.file2,
    );
    if r.identical {
        println!("{} {}", "✓".green().bold(), r.summary);
        return;
    }
    println!("{}", r.summary.yellow());
    println!(
        "  {} added, {} removed, {} unchanged ({} ms)",
        r.stats.added.to_string().green(),
        r.stats.removed.to_string().red(),
        r.stats.unchanged,
        r.processing_time,
    );

    for hunk in &r.hunks {
        println!(
            "{}",
            format!("@@ -{},{} +{},{} @@", hunk.old_start, hunk.old_lines, hunk.new_start, hunk.new_lines).cyan()
        );
        for line in &hunk.lines {
            match line.kind {
                HunkLineKind::Context => println!(" {}", line.content.dimmed()),
                HunkLineKind::Added => println!("{}", format!("+{}", line.content).green()),
                HunkLineKind::Removed => println!("{}", format!("-{}", line.content).red()),
            }
        }
    }
}

fn cmd_validate(args: ValidateArgs, config: Config, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let mut options = config.utf8;
    if let Some(max) = args.max_issues {
        options.max_issues = max;
    }
    let result = Utf8Checker::new(options)
        .validate_file(&args.file)
        .with_context(|| format!("cannot validate {}", args.file.display()))?;
    let code = if result.valid { ExitCode::SUCCESS } else { ExitCode::from(1) };

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => print_validation(&args.file, &result, args.show),
    }
    Ok(code)
}

fn print_validation(path: &Path, r: &ValidationResult, show: usize) {
    println!("{} ({})", path.display().to_string().bold(), r.encoding.kind.to_string().cyan());
    println!(
        "  {} bytes, {} rows, ~{} bytes/row ({} ms)",
        r.total_bytes, r.stats.rows, r.stats.average_bytes_per_row, r.processing_time
    );
    if r.valid {
        println!("{} Valid UTF-8", "✓".green().bold());
        return;
    }

    let truncated = if r.truncated { " (stopped early)" } else { "" };
    println!(
        "{} {} invalid bytes, {} valid{}",
        "✗".red().bold(),
        r.invalid_bytes.to_string().red(),
        r.valid_bytes,
        truncated
    );
    for issue in r.issues.iter().take(show) {
        println!(
            "  {}:{}  @{}  {}  {}",
            issue.row,
            issue.col,
            issue.byte_offset,
            issue.invalid_byte_hex.yellow(),
            issue.description
        );
        println!(
            "      {}{}{}",
            issue.context.before.dimmed(),
            "[?]".red(),
            issue.context.after.dimmed()
        );
    }
    if r.issues.len() > show {
        println!("  ... and {} more", r.issues.len() - show);
    }
}

/// `<file>.fixed` next to the input.
fn default_fix_output(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push(".fixed");
    PathBuf::from(name)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FixReport<'a> {
    input: &'a Path,
    output: &'a Path,
    fixed_count: usize,
}

fn cmd_fix(args: FixArgs, config: Config, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let mut options = config.utf8;
    if let Some(c) = args.replacement {
        options.replacement_char = c;
    }
    let output = args.output.clone().unwrap_or_else(|| default_fix_output(&args.file));
    let result = Utf8Checker::new(options)
        .fix_file(&args.file, &output, args.mode.into())
        .with_context(|| format!("cannot fix {}", args.file.display()))?;

    match format {
        OutputFormat::Json => print_json(&FixReport {
            input: &args.file,
            output: &output,
            fixed_count: result.fixed_count,
        })?,
        OutputFormat::Text => println!(
            "{} Fixed {} bytes ({:?}) → {}",
            "✓".green().bold(),
            result.fixed_count.to_string().bold(),
            args.mode,
            output.display()
        ),
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_analyze(args: AnalyzeArgs, config: Config, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let buffer = std::fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let analysis = Utf8Checker::new(config.utf8).analyze_encoding_issues(&buffer);

    match format {
        OutputFormat::Json => print_json(&analysis)?,
        OutputFormat::Text => print_analysis(&args.file, &analysis),
    }
    Ok(ExitCode::SUCCESS)
}

fn print_analysis(path: &Path, a: &EncodingAnalysis) {
    println!("{}", path.display().to_string().bold());
    if a.possible_encodings.is_empty() && a.common_issues.is_empty() {
        println!("{} No encoding problems detected", "✓".green().bold());
        return;
    }
    for enc in &a.possible_encodings {
        println!("  Possible encoding: {}", enc.cyan());
    }
    for issue in &a.common_issues {
        println!("  {} {}", "!".yellow().bold(), issue.message);
    }
    for rec in &a.recommendations {
        println!("  → {rec}");
    }
}
