//! strokegrade CLI
//!
//! Usage:
//!   strokegrade --user attempt.json --reference t.json      # Grade one attempt
//!   strokegrade --page page.json --reference t.json         # Grade a whole page
//!   strokegrade --features attempt.json [--resample]        # Feature vector
//!   strokegrade --serve                                     # HTTP API server
//!   strokegrade --user a.json --reference t.json --json     # JSON output

use clap::Parser;
use colored::Colorize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;

use strokegrade::core::{run_server, Grader};
use strokegrade::telemetry::init_tracing;
use strokegrade::types::{BatchReport, GeometricFeatures, GradeReport, NormalizedStroke, PageData};
use strokegrade::{GradeError, GradeResult, GradingConfig, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "strokegrade",
    version = VERSION,
    about = "Grade handwritten strokes against reference glyphs",
    long_about = "strokegrade compares a handwritten stroke to a reference glyph\n\
                  and reports shape, size, angle and smoothness scores, a letter\n\
                  grade, and coaching feedback.\n\n\
                  Stroke files are JSON normalized strokes ({\"points\": [{\"x\":..,\"y\":..}]}).\n\
                  Page files are JSON pages in device units.\n\n\
                  Environment overrides use the STROKEGRADE_ prefix\n\
                  (e.g. STROKEGRADE_GAP_THRESHOLD=0.08)."
)]
struct Args {
    /// User attempt (normalized stroke JSON)
    #[arg(short, long)]
    user: Option<PathBuf>,

    /// Reference glyph (normalized stroke JSON)
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Glyph label used in feedback
    #[arg(short, long)]
    label: Option<String>,

    /// Raw page to segment and grade (page JSON, device units)
    #[arg(short, long)]
    page: Option<PathBuf>,

    /// Print the feature vector of a stroke
    #[arg(short, long)]
    features: Option<PathBuf>,

    /// Resample to the target length before extracting features
    #[arg(long, requires = "features")]
    resample: bool,

    /// Points per resampled stroke
    #[arg(long)]
    target_length: Option<usize>,

    /// Gap threshold for glyph segmentation
    #[arg(long)]
    gap_threshold: Option<f64>,

    /// Largest stroke accepted for comparison
    #[arg(long)]
    max_points: Option<usize>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default from config: 127.0.0.1:3000)
    #[arg(long)]
    addr: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show the raw comparison metrics
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.log_level);

    if args.no_color {
        colored::control::set_override(false);
    }

    let result = if args.serve {
        run_server(config).await
    } else {
        run_cli(&args, config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "strokegrade failed");
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Environment config with command-line overrides applied
fn build_config(args: &Args) -> GradeResult<GradingConfig> {
    let mut config = GradingConfig::from_env()?;
    if let Some(n) = args.target_length {
        config.target_length = n;
    }
    if let Some(gap) = args.gap_threshold {
        config.gap_threshold = gap;
    }
    if let Some(n) = args.max_points {
        config.max_points = n;
    }
    if let Some(addr) = &args.addr {
        let (host, port) = addr
            .rsplit_once(':')
            .ok_or_else(|| GradeError::InvalidConfig(format!("address must be host:port, got {}", addr)))?;
        config.host = host.to_string();
        config.port = port
            .parse()
            .map_err(|e| GradeError::InvalidConfig(format!("invalid port in {}: {}", addr, e)))?;
    }
    config.validate()?;
    Ok(config)
}

/// Dispatch the one-shot modes
fn run_cli(args: &Args, config: GradingConfig) -> GradeResult<()> {
    let grader = Grader::new(config)?;

    if let Some(path) = &args.features {
        return run_features(&grader, path, args);
    }

    let reference_path = args.reference.as_ref().ok_or_else(|| {
        GradeError::Input("--reference is required (or use --features / --serve)".to_string())
    })?;
    let reference: NormalizedStroke = read_json(reference_path)?;

    if let Some(path) = &args.page {
        let page: PageData = read_json(path)?;
        let report = grader.grade_page(&page, &reference, args.label.as_deref())?;
        print_batch(&report, args)?;
        return Ok(());
    }

    let user_path = args
        .user
        .as_ref()
        .ok_or_else(|| GradeError::Input("--user or --page is required".to_string()))?;
    let user: NormalizedStroke = read_json(user_path)?;
    let report = grader.grade(&user, &reference, args.label.as_deref())?;
    print_report(&report, args)
}

/// Print features of one stroke
fn run_features(grader: &Grader, path: &Path, args: &Args) -> GradeResult<()> {
    let stroke: NormalizedStroke = read_json(path)?;
    let features = if args.resample {
        grader.resampled_features(&stroke)?
    } else {
        grader.features(&stroke)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&features)?);
        return Ok(());
    }

    for (name, value) in GeometricFeatures::names().iter().zip(features.to_array()) {
        println!("{:<20} {:>10.4}", name, value);
    }
    Ok(())
}

/// Print one graded attempt
fn print_report(report: &GradeReport, args: &Args) -> GradeResult<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if args.no_color {
        println!("{}", report.to_parseable_string());
        for line in &report.feedback {
            println!("  - {}", line);
        }
    } else {
        println!("{}", report.to_terminal_string());
    }

    if args.verbose {
        print_verbose(report);
    }
    Ok(())
}

/// Print a page report
fn print_batch(report: &BatchReport, args: &Args) -> GradeResult<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "Page {}: {} glyph(s), {} graded, {} skipped",
        report.page_id,
        report.group_count,
        report.graded.len(),
        report.skipped.len()
    );
    if let Some(mean) = report.mean_overall() {
        println!("Mean overall: {:.3}", mean);
    }
    for graded in &report.graded {
        println!();
        print_report(graded, args)?;
    }
    for skipped in &report.skipped {
        println!(
            "{} group {}: {}",
            "skipped".yellow(),
            skipped.group_index,
            skipped.reason
        );
    }
    Ok(())
}

/// Print raw comparison metrics
fn print_verbose(report: &GradeReport) {
    let c = &report.comparison;
    println!("┌─────────────────────────────────────");
    println!("│ dtw_distance:        {:.4}", c.dtw_distance);
    println!("│ frechet_distance:    {:.4}", c.frechet_distance);
    println!("│ size_ratio:          {:.4}", c.size_ratio);
    println!("│ curvature_deviation: {:.4}", c.curvature_deviation);
    println!("│ angle_deviation:     {:.4}", c.angle_deviation);
    println!("│ proportion_error:    {:.4}", c.proportion_error);
    println!("├─────────────────────────────────────");
    println!("│ similarity:          {:.4}", report.similarity);
    println!("│ graded at:           {}", report.timestamp.to_rfc3339());
    println!("└─────────────────────────────────────");
}

fn read_json<T: DeserializeOwned>(path: &Path) -> GradeResult<T> {
    let raw = fs::read_to_string(path)
        .map_err(|e| GradeError::Input(format!("cannot read {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_requires_features() {
        let err = Args::try_parse_from(["strokegrade", "--resample"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let args = Args::try_parse_from(["strokegrade", "--features", "a.json", "--resample"]).unwrap();
        assert!(args.resample);
        assert_eq!(args.features, Some(PathBuf::from("a.json")));
    }

    #[test]
    fn test_addr_override() {
        let args = Args::try_parse_from(["strokegrade", "--serve", "--addr", "0.0.0.0:8080"]).unwrap();
        let config = build_config(&args).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");

        let args = Args::try_parse_from(["strokegrade", "--addr", "nope"]).unwrap();
        assert!(matches!(build_config(&args), Err(GradeError::InvalidConfig(_))));
    }
}
