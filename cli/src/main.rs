//! atsaudit CLI - resume audit and export tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use atsaudit::audit::ProviderRequest;
use atsaudit::render::{self, DisplayNode};
use atsaudit::{
    detect, AnalysisResult, AuditRequest, Auditor, ExportArtifact, ExportSession,
    ExtractOptions, ExtractorRegistry, FileUsage, ReplayProvider, ResumeExport, UsageCounter,
    UsageGate, DEFAULT_USAGE_LIMIT,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "atsaudit")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Audit resumes and export them as ATS-safe PDF and DOCX", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the classified resume (headings, body lines, blanks)
    Render {
        /// Resume file (TXT, PDF or DOCX)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the HTML fragment
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Print the block list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a resume to PDF and/or DOCX
    Export {
        /// Resume file (TXT, PDF or DOCX)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "all")]
        format: ExportFormat,

        /// Document title
        #[arg(long)]
        title: Option<String>,
    },

    /// Extract text from an uploaded resume
    Extract {
        /// Input file (PDF, DOCX or TXT)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// MIME type (guessed from extension and content if omitted)
        #[arg(long)]
        mime: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Audit a resume with a recorded provider response
    Audit {
        /// Resume file (TXT, PDF or DOCX)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Recorded provider response (JSON)
        #[arg(long, value_name = "JSON")]
        response: PathBuf,

        /// Job description file
        #[arg(long, value_name = "FILE")]
        job: Option<PathBuf>,

        /// Output directory for the exported resume
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Usage count store
        #[arg(long, env = "ATSAUDIT_USAGE_FILE", value_name = "PATH")]
        usage_file: Option<PathBuf>,

        /// Maximum number of audits
        #[arg(long, default_value_t = DEFAULT_USAGE_LIMIT)]
        limit: u32,
    },

    /// Print scores, findings and verdict of a stored analysis
    Report {
        /// Analysis result (JSON)
        #[arg(value_name = "JSON")]
        input: PathBuf,
    },

    /// Show or reset the usage count
    Usage {
        /// Reset the count to zero
        #[arg(long)]
        reset: bool,

        /// Usage count store
        #[arg(long, env = "ATSAUDIT_USAGE_FILE", value_name = "PATH")]
        usage_file: Option<PathBuf>,

        /// Maximum number of audits
        #[arg(long, default_value_t = DEFAULT_USAGE_LIMIT)]
        limit: u32,
    },

    /// Print the provider request for a resume
    Prompt {
        /// Resume file (TXT, PDF or DOCX)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Job description file
        #[arg(long, value_name = "FILE")]
        job: Option<PathBuf>,

        /// Target model
        #[arg(long)]
        model: Option<String>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    /// PDF only
    Pdf,
    /// DOCX only
    Docx,
    /// PDF and DOCX
    All,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render { input, html, json } => cmd_render(&input, html, json),
        Commands::Export {
            input,
            output,
            format,
            title,
        } => cmd_export(&input, output.as_deref(), format, title),
        Commands::Extract {
            input,
            mime,
            output,
        } => cmd_extract(&input, mime.as_deref(), output.as_deref()),
        Commands::Audit {
            input,
            response,
            job,
            output,
            usage_file,
            limit,
        } => cmd_audit(
            &input,
            &response,
            job.as_deref(),
            output.as_deref(),
            usage_file,
            limit,
        ),
        Commands::Report { input } => cmd_report(&input),
        Commands::Usage {
            reset,
            usage_file,
            limit,
        } => cmd_usage(reset, usage_file, limit),
        Commands::Prompt { input, job, model } => cmd_prompt(&input, job.as_deref(), model),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read resume text from a text, PDF or DOCX file.
fn read_resume(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let registry = ExtractorRegistry::with_defaults();
    Ok(registry.extract_file(input, &ExtractOptions::default())?)
}

fn default_usage_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".atsaudit_usage")
}

fn cmd_render(input: &Path, html: bool, json: bool) -> CliResult {
    let text = read_resume(input)?;
    let session = ResumeExport::new().build(&text);

    if html {
        print!("{}", session.html());
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(session.document())?);
        return Ok(());
    }

    for node in session.display() {
        match node {
            DisplayNode::Spacer { .. } => println!(),
            DisplayNode::Heading { text, .. } => println!("{}", text.cyan().bold()),
            DisplayNode::Body { text, .. } => println!("{}", text),
        }
    }

    Ok(())
}

fn cmd_export(
    input: &Path,
    output: Option<&Path>,
    format: ExportFormat,
    title: Option<String>,
) -> CliResult {
    let text = read_resume(input)?;

    let mut export = ResumeExport::new();
    if let Some(title) = title {
        export = export.with_title(title);
    }
    let session = export.build(&text);

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let written = write_artifacts(&session, &output_dir, format)?;

    print_written(&output_dir, &written);
    print_stats(&session);
    Ok(())
}

fn write_artifacts(
    session: &ExportSession,
    output_dir: &Path,
    format: ExportFormat,
) -> Result<Vec<ExportArtifact>, Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let steps = if format == ExportFormat::All { 2 } else { 1 };
    let pb = ProgressBar::new(steps);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let mut written = Vec::new();

    if matches!(format, ExportFormat::Pdf | ExportFormat::All) {
        pb.set_message("Encoding PDF...");
        let pdf = session.pdf()?;
        fs::write(output_dir.join(&pdf.file_name), &pdf.bytes)?;
        written.push(pdf);
        pb.inc(1);
    }

    if matches!(format, ExportFormat::Docx | ExportFormat::All) {
        pb.set_message("Encoding DOCX...");
        let docx = session.docx()?;
        fs::write(output_dir.join(&docx.file_name), &docx.bytes)?;
        written.push(docx);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");
    Ok(written)
}

fn print_written(output_dir: &Path, written: &[ExportArtifact]) {
    println!("\n{} {}", "Output files in".green().bold(), output_dir.display());
    for (i, artifact) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!(
            "  {} {} ({} bytes)",
            branch.dimmed(),
            artifact.file_name,
            artifact.len()
        );
    }
}

fn print_stats(session: &ExportSession) {
    let stats = session.stats();
    println!();
    println!("{}", "Document Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Body lines".bold(), stats.body_count);
    println!("{}: {}", "Blank lines".bold(), stats.blank_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
}

fn cmd_extract(input: &Path, mime: Option<&str>, output: Option<&Path>) -> CliResult {
    let bytes = fs::read(input)?;
    let mime = match mime {
        Some(m) => m,
        None => detect::detect_mime(input, &bytes)
            .ok_or("Unsupported format. Please use PDF, DOCX, or TXT.")?,
    };
    log::debug!("Extracting {} as {}", input.display(), mime);

    let registry = ExtractorRegistry::with_defaults();
    let text = registry.extract(&bytes, mime, &ExtractOptions::default())?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_audit(
    input: &Path,
    response: &Path,
    job: Option<&Path>,
    output: Option<&Path>,
    usage_file: Option<PathBuf>,
    limit: u32,
) -> CliResult {
    let text = read_resume(input)?;

    let mut request = AuditRequest::new(text);
    if let Some(job) = job {
        request = request.with_job_description(fs::read_to_string(job)?);
    }

    let usage = FileUsage::new(usage_file.unwrap_or_else(default_usage_path));
    let provider = ReplayProvider::from_file(response)?;
    let auditor = Auditor::new(Arc::new(provider), Arc::new(usage)).with_limit(limit);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Running audit...");
    let result = auditor.audit(&request);
    spinner.finish_and_clear();
    let analysis = result?;

    print_report(&analysis);

    let session = ResumeExport::new().from_analysis(&analysis);
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let written = write_artifacts(&session, &output_dir, ExportFormat::All)?;
    print_written(&output_dir, &written);

    println!(
        "\n{}: {} / {}",
        "Uses".bold(),
        auditor.used(),
        auditor.gate().limit()
    );
    Ok(())
}

fn cmd_report(input: &Path) -> CliResult {
    let analysis = AnalysisResult::from_json(&fs::read_to_string(input)?)?;
    print_report(&analysis);
    Ok(())
}

fn print_report(analysis: &AnalysisResult) {
    let before = &analysis.corrected_before_optimization;
    let after = &analysis.corrected_after_optimization;
    let delta = analysis.score_delta();

    println!("{}", "ATS Score".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let delta_text = format!("{:+.0}", delta);
    println!(
        "{}: {:.0} -> {:.0} ({})",
        "Final score".bold(),
        before.final_ats_score,
        after.final_ats_score,
        if delta >= 0.0 {
            delta_text.green()
        } else {
            delta_text.red()
        }
    );
    println!(
        "{}: {:.0}",
        "Confidence".bold(),
        after.ats_confidence_level
    );
    println!(
        "{}: {} -> {}",
        "Rejection risk".bold(),
        before.ats_rejection_risk,
        after.ats_rejection_risk
    );

    let labels = [
        "Structure",
        "Keywords",
        "Impact",
        "Formatting",
        "Seniority",
    ];
    println!();
    for ((label, b), a) in labels
        .iter()
        .zip(before.scores.as_array())
        .zip(after.scores.as_array())
    {
        println!("  {:<12} {:>5.0} -> {:>5.0}", label, b, a);
    }
    println!(
        "  {:<12} {:>5.1} -> {:>5.1}",
        "Weighted",
        before.scores.weighted(),
        after.scores.weighted()
    );

    if !analysis.audit_findings.is_empty() {
        println!();
        println!("{}", "Findings".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for finding in &analysis.audit_findings {
            println!("{} {}", "•".yellow(), finding.issue.bold());
            println!("    {}", finding.why_it_is_a_problem);
            println!("    {} {}", "Impact:".dimmed(), finding.ats_real_world_impact);
            println!("    {} {}", "Fix:".dimmed(), finding.correction_applied);
        }
    }

    let verdict = &analysis.credibility_verdict;
    println!();
    println!("{}", "Credibility Verdict".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Trust level".bold(), verdict.trust_level);
    println!("{}: {}", "Enterprise readiness".bold(), verdict.enterprise_readiness);
    println!("{}", verdict.score_change_rationale);
}

fn cmd_usage(reset: bool, usage_file: Option<PathBuf>, limit: u32) -> CliResult {
    let usage = FileUsage::new(usage_file.unwrap_or_else(default_usage_path));
    let gate = UsageGate::new(limit);

    if reset {
        usage.reset()?;
        println!("{} {}", "Usage reset".green(), usage.path().display());
    }

    let used = usage.current_count();
    let status = if gate.allows(used) {
        format!("{} remaining", gate.remaining(used)).green()
    } else {
        "Usage Limit Reached".red().bold()
    };
    println!("{}: {} / {} ({})", "Uses".bold(), used, gate.limit(), status);
    Ok(())
}

fn cmd_prompt(input: &Path, job: Option<&Path>, model: Option<String>) -> CliResult {
    let text = read_resume(input)?;

    let mut request = AuditRequest::new(text);
    if let Some(job) = job {
        request = request.with_job_description(fs::read_to_string(job)?);
    }

    let mut provider_request = ProviderRequest::new(&request);
    if let Some(model) = model {
        provider_request = provider_request.with_model(model);
    }

    println!("{}", serde_json::to_string_pretty(&provider_request)?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "atsaudit".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Resume audit and export tool");
    println!();
    println!("Export formats: {}", render::PDF_MIME_TYPE);
    println!("                {}", render::DOCX_MIME_TYPE);
    println!("License: MIT");
}
