//! Audit command - report data quality issues and optionally fix them.

use std::path::{Path, PathBuf};

use colored::Colorize;
use datasight::audit::NextStep;
use datasight::{AuditConfig, AuditResult, Auditor, MockProvider, Settings, SummarySource};
use tracing::debug;

pub fn run(
    file: PathBuf,
    auto_fix: bool,
    output: Option<PathBuf>,
    models: Vec<String>,
    json: bool,
    mock_llm: bool,
    no_ai: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate input file exists
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let settings = Settings::from_env()?.with_candidates(models);
    let mut auditor = Auditor::with_config(AuditConfig::from(&settings));

    if mock_llm {
        auditor = auditor.with_llm(MockProvider::new());
    } else if !no_ai {
        let provider = super::gemini_provider(&settings).map_err(|e| {
            format!(
                "{}. Run `datasight configure --api-key <KEY>` or pass --no-ai",
                e
            )
        })?;
        auditor = auditor.with_llm(provider);
    }

    debug!(file = %file.display(), candidates = ?auditor.candidates(), "starting audit");
    let (mut table, source) = auditor.load(&file)?;
    let result = if auto_fix {
        auditor.audit_and_fix(&mut table)?
    } else {
        auditor.audit(&table)
    }
    .with_source(source);

    let fixed_path = if auto_fix {
        let path = output.unwrap_or_else(|| fixed_output_path(&file));
        table.write_csv(&path)?;
        Some(path)
    } else {
        None
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_report(&file, &result, fixed_path.as_deref());
    Ok(())
}

/// `fixed_<name>` next to the input file.
fn fixed_output_path(file: &Path) -> PathBuf {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data.csv".to_string());
    file.with_file_name(format!("fixed_{}", name))
}

fn print_report(file: &Path, result: &AuditResult, fixed_path: Option<&Path>) {
    println!("{}", "datasight audit".cyan().bold());
    println!("file: {}", file.display().to_string().white());
    if let Some(source) = &result.source {
        println!(
            "size: {} rows × {} columns",
            source.row_count, source.column_count
        );
    }

    println!();
    println!("{}", "findings".yellow().bold());
    if result.findings.is_empty() {
        println!("- no rule-based issues found");
    }
    for (idx, finding) in result.findings.iter().enumerate() {
        println!("- {}. {}", idx + 1, finding.description);
        println!("  fix: {}", finding.suggested_fix);
    }

    if let (Some(path), Some(fixes)) = (fixed_path, &result.fixes) {
        println!();
        println!(
            "{} saved {} ({} cells filled)",
            "auto-fix:".green().bold(),
            path.display().to_string().white(),
            fixes.cells_filled
        );
    }

    println!();
    match &result.summary_source {
        SummarySource::Model { model } => {
            println!("{} {}", "summary".yellow().bold(), format!("({})", model).dimmed())
        }
        SummarySource::Fallback => println!("{}", "summary".yellow().bold()),
    }
    println!("{}", result.summary);

    println!();
    println!("{}", "what next".cyan().bold());
    for line in hint_lines(result.next_step()) {
        println!("{}", line);
    }
}

fn hint_lines(step: NextStep) -> &'static [&'static str] {
    match step {
        NextStep::QuotaExhausted => &[
            "your ai quota is used up for now.",
            "come back after it resets, or enable billing.",
            "rule checks still work without ai: pass --no-ai.",
        ],
        NextStep::ModelUnavailable => &[
            "that model is not available for your key.",
            "run `datasight models --save` to pick one, then try again.",
        ],
        NextStep::Clear => &[
            "looks like the path is clear.",
            "try a different csv or turn on --auto-fix.",
        ],
    }
}
