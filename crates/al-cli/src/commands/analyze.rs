//! `apilens analyze` command.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use al_context::{ExtractOptions, MethodContext};
use al_llm::{dispatch, ChatRequest, HttpChatClient, LlmConfig};
use al_project::{load_project, Caret, LoadConfig};
use anyhow::{bail, Context, Result};

use crate::cli::AnalyzeArgs;

const PROGRESS_TICK: Duration = Duration::from_millis(250);
const NOT_IN_METHOD: &str = "Place the cursor inside a controller method.";

/// Execute the `analyze` command.
///
/// With `--dry-run` the assembled context is printed and nothing is sent.
pub fn run(args: &AnalyzeArgs, quiet: bool) -> Result<()> {
    let root = canonical(&args.project).context("cannot open project root")?;

    // Fail on a missing key before paying for the project load.
    let client = if args.dry_run {
        None
    } else {
        let config = LlmConfig::load(&root)?;
        let client = HttpChatClient::from_config(&config)?;
        Some((client, config))
    };

    let Some(context) = extract(&root, args)? else {
        println!("{NOT_IN_METHOD}");
        return Ok(());
    };

    let Some((client, config)) = client else {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&context)?);
        } else {
            print!("{context}");
        }
        return Ok(());
    };

    let rendered = context.render();
    let request = ChatRequest::for_context(&config, &rendered);
    if !quiet {
        eprintln!(
            "Analyzing {}#{} with {}...",
            context.class_name,
            context.method_name,
            config.provider.display_name()
        );
    }

    let pending = dispatch(client, request)?;
    let reply = pending.wait_with_progress(PROGRESS_TICK, |elapsed| {
        if !quiet {
            eprint!("\r  waiting {:.1}s", elapsed.as_secs_f64());
            let _ = std::io::stderr().flush();
        }
    });
    if !quiet {
        eprintln!();
    }
    let analysis = reply.context("analysis request failed")?;

    if args.json {
        let out = serde_json::json!({
            "context": context,
            "analysis": analysis,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{analysis}");
    }
    Ok(())
}

/// Load the project and extract the context at the requested caret.
///
/// `Ok(None)` when the caret is not inside a method.
pub fn extract(root: &Path, args: &AnalyzeArgs) -> Result<Option<MethodContext>> {
    let file = canonical(&args.file)?;
    let caret = caret(&file, args)?;

    let config = LoadConfig {
        library_roots: args
            .libraries
            .iter()
            .map(|lib| canonical(lib))
            .collect::<Result<_>>()?,
    };
    let (project, report) = load_project(root, &config)?;
    if report.files_failed > 0 {
        tracing::warn!(failed = report.files_failed, "some sources could not be parsed");
    }

    let Some(found) = project.method_at(&file, caret)? else {
        return Ok(None);
    };
    let options = ExtractOptions {
        unwrap_generic_elements: args.unwrap_generics,
    };
    Ok(Some(MethodContext::extract(&project, found.method, found.class, &options)))
}

fn caret(file: &Path, args: &AnalyzeArgs) -> Result<Caret> {
    match (args.offset, args.line, args.column) {
        (Some(offset), _, _) => Ok(Caret::Offset(offset)),
        (None, Some(line), Some(column)) => {
            let source = fs::read_to_string(file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            match Caret::from_line_column(&source, line, column) {
                Some(caret) => Ok(caret),
                None => bail!("no position {line}:{column} in {}", file.display()),
            }
        }
        (None, Some(line), None) => Ok(Caret::Line(line)),
        (None, None, _) => bail!("either --line or --offset is required"),
    }
}

fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("no such file or directory: {}", path.display()))
}
