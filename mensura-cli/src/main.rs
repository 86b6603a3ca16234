//! Mensura command-line host
//!
//! Applies the units plugin to documents on disk, or to stdin when no paths
//! are given. Logs go to stderr (filtered by `RUST_LOG`, default `info`);
//! stdout only carries document output.

mod args;
mod input;

use args::Cli;
use clap::Parser;
use input::Document;
use mensura::{apply_defaults, MensuraError, Result, UnitsPlugin};
use mensura_plugin::{Content, ContentKind, PluginRegistry, Settings};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!(failed, "some documents could not be processed");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(code = err.code(), "{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns the number of documents that failed
async fn run(cli: Cli) -> Result<usize> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::from_json_str(&fs::read_to_string(path)?)?,
        None => Settings::new(),
    };
    cli.apply_overrides(&mut settings);
    apply_defaults(&mut settings);

    let plugin = UnitsPlugin::from_settings(&settings)?;
    let registry = Arc::new(PluginRegistry::new().with_plugin(plugin));

    if cli.paths.is_empty() {
        return run_stdin(&registry).map(|_| 0);
    }

    let documents = input::collect(&cli.paths)?;
    info!(documents = documents.len(), "processing documents");

    let mut tasks = JoinSet::new();
    for (index, document) in documents.into_iter().enumerate() {
        let registry = Arc::clone(&registry);
        tasks.spawn_blocking(move || {
            let result = process_document(&registry, &document);
            (index, document, result)
        });
    }

    let mut results = Vec::new();
    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(err) => {
                error!("document task panicked: {}", err);
                failed += 1;
            }
        }
    }

    // Output follows input order regardless of completion order
    results.sort_by_key(|(index, _, _)| *index);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    for (_, document, result) in results {
        let outcome = result.and_then(|content| match &cli.out {
            Some(out) => write_output(out, &document, &content),
            None => print_output(&mut stdout, &document, &content),
        });
        if let Err(err) = outcome {
            error!(path = %document.source.display(), code = err.code(), "{}", err);
            failed += 1;
        }
    }

    Ok(failed)
}

fn run_stdin(registry: &PluginRegistry) -> Result<()> {
    let mut body = String::new();
    io::stdin().read_to_string(&mut body)?;

    let mut content = Content::article("<stdin>", body);
    registry.run(&mut content)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(content.body.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Read and transform one document; static assets are not read
fn process_document(registry: &PluginRegistry, document: &Document) -> Result<Content> {
    let body = match document.kind {
        ContentKind::Static => String::new(),
        _ => fs::read_to_string(&document.source)
            .map_err(|e| MensuraError::Io(format!("{}: {}", document.source.display(), e)))?,
    };

    let mut content = Content::new(document.source.clone(), document.kind, body);
    registry.run(&mut content)?;
    Ok(content)
}

fn write_output(out: &Path, document: &Document, content: &Content) -> Result<()> {
    let target = out.join(&document.relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    match document.kind {
        ContentKind::Static => {
            fs::copy(&document.source, &target)?;
        }
        _ => fs::write(&target, &content.body)?,
    }
    debug!(path = %target.display(), "wrote output");
    Ok(())
}

fn print_output(stdout: &mut impl Write, document: &Document, content: &Content) -> Result<()> {
    if !document.kind.is_text() {
        debug!(path = %document.source.display(), "static content not printed");
        return Ok(());
    }

    stdout.write_all(content.body.as_bytes())?;
    if !content.body.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn registry() -> PluginRegistry {
        let plugin = UnitsPlugin::from_settings(&Settings::new()).unwrap();
        PluginRegistry::new().with_plugin(plugin)
    }

    #[test]
    fn test_process_and_write() {
        let dir = std::env::temp_dir().join(format!("mensura-cli-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let input_dir = dir.join("in");
        fs::create_dir_all(&input_dir).unwrap();
        fs::write(input_dir.join("run.md"), "Ran {unit: 3 mi :: km}.").unwrap();
        fs::write(input_dir.join("data.csv"), "{unit: 1 m}").unwrap();

        let out = dir.join("out");
        for document in input::collect(&[input_dir.clone()]).unwrap() {
            let content = process_document(&registry(), &document).unwrap();
            write_output(&out, &document, &content).unwrap();
        }

        assert_eq!(
            fs::read_to_string(out.join("run.md")).unwrap(),
            "Ran 3 miles (<em>4.83 kilometers</em>)."
        );
        assert_eq!(fs::read_to_string(out.join("data.csv")).unwrap(), "{unit: 1 m}");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_print_output_skips_static() {
        let document = Document {
            source: PathBuf::from("logo.png"),
            relative: PathBuf::from("logo.png"),
            kind: ContentKind::Static,
        };
        let content = Content::new("logo.png", ContentKind::Static, "");
        let mut buffer = Vec::new();
        print_output(&mut buffer, &document, &content).unwrap();
        assert!(buffer.is_empty());

        let document = Document { kind: ContentKind::Article, ..document };
        let content = Content::article("a.md", "text");
        print_output(&mut buffer, &document, &content).unwrap();
        assert_eq!(buffer, b"text\n");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let document = Document {
            source: PathBuf::from("/definitely/not/here.md"),
            relative: PathBuf::from("here.md"),
            kind: ContentKind::Article,
        };
        let err = process_document(&registry(), &document).unwrap_err();
        assert_eq!(err.code(), mensura::codes::IO_ERROR);
    }
}
