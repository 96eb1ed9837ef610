use std::fs;
use std::io::Write;
use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;

use crate::export;
use crate::models::{ExportRequest, QUERY_RESULT_VERSION};
use crate::records::load_records;
use crate::search::engine;
use crate::server;

mod args;
mod config;
mod format;
mod http_backend;

pub use args::{
    Cli, Commands, ExportArgs, ExportFormatArg, OutputFormat, QueryArgs, QueryFieldArg, ServeArgs,
    ShowArgs, SortArg,
};
pub use format::{render_details, render_payload};

use config::{
    apply_export_config_defaults, apply_query_config_defaults, apply_serve_config_defaults,
    apply_show_config_defaults, load_cli_config,
};
use http_backend::HttpQueryBackend;

/// Entry point for the CLI binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.schema_version {
        println!("Query result JSON schema version: {QUERY_RESULT_VERSION}");
        return Ok(());
    }

    let cli_config = load_cli_config()?;

    match cli.command {
        Some(Commands::Query(mut query_args)) => {
            if let Some(ref config) = cli_config {
                apply_query_config_defaults(config, &mut query_args);
            }

            args::require_record_paths(&query_args.records)?;
            let records = load_records(&query_args.records)?;
            let request = args::query_request_from_args(&query_args, records);

            let result = if let Some(server_url) =
                effective_server_url(query_args.server.as_deref(), query_args.no_server)
            {
                let backend = HttpQueryBackend::new(server_url)?;
                backend.query(&request)?
            } else {
                engine::run_query(request)
            };

            match query_args.output_format() {
                OutputFormat::Text => format::print_text(&result),
                OutputFormat::Table => format::print_table(&result),
                OutputFormat::Json => {
                    serde_json::to_writer(std::io::stdout(), &result)?;
                    println!();
                    Ok(())
                }
            }
        }
        Some(Commands::Export(mut export_args)) => {
            if let Some(ref config) = cli_config {
                apply_export_config_defaults(config, &mut export_args);
            }

            args::require_record_paths(&export_args.records)?;
            let records = load_records(&export_args.records)?;
            let total = records.len();
            let export_format = export_args.export_format();

            let payload = if let Some(server_url) =
                effective_server_url(export_args.server.as_deref(), export_args.no_server)
            {
                let backend = HttpQueryBackend::new(server_url)?;
                backend.export(&ExportRequest {
                    records,
                    index: export_args.index,
                    format: export_format,
                })?
            } else {
                export::export_selected(&records, export_args.index, export_format).ok_or_else(|| {
                    anyhow!(
                        "no record to export at index {} ({} records loaded)",
                        export_args.index,
                        total
                    )
                })?
            };

            let rendered = format::render_payload(&payload, export_args.layout);

            match &export_args.out_dir {
                Some(out_dir) => {
                    fs::create_dir_all(out_dir).with_context(|| {
                        format!("failed to create output directory {}", out_dir.display())
                    })?;
                    let path = out_dir.join(export_format.file_name());
                    fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "export written");
                    println!("{}", path.display());
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(rendered.as_bytes())?;
                    stdout.flush()?;
                }
            }

            Ok(())
        }
        Some(Commands::Show(mut show_args)) => {
            if let Some(ref config) = cli_config {
                apply_show_config_defaults(config, &mut show_args);
            }

            args::require_record_paths(&show_args.records)?;
            let records = load_records(&show_args.records)?;
            let record = records.get(show_args.index).ok_or_else(|| {
                anyhow!(
                    "no record at index {} ({} records loaded)",
                    show_args.index,
                    records.len()
                )
            })?;

            format::print_details(record)
        }
        Some(Commands::Serve(mut serve_args)) => {
            if let Some(ref config) = cli_config {
                apply_serve_config_defaults(config, &mut serve_args);
            }

            let addr: SocketAddr = serve_args
                .addr()
                .parse()
                .with_context(|| format!("invalid listen address {}", serve_args.addr()))?;
            println!("Starting contractiq HTTP server on http://{addr}");

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;

            runtime.block_on(server::run(addr))?;
            Ok(())
        }
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

fn effective_server_url(server_flag: Option<&str>, no_server: bool) -> Option<String> {
    if no_server {
        None
    } else {
        server_flag.map(|s| s.to_string())
    }
}
