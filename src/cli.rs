use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::catalog::IndicatorKey;
use crate::config::Config;
use crate::export::export_dataset_csv;
use crate::pipeline::Dashboard;
use crate::server;

const USAGE: &str = "usage: genderscope <serve|snapshot|export-csv|indicators>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Snapshot,
    ExportCsv,
    Indicators,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("snapshot") => Some(Command::Snapshot),
        Some("export-csv") => Some(Command::ExportCsv),
        Some("indicators") => Some(Command::Indicators),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Snapshot) => handle_snapshot(args),
        Some(Command::ExportCsv) => handle_export_csv(args),
        Some(Command::Indicators) => handle_indicators(),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

/// Logs go to stderr so `snapshot` output stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("genderscope=info,tower_http=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_dashboard() -> Result<Dashboard, i32> {
    let config = Config::load().map_err(|err| {
        eprintln!("config error: {err}");
        1
    })?;
    Dashboard::new(config).map_err(|err| {
        eprintln!("startup error: {err}");
        1
    })
}

fn handle_serve() -> i32 {
    init_tracing();
    let dashboard = match load_dashboard() {
        Ok(dashboard) => dashboard,
        Err(code) => return code,
    };
    let bind_addr = dashboard.config().bind_addr.clone();
    match server::run_server(Arc::new(dashboard), &bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_snapshot(args: &[String]) -> i32 {
    init_tracing();
    let compact = args.iter().any(|arg| arg == "--compact");
    let dashboard = match load_dashboard() {
        Ok(dashboard) => dashboard,
        Err(code) => return code,
    };
    let bundle = dashboard.build();
    let serialized = if compact {
        serde_json::to_string(&bundle)
    } else {
        serde_json::to_string_pretty(&bundle)
    };
    match serialized {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize dashboard: {err}");
            1
        }
    }
}

fn handle_export_csv(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: genderscope export-csv <path.csv>");
        return 2;
    };
    init_tracing();
    let dashboard = match load_dashboard() {
        Ok(dashboard) => dashboard,
        Err(code) => return code,
    };
    let bundle = dashboard.build();
    match export_dataset_csv(&bundle.data, path) {
        Ok(()) => {
            println!(
                "export complete: countries={}, path='{path}'",
                bundle.data.len()
            );
            0
        }
        Err(err) => {
            eprintln!("export failed: {err}");
            1
        }
    }
}

fn handle_indicators() -> i32 {
    println!("key\tcode\tlabel");
    for key in IndicatorKey::ALL {
        println!("{}\t{}\t{}", key.as_str(), key.code(), key.label());
    }
    0
}
