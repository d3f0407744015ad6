use anyhow::{Context, Result};
use comfy_table::{Cell, ContentArrangement, Table};
use storedesk_app::App;
use storedesk_core::doctor::{DoctorReport, run_doctor};
use storedesk_core::route::Route;
use storedesk_core::store::Store;
use storedesk_core::time::display_timestamp;
use storedesk_tui::UiExit;

use crate::cli::{Cli, Command};
use crate::diagnostics::DiagnosticsSession;

pub fn run_with_deps(cli: Cli, diagnostics: &DiagnosticsSession) -> Result<()> {
    match cli.command {
        Some(Command::Doctor) => run_doctor_command(),
        Some(Command::Stores) => run_stores_command(diagnostics),
        None => run_root_command(cli.store.as_deref(), diagnostics),
    }
}

fn run_root_command(store: Option<&str>, diagnostics: &DiagnosticsSession) -> Result<()> {
    let start = start_route(store)?;
    let app = connect(diagnostics)?;

    match storedesk_tui::run_root(&app, start)? {
        UiExit::Completed => diagnostics.record("console exited"),
        UiExit::Canceled => diagnostics.record("console canceled"),
    }

    Ok(())
}

fn run_stores_command(diagnostics: &DiagnosticsSession) -> Result<()> {
    let app = connect(diagnostics)?;
    let stores = app.list_stores()?;
    println!("{}", stores_table(&stores));
    Ok(())
}

fn run_doctor_command() -> Result<()> {
    let report = run_doctor();
    print_doctor_report(&report);
    Ok(())
}

fn connect(diagnostics: &DiagnosticsSession) -> Result<App> {
    let config = storedesk_app::ensure_config_ready()?;
    Ok(App::from_config(&config).with_log(diagnostics.request_log()))
}

fn start_route(store: Option<&str>) -> Result<Route> {
    let Some(store) = store else {
        return Ok(Route::Root);
    };

    Route::parse(&format!("/{}", store.trim()))
        .with_context(|| format!("invalid --store value '{store}'"))
}

fn stores_table(stores: &[Store]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Updated"]);

    for store in stores {
        let updated = store
            .updated_at
            .as_deref()
            .map(display_timestamp)
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(store.id.as_str()),
            Cell::new(store.name.as_str()),
            Cell::new(updated),
        ]);
    }

    table
}

fn print_doctor_report(report: &DoctorReport) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Check", "Status", "Details"]);

    for check in &report.checks {
        table.add_row(vec![
            Cell::new(check.name.as_str()),
            Cell::new(check.state.to_string()),
            Cell::new(check.details.as_str()),
        ]);
    }

    println!("{table}");
    println!("{}", report.summary());
}
