mod cli;
mod host;
mod load;
mod print;
mod view;
mod watch;

use std::fs::File;

use anyhow::{Context, Result, bail};
use clap::Parser;
use ledgerview_lib::actions::{ActionMode, RowActions};
use ledgerview_lib::model::Record;
use ledgerview_lib::options::build_options;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use crate::cli::{Cli, Command};
use crate::host::PrintingHost;
use crate::watch::Watcher;

fn init_logging(cli: &Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => {
            TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    match cli.command {
        Command::Show { source, view } => {
            let mut table = load::open_table(&source.data, &source.table)?;
            view::apply(&mut table, &view)?;
            print!("{}", print::render_page(&table));
        }
        Command::Options { data, key } => {
            let records: Vec<Record> = load::load_records(&data)?;
            print!("{}", print::render_options(&build_options(&key, &records)));
        }
        Command::Action {
            source,
            view,
            row,
            mode,
        } => {
            let mut table = load::open_table(&source.data, &source.table)?;
            view::apply(&mut table, &view)?;
            let mode = ActionMode::parse(&mode);
            let visible = table.visible();
            let Some(record) = visible.get(row) else {
                bail!("row {} is outside the {} visible rows", row, visible.len());
            };
            let mut host = PrintingHost::default();
            if !RowActions::dispatch(&table.config().actions, record, &mode, &mut host) {
                bail!("action '{}' is not enabled for this table", mode);
            }
        }
        Command::Watch {
            source,
            view,
            interval,
            ticks,
        } => {
            let mut table = load::open_table(&source.data, &source.table)?;
            view::apply(&mut table, &view)?;
            print!("{}", print::render_page(&table));
            Watcher::new(source.data, interval, ticks)
                .run(&mut table)
                .await?;
        }
    }

    Ok(())
}
