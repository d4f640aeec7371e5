use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use log::debug;
use pagestore::statement::{Input, MetaCommand, Statement};
use pagestore::{InsertOutcome, Layout, MAX_PAGES_LIMIT, PAGE_SIZE, TABLE_MAX_PAGES, Table};

/// A single-table row store with an interactive prompt
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Database file, created if it does not exist
    db_path: PathBuf,

    /// Maximum number of pages the table may use
    #[arg(
        long,
        default_value_t = TABLE_MAX_PAGES,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_PAGES_LIMIT as u64)
    )]
    max_pages: usize,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

struct InputBuffer {
    buffer: String,
}

impl InputBuffer {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Returns `false` once the input is exhausted. Bytes that are not
    /// UTF-8 are replaced rather than rejected.
    fn read_input(&mut self, reader: &mut impl BufRead) -> io::Result<bool> {
        let mut line = Vec::new();
        let bytes_read = reader.read_until(b'\n', &mut line)?;
        self.buffer = String::from_utf8_lossy(&line).trim().to_string();
        Ok(bytes_read > 0)
    }
}

fn print_prompt() -> io::Result<()> {
    print!("db > ");
    io::stdout().flush()
}

fn print_constants(layout: &Layout) {
    println!("Constants:");
    println!("ROW_SIZE: {}", layout.row_size());
    println!("PAGE_SIZE: {}", layout.page_size);
    println!("ROWS_PER_PAGE: {}", layout.rows_per_page());
    println!("TABLE_MAX_PAGES: {}", layout.max_pages);
    println!("TABLE_MAX_ROWS: {}", layout.max_rows());
}

fn execute_statement(statement: Statement, table: &mut Table) -> Result<()> {
    match statement {
        Statement::Insert(row) => match table.insert(&row)? {
            InsertOutcome::Inserted => println!("Executed."),
            InsertOutcome::TableFull => println!("Error: Table full."),
        },
        Statement::Select => {
            for row in table.select()? {
                println!("{row}");
            }
            println!("Executed.");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let layout = Layout::new(PAGE_SIZE, args.max_pages);
    let mut table = Table::open(&args.db_path, layout)
        .with_context(|| format!("Failed to open database {}", args.db_path.display()))?;

    let mut stdin = io::stdin().lock();
    let mut input_buffer = InputBuffer::new();

    loop {
        let read = print_prompt().and_then(|()| input_buffer.read_input(&mut stdin));
        match read {
            Ok(true) => {}
            Ok(false) => {
                debug!("end of input");
                break;
            }
            Err(err) => {
                table.close().context("Failed to flush database")?;
                return Err(err).context("Failed to read input");
            }
        }
        if input_buffer.buffer.is_empty() {
            continue;
        }

        match Input::parse(&input_buffer.buffer) {
            Input::Meta(MetaCommand::Exit) => break,
            Input::Meta(MetaCommand::Constants) => print_constants(&layout),
            Input::Meta(MetaCommand::Unrecognized) => {
                println!("Unrecognized meta-command: {}", input_buffer.buffer);
            }
            Input::Statement(Ok(statement)) => execute_statement(statement, &mut table)?,
            Input::Statement(Err(err)) => println!("{err}"),
        }
    }

    table.close().context("Failed to flush database")
}
