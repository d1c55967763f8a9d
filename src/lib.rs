//! ankistry - low-level offline manipulation of flashcard collection
//! databases: tag rename/removal, field dump and reload, and regex
//! search over notes, cards, models and decks.
//!
//! All writes accumulate in one pending transaction; nothing touches
//! the collection durably until the final confirmation gate commits.

pub mod cli;
pub mod domain;
pub mod ops;
pub mod store;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::{Config, locate_collection},
    handlers::{
        Catalog, Reporter, handle_dump_fields, handle_dump_tags, handle_list_catalog,
        handle_mv_tags, handle_print_fields, handle_print_tags, handle_replace_fields,
        handle_replace_tags, handle_rm_tags, handle_search, handle_search_field,
    },
};
use ops::search::SearchScope;
use store::Collection;

/// Exit code for operational failures: no matches, declined commit,
/// or an error during the operation itself.
const EXIT_OPERATION_FAILED: u8 = 2;
/// Exit code for environment failures: the collection could not be
/// located or opened.
const EXIT_ENVIRONMENT_FAILED: u8 = 1;

/// Main entry point for the CLI application.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Command::Completions(args) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(args.shell, &mut cmd, "ankistry", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let mut reporter = Reporter::new(cli.quiet);

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::from(EXIT_ENVIRONMENT_FAILED);
        }
    };
    let path = match locate_collection(cli.collection.as_deref(), &config) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::from(EXIT_ENVIRONMENT_FAILED);
        }
    };
    let mut col = match Collection::open(&path) {
        Ok(col) => col,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::from(EXIT_ENVIRONMENT_FAILED);
        }
    };

    let success = match dispatch(&mut col, &cli.command, &mut reporter) {
        Ok(success) => success,
        Err(err) => {
            eprintln!("error: {err:#}");
            false
        }
    };

    if !success {
        // Dropping the session rolls back anything partially applied.
        return ExitCode::from(EXIT_OPERATION_FAILED);
    }

    if col.is_dirty() {
        if cli.force || confirm_commit() {
            if let Err(err) = col.commit() {
                eprintln!("error: {err:#}");
                return ExitCode::from(EXIT_OPERATION_FAILED);
            }
        } else {
            reporter.info("Canceling changes, your collection was not modified.");
            reporter.info("(If piping to stdin, use the -f switch to force committing.)");
            if let Err(err) = col.rollback() {
                eprintln!("error: {err:#}");
            }
            return ExitCode::from(EXIT_OPERATION_FAILED);
        }
    }

    ExitCode::SUCCESS
}

fn dispatch(col: &mut Collection, command: &Command, reporter: &mut Reporter) -> Result<bool> {
    match command {
        Command::Search(args) => handle_search(col, args, SearchScope::All, reporter),
        Command::SearchField(args) => handle_search_field(col, args, reporter),
        Command::SearchTags(args) => handle_search(col, args, SearchScope::Tags, reporter),
        Command::SearchCards(args) => handle_search(col, args, SearchScope::Cards, reporter),
        Command::MvTags(args) => handle_mv_tags(col, args, reporter),
        Command::RmTags(args) => handle_rm_tags(col, args, reporter),
        Command::PrintFields(args) => handle_print_fields(col, args, reporter),
        Command::DumpFields(args) => handle_dump_fields(col, args, reporter),
        Command::ReplaceFields(args) => handle_replace_fields(col, args, reporter),
        Command::PrintTags(args) => handle_print_tags(col, args, reporter),
        Command::DumpTags(args) => handle_dump_tags(col, args, reporter),
        Command::ReplaceTags(args) => handle_replace_tags(col, args, reporter),
        Command::ListModels(args) => handle_list_catalog(col, args, Catalog::Models, reporter),
        Command::ListDecks(args) => handle_list_catalog(col, args, Catalog::Decks, reporter),
        Command::Completions(_) => unreachable!("handled before opening the collection"),
    }
}

/// The confirmation gate in front of every commit.
///
/// EOF, an unreadable stdin, or anything but an explicit `y` counts
/// as "no" - the collection is the user's only copy.
fn confirm_commit() -> bool {
    eprintln!();
    eprintln!(
        "WARNING: back up your collection before committing any changes. Check that \
         everything went as expected before reviewing cards again, at the risk of \
         having to restore the backup and losing your work."
    );
    eprint!("Commit changes (y/N)? ");
    let _ = io::stderr().flush();

    let mut answer = String::new();
    match io::stdin().read_line(&mut answer) {
        Ok(0) | Err(_) => {
            eprintln!();
            false
        }
        Ok(_) => matches!(answer.trim(), "y" | "Y"),
    }
}
