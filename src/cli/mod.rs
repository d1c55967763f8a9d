//! CLI command definitions and handlers

pub mod config;
pub mod handlers;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// ankistry - low-level manipulation of flashcard collection databases
#[derive(Parser, Debug)]
#[command(name = "ankistry", version, about, long_about = None)]
pub struct Cli {
    /// Collection database file
    #[arg(short = 'c', long, global = true)]
    pub collection: Option<PathBuf>,

    /// Commit changes without asking for confirmation
    #[arg(short = 'f', long, global = true)]
    pub force: bool,

    /// Suppress informational messages on stderr
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search every note's fields, tags and ids
    Search(PatternArgs),

    /// Search only fields whose name matches a pattern
    SearchField(SearchFieldArgs),

    /// Search only note tags
    SearchTags(PatternArgs),

    /// Search cards by card, note or deck id
    SearchCards(PatternArgs),

    /// Rename or merge tags matching regular expressions
    MvTags(MvTagsArgs),

    /// Remove tags matching regular expressions
    RmTags(PatternArgs),

    /// Print notes' fields in human-readable form
    PrintFields(IdArgs),

    /// Dump notes' fields as JSON for external editing
    DumpFields(IdArgs),

    /// Reload field dumps produced by dump-fields
    ReplaceFields(DocArgs),

    /// Print notes' tags in human-readable form
    PrintTags(IdArgs),

    /// Dump notes' tags as JSON for external editing
    DumpTags(IdArgs),

    /// Reload tag dumps produced by dump-tags
    ReplaceTags(DocArgs),

    /// List models (note types) matching patterns
    ListModels(PatternArgs),

    /// List decks matching patterns
    ListDecks(PatternArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for commands taking a list of patterns.
#[derive(Parser, Debug)]
pub struct PatternArgs {
    /// Regular expressions; all must match (read from stdin when omitted)
    pub patterns: Vec<String>,
}

/// Arguments for the `search-field` command.
#[derive(Parser, Debug)]
pub struct SearchFieldArgs {
    /// Pattern selecting which fields to search by name
    pub field: String,

    /// Regular expressions; all must match (read from stdin when omitted)
    pub patterns: Vec<String>,
}

/// Arguments for the `mv-tags` command.
#[derive(Parser, Debug)]
pub struct MvTagsArgs {
    /// Source patterns followed by the destination tag
    #[arg(required = true, num_args = 2..)]
    pub tags: Vec<String>,
}

/// Arguments for commands taking a list of note ids.
#[derive(Parser, Debug)]
pub struct IdArgs {
    /// Note ids (read from stdin when omitted)
    pub ids: Vec<String>,
}

/// Arguments for commands reloading JSON dump documents.
#[derive(Parser, Debug)]
pub struct DocArgs {
    /// JSON documents (read line-wise from stdin when omitted)
    pub docs: Vec<String>,
}

/// Arguments for the `completions` command.
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
