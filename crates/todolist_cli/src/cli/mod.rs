use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new todo
    ///
    /// Example: todolist add "Do exercise"
    /// In interactive mode, `add` with no title opens the input prompt.
    Add {
        title: Option<String>,
    },
    /// Toggle a todo between done and pending
    ///
    /// Example: todolist toggle 1
    Toggle {
        id: u64,
    },
    /// Replace a todo's title
    ///
    /// Example: todolist edit 1 "Do exercise daily"
    /// In interactive mode, `edit <id>` with no title opens the input prompt.
    Edit {
        id: u64,
        new_title: Option<String>,
    },
    /// Delete a todo
    ///
    /// Example: todolist delete 1
    Delete {
        id: u64,
    },
    /// Toggle every todo's done flag at once
    ///
    /// Example: todolist check-all
    CheckAll,
    /// Delete all todos
    ///
    /// Example: todolist clear-all
    ClearAll,
    /// List todos in insertion order
    ///
    /// Example: todolist list
    /// Example: todolist list --json
    List,
}
