use clap::{CommandFactory, Parser};
use std::collections::HashMap;
use std::io::{self, BufRead};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use todolist_cli::cli::{Cli, Command};
use todolist_core::clock;
use todolist_core::config::{self, Config, ConfigOverride, Palette};
use todolist_core::error::AppError;
use todolist_core::model::Task;
use todolist_core::session::Session;
use todolist_core::storage::{JsonFileSink, json_store};
use todolist_core::store::TodoStore;

fn open_session() -> Result<Session, AppError> {
    let path = json_store::store_path()?;
    let store = TodoStore::from_tasks(json_store::load_tasks(&path));
    let sink = JsonFileSink::new(path);
    Ok(Session::new(store, Box::new(sink), clock::current_clock()?))
}

#[derive(Tabled)]
struct TodoRow {
    #[tabled(rename = " ")]
    mark: &'static str,
    #[tabled(rename = "id")]
    id: u64,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "time")]
    time: String,
}

impl TodoRow {
    fn from_task(task: &Task, palette: &Palette) -> Self {
        let title = if task.has_done {
            palette.strike_through(&task.title)
        } else {
            task.title.clone()
        };
        Self {
            mark: if task.has_done { "[x]" } else { "[ ]" },
            id: task.id,
            title,
            time: task.time.clone(),
        }
    }
}

fn render_list(tasks: &[Task], json: bool, palette: &Palette) -> Result<(), AppError> {
    if json {
        let payload =
            serde_json::to_string(tasks).map_err(|err| AppError::invalid_data(err.to_string()))?;
        println!("{payload}");
        return Ok(());
    }

    println!("{}", palette.accentize("Today"));
    println!("{}", palette.mutedize(&clock::current_date()?));

    if tasks.is_empty() {
        println!("No todos yet.");
        return Ok(());
    }

    let rows: Vec<TodoRow> = tasks
        .iter()
        .map(|task| TodoRow::from_task(task, palette))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::blank());
    println!("{table}");
    Ok(())
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    let payload =
        serde_json::to_string(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{payload}");
    Ok(())
}

fn state_label(has_done: bool) -> &'static str {
    if has_done { "done" } else { "pending" }
}

fn run_command(cli: Cli, palette: &Palette) -> Result<(), AppError> {
    match cli.command {
        Command::Add { title } => {
            let Some(title) = title else {
                return Err(AppError::invalid_input("title is required"));
            };

            let mut session = open_session()?;
            session.toggle_modal();
            session.set_input(&title);
            if let Some(task) = session.submit()? {
                if cli.json {
                    print_task_json(&task)?;
                } else {
                    println!("Added todo: {} ({})", task.title, task.id);
                }
            }
        }
        Command::Toggle { id } => {
            let mut session = open_session()?;
            // Unknown ids are silent no-ops, not errors.
            if let Some(task) = session.toggle(id)? {
                if cli.json {
                    print_task_json(&task)?;
                } else {
                    println!(
                        "Toggled todo: {} ({}) -> {}",
                        task.title,
                        task.id,
                        state_label(task.has_done)
                    );
                }
            }
        }
        Command::Edit { id, new_title } => {
            let Some(new_title) = new_title else {
                return Err(AppError::invalid_input("new title is required"));
            };

            let mut session = open_session()?;
            if session.open_for_edit(id) {
                session.set_input(&new_title);
                if let Some(task) = session.submit()? {
                    if cli.json {
                        print_task_json(&task)?;
                    } else {
                        println!("Updated todo: {} ({})", task.title, task.id);
                    }
                }
            }
        }
        Command::Delete { id } => {
            let mut session = open_session()?;
            if let Some(task) = session.remove(id)? {
                if cli.json {
                    print_task_json(&task)?;
                } else {
                    println!("Deleted todo: {} ({})", task.title, task.id);
                }
            }
        }
        Command::CheckAll => {
            let mut session = open_session()?;
            session.check_all()?;
            if cli.json {
                render_list(session.tasks(), true, palette)?;
            } else {
                println!("Toggled {} todos", session.tasks().len());
            }
        }
        Command::ClearAll => {
            let mut session = open_session()?;
            session.clear_all()?;
            if cli.json {
                render_list(session.tasks(), true, palette)?;
            } else {
                println!("Cleared all todos");
            }
        }
        Command::List => {
            let session = open_session()?;
            render_list(session.tasks(), cli.json, palette)?;
        }
    }

    Ok(())
}

fn dispatch_interactive(
    session: &mut Session,
    cli: Cli,
    palette: &Palette,
) -> Result<(), AppError> {
    match cli.command {
        Command::Add { title } => match title {
            Some(title) => {
                session.toggle_modal();
                session.set_input(&title);
                if let Some(task) = session.submit()? {
                    println!("Added todo: {} ({})", task.title, task.id);
                }
            }
            // Prompt is printed by the loop once the modal is open.
            None => session.toggle_modal(),
        },
        Command::Edit { id, new_title } => match new_title {
            Some(new_title) => {
                if session.open_for_edit(id) {
                    session.set_input(&new_title);
                    if let Some(task) = session.submit()? {
                        println!("Updated todo: {} ({})", task.title, task.id);
                    }
                }
            }
            None => {
                session.open_for_edit(id);
            }
        },
        Command::Toggle { id } => {
            if let Some(task) = session.toggle(id)? {
                println!(
                    "Toggled todo: {} ({}) -> {}",
                    task.title,
                    task.id,
                    state_label(task.has_done)
                );
            }
        }
        Command::Delete { id } => {
            if let Some(task) = session.remove(id)? {
                println!("Deleted todo: {} ({})", task.title, task.id);
            }
        }
        Command::CheckAll => {
            session.check_all()?;
            println!("Toggled {} todos", session.tasks().len());
        }
        Command::ClearAll => {
            session.clear_all()?;
            println!("Cleared all todos");
        }
        Command::List => render_list(session.tasks(), cli.json, palette)?,
    }

    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line.strip_prefix("error: ").unwrap_or(first_line);
    AppError::invalid_input(message.to_string())
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn expand_alias(line: &str, aliases: &HashMap<String, String>) -> String {
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map(|(head, rest)| (head, rest.trim_start()))
        .unwrap_or((line, ""));

    match aliases.get(head) {
        Some(command) if rest.is_empty() => command.clone(),
        Some(command) => format!("{command} {rest}"),
        None => line.to_string(),
    }
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn print_modal_prompt(session: &Session) {
    if session.edit_cursor().is_some() {
        println!("Edit todo (empty line closes):");
    } else {
        println!("Add todo (empty line closes):");
    }
}

fn run_interactive(config: &Config, palette: &Palette) -> Result<(), AppError> {
    let mut session = open_session()?;
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();

        // While the modal is open the line is the pending input, not a
        // command. An empty line closes the modal without submitting.
        if session.modal_open() {
            if line.is_empty() {
                session.toggle_modal();
                continue;
            }

            session.set_input(line);
            match session.submit() {
                Ok(Some(task)) => println!("Saved todo: {} ({})", task.title, task.id),
                Ok(None) => {}
                Err(err) => eprintln!("ERROR: {}", err),
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let expanded = expand_alias(line, &config.aliases);
        let args = match split_command_line(&expanded) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("todolist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = dispatch_interactive(&mut session, cli, palette) {
            eprintln!("ERROR: {}", err);
        }

        if session.modal_open() {
            print_modal_prompt(&session);
        }
    }

    Ok(())
}

fn parse_overrides(raw: &[String]) -> Result<Vec<ConfigOverride>, AppError> {
    raw.iter().map(|value| config::parse_override(value)).collect()
}

fn main() {
    let load = config::load_config_with_fallback();
    if let Some(warning) = &load.warning {
        eprintln!("WARNING: {}", warning);
    }

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        let palette = config::palette_for_theme(load.config.theme.as_deref());
        if let Err(err) = run_interactive(&load.config, &palette) {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            let _ = err.print();
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let config = match parse_overrides(&cli.config_override) {
        Ok(overrides) => config::apply_overrides(load.config, &overrides),
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    };
    let palette = config::palette_for_theme(config.theme.as_deref());

    if let Err(err) = run_command(cli, &palette) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
