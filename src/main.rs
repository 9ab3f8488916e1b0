use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use eyre::{Result, eyre};
use std::path::PathBuf;
use tasklist::{FilterMode, Query, Stats, Task, TaskFile, TaskStore};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Task list manager - add, edit, complete and search tasks")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the task file (default: <data dir>/tasklist/tasks.json)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task name
        name: String,

        /// Due date, e.g. 2025-01-31
        #[arg(long)]
        due: Option<String>,
    },

    /// Replace the name and due date of a task
    Edit {
        id: u64,
        name: String,

        /// New due date; omit to clear it
        #[arg(long)]
        due: Option<String>,
    },

    /// Toggle a task between active and completed
    Done { id: u64 },

    /// Delete a task
    Rm { id: u64 },

    /// Mark every task completed
    DoneAll,

    /// Delete all completed tasks
    ClearDone,

    /// List tasks
    List {
        /// Restrict to all, active or completed tasks
        #[arg(long, default_value = "all")]
        filter: FilterMode,

        /// Case-insensitive name search
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show task counts as a bar chart
    Stats,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let path = match cli.store_path {
        Some(path) => path,
        None => default_store_path()?,
    };
    let mut store = TaskStore::open(TaskFile::new(path));

    match cli.command {
        Commands::Add { name, due } => match store.add_task(&name, due.as_deref()) {
            Some(id) => println!("Added task #{}", id),
            None => println!("Nothing added: task name is empty"),
        },
        Commands::Edit { id, name, due } => {
            if store.update_task(id, &name, due.as_deref()) {
                println!("Updated task #{}", id);
            } else {
                println!("No task #{} updated", id);
            }
        }
        Commands::Done { id } => {
            if store.toggle_completed(id) {
                let task = store.tasks().iter().find(|t| t.id == id);
                let state = task.map_or("unknown", |t| {
                    if t.completed { "completed" } else { "active" }
                });
                println!("Task #{} is now {}", id, state);
            } else {
                println!("No task #{}", id);
            }
        }
        Commands::Rm { id } => {
            if store.delete_task(id) {
                println!("Deleted task #{}", id);
            } else {
                println!("No task #{}", id);
            }
        }
        Commands::DoneAll => {
            store.mark_all_completed();
            println!("Marked {} task(s) completed", store.stats().total);
        }
        Commands::ClearDone => {
            let removed = store.clear_completed();
            println!("Removed {} completed task(s)", removed);
        }
        Commands::List { filter, search } => {
            print_list(&store.query(&Query::new(filter, search)));
        }
        Commands::Stats => {
            print_stats(store.stats());
        }
    }

    Ok(())
}

fn default_store_path() -> Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre!("Could not determine user data directory"))?;
    Ok(base.join("tasklist").join("tasks.json"))
}

fn print_list(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("No tasks found");
        return;
    }

    for task in tasks {
        let marker = if task.completed {
            "[x]".green()
        } else {
            "[ ]".normal()
        };
        let name = if task.completed {
            task.name.strikethrough().dimmed()
        } else {
            task.name.normal()
        };
        match &task.due_date {
            Some(due) => println!(
                "{} #{} {} (due {})",
                marker,
                task.id,
                name,
                format_due(due, task.completed)
            ),
            None => println!("{} #{} {}", marker, task.id, name),
        }
    }
}

/// Pretty-print a due date when it parses as a date, pass it through
/// verbatim otherwise. Overdue dates on active tasks show red.
fn format_due(due: &str, completed: bool) -> ColoredString {
    match NaiveDate::parse_from_str(due, "%Y-%m-%d") {
        Ok(date) => {
            let text = date.format("%b %e, %Y").to_string();
            if !completed && date < Local::now().date_naive() {
                text.red()
            } else {
                text.normal()
            }
        }
        Err(_) => due.normal(),
    }
}

fn print_stats(stats: Stats) {
    let rows = [
        ("Active", stats.active),
        ("Completed", stats.completed),
        ("Total", stats.total),
    ];
    let max = rows.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1);

    for (label, count) in rows {
        let bar = "█".repeat(count * 40 / max);
        println!("{:>9} {:>4} {}", label, count, bar.cyan());
    }
}
