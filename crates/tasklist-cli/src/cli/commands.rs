use super::render::{print_feed, print_notice, print_stats, print_tasks};
use super::setup::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tasklist::collection::{Collection, Renamed};
use tasklist::config::TaskListConfig;
use tasklist::error::TaskError;
use tasklist::events::{Event, EventKind};
use tasklist::logging::init_logging;
use tasklist::model::NewRecord;
use tasklist::store::fs_backend::FsBackend;

struct AppContext {
    todos: Collection<FsBackend>,
    /// Record events seen since startup, in delivery order.
    feed: Rc<RefCell<Vec<Event>>>,
    /// Set by any event after the initial fetch.
    dirty: Rc<Cell<bool>>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { title }) => handle_add(&mut ctx, title),
        Some(Commands::List { done, remaining }) => handle_list(&ctx, done, remaining),
        Some(Commands::Toggle { indexes }) => handle_toggle(&mut ctx, &indexes),
        Some(Commands::Rename { index, title }) => handle_rename(&mut ctx, index, title),
        Some(Commands::Remove { indexes }) => handle_remove(&mut ctx, &indexes),
        Some(Commands::ClearDone) => handle_clear_done(&mut ctx),
        Some(Commands::ToggleAll) => handle_toggle_all(&mut ctx),
        Some(Commands::Stats) => {
            print_stats(ctx.todos.stats());
            Ok(())
        }
        None => handle_list(&ctx, false, false),
    }?;

    if ctx.dirty.get() {
        print_feed(&ctx.feed.borrow());
        print_stats(ctx.todos.stats());
    }
    Ok(())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let mut config = TaskListConfig::load(cli.config.as_deref())?;
    if let Some(namespace) = &cli.namespace {
        config.namespace = namespace.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    init_logging(level, None)?;

    let data_dir = config.data_dir()?;
    debug!(
        "event=cli_start namespace={} data_dir={}",
        config.namespace,
        data_dir.display()
    );

    let mut todos = Collection::from_config(FsBackend::new(data_dir), &config);

    let feed = Rc::new(RefCell::new(Vec::new()));
    for kind in [EventKind::Added, EventKind::Changed, EventKind::Removed] {
        let sink = Rc::clone(&feed);
        todos.subscribe(kind, move |e: &Event| sink.borrow_mut().push(e.clone()));
    }
    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    todos.subscribe(EventKind::Any, move |_| flag.set(true));

    todos
        .fetch()
        .with_context(|| format!("could not load namespace `{}`", config.namespace))?;
    dirty.set(false);

    Ok(AppContext { todos, feed, dirty })
}

/// Adds a user-facing hint to write failures.
fn saved<T>(result: tasklist::error::Result<T>) -> Result<T> {
    match result {
        Err(e @ TaskError::StorageUnavailable(_)) => {
            Err(e).context("changes could not be saved")
        }
        other => Ok(other?),
    }
}

/// Maps 1-based positions to record ids, failing on the first bad one.
fn resolve_positions(todos: &Collection<FsBackend>, indexes: &[usize]) -> Result<Vec<String>> {
    indexes
        .iter()
        .map(|&n| {
            n.checked_sub(1)
                .and_then(|i| todos.iter().nth(i))
                .map(|r| r.id.clone())
                .with_context(|| format!("No task at position {}", n))
        })
        .collect()
}

fn handle_add(ctx: &mut AppContext, title: Vec<String>) -> Result<()> {
    let title = title.join(" ");
    saved(ctx.todos.add(NewRecord::titled(title.trim())))?;
    Ok(())
}

fn handle_list(ctx: &AppContext, done: bool, remaining: bool) -> Result<()> {
    let done_ids: Vec<&str> = ctx
        .todos
        .done()
        .into_iter()
        .map(|r| r.id.as_str())
        .collect();
    let rows: Vec<_> = ctx
        .todos
        .iter()
        .enumerate()
        .map(|(i, r)| (i + 1, r))
        .filter(|(_, r)| {
            let is_done = done_ids.contains(&r.id.as_str());
            (!done && !remaining) || (done && is_done) || (remaining && !is_done)
        })
        .collect();
    print_tasks(&rows);
    if !done && !remaining && !ctx.todos.is_empty() {
        print_stats(ctx.todos.stats());
    }
    Ok(())
}

fn handle_toggle(ctx: &mut AppContext, indexes: &[usize]) -> Result<()> {
    for id in resolve_positions(&ctx.todos, indexes)? {
        saved(ctx.todos.toggle_done(&id))?;
    }
    Ok(())
}

fn handle_rename(ctx: &mut AppContext, index: usize, title: Vec<String>) -> Result<()> {
    let ids = resolve_positions(&ctx.todos, &[index])?;
    let title = title.join(" ");
    match saved(ctx.todos.rename(&ids[0], title.trim()))? {
        Renamed::Updated(record) => debug!("event=cli_renamed id={}", record.id),
        Renamed::Removed(record) => debug!("event=cli_renamed_to_empty id={}", record.id),
    }
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, indexes: &[usize]) -> Result<()> {
    for id in resolve_positions(&ctx.todos, indexes)? {
        match ctx.todos.remove(&id) {
            Ok(_) => {}
            // Already gone is as good as removed.
            Err(e) if e.is_not_found() => debug!("event=cli_remove_missing id={}", id),
            Err(e) => return saved(Err(e)),
        }
    }
    Ok(())
}

fn handle_clear_done(ctx: &mut AppContext) -> Result<()> {
    let removed = saved(ctx.todos.clear_done())?;
    if removed.is_empty() {
        print_notice("No finished tasks to clear.");
    }
    Ok(())
}

fn handle_toggle_all(ctx: &mut AppContext) -> Result<()> {
    let all_done = ctx.todos.remaining().is_empty();
    saved(ctx.todos.set_all_done(!all_done))?;
    Ok(())
}
