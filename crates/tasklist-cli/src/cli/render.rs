use colored::Colorize;
use std::collections::HashSet;
use tasklist::events::Event;
use tasklist::model::{Record, Stats};

const DONE_MARKER: &str = "[x]";
const OPEN_MARKER: &str = "[ ]";

pub(super) fn print_tasks(rows: &[(usize, &Record)]) {
    if rows.is_empty() {
        println!("No tasks found.");
        return;
    }

    let width = rows
        .iter()
        .map(|(n, _)| n.to_string().len())
        .max()
        .unwrap_or(1);
    for (n, record) in rows {
        let index = format!("{:>width$}.", n, width = width);
        if record.done {
            println!(
                "{} {} {}",
                index.yellow(),
                DONE_MARKER.green(),
                record.title.dimmed()
            );
        } else {
            println!("{} {} {}", index.yellow(), OPEN_MARKER, record.title);
        }
    }
}

/// Prints one line per record event. The `changed` that follows an `added`
/// for the same record is folded into the `added` line.
pub(super) fn print_feed(events: &[Event]) {
    let mut added = HashSet::new();
    for event in events {
        match event {
            Event::Added(r) => {
                added.insert(r.id.as_str());
                println!("{} {}", "Added:".green(), r.title);
            }
            Event::Changed(r) if added.contains(r.id.as_str()) => {}
            Event::Changed(r) => {
                let state = if r.done { "done" } else { "open" };
                println!("{} {} ({})", "Updated:".green(), r.title, state);
            }
            Event::Removed(r) => println!("{} {}", "Removed:".yellow(), r.title),
            Event::Reset => {}
        }
    }
}

pub(super) fn print_stats(stats: Stats) {
    let line = format!("{} remaining, {} done", stats.remaining, stats.done);
    println!("{}", line.dimmed());
}

pub(super) fn print_notice(message: &str) {
    println!("{}", message.dimmed());
}
