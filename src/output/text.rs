use chrono::NaiveDate;

use crate::filter::Columns;
use crate::models::{Status, Task};

pub fn print_task(t: &Task, today: NaiveDate) {
    println!("Task: {} ({})", t.title, t.id);
    if !t.description.is_empty() {
        println!("  Description: {}", t.description);
    }
    println!("  Status: {}", t.status.as_str());
    println!("  Priority: {}", t.priority.as_str());
    if let Some(due) = t.due_date {
        let marker = if t.is_overdue(today) { " (overdue)" } else { "" };
        println!("  Due: {due}{marker}");
    }
    println!("  Created: {}", t.created_at.to_rfc3339());
}

pub fn print_board(columns: &Columns<'_>, today: NaiveDate) {
    for (idx, (status, tasks)) in columns.iter().enumerate() {
        if idx > 0 {
            println!();
        }
        println!("{} ({})", status.label(), tasks.len());
        if tasks.is_empty() {
            println!("  No tasks.");
        }
        for t in tasks {
            print_card(t, today);
        }
    }
}

fn print_card(t: &Task, today: NaiveDate) {
    let check = if t.status == Status::Completed { "x" } else { " " };
    let due = match t.due_date {
        Some(d) if t.is_overdue(today) => format!(" due {d} OVERDUE"),
        Some(d) => format!(" due {d}"),
        None => String::new(),
    };
    let short_id: String = t.id.chars().take(8).collect();
    println!(
        "  [{check}] {} ({short_id}) {}{due}",
        t.title,
        t.priority.as_str(),
    );
}

pub fn print_counts(columns: &Columns<'_>) {
    println!("Tasks: {}", columns.total());
    for (status, tasks) in columns.iter() {
        println!("  {}: {}", status.label(), tasks.len());
    }
}
