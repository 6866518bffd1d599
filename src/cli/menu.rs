//! Interactive numbered menu
//!
//! A prompt loop over stdin/stdout. Rejected input is reported and the loop
//! keeps going; end of input exits like option 6.

use std::io::{BufRead, Write};

use anyhow::Result;

use super::task::{added_message, completed_message, render_list, render_next, SortKey};
use crate::domain::parse_dependency_list;
use crate::storage::{TaskError, TaskManager, TaskPersistence};

const MENU: &str = "\
Options:
1. Add task
2. List tasks (by priority)
3. List tasks (by due date)
4. Complete task
5. Show next task
6. Exit
";

/// Runs the menu until the user exits or input ends
pub fn run_menu<P, R, W>(manager: &mut TaskManager<P>, mut input: R, out: &mut W) -> Result<()>
where
    P: TaskPersistence,
    R: BufRead,
    W: Write,
{
    writeln!(out, "Task manager with priorities and dependencies")?;

    loop {
        write!(out, "\n{}", MENU)?;
        let Some(choice) = prompt(&mut input, out, "Choose an option: ")? else {
            break;
        };

        match choice.trim() {
            "1" => {
                if !add_from_prompts(manager, &mut input, out)? {
                    break;
                }
            }
            "2" => write!(out, "{}", render_list(&manager.list_by_priority(), SortKey::Priority))?,
            "3" => write!(out, "{}", render_list(&manager.list_by_due_date(), SortKey::Due))?,
            "4" => {
                let Some(name) = prompt(&mut input, out, "Name of the task to complete: ")? else {
                    break;
                };
                let removed = manager.complete_task(&name)?;
                writeln!(out, "{}", completed_message(&name, removed))?;
            }
            "5" => write!(out, "{}", render_next(manager.peek_next()))?,
            "6" => {
                writeln!(out, "Goodbye.")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid option. Please choose 1-6.")?,
        }
    }

    writeln!(out)?;
    Ok(())
}

/// Asks for each field and adds the task. Returns false if input ended.
fn add_from_prompts<P, R, W>(manager: &mut TaskManager<P>, input: &mut R, out: &mut W) -> Result<bool>
where
    P: TaskPersistence,
    R: BufRead,
    W: Write,
{
    let prompts = [
        "Task name: ",
        "Priority (integer, lower = more urgent): ",
        "Due date (YYYY-MM-DD): ",
        "Dependencies (comma separated): ",
    ];

    let mut answers = Vec::with_capacity(prompts.len());
    for label in prompts {
        match prompt(input, out, label)? {
            Some(answer) => answers.push(answer),
            None => return Ok(false),
        }
    }

    let deps = parse_dependency_list(&answers[3]);
    match manager.add_task(&answers[0], &answers[1], &answers[2], &deps) {
        Ok(task) => writeln!(out, "{}", added_message(&task))?,
        Err(TaskError::Invalid(e)) => writeln!(out, "Error: {}", e)?,
        Err(TaskError::Storage(e)) => return Err(e),
    }
    Ok(true)
}

/// Prints a label and reads one line, without its line ending
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
