//! Load a scenario from disk.
//!
//! Two plain-text formats:
//!
//! * A tasklist file with one `name arrival` pair per line, e.g.
//!   `omelette 3`. Blank lines are ignored.
//! * One recipe file per dish at `<recipe_dir>/<name>.txt`: the first
//!   non-blank line is the priority (1..=10), every following line is a
//!   burst, `PREP <ticks>` or `COOK <ticks>`.
//!
//! Malformed input is a user error, not a simulator bug, so everything
//! here returns `Result` instead of panicking.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::dish::{DishDef, PRIORITY_MAX, PRIORITY_MIN};
use crate::scenario::Scenario;
use crate::task::{Task, TaskKind};
use crate::types::Tick;

#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    MissingArrival { line: usize, text: String },
    InvalidArrival { dish: String, text: String },
    DuplicateDish { dish: String },
    MissingPriority { dish: String },
    InvalidPriority { dish: String, text: String },
    UnknownBurst { dish: String, text: String },
    InvalidDuration { dish: String, text: String },
    EmptyRecipe { dish: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "reading {}: {source}", path.display())
            }
            LoadError::MissingArrival { line, text } => {
                write!(f, "tasklist line {line}: expected `name arrival`, got {text:?}")
            }
            LoadError::InvalidArrival { dish, text } => {
                write!(f, "dish {dish:?}: arrival {text:?} is not a positive integer")
            }
            LoadError::DuplicateDish { dish } => {
                write!(f, "dish {dish:?} listed more than once")
            }
            LoadError::MissingPriority { dish } => {
                write!(f, "recipe for {dish:?} is empty; expected a priority line")
            }
            LoadError::InvalidPriority { dish, text } => {
                write!(
                    f,
                    "dish {dish:?}: priority {text:?} is not an integer in \
                     [{PRIORITY_MIN},{PRIORITY_MAX}]"
                )
            }
            LoadError::UnknownBurst { dish, text } => {
                write!(f, "dish {dish:?}: burst {text:?} is neither PREP nor COOK")
            }
            LoadError::InvalidDuration { dish, text } => {
                write!(f, "dish {dish:?}: duration {text:?} is not a positive integer")
            }
            LoadError::EmptyRecipe { dish } => {
                write!(f, "recipe for {dish:?} has no bursts")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parse the tasklist: `name arrival` per line.
pub fn parse_tasklist(text: &str) -> Result<Vec<(String, Tick)>, LoadError> {
    let mut dishes: Vec<(String, Tick)> = Vec::new();
    for (nr, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (name, arrival) = match (fields.next(), fields.next()) {
            (Some(name), Some(arrival)) => (name, arrival),
            _ => {
                return Err(LoadError::MissingArrival {
                    line: nr + 1,
                    text: line.to_owned(),
                })
            }
        };
        if let Some(extra) = fields.next() {
            warn!(line = nr + 1, extra, "ignoring trailing tasklist fields");
        }
        let arrival: Tick = arrival.parse().ok().filter(|&t| t > 0).ok_or_else(|| {
            LoadError::InvalidArrival {
                dish: name.to_owned(),
                text: arrival.to_owned(),
            }
        })?;
        if dishes.iter().any(|(n, _)| n == name) {
            return Err(LoadError::DuplicateDish {
                dish: name.to_owned(),
            });
        }
        dishes.push((name.to_owned(), arrival));
    }
    Ok(dishes)
}

/// Parse one recipe file: a priority line, then one burst per line.
pub fn parse_recipe(dish: &str, text: &str) -> Result<(u8, Vec<Task>), LoadError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let priority_line = lines.next().ok_or_else(|| LoadError::MissingPriority {
        dish: dish.to_owned(),
    })?;
    let priority: u8 = priority_line
        .parse()
        .ok()
        .filter(|p| (PRIORITY_MIN..=PRIORITY_MAX).contains(p))
        .ok_or_else(|| LoadError::InvalidPriority {
            dish: dish.to_owned(),
            text: priority_line.to_owned(),
        })?;
    let mut recipe = Vec::new();
    for line in lines {
        let mut fields = line.split_whitespace();
        let kind = match fields.next() {
            Some("PREP") => TaskKind::Prep,
            Some("COOK") => TaskKind::Cook,
            _ => {
                return Err(LoadError::UnknownBurst {
                    dish: dish.to_owned(),
                    text: line.to_owned(),
                })
            }
        };
        let duration = fields.next().unwrap_or("");
        let duration: u32 = duration.parse().ok().filter(|&d| d > 0).ok_or_else(|| {
            LoadError::InvalidDuration {
                dish: dish.to_owned(),
                text: duration.to_owned(),
            }
        })?;
        if let Some(extra) = fields.next() {
            warn!(dish, extra, "ignoring trailing recipe fields");
        }
        recipe.push(Task::new(kind, duration));
    }
    if recipe.is_empty() {
        return Err(LoadError::EmptyRecipe {
            dish: dish.to_owned(),
        });
    }
    Ok((priority, recipe))
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Load a full scenario: the tasklist at `tasklist`, plus one recipe file
/// per listed dish under `recipe_dir`.
pub fn load_menu(tasklist: &Path, recipe_dir: &Path) -> Result<Scenario, LoadError> {
    let listed = parse_tasklist(&read(tasklist)?)?;
    let mut builder = Scenario::builder();
    for (name, arrival_time) in listed {
        let recipe_path = recipe_dir.join(format!("{name}.txt"));
        let (priority, recipe) = parse_recipe(&name, &read(&recipe_path)?)?;
        builder = builder.dish(DishDef {
            name,
            arrival_time,
            priority,
            recipe,
        });
    }
    Ok(builder.build())
}
