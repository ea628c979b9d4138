//! Coloured, icon-prefixed console feedback.

use ansi_term::{Colour, Style};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn icon(self) -> &'static str {
        match self {
            Level::Info => "ℹ️",
            Level::Success => "✅",
            Level::Warning => "⚠️",
            Level::Error => "❌",
        }
    }

    fn style(self) -> Style {
        match self {
            Level::Info => Colour::Blue.bold(),
            Level::Success => Colour::Green.bold(),
            Level::Warning => Colour::Yellow.bold(),
            Level::Error => Colour::Red.bold(),
        }
    }
}

fn emit<T: fmt::Display>(level: Level, msg: T) {
    let line = format!("{} {}", level.style().paint(level.icon()), msg);
    match level {
        Level::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Level::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Level::Success, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(Level::Warning, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(Level::Error, msg);
}

/// Section title followed by a separator line made of `sep`.
pub fn header<T: fmt::Display>(title: T, sep: &str) {
    let title = title.to_string();
    let width = title.chars().count().max(20);
    println!("{}", Colour::Blue.bold().paint(title));
    println!("{}", sep.repeat(width));
}
