use chrono::{Local, Timelike};

use crate::session::CommandRegistry;

const BANNER: &str = r"
 _                          _           _
| |_ ___ _ __ _ __ ___   __| | ___  ___| | __
| __/ _ \ '__| '_ ` _ \ / _` |/ _ \/ __| |/ /
| ||  __/ |  | | | | | | (_| |  __/ (__|   <
 \__\___|_|  |_| |_| |_|\__,_|\___|\___|_|\_\
";

pub const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "There are 10 kinds of people: those who read binary and those who don't.",
    "A SQL query walks into a bar, sees two tables and asks: may I join you?",
    "Why did the developer go broke? Because they used up all their cache!",
    "Why do programmers mix up Halloween and Christmas? Because Oct 31 == Dec 25!",
];

pub(super) fn register(registry: &mut CommandRegistry) {
    registry.register("motd", "Display message of the day", |_ctx, _args| {
        let pick = Local::now().nanosecond() as usize;
        Ok(motd_text(JOKES[pick % JOKES.len()]))
    });
}

/// Message of the day around the given joke
pub fn motd_text(joke: &str) -> String {
    format!(
        "{}\nWelcome to termdeck!\nType 'help' to see available commands.\n\nToday's random nerdy joke:\n{}",
        BANNER.trim_start_matches('\n'),
        joke
    )
}
