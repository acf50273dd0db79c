//! Informational commands and screen clearing

use chrono::Local;

use crate::config::Config;
use crate::session::CommandRegistry;

pub(super) fn register(registry: &mut CommandRegistry, config: &Config) {
    let name = config.identity.name.clone();
    let site_url = config.identity.site_url.clone();
    let booted_at = Local::now();

    registry
        .register("whoami", "Display information about me", move |_ctx, _args| {
            Ok(format!("Hi, I'm {}", name))
        })
        .register("pwd", "Print current website URL", move |_ctx, _args| {
            Ok(site_url.clone())
        })
        .register("date", "Display the current date and time", |_ctx, _args| {
            Ok(Local::now().format("%a %b %d %Y %H:%M:%S GMT%z").to_string())
        })
        .register("uptime", "Display the uptime since console start", move |_ctx, _args| {
            let elapsed = Local::now().signed_duration_since(booted_at);
            Ok(format_uptime(elapsed.num_seconds()))
        })
        .register("clear", "Clear terminal output", |ctx, _args| {
            if let Some(session) = ctx.session() {
                session.surface_mut().clear();
            }
            Ok(String::new())
        });
}

/// Human readable uptime from a number of elapsed seconds
pub fn format_uptime(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let days = total_seconds / 86_400;
    let hours = (total_seconds / 3_600) % 24;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    format!(
        "Uptime: {} days, {} hours, {} minutes, and {} seconds.",
        days, hours, minutes, seconds
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(
            format_uptime(0),
            "Uptime: 0 days, 0 hours, 0 minutes, and 0 seconds."
        );
        assert_eq!(
            format_uptime(90_061),
            "Uptime: 1 days, 1 hours, 1 minutes, and 1 seconds."
        );
        assert_eq!(
            format_uptime(-5),
            "Uptime: 0 days, 0 hours, 0 minutes, and 0 seconds."
        );
    }
}
