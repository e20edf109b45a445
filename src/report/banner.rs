use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};

use crate::bench::BenchmarkConfig;

const TITLE_RGB: (u8, u8, u8) = (0x80, 0x4c, 0xff);

/// Configuration banner printed before the first run.
#[must_use]
pub fn banner_lines(config: &BenchmarkConfig, use_color: bool) -> Vec<String> {
    let title = format!("benchpair v{}", env!("CARGO_PKG_VERSION"));
    let title = if use_color {
        title
            .with(Color::Rgb {
                r: TITLE_RGB.0,
                g: TITLE_RGB.1,
                b: TITLE_RGB.2,
            })
            .bold()
            .to_string()
    } else {
        title
    };

    vec![
        title,
        format!("Target: {}", config.url()),
        format!(
            "Requests: {} | Concurrency: {} | Timeout: {:.2}s | Retries: {} | Backoff: {:.2}s",
            config.requests(),
            config.concurrency(),
            config.timeout().as_secs_f64(),
            config.retries(),
            config.retry_backoff().as_secs_f64()
        ),
        String::new(),
    ]
}

pub fn print_banner(config: &BenchmarkConfig, no_color: bool) {
    let use_color = !no_color && std::io::stdout().is_terminal();
    for line in banner_lines(config, use_color) {
        println!("{line}");
    }
}
