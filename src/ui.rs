use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::fmt::Write;
use std::time::Duration;

// RGB tuples for use with the `colored` crate's `.truecolor()` method
pub mod rgb {
    pub const ELECTRIC_PURPLE: (u8, u8, u8) = (225, 53, 255);
    pub const NEON_CYAN: (u8, u8, u8) = (128, 255, 234);
    pub const CORAL: (u8, u8, u8) = (255, 106, 193);
    pub const ELECTRIC_YELLOW: (u8, u8, u8) = (241, 250, 140);
    pub const SUCCESS_GREEN: (u8, u8, u8) = (80, 250, 123);
    pub const ERROR_RED: (u8, u8, u8) = (255, 99, 99);
    pub const DIM_WHITE: (u8, u8, u8) = (180, 180, 190);
    pub const DIM_SEPARATOR: (u8, u8, u8) = (60, 60, 70);
}

/// Track quiet mode state
static QUIET_MODE: std::sync::LazyLock<Mutex<bool>> =
    std::sync::LazyLock::new(|| Mutex::new(false));

/// Enable or disable quiet mode
pub fn set_quiet_mode(enabled: bool) {
    *QUIET_MODE.lock() = enabled;
}

/// Check if quiet mode is enabled
pub fn is_quiet_mode() -> bool {
    *QUIET_MODE.lock()
}

/// Spinner shown while a provider request is pending; hidden in quiet mode
pub fn create_spinner(message: &str) -> ProgressBar {
    if is_quiet_mode() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.bright_cyan.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_warning(message: &str) {
    if !is_quiet_mode() {
        println!(
            "{}",
            message
                .truecolor(rgb::ELECTRIC_YELLOW.0, rgb::ELECTRIC_YELLOW.1, rgb::ELECTRIC_YELLOW.2)
                .bold()
        );
    }
}

pub fn print_error(message: &str) {
    // Always print errors, even in quiet mode
    eprintln!(
        "{}",
        message
            .truecolor(rgb::ERROR_RED.0, rgb::ERROR_RED.1, rgb::ERROR_RED.2)
            .bold()
    );
}

pub fn print_success(message: &str) {
    if !is_quiet_mode() {
        println!(
            "{}",
            message
                .truecolor(rgb::SUCCESS_GREEN.0, rgb::SUCCESS_GREEN.1, rgb::SUCCESS_GREEN.2)
                .bold()
        );
    }
}

/// Print a result block between separators. Results are printed even in quiet mode.
pub fn print_bordered_content(content: &str) {
    let rule = "━".repeat(50);
    let rule = rule.truecolor(rgb::DIM_SEPARATOR.0, rgb::DIM_SEPARATOR.1, rgb::DIM_SEPARATOR.2);
    println!("{rule}");
    print!("{content}");
    println!("{rule}");
}

/// Create gradient text from Electric Purple to Neon Cyan
pub fn create_gradient_text(text: &str) -> String {
    let gradient = [
        (225, 53, 255),
        (200, 100, 255),
        (180, 150, 250),
        (150, 200, 245),
        (128, 255, 234),
    ];

    let chars: Vec<char> = text.chars().collect();
    let mut result = String::new();
    if chars.is_empty() {
        return result;
    }

    let last_char = chars.len() - 1;
    let last_stop = gradient.len() - 1;
    for (i, c) in chars.iter().enumerate() {
        let index = if last_char == 0 { 0 } else { i * last_stop / last_char };
        let (r, g, b) = gradient.get(index).copied().unwrap_or(rgb::NEON_CYAN);
        write!(result, "{}", c.to_string().truecolor(r, g, b))
            .expect("writing to string cannot fail");
    }

    result
}
