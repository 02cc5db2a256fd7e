use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Stylize};
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    let heading = Style::new()
        .bold()
        .underline()
        .fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
    let good = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)));
    let bad = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Red)));

    Styles::styled()
        .usage(heading)
        .header(heading)
        .literal(good)
        .valid(good)
        .invalid(bad)
        .error(bad)
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const GOLD: Color = Color::Rgb {
        r: 255,
        g: 200,
        b: 60,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 220,
        b: 130,
    };
    pub const ORANGE: Color = Color::Rgb {
        r: 255,
        g: 165,
        b: 0,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

mod glyphs {
    pub const RULE: &str = "─";
    pub const CORNER_TOP: &str = "╭";
    pub const CORNER_BOTTOM: &str = "╰";
    pub const NOTE: &str = "♪";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
    pub const WARNING: &str = "⚠";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Lines
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        glyphs::CHECK.with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    eprintln!(
        " {} {}",
        glyphs::CROSS_MARK.with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        glyphs::WARNING.with(colors::ORANGE).bold(),
        message.with(colors::ORANGE)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════════════════════════════════════════

const SECTION_WIDTH: usize = 48;

pub fn print_section_header(title: &str) {
    let rule = SECTION_WIDTH.saturating_sub(title.width() + 2);
    println!(
        "{}{} {} {}",
        glyphs::CORNER_TOP.with(colors::GOLD),
        glyphs::RULE.with(colors::GOLD),
        title.with(colors::GOLD).bold().attribute(Attribute::Italic),
        glyphs::RULE.repeat(rule).with(colors::GOLD)
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}",
        glyphs::CORNER_BOTTOM.with(colors::GOLD),
        glyphs::RULE.repeat(SECTION_WIDTH + 2).with(colors::GOLD)
    );
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        glyphs::NOTE.with(colors::GOLD),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt() -> String {
    format!("{} ", "♪❯".with(colors::GOLD).bold())
}

pub fn print_command_echo(command: &str) {
    println!(
        "{}  {}",
        "♪❯".with(colors::GOLD).bold(),
        command.with(colors::GREEN).bold()
    );
}

pub fn print_goodbye() {
    println!();
    println!("  {}", "Bye.".with(colors::GOLD).bold());
}
