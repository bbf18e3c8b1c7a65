use clap::Parser;
use colored::*;
use console::Style;
use jotz::config::BackendKind;
use jotz::error::{JotzError, Result};
use jotz::identity;
use jotz::init::{self, JotzContext};
use jotz::model::{default_color, Entry, EntryDraft};
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init::initialize()?;

    match cli.command {
        Some(Commands::Signin) => handle_signin(&ctx),
        Some(Commands::Signout) => handle_signout(&ctx),
        Some(Commands::Whoami) => handle_whoami(&ctx),
        Some(Commands::Create {
            title,
            content,
            color,
        }) => handle_create(&mut ctx, title, content, color),
        Some(Commands::List) => handle_list(&mut ctx),
        Some(Commands::View { index }) => handle_view(&mut ctx, index),
        Some(Commands::Edit {
            index,
            title,
            content,
            color,
        }) => handle_edit(&mut ctx, index, title, content, color),
        Some(Commands::Delete { index }) => handle_delete(&mut ctx, index),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&mut ctx),
    }
}

/// Points the session at whoever is signed in. Entry commands refuse to
/// run without an identity.
fn activate_session(ctx: &mut JotzContext) -> Result<()> {
    match identity::current_user(&ctx.data_dir)? {
        Some(user) => {
            ctx.session.set_user(Some(user));
            Ok(())
        }
        None => Err(JotzError::Identity(
            "not signed in; run `jotz signin` first".to_string(),
        )),
    }
}

fn handle_signin(ctx: &JotzContext) -> Result<()> {
    let user = identity::sign_in_anonymously(&ctx.data_dir)?;
    println!("{}", format!("Signed in as {}", user).green());
    Ok(())
}

fn handle_signout(ctx: &JotzContext) -> Result<()> {
    identity::sign_out(&ctx.data_dir)?;
    println!("Signed out.");
    Ok(())
}

fn handle_whoami(ctx: &JotzContext) -> Result<()> {
    match identity::current_user(&ctx.data_dir)? {
        Some(user) => println!("{}", user),
        None => println!("Not signed in."),
    }
    Ok(())
}

fn handle_create(
    ctx: &mut JotzContext,
    title: String,
    content: Option<String>,
    color: Option<String>,
) -> Result<()> {
    activate_session(ctx)?;

    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(JotzError::Api("Title cannot be empty".into()));
    }
    let color = color.unwrap_or_else(default_color);
    if color.is_empty() {
        return Err(JotzError::Api("Color cannot be empty".into()));
    }

    let entry = ctx
        .session
        .add(EntryDraft::new(title, content.unwrap_or_default(), color))?;
    println!("{}", format!("Created \"{}\"", entry.title).green());
    Ok(())
}

fn handle_list(ctx: &mut JotzContext) -> Result<()> {
    activate_session(ctx)?;
    print_entries(ctx.session.entries());
    Ok(())
}

fn handle_view(ctx: &mut JotzContext, index: usize) -> Result<()> {
    activate_session(ctx)?;
    let entry = entry_at(ctx, index)?;
    print_full_entry(index, &entry);
    Ok(())
}

fn handle_edit(
    ctx: &mut JotzContext,
    index: usize,
    title: Option<String>,
    content: Option<String>,
    color: Option<String>,
) -> Result<()> {
    activate_session(ctx)?;

    if title.is_none() && content.is_none() && color.is_none() {
        return Err(JotzError::Api(
            "Nothing to change; pass --title, --content or --color".into(),
        ));
    }

    let mut edited = entry_at(ctx, index)?;
    if let Some(t) = title {
        let t = t.trim().to_string();
        if t.is_empty() {
            return Err(JotzError::Api("Title cannot be empty".into()));
        }
        edited.title = t;
    }
    if let Some(c) = content {
        edited.content = c;
    }
    if let Some(c) = color {
        if c.is_empty() {
            return Err(JotzError::Api("Color cannot be empty".into()));
        }
        edited.color = c;
    }

    let updated = ctx.session.update(&edited)?;
    println!("{}", format!("Updated \"{}\"", updated.title).green());
    Ok(())
}

fn handle_delete(ctx: &mut JotzContext, index: usize) -> Result<()> {
    activate_session(ctx)?;

    let entry = entry_at(ctx, index)?;
    ctx.session.delete(&entry.id)?;
    println!("{}", format!("Deleted \"{}\"", entry.title).green());
    Ok(())
}

fn handle_config(ctx: &JotzContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = ctx.config.clone();

    match (key.as_deref(), value) {
        (None, _) => {
            println!("backend = {}", config.backend);
            println!(
                "remote-url = {}",
                config.remote_url.as_deref().unwrap_or("(not set)")
            );
        }
        (Some("backend"), None) => println!("backend = {}", config.backend),
        (Some("backend"), Some(v)) => {
            config.backend = match v.as_str() {
                "local" => BackendKind::Local,
                "remote" => BackendKind::Remote,
                other => {
                    return Err(JotzError::Api(format!(
                        "Unknown backend: {} (expected local or remote)",
                        other
                    )));
                }
            };
            config.save(&ctx.data_dir)?;
            println!("{}", format!("backend = {}", config.backend).green());
        }
        (Some("remote-url"), None) => println!(
            "remote-url = {}",
            config.remote_url.as_deref().unwrap_or("(not set)")
        ),
        (Some("remote-url"), Some(v)) => {
            config.remote_url = Some(v);
            config.save(&ctx.data_dir)?;
            println!(
                "{}",
                format!(
                    "remote-url = {}",
                    config.remote_url.as_deref().unwrap_or_default()
                )
                .green()
            );
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
        }
    }
    Ok(())
}

/// Resolves a 1-based list index to the entry at that position in the
/// session mirror.
fn entry_at(ctx: &JotzContext, index: usize) -> Result<Entry> {
    if index == 0 {
        return Err(JotzError::Api("Indexes start at 1".to_string()));
    }
    ctx.session
        .entries()
        .get(index - 1)
        .cloned()
        .ok_or_else(|| JotzError::Api(format!("No entry at index {}", index)))
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const SWATCH: &str = "●";

fn print_entries(entries: &[Entry]) {
    if entries.is_empty() {
        println!("No entries yet. Write one with `jotz create`.");
        return;
    }

    for (i, entry) in entries.iter().enumerate() {
        let idx_str = format!("{}. ", i + 1);
        let idx_width = idx_str.width();

        // Swatch cell plus its trailing space.
        let left_prefix_width = 2;
        let right_suffix_width = 2;

        let time_ago = format_time_ago(entry.updated_at);

        let preview: String = strip_markup(&entry.content)
            .trim()
            .chars()
            .take(50)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let title_content = if preview.is_empty() {
            entry.title.clone()
        } else {
            format!("{} {}", entry.title, preview)
        };

        let fixed_width = left_prefix_width + idx_width + right_suffix_width + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let title_display = truncate_to_width(&title_content, available);
        let padding = available.saturating_sub(title_display.width());

        println!(
            "{} {}{}{}  {}",
            color_swatch(&entry.color),
            idx_str,
            title_display,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

fn print_full_entry(index: usize, entry: &Entry) {
    println!(
        "{} {} {}",
        format!("{}.", index).yellow(),
        color_swatch(&entry.color),
        entry.title.bold()
    );
    println!("--------------------------------");
    // Raw content, markup included. Stripping is for list previews only.
    println!("{}", entry.content);
    println!();
    println!(
        "{}",
        format!(
            "Created {}, updated {}",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.updated_at.format("%Y-%m-%d %H:%M")
        )
        .dimmed()
    );
}

/// Renders the entry color as a terminal swatch. Colors that are not
/// 6-digit hex codes (the store accepts any string) fall back to an
/// unstyled swatch.
fn color_swatch(color: &str) -> String {
    match parse_hex_color(color) {
        Some(rgb) => Style::new()
            .color256(rgb_to_ansi256(rgb))
            .apply_to(SWATCH)
            .to_string(),
        None => SWATCH.to_string(),
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

/// Removes `<...>` tag runs for the one-line preview. Display-side
/// only; stored content is never modified.
fn strip_markup(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    // Pad singular units so the column lines up with plural ones.
    let time_str = time_str
        .replace("hour ago", "hour  ago")
        .replace("minute ago", "minute  ago")
        .replace("second ago", "second  ago")
        .replace("day ago", "day  ago")
        .replace("week ago", "week  ago")
        .replace("month ago", "month  ago")
        .replace("year ago", "year  ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
