//! Help text rendering and the help-request hook.

use crate::descriptor::ArgDescriptor;
use crate::error::Result;
use crate::parser::Parser;
use crate::value::ArgType;
use std::io::{IsTerminal, Write};

/// When help output uses ANSI styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Style only when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

/// Free-form text around the generated help.
#[derive(Debug, Clone, Default)]
pub struct HelpConfig {
    pub header: String,
    pub description: String,
    pub footer: String,
    pub color: ColorChoice,
}

/// What a help handler receives when `-h`/`--help` is seen.
#[derive(Debug, Clone, Copy)]
pub struct HelpRequest<'a> {
    pub program: &'a str,
    /// Rendered help, styled according to the parser's `ColorChoice`.
    pub text: &'a str,
}

pub type HelpHandler = Box<dyn FnMut(&HelpRequest<'_>) -> Result<()>>;

/// Default handler: print the help to stdout and exit with status 0.
pub fn print_and_exit(req: &HelpRequest<'_>) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if let Err(err) = stdout
        .write_all(req.text.as_bytes())
        .and_then(|()| stdout.flush())
    {
        tracing::debug!(%err, program = req.program, "failed to write help");
    }
    std::process::exit(0)
}

#[derive(Clone, Copy)]
struct Palette {
    enabled: bool,
}

impl Palette {
    const BOLD: &'static str = "\x1b[1m";
    const CYAN: &'static str = "\x1b[36m";
    const GREEN: &'static str = "\x1b[32m";
    const GRAY: &'static str = "\x1b[90m";
    const YELLOW: &'static str = "\x1b[33m";
    const RESET: &'static str = "\x1b[0m";

    fn paint(self, code: &str, text: &str) -> String {
        if self.enabled && !text.is_empty() {
            format!("{code}{text}{}", Self::RESET)
        } else {
            text.to_string()
        }
    }
}

/// One table line, kept unstyled until the column width is known.
struct Row {
    left: String,
    help: String,
    required: bool,
    default: Option<String>,
    positional: bool,
}

impl Row {
    fn new(desc: &ArgDescriptor) -> Self {
        Self {
            left: format_arg_left(desc),
            help: desc.help().trim().to_string(),
            required: desc.is_required() && !desc.is_positional(),
            default: (!desc.default_value().is_none()).then(|| desc.default_value().to_string()),
            positional: desc.is_positional(),
        }
    }

    fn builtin_help() -> Self {
        Self {
            left: "-h, --help".to_string(),
            help: "Show this help message".to_string(),
            required: false,
            default: None,
            positional: false,
        }
    }

    fn render(&self, width: usize, palette: Palette) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.help.is_empty() {
            parts.push(self.help.clone());
        }
        if self.required {
            parts.push(palette.paint(Palette::YELLOW, "(required)"));
        }
        if let Some(default) = &self.default {
            parts.push(palette.paint(Palette::GRAY, &format!("[default: {default}]")));
        }

        let color = if self.positional {
            Palette::CYAN
        } else {
            Palette::GREEN
        };
        if parts.is_empty() {
            return format!("  {}\n", palette.paint(color, &self.left));
        }
        let padded = format!("{:width$}", self.left);
        format!("  {}  {}\n", palette.paint(color, &padded), parts.join(" "))
    }
}

fn format_arg_left(desc: &ArgDescriptor) -> String {
    if desc.is_positional() {
        return format!("<{}>", desc.name());
    }

    let mut names: Vec<String> = desc.short_forms().iter().map(|s| format!("-{s}")).collect();
    let indent = if names.is_empty() { "    " } else { "" };
    names.extend(desc.long_forms().iter().map(|l| format!("--{l}")));

    let mut out = format!("{indent}{}", names.join(", "));
    if desc.arg_type() != ArgType::Bool {
        out.push_str(&format!(" <{}>", desc.value_name()));
        if desc.arg_type().is_list() {
            out.push_str("...");
        }
    }
    out
}

fn push_section(out: &mut String, title: &str, rows: &[Row], palette: Palette) {
    if rows.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}\n", palette.paint(Palette::BOLD, title)));
    let width = rows.iter().map(|r| r.left.len()).max().unwrap_or(0);
    for row in rows {
        out.push_str(&row.render(width, palette));
    }
}

/// Render help for `parser`: header, usage line, description, positional
/// and option tables, footer.
pub fn render(parser: &Parser, colored: bool) -> String {
    let palette = Palette { enabled: colored };
    let config = parser.config();
    let mut out = String::new();

    if !config.header.trim().is_empty() {
        out.push_str(config.header.trim_end());
        out.push_str("\n\n");
    }

    let mut usage = parser.program().to_string();
    for desc in parser.descriptors().filter(|d| d.is_positional()) {
        usage.push_str(&format!(" <{}>", desc.name()));
    }
    usage.push_str(" [OPTIONS]");
    out.push_str(&format!("{} {usage}\n", palette.paint(Palette::BOLD, "Usage:")));

    if !config.description.trim().is_empty() {
        out.push('\n');
        out.push_str(config.description.trim_end());
        out.push('\n');
    }

    let (positionals, options): (Vec<&ArgDescriptor>, Vec<&ArgDescriptor>) =
        parser.descriptors().partition(|d| d.is_positional());

    let rows: Vec<Row> = positionals.iter().map(|d| Row::new(d)).collect();
    push_section(&mut out, "Arguments:", &rows, palette);

    let mut rows: Vec<Row> = options.iter().map(|d| Row::new(d)).collect();
    rows.push(Row::builtin_help());
    push_section(&mut out, "Options:", &rows, palette);

    if !config.footer.trim().is_empty() {
        out.push('\n');
        out.push_str(config.footer.trim_end());
        out.push('\n');
    }

    out
}
