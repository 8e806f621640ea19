use anyhow::Result;
use argkit::Parser;
use std::fmt::Write;

/// Summarize the parsed configuration the way a real tool would use it.
pub fn summary(cli: &Parser) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Input file: {}", cli.get_str("input")?)?;
    writeln!(out, "Output file: {}", cli.get_str("output")?)?;
    writeln!(out, "Count: {}", cli.get_int("count")?)?;
    writeln!(out, "Ratio: {}", cli.get_float("ratio")?)?;
    writeln!(out, "Mode: {}", cli.get_str("mode")?)?;
    writeln!(out, "Verbose: {}", on_off(cli.get_bool("verbose")))?;
    writeln!(out, "Quiet: {}", on_off(cli.get_bool("quiet")))?;

    let ids = cli.get_ints("ids")?;
    let total: i64 = ids.iter().sum();
    writeln!(out, "IDs: {ids:?} (sum {total})")?;

    let scores = cli.get_floats("scores")?;
    let mean = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };
    writeln!(out, "Scores: {scores:?} (mean {mean:.2})")?;
    writeln!(out, "Plugins: {}", cli.get_strs("plugins")?.join(", "))?;

    let features = cli.get_bools("features")?;
    let enabled = features.iter().filter(|f| **f).count();
    writeln!(out, "Features: {enabled} of {} enabled", features.len())?;
    Ok(out)
}

/// One line per argument with its value and where it came from.
pub fn details(cli: &Parser) -> String {
    let width = cli.descriptors().map(|d| d.name().len()).max().unwrap_or(0);
    let mut out = String::new();
    for desc in cli.descriptors() {
        let source = if cli.is_explicit(desc.name()) {
            "command line"
        } else {
            "default"
        };
        let _ = writeln!(
            out,
            "  {:width$}  {} ({source})",
            desc.name(),
            desc.parsed_value()
        );
    }
    out
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}
