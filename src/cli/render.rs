//! Result presentation for the command-line tool.

use anyhow::Result;
use gps_exif_extractor::ExtractionResult;
use gps_exif_extractor::config::OutputFormat;
use std::fmt::Write;

pub fn render(results: &[ExtractionResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(plain(results)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(results)?),
        OutputFormat::Html => Ok(html(results)),
    }
}

/// One `path<TAB>latitude<TAB>longitude` line per result.
fn plain(results: &[ExtractionResult]) -> String {
    let mut out = String::new();
    for r in results {
        let _ = writeln!(
            out,
            "{}\t{:.6}\t{:.6}",
            r.path.display(),
            r.coordinates.latitude,
            r.coordinates.longitude
        );
    }
    out
}

fn html(results: &[ExtractionResult]) -> String {
    let mut out = String::from(
        "<table>\n  <thead>\n    <tr><th>Path</th><th>Latitude</th><th>Longitude</th></tr>\n  </thead>\n  <tbody>\n",
    );
    for r in results {
        let _ = writeln!(
            out,
            "    <tr><td>{}</td><td>{:.6}</td><td>{:.6}</td></tr>",
            html_escape(&r.path.display().to_string()),
            r.coordinates.latitude,
            r.coordinates.longitude
        );
    }
    out.push_str("  </tbody>\n</table>\n");
    out
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
