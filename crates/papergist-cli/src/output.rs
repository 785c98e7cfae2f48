use std::io::Write;

use owo_colors::OwoColorize;

use papergist_text::Sections;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the chunk table produced by a dry run.
pub fn print_chunk_table(
    w: &mut dyn Write,
    chunks: &[String],
    max_chunk_size: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "{} chunks (budget {} chars):", chunks.len(), max_chunk_size)?;
    for (i, chunk) in chunks.iter().enumerate() {
        let chars = chunk.chars().count();
        let preview: String = chunk.chars().take(60).collect();
        let ellipsis = if chars > 60 { "..." } else { "" };
        let header = format!("[{}] {} chars", i + 1, chars);
        if color.enabled() && chars > max_chunk_size {
            // A chunk only exceeds the budget when a single sentence does.
            writeln!(w, "{}  {}{}", header.yellow(), preview, ellipsis)?;
        } else {
            writeln!(w, "{}  {}{}", header, preview, ellipsis)?;
        }
    }
    Ok(())
}

/// Print the final summary.
pub fn print_summary(w: &mut dyn Write, summary: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", "Summary".bold().green())?;
    } else {
        writeln!(w, "Summary")?;
    }
    writeln!(w, "{}", summary)?;
    Ok(())
}

/// Print the extracted sections, flagging the ones that were not found.
pub fn print_sections(w: &mut dyn Write, sections: &Sections, color: ColorMode) -> std::io::Result<()> {
    for (kind, text) in sections.iter() {
        if color.enabled() {
            writeln!(w, "{}", kind.label().bold().cyan())?;
        } else {
            writeln!(w, "== {} ==", kind.label())?;
        }
        if text.is_empty() {
            if color.enabled() {
                writeln!(w, "{}", "(not found)".dimmed())?;
            } else {
                writeln!(w, "(not found)")?;
            }
        } else {
            writeln!(w, "{}", text)?;
        }
        writeln!(w)?;
    }
    Ok(())
}
