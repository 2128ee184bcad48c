use super::highlight::highlight;
use super::text::display_width;

const FENCE: &str = "```";
const FRAME_WIDTH: usize = 40;
const FRAME_SIDE: &str = "│";
const DEFAULT_LANGUAGE: &str = "code";

/// Render fenced code regions inside a bordered frame labeled with their
/// language; prose outside fences gets query highlighting.
///
/// The language comes from the opening fence tag, else `language_hint`, else
/// `"code"`. An unterminated fence is closed at the end of the text. Matches
/// are found per line.
pub fn format_code_block(text: &str, query: &str, language_hint: &str) -> String {
    let mut lines = Vec::new();
    let mut in_block = false;

    for line in text.lines() {
        if let Some(tag) = line.trim_start().strip_prefix(FENCE) {
            if in_block {
                lines.push(frame_bottom());
            } else {
                let language = match tag.trim() {
                    "" if language_hint.is_empty() => DEFAULT_LANGUAGE,
                    "" => language_hint,
                    tag => tag,
                };
                lines.push(frame_top(language));
            }
            in_block = !in_block;
            continue;
        }

        if in_block {
            lines.push(format!("{FRAME_SIDE} {line}"));
        } else {
            lines.push(highlight(line, query));
        }
    }

    if in_block {
        lines.push(frame_bottom());
    }

    lines.join("\n")
}

fn frame_top(language: &str) -> String {
    let label_width = display_width(language) + 4;
    format!("┌─ {language} {}", "─".repeat(FRAME_WIDTH.saturating_sub(label_width).max(1)))
}

fn frame_bottom() -> String {
    format!("└{}", "─".repeat(FRAME_WIDTH - 1))
}
