//! Terminal output sanitization
//!
//! # Security: Terminal Injection Prevention
//!
//! Transcript text is user- and tool-controlled. Printed verbatim, embedded escape
//! sequences could clear the screen, move the cursor, retitle the window or hide text.
//! Everything shown by the renderer passes through [`strip_ansi_codes`] first, and the
//! renderer's own highlight styling is applied afterwards.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Strips terminal escape sequences and control characters from a string
///
/// Removes CSI sequences (`ESC [ ... final`), OSC sequences (`ESC ] ... BEL` or
/// `ESC ] ... ESC \`), other two-character escapes, and every control character
/// except tab, newline and carriage return.
///
/// # Examples
///
/// ```
/// use session_explorer::utils::terminal::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[31mRed text\x1b[0m"), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.next() {
                // CSI: parameters and intermediates up to a final byte in '@'..='~'
                Some('[') => {
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
                // OSC: terminated by BEL or ST (ESC \)
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }

        result.push(ch);
    }

    result
}
