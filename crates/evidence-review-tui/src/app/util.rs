use std::io::Write;

/// Copy text to the system clipboard using the OSC 52 escape sequence.
/// Works in most modern terminals (iTerm2, kitty, alacritty, WezTerm, etc.).
pub(super) fn osc52_copy(text: &str) {
    use base64::Engine;
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    // Write directly to stdout, bypassing the terminal backend buffer
    let _ = std::io::stdout().write_all(format!("\x1b]52;c;{}\x07", encoded).as_bytes());
    let _ = std::io::stdout().flush();
}
