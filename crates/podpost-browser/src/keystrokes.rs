use chromiumoxide::keys;

/// One input event sent while typing into a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Keystroke {
    /// A key on the US layout, dispatched as key down/up
    Key(String),
    /// Text with no key definition, sent through `Input.insertText`
    Insert(String),
}

/// Split `text` into key presses and inserted runs.
///
/// Line feeds become Enter and carriage returns are dropped. Consecutive
/// characters without a key definition are merged into a single insert.
pub(crate) fn keystrokes(text: &str) -> Vec<Keystroke> {
    let mut strokes = Vec::new();
    let mut pending = String::new();

    for c in text.chars() {
        let key = match c {
            '\r' => continue,
            '\n' => Some("Enter".to_string()),
            c => {
                let mut buf = [0u8; 4];
                let ch: &str = c.encode_utf8(&mut buf);
                keys::get_key_definition(ch).map(|_| ch.to_string())
            }
        };

        match key {
            Some(key) => {
                if !pending.is_empty() {
                    strokes.push(Keystroke::Insert(std::mem::take(&mut pending)));
                }
                strokes.push(Keystroke::Key(key));
            }
            None => pending.push(c),
        }
    }

    if !pending.is_empty() {
        strokes.push(Keystroke::Insert(pending));
    }
    strokes
}
