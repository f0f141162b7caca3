use termion::event::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextColor,
    PrevColor,
    NextBrush,
    PrevBrush,
    Wipe,
    Undo,
    Save,
    Submit,
    Cancel,
    Quit,
}

struct Binding {
    keys: Vec<Key>,
    command: Command,
    help: Option<(&'static str, &'static str)>,
}

/// Immutable key table, built once at startup.
pub struct KeyBindings {
    bindings: Vec<Binding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bind = |keys: &[Key], command, help| Binding {
            keys: keys.to_vec(),
            command,
            help,
        };
        Self {
            bindings: vec![
                bind(&[Key::Char('c')], Command::NextColor, Some(("c↓/C↑", "color select"))),
                bind(&[Key::Char('C')], Command::PrevColor, None),
                bind(&[Key::Char('b')], Command::NextBrush, Some(("b↓/B↑", "brush select"))),
                bind(&[Key::Char('B')], Command::PrevBrush, None),
                bind(&[Key::Char('w')], Command::Wipe, Some(("w", "wipe canvas"))),
                bind(&[Key::Char('u')], Command::Undo, Some(("u", "undo"))),
                bind(&[Key::Char('s')], Command::Save, Some(("s", "save to PNG"))),
                bind(&[Key::Char('\n')], Command::Submit, None),
                bind(&[Key::Esc], Command::Cancel, None),
                bind(&[Key::Ctrl('c'), Key::Char('q')], Command::Quit, Some(("ctrl+c/q", "quit"))),
            ],
        }
    }
}

impl KeyBindings {
    pub fn lookup(&self, key: &Key) -> Option<Command> {
        self.bindings
            .iter()
            .find(|binding| binding.keys.contains(key))
            .map(|binding| binding.command)
    }

    /// `(keys, description)` pairs for the help line.
    pub fn help(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.bindings.iter().filter_map(|binding| binding.help)
    }
}
