use smallvec::{SmallVec, smallvec};
use tapboard_core::{KeyboardLayout, Keystroke};

/// What tapping a key asks of the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Input(Keystroke),
    /// The "123"/"ABC" corner key. A layout is fixed for the lifetime of a
    /// focus event, so this dismisses the keyboard like Done.
    ToggleMode,
    /// Close the keyboard, blurring the target field first.
    Done,
}

/// Styling weight of a key; the host picks colors per class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEmphasis {
    Plain,
    Action,
    Primary,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeySpec {
    pub label: String,
    pub action: KeyAction,
    /// Relative width within the row; ordinary keys are 1.0.
    pub weight: f32,
    pub emphasis: KeyEmphasis,
}

impl KeySpec {
    pub fn ch(c: char) -> Self {
        Self {
            label: c.to_string(),
            action: KeyAction::Input(Keystroke::Char(c)),
            weight: 1.0,
            emphasis: KeyEmphasis::Plain,
        }
    }

    pub fn backspace() -> Self {
        Self {
            label: "\u{232B}".into(),
            action: KeyAction::Input(Keystroke::Backspace),
            weight: 1.5,
            emphasis: KeyEmphasis::Action,
        }
    }

    pub fn enter() -> Self {
        Self {
            label: "\u{23CE}".into(),
            action: KeyAction::Input(Keystroke::Enter),
            weight: 1.5,
            emphasis: KeyEmphasis::Action,
        }
    }

    pub fn space() -> Self {
        Self {
            label: "space".into(),
            action: KeyAction::Input(Keystroke::Space),
            weight: 5.0,
            emphasis: KeyEmphasis::Plain,
        }
    }

    pub fn toggle(label: &str) -> Self {
        Self {
            label: label.into(),
            action: KeyAction::ToggleMode,
            weight: 1.5,
            emphasis: KeyEmphasis::Action,
        }
    }

    pub fn done() -> Self {
        Self {
            label: "Done".into(),
            action: KeyAction::Done,
            weight: 1.5,
            emphasis: KeyEmphasis::Primary,
        }
    }

    pub fn weight(mut self, w: f32) -> Self {
        self.weight = w;
        self
    }
}

pub type KeyRow = SmallVec<[KeySpec; 12]>;

/// The fixed key grid for a layout, in right-handed order. Handedness
/// mirroring happens at the widget layer.
pub fn rows_for(layout: KeyboardLayout) -> Vec<KeyRow> {
    match layout {
        KeyboardLayout::Text => text_rows(),
        KeyboardLayout::Numeric => digit_rows(KeyboardLayout::Numeric),
        KeyboardLayout::Decimal => digit_rows(KeyboardLayout::Decimal),
        KeyboardLayout::Email => email_rows(),
    }
}

fn chars(s: &str) -> KeyRow {
    s.chars().map(KeySpec::ch).collect()
}

fn text_rows() -> Vec<KeyRow> {
    let mut bottom: KeyRow = smallvec![KeySpec::backspace()];
    bottom.extend("zxcvbnm".chars().map(KeySpec::ch));
    bottom.push(KeySpec::enter());
    vec![
        chars("qwertyuiop"),
        chars("asdfghjkl"),
        bottom,
        smallvec![KeySpec::toggle("123"), KeySpec::space(), KeySpec::done()],
    ]
}

/// Numeric and decimal share one key set; only the decimal point moves.
fn digit_rows(layout: KeyboardLayout) -> Vec<KeyRow> {
    let mut last = if layout == KeyboardLayout::Decimal {
        chars("0.")
    } else {
        chars(".0")
    };
    last.push(KeySpec::backspace().weight(1.0));
    vec![
        chars("123"),
        chars("456"),
        chars("789"),
        last,
        smallvec![KeySpec::done().weight(3.0)],
    ]
}

fn email_rows() -> Vec<KeyRow> {
    let mut punct: KeyRow = smallvec![KeySpec::backspace()];
    punct.extend(".,?!'".chars().map(KeySpec::ch));
    punct.push(KeySpec::enter());
    vec![
        chars("1234567890"),
        chars("@#$_&-+()/"),
        punct,
        smallvec![
            KeySpec::toggle("ABC"),
            KeySpec::ch('@'),
            KeySpec::space(),
            KeySpec::ch('.'),
            KeySpec::done(),
        ],
    ]
}
