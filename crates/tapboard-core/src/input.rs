/// A logical input unit produced by the on-screen keyboard, independent of
/// where the key sits in any layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Backspace,
    Enter,
    Space,
}
