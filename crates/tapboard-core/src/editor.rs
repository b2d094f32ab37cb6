use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::input::Keystroke;

/// Result of applying one keystroke to a text buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The buffer changed; `cursor` is the new collapsed selection.
    Edited { value: String, cursor: usize },
    /// Single-line Enter: the owning form should submit, buffer untouched.
    Submit,
    /// Nothing to do.
    Noop,
}

/// Applies `key` to `value` at `selection` and returns what should happen.
///
/// Pure function of its inputs: selections are byte ranges into `value`,
/// clamped to char boundaries before use, and the returned cursor is always
/// within the new value. Multi-line fields turn Enter into a newline; for
/// everything else Enter means submit.
pub fn apply_keystroke(
    value: &str,
    selection: Range<usize>,
    key: Keystroke,
    multi_line: bool,
) -> EditOutcome {
    let (start, end) = clamp_selection(value, selection);
    match key {
        Keystroke::Char(c) => insert_char(value, start, end, c),
        Keystroke::Space => insert_char(value, start, end, ' '),
        Keystroke::Enter if multi_line => insert_char(value, start, end, '\n'),
        Keystroke::Enter => EditOutcome::Submit,
        Keystroke::Backspace => {
            if start == end {
                if start == 0 {
                    return EditOutcome::Noop;
                }
                let prev = prev_grapheme_boundary(value, start);
                delete_range(value, prev, start)
            } else {
                delete_range(value, start, end)
            }
        }
    }
}

fn insert_char(value: &str, start: usize, end: usize, c: char) -> EditOutcome {
    let mut out = String::with_capacity(value.len() - (end - start) + c.len_utf8());
    out.push_str(&value[..start]);
    out.push(c);
    out.push_str(&value[end..]);
    EditOutcome::Edited {
        value: out,
        cursor: start + c.len_utf8(),
    }
}

fn delete_range(value: &str, start: usize, end: usize) -> EditOutcome {
    let mut out = String::with_capacity(value.len() - (end - start));
    out.push_str(&value[..start]);
    out.push_str(&value[end..]);
    EditOutcome::Edited {
        value: out,
        cursor: start,
    }
}

fn clamp_selection(value: &str, selection: Range<usize>) -> (usize, usize) {
    let mut start = floor_char_boundary(value, selection.start.min(value.len()));
    let mut end = floor_char_boundary(value, selection.end.min(value.len()));
    if end < start {
        std::mem::swap(&mut start, &mut end);
    }
    (start, end)
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Last grapheme boundary strictly before `byte`.
fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}
