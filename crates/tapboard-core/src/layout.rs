use crate::field::FieldKind;

/// One of the four fixed key arrangements. Computed once per focus event and
/// held by the state machine until the keyboard closes or retargets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyboardLayout {
    Text,
    Numeric,
    Decimal,
    Email,
}

/// Explicit input-mode hint a field may declare. Takes precedence over the
/// field kind when both are present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Text,
    Numeric,
    Decimal,
    Email,
}

/// Layout derivation: input-mode hint first, then the declared field kind,
/// then `Text`. A field with no metadata at all still gets a keyboard.
pub fn layout_for(mode: Option<InputMode>, kind: FieldKind) -> KeyboardLayout {
    if let Some(mode) = mode {
        return match mode {
            InputMode::Numeric => KeyboardLayout::Numeric,
            InputMode::Decimal => KeyboardLayout::Decimal,
            InputMode::Email => KeyboardLayout::Email,
            InputMode::Text => KeyboardLayout::Text,
        };
    }
    match kind {
        FieldKind::Number | FieldKind::Telephone => KeyboardLayout::Numeric,
        FieldKind::Email => KeyboardLayout::Email,
        _ => KeyboardLayout::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_hint_wins_over_kind() {
        assert_eq!(
            layout_for(Some(InputMode::Decimal), FieldKind::Text),
            KeyboardLayout::Decimal
        );
        assert_eq!(
            layout_for(Some(InputMode::Text), FieldKind::Number),
            KeyboardLayout::Text
        );
    }

    #[test]
    fn test_kind_fallback() {
        assert_eq!(layout_for(None, FieldKind::Number), KeyboardLayout::Numeric);
        assert_eq!(
            layout_for(None, FieldKind::Telephone),
            KeyboardLayout::Numeric
        );
        assert_eq!(layout_for(None, FieldKind::Email), KeyboardLayout::Email);
    }

    #[test]
    fn test_no_metadata_defaults_to_text() {
        assert_eq!(layout_for(None, FieldKind::Text), KeyboardLayout::Text);
    }
}
