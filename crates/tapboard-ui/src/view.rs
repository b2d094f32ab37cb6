use std::rc::Rc;

use crate::layouts::KeySpec;

pub type Callback = Rc<dyn Fn()>;

/// Render instruction tree for the keyboard surface. The host walks it and
/// draws; pointer handling runs the attached callbacks.
#[derive(Clone)]
pub enum ViewKind {
    /// Bottom-anchored keyboard sheet. `on_pointer_down` fires for any press
    /// inside the sheet, before the pressed key's own callback.
    Sheet { on_pointer_down: Callback },
    Row,
    Key { spec: KeySpec, on_tap: Callback },
}

#[derive(Clone)]
pub struct View {
    pub kind: ViewKind,
    pub children: Vec<View>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            children: vec![],
        }
    }

    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Sheet { .. } => write!(f, "Sheet"),
            ViewKind::Row => write!(f, "Row"),
            ViewKind::Key { spec, .. } => f
                .debug_struct("Key")
                .field("label", &spec.label)
                .field("action", &spec.action)
                .finish(),
        }
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("kind", &self.kind)
            .field("children", &self.children)
            .finish()
    }
}
