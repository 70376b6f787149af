//! The problem collector: three text fields plus a confirm action. Values
//! seed from the field store on mount and write through on every edit. The
//! form itself cannot fail; persistence errors are swallowed.

use strive_common::{FieldId, Problem};
use strive_core::store::FieldStore;

/// Focusable controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Role,
    Struggle,
    Next,
}

impl Focus {
    pub fn field(self) -> Option<FieldId> {
        match self {
            Focus::Name => Some(FieldId::Name),
            Focus::Role => Some(FieldId::Role),
            Focus::Struggle => Some(FieldId::Struggle),
            Focus::Next => None,
        }
    }

    fn next(self) -> Focus {
        match self {
            Focus::Name => Focus::Role,
            Focus::Role => Focus::Struggle,
            Focus::Struggle => Focus::Next,
            Focus::Next => Focus::Name,
        }
    }

    fn prev(self) -> Focus {
        match self {
            Focus::Name => Focus::Next,
            Focus::Role => Focus::Name,
            Focus::Struggle => Focus::Role,
            Focus::Next => Focus::Struggle,
        }
    }
}

pub struct ProblemForm {
    store: Box<dyn FieldStore>,
    name: String,
    role: String,
    struggle: String,
    focus: Focus,
}

impl ProblemForm {
    /// Seed every field from the store. The seeded text immediately counts
    /// as the field's current value, so a persisted draft submits as-is.
    pub fn new(store: Box<dyn FieldStore>) -> Self {
        let name = store.read(FieldId::Name).unwrap_or_default();
        let role = store.read(FieldId::Role).unwrap_or_default();
        let struggle = store.read(FieldId::Struggle).unwrap_or_default();
        Self {
            store,
            name,
            role,
            struggle,
            focus: Focus::Name,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn value(&self, id: FieldId) -> &str {
        match id {
            FieldId::Name => &self.name,
            FieldId::Role => &self.role,
            FieldId::Struggle => &self.struggle,
        }
    }

    /// Append to the focused field and write the new value through.
    pub fn insert(&mut self, ch: char) {
        if let Some(id) = self.focus.field() {
            self.value_mut(id).push(ch);
            self.persist(id);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(id) = self.focus.field() {
            self.value_mut(id).pop();
            self.persist(id);
        }
    }

    /// Multi-line entry is a presentational property of the struggle field;
    /// the other two stay single-line.
    pub fn newline(&mut self) {
        if self.focus == Focus::Struggle {
            self.struggle.push('\n');
            self.persist(FieldId::Struggle);
        }
    }

    /// Build a `Problem` from the current values. No validation; empty
    /// strings are accepted.
    pub fn problem(&self) -> Problem {
        Problem {
            name: self.name.clone(),
            role: self.role.clone(),
            struggle: self.struggle.clone(),
        }
    }

    fn value_mut(&mut self, id: FieldId) -> &mut String {
        match id {
            FieldId::Name => &mut self.name,
            FieldId::Role => &mut self.role,
            FieldId::Struggle => &mut self.struggle,
        }
    }

    fn persist(&mut self, id: FieldId) {
        let value = self.value(id).to_string();
        let _ = self.store.write(id, &value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use strive_core::store::MemoryFieldStore;

    /// Cloneable handle over one backing store, so a test can re-mount the
    /// form and observe what earlier edits persisted.
    #[derive(Clone, Default)]
    struct SharedStore(Arc<Mutex<MemoryFieldStore>>);

    impl FieldStore for SharedStore {
        fn read(&self, id: FieldId) -> Option<String> {
            self.0.lock().ok()?.read(id)
        }

        fn write(&mut self, id: FieldId, value: &str) -> std::io::Result<()> {
            match self.0.lock() {
                Ok(mut store) => store.write(id, value),
                Err(_) => Err(std::io::Error::other("store poisoned")),
            }
        }
    }

    fn seeded_store() -> MemoryFieldStore {
        let mut store = MemoryFieldStore::default();
        store.write(FieldId::Name, "Ada").expect("write");
        store.write(FieldId::Role, "developer").expect("write");
        store
    }

    #[test]
    fn mount_seeds_values_from_the_store() {
        let form = ProblemForm::new(Box::new(seeded_store()));
        assert_eq!(form.value(FieldId::Name), "Ada");
        assert_eq!(form.value(FieldId::Role), "developer");
        assert_eq!(form.value(FieldId::Struggle), "");
    }

    #[test]
    fn edits_write_through_immediately() {
        let shared = SharedStore::default();
        let mut form = ProblemForm::new(Box::new(shared.clone()));
        form.insert('h');
        form.insert('i');
        assert_eq!(form.problem().name, "hi");
        form.backspace();
        assert_eq!(form.problem().name, "h");

        // A fresh mount over the same store sees the persisted draft.
        let remounted = ProblemForm::new(Box::new(shared));
        assert_eq!(remounted.value(FieldId::Name), "h");
    }

    #[test]
    fn focus_cycles_through_all_controls() {
        let mut form = ProblemForm::new(Box::<MemoryFieldStore>::default());
        assert_eq!(form.focus(), Focus::Name);
        form.focus_next();
        assert_eq!(form.focus(), Focus::Role);
        form.focus_next();
        assert_eq!(form.focus(), Focus::Struggle);
        form.focus_next();
        assert_eq!(form.focus(), Focus::Next);
        form.focus_next();
        assert_eq!(form.focus(), Focus::Name);
        form.focus_prev();
        assert_eq!(form.focus(), Focus::Next);
    }

    #[test]
    fn newline_only_lands_in_the_struggle_field() {
        let mut form = ProblemForm::new(Box::<MemoryFieldStore>::default());
        form.newline();
        assert_eq!(form.value(FieldId::Name), "");

        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), Focus::Struggle);
        form.insert('a');
        form.newline();
        form.insert('b');
        assert_eq!(form.value(FieldId::Struggle), "a\nb");
    }

    #[test]
    fn empty_form_still_builds_a_problem() {
        let form = ProblemForm::new(Box::<MemoryFieldStore>::default());
        let problem = form.problem();
        assert_eq!(problem.name, "");
        assert_eq!(problem.role, "");
        assert_eq!(problem.struggle, "");
    }

    #[test]
    fn typing_at_the_next_control_is_a_no_op() {
        let mut form = ProblemForm::new(Box::<MemoryFieldStore>::default());
        form.focus_prev();
        assert_eq!(form.focus(), Focus::Next);
        form.insert('x');
        form.backspace();
        let problem = form.problem();
        assert_eq!(problem.name, "");
        assert_eq!(problem.role, "");
        assert_eq!(problem.struggle, "");
    }
}
