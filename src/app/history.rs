//! Command-History: Zwei-Stack Undo/Redo über (undo, redo)-Closures.
//!
//! Jedes Command schließt über einen Snapshot der Punktfolge und agiert
//! auf dem lebenden [`RouteStore`] per Routen-Index, nie über eigene
//! Routen-Referenzen.

use crate::core::RouteStore;

/// Eine Undo- bzw. Redo-Aktion über dem RouteStore.
pub type EditAction = Box<dyn FnMut(&mut RouteStore)>;

/// Reversible Mutation: ein (undo, redo)-Paar.
pub struct EditCommand {
    /// Kurzname für Logging
    pub label: &'static str,
    /// Macht die Mutation rückgängig
    pub undo: Option<EditAction>,
    /// Führt die Mutation (erneut) aus
    pub redo: Option<EditAction>,
}

impl EditCommand {
    /// Erstellt ein vollständiges Command aus beiden Aktionen.
    pub fn new(
        label: &'static str,
        undo: impl FnMut(&mut RouteStore) + 'static,
        redo: impl FnMut(&mut RouteStore) + 'static,
    ) -> Self {
        Self {
            label,
            undo: Some(Box::new(undo)),
            redo: Some(Box::new(redo)),
        }
    }
}

impl std::fmt::Debug for EditCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditCommand")
            .field("label", &self.label)
            .field("undo", &self.undo.is_some())
            .field("redo", &self.redo.is_some())
            .finish()
    }
}

/// Sink für externe Undo/Redo-Controls (Buttons aktivieren/deaktivieren).
pub trait HistoryUiSink {
    /// Wird nach jeder History-Operation aufgerufen.
    fn history_changed(&mut self, can_undo: bool, can_redo: bool);
}

/// Fehler der Command-History.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Command ohne undo- oder redo-Aktion eingereicht (Programmierfehler).
    #[error("Command '{label}' hat keine vollständigen undo/redo-Aktionen")]
    InvalidCommand {
        /// Label des fehlerhaften Commands
        label: &'static str,
    },
}

/// Zwei-Stack Undo/Redo-Engine.
///
/// `submit` räumt den Redo-Stack bewusst *nicht* ab; rückgängig
/// gemachte Schritte bleiben auch nach neuen Commands wiederholbar.
#[derive(Default)]
pub struct CommandHistory {
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
    ui: Option<Box<dyn HistoryUiSink>>,
}

impl CommandHistory {
    /// Erstellt eine leere History.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert den UI-Sink und meldet sofort den aktuellen Zustand.
    pub fn set_ui_sink(&mut self, sink: impl HistoryUiSink + 'static) {
        self.ui = Some(Box::new(sink));
        self.notify_ui();
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Anzahl der Einträge auf dem Undo-Stack.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Anzahl der Einträge auf dem Redo-Stack.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Reicht ein Command ein: validiert, führt `redo` sofort aus und
    /// legt es auf den Undo-Stack.
    pub fn submit(
        &mut self,
        store: &mut RouteStore,
        mut command: EditCommand,
    ) -> Result<(), HistoryError> {
        if command.undo.is_none() || command.redo.is_none() {
            return Err(HistoryError::InvalidCommand {
                label: command.label,
            });
        }
        log::debug!("Command '{}' ausgeführt", command.label);
        if let Some(redo) = command.redo.as_mut() {
            redo(store);
        }
        self.undo_stack.push(command);
        self.notify_ui();
        Ok(())
    }

    /// Macht das oberste Command rückgängig; No-op bei leerem Stack.
    pub fn undo(&mut self, store: &mut RouteStore) {
        let Some(mut command) = self.undo_stack.pop() else {
            log::debug!("Undo: nichts zu tun");
            return;
        };
        if let Some(undo) = command.undo.as_mut() {
            undo(store);
        }
        log::debug!("Undo '{}'", command.label);
        self.redo_stack.push(command);
        self.notify_ui();
    }

    /// Wiederholt das zuletzt rückgängig gemachte Command; No-op bei
    /// leerem Stack.
    pub fn redo(&mut self, store: &mut RouteStore) {
        let Some(mut command) = self.redo_stack.pop() else {
            log::debug!("Redo: nichts zu tun");
            return;
        };
        if let Some(redo) = command.redo.as_mut() {
            redo(store);
        }
        log::debug!("Redo '{}'", command.label);
        self.undo_stack.push(command);
        self.notify_ui();
    }

    fn notify_ui(&mut self) {
        let can_undo = self.can_undo();
        let can_redo = self.can_redo();
        if let Some(ui) = self.ui.as_mut() {
            ui.history_changed(can_undo, can_redo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoutePoint;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn append_command(lon: f64, lat: f64) -> EditCommand {
        EditCommand::new(
            "test-append",
            |store| {
                store.remove_last_point(0);
            },
            move |store| {
                store.append_point(0, RoutePoint::control(lon, lat));
            },
        )
    }

    #[test]
    fn submit_executes_redo_immediately() {
        let mut store = RouteStore::new();
        let mut history = CommandHistory::new();
        history.submit(&mut store, append_command(1.0, 1.0)).unwrap();
        assert_eq!(store.current_route().len(), 1);
        assert!(history.can_undo());
    }

    #[test]
    fn invalid_command_fails_without_push() {
        let mut store = RouteStore::new();
        let mut history = CommandHistory::new();
        let broken = EditCommand {
            label: "kaputt",
            undo: None,
            redo: Some(Box::new(|_| {})),
        };
        let err = history.submit(&mut store, broken).unwrap_err();
        assert!(matches!(err, HistoryError::InvalidCommand { label: "kaputt" }));
        assert!(!history.can_undo());
    }

    #[test]
    fn undo_redo_inverse_law() {
        // n Commands, n Undos in umgekehrter Reihenfolge → exakter Ausgangszustand
        let mut store = RouteStore::new();
        let mut history = CommandHistory::new();
        let before = store.current_route().snapshot();

        for i in 0..5 {
            history
                .submit(&mut store, append_command(i as f64, -(i as f64)))
                .unwrap();
        }
        assert_eq!(store.current_route().len(), 5);

        for _ in 0..5 {
            history.undo(&mut store);
        }
        assert_eq!(store.current_route().snapshot(), before);
    }

    #[test]
    fn stack_discipline_after_partial_undo() {
        let mut store = RouteStore::new();
        let mut history = CommandHistory::new();
        for i in 0..4 {
            history.submit(&mut store, append_command(i as f64, 0.0)).unwrap();
        }
        history.undo(&mut store);
        history.undo(&mut store);
        assert_eq!(history.undo_depth(), 2);
        assert_eq!(history.redo_depth(), 2);

        // submit lässt den Redo-Stack bewusst stehen
        history.submit(&mut store, append_command(99.0, 0.0)).unwrap();
        assert_eq!(history.undo_depth(), 3);
        assert_eq!(history.redo_depth(), 2);

        history.redo(&mut store);
        assert_eq!(history.redo_depth(), 1);
        assert_eq!(history.undo_depth(), 4);
    }

    #[test]
    fn empty_stack_operations_are_noops() {
        let mut store = RouteStore::new();
        let mut history = CommandHistory::new();
        history.undo(&mut store);
        history.redo(&mut store);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn ui_sink_sees_every_transition() {
        struct Recorder(Rc<RefCell<Vec<(bool, bool)>>>);
        impl HistoryUiSink for Recorder {
            fn history_changed(&mut self, can_undo: bool, can_redo: bool) {
                self.0.borrow_mut().push((can_undo, can_redo));
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = RouteStore::new();
        let mut history = CommandHistory::new();
        history.set_ui_sink(Recorder(seen.clone()));

        history.submit(&mut store, append_command(1.0, 1.0)).unwrap();
        history.undo(&mut store);
        history.redo(&mut store);

        assert_eq!(
            seen.borrow().as_slice(),
            &[(false, false), (true, false), (false, true), (true, false)]
        );
    }
}
