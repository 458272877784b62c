//! Minimales Intent-Log für Diagnose-Zwecke.

use super::EditorIntent;

/// Speichert verarbeitete Intents in Reihenfolge.
#[derive(Default)]
pub struct IntentLog {
    entries: Vec<EditorIntent>,
}

impl IntentLog {
    const MAX_ENTRIES: usize = 1000;
}

impl IntentLog {
    /// Erstellt ein leeres Intent-Log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fügt einen verarbeiteten Intent hinzu.
    /// Begrenzt auf MAX_ENTRIES, ältere Einträge werden verworfen.
    pub fn record(&mut self, intent: &EditorIntent) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(intent.clone());
    }

    /// Gibt die Anzahl der geloggten Intents zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Intents vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[EditorIntent] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_caps_entries() {
        let mut log = IntentLog::new();
        for _ in 0..IntentLog::MAX_ENTRIES + 1 {
            log.record(&EditorIntent::UndoRequested);
        }
        assert!(log.len() <= IntentLog::MAX_ENTRIES);
        assert!(!log.is_empty());
    }
}
