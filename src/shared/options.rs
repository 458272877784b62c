//! Editor-Einstellungen mit den Standardwerten des Interaktions-Designs.

/// Justierbare Parameter des Edit-Kerns.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    /// Drossel-Intervall für Drag-Anfragen mit Kontrollpunkt-Nachbarn,
    /// in Millisekunden. Ohne Nachbarn wird nie gedrosselt.
    pub drag_throttle_ms: u64,
    /// Pixel-Radius um den Fußpunkt beim Einfügen per Long-Press.
    pub insert_pixel_radius: f64,
    /// Untere Klemme des Einfüge-Schwellwerts in Metern.
    pub insert_min_m: f64,
    /// Obere Klemme des Einfüge-Schwellwerts in Metern.
    pub insert_max_m: f64,
    /// Punktabstand der Geraden-Verdichtung im Linienmodus, in Metern.
    pub straight_line_spacing_m: f64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            drag_throttle_ms: 200,
            insert_pixel_radius: 26.0,
            insert_min_m: 8.0,
            insert_max_m: 30.0,
            straight_line_spacing_m: 10.0,
        }
    }
}
