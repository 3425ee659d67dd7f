/// Energy readout shown as `"<energy>%"`.
#[derive(Debug, Default)]
pub struct EnergyDisplay {
    text: String,
    last: Option<f32>,
}

impl EnergyDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Refreshes the text; returns true when it changed.
    pub fn update(&mut self, energy: f32) -> bool {
        if self.last == Some(energy) {
            return false;
        }
        self.last = Some(energy);
        self.text = format!("{energy}%");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_and_dedups() {
        let mut hud = EnergyDisplay::new();
        assert!(hud.update(100.0));
        assert_eq!(hud.text(), "100%");
        assert!(!hud.update(100.0));
        assert!(hud.update(89.5));
        assert_eq!(hud.text(), "89.5%");
    }
}
