/// Static slot table. Built once at startup and shared immutably through
/// the application state, never through a global.
#[derive(Debug, Clone)]
pub struct SlotConfig {
    slots: Vec<SlotDef>,
    pub window_days: u32,
    pub max_window_days: u32,
}

#[derive(Debug, Clone)]
pub struct SlotDef {
    pub code: &'static str,
    pub start: &'static str,
    pub end: &'static str,
}

impl SlotDef {
    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

impl SlotConfig {
    pub fn standard() -> Self {
        Self {
            slots: vec![
                SlotDef {
                    code: "A",
                    start: "09:00",
                    end: "11:00",
                },
                SlotDef {
                    code: "B",
                    start: "13:00",
                    end: "15:00",
                },
                SlotDef {
                    code: "C",
                    start: "15:30",
                    end: "17:30",
                },
            ],
            window_days: 14,
            max_window_days: 31,
        }
    }

    /// Slots in display order.
    pub fn slots(&self) -> &[SlotDef] {
        &self.slots
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.slots.iter().any(|slot| slot.code == code)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn standard_slots_are_ordered_and_labeled() {
        let config = SlotConfig::standard();
        let codes: Vec<&str> = config.slots().iter().map(|slot| slot.code).collect();
        assert_eq!(codes, vec!["A", "B", "C"]);
        assert_eq!(config.slots()[1].label(), "13:00 - 15:00");
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let config = SlotConfig::standard();
        assert!(config.is_known("A"));
        assert!(!config.is_known("D"));
        assert!(!config.is_known(""));
    }
}
