use serde::{Deserialize, Serialize};

/// One map panel's current filter choices.
///
/// Owned by the server per panel and mutated only through [`ViewEvent`]s;
/// the whole pipeline recomputes from this struct, nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub year: u16,
    /// Selected nationality tags, insertion-ordered, no duplicates.
    /// Empty means "all nationalities".
    pub nationalities: Vec<String>,
    pub show_lines: bool,
}

impl SelectionState {
    pub fn new(year: u16) -> Self {
        SelectionState {
            year,
            nationalities: Vec::new(),
            show_lines: true,
        }
    }

    pub fn set_year(&mut self, year: u16) {
        self.year = year;
    }

    /// Adds a nationality tag. Returns false (and changes nothing) if the
    /// tag is already selected.
    pub fn add_nationality(&mut self, nationality: &str) -> bool {
        if self.nationalities.iter().any(|n| n == nationality) {
            return false;
        }
        self.nationalities.push(nationality.to_string());
        true
    }

    /// Removes a tag; returns whether it was present.
    pub fn remove_nationality(&mut self, nationality: &str) -> bool {
        let before = self.nationalities.len();
        self.nationalities.retain(|n| n != nationality);
        self.nationalities.len() != before
    }

    /// Flips line visibility and returns the new value.
    pub fn toggle_lines(&mut self) -> bool {
        self.show_lines = !self.show_lines;
        self.show_lines
    }

    pub fn apply(&mut self, event: &ViewEvent) {
        match event {
            ViewEvent::SetYear { year } => self.set_year(*year),
            ViewEvent::AddNationality { nationality } => {
                self.add_nationality(nationality);
            }
            ViewEvent::RemoveNationality { nationality } => {
                self.remove_nationality(nationality);
            }
            ViewEvent::ToggleLines => {
                self.toggle_lines();
            }
        }
    }
}

/// A single interaction coming from the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    SetYear { year: u16 },
    AddNationality { nationality: String },
    RemoveNationality { nationality: String },
    ToggleLines,
}
