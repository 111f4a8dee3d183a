use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Callback through which a view reports edited notes to its owner.
pub type NotesCallback = Box<dyn FnMut(NaiveDate, &str) + Send>;

/// Owned state of the weekly log view: which quarter/week section is open and
/// the free-text notes typed against each day.
///
/// The view never persists anything itself. Every note edit is handed to the
/// `on_notes_change` callback given at construction, and the owner decides
/// where it goes (usually a `NotesStore` keyed by date).
pub struct WeeklyLogView {
    open_section: Option<String>,
    notes: BTreeMap<NaiveDate, String>,
    on_notes_change: NotesCallback,
}

impl WeeklyLogView {
    pub fn new(notes: BTreeMap<NaiveDate, String>, on_notes_change: NotesCallback) -> Self {
        Self {
            open_section: None,
            notes,
            on_notes_change,
        }
    }

    pub fn open_section(&self) -> Option<&str> {
        self.open_section.as_deref()
    }

    /// Opens `section`, or closes it when it is already the open one.
    /// Only one section is open at a time.
    pub fn toggle_section(&mut self, section: &str) {
        if self.open_section.as_deref() == Some(section) {
            self.open_section = None;
        } else {
            self.open_section = Some(section.to_string());
        }
    }

    pub fn notes_for(&self, date: NaiveDate) -> Option<&str> {
        self.notes.get(&date).map(String::as_str)
    }

    /// Records the notes for a day and reports the change upward.
    /// Blank notes clear the entry.
    pub fn set_notes(&mut self, date: NaiveDate, notes: &str) {
        if notes.trim().is_empty() {
            self.notes.remove(&date);
        } else {
            self.notes.insert(date, notes.to_string());
        }
        (self.on_notes_change)(date, notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    #[test]
    fn toggling_opens_one_section_at_a_time() {
        let mut view = WeeklyLogView::new(BTreeMap::new(), Box::new(|_: NaiveDate, _: &str| {}));
        assert_eq!(view.open_section(), None);

        view.toggle_section("2024-Q1");
        assert_eq!(view.open_section(), Some("2024-Q1"));

        view.toggle_section("2023-Q4");
        assert_eq!(view.open_section(), Some("2023-Q4"));

        view.toggle_section("2023-Q4");
        assert_eq!(view.open_section(), None);
    }

    #[test]
    fn note_edits_are_reported_upward() {
        let reported: Arc<Mutex<Vec<(NaiveDate, String)>>> = Arc::default();
        let sink = Arc::clone(&reported);
        let mut view = WeeklyLogView::new(
            BTreeMap::from([(date(12), "held too long".to_string())]),
            Box::new(move |d: NaiveDate, n: &str| sink.lock().unwrap().push((d, n.to_string()))),
        );

        assert_eq!(view.notes_for(date(12)), Some("held too long"));
        view.set_notes(date(13), "sized down after loss");
        view.set_notes(date(12), "  ");

        assert_eq!(view.notes_for(date(13)), Some("sized down after loss"));
        assert_eq!(view.notes_for(date(12)), None);
        let reported = reported.lock().unwrap();
        assert_eq!(reported.len(), 2);
        assert_eq!(reported[0], (date(13), "sized down after loss".to_string()));
        assert_eq!(reported[1].0, date(12));
    }
}
