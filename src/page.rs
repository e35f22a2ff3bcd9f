use std::collections::{BTreeMap, BTreeSet};

pub const DAYS: &str = "days";
pub const HOURS: &str = "hours";
pub const MINUTES: &str = "minutes";
pub const SECONDS: &str = "seconds";
pub const TOTAL_RAISED: &str = "total-raised";
pub const DAYS_LEFT: &str = "days-left";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    PhoneNumber,
    Amount,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::PhoneNumber => "phone_number",
            Field::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dialog {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogChange {
    Shown(Dialog),
    Closed(Dialog),
}

pub trait Page: Send + 'static {
    fn set_text(&mut self, id: &str, text: &str);
    fn progress_width(&self) -> f64;
    fn set_progress_width(&mut self, percent: f64);

    fn field_value(&self, field: Field) -> String;
    fn set_field_value(&mut self, field: Field, value: &str);
    fn reset_form(&mut self);

    fn highlight_amount_button(&mut self, value: &str);
    fn clear_amount_highlights(&mut self);
    fn set_submit_enabled(&mut self, enabled: bool);

    fn show_dialog(&mut self, dialog: Dialog);
    fn close_dialog(&mut self, dialog: Dialog);
    fn set_error_message(&mut self, message: &str);

    fn scroll_into_view(&mut self, id: &str) -> bool;
    fn mark_revealed(&mut self, region: &str);
}

#[derive(Debug, Clone)]
pub struct AmountButton {
    pub value: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryPage {
    texts: BTreeMap<String, String>,
    progress: f64,
    fields: BTreeMap<Field, String>,
    buttons: Vec<AmountButton>,
    submit_enabled: bool,
    open_dialogs: BTreeSet<Dialog>,
    dialog_log: Vec<DialogChange>,
    error_message: String,
    anchors: BTreeSet<String>,
    scrolled_to: Vec<String>,
    revealed: BTreeSet<String>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl MemoryPage {
    pub fn new(presets: &[&str]) -> Self {
        let mut texts = BTreeMap::new();
        for id in [DAYS, HOURS, MINUTES, SECONDS] {
            texts.insert(id.to_string(), "00".to_string());
        }
        texts.insert(TOTAL_RAISED.to_string(), "Ksh. 0".to_string());
        texts.insert(DAYS_LEFT.to_string(), "0".to_string());

        Self {
            texts,
            progress: 0.0,
            fields: BTreeMap::new(),
            buttons: presets
                .iter()
                .map(|value| AmountButton {
                    value: value.to_string(),
                    highlighted: false,
                })
                .collect(),
            submit_enabled: true,
            open_dialogs: BTreeSet::new(),
            dialog_log: Vec::new(),
            error_message: String::new(),
            anchors: BTreeSet::new(),
            scrolled_to: Vec::new(),
            revealed: BTreeSet::new(),
        }
    }

    pub fn with_progress(mut self, percent: f64) -> Self {
        self.progress = percent;
        self
    }

    pub fn with_anchor(mut self, id: &str) -> Self {
        self.anchors.insert(id.to_string());
        self
    }

    pub fn text(&self, id: &str) -> &str {
        self.texts.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn buttons(&self) -> &[AmountButton] {
        &self.buttons
    }

    pub fn highlighted(&self) -> Vec<&str> {
        self.buttons
            .iter()
            .filter(|button| button.highlighted)
            .map(|button| button.value.as_str())
            .collect()
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn is_open(&self, dialog: Dialog) -> bool {
        self.open_dialogs.contains(&dialog)
    }

    pub fn dialog_log(&self) -> &[DialogChange] {
        &self.dialog_log
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn scrolled_to(&self) -> &[String] {
        &self.scrolled_to
    }

    pub fn is_revealed(&self, region: &str) -> bool {
        self.revealed.contains(region)
    }
}

impl Page for MemoryPage {
    fn set_text(&mut self, id: &str, text: &str) {
        self.texts.insert(id.to_string(), text.to_string());
    }

    fn progress_width(&self) -> f64 {
        self.progress
    }

    fn set_progress_width(&mut self, percent: f64) {
        self.progress = percent;
    }

    fn field_value(&self, field: Field) -> String {
        self.fields.get(&field).cloned().unwrap_or_default()
    }

    fn set_field_value(&mut self, field: Field, value: &str) {
        self.fields.insert(field, value.to_string());
    }

    fn reset_form(&mut self) {
        self.fields.clear();
    }

    fn highlight_amount_button(&mut self, value: &str) {
        for button in self.buttons.iter_mut().filter(|button| button.value == value) {
            button.highlighted = true;
        }
    }

    fn clear_amount_highlights(&mut self) {
        for button in &mut self.buttons {
            button.highlighted = false;
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn show_dialog(&mut self, dialog: Dialog) {
        self.open_dialogs.insert(dialog);
        self.dialog_log.push(DialogChange::Shown(dialog));
    }

    fn close_dialog(&mut self, dialog: Dialog) {
        self.open_dialogs.remove(&dialog);
        self.dialog_log.push(DialogChange::Closed(dialog));
    }

    fn set_error_message(&mut self, message: &str) {
        self.error_message = message.to_string();
    }

    fn scroll_into_view(&mut self, id: &str) -> bool {
        if !self.anchors.contains(id) {
            return false;
        }
        self.scrolled_to.push(id.to_string());
        true
    }

    fn mark_revealed(&mut self, region: &str) {
        self.revealed.insert(region.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_page_starts_with_zeroed_countdown() {
        let page = MemoryPage::new(&["100", "500"]);
        assert_eq!(page.text(DAYS), "00");
        assert_eq!(page.text(SECONDS), "00");
        assert!(page.highlighted().is_empty());
        assert!(page.submit_enabled());
    }

    #[test]
    fn reset_form_clears_every_field() {
        let mut page = MemoryPage::default();
        page.set_field_value(Field::FullName, "Jane");
        page.set_field_value(Field::Amount, "20");
        page.reset_form();
        assert_eq!(page.field_value(Field::FullName), "");
        assert_eq!(page.field_value(Field::Amount), "");
    }

    #[test]
    fn dialog_changes_are_recorded_in_order() {
        let mut page = MemoryPage::default();
        page.show_dialog(Dialog::Loading);
        page.close_dialog(Dialog::Loading);
        page.show_dialog(Dialog::Error);
        assert_eq!(
            page.dialog_log(),
            &[
                DialogChange::Shown(Dialog::Loading),
                DialogChange::Closed(Dialog::Loading),
                DialogChange::Shown(Dialog::Error),
            ]
        );
        assert!(page.is_open(Dialog::Error));
        assert!(!page.is_open(Dialog::Loading));
    }
}
