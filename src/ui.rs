use crate::app::{Landing, PageEvent};
use crate::backend::Backend;
use crate::page::{self, Dialog, Field, MemoryPage, Page};

const BAR_WIDTH: usize = 30;

pub fn render_page(page: &MemoryPage) -> String {
    let progress = page.progress_width();
    let filled = ((progress / 100.0) * BAR_WIDTH as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "#".repeat(filled.min(BAR_WIDTH)),
        ".".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))
    );

    let presets = page
        .buttons()
        .iter()
        .map(|button| {
            if button.highlighted {
                format!("[{}]", button.value)
            } else {
                button.value.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    PAGE_TEMPLATE
        .replace("{{DAYS}}", page.text(page::DAYS))
        .replace("{{HOURS}}", page.text(page::HOURS))
        .replace("{{MINUTES}}", page.text(page::MINUTES))
        .replace("{{SECONDS}}", page.text(page::SECONDS))
        .replace("{{TOTAL}}", page.text(page::TOTAL_RAISED))
        .replace("{{DAYS_LEFT}}", page.text(page::DAYS_LEFT))
        .replace("{{BAR}}", &bar)
        .replace("{{PERCENT}}", &format!("{progress:.1}"))
        .replace("{{NAME}}", &page.field_value(Field::FullName))
        .replace("{{PHONE}}", &page.field_value(Field::PhoneNumber))
        .replace("{{AMOUNT}}", &page.field_value(Field::Amount))
        .replace("{{PRESETS}}", &presets)
        .replace("{{SUBMIT}}", if page.submit_enabled() { "ready" } else { "disabled" })
        .replace("{{DIALOG}}", &dialog_line(page))
}

fn dialog_line(page: &MemoryPage) -> String {
    if page.is_open(Dialog::Loading) {
        "Processing your contribution...".to_string()
    } else if page.is_open(Dialog::Error) {
        format!("Error: {}", page.error_message())
    } else if page.is_open(Dialog::Success) {
        "Check your phone to complete the payment.".to_string()
    } else {
        String::new()
    }
}

const PAGE_TEMPLATE: &str = r#"
  Camp Meeting 2025
  -----------------
  Starts in  {{DAYS}}d {{HOURS}}h {{MINUTES}}m {{SECONDS}}s   ({{DAYS_LEFT}} days left)
  Raised     {{TOTAL}}
  Progress   [{{BAR}}] {{PERCENT}}%

  Name    : {{NAME}}
  Phone   : {{PHONE}}
  Amount  : {{AMOUNT}}
  Presets : {{PRESETS}}
  Submit  : {{SUBMIT}}
  {{DIALOG}}
"#;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set(Field, String),
    AmountInput(String),
    Preset(String),
    Goto(String),
    Submit,
    Show,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match verb {
        "name" => Ok(Command::Set(Field::FullName, rest.to_string())),
        "phone" => Ok(Command::Set(Field::PhoneNumber, rest.to_string())),
        "amount" => Ok(Command::AmountInput(rest.to_string())),
        "preset" if !rest.is_empty() => Ok(Command::Preset(rest.to_string())),
        "goto" if !rest.is_empty() => Ok(Command::Goto(rest.to_string())),
        "submit" => Ok(Command::Submit),
        "show" | "" => Ok(Command::Show),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!(
            "unknown command '{other}' (name, phone, amount, preset, goto, submit, show, quit)"
        )),
    }
}

pub fn dismiss_dialogs(page: &mut MemoryPage) {
    for dialog in [Dialog::Success, Dialog::Error] {
        if page.is_open(dialog) {
            page.close_dialog(dialog);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Continue,
    Render(String),
    Quit,
}

// Only submission runs detached; every other command lands before the next line is read.
pub async fn run_command<B: Backend>(landing: &Landing<MemoryPage, B>, command: Command) -> Step {
    dismiss_dialogs(&mut *landing.page().lock().await);
    match command {
        Command::Set(field, value) => landing.page().lock().await.set_field_value(field, &value),
        Command::AmountInput(raw) => {
            landing.dispatch(PageEvent::AmountInput(raw)).await;
        }
        Command::Preset(value) => {
            landing.dispatch(PageEvent::AmountPreset(value)).await;
        }
        Command::Goto(href) => {
            landing.dispatch(PageEvent::AnchorClick(href)).await;
        }
        Command::Submit => landing.spawn_event(PageEvent::Submit),
        Command::Show => {
            let page = landing.page().lock().await;
            let mut out = render_page(&page);
            if page.field_value(Field::Amount).is_empty() {
                out.push_str("  pick a preset or type `amount <value>`\n");
            }
            return Step::Render(out);
        }
        Command::Quit => return Step::Quit,
    }
    Step::Continue
}
