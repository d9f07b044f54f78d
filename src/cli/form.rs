use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::capture::{CaptureMode, ReceiptInput};
use crate::error::Result;
use crate::form::to_fields;
use crate::models::{FormSnapshot, LineItem, RequiredField, SubmitState};
use crate::settings::load_settings;
use crate::validator::{SubmitGate, ValidationPolicy};

const LABEL_STYLE: Style = Style::new().fg(Color::DarkGray);
const FOCUSED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);
const MISSING_STYLE: Style = Style::new().fg(Color::Red);
const ENABLED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Rgb(80, 220, 100))
    .add_modifier(Modifier::BOLD);
const DISABLED_STYLE: Style = Style::new().fg(Color::DarkGray);

const AMOUNT_WIDTH: usize = 10;
const ACCOUNT_WIDTH: usize = 12;
const DESCRIPTION_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Amount,
    Account,
    Description,
}

#[derive(Default)]
struct RowEdit {
    amount: String,
    account: String,
    description: String,
}

impl RowEdit {
    fn field(&self, field: Field) -> &String {
        match field {
            Field::Amount => &self.amount,
            Field::Account => &self.account,
            Field::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Amount => &mut self.amount,
            Field::Account => &mut self.account,
            Field::Description => &mut self.description,
        }
    }
}

enum FormAction {
    Continue,
    Submit,
    Cancel,
}

struct ExpenseForm {
    rows: Vec<RowEdit>,
    focus_row: usize,
    focus_field: Field,
    receipts: ReceiptInput,
    gate: SubmitGate,
    snap: FormSnapshot,
}

impl ExpenseForm {
    fn new(row_count: usize, policy: ValidationPolicy) -> Self {
        let rows = (0..row_count).map(|_| RowEdit::default()).collect();
        // The submit control is disabled before the first validation pass;
        // the snapshot here mirrors the untouched form, not a recompute.
        Self {
            rows,
            focus_row: 0,
            focus_field: Field::Amount,
            receipts: ReceiptInput::new(),
            gate: SubmitGate::new(policy),
            snap: FormSnapshot {
                total: 0.0,
                violations: vec![],
                submit: SubmitState::Disabled,
            },
        }
    }

    fn items(&self) -> Vec<LineItem> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| LineItem::new(i as u32, &row.amount, &row.account, &row.description))
            .collect()
    }

    /// Full validation pass. Runs after every edit, never incrementally.
    fn recompute(&mut self) {
        self.snap = self.gate.recompute(&self.items());
    }

    fn row_missing(&self, row: usize, field: RequiredField) -> bool {
        self.snap
            .violations
            .iter()
            .any(|v| v.row == row as u32 && v.missing.contains(&field))
    }

    fn field_span(&self, row: usize, field: Field, width: usize) -> Span<'static> {
        let text = self.rows[row].field(field);
        let focused = self.focus_row == row && self.focus_field == field;
        // Show the tail of long values so the cursor end stays visible.
        let chars: Vec<char> = text.chars().collect();
        let shown: String = if chars.len() > width {
            chars[chars.len() - width..].iter().collect()
        } else {
            format!("{text:<width$}")
        };

        let style = if focused {
            FOCUSED_STYLE
        } else {
            let missing = match field {
                Field::Account => self.row_missing(row, RequiredField::Account),
                Field::Description => self.row_missing(row, RequiredField::Description),
                Field::Amount => false,
            };
            if missing {
                MISSING_STYLE
            } else {
                Style::default()
            }
        };
        Span::styled(shown, style)
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, rows_area, receipts_area, total_area, submit_area, hints_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(self.rows.len() as u16 + 1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(area);

        let header = vec![
            Line::from(Span::styled(
                format!("Expense report — {}", Local::now().format("%Y-%m-%d")),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "  {:<width_a$} {:<width_b$} {:<width_c$}",
                    "Amount",
                    "Account",
                    "Description",
                    width_a = AMOUNT_WIDTH,
                    width_b = ACCOUNT_WIDTH,
                    width_c = DESCRIPTION_WIDTH,
                ),
                LABEL_STYLE,
            )),
        ];
        frame.render_widget(Paragraph::new(header), header_area);

        let row_lines: Vec<Line> = (0..self.rows.len())
            .map(|i| {
                Line::from(vec![
                    Span::raw("  "),
                    self.field_span(i, Field::Amount, AMOUNT_WIDTH),
                    Span::raw(" "),
                    self.field_span(i, Field::Account, ACCOUNT_WIDTH),
                    Span::raw(" "),
                    self.field_span(i, Field::Description, DESCRIPTION_WIDTH),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(row_lines), rows_area);

        let receipts_line = match self.receipts.mode() {
            CaptureMode::Camera => "Receipts: camera capture (F2 to pick a file instead)",
            CaptureMode::FilePicker => "Receipts: file picker",
        };
        frame.render_widget(
            Paragraph::new(vec![Line::from(""), Line::from(receipts_line)]).style(LABEL_STYLE),
            receipts_area,
        );

        frame.render_widget(
            Paragraph::new(format!("Total:  {}", self.snap.total_text())),
            total_area,
        );

        let submit_span = match self.snap.submit {
            SubmitState::Enabled => Span::styled(" Submit ", ENABLED_STYLE),
            SubmitState::Disabled => Span::styled(" Submit (disabled) ", DISABLED_STYLE),
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::raw("        "), submit_span])),
            submit_area,
        );

        frame.render_widget(
            Paragraph::new("Tab/Shift+Tab=field, Up/Down=row, Enter=submit, Esc=quit")
                .style(LABEL_STYLE),
            hints_area,
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter => {
                // The gate, not the key, decides whether submission happens.
                if self.gate.state().is_enabled() {
                    return FormAction::Submit;
                }
            }
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Up => self.focus_row = self.focus_row.saturating_sub(1),
            KeyCode::Down => {
                self.focus_row = (self.focus_row + 1).min(self.rows.len() - 1);
            }
            KeyCode::F(2) => self.receipts.release_capture(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.rows[self.focus_row].field_mut(self.focus_field).push(c);
                self.recompute();
            }
            KeyCode::Backspace => {
                self.rows[self.focus_row].field_mut(self.focus_field).pop();
                self.recompute();
            }
            _ => {}
        }
        FormAction::Continue
    }

    fn focus_next(&mut self) {
        self.focus_field = match self.focus_field {
            Field::Amount => Field::Account,
            Field::Account => Field::Description,
            Field::Description => {
                self.focus_row = (self.focus_row + 1) % self.rows.len();
                Field::Amount
            }
        };
    }

    fn focus_prev(&mut self) {
        self.focus_field = match self.focus_field {
            Field::Description => Field::Account,
            Field::Account => Field::Amount,
            Field::Amount => {
                self.focus_row = self.focus_row.checked_sub(1).unwrap_or(self.rows.len() - 1);
                Field::Description
            }
        };
    }
}

pub fn run(row_count: usize, require: Option<&str>) -> Result<()> {
    let policy = match require {
        Some(list) => ValidationPolicy::new(super::parse_required_list(list)?),
        None => load_settings().policy(),
    };

    let mut form = ExpenseForm::new(row_count.max(1), policy);

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<FormAction> = loop {
        if let Err(e) = terminal.draw(|frame| form.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break Ok(FormAction::Cancel);
                }
                match form.handle_key(key) {
                    FormAction::Continue => {}
                    action => break Ok(action),
                }
            }
            Ok(_) => {}
        }
    };

    drop(terminal);
    ratatui::restore();

    match result? {
        FormAction::Submit => {
            let mut payload = serde_json::Map::new();
            payload.insert(
                "date".to_string(),
                serde_json::Value::String(Local::now().format("%Y-%m-%d").to_string()),
            );
            for (name, value) in to_fields(&form.items()) {
                payload.insert(name, serde_json::Value::String(value));
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::Value::Object(payload))?
            );
        }
        FormAction::Cancel | FormAction::Continue => {
            println!("Cancelled — nothing submitted.");
        }
    }
    Ok(())
}
