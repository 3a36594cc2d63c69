// UI-side state: focus, text editing, notices; drives the BookingForm

use crate::catalog::{self, Room};
use crate::error::Field;
use crate::form::BookingForm;
use crate::input::Action;
use crate::sink::BookingSink;
use crate::slot::{time_options, TimeOfDay};
use crate::util::{format_date, grapheme_len, pop_grapheme};
use chrono::{Days, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub form: BookingForm,
    pub focus: Field,
    pub notice: Option<String>,
    pub today: NaiveDate,
    pub date_format: String,
    pub input_max_len: usize,
    times: Vec<TimeOfDay>,
}

impl App {
    pub fn new(today: NaiveDate, date_format: impl Into<String>, input_max_len: usize) -> Self {
        Self {
            form: BookingForm::new(Some(today)),
            focus: Field::Room,
            notice: None,
            today,
            date_format: date_format.into(),
            input_max_len,
            times: time_options(),
        }
    }

    pub fn with_default_room(mut self, room: Option<&'static Room>) -> Self {
        self.form = self.form.with_default_room(room);
        self
    }

    pub fn apply(&mut self, action: Action, sink: &mut dyn BookingSink) -> Flow {
        match action {
            Action::Quit => return Flow::Quit,
            Action::Confirm => {
                if let Some(booking) = self.form.confirm(sink) {
                    self.notice = Some(format!(
                        "Booked {} on {}, {} - {}",
                        booking.room.name,
                        format_date(booking.date, &self.date_format),
                        booking.start,
                        booking.end
                    ));
                    self.focus = Field::Room;
                }
            }
            Action::Cancel => {
                self.form.cancel();
            }
            // the dialog is modal; nothing else reaches the draft meanwhile
            _ if self.form.is_confirming() => {}
            Action::NextField => self.focus = shift_field(self.focus, 1),
            Action::PrevField => self.focus = shift_field(self.focus, -1),
            Action::Step(n) => self.step(n),
            Action::Char(ch) => self.type_char(ch),
            Action::Backspace => self.backspace(),
            Action::Submit => {
                self.notice = None;
                if let Err(e) = self.form.submit() {
                    self.focus = e.field();
                }
            }
        }
        Flow::Continue
    }

    fn step(&mut self, n: i32) {
        match self.focus {
            Field::Room => {
                let next = cycle(catalog::rooms(), self.form.draft().room, n);
                self.form.set_room(next);
            }
            Field::Date => {
                let base = self.form.draft().date.unwrap_or(self.today);
                let days = Days::new(u64::from(n.unsigned_abs()));
                let moved = if n >= 0 {
                    base.checked_add_days(days)
                } else {
                    base.checked_sub_days(days)
                };
                if let Some(date) = moved {
                    self.form.set_date(Some(date));
                }
            }
            Field::StartTime => {
                let next = cycle(&self.times, self.form.draft().start.as_ref(), n).copied();
                self.form.set_start(next);
            }
            Field::EndTime => {
                let next = cycle(&self.times, self.form.draft().end.as_ref(), n).copied();
                self.form.set_end(next);
            }
            Field::Department | Field::Attendees => {}
        }
    }

    fn type_char(&mut self, ch: char) {
        let max = self.input_max_len;
        match self.focus {
            Field::Department => push_limited(&mut self.form.draft_mut().department, ch, max),
            Field::Attendees => push_limited(&mut self.form.draft_mut().attendees, ch, max),
            Field::Date if ch == 't' => self.form.set_date(Some(self.today)),
            _ => {}
        }
    }

    fn backspace(&mut self) {
        match self.focus {
            Field::Room => self.form.set_room(None),
            Field::Date => self.form.set_date(None),
            Field::Department => {
                pop_grapheme(&mut self.form.draft_mut().department);
            }
            Field::Attendees => {
                pop_grapheme(&mut self.form.draft_mut().attendees);
            }
            Field::StartTime => self.form.set_start(None),
            Field::EndTime => self.form.set_end(None),
        }
    }

    /// Text shown for a field's current value.
    pub fn value_text(&self, field: Field) -> String {
        let draft = self.form.draft();
        let unset = || "-".to_string();
        match field {
            Field::Room => draft.room.map(Room::label).unwrap_or_else(unset),
            Field::Date => draft
                .date
                .map(|d| format_date(d, &self.date_format))
                .unwrap_or_else(unset),
            Field::Department => draft.department.clone(),
            Field::Attendees => draft.attendees.clone(),
            Field::StartTime => draft.start.map(|t| t.to_string()).unwrap_or_else(unset),
            Field::EndTime => draft.end.map(|t| t.to_string()).unwrap_or_else(unset),
        }
    }
}

fn shift_field(current: Field, by: isize) -> Field {
    let len = Field::ALL.len() as isize;
    let idx = Field::ALL.iter().position(|f| *f == current).unwrap_or(0) as isize;
    Field::ALL[(idx + by).rem_euclid(len) as usize]
}

/// Move `by` steps through `options`, wrapping. From nothing, forward starts
/// at the first option and backward at the last.
fn cycle<'a, T: PartialEq>(options: &'a [T], current: Option<&T>, by: i32) -> Option<&'a T> {
    if options.is_empty() {
        return None;
    }
    let len = options.len() as i64;
    let by = i64::from(by);
    let idx = match current.and_then(|c| options.iter().position(|o| o == c)) {
        Some(i) => (i as i64 + by).rem_euclid(len),
        None if by >= 0 => (by - 1).rem_euclid(len),
        None => by.rem_euclid(len),
    };
    options.get(idx as usize)
}

fn push_limited(buf: &mut String, ch: char, max: usize) {
    if ch.is_control() {
        return;
    }
    if grapheme_len(buf) < max {
        buf.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Booking;

    fn app() -> App {
        App::new(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(), "%d/%m/%Y", 8)
    }

    fn run(app: &mut App, sink: &mut Vec<Booking>, actions: &[Action]) {
        for a in actions {
            assert_eq!(app.apply(*a, sink), Flow::Continue);
        }
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut sink: Vec<Booking> = Vec::new();
        let mut app = app();
        run(&mut app, &mut sink, &[Action::PrevField]);
        assert_eq!(app.focus, Field::EndTime);
        run(&mut app, &mut sink, &[Action::NextField, Action::NextField]);
        assert_eq!(app.focus, Field::Date);
    }

    #[test]
    fn room_selector_cycles() {
        let mut sink: Vec<Booking> = Vec::new();
        let mut app = app();
        run(&mut app, &mut sink, &[Action::Step(1)]);
        assert_eq!(app.form.draft().room.map(|r| r.name), Some("ห้องประชุม 1"));
        run(&mut app, &mut sink, &[Action::Step(-1)]);
        assert_eq!(app.form.draft().room.map(|r| r.name), Some("ห้องประชุม 8"));
        run(&mut app, &mut sink, &[Action::Backspace, Action::Step(-1)]);
        assert_eq!(app.form.draft().room.map(|r| r.name), Some("ห้องประชุม 8"));
        assert_eq!(app.value_text(Field::Room), "ห้องประชุม 8 (up to 50 people)");
    }

    #[test]
    fn date_moves_and_resets_to_today() {
        let mut sink: Vec<Booking> = Vec::new();
        let mut app = app();
        run(&mut app, &mut sink, &[Action::NextField, Action::Step(1)]);
        assert_eq!(app.value_text(Field::Date), "01/06/2024");
        run(&mut app, &mut sink, &[Action::Step(-7)]);
        assert_eq!(app.value_text(Field::Date), "25/05/2024");
        run(&mut app, &mut sink, &[Action::Backspace]);
        assert_eq!(app.form.draft().date, None);
        assert_eq!(app.value_text(Field::Date), "-");
        run(&mut app, &mut sink, &[Action::Char('t')]);
        assert_eq!(app.form.draft().date, Some(app.today));
    }

    #[test]
    fn text_fields_respect_limit_and_graphemes() {
        let mut sink: Vec<Booking> = Vec::new();
        let mut app = app();
        app.focus = Field::Department;
        for ch in "ห้องประชุมใหญ่".chars() {
            app.apply(Action::Char(ch), &mut sink);
        }
        assert_eq!(grapheme_len(&app.form.draft().department), 8);
        app.apply(Action::Backspace, &mut sink);
        assert_eq!(grapheme_len(&app.form.draft().department), 7);

        app.focus = Field::Attendees;
        run(&mut app, &mut sink, &[Action::Char('1'), Action::Char('2'), Action::Char('\n')]);
        assert_eq!(app.form.draft().attendees, "12");
    }

    #[test]
    fn start_and_end_are_independent() {
        let mut sink: Vec<Booking> = Vec::new();
        let mut app = app();
        app.focus = Field::StartTime;
        run(&mut app, &mut sink, &[Action::Step(-1)]);
        app.focus = Field::EndTime;
        run(&mut app, &mut sink, &[Action::Step(1)]);
        assert_eq!(app.value_text(Field::StartTime), "17:30");
        assert_eq!(app.value_text(Field::EndTime), "08:00");
    }

    #[test]
    fn failed_submit_moves_focus_to_culprit() {
        let mut sink: Vec<Booking> = Vec::new();
        let mut app = app();
        app.focus = Field::EndTime;
        run(&mut app, &mut sink, &[Action::Submit]);
        assert_eq!(app.focus, Field::Room);
        assert_eq!(app.form.error_message().as_deref(), Some("please fill in every field"));
    }

    #[test]
    fn quit_is_reported() {
        let mut sink: Vec<Booking> = Vec::new();
        let mut app = app();
        assert_eq!(app.apply(Action::Quit, &mut sink), Flow::Quit);
    }

    #[test]
    fn cycle_handles_unset_and_wrap() {
        let opts = [1, 2, 3];
        assert_eq!(cycle(&opts, None, 1), Some(&1));
        assert_eq!(cycle(&opts, None, -1), Some(&3));
        assert_eq!(cycle(&opts, Some(&3), 1), Some(&1));
        assert_eq!(cycle(&opts, Some(&1), -7), Some(&3));
        assert_eq!(cycle::<i32>(&[], None, 1), None);
    }
}
