#[cfg(test)]
mod it_flow {
    use crate::app::{App, Flow};
    use crate::error::Field;
    use crate::form::{Booking, Phase};
    use crate::input::{map_key, Action};
    use crate::ui;
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn press(app: &mut App, sink: &mut Vec<Booking>, code: KeyCode) -> Flow {
        match map_key(KeyEvent::new(code, KeyModifiers::NONE), app.form.is_confirming()) {
            Some(action) => app.apply(action, sink),
            None => Flow::Continue,
        }
    }

    fn type_text(app: &mut App, sink: &mut Vec<Booking>, text: &str) {
        for ch in text.chars() {
            press(app, sink, KeyCode::Char(ch));
        }
    }

    /// Room 1, today, IT, 10 people, 09:00-10:00 entered through the keyboard.
    fn fill_valid(app: &mut App, sink: &mut Vec<Booking>) {
        press(app, sink, KeyCode::Right); // room 1
        press(app, sink, KeyCode::Tab); // date stays today
        press(app, sink, KeyCode::Tab);
        type_text(app, sink, "IT");
        press(app, sink, KeyCode::Tab);
        type_text(app, sink, "10");
        press(app, sink, KeyCode::Tab);
        for _ in 0..3 {
            press(app, sink, KeyCode::Right); // 08:00 -> 09:00
        }
        press(app, sink, KeyCode::Tab);
        for _ in 0..5 {
            press(app, sink, KeyCode::Right); // 08:00 -> 10:00
        }
    }

    fn screen(app: &App) -> String {
        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui::draw(f, app)).unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn book_cancel_then_confirm() {
        let mut sink: Vec<Booking> = Vec::new();
        let mut app = App::new(today(), "%d/%m/%Y", 64);
        fill_valid(&mut app, &mut sink);

        press(&mut app, &mut sink, KeyCode::Enter);
        assert!(app.form.error().is_none());
        let pending = app.form.pending().cloned().expect("dialog open");
        assert_eq!(pending.room.name, "ห้องประชุม 1");
        assert_eq!(pending.date, today());
        assert_eq!(pending.department, "IT");
        assert_eq!(pending.attendees, 10);
        assert_eq!(pending.start.to_string(), "09:00");
        assert_eq!(pending.end.to_string(), "10:00");

        // keys that would edit the draft are ignored while the dialog is up
        press(&mut app, &mut sink, KeyCode::Tab);
        assert_eq!(app.form.pending(), Some(&pending));

        let before = app.form.draft().clone();
        press(&mut app, &mut sink, KeyCode::Esc);
        assert_eq!(app.form.phase(), &Phase::Editing);
        assert_eq!(app.form.draft(), &before);
        assert!(sink.is_empty());

        press(&mut app, &mut sink, KeyCode::Enter);
        press(&mut app, &mut sink, KeyCode::Enter);
        assert_eq!(sink, vec![pending]);
        assert_eq!(app.form.phase(), &Phase::Editing);
        assert!(app.form.draft().room.is_none());
        assert!(app.form.draft().department.is_empty());
        assert_eq!(app.form.draft().date, Some(today()));
        assert_eq!(
            app.notice.as_deref(),
            Some("Booked ห้องประชุม 1 on 01/07/2024, 09:00 - 10:00")
        );
        assert_eq!(app.focus, Field::Room);
    }

    #[test]
    fn capacity_error_is_shown_and_focused() {
        let mut sink: Vec<Booking> = Vec::new();
        let mut app = App::new(today(), "%d/%m/%Y", 64);
        fill_valid(&mut app, &mut sink);
        app.focus = Field::Room;
        for _ in 0..4 {
            press(&mut app, &mut sink, KeyCode::Right); // room 5, 50 seats
        }
        app.focus = Field::Attendees;
        press(&mut app, &mut sink, KeyCode::Backspace);
        press(&mut app, &mut sink, KeyCode::Backspace);
        type_text(&mut app, &mut sink, "51");
        app.focus = Field::Room;

        press(&mut app, &mut sink, KeyCode::Enter);
        assert_eq!(app.focus, Field::Attendees);
        assert!(!app.form.is_confirming());
        assert!(screen(&app).contains("attendee count exceeds room capacity (50 people)"));

        press(&mut app, &mut sink, KeyCode::Backspace);
        type_text(&mut app, &mut sink, "0");
        press(&mut app, &mut sink, KeyCode::Enter);
        assert!(app.form.is_confirming());
        assert!(app.form.error().is_none());
    }

    #[test]
    fn dialog_renders_summary() {
        let mut sink: Vec<Booking> = Vec::new();
        let mut app = App::new(today(), "%Y-%m-%d", 64);
        fill_valid(&mut app, &mut sink);
        press(&mut app, &mut sink, KeyCode::Enter);

        let text = screen(&app);
        assert!(text.contains("confirm booking"));
        assert!(text.contains("09:00 - 10:00 (60 min)"));
        assert!(text.contains("2024-07-01"));
        assert!(text.contains("enter/y confirm"));
    }

    #[test]
    fn editing_screen_lists_fields() {
        let app = App::new(today(), "%d/%m/%Y", 64);
        let text = screen(&app);
        for field in Field::ALL {
            assert!(text.contains(field.label()), "missing {field}");
        }
        assert!(text.contains("01/07/2024"));
    }

    #[test]
    fn escape_quits_while_editing() {
        let mut sink: Vec<Booking> = Vec::new();
        let mut app = App::new(today(), "%d/%m/%Y", 64);
        assert_eq!(press(&mut app, &mut sink, KeyCode::Esc), Flow::Quit);
        assert_eq!(app.apply(Action::Quit, &mut sink), Flow::Quit);
    }
}
