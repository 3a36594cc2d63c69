// draft state, submit-time validation, editing/confirming state machine

use crate::catalog::Room;
use crate::error::{Field, TimeRangeError, ValidationError};
use crate::sink::BookingSink;
use crate::slot::TimeOfDay;
use crate::util::clean_text;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

/// In-progress input. Nothing is checked until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub room: Option<&'static Room>,
    pub date: Option<NaiveDate>,
    pub department: String,
    pub attendees: String,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
}

impl BookingDraft {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            room: None,
            date,
            department: String::new(),
            attendees: String::new(),
            start: None,
            end: None,
        }
    }

    fn is_filled(&self, field: Field) -> bool {
        match field {
            Field::Room => self.room.is_some(),
            Field::Date => self.date.is_some(),
            Field::Department => !self.department.trim().is_empty(),
            Field::Attendees => !self.attendees.trim().is_empty(),
            Field::StartTime => self.start.is_some(),
            Field::EndTime => self.end.is_some(),
        }
    }
}

/// A draft that passed validation. Owned copy, so later edits to the draft
/// never leak into what the user is confirming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub room: &'static Room,
    pub date: NaiveDate,
    pub department: String,
    pub attendees: u32,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

pub fn validate(draft: &BookingDraft) -> Result<Booking, ValidationError> {
    if let Some(missing) = Field::ALL.into_iter().find(|f| !draft.is_filled(*f)) {
        return Err(ValidationError::MissingField(missing));
    }
    let room = draft.room.ok_or(ValidationError::MissingField(Field::Room))?;
    let date = draft.date.ok_or(ValidationError::MissingField(Field::Date))?;
    let attendees = parse_attendees(&draft.attendees)?;
    if attendees > i64::from(room.capacity) {
        return Err(ValidationError::CapacityExceeded {
            capacity: room.capacity,
        });
    }
    let (start, end) = check_time_range(draft.start, draft.end)?;
    Ok(Booking {
        room,
        date,
        department: clean_text(&draft.department),
        attendees: u32::try_from(attendees).map_err(|_| ValidationError::InvalidAttendeeCount)?,
        start,
        end,
    })
}

/// Whole positive numbers only: `"1.5"` and `"10abc"` are rejected, not
/// truncated. Digit strings too long for `i64` saturate so they still fail
/// the capacity check rather than this one.
pub fn parse_attendees(raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(ValidationError::InvalidAttendeeCount),
        Err(_) => {
            let digits = raw.strip_prefix('+').unwrap_or(raw);
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                Ok(i64::MAX)
            } else {
                Err(ValidationError::InvalidAttendeeCount)
            }
        }
    }
}

pub fn check_time_range(
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
) -> Result<(TimeOfDay, TimeOfDay), TimeRangeError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(TimeRangeError::Missing);
    };
    if start >= end {
        return Err(TimeRangeError::NotIncreasing);
    }
    Ok((start, end))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Confirming(Booking),
}

#[derive(Debug, Clone)]
pub struct BookingForm {
    draft: BookingDraft,
    phase: Phase,
    error: Option<ValidationError>,
    default_date: Option<NaiveDate>,
    default_room: Option<&'static Room>,
}

impl BookingForm {
    /// `default_date` is what the date field starts at (and returns to on reset).
    pub fn new(default_date: Option<NaiveDate>) -> Self {
        Self {
            draft: BookingDraft::new(default_date),
            phase: Phase::Editing,
            error: None,
            default_date,
            default_room: None,
        }
    }

    /// Preselect `room` now and after every reset.
    pub fn with_default_room(mut self, room: Option<&'static Room>) -> Self {
        self.default_room = room;
        self.draft.room = room;
        self
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn pending(&self) -> Option<&Booking> {
        match &self.phase {
            Phase::Confirming(b) => Some(b),
            Phase::Editing => None,
        }
    }

    pub fn is_confirming(&self) -> bool {
        self.pending().is_some()
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn set_room(&mut self, room: Option<&'static Room>) {
        self.draft.room = room;
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.draft.date = date;
    }

    pub fn set_department(&mut self, department: impl Into<String>) {
        self.draft.department = department.into();
    }

    pub fn set_attendees(&mut self, attendees: impl Into<String>) {
        self.draft.attendees = attendees.into();
    }

    pub fn set_start(&mut self, start: Option<TimeOfDay>) {
        self.draft.start = start;
    }

    pub fn set_end(&mut self, end: Option<TimeOfDay>) {
        self.draft.end = end;
    }

    /// Validate the draft and open the confirmation step. While already
    /// confirming, the pending booking is kept as is.
    pub fn submit(&mut self) -> Result<Booking, ValidationError> {
        if let Phase::Confirming(pending) = &self.phase {
            return Ok(pending.clone());
        }
        self.error = None;
        match validate(&self.draft) {
            Ok(booking) => {
                debug!(room = booking.room.name, "draft validated");
                self.phase = Phase::Confirming(booking.clone());
                Ok(booking)
            }
            Err(e) => {
                debug!(error = %e, field = %e.field(), "draft rejected");
                self.error = Some(e);
                Err(e)
            }
        }
    }

    /// Leave the confirmation step; the draft stays as it was.
    pub fn cancel(&mut self) -> bool {
        let was_confirming = self.is_confirming();
        self.phase = Phase::Editing;
        was_confirming
    }

    /// Hand the pending booking to `sink` once, then start a fresh draft.
    pub fn confirm(&mut self, sink: &mut dyn BookingSink) -> Option<Booking> {
        let Phase::Confirming(booking) = std::mem::replace(&mut self.phase, Phase::Editing) else {
            return None;
        };
        info!(
            room = booking.room.name,
            date = %booking.date,
            start = %booking.start,
            end = %booking.end,
            "booking confirmed"
        );
        sink.submit(booking.clone());
        self.reset();
        Some(booking)
    }

    pub fn reset(&mut self) {
        self.draft = BookingDraft::new(self.default_date);
        self.draft.room = self.default_room;
        self.error = None;
    }
}
