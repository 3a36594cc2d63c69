// bookable rooms + seating limits

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Room {
    pub name: &'static str,
    pub capacity: u32,
}

impl Room {
    const fn new(name: &'static str, capacity: u32) -> Self {
        Self { name, capacity }
    }

    /// Label used in the room selector, e.g. `ห้องประชุม 5 (up to 50 people)`.
    pub fn label(&self) -> String {
        format!("{} (up to {} people)", self.name, self.capacity)
    }
}

static ROOMS: [Room; 8] = [
    Room::new("ห้องประชุม 1", 100),
    Room::new("ห้องประชุม 2", 100),
    Room::new("ห้องประชุม 3", 100),
    Room::new("ห้องประชุม 4", 100),
    Room::new("ห้องประชุม 5", 50),
    Room::new("ห้องประชุม 6", 50),
    Room::new("ห้องประชุม 7", 50),
    Room::new("ห้องประชุม 8", 50),
];

pub fn rooms() -> &'static [Room] {
    &ROOMS
}

pub fn find(name: &str) -> Option<&'static Room> {
    let name = name.trim();
    ROOMS.iter().find(|r| r.name == name)
}
