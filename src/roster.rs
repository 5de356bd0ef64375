use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Classification assigned to imported teachers when the source file has no
/// `Type` column.
pub const DEFAULT_TEACHER_KIND: &str = "Full-time";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    /// Employment classification, e.g. "Full-time" or "Part-time".
    #[serde(default = "default_teacher_kind")]
    pub kind: String,
}

fn default_teacher_kind() -> String {
    DEFAULT_TEACHER_KIND.to_string()
}

impl Teacher {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    /// Physical location grouping rooms; travel buffers apply across campuses.
    pub campus: String,
}

impl Room {
    pub fn new(id: impl Into<String>, name: impl Into<String>, campus: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            campus: campus.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    UnknownTeacher(String),
    UnknownRoom(String),
    AmbiguousTeacher(String),
    AmbiguousRoom(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::UnknownTeacher(id) => write!(f, "unknown teacher '{id}'"),
            LookupError::UnknownRoom(id) => write!(f, "unknown room '{id}'"),
            LookupError::AmbiguousTeacher(id) => {
                write!(f, "teacher id '{id}' matches more than one entry")
            }
            LookupError::AmbiguousRoom(id) => {
                write!(f, "room id '{id}' matches more than one entry")
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// Index entry: a key either points at exactly one row or is ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexEntry {
    Unique(usize),
    Ambiguous,
}

#[derive(Debug, Clone, Default)]
struct EntityIndex {
    by_id: HashMap<String, IndexEntry>,
    by_name: HashMap<String, IndexEntry>,
}

impl EntityIndex {
    fn build<'a, I>(entries: I) -> Self
    where
        I: Iterator<Item = (&'a str, &'a str)>,
    {
        let mut index = Self::default();
        for (row, (id, name)) in entries.enumerate() {
            Self::insert(&mut index.by_id, id, row);
            Self::insert(&mut index.by_name, name, row);
        }
        index
    }

    fn insert(map: &mut HashMap<String, IndexEntry>, key: &str, row: usize) {
        map.entry(key.to_string())
            .and_modify(|entry| *entry = IndexEntry::Ambiguous)
            .or_insert(IndexEntry::Unique(row));
    }

    fn get(&self, id: &str) -> Option<IndexEntry> {
        self.by_id.get(id).copied()
    }

    fn get_by_name(&self, name: &str) -> Option<IndexEntry> {
        self.by_name.get(name).copied()
    }
}

/// Registry of teachers and rooms with a bidirectional lookup index.
///
/// The index is rebuilt once per bulk replace rather than recomputed per
/// lookup. Lookups that match zero or more than one entry fail with
/// [`LookupError`]; the registry never defaults to an arbitrary match.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    teachers: Vec<Teacher>,
    rooms: Vec<Room>,
    teacher_index: EntityIndex,
    room_index: EntityIndex,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(teachers: Vec<Teacher>, rooms: Vec<Room>) -> Self {
        let mut roster = Self::new();
        roster.set_teachers(teachers);
        roster.set_rooms(rooms);
        roster
    }

    /// Replace the full teacher list, rebuilding its index.
    pub fn set_teachers(&mut self, teachers: Vec<Teacher>) {
        self.teacher_index = EntityIndex::build(
            teachers
                .iter()
                .map(|t| (t.id.as_str(), t.name.as_str())),
        );
        self.teachers = teachers;
    }

    /// Replace the full room list, rebuilding its index.
    pub fn set_rooms(&mut self, rooms: Vec<Room>) {
        self.room_index =
            EntityIndex::build(rooms.iter().map(|r| (r.id.as_str(), r.name.as_str())));
        self.rooms = rooms;
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty() && self.rooms.is_empty()
    }

    pub fn teacher_by_id(&self, id: &str) -> Result<&Teacher, LookupError> {
        match self.teacher_index.get(id) {
            Some(IndexEntry::Unique(row)) => Ok(&self.teachers[row]),
            Some(IndexEntry::Ambiguous) => Err(LookupError::AmbiguousTeacher(id.to_string())),
            None => Err(LookupError::UnknownTeacher(id.to_string())),
        }
    }

    pub fn room_by_id(&self, id: &str) -> Result<&Room, LookupError> {
        match self.room_index.get(id) {
            Some(IndexEntry::Unique(row)) => Ok(&self.rooms[row]),
            Some(IndexEntry::Ambiguous) => Err(LookupError::AmbiguousRoom(id.to_string())),
            None => Err(LookupError::UnknownRoom(id.to_string())),
        }
    }

    /// Resolve a teacher display name to its id. Returns `None` for unknown
    /// or ambiguous names; callers on the bulk-replace path drop such rows.
    pub fn teacher_id_by_name(&self, name: &str) -> Option<&str> {
        match self.teacher_index.get_by_name(name) {
            Some(IndexEntry::Unique(row)) => Some(self.teachers[row].id.as_str()),
            _ => None,
        }
    }

    /// Resolve a room display name to its id. Same contract as
    /// [`Roster::teacher_id_by_name`].
    pub fn room_id_by_name(&self, name: &str) -> Option<&str> {
        match self.room_index.get_by_name(name) {
            Some(IndexEntry::Unique(row)) => Some(self.rooms[row].id.as_str()),
            _ => None,
        }
    }
}
