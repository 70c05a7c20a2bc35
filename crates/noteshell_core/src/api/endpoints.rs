//! Endpoint paths relative to the API base (`.../api/v1`).

use crate::model::note::NoteId;

pub const LOGIN: &str = "/auth/login/";
pub const REGISTER: &str = "/auth/register/";
pub const REFRESH: &str = "/auth/refresh/";
pub const NOTES: &str = "/notes/";
pub const NOTES_ANALYTICS: &str = "/notes/analytics/";

pub fn note(id: NoteId) -> String {
    format!("/notes/{id}/")
}
