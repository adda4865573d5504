pub mod builder;
pub mod edit;
pub mod error;
pub mod mailbox;
pub mod merge;
pub mod notes;
pub mod profile;
pub mod sync;
pub mod util;

use crate::error::NoteError;
use crate::mailbox::{ImapMailService, MailService};
use crate::notes::note::Note;
use crate::profile::Profile;

/// One authenticated connection to the notes folder plus the profile that
/// produced it. Every workflow is a method here; each call is a strictly
/// sequential fetch/edit/append round and owns the connection for its
/// duration.
pub struct ImapNotes {
    profile: Profile,
    session: Box<dyn MailService>,
}

impl ImapNotes {
    /// Connects to the server named in the profile and selects the notes
    /// folder.
    pub fn connect(profile: Profile) -> Result<ImapNotes, NoteError> {
        let session = ImapMailService::connect(&profile)?;
        Ok(ImapNotes::new(profile, Box::new(session)))
    }

    pub fn new(profile: Profile, session: Box<dyn MailService>) -> ImapNotes {
        ImapNotes { profile, session }
    }

    /// Header envelopes of every note in the folder, for listing.
    pub fn list_notes(&mut self) -> Result<Vec<Note>, NoteError> {
        let mut notes = self.session.fetch_note_headers()?;
        notes.sort_by_key(|note| note.uid);
        Ok(notes)
    }

    /// The full note behind a folder uid.
    pub fn show_note(&mut self, uid: u32) -> Result<Note, NoteError> {
        self.session.fetch_note(uid)
    }

    /// Creates a note through the external editor.
    pub fn add_note(&mut self) -> Result<Note, NoteError> {
        sync::add_note(self.session.as_mut(), &self.profile)
    }

    /// Edits the note behind a folder uid through the external editor and
    /// retires the old revision.
    pub fn edit_note(&mut self, uid: u32) -> Result<Note, NoteError> {
        sync::edit_note(self.session.as_mut(), uid, &self.profile)
    }
}
