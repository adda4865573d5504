use std::io::Write;
use std::path::Path;

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error::NoteError;
use crate::error::NoteError::{EmptyEdit, StagingError};
use crate::notes::note::Note;
use crate::notes::traits::header_parser::HeaderParser;

/// Writes the note's editable fields into a transient file the external
/// editor can work on: the subject header, a blank line, the body.
///
/// The returned handle owns the file; dropping it removes the file again,
/// whatever happened in between.
pub fn stage(note: &Note) -> Result<NamedTempFile, NoteError> {
    let mut file = NamedTempFile::new().map_err(|e| StagingError(e.to_string()))?;
    let subject = note
        .headers
        .subject()
        .unwrap_or_else(|| crate::merge::DEFAULT_SUBJECT.to_string());
    write!(file, "Subject: {}\n\n{}", subject, note.body)
        .and_then(|_| file.flush())
        .map_err(|e| StagingError(e.to_string()))?;
    debug!("Staged note to {}", file.path().to_string_lossy());
    Ok(file)
}

/// Runs the configured editor against the staged file and blocks until it
/// exits. The exit status is deliberately not inspected: arbitrary editor
/// programs report all kinds of statuses, and the workflow judges the edit
/// by the content that comes back.
pub fn invoke(path: &Path, editor: &str, editor_arguments: &[String]) -> Result<(), NoteError> {
    info!("Opening note with {}", editor);
    subprocess::Exec::cmd(editor)
        .args(editor_arguments)
        .arg(path)
        .join()
        .map(|_| ())
        .map_err(|e| StagingError(format!("could not run editor \"{}\": {}", editor, e)))
}

/// Reads back whatever the editor left in the staged file.
pub fn recover(path: &Path) -> Result<String, NoteError> {
    std::fs::read_to_string(path).map_err(|e| StagingError(e.to_string()))
}

/// An edit whose content trims down to nothing means the operator bailed
/// out; nothing may be written remotely after this fails.
pub fn validate_non_empty(edited: &str) -> Result<(), NoteError> {
    if edited.trim().is_empty() {
        Err(EmptyEdit)
    } else {
        Ok(())
    }
}

/// The full round trip: stage, hand off to the editor, recover and parse
/// the result. The staged file is removed on every path out of here.
pub fn edit_note_externally(
    note: &Note,
    editor: &str,
    editor_arguments: &[String],
) -> Result<Note, NoteError> {
    let staged = stage(note)?;
    invoke(staged.path(), editor, editor_arguments)?;
    let edited = recover(staged.path())?;
    validate_non_empty(&edited)?;

    let draft = Note::parse(None, edited.as_bytes());
    // a draft that is all headers carries no content either
    if draft.body.trim().is_empty() {
        return Err(EmptyEdit);
    }
    Ok(draft)
}
