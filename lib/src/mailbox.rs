use std::io::{Read, Write};
use std::net::TcpStream;

use imap::Session;
use log::{debug, info, warn};
use native_tls::TlsStream;

use crate::error::NoteError;
use crate::error::NoteError::{ConnectionError, NotFoundError, WriteError};
use crate::notes::note::Note;
use crate::notes::traits::header_parser::HeaderParser;
use crate::profile::Profile;

#[cfg(test)]
use mockall::automock;

/// The four protocol verbs the workflows need from an authenticated,
/// folder-selected connection. Everything blocks the caller; nothing is
/// retried here, failures go straight back to the orchestrator.
#[cfg_attr(test, automock)]
pub trait MailService {
    /// Loads the full message behind a folder uid.
    fn fetch_note(&mut self, uid: u32) -> Result<Note, NoteError>;
    /// Loads the header envelopes of every message in the folder.
    fn fetch_note_headers(&mut self) -> Result<Vec<Note>, NoteError>;
    /// Writes a new message and returns the uid it was stored under.
    fn append_note(&mut self, note: &Note) -> Result<u32, NoteError>;
    /// Marks a superseded revision for removal.
    fn set_deleted_flag(&mut self, uid: u32) -> Result<(), NoteError>;
}

/// `MailService` over a real IMAP session.
pub struct ImapMailService<S: Read + Write> {
    session: Session<S>,
    folder: String,
}

impl ImapMailService<TlsStream<TcpStream>> {
    /// Logs in and selects the notes folder. A service that exists is
    /// always ready for the fetch/append/store verbs.
    pub fn connect(profile: &Profile) -> Result<Self, NoteError> {
        let domain = profile.imap_server.as_str();
        let password = profile
            .password
            .as_ref()
            .ok_or_else(|| ConnectionError("no password provided".to_string()))?;

        info!("Connecting to {}:{}", domain, profile.port);
        let tls = native_tls::TlsConnector::builder()
            .build()
            .map_err(|e| ConnectionError(e.to_string()))?;

        // we pass in the domain twice to check that the server's TLS
        // certificate is valid for the domain we're connecting to.
        let client = imap::connect((domain, profile.port), domain, &tls)
            .map_err(|e| ConnectionError(e.to_string()))?;

        let mut session = client
            .login(&profile.username, password)
            .map_err(|e| ConnectionError(e.0.to_string()))?;

        session
            .select(&profile.folder)
            .map_err(|e| ConnectionError(format!("could not select folder {}: {}", profile.folder, e)))?;

        Ok(ImapMailService {
            session,
            folder: profile.folder.clone(),
        })
    }
}

impl<S: Read + Write> MailService for ImapMailService<S> {
    fn fetch_note(&mut self, uid: u32) -> Result<Note, NoteError> {
        let messages = self
            .session
            .uid_fetch(uid.to_string(), "(RFC822 UID)")
            .map_err(|e| NotFoundError(format!("uid {}: {}", uid, e)))?;

        match messages.iter().next().and_then(|fetch| fetch.body()) {
            Some(raw) => {
                debug!("Fetched message with uid {}", uid);
                Ok(Note::parse(Some(uid), raw))
            }
            None => Err(NotFoundError(format!(
                "no message with uid {} in folder {}",
                uid, self.folder
            ))),
        }
    }

    fn fetch_note_headers(&mut self) -> Result<Vec<Note>, NoteError> {
        match self.session.fetch("1:*", "(RFC822.HEADER UID)") {
            Ok(messages) => Ok(messages
                .iter()
                .filter_map(|fetch| {
                    fetch.header().map(|raw| {
                        let parsed = Note::parse(fetch.uid, raw);
                        Note::with_headers(parsed.uid, parsed.headers)
                    })
                })
                .collect()),
            Err(error) => {
                // an empty folder answers "1:*" with an error on some servers
                warn!(
                    "Could not load notes from {}! Does this folder contain any messages? {}",
                    self.folder, error
                );
                Ok(Vec::new())
            }
        }
    }

    fn append_note(&mut self, note: &Note) -> Result<u32, NoteError> {
        let message_id = note
            .headers
            .message_id()
            .ok_or_else(|| WriteError("note has no Message-Id header".to_string()))?;

        self.session
            .append(&self.folder, note.to_message().as_bytes())
            .map_err(|e| WriteError(e.to_string()))?;

        // the append response carries no uid; find the stored message again
        // through its fresh Message-Id and mark it seen so mail clients do
        // not announce the note as new mail
        let uid = self
            .session
            .uid_search(format!("HEADER Message-ID {}", message_id))
            .map_err(|e| WriteError(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| WriteError("appended message not found in folder".to_string()))?;

        self.session
            .uid_store(format!("{}", uid), "+FLAGS.SILENT (\\Seen)".to_string())
            .map_err(|e| WriteError(e.to_string()))?;

        debug!("Appended note as uid {}", uid);
        Ok(uid)
    }

    fn set_deleted_flag(&mut self, uid: u32) -> Result<(), NoteError> {
        self.session
            .uid_store(
                format!("{}", uid),
                "+FLAGS.SILENT (\\Seen \\Deleted)".to_string(),
            )
            .map(|_| ())
            .map_err(|e| WriteError(format!("could not retire uid {}: {}", uid, e)))
    }
}
