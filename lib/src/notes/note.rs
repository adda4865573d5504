use crate::notes::note_headers::NoteHeaders;

/// A single note, as one header-plus-body message.
///
/// `uid` is the message's identifier inside the remote folder. It is only
/// present for notes that already exist server-side; every edit produces a
/// new message and with it a new uid. The durable identity of a note lives
/// in its `X-Universally-Unique-Identifier` header instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub uid: Option<u32>,
    pub headers: NoteHeaders,
    pub body: String,
}

impl Note {
    /// Splits a raw message into its header fields and body.
    ///
    /// This never fails: headers that cannot be parsed are simply absent,
    /// and input without a header block becomes a note that is all body.
    /// The body is taken verbatim from the byte offset where the header
    /// block ends, so no re-encoding ever happens to it.
    pub fn parse(uid: Option<u32>, raw: &[u8]) -> Note {
        match mailparse::parse_headers(raw) {
            Ok((headers, body_offset)) => Note {
                uid,
                headers: headers
                    .into_iter()
                    .filter_map(|h| match (h.get_key(), h.get_value()) {
                        (Ok(key), Ok(value)) => Some((key, value)),
                        _ => None,
                    })
                    .collect(),
                body: String::from_utf8_lossy(&raw[body_offset..]).into_owned(),
            },
            Err(_) => Note {
                uid,
                headers: Vec::new(),
                body: String::from_utf8_lossy(raw).into_owned(),
            },
        }
    }

    /// Builds a note from an already-fetched header list, with no body.
    /// Used for folder listings where only the envelope was requested.
    pub fn with_headers(uid: Option<u32>, headers: NoteHeaders) -> Note {
        Note {
            uid,
            headers,
            body: String::new(),
        }
    }

    /// Renders the note into the wire message format: one `Name: value`
    /// line per header, a blank line, then the body byte-for-byte.
    pub fn to_message(&self) -> String {
        let mut message = String::new();
        for (key, value) in &self.headers {
            message.push_str(key);
            message.push_str(": ");
            message.push_str(value);
            message.push_str("\r\n");
        }
        message.push_str("\r\n");
        message.push_str(&self.body);
        message
    }
}
