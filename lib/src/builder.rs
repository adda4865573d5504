use crate::merge::{CONTENT_TYPE, MIME_VERSION, NOTE_TYPE};
use crate::notes::note::Note;
use crate::notes::note_headers::NoteHeaders;
use crate::util::{generate_uuid, rfc2822_now};

/// Builder for complete wire header sets, mostly for
/// testing purposes
///
/// If no own uuid or message-id gets provided they get randomly
/// generated
pub struct HeaderBuilder {
    subject: String,
    uuid: String,
    message_id: String,
    date: String,
    created_date: String,
    account: String,
}

impl HeaderBuilder {
    pub fn new() -> HeaderBuilder {
        let date = rfc2822_now();
        HeaderBuilder {
            subject: "Note".to_string(),
            uuid: generate_uuid(),
            message_id: format!("<{}@localhost>", generate_uuid()),
            created_date: date.clone(),
            date,
            account: "notes@localhost".to_string(),
        }
    }

    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = subject.to_string();
        self
    }

    pub fn with_uuid(mut self, uuid: &str) -> Self {
        self.uuid = uuid.to_string();
        self
    }

    pub fn with_message_id(mut self, message_id: &str) -> Self {
        self.message_id = message_id.to_string();
        self
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    pub fn with_created_date(mut self, created_date: &str) -> Self {
        self.created_date = created_date.to_string();
        self
    }

    pub fn build(self) -> NoteHeaders {
        vec![
            ("X-Uniform-Type-Identifier".to_string(), NOTE_TYPE.to_string()),
            ("Content-Type".to_string(), CONTENT_TYPE.to_string()),
            ("Mime-Version".to_string(), MIME_VERSION.to_string()),
            ("Date".to_string(), self.date),
            ("X-Mail-Created-Date".to_string(), self.created_date),
            ("From".to_string(), self.account.clone()),
            ("To".to_string(), self.account),
            ("Message-Id".to_string(), self.message_id),
            ("X-Universally-Unique-Identifier".to_string(), self.uuid),
            ("Subject".to_string(), self.subject),
        ]
    }
}

pub struct NoteBuilder {
    headers: HeaderBuilder,
    uid: Option<u32>,
    body: String,
}

impl NoteBuilder {
    pub fn new() -> NoteBuilder {
        NoteBuilder {
            headers: HeaderBuilder::new(),
            uid: None,
            body: String::new(),
        }
    }

    pub fn with_uid(mut self, uid: u32) -> Self {
        self.uid = Some(uid);
        self
    }

    pub fn with_subject(mut self, subject: &str) -> Self {
        self.headers = self.headers.with_subject(subject);
        self
    }

    pub fn with_uuid(mut self, uuid: &str) -> Self {
        self.headers = self.headers.with_uuid(uuid);
        self
    }

    pub fn with_created_date(mut self, created_date: &str) -> Self {
        self.headers = self.headers.with_created_date(created_date);
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn build(self) -> Note {
        Note {
            uid: self.uid,
            headers: self.headers.build(),
            body: self.body,
        }
    }
}

impl Default for HeaderBuilder {
    fn default() -> Self {
        HeaderBuilder::new()
    }
}

impl Default for NoteBuilder {
    fn default() -> Self {
        NoteBuilder::new()
    }
}
