use crate::notes::note::Note;
use crate::notes::note_headers::NoteHeaders;
use crate::notes::traits::header_parser::HeaderParser;
use crate::profile::Profile;
use crate::util;

/// Marker that distinguishes a note from ordinary mail in the folder.
pub const NOTE_TYPE: &str = "com.apple.mail-note";
pub const CONTENT_TYPE: &str = "text/html; charset=utf-8";
pub const MIME_VERSION: &str = "1.0";
/// Subject a note falls back to when the edited draft has none.
pub const DEFAULT_SUBJECT: &str = "Note";

/// Produces the final note to persist from an edited draft and, for edits,
/// the note the draft originated from.
///
/// Content-facing fields (`Subject`, body) always come from the latest
/// edit. Identity-facing fields are copied forward from the prior revision
/// when present and non-empty, and generated otherwise; that single rule is
/// what keeps `X-Universally-Unique-Identifier` and `X-Mail-Created-Date`
/// stable across any number of edits. `Date` and `Message-Id` are fresh on
/// every write.
pub fn merge_note(draft: &Note, prior: Option<&Note>, profile: &Profile) -> Note {
    let date = util::rfc2822_now();

    let subject = draft
        .headers
        .subject()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

    let uniform_type_identifier =
        keep_or_else(prior, |h| h.uniform_type_identifier(), || NOTE_TYPE.to_string());
    let created_date = keep_or_else(prior, |h| h.created_date(), || date.clone());
    let uuid = keep_or_else(prior, |h| h.uuid(), util::generate_uuid);
    let message_id = format!("<{}@{}>", util::generate_uuid(), profile.domain());

    let headers: NoteHeaders = vec![
        ("X-Uniform-Type-Identifier".to_string(), uniform_type_identifier),
        ("Content-Type".to_string(), CONTENT_TYPE.to_string()),
        ("Mime-Version".to_string(), MIME_VERSION.to_string()),
        ("Date".to_string(), date),
        ("X-Mail-Created-Date".to_string(), created_date),
        ("From".to_string(), profile.username.clone()),
        ("To".to_string(), profile.username.clone()),
        ("Message-Id".to_string(), message_id),
        ("X-Universally-Unique-Identifier".to_string(), uuid),
        ("Subject".to_string(), subject),
    ];

    Note {
        uid: None,
        headers,
        body: draft.body.clone(),
    }
}

/// The uniform "use prior value if present and non-empty, else default"
/// rule from the merge algorithm.
fn keep_or_else<G, D>(prior: Option<&Note>, get: G, default: D) -> String
where
    G: Fn(&NoteHeaders) -> Option<String>,
    D: FnOnce() -> String,
{
    prior
        .and_then(|note| get(&note.headers))
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(default)
}
