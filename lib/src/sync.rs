use log::info;

use crate::edit;
use crate::error::NoteError;
use crate::mailbox::MailService;
use crate::merge;
use crate::merge::DEFAULT_SUBJECT;
use crate::notes::note::Note;
use crate::notes::traits::header_parser::HeaderParser;
use crate::profile::Profile;

/// Creates a new note: stage an empty stub, let the operator fill it in,
/// merge and append. Nothing touches the server before the append.
pub fn add_note(session: &mut dyn MailService, profile: &Profile) -> Result<Note, NoteError> {
    let stub = Note {
        uid: None,
        headers: vec![("Subject".to_string(), DEFAULT_SUBJECT.to_string())],
        body: String::new(),
    };

    let draft = edit::edit_note_externally(&stub, &profile.editor, &profile.editor_arguments)?;
    let merged = merge::merge_note(&draft, None, profile);

    let uid = session.append_note(&merged)?;
    info!(
        "Created note \"{}\" as uid {}",
        merged.headers.subject().unwrap_or_default(),
        uid
    );

    Ok(Note {
        uid: Some(uid),
        ..merged
    })
}

/// Edits an existing note: fetch it, hand it to the operator, merge the
/// result against it, append the new revision, then retire the old one.
///
/// The prior message is flagged for removal strictly after the new
/// revision has been appended; any failure up to that point leaves the
/// folder exactly as it was.
pub fn edit_note(
    session: &mut dyn MailService,
    uid: u32,
    profile: &Profile,
) -> Result<Note, NoteError> {
    let prior = session.fetch_note(uid)?;

    let draft = edit::edit_note_externally(&prior, &profile.editor, &profile.editor_arguments)?;
    let merged = merge::merge_note(&draft, Some(&prior), profile);

    let new_uid = session.append_note(&merged)?;
    info!("Appended new revision of {} as uid {}", uid, new_uid);

    if let Err(e) = session.set_deleted_flag(uid) {
        // the new revision is already durable; the note exists twice until
        // the retirement is retried
        return Err(NoteError::WriteError(format!(
            "new revision was appended as uid {} but uid {} could not be retired: {}",
            new_uid, uid, e
        )));
    }

    Ok(Note {
        uid: Some(new_uid),
        ..merged
    })
}

#[cfg(all(test, target_family = "unix"))]
mod tests {
    use super::*;
    use crate::builder::NoteBuilder;
    use crate::mailbox::MockMailService;
    use crate::notes::traits::header_parser::HeaderParser;
    use crate::profile::parse_profile;
    use mockall::predicate::eq;
    use mockall::Sequence;

    /// An "editor" that exits 0 and leaves the staged content untouched.
    fn keep_content_profile() -> Profile {
        profile_with_editor("true", &[])
    }

    /// An "editor" that replaces the staged content with the given text.
    fn rewrite_profile(content: &str) -> Profile {
        let script = format!("printf '%s' '{}' > \"$0\"", content);
        profile_with_editor("sh", &["-c".to_string(), script])
    }

    /// An "editor" that leaves an empty file behind.
    fn empty_out_profile() -> Profile {
        profile_with_editor("truncate", &["-s".to_string(), "0".to_string()])
    }

    fn profile_with_editor(editor: &str, args: &[String]) -> Profile {
        let mut profile = parse_profile(
            "
            username=tester@example.org
            imap_server=imap.example.org
            editor=placeholder
            ",
        )
        .unwrap();
        profile.editor = editor.to_string();
        profile.editor_arguments = args.to_vec();
        profile
    }

    /// A new note gets the subject and body the operator typed, plus a
    /// freshly generated identity.
    #[test]
    fn add_appends_the_edited_draft() {
        let profile = rewrite_profile("Subject: Groceries\n\nMilk, eggs");
        let mut session = MockMailService::new();
        session
            .expect_append_note()
            .withf(|note| {
                note.headers.subject() == Some("Groceries".to_string())
                    && note.body == "Milk, eggs"
                    && note.headers.uuid().map(|u| u.len()) == Some(36)
            })
            .times(1)
            .returning(|_| Ok(7));

        let note = add_note(&mut session, &profile).unwrap();

        assert_eq!(note.uid, Some(7));
        assert_eq!(note.headers.created_date(), note.headers.date());
    }

    /// An edit keeps the durable identity of the note it replaces.
    #[test]
    fn edit_preserves_identity_headers() {
        let prior = NoteBuilder::new()
            .with_uid(42)
            .with_uuid("ABCD-1234")
            .with_created_date("Mon, 01 Jan 2024 00:00:00 +0000")
            .with_subject("Groceries")
            .with_body("Milk, eggs")
            .build();

        let profile = keep_content_profile();
        let mut session = MockMailService::new();
        let fetched = prior.clone();
        session
            .expect_fetch_note()
            .with(eq(42))
            .times(1)
            .returning(move |_| Ok(fetched.clone()));
        session
            .expect_append_note()
            .withf(|note| {
                note.headers.uuid() == Some("ABCD-1234".to_string())
                    && note.headers.created_date()
                        == Some("Mon, 01 Jan 2024 00:00:00 +0000".to_string())
                    && note.body == "Milk, eggs"
            })
            .times(1)
            .returning(|_| Ok(99));
        session
            .expect_set_deleted_flag()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(()));

        let note = edit_note(&mut session, 42, &profile).unwrap();

        assert_eq!(note.uid, Some(99));
    }

    /// The old revision may only be retired once the new one has been
    /// durably written.
    #[test]
    fn retire_only_after_successful_append() {
        let prior = NoteBuilder::new().with_uid(42).with_body("content").build();

        let profile = keep_content_profile();
        let mut session = MockMailService::new();
        let mut seq = Sequence::new();
        session
            .expect_fetch_note()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(prior.clone()));
        session
            .expect_append_note()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(99));
        session
            .expect_set_deleted_flag()
            .with(eq(42))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        edit_note(&mut session, 42, &profile).unwrap();
    }

    /// An edit that comes back empty cancels the workflow before any
    /// remote call is made.
    #[test]
    fn empty_edit_makes_no_remote_calls() {
        let profile = empty_out_profile();
        let mut session = MockMailService::new();
        session.expect_append_note().times(0);
        session.expect_set_deleted_flag().times(0);

        let result = add_note(&mut session, &profile);

        assert_eq!(result, Err(NoteError::EmptyEdit));
    }

    /// Same for the edit path: the fetched original stays untouched.
    #[test]
    fn empty_edit_leaves_the_original_alone() {
        let prior = NoteBuilder::new().with_uid(42).with_body("content").build();

        let profile = empty_out_profile();
        let mut session = MockMailService::new();
        session
            .expect_fetch_note()
            .times(1)
            .returning(move |_| Ok(prior.clone()));
        session.expect_append_note().times(0);
        session.expect_set_deleted_flag().times(0);

        let result = edit_note(&mut session, 42, &profile);

        assert_eq!(result, Err(NoteError::EmptyEdit));
    }

    /// A failing append must not retire anything.
    #[test]
    fn append_failure_leaves_original_untouched() {
        let prior = NoteBuilder::new().with_uid(42).with_body("content").build();

        let profile = keep_content_profile();
        let mut session = MockMailService::new();
        session
            .expect_fetch_note()
            .times(1)
            .returning(move |_| Ok(prior.clone()));
        session
            .expect_append_note()
            .times(1)
            .returning(|_| Err(NoteError::WriteError("quota exceeded".to_string())));
        session.expect_set_deleted_flag().times(0);

        let result = edit_note(&mut session, 42, &profile);

        assert!(matches!(result, Err(NoteError::WriteError(_))));
    }

    /// A failing retirement is reported, but the already-appended revision
    /// stays committed; the error names both uids.
    #[test]
    fn retirement_failure_reports_the_duplicate() {
        let prior = NoteBuilder::new().with_uid(42).with_body("content").build();

        let profile = keep_content_profile();
        let mut session = MockMailService::new();
        session
            .expect_fetch_note()
            .times(1)
            .returning(move |_| Ok(prior.clone()));
        session.expect_append_note().times(1).returning(|_| Ok(99));
        session
            .expect_set_deleted_flag()
            .times(1)
            .returning(|_| Err(NoteError::WriteError("stale uid".to_string())));

        let result = edit_note(&mut session, 42, &profile);

        match result {
            Err(NoteError::WriteError(message)) => {
                assert!(message.contains("99"));
                assert!(message.contains("42"));
            }
            other => panic!("expected a write error, got {:?}", other),
        }
    }

    /// A draft without a subject line still becomes a valid note, and an
    /// edit without one still keeps the prior identity.
    #[test]
    fn missing_subject_on_edit_defaults_and_keeps_identity() {
        let prior = NoteBuilder::new()
            .with_uid(42)
            .with_uuid("ABCD-1234")
            .with_created_date("Mon, 01 Jan 2024 00:00:00 +0000")
            .with_body("old")
            .build();

        // no Subject: line at all in the edited file
        let profile = rewrite_profile("only body text, no header block");
        let mut session = MockMailService::new();
        session
            .expect_fetch_note()
            .times(1)
            .returning(move |_| Ok(prior.clone()));
        session
            .expect_append_note()
            .withf(|note| {
                note.headers.subject() == Some("Note".to_string())
                    && note.headers.uuid() == Some("ABCD-1234".to_string())
                    && note.headers.created_date()
                        == Some("Mon, 01 Jan 2024 00:00:00 +0000".to_string())
            })
            .times(1)
            .returning(|_| Ok(43));
        session
            .expect_set_deleted_flag()
            .times(1)
            .returning(|_| Ok(()));

        edit_note(&mut session, 42, &profile).unwrap();
    }

    /// A fetch failure aborts before the editor is ever launched.
    #[test]
    fn unknown_uid_aborts_the_edit() {
        let profile = keep_content_profile();
        let mut session = MockMailService::new();
        session
            .expect_fetch_note()
            .times(1)
            .returning(|uid| Err(NoteError::NotFoundError(format!("uid {}", uid))));
        session.expect_append_note().times(0);
        session.expect_set_deleted_flag().times(0);

        let result = edit_note(&mut session, 4711, &profile);

        assert!(matches!(result, Err(NoteError::NotFoundError(_))));
    }
}
