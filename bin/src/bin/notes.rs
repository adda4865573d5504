use clap::ArgMatches;
use colored::Colorize;
use flexi_logger::{DeferredNow, Logger, Record};
use log::{error, info};

use imapnotes_bin::app::gen_app;
use imapnotes_lib::error::NoteError;
use imapnotes_lib::error::Result;
use imapnotes_lib::notes::traits::header_parser::HeaderParser;
use imapnotes_lib::profile;
use imapnotes_lib::profile::Profile;
use imapnotes_lib::ImapNotes;

//Minimal println like formatting for flexi_logger
pub fn default_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> core::result::Result<(), std::io::Error> {
    write!(w, "{}", record.args())
}

pub fn main() {
    let _logger = Logger::try_with_env_or_str("info")
        .unwrap()
        .format(default_format)
        .start()
        .unwrap();

    let matches = gen_app().get_matches();

    // single termination point: every error path ends up here
    if let Err(e) = run(&matches) {
        error!("Error: {}", e);
        let code = e
            .downcast_ref::<NoteError>()
            .map(|note_error| note_error.exit_code())
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let profile = profile_from(matches)?;
    let mut app = ImapNotes::connect(profile)?;

    match matches.subcommand() {
        Some(("list", _)) => list_notes(&mut app),
        Some(("show", sub_matches)) => show_note(sub_matches, &mut app),
        Some(("add", _)) => add_note(&mut app),
        Some(("edit", sub_matches)) => edit_note(sub_matches, &mut app),
        _ => unreachable!(),
    }
}

/// Config file first, command line flags on top, password prompt last.
fn profile_from(matches: &ArgMatches) -> Result<Profile> {
    let mut profile = profile::load_profile()?;

    if let Some(username) = matches.value_of("username") {
        profile.username = username.to_string();
    }
    if let Some(password) = matches.value_of("password") {
        profile.password = Some(password.to_string());
    }
    if let Some(host) = matches.value_of("host") {
        profile.imap_server = host.to_string();
    }
    if let Some(port) = matches.value_of("port") {
        profile.port = port
            .parse()
            .map_err(|_| format!("invalid port \"{}\"", port))?;
    }
    if let Some(folder) = matches.value_of("folder") {
        profile.folder = folder.to_string();
    }

    profile.validate()?;

    if profile.password.is_none() {
        profile.password = Some(rpassword::prompt_password(format!(
            "Password for {}: ",
            profile.username
        ))?);
    }

    Ok(profile)
}

fn list_notes(app: &mut ImapNotes) -> Result<()> {
    let notes = app.list_notes()?;

    for note in notes {
        let uid = note
            .uid
            .map(|uid| uid.to_string())
            .unwrap_or_else(|| "?".to_string());
        info!(
            "{:>6}  {:<31}  {}",
            uid.bold(),
            note.headers.date().unwrap_or_default(),
            note.headers.subject().unwrap_or_default()
        );
    }
    Ok(())
}

fn show_note(sub_matches: &ArgMatches, app: &mut ImapNotes) -> Result<()> {
    let uid = parse_id(sub_matches)?;
    let note = app.show_note(uid)?;

    info!(
        "{}  {}",
        note.headers.subject().unwrap_or_default().bold(),
        note.headers.date().unwrap_or_default()
    );
    info!("");
    info!("{}", note.body);
    Ok(())
}

fn add_note(app: &mut ImapNotes) -> Result<()> {
    let note = app.add_note()?;
    info!(
        "Created \"{}\" as {}",
        note.headers.subject().unwrap_or_default(),
        note.uid.unwrap_or_default()
    );
    Ok(())
}

fn edit_note(sub_matches: &ArgMatches, app: &mut ImapNotes) -> Result<()> {
    let uid = parse_id(sub_matches)?;
    let note = app.edit_note(uid)?;
    info!(
        "Updated \"{}\", new id {}",
        note.headers.subject().unwrap_or_default(),
        note.uid.unwrap_or_default()
    );
    Ok(())
}

fn parse_id(sub_matches: &ArgMatches) -> Result<u32> {
    let id = sub_matches.value_of("id").unwrap();
    id.parse()
        .map_err(|_| format!("invalid message id \"{}\"", id).into())
}
