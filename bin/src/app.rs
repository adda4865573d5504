use clap::{App, AppSettings, Arg};

/// The command line surface: four actions plus connection overrides.
/// Anything not given here falls back to the config file.
pub fn gen_app() -> App<'static> {
    App::new("imapnotes")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage notes stored in an IMAP folder with your text editor")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .takes_value(true)
                .help("Account name, usually the mail address"),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .takes_value(true)
                .help("Account password; prompted for when not given"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .takes_value(true)
                .help("IMAP server to connect to"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .takes_value(true)
                .help("IMAP port, 993 when not given"),
        )
        .arg(
            Arg::new("folder")
                .long("folder")
                .takes_value(true)
                .help("Folder holding the notes, \"Notes\" when not given"),
        )
        .subcommand(App::new("list").about("List all notes in the folder"))
        .subcommand(
            App::new("show")
                .about("Print a single note")
                .arg(Arg::new("id").required(true).help("Folder id of the note")),
        )
        .subcommand(App::new("add").about("Create a new note in the editor"))
        .subcommand(
            App::new("edit")
                .about("Edit an existing note in the editor")
                .arg(Arg::new("id").required(true).help("Folder id of the note")),
        )
}
