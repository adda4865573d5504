use std::path::PathBuf;

use log::warn;
use regex::Regex;

use crate::error::ProfileError;
use crate::error::Result;

#[cfg(target_family = "unix")]
use xdg::BaseDirectories;

/// Everything one workflow invocation needs to know about its environment:
/// the account, the folder that holds the notes, and the editor command.
///
/// The editor is resolved here and only here; the edit machinery receives
/// the command as a plain parameter and never consults the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub username: String,
    pub password: Option<String>,
    pub imap_server: String,
    pub port: u16,
    pub folder: String,
    pub editor: String,
    pub editor_arguments: Vec<String>,
}

impl Profile {
    /// Host part of the username, used for generated Message-Id values.
    pub fn domain(&self) -> String {
        match self.username.split_once('@') {
            Some((_, domain)) if !domain.is_empty() => domain.to_string(),
            _ => "localhost".to_string(),
        }
    }

    /// Missing config entries only become an error once neither the config
    /// file nor the command line supplied them.
    pub fn validate(&self) -> std::result::Result<(), ProfileError> {
        if self.username.is_empty() {
            return Err(ProfileError::NotFound("username".to_string()));
        }
        if self.imap_server.is_empty() {
            return Err(ProfileError::NotFound("imap_server".to_string()));
        }
        Ok(())
    }
}

#[cfg(target_family = "unix")]
fn get_config_path() -> Result<PathBuf> {
    let xdg_dir = BaseDirectories::new()?;
    match xdg_dir.find_config_file("imapnotes/config") {
        Some(path) => Ok(path),
        None => {
            warn!("Could not detect config file, gonna create empty one");
            let mut path = xdg_dir.create_config_directory("imapnotes")?;
            path.push("config");
            std::fs::File::create(&path)?;
            Ok(path)
        }
    }
}

#[cfg(target_family = "windows")]
fn get_config_path() -> Result<PathBuf> {
    let appdata = std::env::var("APPDATA")?;
    let config_file_path = PathBuf::from(format!("{}\\imapnotes\\config", appdata));
    if config_file_path.exists() {
        Ok(config_file_path)
    } else {
        warn!("Could not detect config file, gonna create empty one");
        std::fs::create_dir_all(config_file_path.parent().unwrap())?;
        std::fs::File::create(&config_file_path)?;
        Ok(config_file_path)
    }
}

pub fn load_profile() -> Result<Profile> {
    let path = get_config_path()?;
    let creds = std::fs::read_to_string(&path)?;
    parse_profile(&creds)
}

pub fn parse_profile(creds: &str) -> Result<Profile> {
    let username_regex = Regex::new(r"username=(.*)")?;
    let password_regex = Regex::new(r"password=(.*)")?;
    let imap_regex = Regex::new(r"imap_server=(.*)")?;
    let port_regex = Regex::new(r"port=(.*)")?;
    let folder_regex = Regex::new(r"folder=(.*)")?;
    let editor_regex = Regex::new(r"editor=(.*)")?;
    let args_regex = Regex::new(r"editor_arguments=(.*)")?;

    let port = match get_with_regex(port_regex, creds) {
        Some(value) => value
            .parse::<u16>()
            .map_err(|_| ProfileError::Invalid(format!("port is not a number: \"{}\"", value)))?,
        None => 993,
    };

    let editor_arguments = get_with_regex(args_regex, creds)
        .unwrap_or_default()
        .split(' ')
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(Profile {
        username: get_with_regex(username_regex, creds).unwrap_or_default(),
        password: get_with_regex(password_regex, creds),
        imap_server: get_with_regex(imap_regex, creds).unwrap_or_default(),
        port,
        folder: get_with_regex(folder_regex, creds).unwrap_or_else(|| "Notes".to_string()),
        editor: resolve_editor(get_with_regex(editor_regex, creds)),
        editor_arguments,
    })
}

/// Resolution order: `editor=` config entry, then `$EDITOR`, then `vi`.
pub fn resolve_editor(configured: Option<String>) -> String {
    configured
        .filter(|e| !e.is_empty())
        .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.is_empty()))
        .unwrap_or_else(|| "vi".to_string())
}

fn get_with_regex(regex: Regex, creds: &str) -> Option<String> {
    regex
        .captures(creds)
        .and_then(|captured| captured.get(1))
        .map(|result| result.as_str().trim().to_string())
        .filter(|result| !result.is_empty())
}
