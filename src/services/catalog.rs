/// Command catalog
/// Registry of known command names and one-line descriptions. Seeded with
/// built-ins, extended at runtime with host executables or user entries.
/// Insertion order is stable and doubles as the suggestion tiebreak.

use std::env;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::models::CommandEntry;

/// Commands every supported platform understands, used to seed the catalog.
const CORE_COMMANDS: &[(&str, &str)] = &[
    ("cd", "change the working directory"),
    ("echo", "print text to the terminal"),
    ("git", "distributed version control"),
    ("curl", "transfer data from or to a URL"),
    ("ping", "probe a network host"),
    ("ssh", "open a secure remote shell"),
    ("python", "run the Python interpreter"),
    ("node", "run the Node.js runtime"),
    ("npm", "manage Node.js packages"),
    ("cargo", "build and manage Rust projects"),
    ("docker", "manage containers and images"),
    ("make", "run a build described by a Makefile"),
    ("tar", "create or extract archives"),
    ("grep", "search text for a pattern"),
    ("sort", "sort lines of text"),
    ("head", "show the first lines of input"),
    ("tail", "show the last lines of input"),
    ("diff", "compare two files line by line"),
    ("exit", "leave the shell"),
];

#[cfg(windows)]
const PLATFORM_COMMANDS: &[(&str, &str)] = &[
    ("dir", "list the contents of a directory"),
    ("cls", "clear the terminal screen"),
    ("copy", "copy files"),
    ("move", "move or rename files"),
    ("del", "delete files"),
    ("mkdir", "create a directory"),
    ("rmdir", "remove a directory"),
    ("type", "print the contents of a file"),
    ("where", "locate a program on the search path"),
    ("tasklist", "list running processes"),
    ("taskkill", "terminate a running process"),
    ("ipconfig", "show network interface configuration"),
    ("systeminfo", "show operating system details"),
];

#[cfg(not(windows))]
const PLATFORM_COMMANDS: &[(&str, &str)] = &[
    ("ls", "list the contents of a directory"),
    ("pwd", "print the working directory"),
    ("clear", "clear the terminal screen"),
    ("cp", "copy files"),
    ("mv", "move or rename files"),
    ("rm", "delete files"),
    ("mkdir", "create a directory"),
    ("rmdir", "remove an empty directory"),
    ("cat", "print the contents of a file"),
    ("touch", "create a file or update its timestamp"),
    ("which", "locate a program on the search path"),
    ("find", "search for files in a directory tree"),
    ("ps", "list running processes"),
    ("kill", "terminate a running process"),
    ("top", "monitor processes and system load"),
    ("df", "show filesystem disk usage"),
    ("du", "show directory disk usage"),
    ("chmod", "change file permissions"),
    ("uname", "show operating system details"),
];

/// Insertion-ordered set of command descriptors. Names are unique,
/// compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    entries: Vec<CommandEntry>,
}

impl CommandCatalog {
    pub fn new() -> Self {
        CommandCatalog {
            entries: Vec::new(),
        }
    }

    /// A catalog seeded with the built-in command table for this platform.
    pub fn builtin() -> Self {
        let mut catalog = CommandCatalog::new();
        for (name, description) in CORE_COMMANDS.iter().chain(PLATFORM_COMMANDS) {
            catalog.extend(CommandEntry::new(*name, *description));
        }
        catalog
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Add a descriptor, or update the description when the name is already
    /// registered. Returns true when a new entry was inserted.
    pub fn extend(&mut self, entry: CommandEntry) -> bool {
        match self.position(&entry.name) {
            Some(index) => {
                self.entries[index].description = entry.description;
                false
            }
            None => {
                self.entries.push(entry);
                true
            }
        }
    }

    /// Read `name = description` lines from a catalog file. Blank lines and
    /// `#` comments are skipped; malformed lines are logged and skipped;
    /// duplicate names update the existing entry. Returns how many lines
    /// were applied.
    pub fn load_entries(&mut self, path: impl AsRef<Path>) -> std::io::Result<usize> {
        let path = path.as_ref();
        let reader = BufReader::new(fs::File::open(path)?);

        let mut applied = 0;
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            match parse_entry(&line) {
                Some(entry) => {
                    self.extend(entry);
                    applied += 1;
                }
                None => {
                    if !line.trim().is_empty() && !line.trim_start().starts_with('#') {
                        log::warn!(
                            "{}:{}: skipping malformed catalog line",
                            path.display(),
                            number + 1
                        );
                    }
                }
            }
        }

        Ok(applied)
    }

    /// Scan the directories on PATH and register executables the catalog
    /// does not know yet. Built-in descriptions are never clobbered.
    /// Returns how many commands were discovered.
    pub fn extend_from_path(&mut self) -> usize {
        let path_var = match env::var_os("PATH") {
            Some(var) => var,
            None => return 0,
        };

        let mut added = 0;
        for dir in env::split_paths(&path_var) {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(_) => continue,
            };

            for entry in entries.filter_map(|e| e.ok()) {
                let name = match entry.file_name().into_string() {
                    Ok(name) => name,
                    Err(_) => continue,
                };
                if self.contains(&name) || !is_executable(&entry) {
                    continue;
                }
                self.entries.push(CommandEntry::new(
                    name,
                    format!("program in {}", dir.display()),
                ));
                added += 1;
            }
        }

        added
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(name))
    }
}

/// Parse one `name = description` catalog line.
fn parse_entry(line: &str) -> Option<CommandEntry> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (name, description) = line.split_once('=')?;
    let name = name.trim();
    let description = description.trim();
    if name.is_empty() || name.contains(char::is_whitespace) || description.is_empty() {
        return None;
    }

    Some(CommandEntry::new(name, description))
}

#[cfg(unix)]
fn is_executable(entry: &fs::DirEntry) -> bool {
    use std::os::unix::fs::PermissionsExt;

    // fs::metadata follows symlinks; PATH entries frequently are ones.
    match fs::metadata(entry.path()) {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(windows)]
fn is_executable(entry: &fs::DirEntry) -> bool {
    let name = entry.file_name();
    let name = name.to_string_lossy().to_ascii_lowercase();
    fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false)
        && (name.ends_with(".exe") || name.ends_with(".bat") || name.ends_with(".cmd"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_no_duplicate_names() {
        let catalog = CommandCatalog::builtin();
        assert!(!catalog.is_empty());

        for (i, entry) in catalog.entries().iter().enumerate() {
            let duplicate = catalog.entries()[i + 1..]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&entry.name));
            assert!(!duplicate, "duplicate catalog entry: {}", entry.name);
        }
    }

    #[test]
    fn extend_inserts_new_names() {
        let mut catalog = CommandCatalog::new();
        assert!(catalog.extend(CommandEntry::new("zig", "zig compiler")));
        assert!(catalog.contains("zig"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn extend_updates_existing_names_in_place() {
        let mut catalog = CommandCatalog::new();
        catalog.extend(CommandEntry::new("git", "old"));
        assert!(!catalog.extend(CommandEntry::new("GIT", "distributed version control")));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].name, "git");
        assert_eq!(catalog.entries()[0].description, "distributed version control");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut catalog = CommandCatalog::new();
        catalog.extend(CommandEntry::new("beta", "b"));
        catalog.extend(CommandEntry::new("alpha", "a"));
        let names: Vec<&str> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["beta", "alpha"]);
    }

    #[test]
    fn parse_entry_reads_name_and_description() {
        let entry = parse_entry("rg = recursively search the current directory").unwrap();
        assert_eq!(entry.name, "rg");
        assert_eq!(entry.description, "recursively search the current directory");
    }

    #[test]
    fn parse_entry_skips_comments_and_blanks() {
        assert!(parse_entry("").is_none());
        assert!(parse_entry("   ").is_none());
        assert!(parse_entry("# a comment").is_none());
    }

    #[test]
    fn parse_entry_rejects_malformed_lines() {
        assert!(parse_entry("no separator here").is_none());
        assert!(parse_entry(" = description without a name").is_none());
        assert!(parse_entry("name = ").is_none());
        assert!(parse_entry("two words = description").is_none());
    }
}
