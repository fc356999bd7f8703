//! Shared test fixtures: an in-memory account database behind `CommandRunner`.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use usermgt::config::Settings;
use usermgt::error::UserMgtError;
use usermgt::executor::{CommandRunner, SubprocessResult};

/// Emulates the account tools against in-memory user and group sets.
///
/// Home directories live under the temp dir so backups can be checked on
/// disk; `rsync` is emulated with a recursive copy.
pub struct FakeSystem {
    pub users: RefCell<HashMap<String, PathBuf>>,
    pub groups: RefCell<BTreeSet<String>>,
    pub calls: RefCell<Vec<Vec<String>>>,
    /// Canned results that override the emulation, keyed by program name.
    pub failures: RefCell<HashMap<String, SubprocessResult>>,
}

impl FakeSystem {
    pub fn new() -> Self {
        Self {
            users: RefCell::new(HashMap::new()),
            groups: RefCell::new(BTreeSet::new()),
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_group(self, group: &str) -> Self {
        self.groups.borrow_mut().insert(group.to_string());
        self
    }

    pub fn with_user(self, username: &str, home: &Path) -> Self {
        self.users
            .borrow_mut()
            .insert(username.to_string(), home.to_path_buf());
        self
    }

    pub fn fail(&self, program: &str, result: SubprocessResult) {
        self.failures
            .borrow_mut()
            .insert(program.to_string(), result);
    }

    /// Programs invoked, in order.
    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|argv| argv[0].clone()).collect()
    }

    pub fn invoked(&self, program: &str) -> bool {
        self.programs().iter().any(|p| p == program)
    }

    pub fn call(&self, program: &str) -> Option<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .find(|argv| argv[0] == program)
            .cloned()
    }
}

impl CommandRunner for FakeSystem {
    fn run(&self, program: &str, args: &[&str]) -> Result<SubprocessResult, UserMgtError> {
        let mut argv = vec![program.to_string()];
        argv.extend(args.iter().map(|a| a.to_string()));
        self.calls.borrow_mut().push(argv);

        if let Some(result) = self.failures.borrow().get(program) {
            return Ok(result.clone());
        }

        let result = match (program, args) {
            ("getent", ["group", group]) => {
                if self.groups.borrow().contains(*group) {
                    SubprocessResult::ok(format!("{}:x:1001:\n", group))
                } else {
                    SubprocessResult::failed(2, "")
                }
            }
            ("getent", ["passwd", username]) => match self.users.borrow().get(*username) {
                Some(home) => SubprocessResult::ok(format!(
                    "{}:x:1001:1001::{}:/bin/bash\n",
                    username,
                    home.display()
                )),
                None => SubprocessResult::failed(2, ""),
            },
            ("groupadd", [group]) => {
                self.groups.borrow_mut().insert(group.to_string());
                SubprocessResult::ok("")
            }
            ("id", [username]) => {
                if self.users.borrow().contains_key(*username) {
                    SubprocessResult::ok(format!("uid=1001({})", username))
                } else {
                    SubprocessResult::failed(1, format!("id: '{}': no such user", username))
                }
            }
            ("useradd", [.., username]) => {
                self.users
                    .borrow_mut()
                    .insert(username.to_string(), PathBuf::from("/home").join(username));
                SubprocessResult::ok("")
            }
            ("userdel", ["-r", username]) => match self.users.borrow_mut().remove(*username) {
                Some(home) => {
                    if home.is_dir() {
                        fs::remove_dir_all(&home).expect("remove fake home");
                    }
                    SubprocessResult::ok("")
                }
                None => SubprocessResult::failed(6, format!("userdel: user '{}' does not exist", username)),
            },
            ("rsync", ["-a", source, destination]) => {
                copy_tree(Path::new(source), Path::new(destination)).expect("copy tree");
                SubprocessResult::ok("")
            }
            _ => panic!("unexpected command: {} {:?}", program, args),
        };

        Ok(result)
    }
}

fn copy_tree(source: &Path, destination: &Path) -> std::io::Result<()> {
    fs::create_dir_all(destination)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = destination.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Temp dir with settings pointing the log, backup and home paths into it.
pub struct Sandbox {
    pub dir: TempDir,
    pub settings: Settings,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let mut settings = Settings::default();
        settings.paths.log_file = dir.path().join("usermgt.log");
        settings.paths.backup_dir = dir.path().join("backup");
        settings.paths.home_base = dir.path().join("home");
        fs::create_dir_all(&settings.paths.home_base).expect("create home base");
        Self { dir, settings }
    }

    pub fn home(&self, username: &str) -> PathBuf {
        self.settings.paths.home_base.join(username)
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.settings.paths.backup_dir.clone()
    }

    /// Log lines written so far (empty if the log does not exist).
    pub fn log_lines(&self) -> Vec<String> {
        fs::read_to_string(&self.settings.paths.log_file)
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
