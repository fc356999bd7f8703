//! Wrappers over `getent`, `groupadd`, `id`, `useradd`, `userdel` and `rsync`.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{CommandErrorKind, UserMgtError, UserMgtResult};
use crate::executor::{sanitize_output, CommandRunner, SubprocessResult};

use super::exit_codes::{
    describe_groupadd_exit, describe_rsync_exit, describe_useradd_exit, describe_userdel_exit,
};

/// Lines of tool stderr kept in error messages.
const STDERR_EXCERPT_LINES: usize = 5;

/// `getent` exit status for "key not found in database".
const GETENT_NOT_FOUND: i32 = 2;

/// The attributes of an account to be created.
#[derive(Debug, Clone, Copy)]
pub struct NewAccount<'a> {
    pub username: &'a str,
    pub fullname: &'a str,
    pub group: &'a str,
    pub shell: &'a str,
}

/// Account administration through the system tools.
pub struct AccountTools<R> {
    runner: R,
}

impl<R: CommandRunner> AccountTools<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Whether `group` is present in the group database.
    pub fn group_exists(&self, group: &str) -> UserMgtResult<bool> {
        let result = self.runner.run("getent", &["group", group])?;
        match result.exit_code {
            Some(0) => Ok(true),
            Some(GETENT_NOT_FOUND) => Ok(false),
            _ => Err(tool_failure("getent", &result, "Group lookup failed".to_string())),
        }
    }

    /// Create `group` with `groupadd`.
    pub fn create_group(&self, group: &str) -> UserMgtResult<()> {
        let result = self.runner.run("groupadd", &[group])?;
        if !result.success {
            return Err(tool_failure(
                "groupadd",
                &result,
                describe_groupadd_exit(result.exit_code, group),
            ));
        }
        debug!(group = %group, "Group created");
        Ok(())
    }

    /// Whether `username` resolves to an account (`id` exits 0).
    pub fn user_exists(&self, username: &str) -> UserMgtResult<bool> {
        let result = self.runner.run("id", &[username])?;
        Ok(result.success)
    }

    /// Home directory recorded in the passwd database, if any.
    pub fn home_dir(&self, username: &str) -> UserMgtResult<Option<PathBuf>> {
        let result = self.runner.run("getent", &["passwd", username])?;
        match result.exit_code {
            Some(0) => Ok(parse_passwd_home(&result.stdout)),
            Some(GETENT_NOT_FOUND) => Ok(None),
            _ => Err(tool_failure("getent", &result, "User lookup failed".to_string())),
        }
    }

    /// Create an account with a home directory via `useradd`.
    pub fn add_user(&self, account: &NewAccount<'_>) -> UserMgtResult<()> {
        let result = self.runner.run(
            "useradd",
            &[
                "-m",
                "-c",
                account.fullname,
                "-g",
                account.group,
                "-s",
                account.shell,
                account.username,
            ],
        )?;
        if !result.success {
            return Err(tool_failure(
                "useradd",
                &result,
                describe_useradd_exit(result.exit_code, account.username, account.group),
            ));
        }
        Ok(())
    }

    /// Remove an account and its home directory via `userdel -r`.
    pub fn delete_user(&self, username: &str) -> UserMgtResult<()> {
        let result = self.runner.run("userdel", &["-r", username])?;
        if !result.success {
            return Err(tool_failure(
                "userdel",
                &result,
                describe_userdel_exit(result.exit_code, username),
            ));
        }
        Ok(())
    }

    /// Copy the contents of `source` into `destination` with `rsync`.
    ///
    /// Files already under `destination` are kept, so an earlier backup of
    /// the same account is merged into rather than replaced.
    pub fn mirror_directory(&self, source: &Path, destination: &Path) -> UserMgtResult<()> {
        let source = with_trailing_slash(source);
        let destination = with_trailing_slash(destination);
        let result = self
            .runner
            .run("rsync", &["-a", source.as_str(), destination.as_str()])?;
        if !result.success {
            return Err(tool_failure(
                "rsync",
                &result,
                describe_rsync_exit(result.exit_code),
            ));
        }
        Ok(())
    }
}

/// Build the error for a tool that ran but reported failure.
fn tool_failure(program: &str, result: &SubprocessResult, description: String) -> UserMgtError {
    warn!(
        program = %program,
        exit_code = ?result.exit_code,
        stderr = %result.stderr.trim(),
        "Tool reported failure"
    );

    let excerpt = sanitize_output(&result.stderr, STDERR_EXCERPT_LINES);
    let message = if excerpt.is_empty() {
        description
    } else {
        format!("{} ({})", description, excerpt)
    };

    UserMgtError::Command {
        kind: CommandErrorKind::NonZeroExit {
            program: program.to_string(),
            exit_code: result.exit_code,
            message,
        },
    }
}

/// Sixth field of the first passwd line: `name:pw:uid:gid:gecos:home:shell`.
fn parse_passwd_home(stdout: &str) -> Option<PathBuf> {
    let line = stdout.lines().next()?;
    let home = line.split(':').nth(5)?;
    if home.is_empty() {
        None
    } else {
        Some(PathBuf::from(home))
    }
}

/// rsync copies directory contents only when the source ends in `/`.
fn with_trailing_slash(path: &Path) -> String {
    let mut s = path.to_string_lossy().into_owned();
    if !s.ends_with('/') {
        s.push('/');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Answers every call with the same result and records the argv.
    struct FixedRunner {
        result: SubprocessResult,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl FixedRunner {
        fn new(result: SubprocessResult) -> Self {
            Self {
                result,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for FixedRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<SubprocessResult, UserMgtError> {
            let mut argv = vec![program.to_string()];
            argv.extend(args.iter().map(|a| a.to_string()));
            self.calls.borrow_mut().push(argv);
            Ok(self.result.clone())
        }
    }

    #[test]
    fn test_group_exists_maps_getent_status() {
        let tools = AccountTools::new(FixedRunner::new(SubprocessResult::ok("dev:x:1001:\n")));
        assert!(tools.group_exists("dev").unwrap());

        let tools = AccountTools::new(FixedRunner::new(SubprocessResult::failed(2, "")));
        assert!(!tools.group_exists("dev").unwrap());

        let tools = AccountTools::new(FixedRunner::new(SubprocessResult::failed(1, "")));
        assert!(tools.group_exists("dev").is_err());
    }

    #[test]
    fn test_add_user_argv() {
        let runner = FixedRunner::new(SubprocessResult::ok(""));
        let tools = AccountTools::new(&runner);
        tools
            .add_user(&NewAccount {
                username: "alice",
                fullname: "Alice Liddell",
                group: "dev",
                shell: "/bin/zsh",
            })
            .unwrap();

        assert_eq!(
            runner.calls.borrow()[0],
            vec!["useradd", "-m", "-c", "Alice Liddell", "-g", "dev", "-s", "/bin/zsh", "alice"]
        );
    }

    #[test]
    fn test_add_user_failure_includes_description_and_stderr() {
        let runner = FixedRunner::new(SubprocessResult::failed(
            9,
            "useradd: user 'alice' already exists\n",
        ));
        let err = AccountTools::new(&runner)
            .add_user(&NewAccount {
                username: "alice",
                fullname: "",
                group: "dev",
                shell: "/bin/bash",
            })
            .unwrap_err();

        assert_eq!(err.exit_code(), Some(9));
        let message = err.to_string();
        assert!(message.contains("Username 'alice' already in use"));
        assert!(message.contains("useradd: user 'alice' already exists"));
    }

    #[test]
    fn test_delete_user_reports_exit_code() {
        let runner = FixedRunner::new(SubprocessResult::failed(8, ""));
        let err = AccountTools::new(&runner).delete_user("bob").unwrap_err();
        assert_eq!(err.exit_code(), Some(8));
        assert_eq!(runner.calls.borrow()[0], vec!["userdel", "-r", "bob"]);
    }

    #[test]
    fn test_mirror_directory_argv() {
        let runner = FixedRunner::new(SubprocessResult::ok(""));
        AccountTools::new(&runner)
            .mirror_directory(&PathBuf::from("/home/bob"), &PathBuf::from("/backup/bob"))
            .unwrap();
        assert_eq!(
            runner.calls.borrow()[0],
            vec!["rsync", "-a", "/home/bob/", "/backup/bob/"]
        );
    }

    #[test]
    fn test_home_dir_from_passwd() {
        let tools = AccountTools::new(FixedRunner::new(SubprocessResult::ok(
            "bob:x:1001:1001:Bob,,,:/srv/users/bob:/bin/bash\n",
        )));
        assert_eq!(
            tools.home_dir("bob").unwrap(),
            Some(PathBuf::from("/srv/users/bob"))
        );

        let tools = AccountTools::new(FixedRunner::new(SubprocessResult::failed(2, "")));
        assert_eq!(tools.home_dir("bob").unwrap(), None);
    }

    #[test]
    fn test_parse_passwd_home() {
        assert_eq!(parse_passwd_home("a:x:1:1::/home/a:/bin/sh"), Some(PathBuf::from("/home/a")));
        assert_eq!(parse_passwd_home("a:x:1:1:::/bin/sh"), None);
        assert_eq!(parse_passwd_home("garbage"), None);
        assert_eq!(parse_passwd_home(""), None);
    }

    #[test]
    fn test_user_exists() {
        let tools = AccountTools::new(FixedRunner::new(SubprocessResult::ok("uid=1000(bob)")));
        assert!(tools.user_exists("bob").unwrap());
        let tools = AccountTools::new(FixedRunner::new(SubprocessResult::failed(
            1,
            "id: 'bob': no such user",
        )));
        assert!(!tools.user_exists("bob").unwrap());
    }
}
