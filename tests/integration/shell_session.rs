//! Integration tests for scripted shell sessions

use treefs::cli::RunContext;
use treefs::config::{ShellConfig, TreefsConfig};
use treefs::shell::{Shell, ShellOutcome};
use std::path::PathBuf;
use tempfile::TempDir;

fn plain_shell() -> Shell {
    Shell::new(ShellConfig {
        user: "ci".to_string(),
        color: false,
        debug: false,
        seed_directories: vec!["/home/ci".to_string(), "/tmp".to_string()],
    })
}

fn run(shell: &mut Shell, line: &str) -> String {
    match shell.execute(line) {
        ShellOutcome::Continue(text) => text,
        ShellOutcome::Exit => String::from("<exit>"),
    }
}

/// A typical editing session through the shell
#[test]
fn test_editing_session() {
    let mut sh = plain_shell();
    run(&mut sh, "cd /home/ci");
    run(&mut sh, "echo Hello World > greeting.txt");
    run(&mut sh, "ed greeting.txt insert 5 , Beautiful");
    assert_eq!(run(&mut sh, "cat greeting.txt"), "Hello, Beautiful World");

    run(&mut sh, "ed greeting.txt delete , Beautiful");
    run(&mut sh, "echo Bye >> greeting.txt");
    assert_eq!(run(&mut sh, "cat greeting.txt"), "Hello World\nBye");
    assert_eq!(run(&mut sh, "ls"), "greeting.txt");
}

/// Permission changes are visible to later commands
#[test]
fn test_permission_session() {
    let mut sh = plain_shell();
    run(&mut sh, "touch /tmp/ro");
    run(&mut sh, "chmod 444 /tmp/ro");
    assert_eq!(
        run(&mut sh, "echo nope > /tmp/ro"),
        "echo: /tmp/ro: permission denied"
    );
    assert!(run(&mut sh, "ls -l /tmp").contains("-r--r--r--"));
    assert_eq!(
        run(&mut sh, "chmod 9 /tmp/ro"),
        "chmod: invalid mode: 9 (expected three octal digits, e.g. 755)"
    );
}

/// Stats and tree reflect the directory contents
#[test]
fn test_stats_and_tree() {
    let mut sh = plain_shell();
    for i in 0..20 {
        run(&mut sh, &format!("touch /tmp/t{}", i));
    }
    let stats = run(&mut sh, "stats /tmp");
    assert!(stats.contains("20"));
    assert!(stats.contains("OK"));

    let tree = run(&mut sh, "tree /home");
    assert_eq!(tree.lines().next(), Some("/home"));
    assert!(tree.contains("└── ci/"));
}

/// Scripts run through the CLI context
#[test]
fn test_script_through_run_context() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.tfs");
    std::fs::write(
        &script,
        "mkdir /srv\ncd /srv\npwd\nfrobnicate\nexit\necho unreachable\n",
    )
    .unwrap();

    let mut config = TreefsConfig::default();
    config.shell.color = false;
    let ctx = RunContext::with_config(config, PathBuf::from("."), None).unwrap();
    let output = ctx.run_script(&script).unwrap();
    assert_eq!(output, "/srv\nfrobnicate: command not found");
}
