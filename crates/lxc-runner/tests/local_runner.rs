//! Tests for local command execution

use lxc_runner::backends::local::LocalRunner;
use lxc_runner::{Command, Error, Runner};

#[test]
fn test_basic_echo() {
    futures::executor::block_on(async {
        let cmd = Command::builder("echo").arg("hello world").build();

        let output = LocalRunner.run(&cmd).await.unwrap();

        assert_eq!(output.status.code, Some(0));
        assert_eq!(output.status.signal, None);
        assert_eq!(output.stdout, "hello world\n");
    });
}

#[test]
fn test_command_not_found() {
    futures::executor::block_on(async {
        let cmd = Command::new("this_command_does_not_exist_12345");

        let err = LocalRunner.execute(&cmd).await.unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
        assert!(err.to_string().contains("this_command_does_not_exist_12345"));
    });
}

#[test]
fn test_exit_code_propagation() {
    futures::executor::block_on(async {
        let cmd = Command::builder("sh").arg("-c").arg("exit 42").build();

        let output = LocalRunner.run(&cmd).await.unwrap();
        assert_eq!(output.status.code, Some(42));
        assert!(!output.status.success());
    });
}

#[test]
fn test_failure_keeps_partial_output() {
    futures::executor::block_on(async {
        let cmd = Command::builder("sh")
            .arg("-c")
            .arg("echo partial; echo broken >&2; exit 3")
            .build();

        match LocalRunner.execute(&cmd).await {
            Err(Error::Execution {
                exit_code,
                stdout,
                stderr,
                ..
            }) => {
                assert_eq!(exit_code, Some(3));
                assert_eq!(stdout, "partial\n");
                assert_eq!(stderr, "broken\n");
            }
            other => panic!("expected an execution error, got {other:?}"),
        }
    });
}

#[test]
#[cfg(unix)]
fn test_signal_termination() {
    futures::executor::block_on(async {
        let cmd = Command::builder("sh").arg("-c").arg("kill -9 $$").build();

        let output = LocalRunner.run(&cmd).await.unwrap();
        assert!(output.status.terminated_by_signal());
        assert_eq!(output.status.signal, Some(9));

        let err = LocalRunner.execute(&cmd).await.unwrap_err();
        assert!(matches!(err, Error::Execution { exit_code: None, .. }));
    });
}

#[test]
fn test_parallel_local_runs() {
    futures::executor::block_on(async {
        let runner = LocalRunner;
        let first = Command::builder("echo").arg("one").build();
        let second = Command::builder("echo").arg("two").build();

        let (a, b) = futures::join!(runner.execute(&first), runner.execute(&second));
        assert_eq!(a.unwrap(), "one\n");
        assert_eq!(b.unwrap(), "two\n");
    });
}
