#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use tokio::sync::mpsc;

use launchshim::errors::LauncherError;
use launchshim::launch::{ChildSignal, Termination};
use launchshim::relay::Session;
use launchshim::types::StreamKind;
use launchshim_test_utils::fake_install::FakeInstall;
use launchshim_test_utils::io::BrokenPipeWriter;
use launchshim_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

/// Starts a background `sleep` that inherits the child's pipes, records its
/// pid in `$1` and exits with status 3.
const LEAVES_GRANDCHILD: &str = "trap '' INT\n\
sleep 30 &\n\
echo $! > \"$1.tmp\"\n\
mv \"$1.tmp\" \"$1\"\n\
echo parent-done\n\
exit 3\n";

fn reap_grandchild(pid_file: &Path) -> TestResult {
    let pid: i32 = fs::read_to_string(pid_file)?.trim().parse()?;
    // Already gone is fine.
    let _ = kill(Pid::from_raw(pid), Signal::SIGKILL);
    Ok(())
}

#[tokio::test]
async fn streams_are_mirrored_byte_for_byte() -> TestResult {
    init_tracing();
    let install = FakeInstall::new()?;
    install.write_script(
        "t.sh",
        "printf 'hello\\n'\nprintf 'oops' >&2\nprintf 'world\\n'\nprintf '\\001\\377no-newline'\nexit 7\n",
    )?;
    let handle = install.sh_launcher("t.sh")?.launch(Vec::<String>::new())?;

    let (_tx, rx) = mpsc::channel(1);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = with_timeout(Session::new(handle).run(&mut out, &mut err, rx)).await?;

    assert_eq!(out, b"hello\nworld\n\x01\xffno-newline");
    assert_eq!(err, b"oops");
    assert_eq!(outcome.termination, Termination::Exited(7));
    assert!(outcome.relay_errors.is_empty());
    Ok(())
}

#[tokio::test]
async fn large_output_is_not_truncated() -> TestResult {
    init_tracing();
    let install = FakeInstall::new()?;
    // ~1 MiB, well beyond any pipe buffer.
    install.write_script(
        "t.sh",
        "i=0\nwhile [ $i -lt 16384 ]; do echo 0123456789012345678901234567890123456789012345678901234567890; i=$((i+1)); done\n",
    )?;
    let handle = install.sh_launcher("t.sh")?.launch(Vec::<String>::new())?;

    let (_tx, rx) = mpsc::channel(1);
    let mut out = Vec::new();
    let outcome =
        with_timeout(Session::new(handle).run(&mut out, tokio::io::sink(), rx)).await?;

    assert_eq!(out.len(), 16384 * 63);
    assert_eq!(outcome.termination, Termination::Exited(0));
    Ok(())
}

#[tokio::test]
async fn interrupt_on_the_channel_reaches_the_child() -> TestResult {
    init_tracing();
    let install = FakeInstall::new()?;
    install.write_script(
        "t.sh",
        "trap 'echo got-int; exit 42' INT\n: > \"$1\"\nwhile :; do sleep 0.1; done\n",
    )?;
    let ready = install.path().join("ready");
    let handle = install
        .sh_launcher("t.sh")?
        .launch([ready.as_os_str().to_owned()])?;

    let (tx, rx) = mpsc::channel(1);
    let session = tokio::spawn(async move {
        let mut out = Vec::new();
        let outcome = Session::new(handle).run(&mut out, tokio::io::sink(), rx).await;
        (out, outcome)
    });

    with_timeout(FakeInstall::wait_for_file(&ready)).await;
    assert!(!session.is_finished(), "session must wait for the child");

    tx.send(ChildSignal::Interrupt).await?;
    let (out, outcome) = with_timeout(session).await?;
    let outcome = outcome?;

    assert_eq!(out, b"got-int\n");
    assert_eq!(outcome.termination, Termination::Exited(42));
    Ok(())
}

#[tokio::test]
async fn closed_signal_channel_does_not_end_the_session() -> TestResult {
    init_tracing();
    let install = FakeInstall::new()?;
    install.write_script("t.sh", "sleep 0.2\necho done\n")?;
    let handle = install.sh_launcher("t.sh")?.launch(Vec::<String>::new())?;

    let (tx, rx) = mpsc::channel(1);
    drop(tx);

    let mut out = Vec::new();
    let outcome = with_timeout(Session::new(handle).run(&mut out, tokio::io::sink(), rx)).await?;

    assert_eq!(out, b"done\n");
    assert_eq!(outcome.termination, Termination::Exited(0));
    Ok(())
}

#[tokio::test]
async fn relay_failure_is_reported_but_child_keeps_running() -> TestResult {
    init_tracing();
    let install = FakeInstall::new()?;
    install.write_script(
        "t.sh",
        "echo first\nsleep 0.2\necho second\necho still-alive >&2\nexit 5\n",
    )?;
    let handle = install.sh_launcher("t.sh")?.launch(Vec::<String>::new())?;

    let (_tx, rx) = mpsc::channel(1);
    let mut err = Vec::new();
    let outcome =
        with_timeout(Session::new(handle).run(BrokenPipeWriter, &mut err, rx)).await?;

    // The child ran to completion on its own terms.
    assert_eq!(outcome.termination, Termination::Exited(5));
    assert_eq!(err, b"still-alive\n");
    assert_eq!(outcome.relay_errors.len(), 1);
    match &outcome.relay_errors[0] {
        LauncherError::Relay { stream, .. } => assert_eq!(*stream, StreamKind::Stdout),
        other => panic!("expected Relay error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn session_ends_when_a_grandchild_holds_the_pipes() -> TestResult {
    init_tracing();
    let install = FakeInstall::new()?;
    install.write_script("t.sh", LEAVES_GRANDCHILD)?;
    let pid_file = install.path().join("grandchild.pid");
    let handle = install
        .sh_launcher("t.sh")?
        .launch([pid_file.as_os_str().to_owned()])?;

    let (_tx, rx) = mpsc::channel(1);
    let mut out = Vec::new();
    let started = Instant::now();
    let outcome = with_timeout(Session::new(handle).run(&mut out, tokio::io::sink(), rx)).await;
    let elapsed = started.elapsed();
    reap_grandchild(&pid_file)?;
    let outcome = outcome?;

    assert_eq!(outcome.termination, Termination::Exited(3));
    assert_eq!(out, b"parent-done\n");
    assert!(elapsed < Duration::from_secs(5), "session took {elapsed:?}");
    Ok(())
}

#[tokio::test]
async fn signal_after_exit_ends_the_session() -> TestResult {
    init_tracing();
    let install = FakeInstall::new()?;
    install.write_script("t.sh", LEAVES_GRANDCHILD)?;
    let pid_file = install.path().join("grandchild.pid");
    let handle = install
        .sh_launcher("t.sh")?
        .launch([pid_file.as_os_str().to_owned()])?;

    let (tx, rx) = mpsc::channel(1);
    let session = tokio::spawn(async move {
        Session::new(handle)
            .with_drain_grace(Duration::from_secs(60))
            .run(tokio::io::sink(), tokio::io::sink(), rx)
            .await
    });

    // The child ignores SIGINT, so interrupts sent before it exits are
    // harmless; the first one after the exit must end the session.
    with_timeout(async {
        while !session.is_finished() {
            let _ = tx.try_send(ChildSignal::Interrupt);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await;

    let outcome = session.await;
    reap_grandchild(&pid_file)?;
    let outcome = outcome??;

    assert_eq!(outcome.termination, Termination::Exited(3));
    Ok(())
}
