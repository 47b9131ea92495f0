use std::time::{Duration, Instant};

use newshound::llm::{ModelError, ModelInvoker, ProcessModelInvoker};

#[tokio::test]
async fn echoes_stdout_trimmed() {
    let invoker = ProcessModelInvoker::new("cat", vec![]);
    let reply = invoker
        .invoke("hello model\n", Duration::from_secs(5), 1)
        .await
        .unwrap();
    assert_eq!(reply, "hello model");
}

#[tokio::test]
async fn concurrent_invocations_are_isolated() {
    let invoker = ProcessModelInvoker::new("cat", vec![]);
    let (a, b) = tokio::join!(
        invoker.invoke("first", Duration::from_secs(5), 1),
        invoker.invoke("second", Duration::from_secs(5), 1),
    );
    assert_eq!(a.unwrap(), "first");
    assert_eq!(b.unwrap(), "second");
}

#[tokio::test]
async fn nonzero_exit_is_a_runtime_error_without_retry() {
    // reads the prompt first so the exit code, not a broken pipe, decides
    let invoker = ProcessModelInvoker::new(
        "sh",
        vec![
            "-c".to_string(),
            "cat >/dev/null; echo model blew up >&2; exit 3".to_string(),
        ],
    );
    let err = invoker
        .invoke("prompt", Duration::from_secs(5), 3)
        .await
        .unwrap_err();
    match err {
        ModelError::Runtime(stderr) => assert_eq!(stderr, "model blew up"),
        other => panic!("expected Runtime, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_binary_is_an_internal_error() {
    let invoker = ProcessModelInvoker::new("newshound-no-such-binary", vec![]);
    let err = invoker
        .invoke("prompt", Duration::from_secs(5), 3)
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::Internal(_)));
}

#[tokio::test]
async fn timeout_is_retried_exactly_max_attempts_times() {
    let invoker = ProcessModelInvoker::new("sleep", vec!["5".to_string()]);
    let timeout = Duration::from_millis(200);

    let start = Instant::now();
    let err = invoker.invoke("prompt", timeout, 3).await.unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(err, ModelError::Timeout));
    // three full timeout windows must have passed, no more than a few
    assert!(elapsed >= Duration::from_millis(550), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(4), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn single_attempt_times_out_once() {
    let invoker = ProcessModelInvoker::new("sleep", vec!["5".to_string()]);
    let timeout = Duration::from_millis(200);

    let start = Instant::now();
    let err = invoker.invoke("prompt", timeout, 1).await.unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(err, ModelError::Timeout));
    assert!(elapsed < Duration::from_secs(2), "elapsed {elapsed:?}");
}

#[test]
fn user_messages_keep_their_warning_prefix() {
    assert_eq!(
        ModelError::Timeout.user_message(),
        "⚠️ Timeout from model after retries."
    );
    assert_eq!(
        ModelError::Runtime("bad".to_string()).user_message(),
        "⚠️ Model error: bad"
    );
    assert_eq!(
        ModelError::Internal("oops".to_string()).user_message(),
        "⚠️ Exception: oops"
    );
}
