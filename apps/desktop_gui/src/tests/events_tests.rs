use super::*;

#[test]
fn classifies_http_statuses_and_transport_failures() {
    let auth = UiError::from_message(
        UiErrorContext::FeedLoad,
        "failed to fetch feed: HTTP 401: Authentication credentials were not provided.",
    );
    assert_eq!(auth.category(), UiErrorCategory::Auth);
    assert!(auth.requires_reauth());
    assert_eq!(auth.context(), UiErrorContext::FeedLoad);

    let rejected = UiError::from_message(
        UiErrorContext::SubmitDecision,
        "failed to submit swipe: HTTP 400: Event is not available for swiping.",
    );
    assert_eq!(rejected.category(), UiErrorCategory::Validation);
    assert!(!rejected.requires_reauth());

    let offline = UiError::from_message(
        UiErrorContext::FeedLoad,
        "failed to fetch feed: error sending request: connection refused",
    );
    assert_eq!(offline.category(), UiErrorCategory::Transport);

    let odd = UiError::from_message(UiErrorContext::FeedLoad, "something odd");
    assert_eq!(odd.category(), UiErrorCategory::Unknown);
}

#[test]
fn displays_raw_message() {
    let err = UiError::from_message(UiErrorContext::FeedLoad, "HTTP 500: boom");
    assert_eq!(err.to_string(), "HTTP 500: boom");
    assert_eq!(err.message(), "HTTP 500: boom");
}
