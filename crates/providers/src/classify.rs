//! Failure classification shared by both adapters.

use frontdesk_core::ProviderError;

/// Substrings that mark an upstream outage rather than a request problem.
/// Matched case-insensitively against the response body.
const UNAVAILABLE_MARKERS: &[&str] =
    &["service unavailable", "upstream connect error", "econnrefused", "try again later"];

/// Folds a non-success HTTP response into a `ProviderError`. Gateway-class
/// statuses and known outage markers become `Unavailable`; everything else
/// keeps its status and body as a rejection.
pub(crate) fn classify_failure(status: u16, body: &str) -> ProviderError {
    let message = normalized_message(body, status);

    let gateway_outage = matches!(status, 502 | 503 | 504);
    let body_lower = body.to_ascii_lowercase();
    let marker_outage = UNAVAILABLE_MARKERS.iter().any(|marker| body_lower.contains(marker));

    if gateway_outage || marker_outage {
        ProviderError::Unavailable { message }
    } else {
        ProviderError::Rejected { status, message }
    }
}

pub(crate) fn transport_failure(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        return ProviderError::Transport(format!("request timed out: {error}"));
    }
    ProviderError::Transport(error.to_string())
}

fn normalized_message(body: &str, status: u16) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP {status} with empty body");
    }
    // Responses can be large HTML error pages; keep logs and messages sane.
    const MAX_MESSAGE_LEN: usize = 300;
    if trimmed.len() > MAX_MESSAGE_LEN {
        let mut end = MAX_MESSAGE_LEN;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        return format!("{}…", &trimmed[..end]);
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use frontdesk_core::ProviderError;

    use super::classify_failure;

    #[test]
    fn gateway_statuses_become_unavailable() {
        for status in [502, 503, 504] {
            let error = classify_failure(status, "bad gateway");
            assert!(error.is_unavailable(), "status {status} should classify as unavailable");
        }
    }

    #[test]
    fn outage_marker_in_body_beats_a_regular_status() {
        let error = classify_failure(500, "upstream connect error or disconnect before headers");
        assert!(error.is_unavailable());
        assert!(error.to_string().contains("retry"));
    }

    #[test]
    fn plain_client_error_keeps_status_and_body() {
        let error = classify_failure(422, "name is required");
        match error {
            ProviderError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "name is required");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn empty_body_is_replaced_with_a_status_note() {
        let error = classify_failure(400, "   ");
        assert!(error.to_string().contains("HTTP 400"));
    }

    #[test]
    fn oversized_bodies_are_truncated() {
        let body = "x".repeat(5_000);
        let error = classify_failure(418, &body);
        assert!(error.to_string().len() < 500);
    }
}
