use futures_util::StreamExt;
use reqwest::Response;

use super::AttemptOutcome;

pub(super) fn classify_error(err: &reqwest::Error) -> AttemptOutcome {
    if err.is_timeout() {
        AttemptOutcome::TimedOut
    } else {
        AttemptOutcome::Failed {
            status: err.status().map(|status| status.as_u16()),
            error: err.to_string(),
        }
    }
}

/// Turns a response into an outcome, reading the whole body first so the
/// measured latency covers completion rather than header arrival.
pub(super) async fn complete_response(response: Response) -> AttemptOutcome {
    let status = response.status().as_u16();
    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(err) => return classify_error(&err),
    };
    match drain_response_body(response).await {
        Ok(_) => AttemptOutcome::Success { status },
        Err(err) => classify_error(&err),
    }
}

async fn drain_response_body(response: Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
