use std::future::Future;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use crate::error::{AppError, AppResult};

const HEADER_END: &[u8] = b"\r\n\r\n";

pub(crate) fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

/// Builds a raw HTTP/1.1 response with a JSON or text body.
pub(crate) fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

/// Throwaway HTTP server answering every connection with the same bytes.
pub(crate) struct CannedServer {
    pub(crate) url: String,
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<String>>>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl CannedServer {
    pub(crate) fn spawn(response: String, delay: Duration) -> AppResult<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        listener.set_nonblocking(true)?;

        let hits = Arc::new(AtomicUsize::new(0));
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel();
        let response = Arc::new(response);

        let thread_hits = Arc::clone(&hits);
        let thread_bodies = Arc::clone(&bodies);
        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        thread_hits.fetch_add(1, Ordering::SeqCst);
                        let response = Arc::clone(&response);
                        let bodies = Arc::clone(&thread_bodies);
                        thread::spawn(move || handle_client(stream, &response, delay, &bodies));
                    }
                    Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            url: format!("http://{}/", addr),
            hits,
            bodies,
            shutdown: shutdown_tx,
            thread: Some(handle),
        })
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub(crate) fn bodies(&self) -> Vec<String> {
        match self.bodies.lock() {
            Ok(bodies) => bodies.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Drop for CannedServer {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

fn handle_client(
    mut stream: TcpStream,
    response: &str,
    delay: Duration,
    bodies: &Mutex<Vec<String>>,
) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let Some(body) = read_request_body(&mut stream) else {
        return;
    };
    if let Ok(mut guard) = bodies.lock() {
        guard.push(body);
    }
    thread::sleep(delay);
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    drop(stream.flush());
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request_body(stream: &mut TcpStream) -> Option<String> {
    let mut request = Vec::new();
    let mut buffer = [0u8; 1024];
    let header_len = loop {
        if let Some(pos) = find_header_end(&request) {
            break pos;
        }
        let read = stream.read(&mut buffer).ok()?;
        if read == 0 {
            return None;
        }
        request.extend_from_slice(buffer.get(..read)?);
    };

    let headers = String::from_utf8_lossy(request.get(..header_len)?).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let body_start = header_len.saturating_add(HEADER_END.len());
    while request.len() < body_start.saturating_add(content_length) {
        let read = stream.read(&mut buffer).ok()?;
        if read == 0 {
            break;
        }
        request.extend_from_slice(buffer.get(..read)?);
    }
    let body = request.get(body_start..).unwrap_or_default();
    Some(String::from_utf8_lossy(body).into_owned())
}

fn find_header_end(request: &[u8]) -> Option<usize> {
    request
        .windows(HEADER_END.len())
        .position(|window| window == HEADER_END)
}

/// Address with nothing listening on it.
pub(crate) fn refused_url() -> AppResult<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}
