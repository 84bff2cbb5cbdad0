//! HTTP server hosting a router entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::signal;
use log::{info, warn, error};

use crate::parser::{body_offset, declared_content_length, parse_request};
use crate::router::HandlerFn;
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::response::{HttpResponse, StatusCode};

/// An HTTP server that passes every parsed request to a single handler,
/// usually the one returned by [`Router::into_handler`](crate::Router::into_handler).
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The entry point called once per request.
    pub entry: HandlerFn,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and entry point.
    pub fn new(config: ServerConfig, entry: HandlerFn) -> Self {
        Self { config, entry }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Hand an accepted connection to its own task, or answer 503 when the
    /// connection limit is reached.
    pub(crate) async fn handle_new_connection<S>(
        mut socket: S,
        addr: SocketAddr,
        semaphore: Arc<Semaphore>,
        entry: HandlerFn,
        config: &ServerConfig,
        tasks: &mut JoinSet<()>,
    ) where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::text(
                    StatusCode::ServiceUnavailable,
                    "Server is at capacity, please try again later",
                );
                let _ = socket.write_all(&response.to_bytes()).await;
                return;
            }
        };

        let read_buffer_size = config.read_buffer_size;
        let max_request_size = config.max_request_size;
        tasks.spawn(async move {
            // Released when the connection task finishes.
            let _permit = permit;

            if let Err(e) = Self::handle_connection(&mut socket, &entry, read_buffer_size, max_request_size).await {
                error!("Error handling connection from {addr}: {e}");
            }
        });
    }

    /// Collect connection tasks that have already finished, without waiting.
    pub(crate) fn reap_finished(tasks: &mut JoinSet<()>) -> usize {
        let mut reaped = 0;
        while let Some(res) = tasks.try_join_next() {
            if let Err(e) = res {
                error!("Connection task failed: {e}");
            }
            reaped += 1;
        }
        reaped
    }

    /// Returns true when the accept loop should stop.
    async fn handle_accept_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Wait (bounded) for in-flight connections to finish.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let drained = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!("Shutdown timed out with {len} connections still open", len = tasks.len());
        }
        info!("Server shutdown complete");
    }

    /// Start the server and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.setup_listener().await?;

        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let mut tasks = JoinSet::new();

        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut ctrl_c_armed = true;

        loop {
            tokio::select! {
                res = &mut ctrl_c, if ctrl_c_armed => {
                    match res {
                        Ok(()) => {
                            info!("Received Ctrl+C, shutting down server...");
                            break;
                        }
                        Err(e) => {
                            error!("Error setting up Ctrl+C handler: {e}");
                            ctrl_c_armed = false;
                        }
                    }
                }

                Some(res) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = res {
                        error!("Connection task failed: {e}");
                    }
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                self.entry.clone(),
                                &self.config,
                                &mut tasks,
                            ).await;
                            Self::reap_finished(&mut tasks);
                        }
                        Err(e) => {
                            if Self::handle_accept_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Read one request: the head, then as much body as `Content-Length`
    /// declares. Stops early at end of stream.
    async fn read_request(
        socket: &mut (impl AsyncRead + Unpin),
        read_buffer_size: usize,
        max_request_size: usize,
    ) -> Result<Vec<u8>, Error> {
        let mut request = Vec::new();
        let mut chunk = vec![0; read_buffer_size.max(1)];

        loop {
            let n = socket.read(&mut chunk).await?;
            if n == 0 {
                return Ok(request);
            }
            request.extend_from_slice(&chunk[..n]);
            if request.len() > max_request_size {
                return Err(Error::RequestTooLarge(max_request_size));
            }

            if let Some(offset) = body_offset(&request) {
                let expected = offset.saturating_add(declared_content_length(&request[..offset]));
                if expected > max_request_size {
                    return Err(Error::RequestTooLarge(max_request_size));
                }
                if request.len() >= expected {
                    return Ok(request);
                }
            }
        }
    }

    /// Serve a single request on `socket`.
    ///
    /// Requests larger than `max_request_size` get `413 Payload Too Large`.
    /// Unparseable requests get `400 Bad Request`. A handler error is written
    /// out as `500 Internal Server Error` and returned to the caller.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        entry: &HandlerFn,
        read_buffer_size: usize,
        max_request_size: usize,
    ) -> Result<(), Error> {
        let raw = match Self::read_request(socket, read_buffer_size, max_request_size).await {
            Ok(raw) => raw,
            Err(Error::RequestTooLarge(limit)) => {
                let response = HttpResponse::text(StatusCode::PayloadTooLarge, format!("Request exceeds {limit} bytes"));
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::RequestTooLarge(limit));
            }
            Err(e) => return Err(e),
        };
        if raw.is_empty() {
            return Ok(()); // Connection closed
        }

        let request = match parse_request(&raw) {
            Ok(req) => req,
            Err(e) => {
                let response = HttpResponse::text(StatusCode::BadRequest, format!("Error parsing request: {e}"));
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::ParseError(e));
            }
        };

        match entry(request).await {
            Ok(response) => {
                socket.write_all(&response.to_bytes()).await?;
                Ok(())
            }
            Err(e) => {
                let response = HttpResponse::text(StatusCode::InternalServerError, format!("Internal server error: {e}"));
                socket.write_all(&response.to_bytes()).await?;
                Err(e)
            }
        }
    }
}
