//! HTTP server, dispatch and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server stops accepting immediately, lets every
//! in-flight relay request finish (each is one outbound GET, so the drain is
//! bounded by the slowest upstream), and then returns from
//! [`Server::serve`] so `main` exits cleanly.

use std::net::SocketAddr;
use std::sync::Arc;

use http::{Method, StatusCode};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// # Errors
    ///
    /// [`Error::Addr`] if `addr` is not a valid `host:port` string.
    pub fn bind(addr: &str) -> Result<Self, Error> {
        Ok(Self { addr: addr.parse()? })
    }

    /// Accepts connections and dispatches them through `router`. Returns
    /// only after a full graceful shutdown.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;

        // Shared across concurrent connection tasks without copying the table.
        let router = Arc::new(router);

        info!(addr = %self.addr, "wxrelay listening");

        // Tracks every spawned connection task so shutdown can drain them.
        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check shutdown first so a SIGTERM stops accepting even if
                // more connections are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(router, req).await }
                        });

                        // Serves whichever of HTTP/1.1 or HTTP/2 the client
                        // negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished tasks so the set does not grow without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("wxrelay stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Hyper glue: unwraps the hyper request, runs [`respond`], converts back.
/// The error type is `Infallible` — every failure becomes a response.
async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<http_body_util::Full<bytes::Bytes>>, std::convert::Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    Ok(respond(&router, method, path).await.into_http())
}

/// Routes one request and produces one response.
///
/// Public so the routing table is exercisable in tests without a socket or
/// a live upstream. An unmatched path or method is a 404 with an empty body.
pub async fn respond(router: &Router, method: Method, path: String) -> Response {
    match router.lookup(&method, &path) {
        Some(handler) => {
            let req = Request::new(method, path);
            debug!(method = %req.method(), path = req.path(), "dispatching");
            handler.call(req).await
        }
        None => Response::status(StatusCode::NOT_FOUND),
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal: SIGTERM or SIGINT on Unix, Ctrl-C
/// elsewhere.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    // Never resolves, so only the Ctrl-C arm is live off Unix.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
