use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::{HttpResponse, Request};
use crate::routing::Router;

pub struct Server {
    router: Arc<Router>,
    host: String,
    port: u16,
}

impl Server {
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }

    /// Build a server with host/port from the environment
    pub fn from_config(router: Router) -> Self {
        let config = ServerConfig::from_env();
        Self {
            router: Arc::new(router),
            host: config.host,
            port: config.port,
        }
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    fn addr(&self) -> Result<SocketAddr, Box<dyn std::error::Error + Send + Sync>> {
        let ip = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Bind the configured address and serve until the process exits
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve_on(listener).await
    }

    /// Serve connections from an already-bound listener
    ///
    /// Tests bind their own listener on port 0 and pass it in here, so the
    /// kernel-assigned address stays visible to the caller.
    pub async fn serve_on(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("todo server listening on http://{}", listener.local_addr()?);

        let router = self.router;

        loop {
            let (stream, _) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let router = router.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                    let router = router.clone();
                    async move { Ok::<_, Infallible>(handle_request(router, req).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::warn!("error serving connection: {:?}", err);
                }
            });
        }
    }
}

async fn handle_request(
    router: Arc<Router>,
    req: hyper::Request<hyper::body::Incoming>,
) -> hyper::Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match router.match_route(&method, &path) {
        Some((handler, params)) => {
            let request = Request::new(req).with_params(params);
            // Both arms of Response carry an HttpResponse
            handler(request).await.unwrap_or_else(|e| e)
        }
        None => HttpResponse::json(serde_json::json!({"error": "Not Found"})).status(404),
    };

    tracing::info!("{} {} -> {}", method, path, response.status_code());
    response.into_hyper()
}
