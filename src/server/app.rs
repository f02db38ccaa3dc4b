use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use arc_swap::ArcSwap;
use http::Method;
use tracing::{debug, info};

use super::http_server::{HttpServer, ServerHandle};
use super::service::AppService;
use crate::dispatcher::Dispatcher;
use crate::error::ConfigError;
use crate::middleware::{CorsMiddleware, Middleware, TracingMiddleware};
use crate::router::{RouteEntry, Router};
use crate::runtime_config::RuntimeConfig;
use crate::spec::HttpMethod;
use crate::typed::{Contract, EndpointDescriptor};

/// Hook run to completion before the listener is bound.
pub type BeforeStart = Box<dyn FnOnce() -> anyhow::Result<()> + Send>;

/// Startup parameters of a generated server.
#[derive(Default)]
pub struct SystemParam {
    /// Listening port; falls back to `PORT`, then 3000.
    pub port: Option<u16>,
    pub before_start: Option<BeforeStart>,
}

impl SystemParam {
    #[must_use]
    pub fn with_port(port: u16) -> Self {
        Self {
            port: Some(port),
            before_start: None,
        }
    }

    #[must_use]
    pub fn before_start<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<()> + Send + 'static,
    {
        self.before_start = Some(Box::new(hook));
        self
    }
}

/// Split an endpoint key into a supported method and its path.
pub(crate) fn parse_endpoint(endpoint: &str) -> Result<(Method, &str), ConfigError> {
    let (method, path) = endpoint
        .trim()
        .split_once(' ')
        .ok_or_else(|| ConfigError::MalformedEndpoint(endpoint.to_string()))?;
    let path = path.trim();
    if !path.starts_with('/') {
        return Err(ConfigError::MalformedEndpoint(endpoint.to_string()));
    }
    let method = method
        .parse::<HttpMethod>()
        .map_err(|_| ConfigError::UnsupportedMethod {
            method: method.to_ascii_lowercase(),
            path: path.to_string(),
        })?;
    Ok((method.to_http(), path))
}

/// Runtime behind every generated `AbstractApi`.
///
/// `init` binds the listener; `implement` publishes routes and handlers
/// through `ArcSwap`, so requests never take a lock.
pub struct App {
    router: Arc<ArcSwap<Router>>,
    dispatcher: Arc<ArcSwap<Dispatcher>>,
    config: RuntimeConfig,
    server: Option<ServerHandle>,
    builtins_installed: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// App configured from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::from_env())
    }

    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            router: Arc::new(ArcSwap::from_pointee(Router::new())),
            dispatcher: Arc::new(ArcSwap::from_pointee(Dispatcher::new())),
            config,
            server: None,
            builtins_installed: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Run the `before_start` hook, then bind and start serving.
    ///
    /// The first successful call installs permissive CORS and request tracing
    /// ahead of any middleware added later; re-initializing after `stop`
    /// keeps them as they are.
    ///
    /// # Errors
    ///
    /// `AlreadyInitialized` on a second call, `BeforeStart` when the hook
    /// fails (nothing is bound), `Bind` when the listener cannot be opened.
    pub fn init(&mut self, param: SystemParam) -> Result<(), ConfigError> {
        if self.server.is_some() {
            return Err(ConfigError::AlreadyInitialized);
        }
        if let Some(hook) = param.before_start {
            debug!("Running before_start hook");
            hook().map_err(|e| ConfigError::BeforeStart(format!("{e:#}")))?;
        }

        let port = param.port.unwrap_or(self.config.port);
        let addr = format!("{}:{}", self.config.host, port);
        may::config().set_stack_size(self.config.stack_size);

        let previous = self.dispatcher.load_full();
        if !self.builtins_installed {
            let mut dispatcher = Dispatcher::clone(&previous);
            dispatcher.middlewares.insert(0, Arc::new(TracingMiddleware));
            dispatcher.middlewares.insert(0, Arc::new(CorsMiddleware::permissive()));
            self.dispatcher.store(Arc::new(dispatcher));
        }

        let service = AppService::new(
            Arc::clone(&self.router),
            Arc::clone(&self.dispatcher),
            self.config.body_limit,
        );
        let handle = match HttpServer(service).start(addr.as_str()) {
            Ok(handle) => handle,
            Err(source) => {
                self.dispatcher.store(previous);
                return Err(ConfigError::Bind { addr, source });
            }
        };
        info!(
            addr = %handle.addr(),
            body_limit = self.config.body_limit,
            stack_size = self.config.stack_size,
            "⚡️ Server is running"
        );
        self.server = Some(handle);
        self.builtins_installed = true;
        Ok(())
    }

    /// Register the handler of a contract under its method and path.
    ///
    /// A second registration for the same method and path replaces the first.
    ///
    /// # Errors
    ///
    /// `NotInitialized` before `init`, `UnsupportedMethod` or
    /// `MalformedEndpoint` for an endpoint key the server cannot route.
    pub fn implement<C: Contract>(&self, descriptor: EndpointDescriptor<C>) -> Result<(), ConfigError> {
        if self.server.is_none() {
            return Err(ConfigError::NotInitialized);
        }
        let (method, path) = parse_endpoint(C::ENDPOINT)?;
        let route = RouteEntry::new(method, path);
        let key = route.endpoint.to_string();
        let handler = descriptor.into_handler();

        self.dispatcher.rcu(|current| {
            let mut next = Dispatcher::clone(current);
            next.add_route(&key, Arc::clone(&handler));
            next
        });
        self.router.rcu(|current| {
            let mut next = Router::clone(current);
            next.insert(route.clone());
            next
        });
        info!(endpoint = %key, "Endpoint implemented");
        Ok(())
    }

    /// Append a middleware after the built-in ones.
    pub fn add_middleware(&self, mw: Arc<dyn Middleware>) {
        self.dispatcher.rcu(|current| {
            let mut next = Dispatcher::clone(current);
            next.add_middleware(Arc::clone(&mw));
            next
        });
    }

    /// Bound address, once initialized.
    #[must_use]
    pub fn addr(&self) -> Option<SocketAddr> {
        self.server.as_ref().map(ServerHandle::addr)
    }

    /// Block until the listener accepts connections.
    ///
    /// # Errors
    ///
    /// `NotConnected` before `init`, `TimedOut` if the listener never answers.
    pub fn wait_ready(&self) -> io::Result<()> {
        match &self.server {
            Some(handle) => handle.wait_ready(),
            None => Err(io::Error::new(io::ErrorKind::NotConnected, "server not initialized")),
        }
    }

    /// Stop serving. The app can be initialized again afterwards.
    pub fn stop(&mut self) {
        if let Some(handle) = self.server.take() {
            info!(addr = %handle.addr(), "Stopping server");
            handle.stop();
        }
    }

    /// Block until the server stops.
    ///
    /// # Errors
    ///
    /// Returns an error if the server coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        match self.server {
            Some(handle) => handle.join(),
            None => Ok(()),
        }
    }
}
