//! Listener lifecycle for the generated API server.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

use may::coroutine::JoinHandle;
use may_minihttp::HttpService;
use tracing::debug;

const READY_ATTEMPTS: u32 = 50;
const READY_INTERVAL: Duration = Duration::from_millis(5);

/// An `HttpService` ready to be bound to an address.
pub struct HttpServer<T>(pub T);

/// Running listener: its concrete address and the accept coroutine.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

/// Resolve `addr` and pin an ephemeral port to a concrete one.
///
/// `may_minihttp` does not expose the bound socket, so a requested port 0 is
/// resolved by briefly binding a std listener and reusing the port it got.
fn concrete_addr<A: ToSocketAddrs>(addr: A) -> io::Result<SocketAddr> {
    let mut addr = addr
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing"))?;
    if addr.port() == 0 {
        let port = TcpListener::bind(addr)?.local_addr()?.port();
        addr.set_port(port);
    }
    Ok(addr)
}

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Bind `addr` and start accepting connections.
    ///
    /// # Errors
    ///
    /// Fails when the address does not resolve or cannot be bound.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = concrete_addr(addr)?;
        let handle = may_minihttp::HttpServer(self.0).start(addr)?;
        debug!(%addr, "Listener started");
        Ok(ServerHandle { addr, handle })
    }
}

impl ServerHandle {
    /// Address the listener is bound to; never carries port 0.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Address a local client can dial: wildcard binds map to loopback.
    fn dial_addr(&self) -> SocketAddr {
        let mut addr = self.addr;
        match addr.ip() {
            ip if !ip.is_unspecified() => {}
            ip if ip.is_ipv4() => addr.set_ip(Ipv4Addr::LOCALHOST.into()),
            _ => addr.set_ip(Ipv6Addr::LOCALHOST.into()),
        }
        addr
    }

    /// Poll the listener with TCP connects until it accepts one.
    ///
    /// # Errors
    ///
    /// `TimedOut` when no connect succeeds within about 250ms.
    pub fn wait_ready(&self) -> io::Result<()> {
        let target = self.dial_addr();
        for _ in 0..READY_ATTEMPTS {
            if TcpStream::connect(target).is_ok() {
                return Ok(());
            }
            thread::sleep(READY_INTERVAL);
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "listener not accepting"))
    }

    /// Cancel the accept coroutine and wait for it to unwind.
    pub fn stop(self) {
        // SAFETY: the coroutine is owned by this handle and joined right after.
        #[allow(unsafe_code)]
        unsafe {
            self.handle.coroutine().cancel();
        }
        if self.handle.join().is_err() {
            debug!(addr = %self.addr, "Listener ended by cancellation");
        }
    }

    /// Block until the accept coroutine finishes.
    ///
    /// # Errors
    ///
    /// Returns the panic payload if the coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}
