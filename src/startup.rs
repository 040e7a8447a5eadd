use std::io;

use poem::listener::{Acceptor, Listener, TcpAcceptor, TcpListener};
use poem::{Route, Server};
use tracing::info;

use crate::configuration::Configuration;
use crate::routes::default_route;

pub struct Application {
    port: u16,
    acceptor: TcpAcceptor,
    route: Route,
}

impl Application {
    /// Binds the listener up front so the port is known (and reachable)
    /// before the server starts polling.
    pub async fn build(conf: &Configuration) -> io::Result<Self> {
        let acceptor = TcpListener::bind(conf.address()).into_acceptor().await?;
        let port = acceptor
            .local_addr()
            .first()
            .and_then(|addr| addr.0.as_socket_addr().map(|addr| addr.port()))
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "listener has no socket address"))?;
        info!(address = conf.address(), port, "listening");

        let mut bound = conf.clone();
        bound.app.port = port;
        Ok(Self {
            port,
            acceptor,
            route: default_route(&bound),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> io::Result<()> {
        Server::new_with_acceptor(self.acceptor).run(self.route).await
    }
}
