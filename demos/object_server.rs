// This example serves files below ./public/ as blob store objects.
//
// Run `cargo run --example object_server`, then fetch
// http://localhost:3000/<key>. Set FORCE_PREVIEW_TYPES or
// FORCE_DOWNLOAD_TYPES to comma-separated MIME fragments to override the
// disposition rules, and RUST_LOG=debug to watch requests resolve.

use std::env;
use std::net::SocketAddr;

use hyper::server::conn::http1;
use hyper_blobserve::{DispositionOverrides, Gateway};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let preview = env::var("FORCE_PREVIEW_TYPES").ok();
    let download = env::var("FORCE_DOWNLOAD_TYPES").ok();

    let mut gateway = Gateway::from_dir("public/");
    gateway.overrides(DispositionOverrides::from_lists(
        preview.as_deref(),
        download.as_deref(),
    ));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = TcpListener::bind(addr).await.expect("failed to bind");
    println!("Object server running on http://{}/", addr);

    loop {
        let (stream, _) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                eprintln!("accept error: {}", err);
                continue;
            }
        };
        let gateway = gateway.clone();
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            if let Err(err) = http1::Builder::new().serve_connection(io, gateway).await {
                eprintln!("connection error: {}", err);
            }
        });
    }
}
