use http::Request;
use hyper::service::Service;
use hyper_blobserve::{Gateway, MemoryStore};

// This test currently only demonstrates that a `Gateway` instance can be
// used as a hyper service directly.
#[tokio::test]
async fn test_usable_as_hyper_service() {
    fn assert_service<B, S: Service<Request<B>>>(_: &S) {}

    let gateway = Gateway::new(MemoryStore::new());
    assert_service::<String, _>(&gateway);

    // It's enough to show that this builds, so no need to execute anything.
    drop(gateway);
}
