use std::path::PathBuf;

use petfriends_core::{Config, Credentials};

/// Start the mock server on a random port and return its base URL.
pub fn spawn_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

pub fn images_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../images")
}

/// Config pointing at a fresh mock server with its demo account.
pub fn mock_config() -> Config {
    let base_url = spawn_mock_server();
    Config::new(
        base_url,
        Credentials::new(mock_server::DEMO_EMAIL, mock_server::DEMO_PASSWORD),
    )
    .with_images_dir(images_dir())
}
