use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Mutex;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::server::api::ApiError;
use crate::storage::{JsonFileStore, KeyValueStore};
use crate::tier::TierEngine;

pub mod api;
pub mod routes;

pub type SharedEngine = TierEngine<Box<dyn KeyValueStore + Send>>;

/// One engine per server process, standing in for the single browser session.
pub struct AppState {
    engine: Mutex<SharedEngine>,
    debug_tools: bool,
}

impl AppState {
    pub fn new(store: Box<dyn KeyValueStore + Send>, debug_tools: bool) -> Self {
        Self {
            engine: Mutex::new(TierEngine::load(store)),
            debug_tools,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Box::new(JsonFileStore::new(&config.store_path)),
            config.debug_tools,
        )
    }

    pub fn debug_tools(&self) -> bool {
        self.debug_tools
    }

    pub fn with_engine<T>(&self, f: impl FnOnce(&mut SharedEngine) -> T) -> Result<T, ApiError> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|e| ApiError::Internal(format!("engine lock poisoned: {e}")))?;
        Ok(f(&mut *engine))
    }
}

pub fn run_server(config: &AppConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(&config.bind_addr)?;
    let state = AppState::from_config(config);
    info!(
        store = %config.store_path,
        debug_tools = config.debug_tools,
        "rescuebag server listening on http://{}",
        config.bind_addr
    );

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&state, &mut stream) {
                    warn!("request error: {err}");
                }
            }
            Err(err) => warn!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(state: &AppState, stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buffer = [0_u8; 16_384];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let body = request
        .split("\r\n\r\n")
        .nth(1)
        .or_else(|| request.split("\n\n").nth(1))
        .unwrap_or("");

    let response = routes::route_request(state, method, path, body);
    info!(method, path, status = response.status_code, "handled request");
    stream.write_all(response.to_http_string().as_bytes())?;
    stream.flush()?;
    Ok(())
}
