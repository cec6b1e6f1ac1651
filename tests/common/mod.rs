#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use satellite_lib::{ClientOptions, HostError, HostResult, IpcHost, IpcTransport, SessionOrchestrator};

/// Host process stand-in: canned JSON answers per command, plus a log of
/// every `(command, args)` received.
#[derive(Default, Clone)]
pub struct ScriptedTransport {
    inner: Arc<Mutex<Script>>,
}

#[derive(Default)]
struct Script {
    responses: HashMap<String, Value>,
    failing: HashSet<String>,
    calls: Vec<(String, Value)>,
}

impl ScriptedTransport {
    pub fn respond(&self, command: &str, value: Value) {
        self.inner.lock().responses.insert(command.to_string(), value);
    }

    pub fn fail(&self, command: &str) {
        self.inner.lock().failing.insert(command.to_string());
    }

    pub fn recover(&self, command: &str) {
        self.inner.lock().failing.remove(command);
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.inner.lock().calls.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }

    pub fn count(&self, command: &str) -> usize {
        self.commands().iter().filter(|c| *c == command).count()
    }
}

#[async_trait]
impl IpcTransport for ScriptedTransport {
    async fn invoke(&self, command: &str, args: Value) -> HostResult<Value> {
        let mut script = self.inner.lock();
        script.calls.push((command.to_string(), args));
        if script.failing.contains(command) {
            return Err(HostError::Rejected(format!("{command} rejected by host")));
        }
        Ok(script.responses.get(command).cloned().unwrap_or(Value::Null))
    }
}

pub fn host_config() -> Value {
    json!({
        "player_name": "Steve",
        "game_directory": "/home/steve/.minecraft",
        "java_executable": "java",
        "jvm_args": ["-XX:+UseG1GC"],
        "min_memory": 1024,
        "max_memory": 4096,
        "theme": "dark",
        "concurrent_downloads": 8
    })
}

pub fn versions() -> Value {
    json!([
        { "id": "1.20.4", "type": "release", "url": "https://piston-meta.mojang.com/1.20.4.json" },
        { "id": "24w14a", "type": "snapshot", "url": "https://piston-meta.mojang.com/24w14a.json" },
        { "id": "1.20.1", "type": "release", "url": "https://piston-meta.mojang.com/1.20.1.json" }
    ])
}

pub fn installed_mod(id: &str, enabled: bool) -> Value {
    json!({
        "id": id,
        "name": id,
        "version": "1.0.0",
        "minecraft_version": "1.20.1",
        "mod_loader": "Fabric",
        "file_name": format!("{id}.jar"),
        "file_size": 1536,
        "enabled": enabled,
        "source": "Local"
    })
}

/// A transport preloaded with a valid configuration and catalog.
pub fn scripted() -> ScriptedTransport {
    let transport = ScriptedTransport::default();
    transport.respond("get_config", host_config());
    transport.respond("get_versions", versions());
    transport
}

pub fn session(transport: &ScriptedTransport) -> SessionOrchestrator {
    SessionOrchestrator::new(
        Arc::new(IpcHost::new(transport.clone())),
        ClientOptions::default(),
    )
}
