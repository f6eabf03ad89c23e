use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;

/// Capacity of the relay command queue shared by all connections.
pub const DEFAULT_COMMAND_BUFFER: usize = 100;

/// Largest inbound WebSocket frame; session descriptions stay well below this.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub command_buffer: usize,
    pub max_message_size: usize,
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    pub fn with_command_buffer(mut self, command_buffer: usize) -> Self {
        self.command_buffer = command_buffer.max(1);
        self
    }

    pub fn with_max_message_size(mut self, max_message_size: usize) -> Self {
        self.max_message_size = max_message_size;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            command_buffer: DEFAULT_COMMAND_BUFFER,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}
