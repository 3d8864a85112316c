// Adapters layer: concrete implementations for external systems (model runtime, http).

pub mod http;
pub mod onnx;
pub mod server;
