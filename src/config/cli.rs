use crate::config::toml_config::TomlConfig;
use crate::config::ServerConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "civic-ml-backend")]
#[command(about = "HTTP image classification service")]
pub struct CliArgs {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Address to bind [default: 0.0.0.0]")]
    pub host: Option<String>,

    #[arg(short, long, help = "Port to listen on [default: 8000]")]
    pub port: Option<u16>,

    /// ONNX model file [default: models/garbage_model.onnx]
    #[arg(long)]
    pub model_path: Option<String>,

    /// JSON array of class names [default: models/class_names.json]
    #[arg(long)]
    pub labels_path: Option<String>,

    /// Square input resolution the model was trained on [default: 224]
    #[arg(long)]
    pub image_size: Option<u32>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Log process CPU and memory usage")]
    pub monitor: bool,
}

impl CliArgs {
    /// 合併預設值、設定檔與命令列參數 (命令列優先)
    pub fn resolve(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::default();

        if let Some(path) = &self.config {
            config = config.apply_file(&TomlConfig::from_file(path)?);
        }

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(model_path) = &self.model_path {
            config.model_path = model_path.clone();
        }
        if let Some(labels_path) = &self.labels_path {
            config.labels_path = labels_path.clone();
        }
        if let Some(image_size) = self.image_size {
            config.image_size = image_size;
        }
        config.verbose |= self.verbose;
        config.json_logs |= self.json_logs;
        config.monitor |= self.monitor;

        Ok(config)
    }
}
