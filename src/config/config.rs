use clap::Args;

pub const DEFAULT_DOCKER_BIN: &str = "docker";
pub const DEFAULT_DEV_COMPOSE_FILE: &str = "docker-compose.dev.yml";
pub const DEFAULT_PROD_COMPOSE_FILE: &str = "docker-compose.yml";
pub const ELEVATION_PROGRAM: &str = "sudo";

#[derive(Args, Clone, Debug, PartialEq)]
pub struct StackConfig {
    /// Container runtime binary used for the probe and every compose call
    #[arg(long, default_value = DEFAULT_DOCKER_BIN)]
    pub docker_bin: String,

    /// Compose file for the dev and dev-clean sequences
    #[arg(long, default_value = DEFAULT_DEV_COMPOSE_FILE)]
    pub dev_file: String,

    /// Compose file for the prod sequence
    #[arg(long, default_value = DEFAULT_PROD_COMPOSE_FILE)]
    pub prod_file: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        StackConfig {
            docker_bin: DEFAULT_DOCKER_BIN.to_string(),
            dev_file: DEFAULT_DEV_COMPOSE_FILE.to_string(),
            prod_file: DEFAULT_PROD_COMPOSE_FILE.to_string(),
        }
    }
}
