mod cli {
    pub mod commands;
}
mod core {
    pub mod aggregator;
    pub mod matcher;
}
mod domain {
    pub mod models;
}
mod infra {
    pub mod file_system;
    pub mod logger;
    pub mod output;
}

use cli::commands::run;

fn main() -> anyhow::Result<()> {
    run()
}
