pub mod toml_config;

pub use toml_config::ExchangeConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "secret-santa")]
#[command(about = "Draw Secret Santa pairs and notify every giver")]
pub struct CliConfig {
    /// Path to the TOML exchange file
    #[arg(short, long, default_value = "secret-santa.toml")]
    pub config: String,

    /// Extra participants from a CSV file with name,email columns
    #[arg(long)]
    pub participants: Option<String>,

    /// Language tag for notifications (en, es)
    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub budget: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Directory where notification files are written
    #[arg(long)]
    pub outbox: Option<String>,

    /// Fixed RNG seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// Draw assignments without sending anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as the JSON API response
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆蓋設定檔
    pub fn apply_overrides(&self, config: &mut ExchangeConfig) {
        if let Some(language) = &self.language {
            config.exchange.language = Some(language.clone());
        }
        if let Some(budget) = &self.budget {
            config.exchange.budget = Some(budget.clone());
        }
        if let Some(notes) = &self.notes {
            config.exchange.notes = Some(notes.clone());
        }
        if let Some(outbox) = &self.outbox {
            config.mail.outbox_dir = Some(outbox.clone());
        }
        if self.seed.is_some() {
            config.exchange.seed = self.seed;
        }
    }
}
