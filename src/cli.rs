use crate::models::PlanTier;

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum LabelsArg {
    Short,
    Long,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanTierArg {
    Pro,
    Max5x,
    Max20x,
}

impl From<PlanTierArg> for PlanTier {
    fn from(t: PlanTierArg) -> Self {
        match t {
            PlanTierArg::Pro => PlanTier::Pro,
            PlanTierArg::Max5x => PlanTier::Max5x,
            PlanTierArg::Max20x => PlanTier::Max20x,
        }
    }
}

#[derive(clap::Parser, Debug)]
#[command(about = "Daily and weekly token usage against your plan quota")]
pub struct Args {
    /// Force Claude data path(s), comma-separated. Defaults to ~/.claude and ~/.config/claude
    #[arg(long, env = "CLAUDE_CONFIG_DIR")]
    pub claude_config_dir: Option<String>,

    /// Emit JSON instead of a text line
    #[arg(long)]
    pub json: bool,

    /// Label verbosity for text output: short|long
    #[arg(long, value_enum, default_value_t = LabelsArg::Short)]
    pub labels: LabelsArg,

    /// Plan tier: pro|max5x|max20x (overrides env and settings)
    #[arg(long = "plan", value_enum)]
    pub plan_tier: Option<PlanTierArg>,

    /// Daily token limit (overrides tier, env and settings)
    #[arg(long)]
    pub daily_token_limit: Option<u64>,

    /// Debug mode: log scan statistics to stderr
    #[arg(long, env = "CLAUDE_DEBUG")]
    pub debug: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
