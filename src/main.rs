use anyhow::Result;
use chrono::Utc;
use tracing::debug;

use usage_statusline::aggregate::{aggregate_usage, LOOKBACK_DAYS};
use usage_statusline::cli::Args;
use usage_statusline::config::resolve_plan_config;
use usage_statusline::display::{print_json_output, print_text_output};
use usage_statusline::logging::init_logging;
use usage_statusline::utils::{format_tokens, log_roots};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let roots = log_roots(args.claude_config_dir.as_deref());
    let quota = resolve_plan_config(&args);
    debug!(
        ?roots,
        tier = quota.tier.as_str(),
        daily_limit = quota.daily_token_limit(),
        lookback_days = LOOKBACK_DAYS,
        "resolved inputs"
    );

    let summary = aggregate_usage(&roots, &quota, Utc::now());
    debug!(
        daily = %format_tokens(summary.daily_tokens),
        weekly = %format_tokens(summary.weekly_tokens),
        "window totals"
    );

    if args.json {
        print_json_output(&summary, &quota)?;
    } else {
        print_text_output(&summary, args.labels);
    }
    Ok(())
}
