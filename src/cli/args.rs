use crate::strategy::SumConfig;
use crate::types::AccountId;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Load, summarise and export an in-memory wallet ledger
#[derive(Parser, Debug)]
#[command(name = "wallet-ledger")]
#[command(about = "Load, summarise and export an in-memory wallet ledger", long_about = None)]
pub struct CliArgs {
    /// Directory holding accounts.dump, payments.dump and favorites.dump
    #[arg(long = "import-dir", value_name = "DIR")]
    pub import_dir: Option<PathBuf>,

    /// Compact single-file account export to load
    #[arg(long = "import-file", value_name = "PATH")]
    pub import_file: Option<PathBuf>,

    /// Populate the ledger with a few sample accounts and payments
    #[arg(long = "demo")]
    pub demo: bool,

    /// Directory to write the dump files into
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// File to write the compact account export into
    #[arg(long = "export-file", value_name = "PATH")]
    pub export_file: Option<PathBuf>,

    /// Account whose payment history is exported as page files
    #[arg(long = "history-account", value_name = "ID", requires = "history_dir")]
    pub history_account: Option<AccountId>,

    /// Directory to write the history page files into
    #[arg(long = "history-dir", value_name = "DIR", requires = "history_account")]
    pub history_dir: Option<PathBuf>,

    /// Maximum payments per history page file
    #[arg(long = "page-size", value_name = "COUNT", default_value_t = 10)]
    pub page_size: usize,

    /// Summation strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Summation strategy: 'sync' for OS threads or 'async' for tokio tasks"
    )]
    pub strategy: StrategyType,

    /// Number of summation workers
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of payment partitions summed in parallel (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// Tokio worker threads (async mode only)
    #[arg(
        long = "runtime-threads",
        value_name = "COUNT",
        help = "Tokio runtime worker threads (default: CPU cores)"
    )]
    pub runtime_threads: Option<usize>,

    /// Log each partial sum as it completes (async mode only)
    #[arg(long = "progress")]
    pub progress: bool,
}

/// Available summation strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a SumConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; see [`SumConfig::new`] for
    /// how zero values are treated.
    pub fn to_sum_config(&self) -> SumConfig {
        let default = SumConfig::default();
        SumConfig::new(
            self.workers.unwrap_or(default.workers),
            self.runtime_threads.unwrap_or(default.runtime_threads),
            self.progress,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Strategy parsing tests
    #[rstest]
    #[case::default_strategy(&["program"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (&parsed.strategy, &expected) {
            (StrategyType::Sync, StrategyType::Sync) => (),
            (StrategyType::Async, StrategyType::Async) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.strategy),
        }
    }

    #[test]
    fn test_paths_and_flags() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--import-dir",
            "in",
            "--export-file",
            "out.txt",
            "--demo",
            "--progress",
        ])
        .unwrap();

        assert_eq!(parsed.import_dir, Some(PathBuf::from("in")));
        assert_eq!(parsed.export_file, Some(PathBuf::from("out.txt")));
        assert_eq!(parsed.import_file, None);
        assert!(parsed.demo);
        assert!(parsed.progress);
        assert_eq!(parsed.page_size, 10);
    }

    #[test]
    fn test_history_options() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--history-account",
            "3",
            "--history-dir",
            "pages",
            "--page-size",
            "25",
        ])
        .unwrap();

        assert_eq!(parsed.history_account, Some(3));
        assert_eq!(parsed.history_dir, Some(PathBuf::from("pages")));
        assert_eq!(parsed.page_size, 25);
    }

    // SumConfig conversion tests
    #[rstest]
    #[case::all_defaults(&["program"], num_cpus::get(), num_cpus::get())]
    #[case::custom_workers(&["program", "--workers", "8"], 8, num_cpus::get())]
    #[case::zero_workers(&["program", "--workers", "0"], 0, num_cpus::get())]
    #[case::custom_threads(&["program", "--runtime-threads", "2"], num_cpus::get(), 2)]
    #[case::zero_threads_fallback(&["program", "--runtime-threads", "0"], num_cpus::get(), num_cpus::get())]
    fn test_sum_config_conversion(
        #[case] args: &[&str],
        #[case] expected_workers: usize,
        #[case] expected_threads: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_sum_config();

        assert_eq!(config.workers, expected_workers);
        assert_eq!(config.runtime_threads, expected_threads);
    }

    // Error handling tests
    #[rstest]
    #[case::invalid_strategy(&["program", "--strategy", "invalid"])]
    #[case::history_without_dir(&["program", "--history-account", "1"])]
    #[case::history_dir_without_account(&["program", "--history-dir", "pages"])]
    #[case::negative_workers(&["program", "--workers", "-1"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
