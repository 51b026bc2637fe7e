use clap::Args;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::LevelFilter;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        long,
        default_value_t = 0,
        help = "Number of threads to use, 0 for all cores. Formats are merged in parallel."
    )]
    pub threads:  usize,
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Verbosity (-v info, -vv debug). RUST_LOG overrides it."
    )]
    pub verbose:  u8,
    #[arg(long, default_value_t = false, help = "Display progress bar.")]
    pub progress: bool,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };
        let mut builder = pretty_env_logger::formatted_timed_builder();
        builder.filter_level(level);
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        builder.try_init()?;

        rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build_global()?;
        Ok(())
    }
}

pub fn init_pbar(total: usize) -> anyhow::Result<ProgressBar> {
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>2.green}/{len:2} {msg}")?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Merging...");
    Ok(progress_bar)
}
