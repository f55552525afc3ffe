mod commands;
mod logging;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "casecheck",
    version,
    about = "Check client case records for missing data fields and supporting documents"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check records (CSV or XLSX) against a rule document and evidence files
    Check {
        /// Path to the case records (CSV or XLSX)
        records: PathBuf,

        /// Rule document (DOCX or plain text)
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: PathBuf,

        /// Evidence document(s): PDF, or plain text
        #[arg(short, long = "doc", value_name = "FILE")]
        doc: Vec<PathBuf>,

        /// JSON config file (labels, markers, policies, column names)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Status policy: binary (default) or tiered
        #[arg(long, value_name = "POLICY")]
        status_policy: Option<String>,

        /// Missing-field count above which the tiered policy reports "missing data"
        #[arg(long, value_name = "N")]
        tier_threshold: Option<usize>,

        /// Unknown report types: permissive (default) or flag
        #[arg(long, value_name = "POLICY")]
        unknown_type: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Only list records that are not complete
        #[arg(long)]
        problems_only: bool,
    },
    /// Inspect rule documents
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// Extract text from evidence documents and report what was read
    Extract {
        /// Document file(s)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the extracted text as well as the per-document summary
        #[arg(long)]
        show_text: bool,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// Compile a rule document and show the resulting rule sets
    Show {
        /// Rule document (DOCX or plain text)
        file: PathBuf,

        /// JSON config file with custom labels or markers
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List the built-in report-type labels and section markers
    Labels,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            records,
            rules,
            doc,
            config,
            status_policy,
            tier_threshold,
            unknown_type,
            output,
            problems_only,
        } => commands::check::run(commands::check::CheckArgs {
            records,
            rules,
            documents: doc,
            config,
            status_policy,
            tier_threshold,
            unknown_type,
            output,
            problems_only,
        }),
        Commands::Rules { action } => match action {
            RulesAction::Show {
                file,
                config,
                output,
            } => commands::rules::show(&file, config.as_deref(), &output),
            RulesAction::Labels => commands::rules::labels(),
        },
        Commands::Extract { files, show_text } => commands::extract::run(&files, show_text),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
