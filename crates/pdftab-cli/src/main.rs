mod cli;
mod ocr_cmd;
mod page_range;
mod shared;
mod source;
mod tables_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    shared::init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Tables {
            ref file,
            ref pages,
            ref format,
            row_tolerance,
            column_tolerance,
            ref row_anchor,
            ref ocr,
            ref ocr_text,
            stats,
        } => tables_cmd::run(tables_cmd::TablesArgs {
            file,
            pages: pages.as_deref(),
            format,
            settings: tables_cmd::build_settings(
                row_tolerance,
                column_tolerance,
                row_anchor.clone().into(),
            ),
            ocr_mode: ocr.clone().into(),
            ocr_text: ocr_text.as_deref(),
            stats,
        }),
        cli::Commands::Ocr { ref file, ref format } => ocr_cmd::run(file, format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
