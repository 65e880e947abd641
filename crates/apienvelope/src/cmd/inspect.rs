use crate::cmd::InspectArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::input::read_input;
use crate::output::{print_summary, OutputFormat, Summary};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let envelope = read_input(args.input.file.as_deref(), args.input.config())?;
    if envelope.data.current_item_count() != envelope.data.item_count() {
        tracing::warn!(
            declared = envelope.data.current_item_count(),
            actual = envelope.data.item_count(),
            "currentItemCount does not match items"
        );
    }
    print_summary(&Summary::of(&envelope), format);
    Ok(SUCCESS)
}
