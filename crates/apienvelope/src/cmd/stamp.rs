use crate::cmd::{emit_envelope, StampArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::input::read_input;

pub fn run(args: StampArgs) -> CliResult<i32> {
    let template = read_input(args.input.file.as_deref(), args.input.config())?;

    let mut envelope = template.copy_metadata();
    if let Some(context) = args.context {
        envelope.context = context;
    }
    if let Some(id) = args.id {
        envelope.id = id;
    }

    tracing::debug!(
        method = %envelope.method,
        dropped_items = template.data.item_count(),
        "stamped envelope from template"
    );
    emit_envelope(&envelope, args.pretty)?;
    Ok(SUCCESS)
}
