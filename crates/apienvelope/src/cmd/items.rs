use apienvelope_core::DataPayload;
use serde_json::Value;

use crate::cmd::ItemsArgs;
use crate::exit::{envelope_error, CliResult, SUCCESS};
use crate::input::read_input;
use crate::output::{ItemPrinter, OutputFormat};

pub fn run(args: ItemsArgs, format: OutputFormat) -> CliResult<i32> {
    let mut envelope = read_input(args.input.file.as_deref(), args.input.config())?;
    let limit = args.limit.unwrap_or(usize::MAX);

    let mut printer = ItemPrinter::new(format);
    walk_items(&mut envelope.data, limit, |index, item| printer.print(index, item))?;
    printer.finish();
    Ok(SUCCESS)
}

/// Drive the payload cursor from the first item, handing each decoded item to `visit`.
fn walk_items<F>(data: &mut DataPayload, limit: usize, mut visit: F) -> CliResult<usize>
where
    F: FnMut(usize, &Value),
{
    data.reset_items();
    if data.item_count() == 0 || limit == 0 {
        return Ok(0);
    }

    let first: Value = data
        .current_item()
        .map_err(|err| envelope_error("failed decoding item 0", err))?;
    visit(data.position(), &first);

    let mut seen = 1;
    while seen < limit {
        match data.next_item::<Value>() {
            Ok(item) => visit(data.position(), &item),
            Err(err) if err.is_end_of_items() => break,
            Err(err) => {
                let context = format!("failed decoding item {}", data.position() + 1);
                return Err(envelope_error(&context, err));
            }
        }
        seen += 1;
    }
    Ok(seen)
}
