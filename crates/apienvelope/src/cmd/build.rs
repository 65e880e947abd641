use apienvelope_core::{Envelope, ErrorDetail};

use crate::cmd::{emit_envelope, BuildArgs};
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};

pub fn run(args: BuildArgs) -> CliResult<i32> {
    let envelope = assemble(&args)?;
    tracing::info!(
        method = %envelope.method,
        items = envelope.data.item_count(),
        "built envelope"
    );
    emit_envelope(&envelope, args.pretty)?;
    Ok(SUCCESS)
}

fn assemble(args: &BuildArgs) -> CliResult<Envelope> {
    let mut env = Envelope::new();
    set(&mut env.api_version, &args.api_version);
    set(&mut env.context, &args.context);
    set(&mut env.id, &args.id);
    set(&mut env.method, &args.method);
    for param in &args.params {
        let (key, value) = parse_param(param)?;
        env.set_param(key, value);
    }

    let data = &mut env.data;
    set(&mut data.kind, &args.kind);
    set(&mut data.lang, &args.lang);
    set(&mut data.updated, &args.updated);
    set(&mut data.etag, &args.etag);
    set(&mut data.self_link, &args.self_link);
    set(&mut data.edit_link, &args.edit_link);
    set(&mut data.next_link, &args.next_link);
    set(&mut data.previous_link, &args.previous_link);
    data.deleted = args.deleted;
    data.items_per_page = args.items_per_page.unwrap_or_default();
    data.start_index = args.start_index.unwrap_or_default();
    data.total_items = args.total_items.unwrap_or_default();
    data.page_index = args.page_index.unwrap_or_default();
    data.total_pages = args.total_pages.unwrap_or_default();
    data.add_fields(&args.fields);
    for (idx, item) in args.items.iter().enumerate() {
        data.add_raw_item(item.as_str()).map_err(|err| {
            CliError::new(USAGE, format!("--item #{} is not valid JSON: {err}", idx + 1))
        })?;
    }

    if let Some(code) = args.error_code {
        env.error.code = code;
    }
    set(&mut env.error.message, &args.error_message);
    for message in &args.error_details {
        env.error.push(ErrorDetail::new(message.as_str()));
    }

    Ok(env)
}

fn set(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}

fn parse_param(input: &str) -> CliResult<(&str, &str)> {
    match input.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(CliError::new(
            USAGE,
            format!("--param expects KEY=VALUE, got: {input}"),
        )),
    }
}
