use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use apienvelope_core::Envelope;
use apienvelope_io::{EnvelopeReader, IoConfig};

use crate::exit::{io_error, stream_error, CliResult};

/// Read one envelope from `path`, or from stdin when the path is absent or `-`.
pub fn read_input(path: Option<&Path>, config: IoConfig) -> CliResult<Envelope> {
    let source: Box<dyn Read> = match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
            Box::new(file)
        }
        _ => Box::new(io::stdin().lock()),
    };

    let label = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());
    tracing::debug!(source = %label, max = config.max_envelope_size, "reading envelope");

    EnvelopeReader::with_config(source, config)
        .read_envelope()
        .map_err(|err| stream_error(&format!("failed reading {label}"), err))
}
