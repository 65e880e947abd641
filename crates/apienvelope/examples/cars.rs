//! Build a cars response from a template, send it through a byte buffer and
//! walk its items on the receiving side.

use apienvelope::io::{read_envelope, write_envelope};
use apienvelope::{Envelope, ErrorDetail, ErrorPayload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Car {
    color: String,
    #[serde(rename = "type")]
    kind: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut template = Envelope::new();
    template.api_version = "0.1".into();
    template.method = "cars.get".into();
    template.set_param("region", "eu");

    let mut found = template.copy_metadata();
    found.data.kind = "car".into();
    found.data.add_fields(["color", "type"]);
    for (color, kind) in [("red", "SUV"), ("blue", "coupe")] {
        found.data.add_item(&Car {
            color: color.into(),
            kind: kind.into(),
        })?;
    }

    let mut missing = template.copy_metadata();
    missing.error = ErrorPayload::with_code(404, "Car Not Found");
    missing.error.push(
        ErrorDetail::new("Car Not Found")
            .location("id")
            .location_type("parameter")
            .reason("notFound"),
    );

    for env in [&found, &missing] {
        let mut wire = Vec::new();
        write_envelope(&mut wire, env)?;
        println!("sent: {}", String::from_utf8_lossy(&wire));

        let mut received = read_envelope(wire.as_slice())?;
        if !received.error.is_empty() {
            println!("error {}: {}", received.error.code, received.error.message);
            continue;
        }

        received.data.reset_items();
        let first: Car = received.data.current_item()?;
        println!("item: {first:?}");
        loop {
            match received.data.next_item::<Car>() {
                Ok(car) => println!("item: {car:?}"),
                Err(err) if err.is_end_of_items() => break,
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}
