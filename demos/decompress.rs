//! Decompresses a graylzw stream file back into a PNG.

use std::{env, process};

use graylzw::gray::{self, Png};

fn main() {
    let mut args = env::args().skip(1);
    let (input, output) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            eprintln!("Usage: decompress-image <input-stream> <output-image>");
            process::exit(1);
        }
    };

    let result = gray::decompress_from_file(&input)
        .and_then(|image| gray::write_image(&Png, &image, &output));
    match result {
        Ok(()) => (),
        Err(err) => eprintln!("{}", err),
    }
}
