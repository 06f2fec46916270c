//! Compresses a raster image file into a graylzw stream file.

use std::{env, process};

use graylzw::gray::{self, Png};

fn main() {
    let mut args = env::args().skip(1);
    let (input, output) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            eprintln!("Usage: compress-image <input-image> <output-stream>");
            process::exit(1);
        }
    };

    let result =
        gray::read_image(&Png, &input).and_then(|image| gray::compress_to_file(&image, &output));
    match result {
        Ok(()) => (),
        Err(err) => eprintln!("{}", err),
    }
}
